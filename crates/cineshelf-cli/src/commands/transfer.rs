use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use favorites_core::{DirectoryDownloader, FileImport};
use serde_json::json;
use std::path::PathBuf;

pub fn run_export(ctx: &AppContext, dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = ctx.open_store(output)?;
    let mut downloader = DirectoryDownloader::new(dir.unwrap_or_else(|| ctx.paths.export_dir()));

    if !store.export(&mut downloader) {
        // Nothing to export is not a failure
        if store.is_empty() {
            return Ok(());
        }
        return Err(eyre!("Export to {} failed", downloader.dir().display()));
    }

    if let Some(path) = downloader.last_written() {
        match output.format() {
            OutputFormat::Human => output.println(format!("Saved to {}", path.display())),
            OutputFormat::Json | OutputFormat::JsonPretty => output.json(&json!({
                "path": path.display().to_string(),
                "count": store.len(),
            })),
        }
    }
    Ok(())
}

pub async fn run_import(ctx: &AppContext, file: PathBuf, output: &Output) -> Result<()> {
    let mut store = ctx.open_store(output)?;
    let source = FileImport::new(&file);

    let imported = store
        .import(&source)
        .await
        .map_err(|e| eyre!("Import from {} failed: {}", file.display(), e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({ "imported": imported, "total": store.len() }));
    }
    Ok(())
}
