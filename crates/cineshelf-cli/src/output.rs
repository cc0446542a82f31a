use clap::ValueEnum;
use favorites_core::Notifier;
use favorites_models::NotificationKind;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// Terminal sink for messages and results. Doubles as the store's notifier.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message(NotificationKind::Success, msg.as_ref());
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        self.message(NotificationKind::Error, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message(NotificationKind::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message(NotificationKind::Warning, msg.as_ref());
    }

    fn message(&self, kind: NotificationKind, msg: &str) {
        // Errors are shown even in quiet mode
        if self.quiet && kind != NotificationKind::Error {
            return;
        }

        match self.format {
            OutputFormat::Human => match kind {
                NotificationKind::Success => println!("{} {}", "✓".green(), msg),
                NotificationKind::Error => eprintln!("{} {}", "✗".red(), msg),
                NotificationKind::Warning => println!("{} {}", "⚠".yellow(), msg),
                NotificationKind::Info => println!("{}", msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": kind.as_str(),
                    "message": msg
                });
                self.print_json(&json);
            }
        }
    }

    /// Plain line in human mode; ignored in JSON modes where results go through `json`
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || self.format != OutputFormat::Human {
            return;
        }
        println!("{}", msg.as_ref());
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty | OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }
}

impl Notifier for Output {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.message(kind, message);
    }
}
