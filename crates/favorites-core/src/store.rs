//! Favorites collection with write-through persistence.
//!
//! The in-memory list is authoritative. Every mutation changes it first and
//! then mirrors the whole list into the key-value store; a failed write is
//! logged and reported but never rolls the change back, so the next
//! successful write catches the mirror up.

use crate::download::{export_file_name, Downloader};
use crate::error::{ExportError, ImportError};
use crate::import::{parse_import_document, ImportSource};
use crate::notify::Notifier;
use crate::query::{search_favorites, sort_favorites};
use crate::stats::FavoritesStatistics;
use crate::storage::KeyValueStore;
use chrono::Utc;
use favorites_config::{Config, ExportConfig, StorageConfig};
use favorites_models::{
    ExportDocument, FavoriteMovie, MovieCandidate, NotificationKind, SortCriterion, SortDirection,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, warn};

pub struct FavoritesStore {
    favorites: Vec<FavoriteMovie>,
    storage: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    keys: StorageConfig,
    export: ExportConfig,
}

impl FavoritesStore {
    /// Empty store with default keys and export settings. Call [`load`] and
    /// [`migrate_legacy`] (or use [`open`]) to hydrate it.
    ///
    /// [`load`]: Self::load
    /// [`migrate_legacy`]: Self::migrate_legacy
    /// [`open`]: Self::open
    pub fn new(storage: Box<dyn KeyValueStore>, notifier: Box<dyn Notifier>) -> Self {
        Self::with_config(storage, notifier, &Config::default())
    }

    pub fn with_config(storage: Box<dyn KeyValueStore>, notifier: Box<dyn Notifier>, config: &Config) -> Self {
        Self {
            favorites: Vec::new(),
            storage,
            notifier,
            keys: config.storage.clone(),
            export: config.export.clone(),
        }
    }

    /// Build and hydrate: load the current payload, then migrate the legacy
    /// one if nothing was loaded.
    pub fn open(storage: Box<dyn KeyValueStore>, notifier: Box<dyn Notifier>, config: &Config) -> Self {
        let mut store = Self::with_config(storage, notifier, config);
        store.load();
        store.migrate_legacy();
        info!("Favorites initialized ({} movies)", store.favorites.len());
        store
    }

    pub fn favorites(&self) -> &[FavoriteMovie] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn get(&self, id: u64) -> Option<&FavoriteMovie> {
        self.favorites.iter().find(|f| f.id == id)
    }

    /// Replace the in-memory list with the persisted one. A payload that is
    /// not a JSON array is discarded and erased; individual records that do
    /// not decode are dropped and the rest kept.
    pub fn load(&mut self) {
        let key = self.keys.favorites_key.clone();

        let payload = match self.storage.get(&key) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to read favorites from storage: {}", e);
                None
            }
        };

        let Some(payload) = payload else {
            debug!("No stored favorites under '{}'", key);
            self.favorites = Vec::new();
            return;
        };

        match decode_records::<FavoriteMovie>(&payload, &key) {
            Some(mut favorites) => {
                let before = favorites.len();
                dedup_by_id(&mut favorites);
                if favorites.len() < before {
                    warn!("Dropped {} duplicate favorite(s) from storage", before - favorites.len());
                }
                info!("Loaded {} favorites", favorites.len());
                self.favorites = favorites;
            }
            None => {
                warn!("Stored favorites are corrupted. Erasing '{}'.", key);
                self.favorites = Vec::new();
                if let Err(rm_err) = self.storage.remove(&key) {
                    warn!("Failed to erase corrupted favorites: {}", rm_err);
                }
            }
        }
    }

    /// Move records stored in the legacy format into the collection, then
    /// delete the legacy key. Only runs into an empty collection. Returns the
    /// number of records migrated.
    pub fn migrate_legacy(&mut self) -> usize {
        let legacy_key = self.keys.legacy_key.clone();

        let payload = match self.storage.get(&legacy_key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return 0,
            Err(e) => {
                warn!("Failed to read legacy favorites: {}", e);
                return 0;
            }
        };

        if !self.favorites.is_empty() {
            debug!("Skipping legacy migration, collection already holds {} movies", self.favorites.len());
            return 0;
        }

        let Some(records) = decode_records::<MovieCandidate>(&payload, &legacy_key) else {
            error!("Failed to migrate legacy favorites: '{}' is not a JSON list", legacy_key);
            return 0;
        };

        let migrated = records
            .iter()
            .filter(|r| r.valid_id().is_some() && r.has_title())
            .filter(|r| self.add(r))
            .count();

        if let Err(e) = self.storage.remove(&legacy_key) {
            warn!("Failed to delete legacy favorites key: {}", e);
        }
        info!("Migrated {} legacy favorites", migrated);
        migrated
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        id != 0 && self.favorites.iter().any(|f| f.id == id)
    }

    /// Add a movie. Returns false for a record without id or one that is
    /// already a favorite.
    pub fn add(&mut self, movie: &MovieCandidate) -> bool {
        let Some(favorite) = FavoriteMovie::from_candidate(movie, Utc::now()) else {
            warn!("Cannot add favorite: movie has no id");
            return false;
        };

        if self.is_favorite(favorite.id) {
            debug!("Movie {} is already a favorite", favorite.id);
            return false;
        }

        let message = format!("\"{}\" added to favorites", favorite.title);
        self.favorites.push(favorite);
        self.persist();
        self.notifier.notify(&message, NotificationKind::Success);
        true
    }

    pub fn remove(&mut self, id: u64) -> bool {
        if id == 0 {
            return false;
        }

        let Some(index) = self.favorites.iter().position(|f| f.id == id) else {
            debug!("Movie {} is not a favorite", id);
            return false;
        };

        let removed = self.favorites.remove(index);
        self.persist();
        self.notifier.notify(
            &format!("\"{}\" removed from favorites", removed.title),
            NotificationKind::Info,
        );
        true
    }

    pub fn toggle(&mut self, movie: &MovieCandidate) -> bool {
        let Some(id) = movie.valid_id() else {
            warn!("Cannot toggle favorite: movie has no id");
            return false;
        };

        if self.is_favorite(id) {
            self.remove(id)
        } else {
            self.add(movie)
        }
    }

    pub fn clear(&mut self) -> bool {
        if self.favorites.is_empty() {
            self.notifier.notify("No favorites to clear", NotificationKind::Info);
            return false;
        }

        let removed = self.favorites.len();
        self.favorites.clear();
        self.persist();
        self.notifier.notify(&format!("{} favorites removed", removed), NotificationKind::Info);
        true
    }

    /// Write the collection as an export file through `downloader`
    pub fn export(&self, downloader: &mut dyn Downloader) -> bool {
        if self.favorites.is_empty() {
            self.notifier.notify("No favorites to export", NotificationKind::Warning);
            return false;
        }

        match self.write_export(downloader) {
            Ok(file_name) => {
                info!("Exported {} favorites to {}", self.favorites.len(), file_name);
                self.notifier.notify("Favorites exported successfully", NotificationKind::Success);
                true
            }
            Err(e) => {
                error!("Failed to export favorites: {}", e);
                self.notifier.notify("Failed to export favorites", NotificationKind::Error);
                false
            }
        }
    }

    fn write_export(&self, downloader: &mut dyn Downloader) -> Result<String, ExportError> {
        let exported_at = Utc::now();
        let document = ExportDocument::build(
            &self.favorites,
            exported_at,
            &self.export.app_tag,
            self.export.overview_limit,
        );
        let json = serde_json::to_string_pretty(&document)?;
        let file_name = export_file_name(&self.export.file_prefix, exported_at);
        downloader.download(&file_name, json.as_bytes())?;
        Ok(file_name)
    }

    /// Add every movie in an export file that is not already a favorite.
    /// Resolves to the number actually added.
    pub async fn import(&mut self, source: &dyn ImportSource) -> Result<usize, ImportError> {
        let text = match source.read_to_string().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read import file {}: {}", source.name(), e);
                self.notifier.notify("Failed to read the file", NotificationKind::Error);
                return Err(ImportError::Read(e));
            }
        };

        let candidates = match parse_import_document(&text) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("Failed to process import file {}: {}", source.name(), e);
                self.notifier.notify("Failed to process favorites file", NotificationKind::Error);
                return Err(e);
            }
        };

        // add() refuses records without an id and ones already present
        let imported = candidates.iter().filter(|c| self.add(c)).count();

        info!("Imported {} of {} favorites from {}", imported, candidates.len(), source.name());
        self.notifier.notify(
            &format!("{} favorites imported successfully", imported),
            NotificationKind::Success,
        );
        Ok(imported)
    }

    pub fn statistics(&self) -> FavoritesStatistics {
        FavoritesStatistics::compute(&self.favorites)
    }

    pub fn search(&self, term: &str) -> Vec<FavoriteMovie> {
        search_favorites(&self.favorites, term)
    }

    pub fn sort(&self, criterion: SortCriterion, direction: SortDirection) -> Vec<FavoriteMovie> {
        sort_favorites(&self.favorites, criterion, direction)
    }

    /// Mirror the whole collection into storage. Failures are reported, the
    /// in-memory list stays as it is.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.favorites) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize favorites: {}", e);
                self.notifier.notify("Failed to save favorites", NotificationKind::Error);
                return;
            }
        };

        match self.storage.set(&self.keys.favorites_key, &json) {
            Ok(()) => debug!("Saved {} favorites", self.favorites.len()),
            Err(e) => {
                error!("Failed to save favorites: {}", e);
                self.notifier.notify("Failed to save favorites", NotificationKind::Error);
            }
        }
    }
}

/// Decode a stored JSON array one record at a time. `None` when the payload
/// is not a JSON array; records that do not fit `T` are skipped.
fn decode_records<T: DeserializeOwned>(payload: &str, key: &str) -> Option<Vec<T>> {
    let entries = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            debug!("Payload under '{}' is not an array", key);
            return None;
        }
        Err(e) => {
            debug!("Payload under '{}' is not valid JSON: {}", key, e);
            return None;
        }
    };

    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(idx, entry)| match serde_json::from_value::<T>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping stored record {} under '{}': {}", idx, key, e);
                None
            }
        })
        .collect();
    Some(records)
}

/// Keep the first entry for each id
fn dedup_by_id(favorites: &mut Vec<FavoriteMovie>) {
    let mut seen = std::collections::HashSet::new();
    favorites.retain(|f| seen.insert(f.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::TextImport;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    const KEY: &str = "moviesFavoritos";
    const LEGACY_KEY: &str = "peliculasFavoritas";

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<(String, NotificationKind)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, kind: NotificationKind) {
            self.messages.borrow_mut().push((message.to_string(), kind));
        }
    }

    impl RecordingNotifier {
        fn last(&self) -> Option<(String, NotificationKind)> {
            self.messages.borrow().last().cloned()
        }

        fn count(&self, kind: NotificationKind) -> usize {
            self.messages.borrow().iter().filter(|(_, k)| *k == kind).count()
        }
    }

    #[derive(Default)]
    struct MemoryDownloader {
        files: Vec<(String, Vec<u8>)>,
    }

    impl Downloader for MemoryDownloader {
        fn download(&mut self, file_name: &str, contents: &[u8]) -> Result<(), ExportError> {
            self.files.push((file_name.to_string(), contents.to_vec()));
            Ok(())
        }
    }

    struct FailingDownloader;

    impl Downloader for FailingDownloader {
        fn download(&mut self, _file_name: &str, _contents: &[u8]) -> Result<(), ExportError> {
            Err(ExportError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")))
        }
    }

    struct FailingImport;

    #[async_trait::async_trait]
    impl ImportSource for FailingImport {
        fn name(&self) -> &str {
            "broken.json"
        }

        async fn read_to_string(&self) -> std::io::Result<String> {
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"))
        }
    }

    fn create_store_with(storage: MemoryStore) -> (FavoritesStore, Rc<RecordingNotifier>) {
        let notifier = Rc::new(RecordingNotifier::default());
        let store = FavoritesStore::open(Box::new(storage), Box::new(Rc::clone(&notifier)), &Config::default());
        (store, notifier)
    }

    fn create_store() -> (FavoritesStore, Rc<RecordingNotifier>) {
        create_store_with(MemoryStore::new())
    }

    fn dune() -> MovieCandidate {
        MovieCandidate::new(1, "Dune")
            .with_vote_average(8.0)
            .with_release_date("2021-09-15")
            .with_overview("Paul Atreides travels to the most dangerous planet in the universe.")
    }

    fn arrival() -> MovieCandidate {
        MovieCandidate::new(2, "Arrival")
            .with_vote_average(7.9)
            .with_release_date("2016-11-10")
            .with_overview("A linguist works with the military to communicate with alien lifeforms.")
    }

    fn stored_ids(store: &FavoritesStore) -> Vec<u64> {
        let payload = store.storage().get(KEY).unwrap().unwrap();
        let stored: Vec<FavoriteMovie> = serde_json::from_str(&payload).unwrap();
        stored.iter().map(|f| f.id).collect()
    }

    fn ids(favorites: &[FavoriteMovie]) -> Vec<u64> {
        favorites.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_add_then_is_favorite() {
        let (mut store, notifier) = create_store();

        assert!(store.add(&dune()));
        assert!(store.is_favorite(1));
        assert!(!store.is_favorite(2));
        assert_eq!(stored_ids(&store), vec![1]);
        assert_eq!(
            notifier.last(),
            Some(("\"Dune\" added to favorites".to_string(), NotificationKind::Success))
        );
    }

    #[test]
    fn test_add_normalizes_record() {
        let (mut store, _) = create_store();
        let before = Utc::now();
        store.add(&MovieCandidate { id: Some(9), ..MovieCandidate::default() });

        let favorite = store.get(9).unwrap();
        assert_eq!(favorite.title, "Unknown title");
        assert_eq!(favorite.original_language, "en");
        assert_eq!(favorite.schema_version, "1.0");
        assert!(favorite.added_at >= before);
    }

    #[test]
    fn test_add_duplicate_returns_false() {
        let (mut store, _) = create_store();
        assert!(store.add(&dune()));
        let added_at = store.get(1).unwrap().added_at;

        assert!(!store.add(&dune().with_vote_average(1.0)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().added_at, added_at);
        assert_eq!(store.get(1).unwrap().vote_average, 8.0);
    }

    #[test]
    fn test_add_invalid_movie_returns_false() {
        let (mut store, notifier) = create_store();
        assert!(!store.add(&MovieCandidate::default()));
        assert!(!store.add(&MovieCandidate::new(0, "Zero")));
        assert!(store.is_empty());
        assert!(notifier.last().is_none());
        assert_eq!(store.storage().get(KEY).unwrap(), None);
    }

    #[test]
    fn test_is_favorite_zero_id() {
        let (store, _) = create_store();
        assert!(!store.is_favorite(0));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (mut store, _) = create_store();
        store.add(&arrival());
        store.add(&dune());
        store.add(&MovieCandidate::new(3, "Her"));
        assert_eq!(ids(store.favorites()), vec![2, 1, 3]);
    }

    #[test]
    fn test_remove() {
        let (mut store, notifier) = create_store();
        store.add(&dune());
        store.add(&arrival());

        assert!(store.remove(1));
        assert_eq!(ids(store.favorites()), vec![2]);
        assert_eq!(stored_ids(&store), vec![2]);
        assert_eq!(
            notifier.last(),
            Some(("\"Dune\" removed from favorites".to_string(), NotificationKind::Info))
        );
    }

    #[test]
    fn test_remove_absent_returns_false() {
        let (mut store, _) = create_store();
        store.add(&dune());

        assert!(!store.remove(42));
        assert!(!store.remove(0));
        assert_eq!(ids(store.favorites()), vec![1]);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (mut store, _) = create_store();

        assert!(store.toggle(&dune()));
        assert!(store.is_favorite(1));
        assert!(store.toggle(&dune()));
        assert!(!store.is_favorite(1));

        store.add(&arrival());
        assert!(store.toggle(&arrival()));
        assert!(store.toggle(&arrival()));
        assert!(store.is_favorite(2));
    }

    #[test]
    fn test_toggle_invalid_movie() {
        let (mut store, _) = create_store();
        assert!(!store.toggle(&MovieCandidate::default()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear() {
        let (mut store, notifier) = create_store();
        store.add(&dune());
        store.add(&arrival());

        assert!(store.clear());
        assert!(store.is_empty());
        assert!(stored_ids(&store).is_empty());
        assert_eq!(notifier.last(), Some(("2 favorites removed".to_string(), NotificationKind::Info)));
    }

    #[test]
    fn test_clear_empty() {
        let (mut store, notifier) = create_store();
        assert!(!store.clear());
        assert_eq!(notifier.last(), Some(("No favorites to clear".to_string(), NotificationKind::Info)));
    }

    #[test]
    fn test_statistics_scenario() {
        let (mut store, _) = create_store();
        assert_eq!(store.statistics(), FavoritesStatistics::empty());

        store.add(&dune());
        store.add(&arrival());

        let stats = store.statistics();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_rating, 8.0);
        assert_eq!(stats.top_movie.unwrap().id, 1);
    }

    #[test]
    fn test_search_scenario() {
        let (mut store, _) = create_store();
        store.add(&dune());
        store.add(&arrival());

        assert_eq!(ids(&store.search("dune")), vec![1]);
        assert_eq!(ids(&store.search("")), vec![1, 2]);
    }

    #[test]
    fn test_sort_scenario() {
        let (mut store, _) = create_store();
        store.add(&dune());
        store.add(&arrival());

        let sorted = store.sort(SortCriterion::VoteAverage, SortDirection::Asc);
        let titles: Vec<&str> = sorted.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, vec!["Arrival", "Dune"]);
        assert_eq!(ids(store.favorites()), vec![1, 2]);
    }

    #[test]
    fn test_load_corrupted_payload_self_heals() {
        let mut storage = MemoryStore::new();
        storage.set(KEY, "{not json").unwrap();

        let (store, _) = create_store_with(storage);
        assert!(store.is_empty());
        assert_eq!(store.storage().get(KEY).unwrap(), None);
    }

    #[test]
    fn test_load_existing_payload() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                KEY,
                r#"[{"id": 1, "title": "Dune", "added_at": "2024-01-01T00:00:00Z", "schema_version": "1.0"},
                    {"id": 2, "title": "Arrival", "fechaAgregada": "2024-01-02T00:00:00.000Z", "version": "1.0"},
                    {"id": 1, "title": "Dune again", "added_at": "2024-01-03T00:00:00Z"}]"#,
            )
            .unwrap();

        let (store, _) = create_store_with(storage);
        assert_eq!(ids(store.favorites()), vec![1, 2]);
        assert_eq!(store.get(1).unwrap().title, "Dune");
        assert_eq!(store.get(2).unwrap().original_language, "en");
    }

    #[test]
    fn test_migrate_legacy_payload() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                LEGACY_KEY,
                r#"[{"id": 10, "title": "Heat", "vote_average": 8.3},
                    {"id": 11},
                    {"title": "No id"},
                    {"id": 12, "title": "Ronin", "release_date": "1998-09-25"}]"#,
            )
            .unwrap();

        let (store, _) = create_store_with(storage);
        assert_eq!(ids(store.favorites()), vec![10, 12]);
        assert_eq!(store.storage().get(LEGACY_KEY).unwrap(), None);
        assert_eq!(stored_ids(&store), vec![10, 12]);
    }

    #[test]
    fn test_migrate_legacy_skipped_when_collection_not_empty() {
        let mut storage = MemoryStore::new();
        storage
            .set(KEY, r#"[{"id": 1, "title": "Dune", "added_at": "2024-01-01T00:00:00Z"}]"#)
            .unwrap();
        storage.set(LEGACY_KEY, r#"[{"id": 10, "title": "Heat"}]"#).unwrap();

        let (store, _) = create_store_with(storage);
        assert_eq!(ids(store.favorites()), vec![1]);
        assert!(store.storage().get(LEGACY_KEY).unwrap().is_some());
    }

    #[test]
    fn test_migrate_legacy_corrupted_is_silent() {
        let mut storage = MemoryStore::new();
        storage.set(LEGACY_KEY, "[{broken").unwrap();

        let (store, notifier) = create_store_with(storage);
        assert!(store.is_empty());
        assert!(store.storage().get(LEGACY_KEY).unwrap().is_some());
        assert_eq!(notifier.count(NotificationKind::Error), 0);
    }

    #[test]
    fn test_migrate_legacy_skips_mistyped_record() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                LEGACY_KEY,
                r#"[{"id": 10, "title": "Heat"}, {"id": 11, "title": "Ronin", "vote_average": "7.5"}]"#,
            )
            .unwrap();

        let (store, _) = create_store_with(storage);
        assert_eq!(ids(store.favorites()), vec![10]);
        assert_eq!(store.storage().get(LEGACY_KEY).unwrap(), None);
    }

    #[test]
    fn test_load_keeps_valid_records_next_to_mistyped_one() {
        let mut storage = MemoryStore::new();
        storage
            .set(
                KEY,
                r#"[{"id": 1, "title": "Dune", "fechaAgregada": "2024-01-01T00:00:00.000Z"},
                    {"id": 2, "title": "Arrival", "overview": null}]"#,
            )
            .unwrap();

        let (store, _) = create_store_with(storage);
        assert_eq!(ids(store.favorites()), vec![1]);
        assert!(store.storage().get(KEY).unwrap().is_some());
    }

    #[test]
    fn test_load_non_array_payload_self_heals() {
        let mut storage = MemoryStore::new();
        storage.set(KEY, r#"{"id": 1, "title": "Dune"}"#).unwrap();

        let (store, _) = create_store_with(storage);
        assert!(store.is_empty());
        assert_eq!(store.storage().get(KEY).unwrap(), None);
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        // Room for a single small favorite, not two
        let (mut store, notifier) = create_store_with(MemoryStore::with_quota(400));

        assert!(store.add(&MovieCandidate::new(1, "Dune")));
        assert_eq!(stored_ids(&store), vec![1]);

        assert!(store.add(&arrival()));
        assert_eq!(ids(store.favorites()), vec![1, 2]);
        assert_eq!(stored_ids(&store), vec![1]);
        assert_eq!(notifier.count(NotificationKind::Error), 1);

        // A later successful write reflects every in-memory change
        assert!(store.remove(2));
        assert_eq!(stored_ids(&store), vec![1]);
        assert!(store.remove(1));
        assert!(stored_ids(&store).is_empty());
    }

    #[test]
    fn test_export_empty_collection() {
        let (store, notifier) = create_store();
        let mut downloader = MemoryDownloader::default();

        assert!(!store.export(&mut downloader));
        assert!(downloader.files.is_empty());
        assert_eq!(notifier.last(), Some(("No favorites to export".to_string(), NotificationKind::Warning)));
    }

    #[test]
    fn test_export_writes_document() {
        let (mut store, notifier) = create_store();
        store.add(&dune());
        store.add(&arrival());
        let mut downloader = MemoryDownloader::default();

        assert!(store.export(&mut downloader));
        assert_eq!(downloader.files.len(), 1);

        let (name, contents) = &downloader.files[0];
        assert!(name.starts_with("my-favorite-movies-"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "my-favorite-movies-YYYY-MM-DD.json".len());

        let text = std::str::from_utf8(contents).unwrap();
        assert!(text.contains("\n  \"metadata\""));
        let doc: ExportDocument = serde_json::from_str(text).unwrap();
        assert_eq!(doc.metadata.total_count, 2);
        assert_eq!(doc.metadata.app_tag, "cineshelf");
        assert_eq!(doc.favorites[0].title, "Dune");
        assert_eq!(doc.favorites[1].rating, 7.9);
        assert_eq!(notifier.last().unwrap().1, NotificationKind::Success);
    }

    #[test]
    fn test_export_download_failure() {
        let (mut store, notifier) = create_store();
        store.add(&dune());

        assert!(!store.export(&mut FailingDownloader));
        assert_eq!(notifier.last(), Some(("Failed to export favorites".to_string(), NotificationKind::Error)));
    }

    #[tokio::test]
    async fn test_export_then_import_reproduces_ids() {
        let (mut source, _) = create_store();
        source.add(&dune());
        source.add(&arrival());
        source.add(&MovieCandidate::new(3, "Her"));
        let mut downloader = MemoryDownloader::default();
        assert!(source.export(&mut downloader));
        let (name, contents) = downloader.files.remove(0);

        let (mut target, notifier) = create_store();
        let file = TextImport::new(name, String::from_utf8(contents).unwrap());
        let imported = target.import(&file).await.unwrap();

        assert_eq!(imported, 3);
        assert_eq!(ids(target.favorites()), vec![1, 2, 3]);
        let dune = target.get(1).unwrap();
        assert_eq!(dune.vote_average, 8.0);
        assert_eq!(dune.poster_path, None);
        assert!(dune.genre_ids.is_empty());
        assert_eq!(
            notifier.last(),
            Some(("3 favorites imported successfully".to_string(), NotificationKind::Success))
        );
    }

    #[tokio::test]
    async fn test_import_skips_existing() {
        let (mut store, _) = create_store();
        store.add(&dune());

        let file = TextImport::new(
            "favorites.json",
            r#"{"favorites": [{"id": 1, "title": "Dune"}, {"id": 2, "title": "Arrival", "rating": 7.9}, {"title": "No id"}]}"#,
        );
        assert_eq!(store.import(&file).await.unwrap(), 1);
        assert_eq!(ids(store.favorites()), vec![1, 2]);
        assert_eq!(store.get(2).unwrap().vote_average, 7.9);
        assert_eq!(stored_ids(&store), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_import_invalid_format() {
        let (mut store, notifier) = create_store();
        let file = TextImport::new("favorites.json", r#"{"movies": []}"#);

        let err = store.import(&file).await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat));
        assert_eq!(notifier.last().unwrap().1, NotificationKind::Error);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_import_unparseable_file() {
        let (mut store, notifier) = create_store();
        let file = TextImport::new("favorites.json", "{not json");

        assert!(matches!(store.import(&file).await, Err(ImportError::Parse(_))));
        assert_eq!(notifier.count(NotificationKind::Error), 1);
    }

    #[tokio::test]
    async fn test_import_read_failure() {
        let (mut store, notifier) = create_store();

        assert!(matches!(store.import(&FailingImport).await, Err(ImportError::Read(_))));
        assert_eq!(
            notifier.last(),
            Some(("Failed to read the file".to_string(), NotificationKind::Error))
        );
    }

    #[test]
    fn test_custom_keys_from_config() {
        let mut config = Config::default();
        config.storage.favorites_key = "shelf".to_string();
        let notifier = Rc::new(RecordingNotifier::default());
        let mut store = FavoritesStore::open(Box::new(MemoryStore::new()), Box::new(notifier), &config);

        store.add(&dune());
        assert!(store.storage().get("shelf").unwrap().is_some());
        assert_eq!(store.storage().get(KEY).unwrap(), None);
    }
}
