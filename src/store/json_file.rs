//! Stores the transaction collection as a pretty-printed JSON array in a single file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::{Error, store::TransactionStore, transaction::Transaction};

/// A [TransactionStore] backed by one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the JSON document at `path`.
    ///
    /// Nothing is read or written until [TransactionStore::load] or
    /// [TransactionStore::save] is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty collection if the document does not exist yet.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the directory or file could not be created.
    pub fn initialize(&mut self) -> Result<(), Error> {
        if self.path.exists() {
            return Ok(());
        }

        tracing::info!("Creating empty transaction file at {}", self.path.display());
        self.save(&[])
    }

    fn ensure_parent_dir(&self) -> Result<(), Error> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .map_err(|error| storage_error("create directory", parent, error)),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");

        self.path.with_file_name(file_name)
    }
}

impl TransactionStore for JsonFileStore {
    /// Records that cannot be decoded are skipped, the rest are still returned.
    fn load(&self) -> Vec<Transaction> {
        match self.read_entries() {
            Some(entries) => self.decode_entries(entries).0,
            None => Vec::new(),
        }
    }

    /// Write to a sibling temporary file and rename it over the document, so
    /// readers never see a half written file.
    ///
    /// A document holding records that could not be decoded is never
    /// overwritten, since saving would drop those records.
    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
        if let Some(entries) = self.read_entries() {
            let (_, skipped) = self.decode_entries(entries);
            if skipped > 0 {
                return Err(Error::StorageError(format!(
                    "{} holds {skipped} unreadable transactions, refusing to overwrite it",
                    self.path.display()
                )));
            }
        }

        self.ensure_parent_dir()?;

        let content = serde_json::to_string_pretty(transactions)
            .map_err(|error| Error::StorageError(format!("could not serialize JSON: {error}")))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, content)
            .map_err(|error| storage_error("write", &temp_path, error))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|error| storage_error("replace", &self.path, error))?;

        tracing::debug!(
            "Saved {} transactions to {}",
            transactions.len(),
            self.path.display()
        );

        Ok(())
    }
}

impl JsonFileStore {
    /// The raw elements of the stored array, or `None` if there is no usable document.
    ///
    /// Only a missing file, an unreadable file or a document that is not a JSON
    /// array count as "no document".
    fn read_entries(&self) -> Option<Vec<Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{} does not exist, using no transactions", self.path.display());
                return None;
            }
            Err(error) => {
                tracing::warn!(
                    "Could not read {}, using no transactions: {error}",
                    self.path.display()
                );
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Some(entries),
            Err(error) => {
                tracing::warn!(
                    "Could not parse {}, using no transactions: {error}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Decode each element on its own, returning the transactions and the
    /// number of elements that were skipped.
    fn decode_entries(&self, entries: Vec<Value>) -> (Vec<Transaction>, usize) {
        let mut transactions = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value(entry) {
                Ok(transaction) => transactions.push(transaction),
                Err(error) => {
                    tracing::warn!(
                        "Skipping unreadable transaction at index {index} in {}: {error}",
                        self.path.display()
                    );
                    skipped += 1;
                }
            }
        }

        (transactions, skipped)
    }
}

fn storage_error(action: &str, path: &Path, error: io::Error) -> Error {
    Error::StorageError(format!("could not {action} {}: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use crate::{
        Error,
        store::{JsonFileStore, TransactionStore},
        transaction::{Category, Transaction, TransactionType},
    };

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                kind: TransactionType::Expense,
                amount: 40.0,
                category: Some(Category::Food),
                date: "2024-03-01".to_owned(),
                created_at: "2024-03-01T09:00:00Z".to_owned(),
            },
            Transaction {
                id: 2,
                kind: TransactionType::Income,
                amount: 100.0,
                category: None,
                date: "2024-03-02".to_owned(),
                created_at: "2024-03-02T09:00:00Z".to_owned(),
            },
        ]
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("transactions.json"));

        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn non_array_document_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, r#"{"id": 1}"#).unwrap();

        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn malformed_file_is_overwritten_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(&path);

        store.save(&sample()).unwrap();

        assert_eq!(store.load(), sample());
    }

    #[test]
    fn unreadable_records_are_skipped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        fs::write(
            &path,
            json!([
                {"id": 1, "type": "income", "amount": 100.0, "category": null, "date": "2024-03-02"},
                {"id": 2, "type": "transfer", "amount": 5.0, "category": null, "date": "2024-03-03"},
                {"id": 3, "type": "expense", "amount": "lots", "category": "Food", "date": "2024-03-04"}
            ])
            .to_string(),
        )
        .unwrap();

        let loaded = JsonFileStore::new(&path).load();

        let ids: Vec<i64> = loaded.iter().map(|transaction| transaction.id).collect();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn save_refuses_to_drop_unreadable_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        let original = json!([
            {"id": 1, "type": "income", "amount": 100.0, "category": null, "date": "2024-03-02"},
            {"id": 7, "type": "transfer", "amount": 5.0, "category": null, "date": "2024-03-03"}
        ])
        .to_string();
        fs::write(&path, &original).unwrap();
        let mut store = JsonFileStore::new(&path);

        let result = store.save(&sample());

        assert!(matches!(result, Err(Error::StorageError(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn saves_and_loads_transactions() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("transactions.json"));

        store.save(&sample()).unwrap();

        assert_eq!(store.load(), sample());
    }

    #[test]
    fn save_of_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();
        let first_text = fs::read_to_string(&path).unwrap();

        let loaded = store.load();
        store.save(&loaded).unwrap();

        assert_eq!(store.load(), loaded);
        assert_eq!(fs::read_to_string(&path).unwrap(), first_text);
    }

    #[test]
    fn writes_pretty_json_with_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        let mut store = JsonFileStore::new(&path);

        store.save(&sample()[1..]).unwrap();

        let want = r#"[
  {
    "id": 2,
    "type": "income",
    "amount": 100.0,
    "category": null,
    "date": "2024-03-02",
    "created_at": "2024-03-02T09:00:00Z"
  }
]"#;
        assert_eq!(fs::read_to_string(&path).unwrap(), want);
    }

    #[test]
    fn initialize_creates_directory_and_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("transactions.json");
        let mut store = JsonFileStore::new(&path);

        store.initialize().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!dir.path().join("data").join("transactions.json.tmp").exists());
    }

    #[test]
    fn initialize_keeps_existing_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transactions.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&sample()).unwrap();

        store.initialize().unwrap();

        assert_eq!(store.load(), sample());
    }

    #[test]
    fn save_fails_when_directory_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = JsonFileStore::new(blocker.join("transactions.json"));

        assert!(store.save(&sample()).is_err());
    }
}
