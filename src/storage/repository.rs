use crate::error::Result;

/// Key-value blob storage used to persist the notification list
///
/// Implementations only need whole-value reads and overwrites; no
/// transactionality is assumed. A missing key is `Ok(None)`, not an error.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: BlobStore + ?Sized> BlobStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileBlobStore, MemoryBlobStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn exercise(store: &dyn BlobStore) {
        assert_eq!(store.get("bus-ticket.notifications").unwrap(), None);

        store.set("bus-ticket.notifications", "[]").unwrap();
        assert_eq!(
            store.get("bus-ticket.notifications").unwrap().as_deref(),
            Some("[]")
        );

        store.set("bus-ticket.notifications", "[1]").unwrap();
        assert_eq!(
            store.get("bus-ticket.notifications").unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn test_memory_store_contract() {
        exercise(&MemoryBlobStore::new());
    }

    #[test]
    fn test_file_store_contract() {
        let temp_dir = TempDir::new().unwrap();
        exercise(&FileBlobStore::new(temp_dir.path().join("data")));
    }

    #[test]
    fn test_shared_store_contract() {
        let shared: Arc<dyn BlobStore> = Arc::new(MemoryBlobStore::new());
        exercise(&shared);

        let boxed: Box<dyn BlobStore> = Box::new(MemoryBlobStore::new());
        exercise(&boxed);
    }
}
