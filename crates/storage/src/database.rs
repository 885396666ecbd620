//! Opening the underlying database
//!
//! - `open_database`: open or create the database file, returning errors
//! - `get_db`: same, but a failure at startup terminates the process
//! - `in_memory_database`: volatile backend for tests and ephemeral use

use std::fs::{File, OpenOptions};
use std::path::Path;

use capstore_core::Result;
use redb::backends::InMemoryBackend;
use redb::Database;
use tracing::{error, info};

use crate::config::StoreConfig;

/// Owner read/write only.
#[cfg(unix)]
const DATABASE_FILE_MODE: u32 = 0o600;

fn open_file(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(DATABASE_FILE_MODE);
    }
    options.open(path)
}

/// Open or create the database file at `path`.
///
/// The file is created with owner-only permissions. Engine options are the
/// defaults except for `cache_size` when the config sets one.
///
/// # Errors
///
/// Returns `CacheError::Io` if the file cannot be opened and
/// `CacheError::Engine` if it is not a valid database or is already open.
pub fn open_database(path: impl AsRef<Path>, config: &StoreConfig) -> Result<Database> {
    let path = path.as_ref();
    info!(target: "capstore::db", database = %path.display(), "Initiating database");

    let file = open_file(path)?;
    let mut builder = Database::builder();
    if let Some(cache_size) = config.cache_size {
        builder.set_cache_size(cache_size);
    }
    Ok(builder.create_file(file)?)
}

/// Open the database at `path` or terminate the process.
///
/// An unopenable store at boot is unrecoverable, so this logs the cause
/// and exits with status 1 instead of returning an error.
pub fn get_db(path: impl AsRef<Path>) -> Database {
    let path = path.as_ref();
    match open_database(path, &StoreConfig::default()) {
        Ok(db) => db,
        Err(e) => {
            error!(
                target: "capstore::db",
                database = %path.display(),
                error = %e,
                "Failed to open database"
            );
            std::process::exit(1);
        }
    }
}

/// Create a database that lives only in memory.
pub fn in_memory_database() -> Result<Database> {
    Ok(Database::builder().create_with_backend(InMemoryBackend::new())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.db");
        let db = open_database(&path, &StoreConfig::default()).unwrap();
        assert!(path.exists());
        drop(db);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.db");
        let _db = open_database(&path, &StoreConfig::default()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_reopen_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.db");
        drop(open_database(&path, &StoreConfig::default()).unwrap());
        assert!(open_database(&path, &StoreConfig::default()).is_ok());
    }

    #[test]
    fn test_open_with_cache_size() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            cache_size: Some(4 * 1024 * 1024),
            ..StoreConfig::default()
        };
        assert!(open_database(dir.path().join("c.db"), &config).is_ok());
    }

    #[test]
    fn test_open_garbage_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, vec![0xAB; 8192]).unwrap();
        assert!(open_database(&path, &StoreConfig::default()).is_err());
    }

    #[test]
    fn test_open_in_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/requests.db");
        let err = open_database(&path, &StoreConfig::default()).unwrap_err();
        assert!(matches!(err, capstore_core::CacheError::Io(_)));
    }

    #[test]
    fn test_get_db_opens() {
        let dir = tempdir().unwrap();
        let _db = get_db(dir.path().join("requests.db"));
    }

    #[test]
    fn test_in_memory() {
        assert!(in_memory_database().is_ok());
    }
}
