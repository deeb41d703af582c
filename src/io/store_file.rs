use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::debug;

use crate::common::error::AppError;
use crate::domain::store::AccountStore;

/// Decodes a full store from a JSON stream: one object with a single
/// `accounts` array, accounts in file order.
///
/// # Examples
///
/// ```
/// use bank_ledger::io::store_file::read_store;
///
/// let data = r#"{"accounts": []}"#;
/// let store = read_store(data.as_bytes()).unwrap();
/// assert!(store.is_empty());
/// ```
pub fn read_store<R: Read>(reader: R) -> Result<AccountStore, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Encodes the full store as pretty-printed JSON.
pub fn write_store<W: Write>(writer: W, store: &AccountStore) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, store)
}

/// Loads the store from `path`.
///
/// A missing file yields an empty store and, as a side effect, an empty
/// persisted representation, so the next run finds a parseable file. A file
/// that exists but cannot be read or parsed is fatal to the process.
pub fn load(path: &Path) -> Result<AccountStore, AppError> {
    if !path.exists() {
        let store = AccountStore::new();
        persist(path, &store)?;
        debug!("created empty account store at {}", path.display());
        return Ok(store);
    }

    let file = File::open(path)?;
    let store = read_store(file)?;
    debug!("loaded {} account(s) from {}", store.len(), path.display());
    Ok(store)
}

/// Rewrites the whole backing file from the in-memory store. No partial
/// writes, no backup-then-swap; any failure here is fatal to the process.
pub fn persist(path: &Path, store: &AccountStore) -> Result<(), AppError> {
    let file = File::create(path)?;
    write_store(file, store)?;
    debug!("persisted {} account(s) to {}", store.len(), path.display());
    Ok(())
}
