//! ccard-storage-json
//!
//! Filesystem-backed JSON persistence for the purchase collection.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use ccard_core::{storage::PurchaseStore, CoreError};
use ccard_domain::{Purchase, PurchaseDocument};
use tracing::{debug, warn};

/// Fixed key the collection is stored under; doubles as the file stem.
pub const STORAGE_KEY: &str = "controlecard_data";
const FILE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the whole purchase collection as one `{ "purchases": [...] }` document.
#[derive(Debug, Clone)]
pub struct JsonPurchaseStorage {
    path: PathBuf,
}

impl JsonPurchaseStorage {
    /// Uses `<data_dir>/controlecard_data.json`, creating the directory if needed.
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(format!("{STORAGE_KEY}.{FILE_EXTENSION}")),
        })
    }

    /// Uses an explicit document path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PurchaseStore for JsonPurchaseStorage {
    fn load_all(&self) -> Result<Vec<Purchase>, CoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        match serde_json::from_slice::<PurchaseDocument>(&bytes) {
            Ok(document) => {
                debug!(
                    path = %self.path.display(),
                    count = document.purchases.len(),
                    "loaded purchases"
                );
                Ok(document.purchases)
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "stored purchases are unreadable, starting from an empty collection"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, purchases: &[Purchase]) -> Result<(), CoreError> {
        let document = PurchaseDocument {
            purchases: purchases.to_vec(),
        };
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &serialize_document(&document)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = purchases.len(), "saved purchases");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_document(document: &PurchaseDocument) -> Result<String, CoreError> {
    serde_json::to_string_pretty(document).map_err(|err| CoreError::Serde(err.to_string()))
}
