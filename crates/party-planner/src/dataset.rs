//! Guest Dataset Loading
//!
//! Reads the invitee list from a local JSON export once at startup.
//! Acquisition of the dataset itself is out of scope; a failure to load
//! is fatal because nothing can be served without the guest list.

use std::path::{Path, PathBuf};

use crate::error::{PlannerError, Result};
use crate::model::GuestRecord;

/// Default location of the guest list, relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/guests.json";

/// Resolve the dataset path from `GUEST_DATASET`, falling back to
/// [`DEFAULT_DATASET_PATH`]
pub fn dataset_path() -> PathBuf {
    std::env::var("GUEST_DATASET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH))
}

/// Load all guest records from a JSON array file
pub fn load_guests(path: impl AsRef<Path>) -> Result<Vec<GuestRecord>> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|e| {
        PlannerError::Dataset(format!("cannot read guest dataset {}: {}", path.display(), e))
    })?;

    let guests: Vec<GuestRecord> = serde_json::from_str(&raw).map_err(|e| {
        PlannerError::Dataset(format!("malformed guest dataset {}: {}", path.display(), e))
    })?;

    if guests.is_empty() {
        tracing::warn!("Guest dataset {} is empty", path.display());
    } else {
        tracing::info!(count = guests.len(), "Loaded guest dataset");
    }

    Ok(guests)
}
