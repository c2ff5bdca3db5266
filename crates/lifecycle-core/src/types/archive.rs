//! Archive audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why an id was archived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveStatus {
    /// Strategy finished backtesting
    Tested,
    /// Strategy's live run finished
    Completed,
}

impl std::fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveStatus::Tested => write!(f, "tested"),
            ArchiveStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Append-only audit record. Never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub id: String,
    pub archive_date: DateTime<Utc>,
    pub status: ArchiveStatus,
}

impl ArchiveEntry {
    pub fn new(id: impl Into<String>, status: ArchiveStatus) -> Self {
        Self {
            id: id.into(),
            archive_date: Utc::now(),
            status,
        }
    }
}
