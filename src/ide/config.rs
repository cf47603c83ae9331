//! Service configuration.

use serde::{Deserialize, Serialize};

use super::debug_log::DEFAULT_MAX_ENTRIES;
use crate::error::{AstError, Result};

/// Options for an [`AstService`](super::AstService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Record every call in the debug log
    pub debug: bool,
    /// Capacity of the debug log ring
    pub debug_max_entries: usize,
    /// Reuse the previous tree on edits; false forces full reparses
    pub incremental: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            debug: false,
            debug_max_entries: DEFAULT_MAX_ENTRIES,
            incremental: true,
        }
    }
}

impl ServiceConfig {
    /// Parse a host-supplied JSON object; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AstError::InvalidConfig(e.to_string()))
    }
}
