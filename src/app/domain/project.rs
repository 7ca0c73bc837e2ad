use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layout::PageSettings;

/// A user-named snapshot of layout settings and document content.
/// Re-saving always creates a new record; there is no update-in-place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProject {
    pub id: Uuid,
    pub name: String,
    pub settings: PageSettings,
    pub content: String,
    /// Creation time in Unix milliseconds.
    pub timestamp: i64,
}

impl SavedProject {
    pub fn new(name: String, settings: PageSettings, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            settings,
            content,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}
