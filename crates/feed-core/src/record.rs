//! Feed record type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A single item of the feed
///
/// Records are immutable once constructed and compare structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedRecord {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    url: Url,
}

impl FeedRecord {
    pub fn new(id: Uuid, description: Option<String>, location: Option<String>, url: Url) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Locator of the resource this record points at
    pub fn url(&self) -> &Url {
        &self.url
    }
}
