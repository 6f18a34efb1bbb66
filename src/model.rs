//! Policy model shared by both compilers.

use crate::identifier;
use serde::{Deserialize, Serialize};

/// A dataset offered by the provider.
///
/// `id`, `name` and `description` come verbatim from the provider's
/// catalog. The `uuid` is assigned once at construction and is the stable
/// suffix of every URI that the compilers embed for this dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dataset {
    /// Provider-assigned catalog identifier.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Display description.
    pub description: String,

    /// Document identifier, immutable once assigned.
    uuid: String,
}

impl Dataset {
    /// Create a dataset, assigning it a fresh document identifier.
    pub fn new(id: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            uuid: identifier::generate(),
        }
    }

    /// Create a dataset with a caller-supplied identifier.
    ///
    /// Intended for tests and for re-hydrating datasets whose identifier
    /// was assigned earlier; no shape check is performed on `uuid`.
    pub fn with_uuid(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        uuid: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            uuid: uuid.into(),
        }
    }

    /// The document identifier assigned to this dataset.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// The policy intent chosen for a dataset.
///
/// A configuration carries exactly one active variant; the compilers branch
/// solely on it. Parameter values pass through to the documents verbatim,
/// without validation: time bounds are not ordered against each other and a
/// usage count of zero is encoded as-is (coercing bad raw input is the form
/// layer's job).
///
/// Known limitation: `RestrictConsumer` and `RestrictConnector` encode only
/// the first element of their list. Remaining entries are accepted but not
/// rendered into either document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PolicyConfig {
    /// Grant usage to a specific consumer.
    RestrictConsumer { consumers: Vec<String> },

    /// Permit access only through a specific connector.
    RestrictConnector { connectors: Vec<String> },

    /// Permit usage only between two points in time. Bounds are opaque
    /// timestamp strings; both must be non-empty for a constraint to be
    /// emitted.
    TimeWindow { start: String, end: String },

    /// Limit the number of usages.
    UsageCount { max_count: u64 },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::RestrictConsumer {
            consumers: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Short name of the active variant, used for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RestrictConsumer { .. } => "restrict-consumer",
            Self::RestrictConnector { .. } => "restrict-connector",
            Self::TimeWindow { .. } => "time-window",
            Self::UsageCount { .. } => "usage-count",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_uuid_is_stable() {
        let dataset = Dataset::new(1, "Test", "A test dataset");
        let first = dataset.uuid().to_string();
        assert_eq!(dataset.uuid(), first);
        assert_eq!(dataset.uuid().len(), 36);
    }

    #[test]
    fn datasets_get_distinct_uuids() {
        let a = Dataset::new(1, "A", "first");
        let b = Dataset::new(2, "B", "second");
        assert_ne!(a.uuid(), b.uuid());
    }

    #[test]
    fn default_config_is_empty_consumer_restriction() {
        match PolicyConfig::default() {
            PolicyConfig::RestrictConsumer { consumers } => assert!(consumers.is_empty()),
            other => panic!("unexpected default variant: {:?}", other),
        }
    }

    #[test]
    fn kind_names() {
        assert_eq!(PolicyConfig::default().kind(), "restrict-consumer");
        assert_eq!(
            PolicyConfig::UsageCount { max_count: 1 }.kind(),
            "usage-count"
        );
    }
}
