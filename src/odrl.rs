//! ODRL `Agreement` compiler.
//!
//! Renders a dataset and policy configuration into a W3C ODRL (Open Digital
//! Rights Language) `Agreement` JSON-LD document.
//! <https://www.w3.org/TR/odrl-model/>

use crate::model::{Dataset, PolicyConfig};
use crate::{PolicyError, PolicyResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

/// ODRL JSON-LD context document.
pub const ODRL_CONTEXT: &str = "http://www.w3.org/ns/odrl.jsonld";

const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
const POLICY_UID_BASE: &str = "http://example.com/policy/";
const DATA_TARGET_BASE: &str = "http://example.com/ids/data/";

// Placeholder parties; a consumer restriction overrides `assignee`.
const ASSIGNER_PLACEHOLDER: &str = "http://example.com/party/provider";
const ASSIGNEE_PLACEHOLDER: &str = "http://example.com/party/consumer";

/// ODRL `Agreement` JSON-LD document.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Agreement {
    #[serde(rename = "@context")]
    pub context: OdrlContext,

    #[serde(rename = "@type")]
    pub agreement_type: String,

    pub uid: String,

    #[serde(rename = "dc:description")]
    pub description: String,

    #[serde(rename = "dc:issued")]
    pub issued: String,

    pub permission: Vec<OdrlPermission>,
}

impl Agreement {
    /// Render the document as pretty-printed JSON-LD text.
    pub fn to_jsonld(&self) -> PolicyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PolicyError::Serialization(format!("Failed to serialize ODRL agreement: {}", e))
        })
    }
}

/// `@context` entry: the ODRL context document followed by a prefix map.
/// Serializes as a two-element array.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OdrlContext(pub String, pub OdrlPrefixes);

impl Default for OdrlContext {
    fn default() -> Self {
        Self(
            ODRL_CONTEXT.to_string(),
            OdrlPrefixes {
                dc: DC_NAMESPACE.to_string(),
                ids: crate::ids::IDS_NAMESPACE.to_string(),
                idsc: crate::ids::IDSC_NAMESPACE.to_string(),
            },
        )
    }
}

/// Prefix map accompanying the ODRL context.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OdrlPrefixes {
    pub dc: String,
    pub ids: String,
    pub idsc: String,
}

/// Single permission granted by the agreement.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OdrlPermission {
    pub target: String,
    pub assigner: String,
    pub assignee: String,
    pub action: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Vec<OdrlConstraint>>,
}

/// (leftOperand, operator, rightOperand) triple restricting the permission.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OdrlConstraint {
    pub left_operand: String,
    pub operator: String,
    pub right_operand: OdrlOperand,
}

/// Right operand of an ODRL constraint.
///
/// Connector ids are plain strings, time bounds are typed literals and
/// usage counts are JSON numbers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum OdrlOperand {
    Literal(String),
    Typed {
        #[serde(rename = "@value")]
        value: String,
        #[serde(rename = "@type")]
        datatype: String,
    },
    Count(u64),
}

/// Compile a dataset and policy configuration into an ODRL `Agreement`,
/// stamping `dc:issued` with the current wall-clock time.
///
/// Note that `dc:issued` makes the output non-deterministic across calls;
/// use [`compile_odrl_at`] when reproducible documents are needed.
pub fn compile_odrl(dataset: &Dataset, config: &PolicyConfig) -> Agreement {
    compile_odrl_at(dataset, config, Utc::now())
}

/// Compile a dataset and policy configuration into an ODRL `Agreement` with
/// an explicit issuance timestamp.
///
/// Total function: empty or absent parameters yield the unconstrained base
/// document for that dimension. Only the first entry of a consumer or
/// connector list is encoded.
pub fn compile_odrl_at(
    dataset: &Dataset,
    config: &PolicyConfig,
    issued: DateTime<Utc>,
) -> Agreement {
    debug!(
        dataset = %dataset.uuid(),
        variant = config.kind(),
        "compiling ODRL agreement"
    );

    let mut assignee = ASSIGNEE_PLACEHOLDER.to_string();
    let mut constraint = None;

    match config {
        PolicyConfig::RestrictConsumer { consumers } => {
            if let Some(first) = consumers.first() {
                assignee = first.clone();
            }
        }
        PolicyConfig::RestrictConnector { connectors } => {
            if let Some(first) = connectors.first() {
                constraint = Some(vec![OdrlConstraint {
                    left_operand: "connector".to_string(),
                    operator: "eq".to_string(),
                    right_operand: OdrlOperand::Literal(first.clone()),
                }]);
            }
        }
        PolicyConfig::TimeWindow { start, end } => {
            if !start.is_empty() && !end.is_empty() {
                constraint = Some(vec![
                    OdrlConstraint {
                        left_operand: "dateTime".to_string(),
                        operator: "gteq".to_string(),
                        right_operand: OdrlOperand::Typed {
                            value: start.clone(),
                            datatype: "xsd:dateTime".to_string(),
                        },
                    },
                    OdrlConstraint {
                        left_operand: "dateTime".to_string(),
                        operator: "lteq".to_string(),
                        right_operand: OdrlOperand::Typed {
                            value: end.clone(),
                            datatype: "xsd:dateTime".to_string(),
                        },
                    },
                ]);
            }
        }
        PolicyConfig::UsageCount { max_count } => {
            constraint = Some(vec![OdrlConstraint {
                left_operand: "count".to_string(),
                operator: "lteq".to_string(),
                right_operand: OdrlOperand::Count(*max_count),
            }]);
        }
    }

    Agreement {
        context: OdrlContext::default(),
        agreement_type: "Agreement".to_string(),
        uid: format!("{}{}", POLICY_UID_BASE, dataset.uuid()),
        description: format!("Agreement governing the usage of dataset {}", dataset.name),
        issued: issued.to_rfc3339_opts(SecondsFormat::Secs, true),
        permission: vec![OdrlPermission {
            target: format!("{}{}", DATA_TARGET_BASE, dataset.uuid()),
            assigner: ASSIGNER_PLACEHOLDER.to_string(),
            assignee,
            action: "use".to_string(),
            constraint,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dataset() -> Dataset {
        Dataset::with_uuid(
            7,
            "Air Quality Readings",
            "Hourly PM2.5 measurements",
            "123e4567-e89b-42d3-a456-426614174000",
        )
    }

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_consumer_list_yields_base_document() {
        let doc = compile_odrl_at(&dataset(), &PolicyConfig::default(), issued());

        assert_eq!(doc.agreement_type, "Agreement");
        assert_eq!(
            doc.uid,
            "http://example.com/policy/123e4567-e89b-42d3-a456-426614174000"
        );
        assert_eq!(doc.permission.len(), 1);
        assert_eq!(doc.permission[0].assignee, ASSIGNEE_PLACEHOLDER);
        assert_eq!(doc.permission[0].action, "use");
        assert_eq!(
            doc.permission[0].target,
            "http://example.com/ids/data/123e4567-e89b-42d3-a456-426614174000"
        );
        assert!(doc.permission[0].constraint.is_none());
    }

    #[test]
    fn description_mentions_dataset_name() {
        let doc = compile_odrl_at(&dataset(), &PolicyConfig::default(), issued());
        assert!(doc.description.contains("Air Quality Readings"));
    }

    #[test]
    fn only_first_consumer_becomes_assignee() {
        let config = PolicyConfig::RestrictConsumer {
            consumers: vec!["c1".to_string(), "c2".to_string()],
        };
        let doc = compile_odrl_at(&dataset(), &config, issued());

        assert_eq!(doc.permission[0].assignee, "c1");
        let json = doc.to_jsonld().unwrap();
        assert!(!json.contains("c2"));
    }

    #[test]
    fn connector_restriction_uses_plain_string_operand() {
        let config = PolicyConfig::RestrictConnector {
            connectors: vec!["https://connector.example.org".to_string()],
        };
        let doc = compile_odrl_at(&dataset(), &config, issued());

        let constraints = doc.permission[0].constraint.as_ref().unwrap();
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].left_operand, "connector");
        assert_eq!(constraints[0].operator, "eq");
        assert_eq!(
            constraints[0].right_operand,
            OdrlOperand::Literal("https://connector.example.org".to_string())
        );
    }

    #[test]
    fn time_window_emits_gteq_then_lteq_with_datetime_type() {
        let config = PolicyConfig::TimeWindow {
            start: "2024-01-01T00:00".to_string(),
            end: "2024-06-01T00:00".to_string(),
        };
        let doc = compile_odrl_at(&dataset(), &config, issued());

        let constraints = doc.permission[0].constraint.as_ref().unwrap();
        assert_eq!(constraints.len(), 2);

        assert_eq!(constraints[0].left_operand, "dateTime");
        assert_eq!(constraints[0].operator, "gteq");
        assert_eq!(
            constraints[0].right_operand,
            OdrlOperand::Typed {
                value: "2024-01-01T00:00".to_string(),
                datatype: "xsd:dateTime".to_string(),
            }
        );

        assert_eq!(constraints[1].operator, "lteq");
        assert_eq!(
            constraints[1].right_operand,
            OdrlOperand::Typed {
                value: "2024-06-01T00:00".to_string(),
                datatype: "xsd:dateTime".to_string(),
            }
        );
    }

    #[test]
    fn usage_count_is_a_json_number() {
        let config = PolicyConfig::UsageCount { max_count: 5 };
        let doc = compile_odrl_at(&dataset(), &config, issued());

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["permission"][0]["constraint"][0]["rightOperand"],
            serde_json::json!(5)
        );
        assert_eq!(
            value["permission"][0]["constraint"][0]["leftOperand"],
            serde_json::json!("count")
        );
        assert_eq!(
            value["permission"][0]["constraint"][0]["operator"],
            serde_json::json!("lteq")
        );
    }

    #[test]
    fn context_is_odrl_document_plus_prefix_map() {
        let doc = compile_odrl_at(&dataset(), &PolicyConfig::default(), issued());
        let value = serde_json::to_value(&doc).unwrap();

        let context = value["@context"].as_array().unwrap();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0], serde_json::json!(ODRL_CONTEXT));
        assert_eq!(context[1]["ids"], serde_json::json!(crate::ids::IDS_NAMESPACE));
        assert_eq!(context[1]["idsc"], serde_json::json!(crate::ids::IDSC_NAMESPACE));
        assert_eq!(context[1]["dc"], serde_json::json!(DC_NAMESPACE));
    }

    #[test]
    fn explicit_issuance_makes_output_deterministic() {
        let config = PolicyConfig::UsageCount { max_count: 3 };
        let first = compile_odrl_at(&dataset(), &config, issued());
        let second = compile_odrl_at(&dataset(), &config, issued());

        assert_eq!(first, second);
        assert_eq!(first.to_jsonld().unwrap(), second.to_jsonld().unwrap());
        assert_eq!(first.issued, "2024-03-15T12:00:00Z");
    }

    #[test]
    fn wall_clock_issuance_is_valid_rfc3339() {
        let doc = compile_odrl(&dataset(), &PolicyConfig::default());
        assert!(DateTime::parse_from_rfc3339(&doc.issued).is_ok());
    }

    #[test]
    fn missing_time_bound_yields_base_document() {
        let config = PolicyConfig::TimeWindow {
            start: String::new(),
            end: "2024-06-01T00:00".to_string(),
        };
        let doc = compile_odrl_at(&dataset(), &config, issued());
        assert!(doc.permission[0].constraint.is_none());
    }
}
