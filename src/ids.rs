//! IDS `ContractAgreement` compiler.
//!
//! Renders a dataset and policy configuration into an IDS (International
//! Data Spaces) `ContractAgreement` JSON-LD document using the `ids` core
//! and `idsc` code vocabularies.
//! <https://w3id.org/idsa/core/>

use crate::model::{Dataset, PolicyConfig};
use crate::{PolicyError, PolicyResult};
use serde::Serialize;
use tracing::debug;

/// IDS core vocabulary namespace.
pub const IDS_NAMESPACE: &str = "https://w3id.org/idsa/core/";
/// IDS code vocabulary namespace.
pub const IDSC_NAMESPACE: &str = "https://w3id.org/idsa/code/";

const CONTRACT_ID_BASE: &str = "https://w3id.org/idsa/autogen/contract/";
const TARGET_BASE: &str = "http://example.com/ids/target/";

// Placeholder parties; a consumer restriction overrides `ids:consumer`.
const PROFILE_PLACEHOLDER: &str = "http://example.com/ids-profile";
const PROVIDER_PLACEHOLDER: &str = "http://example.com/party/provider";
const CONSUMER_PLACEHOLDER: &str = "http://example.com/party/consumer";

/// IDS `ContractAgreement` JSON-LD document.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContractAgreement {
    #[serde(rename = "@context")]
    pub context: IdsContext,

    #[serde(rename = "@type")]
    pub agreement_type: String,

    #[serde(rename = "@id")]
    pub id: String,

    pub profile: String,

    #[serde(rename = "ids:provider")]
    pub provider: String,

    #[serde(rename = "ids:consumer")]
    pub consumer: String,

    #[serde(rename = "ids:permission")]
    pub permission: Vec<IdsPermission>,
}

impl ContractAgreement {
    /// Render the document as pretty-printed JSON-LD text.
    pub fn to_jsonld(&self) -> PolicyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            PolicyError::Serialization(format!("Failed to serialize contract agreement: {}", e))
        })
    }
}

/// Fixed prefix map for the `@context` entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdsContext {
    pub ids: String,
    pub idsc: String,
}

impl Default for IdsContext {
    fn default() -> Self {
        Self {
            ids: IDS_NAMESPACE.to_string(),
            idsc: IDSC_NAMESPACE.to_string(),
        }
    }
}

/// Single permission granted by the agreement.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdsPermission {
    #[serde(rename = "ids:target")]
    pub target: IdRef,

    #[serde(rename = "ids:action")]
    pub action: Vec<IdRef>,

    #[serde(rename = "ids:constraint", skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Vec<IdsConstraint>>,
}

/// JSON-LD node reference, `{"@id": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl IdRef {
    fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// (leftOperand, operator, rightOperand) triple restricting the permission.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IdsConstraint {
    #[serde(rename = "@type")]
    pub constraint_type: String,

    #[serde(rename = "ids:leftOperand")]
    pub left_operand: IdRef,

    #[serde(rename = "ids:operator")]
    pub operator: IdRef,

    #[serde(rename = "ids:rightOperand")]
    pub right_operand: Vec<TypedLiteral>,
}

impl IdsConstraint {
    fn new(left_operand: &str, operator: &str, value: &str, datatype: &str) -> Self {
        Self {
            constraint_type: "ids:Constraint".to_string(),
            left_operand: IdRef::new(left_operand),
            operator: IdRef::new(operator),
            right_operand: vec![TypedLiteral {
                value: value.to_string(),
                datatype: datatype.to_string(),
            }],
        }
    }
}

/// JSON-LD typed literal, `{"@value": ..., "@type": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TypedLiteral {
    #[serde(rename = "@value")]
    pub value: String,

    #[serde(rename = "@type")]
    pub datatype: String,
}

/// Compile a dataset and policy configuration into an IDS
/// `ContractAgreement`.
///
/// Total function: empty or absent parameters yield the unconstrained base
/// document for that dimension. Only the first entry of a consumer or
/// connector list is encoded.
pub fn compile_ids(dataset: &Dataset, config: &PolicyConfig) -> ContractAgreement {
    debug!(
        dataset = %dataset.uuid(),
        variant = config.kind(),
        "compiling IDS contract agreement"
    );

    let mut consumer = CONSUMER_PLACEHOLDER.to_string();
    let mut constraint = None;

    match config {
        PolicyConfig::RestrictConsumer { consumers } => {
            if let Some(first) = consumers.first() {
                consumer = first.clone();
            }
        }
        PolicyConfig::RestrictConnector { connectors } => {
            if let Some(first) = connectors.first() {
                constraint = Some(vec![IdsConstraint::new(
                    "idsc:CONNECTOR",
                    "idsc:EQUALS",
                    first,
                    "xsd:string",
                )]);
            }
        }
        PolicyConfig::TimeWindow { start, end } => {
            if !start.is_empty() && !end.is_empty() {
                constraint = Some(vec![
                    IdsConstraint::new(
                        "idsc:POLICY_EVALUATION_TIME",
                        "idsc:AFTER",
                        start,
                        "xsd:dateTimeStamp",
                    ),
                    IdsConstraint::new(
                        "idsc:POLICY_EVALUATION_TIME",
                        "idsc:BEFORE",
                        end,
                        "xsd:dateTimeStamp",
                    ),
                ]);
            }
        }
        PolicyConfig::UsageCount { max_count } => {
            constraint = Some(vec![IdsConstraint::new(
                "idsc:COUNT",
                "idsc:LTEQ",
                &max_count.to_string(),
                "xsd:double",
            )]);
        }
    }

    ContractAgreement {
        context: IdsContext::default(),
        agreement_type: "ids:ContractAgreement".to_string(),
        id: format!("{}{}", CONTRACT_ID_BASE, dataset.uuid()),
        profile: PROFILE_PLACEHOLDER.to_string(),
        provider: PROVIDER_PLACEHOLDER.to_string(),
        consumer,
        permission: vec![IdsPermission {
            target: IdRef::new(format!("{}{}", TARGET_BASE, dataset.uuid())),
            action: vec![IdRef::new("idsc:USE")],
            constraint,
        }],
    }
}
