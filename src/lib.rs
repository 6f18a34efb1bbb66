//! # dataspace-policy
//!
//! Usage-policy compiler for data spaces.
//!
//! A data provider expresses an access-control intent for a dataset ("only
//! these consumers", "only via this connector", "only within this time
//! window", "only N uses") and this crate renders that intent into two
//! independent standardized encodings:
//!
//! - an IDS (International Data Spaces) [`ContractAgreement`] JSON-LD
//!   document, using the `ids`/`idsc` vocabularies,
//! - a W3C ODRL [`Agreement`] JSON-LD document.
//!
//! Both compilers are pure, synchronous functions over the same inputs: a
//! [`Dataset`] and a [`PolicyConfig`]. They share no mutable state, so the
//! two documents can be produced in any order and recomputed from scratch
//! whenever the configuration changes.
//!
//! ```rust
//! use dataspace_policy::{compile_ids, compile_odrl, Dataset, PolicyConfig};
//!
//! let dataset = Dataset::new(1, "Air Quality Readings", "Hourly PM2.5 measurements");
//! let config = PolicyConfig::UsageCount { max_count: 5 };
//!
//! let contract = compile_ids(&dataset, &config);
//! let agreement = compile_odrl(&dataset, &config);
//!
//! println!("{}", contract.to_jsonld()?);
//! println!("{}", agreement.to_jsonld()?);
//! # Ok::<(), dataspace_policy::PolicyError>(())
//! ```
//!
//! ## Known limitation
//!
//! Consumer and connector restrictions encode only the *first* element of
//! their selection list. Additional entries are accepted by the model but
//! silently ignored by both compilers; multi-selection is advisory only.
//! See [`PolicyConfig`] for details.

use thiserror::Error;

pub mod catalog;
pub mod identifier;
pub mod ids;
pub mod model;
pub mod odrl;

pub use catalog::{DatasetCatalog, DatasetRecord};
pub use ids::{compile_ids, ContractAgreement};
pub use model::{Dataset, PolicyConfig};
pub use odrl::{compile_odrl, compile_odrl_at, Agreement};

/// Errors produced around the policy compilers.
///
/// Compilation itself is total and cannot fail; errors arise only when
/// rendering a document to JSON text or resolving a dataset id against the
/// catalog.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// JSON-LD rendering failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Catalog lookup miss.
    #[error("Dataset {0} not found in catalog")]
    DatasetNotFound(u32),
}

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
