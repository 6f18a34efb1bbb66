//! Document identifier generation.
//!
//! Every URI embedded in a generated policy document is derived from a
//! single identifier assigned to the dataset when it enters the catalog.
//! The identifier is a version-4 UUID drawn from the operating system's
//! cryptographically secure random source.

use uuid::Uuid;

/// Generate a fresh document identifier.
///
/// Returns the canonical 36-character hyphenated form (8-4-4-4-12) with the
/// version nibble fixed to `4` and the variant nibble in `8`, `9`, `a` or
/// `b`. Each call is an independent draw; uniqueness is statistical and no
/// external state is consulted. This function never fails.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
