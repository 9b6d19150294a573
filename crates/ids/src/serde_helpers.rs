//! `deserialize_with` helpers for fields that must hold one identifier kind.
//!
//! ```ignore
//! #[derive(serde::Deserialize)]
//! struct Stored {
//!     #[serde(deserialize_with = "solarq_ids::serde_helpers::quotation")]
//!     id: solarq_ids::Identifier,
//! }
//! ```

use crate::{Identifier, IdentifierKind};
use serde::{Deserialize, Deserializer};

fn of_kind<'de, D>(deserializer: D, kind: IdentifierKind) -> Result<Identifier, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Identifier::parse_as(&s, kind).map_err(serde::de::Error::custom)
}

/// Deserialises an identifier that must be a quotation identifier.
pub fn quotation<'de, D>(deserializer: D) -> Result<Identifier, D::Error>
where
    D: Deserializer<'de>,
{
    of_kind(deserializer, IdentifierKind::Quotation)
}

/// Deserialises an identifier that must be a requirement identifier.
pub fn requirement<'de, D>(deserializer: D) -> Result<Identifier, D::Error>
where
    D: Deserializer<'de>,
{
    of_kind(deserializer, IdentifierKind::Requirement)
}
