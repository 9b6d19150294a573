//! Requirement and quotation identifiers.
//!
//! Every customer requirement and vendor quotation carries a short, human-readable identifier
//! that is assigned once at creation time and never changes afterwards.
//!
//! ## Canonical form
//! `<PREFIX>/<NNNNN>/<L><MMMM>`
//!
//! - `PREFIX`: `REQM` for requirements, `QUOT` for quotations
//! - `NNNNN`: sequence block, zero padded, `00001..=99999`
//! - `L`: one uppercase ASCII letter `A..=Z`
//! - `MMMM`: random block, zero padded, `0001..=9999`
//!
//! Example: `QUOT/04821/B0193`
//!
//! ## Uniqueness
//! Identifiers are drawn uniformly at random from the format's space. The generator keeps no
//! state between calls, so two calls may return the same value. Uniqueness is enforced where the
//! identifier is stored: the persistence layer rejects a duplicate and the caller generates
//! again.
//!
//! This crate provides:
//! - [`IdentifierKind`], the entity kind an identifier labels.
//! - [`Identifier`], a wrapper that *guarantees* the canonical format once constructed.
//! - [`IdentifierService`], the stateless `generate`/`validate` entry points.

mod service;

#[cfg(feature = "serde")]
pub mod serde_helpers;

pub use service::{Identifier, IdentifierKind, IdentifierService};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
