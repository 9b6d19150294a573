//! Identifier allocation against a uniqueness check owned by storage.
//!
//! [`solarq_ids::IdentifierService::generate`] may return an identifier that is already in use.
//! The store that persists requirements and quotations is the only party that knows, so
//! allocation is a loop: generate, ask the store to reserve, try again on conflict.

use crate::config::CoreConfig;
use crate::{QuoteError, QuoteResult};
use rand::Rng;
use solarq_ids::{Identifier, IdentifierKind, IdentifierService};
use std::collections::HashSet;

/// The persistence-side uniqueness check.
///
/// Implementations must make `reserve` atomic with respect to other writers: checking and
/// recording the identifier happen in one step.
pub trait IdentifierStore {
    /// Records `id` as taken.
    ///
    /// Returns `Ok(false)` if it was already taken, leaving the store unchanged.
    fn reserve(&mut self, id: &Identifier) -> QuoteResult<bool>;
}

/// Set-backed [`IdentifierStore`] for tests and single-process tooling.
#[derive(Clone, Debug, Default)]
pub struct InMemoryIdentifierStore {
    taken: HashSet<Identifier>,
}

impl InMemoryIdentifierStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

impl IdentifierStore for InMemoryIdentifierStore {
    fn reserve(&mut self, id: &Identifier) -> QuoteResult<bool> {
        Ok(self.taken.insert(id.clone()))
    }
}

/// Allocates an identifier of `kind` that `store` has accepted as unused.
///
/// # Errors
///
/// - [`QuoteError::IdentifierSpaceExhausted`] once `config.max_identifier_attempts()` candidates
///   have all collided
/// - any error returned by the store
pub fn allocate_identifier<S>(
    store: &mut S,
    kind: IdentifierKind,
    config: &CoreConfig,
) -> QuoteResult<Identifier>
where
    S: IdentifierStore + ?Sized,
{
    allocate_identifier_with(store, &mut rand::thread_rng(), kind, config)
}

/// [`allocate_identifier`] drawing candidates from `rng`.
pub fn allocate_identifier_with<S, R>(
    store: &mut S,
    rng: &mut R,
    kind: IdentifierKind,
    config: &CoreConfig,
) -> QuoteResult<Identifier>
where
    S: IdentifierStore + ?Sized,
    R: Rng + ?Sized,
{
    let attempts = config.max_identifier_attempts();

    for attempt in 1..=attempts {
        let candidate = IdentifierService::generate_with(rng, kind);
        if store.reserve(&candidate)? {
            return Ok(candidate);
        }
        tracing::debug!(
            "{} identifier {} already taken (attempt {}/{})",
            kind,
            candidate,
            attempt,
            attempts
        );
    }

    tracing::warn!(
        "gave up allocating a {} identifier after {} attempts",
        kind,
        attempts
    );
    Err(QuoteError::IdentifierSpaceExhausted { kind, attempts })
}
