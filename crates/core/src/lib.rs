//! # Solarq Core
//!
//! Core business logic for the solar quotation marketplace.
//!
//! This crate contains the pure domain operations:
//! - Customer requirements and vendor quotations with their priced line items
//! - Quotation pricing aggregation ([`QuotationAggregator`]): line totals, grand totals and the
//!   single sanctioned way to refresh a quotation's total price
//! - Identifier allocation against a persistence-side uniqueness check
//!
//! **No transport or storage concerns**: forms, HTTP handlers and database access live in the
//! surrounding application. Identifier generation itself lives in `solarq-ids`.

pub mod aggregator;
pub mod allocation;
pub mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod quotation;
pub mod requirement;

pub use aggregator::QuotationAggregator;
pub use allocation::{
    allocate_identifier, allocate_identifier_with, IdentifierStore, InMemoryIdentifierStore,
};
pub use component::QuotationComponent;
pub use config::CoreConfig;
pub use error::{QuoteError, QuoteResult, ValidationError};
pub use quotation::Quotation;
pub use requirement::{Address, BudgetRange, ContactInfo, CustomerRequirement, RequirementDetails};

pub use rust_decimal::Decimal;
pub use solarq_ids::{Identifier, IdentifierKind, IdentifierService};
pub use solarq_types::{
    CapacityClass, ComponentCategory, NonEmptyText, PropertyType, RoofType, SystemTopology,
    Timeline,
};
