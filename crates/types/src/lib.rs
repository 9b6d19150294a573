//! Shared validated primitives for the solar quotation marketplace.
//!
//! - [`NonEmptyText`] for required free-text fields (brands, vendor references, names).
//! - The fixed option sets offered by the requirement and quotation forms
//!   ([`CapacityClass`], [`SystemTopology`], [`ComponentCategory`], ...).

mod options;
mod text;

pub use options::{
    CapacityClass, ComponentCategory, OptionError, PropertyType, RoofType, SystemTopology,
    Timeline,
};
pub use text::{NonEmptyText, TextError};
