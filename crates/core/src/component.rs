//! Priced line items of a quotation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solarq_types::{ComponentCategory, NonEmptyText};

/// One priced line item within a quotation.
///
/// A component is plain data; it is owned by its [`crate::Quotation`] and goes away with it.
/// Numeric preconditions (positive quantity, non-negative price) are checked when the quotation
/// is priced by [`crate::QuotationAggregator`], not at construction, so form input can be carried
/// as entered and rejected with a precise [`crate::ValidationError`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationComponent {
    pub category: ComponentCategory,

    pub brand: NonEmptyText,

    /// Model number or free-text specification.
    #[serde(default)]
    pub specification: Option<String>,

    pub quantity: i64,

    pub unit_price: Decimal,

    /// Included cable length in metres. Pricing rejects it on non-cable categories.
    #[serde(default)]
    pub length_metres: Option<Decimal>,

    #[serde(default)]
    pub warranty_years: Option<u32>,
}

impl QuotationComponent {
    pub fn new(
        category: ComponentCategory,
        brand: NonEmptyText,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            category,
            brand,
            specification: None,
            quantity,
            unit_price,
            length_metres: None,
            warranty_years: None,
        }
    }

    pub fn with_specification(mut self, specification: impl Into<String>) -> Self {
        self.specification = Some(specification.into());
        self
    }

    pub fn with_length_metres(mut self, length_metres: Decimal) -> Self {
        self.length_metres = Some(length_metres);
        self
    }

    pub fn with_warranty_years(mut self, years: u32) -> Self {
        self.warranty_years = Some(years);
        self
    }
}
