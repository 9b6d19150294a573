//! Vendor quotations.
//!
//! A [`Quotation`] is a vendor's itemised, priced response to a customer requirement. Its total
//! price is derived from the components and the installation charge and is only ever written by
//! [`crate::QuotationAggregator::recompute`]:
//! - mutating components or the installation charge marks the total stale
//! - a stale total reads as `None`, so a drifted value can never be observed
//! - a quotation loaded from storage ignores any stored total and starts stale

use crate::component::QuotationComponent;
use crate::{QuoteError, QuoteResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solarq_ids::{Identifier, IdentifierKind};
use solarq_types::{CapacityClass, NonEmptyText, SystemTopology};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(deserialize_with = "solarq_ids::serde_helpers::quotation")]
    id: Identifier,

    vendor_id: NonEmptyText,

    capacity: CapacityClass,

    topology: SystemTopology,

    #[serde(default)]
    components: Vec<QuotationComponent>,

    #[serde(default)]
    installation_charge: Option<Decimal>,

    #[serde(default)]
    warranty_years: Option<u32>,

    #[serde(default)]
    description: String,

    created_at: DateTime<Utc>,

    updated_at: DateTime<Utc>,

    #[serde(default, skip_deserializing)]
    total_price: Option<Decimal>,
}

impl Quotation {
    /// Creates an empty quotation.
    ///
    /// With no components and no installation charge the total is zero, so a new quotation
    /// starts priced.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidInput`] if `id` is not a quotation identifier.
    pub fn new(
        id: Identifier,
        vendor_id: NonEmptyText,
        capacity: CapacityClass,
        topology: SystemTopology,
    ) -> QuoteResult<Self> {
        if id.kind() != IdentifierKind::Quotation {
            return Err(QuoteError::InvalidInput(format!(
                "quotation requires a quotation identifier, got {} identifier '{}'",
                id.kind(),
                id
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            vendor_id,
            capacity,
            topology,
            components: Vec::new(),
            installation_charge: None,
            warranty_years: None,
            description: String::new(),
            created_at: now,
            updated_at: now,
            total_price: Some(Decimal::ZERO),
        })
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn vendor_id(&self) -> &NonEmptyText {
        &self.vendor_id
    }

    pub fn capacity(&self) -> CapacityClass {
        self.capacity
    }

    pub fn topology(&self) -> SystemTopology {
        self.topology
    }

    pub fn components(&self) -> &[QuotationComponent] {
        &self.components
    }

    pub fn installation_charge(&self) -> Option<Decimal> {
        self.installation_charge
    }

    pub fn warranty_years(&self) -> Option<u32> {
        self.warranty_years
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The authoritative total price, or `None` if pricing inputs changed since the last
    /// [`crate::QuotationAggregator::recompute`].
    pub fn total_price(&self) -> Option<Decimal> {
        self.total_price
    }

    pub fn set_capacity(&mut self, capacity: CapacityClass) {
        self.capacity = capacity;
        self.touch();
    }

    pub fn set_topology(&mut self, topology: SystemTopology) {
        self.topology = topology;
        self.touch();
    }

    pub fn set_warranty_years(&mut self, years: Option<u32>) {
        self.warranty_years = years;
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Appends a line item. The total becomes stale.
    pub fn add_component(&mut self, component: QuotationComponent) {
        self.components.push(component);
        self.invalidate_total();
    }

    /// Replaces the line item at `index` and returns the previous one. The total becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidInput`] if `index` is out of range.
    pub fn replace_component(
        &mut self,
        index: usize,
        component: QuotationComponent,
    ) -> QuoteResult<QuotationComponent> {
        let len = self.components.len();
        let slot = self
            .components
            .get_mut(index)
            .ok_or_else(|| component_index_error(index, len))?;
        let previous = std::mem::replace(slot, component);
        self.invalidate_total();
        Ok(previous)
    }

    /// Removes and returns the line item at `index`. The total becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidInput`] if `index` is out of range.
    pub fn remove_component(&mut self, index: usize) -> QuoteResult<QuotationComponent> {
        if index >= self.components.len() {
            return Err(component_index_error(index, self.components.len()));
        }
        let removed = self.components.remove(index);
        self.invalidate_total();
        Ok(removed)
    }

    /// Sets the flat installation charge (`None` means no charge). The total becomes stale.
    pub fn set_installation_charge(&mut self, charge: Option<Decimal>) {
        self.installation_charge = charge;
        self.invalidate_total();
    }

    pub(crate) fn set_total_price(&mut self, total: Decimal) {
        self.total_price = Some(total);
    }

    fn invalidate_total(&mut self) {
        self.total_price = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn component_index_error(index: usize, len: usize) -> QuoteError {
    QuoteError::InvalidInput(format!(
        "component index {} out of range (quotation has {} components)",
        index, len
    ))
}
