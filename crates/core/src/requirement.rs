//! Customer requirements.
//!
//! A requirement is what a customer asks vendors to quote for. It carries no derived numbers;
//! field-level form checks (phone formats, postal codes, ...) happen before a requirement is
//! built, so this module only guards the identifier kind and the budget range shape.

use crate::{QuoteError, QuoteResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solarq_ids::{Identifier, IdentifierKind};
use solarq_types::{CapacityClass, NonEmptyText, PropertyType, RoofType, SystemTopology, Timeline};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: NonEmptyText,
    pub phone: NonEmptyText,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line: NonEmptyText,
    pub city: NonEmptyText,
    pub state: NonEmptyText,
    pub postal_code: NonEmptyText,
}

/// Budget the customer is willing to spend. An open upper bound means "no fixed ceiling".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBudgetRange")]
pub struct BudgetRange {
    min: Decimal,
    max: Option<Decimal>,
}

#[derive(Deserialize)]
struct RawBudgetRange {
    min: Decimal,
    #[serde(default)]
    max: Option<Decimal>,
}

impl TryFrom<RawBudgetRange> for BudgetRange {
    type Error = QuoteError;

    fn try_from(raw: RawBudgetRange) -> Result<Self, Self::Error> {
        BudgetRange::new(raw.min, raw.max)
    }
}

impl BudgetRange {
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidInput`] if `min` is negative or `max` is below `min`.
    pub fn new(min: Decimal, max: Option<Decimal>) -> QuoteResult<Self> {
        if min < Decimal::ZERO {
            return Err(QuoteError::InvalidInput(format!(
                "budget minimum cannot be negative, got {}",
                min
            )));
        }
        if let Some(max) = max {
            if max < min {
                return Err(QuoteError::InvalidInput(format!(
                    "budget maximum {} is below minimum {}",
                    max, min
                )));
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Option<Decimal> {
        self.max
    }
}

/// The editable part of a requirement, as gathered by the requirement form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementDetails {
    pub contact: ContactInfo,
    pub capacity: CapacityClass,
    pub topology: SystemTopology,
    pub property_type: PropertyType,
    pub roof_type: RoofType,
    pub address: Address,
    #[serde(default)]
    pub monthly_bill: Option<Decimal>,
    pub timeline: Timeline,
    pub budget: BudgetRange,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A customer's declared solar-installation need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequirement {
    #[serde(deserialize_with = "solarq_ids::serde_helpers::requirement")]
    id: Identifier,
    #[serde(flatten)]
    details: RequirementDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRequirement {
    /// # Errors
    ///
    /// Returns [`QuoteError::InvalidInput`] if `id` is not a requirement identifier.
    pub fn new(id: Identifier, details: RequirementDetails) -> QuoteResult<Self> {
        if id.kind() != IdentifierKind::Requirement {
            return Err(QuoteError::InvalidInput(format!(
                "requirement requires a requirement identifier, got {} identifier '{}'",
                id.kind(),
                id
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            details,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn details(&self) -> &RequirementDetails {
        &self.details
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the editable details. The identifier and creation time never change.
    pub fn update_details(&mut self, details: RequirementDetails) {
        self.details = details;
        self.updated_at = Utc::now();
    }
}
