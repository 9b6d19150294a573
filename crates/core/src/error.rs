use rust_decimal::Decimal;
use solarq_ids::{IdError, IdentifierKind};
use solarq_types::{ComponentCategory, OptionError, TextError};

/// Malformed numeric input passed to the pricing operations.
///
/// Always a caller contract violation; nothing here is environmental.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: i64 },
    #[error("unit price cannot be negative, got {unit_price}")]
    NegativeUnitPrice { unit_price: Decimal },
    #[error("installation charge cannot be negative, got {charge}")]
    NegativeInstallationCharge { charge: Decimal },
    #[error("cable length cannot be negative, got {length}")]
    NegativeLength { length: Decimal },
    #[error("length given for {category}, which is not a cable")]
    LengthOnNonCable { category: ComponentCategory },
    #[error("amount overflowed while computing {context}")]
    Overflow { context: &'static str },
    #[error("{context} cannot be represented without rounding")]
    PrecisionLoss { context: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid identifier: {0}")]
    Identifier(#[from] IdError),
    #[error("invalid text: {0}")]
    Text(#[from] TextError),
    #[error("invalid option: {0}")]
    UnknownOption(#[from] OptionError),
    #[error("no free {kind} identifier after {attempts} attempts")]
    IdentifierSpaceExhausted {
        kind: IdentifierKind,
        attempts: u32,
    },
    #[error("identifier store error: {0}")]
    Store(String),
}

pub type QuoteResult<T> = std::result::Result<T, QuoteError>;
