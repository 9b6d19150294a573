//! Internal implementation of identifier generation and validation.

use crate::{IdError, IdResult};
use rand::Rng;
use std::{fmt, str::FromStr};

/// Upper bound of the zero-padded sequence block.
const SEQUENCE_MAX: u32 = 99_999;

/// Upper bound of the zero-padded random block.
const RANDOM_MAX: u32 = 9_999;

/// `PREFIX` (4) + `/` + 5 digits + `/` + letter + 4 digits.
const CANONICAL_LEN: usize = 16;

/// The entity kind an identifier labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IdentifierKind {
    /// A customer requirement (`REQM/...`).
    Requirement,
    /// A vendor quotation (`QUOT/...`).
    Quotation,
}

impl IdentifierKind {
    /// Every kind, in a stable order.
    pub const ALL: [IdentifierKind; 2] = [IdentifierKind::Requirement, IdentifierKind::Quotation];

    /// Returns the fixed four-letter prefix for this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            IdentifierKind::Requirement => "REQM",
            IdentifierKind::Quotation => "QUOT",
        }
    }

    /// Returns the lowercase name used in configuration and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierKind::Requirement => "requirement",
            IdentifierKind::Quotation => "quotation",
        }
    }

    /// Detects the kind of a canonical identifier.
    ///
    /// Returns `None` unless `text` is a valid identifier of exactly one kind.
    pub fn of(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| IdentifierService::validate(text, *kind))
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = IdError;

    /// Accepts the kind name (`requirement`, `quotation`, any case) or the exact prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| trimmed.eq_ignore_ascii_case(kind.as_str()) || trimmed == kind.prefix())
            .ok_or_else(|| {
                IdError::InvalidInput(format!(
                    "identifier kind must be 'requirement' or 'quotation', got: '{}'",
                    s
                ))
            })
    }
}

/// A requirement or quotation identifier in canonical form.
///
/// Once constructed the contained text is guaranteed to match the format of its kind, so code
/// holding an `Identifier` never needs to re-validate it.
///
/// # Construction
/// - [`IdentifierService::generate`] allocates a fresh identifier for a new entity.
/// - [`Identifier::parse`] / [`Identifier::parse_as`] validate an externally supplied value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: IdentifierKind,
    text: String,
}

impl Identifier {
    /// Parses an identifier of either kind, detecting the kind from its prefix.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not a canonical identifier.
    pub fn parse(input: &str) -> IdResult<Self> {
        match IdentifierKind::of(input) {
            Some(kind) => Ok(Self {
                kind,
                text: input.to_owned(),
            }),
            None => Err(IdError::InvalidInput(format!(
                "identifier must look like QUOT/00001/A0001 or REQM/00001/A0001, got: '{}'",
                input
            ))),
        }
    }

    /// Parses an identifier that must be of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is malformed or labels another kind.
    pub fn parse_as(input: &str, kind: IdentifierKind) -> IdResult<Self> {
        if IdentifierService::validate(input, kind) {
            return Ok(Self {
                kind,
                text: input.to_owned(),
            });
        }
        Err(IdError::InvalidInput(format!(
            "expected a {} identifier ({}/NNNNN/LNNNN), got: '{}'",
            kind,
            kind.prefix(),
            input
        )))
    }

    /// Returns the kind this identifier labels.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Returns the canonical text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Identifier {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Identifier::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Stateless identifier generation and validation.
///
/// Nothing here consults or records previously issued identifiers. Callers that need
/// uniqueness must check at the point of storage and call [`IdentifierService::generate`]
/// again on conflict; every call is independent, so retrying is always safe.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentifierService;

impl IdentifierService {
    /// Generates a new identifier of `kind` using the thread-local RNG.
    pub fn generate(kind: IdentifierKind) -> Identifier {
        Self::generate_with(&mut rand::thread_rng(), kind)
    }

    /// Generates a new identifier of `kind` drawing from `rng`.
    ///
    /// The sequence block is uniform over `1..=99999`, the letter uniform over `A..=Z` and the
    /// random block uniform over `1..=9999`. Each draw is independent.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, kind: IdentifierKind) -> Identifier {
        let sequence = rng.gen_range(1..=SEQUENCE_MAX);
        let letter = char::from(rng.gen_range(b'A'..=b'Z'));
        let random = rng.gen_range(1..=RANDOM_MAX);

        Identifier {
            kind,
            text: format!("{}/{:05}/{}{:04}", kind.prefix(), sequence, letter, random),
        }
    }

    /// Returns true if `text` is exactly a canonical identifier of `kind`.
    ///
    /// This is a purely syntactic check:
    /// - the prefix matches `kind`
    /// - `/` separators sit at fixed positions
    /// - the sequence block is 5 digits in `00001..=99999`
    /// - the letter is uppercase ASCII
    /// - the random block is 4 digits in `0001..=9999`
    ///
    /// No surrounding whitespace or extra characters are tolerated.
    pub fn validate(text: &str, kind: IdentifierKind) -> bool {
        let bytes = text.as_bytes();
        if bytes.len() != CANONICAL_LEN {
            return false;
        }

        let (prefix, rest) = bytes.split_at(4);
        prefix == kind.prefix().as_bytes()
            && rest[0] == b'/'
            && is_nonzero_digit_block(&rest[1..6])
            && rest[6] == b'/'
            && rest[7].is_ascii_uppercase()
            && is_nonzero_digit_block(&rest[8..12])
    }
}

fn is_nonzero_digit_block(block: &[u8]) -> bool {
    block.iter().all(u8::is_ascii_digit) && block.iter().any(|b| *b != b'0')
}
