use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_CURRENCY_LEN: usize = 16;

/// Normalized currency ticker, e.g. `BTC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalize a ticker to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCurrency);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_CURRENCY_LEN {
            return Err(ValidationError::CurrencyTooLong {
                len,
                max: MAX_CURRENCY_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !(ch.is_ascii_alphanumeric() || ch == '$') {
                return Err(ValidationError::CurrencyInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

/// A currency addressed either by ticker or by the exchange's numeric id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyRef {
    Code(CurrencyCode),
    Id(u64),
}

impl CurrencyRef {
    pub fn code(input: &str) -> Result<Self, ValidationError> {
        CurrencyCode::parse(input).map(Self::Code)
    }
}

impl From<CurrencyCode> for CurrencyRef {
    fn from(value: CurrencyCode) -> Self {
        Self::Code(value)
    }
}

/// Tradable instrument: `currency` priced in `base`.
///
/// The canonical label is `BASE-CURRENCY` (`BTC-LTC` trades LTC against BTC). Exchanges
/// that use another native format translate through [`Exchange::market_label`].
///
/// [`Exchange::market_label`]: crate::Exchange::market_label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradePair {
    pub id: Option<u64>,
    pub base: CurrencyCode,
    pub currency: CurrencyCode,
}

impl TradePair {
    pub fn new(base: &str, currency: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            base: CurrencyCode::parse(base)?,
            currency: CurrencyCode::parse(currency)?,
        })
    }

    /// Parses a canonical `BASE-CURRENCY` label.
    pub fn parse_label(label: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidPairLabel {
            value: label.to_owned(),
        };
        let (base, currency) = label.trim().split_once('-').ok_or_else(invalid)?;
        Self::new(base, currency).map_err(|_| invalid())
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.base, self.currency)
    }
}

impl Display for TradePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.base, self.currency)
    }
}
