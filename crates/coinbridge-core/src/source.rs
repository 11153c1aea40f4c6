use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Exchanges the core knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Bittrex,
    Cryptopia,
}

impl ExchangeId {
    pub const ALL: [Self; 2] = [Self::Bittrex, Self::Cryptopia];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bittrex => "bittrex",
            Self::Cryptopia => "cryptopia",
        }
    }

    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Bittrex => "https://bittrex.com",
            Self::Cryptopia => "https://www.cryptopia.co.nz",
        }
    }

    /// Upper-case segment used in `COINBRIDGE_<EXCHANGE>_*` environment variables.
    pub const fn env_segment(self) -> &'static str {
        match self {
            Self::Bittrex => "BITTREX",
            Self::Cryptopia => "CRYPTOPIA",
        }
    }
}

impl Display for ExchangeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bittrex" => Ok(Self::Bittrex),
            "cryptopia" => Ok(Self::Cryptopia),
            other => Err(ValidationError::InvalidExchange {
                value: other.to_owned(),
            }),
        }
    }
}
