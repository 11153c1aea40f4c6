use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::exchange::Operation;
use crate::ExchangeId;

/// Validation errors raised while constructing requests, credentials and domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("currency label cannot be empty")]
    EmptyCurrency,
    #[error("currency label length {len} exceeds max {max}")]
    CurrencyTooLong { len: usize, max: usize },
    #[error("currency label contains invalid character '{ch}' at index {index}")]
    CurrencyInvalidChar { ch: char, index: usize },

    #[error("trade pair label '{value}' must look like BASE-CURRENCY")]
    InvalidPairLabel { value: String },

    #[error("invalid exchange '{value}', expected one of bittrex, cryptopia")]
    InvalidExchange { value: String },

    #[error("api key cannot be empty")]
    EmptyApiKey,
    #[error("api secret cannot be empty")]
    EmptyApiSecret,

    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("exchange timestamp is not ISO-8601: '{value}'")]
    InvalidTimestamp { value: String },
}

/// Failure classification for exchange calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeErrorKind {
    /// A private call was attempted without usable credentials.
    Configuration,
    /// The transport could not complete the round-trip.
    Transport,
    /// The (translated) body did not parse into the canonical type.
    ShapeMismatch,
    /// The exchange adapter does not implement the requested operation.
    UnsupportedOperation,
    InvalidRequest,
}

/// Structured error returned by adapters and the call dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeError {
    kind: ExchangeErrorKind,
    message: String,
}

impl ExchangeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Configuration,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::ShapeMismatch,
            message: message.into(),
        }
    }

    pub fn unsupported_operation(exchange: ExchangeId, operation: Operation) -> Self {
        Self {
            kind: ExchangeErrorKind::UnsupportedOperation,
            message: format!("operation '{operation}' is not supported by {exchange}"),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ExchangeErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ExchangeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Only transport failures are worth retrying; the core never retries on its own.
    pub const fn retryable(&self) -> bool {
        matches!(self.kind, ExchangeErrorKind::Transport)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ExchangeErrorKind::Configuration => "exchange.configuration",
            ExchangeErrorKind::Transport => "exchange.transport",
            ExchangeErrorKind::ShapeMismatch => "exchange.shape_mismatch",
            ExchangeErrorKind::UnsupportedOperation => "exchange.unsupported_operation",
            ExchangeErrorKind::InvalidRequest => "exchange.invalid_request",
        }
    }
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ExchangeError {}

impl From<ValidationError> for ExchangeError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_operation_names_exchange_and_operation() {
        let error = ExchangeError::unsupported_operation(ExchangeId::Bittrex, Operation::SubmitTrade);

        assert_eq!(error.kind(), ExchangeErrorKind::UnsupportedOperation);
        assert_eq!(error.code(), "exchange.unsupported_operation");
        assert!(error.message().contains("submit_trade"));
        assert!(error.message().contains("bittrex"));
        assert!(!error.retryable());
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(ExchangeError::transport("connection reset").retryable());
        assert!(!ExchangeError::configuration("missing key").retryable());
        assert!(!ExchangeError::shape_mismatch("bad body").retryable());
    }

    #[test]
    fn validation_errors_become_invalid_requests() {
        let error = ExchangeError::from(ValidationError::EmptyCurrency);
        assert_eq!(error.kind(), ExchangeErrorKind::InvalidRequest);
        assert_eq!(error.message(), "currency label cannot be empty");
    }
}
