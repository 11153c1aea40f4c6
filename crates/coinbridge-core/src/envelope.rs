use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ExchangeError;

/// Error text reported when the transport returned an empty body.
pub const NO_RESPONSE: &str = "No Response.";

/// Canonical result envelope returned by every exchange operation.
///
/// `success == false` implies `data` is `None`; `success == true` implies `error` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: None,
        }
    }

    pub fn no_response() -> Self {
        Self::failure(NO_RESPONSE)
    }

    /// Folds a terminal error into the envelope's `Error` field.
    pub fn from_error(error: &ExchangeError) -> Self {
        Self::failure(error.to_string())
    }

    /// Collapses both failure channels into one envelope.
    pub fn flatten(result: Result<Self, ExchangeError>) -> Self {
        result.unwrap_or_else(|error| Self::from_error(&error))
    }

    pub const fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn map_data<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            success: self.success,
            error: self.error,
            data: self.data.map(f),
        }
    }
}

/// Envelope as it appears on the wire after shape translation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireEnvelope<T> {
    success: bool,
    error: Option<String>,
    message: Option<String>,
    data: Option<T>,
}

/// Parses a canonical-shaped body into an [`ApiResponse`].
///
/// JSON `null`s are dropped before typed parsing so absent and null fields both take
/// the record's defaults. A missing `Success` key, or a success envelope without `Data`,
/// is a shape mismatch.
pub(crate) fn parse_canonical<T>(body: &str) -> Result<ApiResponse<T>, ExchangeError>
where
    T: DeserializeOwned,
{
    let mut value: Value = serde_json::from_str(body)
        .map_err(|error| ExchangeError::shape_mismatch(format!("body is not JSON: {error}")))?;
    prune_nulls(&mut value);

    let wire: WireEnvelope<T> = serde_json::from_value(value).map_err(|error| {
        ExchangeError::shape_mismatch(format!("body does not match canonical shape: {error}"))
    })?;

    if !wire.success {
        let reason = wire
            .error
            .or(wire.message)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| String::from("exchange reported failure"));
        return Ok(ApiResponse::failure(reason));
    }

    match wire.data {
        Some(data) => Ok(ApiResponse::success(data)),
        None => Err(ExchangeError::shape_mismatch(
            "success envelope carried no Data",
        )),
    }
}

fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, entry| !entry.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}
