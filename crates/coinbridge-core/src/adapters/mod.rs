//! Exchange adapters.
//!
//! | Adapter | Public calls | Private calls | Signer | Shape table |
//! |---------|--------------|---------------|--------|-------------|
//! | [`BittrexAdapter`] | `GET /api/v1.1/public/{op}?...` | `GET /api/v1.1/account/{op}?...&apikey=&nonce=` | [`UrlHmacSigner`](crate::signing::UrlHmacSigner) | [`BITTREX`](crate::shape::BITTREX) |
//! | [`CryptopiaAdapter`] | `GET /Api/{Call}/{seg}/...` | `POST /Api/{Call}` with JSON body | [`AmxSigner`](crate::signing::AmxSigner) | passthrough |

mod bittrex;
mod cryptopia;

use std::sync::Arc;

pub use bittrex::{BittrexAdapter, BittrexRoutes};
pub use cryptopia::{canonical_label, CryptopiaAdapter, CryptopiaRoutes};

use crate::{Exchange, ExchangeConfig, ExchangeId, HttpClient};

/// Builds the adapter for `exchange` over a shared transport.
pub fn adapter_for(
    exchange: ExchangeId,
    config: ExchangeConfig,
    http_client: Arc<dyn HttpClient>,
) -> Arc<dyn Exchange> {
    match exchange {
        ExchangeId::Bittrex => Arc::new(BittrexAdapter::with_http_client(config, http_client)),
        ExchangeId::Cryptopia => Arc::new(CryptopiaAdapter::with_http_client(config, http_client)),
    }
}
