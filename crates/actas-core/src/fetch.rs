//! One JSON POST per mesa against the tally endpoint.
//!
//! Uses the curl crate (libcurl). Blocking; call from `spawn_blocking` when
//! used from async code.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ActasConfig;
use crate::roster::MesaId;

/// Connection parameters for the tally endpoint.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub api_url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl FetchOptions {
    pub fn from_config(cfg: &ActasConfig) -> Self {
        Self {
            api_url: cfg.api_url.clone(),
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            request_timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

/// Response body for one mesa. Fields the endpoint omits stay `None`; lookups
/// never fail at runtime. Keys beyond the attachment list are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MesaResponse {
    #[serde(default)]
    pub adjunto: Option<Vec<Adjunto>>,
}

/// One attachment entry as returned by the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Adjunto {
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub valor: Option<String>,
}

/// Error for a single mesa fetch. Never retried here; a later full run picks
/// the mesa up again.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (timeout, connection reset, DNS).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Endpoint answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body was not the expected JSON shape.
    #[error("response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// POSTs `{"codigoMesa": <mesa>}` and parses the JSON body.
pub fn fetch_mesa(opts: &FetchOptions, mesa: MesaId) -> Result<MesaResponse, FetchError> {
    let payload = serde_json::json!({ "codigoMesa": mesa }).to_string();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&opts.api_url)?;
    easy.post(true)?;
    easy.post_fields_copy(payload.as_bytes())?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.request_timeout)?;

    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/json")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    Ok(serde_json::from_slice(&body)?)
}
