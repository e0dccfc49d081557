//! Share descriptor files
//!
//! Loads the JSON document listing the threshold parameters and the
//! base-encoded shares:
//!
//! ```json
//! {
//!   "keys": { "n": 4, "k": 3 },
//!   "1": { "base": "10", "value": "4" },
//!   "2": { "base": "2", "value": "111" },
//!   "3": { "base": "10", "value": "12" },
//!   "6": { "base": "4", "value": "213" }
//! }
//! ```
//!
//! Every top-level key other than `keys` is a decimal x-coordinate.

use crate::error::Error;
use crate::interpolate::{reconstruct_secret, Reconstruction, RecoverConfig, SharePoint};
use crate::radix;
use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const KEYS_FIELD: &str = "keys";

/// Error types for descriptor loading
#[derive(thiserror::Error, Debug)]
pub enum DescriptorError {
    #[error("failed to read descriptor: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("descriptor must be a JSON object")]
    NotAnObject,

    #[error("missing \"keys\" entry")]
    MissingKeys,

    #[error("invalid \"keys\" entry: {0}")]
    InvalidKeys(#[source] serde_json::Error),

    #[error("share key \"{key}\" is not an integer x-coordinate")]
    InvalidCoordinate { key: String },

    #[error("share x={x} must be an object with \"base\" and \"value\" strings")]
    MalformedShare { x: BigInt },

    #[error("missing {field} for x={x}")]
    MissingField { x: BigInt, field: &'static str },

    #[error("invalid base \"{base}\" for x={x}")]
    InvalidBase { x: BigInt, base: String },

    #[error("share x={x}: {source}")]
    Share {
        x: BigInt,
        #[source]
        source: Error,
    },

    #[error(transparent)]
    Core(#[from] Error),
}

#[derive(Debug, Deserialize)]
struct Keys {
    n: usize,
    k: usize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BaseField {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
struct RawShare {
    base: Option<BaseField>,
    value: Option<String>,
}

/// Decoded contents of a descriptor
#[derive(Debug, Clone)]
pub struct ShareSet {
    /// Declared total number of shares
    pub n: usize,
    /// Threshold
    pub k: usize,
    pub shares: Vec<SharePoint>,
}

impl ShareSet {
    /// Load a descriptor from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading share descriptor");
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse descriptor JSON text
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let doc: Value = serde_json::from_str(text)?;
        let Value::Object(map) = doc else {
            return Err(DescriptorError::NotAnObject);
        };

        let keys = map.get(KEYS_FIELD).ok_or(DescriptorError::MissingKeys)?;
        let Keys { n, k } = Keys::deserialize(keys).map_err(DescriptorError::InvalidKeys)?;
        if k < 1 {
            return Err(Error::InvalidThreshold { k }.into());
        }

        let shares = map
            .iter()
            .filter(|(key, _)| key.as_str() != KEYS_FIELD)
            .map(|(key, entry)| parse_share(key, entry))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(n, k, shares = shares.len(), "parsed share descriptor");
        if shares.len() != n {
            warn!(declared = n, found = shares.len(), "share count differs from declared n");
        }
        if shares.len() < k {
            return Err(Error::InsufficientShares { required: k, provided: shares.len() }.into());
        }

        Ok(Self { n, k, shares })
    }

    /// Reconstruct the secret from the loaded shares
    pub fn recover(&self, config: &RecoverConfig) -> Result<Reconstruction, Error> {
        reconstruct_secret(&self.shares, self.k, config)
    }
}

fn parse_share(key: &str, entry: &Value) -> Result<SharePoint, DescriptorError> {
    let x: BigInt = key
        .parse()
        .map_err(|_| DescriptorError::InvalidCoordinate { key: key.to_string() })?;

    let raw = RawShare::deserialize(entry).map_err(|_| DescriptorError::MalformedShare { x: x.clone() })?;

    let base = match raw.base {
        Some(BaseField::Text(s)) => {
            leading_decimal(&s).ok_or_else(|| DescriptorError::InvalidBase { x: x.clone(), base: s.clone() })?
        }
        Some(BaseField::Number(b)) => {
            u32::try_from(b).map_err(|_| DescriptorError::InvalidBase { x: x.clone(), base: b.to_string() })?
        }
        None => return Err(DescriptorError::MissingField { x, field: "base" }),
    };

    let value = match raw.value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(DescriptorError::MissingField { x, field: "value" }),
    };

    let y = radix::decode(&value, base).map_err(|source| DescriptorError::Share { x: x.clone(), source })?;

    Ok(SharePoint { x, y })
}

/// Leading decimal digits of `s`, after optional whitespace and `+`.
/// Trailing text is ignored, so `"16abc"` reads as 16.
fn leading_decimal(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}
