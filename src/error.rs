// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

use crate::sources::Endpoint;

/// Failure to obtain one source list. Any of these marks the whole view as errored.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },
    #[error("{endpoint} is unavailable: {reason}")]
    Unavailable { endpoint: Endpoint, reason: String },
    #[error("{endpoint} returned an invalid record: {source}")]
    InvalidRecord {
        endpoint: Endpoint,
        #[source]
        source: ValidationError,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Http { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Unavailable { endpoint, .. }
            | FetchError::InvalidRecord { endpoint, .. } => *endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("record '{0}' has an empty name")]
    EmptyName(String),
    #[error("record '{id}' has negative value {value}")]
    NegativeValue { id: String, value: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("date range starts on {from} but ends earlier, on {to}")]
pub struct RangeError {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine platform-specific config dir")]
    NoConfigDir,
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
