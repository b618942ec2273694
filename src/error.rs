// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::api::ResultCode;
use crate::devices::DeviceId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the client can report.
///
/// Validation variants are raised before any transport call is made. `Api`
/// and `Rest` carry the vendor result code so callers can act on it without
/// caring which backend produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{parameter} {value} is out of range (must be less than {limit})")]
    IndexOutOfRange {
        parameter: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("{parameter} has length {actual}, expected {expected}")]
    InvalidLength {
        parameter: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown device: {0}")]
    UnknownDevice(DeviceId),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("The Chroma SDK has not been initialized")]
    NotInitialized,

    #[error("Chroma API call failed with {result}: {description}")]
    Api {
        result: ResultCode,
        description: String,
    },

    #[error("REST call to {uri} failed with HTTP {status} ({result:?}): {body}")]
    Rest {
        status: u16,
        uri: String,
        body: String,
        result: Option<ResultCode>,
    },

    #[error("The SDK reported success but returned no effect id")]
    MissingEffectId,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Native call task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Config load/parse error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid duration: {0}")]
    Duration(#[from] duration_string::Error),

    #[cfg(feature = "native-sdk")]
    #[error("Unable to load the Chroma SDK library: {0}")]
    Library(#[from] libloading::Error),
}

impl Error {
    /// Builds an API error from a failed result code.
    pub fn api(result: ResultCode) -> Error {
        Error::Api {
            result,
            description: result.description().to_string(),
        }
    }

    /// Returns the vendor result code carried by this error, if any.
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            Error::Api { result, .. } => Some(*result),
            Error::Rest { result, .. } => *result,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_description() {
        let err = Error::api(ResultCode::DEVICE_NOT_CONNECTED);
        assert_eq!(err.result_code(), Some(ResultCode::DEVICE_NOT_CONNECTED));
        assert!(err.to_string().contains("not connected"));
    }

    #[test]
    fn test_validation_errors_have_no_result_code() {
        let err = Error::IndexOutOfRange {
            parameter: "index",
            value: 132,
            limit: 132,
        };
        assert_eq!(err.result_code(), None);
        assert_eq!(
            err.to_string(),
            "index 132 is out of range (must be less than 132)"
        );
    }
}
