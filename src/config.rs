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
use std::path::Path;
use std::time::Duration;

use config::{Config, File, FileFormat};
use duration_string::DurationString;
use serde::Deserialize;

use crate::api::AppInfo;
use crate::error::Result;
use crate::rest::{DEFAULT_BASE_URI, DEFAULT_HEARTBEAT_INTERVAL};

/// Which transport the client talks to the SDK through.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The local REST bridge.
    #[default]
    Rest,
    /// The in-process SDK library. Requires the `native-sdk` feature.
    Native,
}

/// A YAML representation of the REST bridge settings.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RestConfig {
    /// Where the bridge listens.
    base_uri: Option<String>,

    /// How often the session is kept alive, e.g. `1s` or `500ms`.
    heartbeat_interval: Option<String>,
}

impl RestConfig {
    pub fn new(base_uri: Option<String>, heartbeat_interval: Option<String>) -> RestConfig {
        RestConfig {
            base_uri,
            heartbeat_interval,
        }
    }

    /// Gets the base URI.
    pub fn base_uri(&self) -> &str {
        self.base_uri.as_deref().unwrap_or(DEFAULT_BASE_URI)
    }

    /// Gets the heartbeat interval.
    pub fn heartbeat_interval(&self) -> Result<Duration> {
        self.heartbeat_interval
            .as_ref()
            .map_or(Ok(DEFAULT_HEARTBEAT_INTERVAL), |interval| {
                Ok(DurationString::from_string(interval.clone())?.into())
            })
    }
}

/// The client configuration.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ClientConfig {
    #[serde(default)]
    backend: Backend,

    #[serde(default)]
    rest: RestConfig,

    /// The application registering with the SDK.
    #[serde(default)]
    app: AppInfo,
}

impl ClientConfig {
    pub fn new(backend: Backend, rest: RestConfig, app: AppInfo) -> ClientConfig {
        ClientConfig { backend, rest, app }
    }

    /// Parses a client configuration from a YAML file.
    pub fn deserialize(path: &Path) -> Result<ClientConfig> {
        Ok(Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .build()?
            .try_deserialize::<ClientConfig>()?)
    }

    /// Parses a client configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<ClientConfig> {
        Ok(Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize::<ClientConfig>()?)
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn rest(&self) -> &RestConfig {
        &self.rest
    }

    pub fn app(&self) -> &AppInfo {
        &self.app
    }
}
