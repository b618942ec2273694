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
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, info, span, warn, Instrument, Level};

use crate::api::{AppInfo, ChromaApi, EffectId, ResultCode, WindowHandle};
use crate::config::RestConfig;
use crate::devices::{DeviceId, DeviceInfo};
use crate::effect::{Effect, EffectTarget};
use crate::error::{Error, Result};

mod models;

use models::{
    EffectRequest, ErrorBody, HeartbeatResponse, IdRequest, InitResponse, SdkResponse,
};

/// The address the Chroma SDK REST bridge listens on.
pub const DEFAULT_BASE_URI: &str = "http://localhost:54235/razer/chromasdk";

/// How often the session is kept alive.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// A live session: its URI and the task keeping it alive.
struct Session {
    uri: String,
    heartbeat: JoinHandle<()>,
}

/// The HTTP transport, talking to the SDK's local REST bridge.
pub struct RestApi {
    client: Client,
    base_uri: String,
    heartbeat_interval: Duration,
    session: Mutex<Option<Session>>,
    /// Held across session setup and teardown so they never interleave.
    transition: tokio::sync::Mutex<()>,
}

impl RestApi {
    pub fn new(base_uri: impl Into<String>) -> Self {
        RestApi {
            client: Client::new(),
            base_uri: base_uri.into(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
            session: Mutex::new(None),
            transition: tokio::sync::Mutex::new(()),
        }
    }

    pub fn from_config(config: &RestConfig) -> Result<Self> {
        Ok(RestApi::new(config.base_uri()).with_heartbeat_interval(config.heartbeat_interval()?))
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// The URI of the current session, if one is live.
    pub fn session_uri(&self) -> Option<String> {
        self.session
            .lock()
            .as_ref()
            .map(|session| session.uri.clone())
    }

    fn require_session(&self) -> Result<String> {
        self.session_uri().ok_or(Error::NotInitialized)
    }

    /// Sends a single heartbeat and returns the bridge's tick count.
    pub async fn heartbeat(&self) -> Result<u64> {
        let uri = self.require_session()?;
        heartbeat(&self.client, &uri).await
    }

    async fn effect_call(&self, request: RequestBuilder, uri: &str) -> Result<SdkResponse> {
        let response: SdkResponse = send(request, uri).await?;
        response.result.into_result()?;
        Ok(response)
    }
}

impl Drop for RestApi {
    fn drop(&mut self) {
        if let Some(session) = self.session.get_mut().take() {
            session.heartbeat.abort();
        }
    }
}

/// Sends a request and decodes the JSON reply. Non-success statuses become
/// [`Error::Rest`] with whatever the bridge said.
async fn send<T: DeserializeOwned>(request: RequestBuilder, uri: &str) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let result = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|error| error.result);
        return Err(Error::Rest {
            status: status.as_u16(),
            uri: uri.to_string(),
            body,
            result,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

async fn heartbeat(client: &Client, session_uri: &str) -> Result<u64> {
    let uri = format!("{}/heartbeat", session_uri);
    let response: HeartbeatResponse = send(client.put(&uri), &uri).await?;
    Ok(response.tick)
}

fn spawn_heartbeat(client: Client, session_uri: String, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match heartbeat(&client, &session_uri).await {
                Ok(tick) => debug!(tick, "Heartbeat"),
                Err(e) => warn!(err = %e, uri = %session_uri, "Heartbeat failed"),
            }
        }
    })
}

#[async_trait]
impl ChromaApi for RestApi {
    async fn initialize(&self, info: &AppInfo) -> Result<()> {
        let span = span!(Level::INFO, "initialize (rest)");
        async {
            let _transition = self.transition.lock().await;
            if self.session.lock().is_some() {
                return Err(Error::api(ResultCode::ALREADY_INITIALIZED));
            }

            let request = self.client.post(&self.base_uri).json(info);
            let response: InitResponse = send(request, &self.base_uri).await?;
            let uri = match response.uri {
                Some(uri) => uri,
                None => {
                    return Err(Error::api(response.result.unwrap_or(ResultCode::FAILED)));
                }
            };

            info!(
                session = ?response.sessionid,
                uri = %uri,
                title = %info.title,
                "Chroma REST session started."
            );

            let heartbeat =
                spawn_heartbeat(self.client.clone(), uri.clone(), self.heartbeat_interval);
            *self.session.lock() = Some(Session { uri, heartbeat });
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn uninitialize(&self) -> Result<()> {
        let _transition = self.transition.lock().await;
        let session = self.session.lock().take().ok_or(Error::NotInitialized)?;
        session.heartbeat.abort();

        let response: SdkResponse = send(self.client.delete(&session.uri), &session.uri).await?;
        response.result.into_result()?;
        info!(uri = %session.uri, "Chroma REST session ended.");
        Ok(())
    }

    async fn query_device(&self, _device: DeviceId) -> Result<DeviceInfo> {
        Err(Error::NotSupported(
            "device queries are not available over REST".to_string(),
        ))
    }

    async fn create_effect(&self, effect: &Effect) -> Result<EffectId> {
        let EffectTarget::Family(family) = effect.target() else {
            return Err(Error::NotSupported(
                "device-addressed effects are not available over REST".to_string(),
            ));
        };
        let (name, param) = effect.to_rest()?;
        let uri = format!("{}/{}", self.require_session()?, family.path());
        debug!(uri = %uri, effect = name, "Creating REST effect");

        let request = self.client.post(&uri).json(&EffectRequest {
            effect: name,
            param,
        });
        self.effect_call(request, &uri)
            .await?
            .id
            .ok_or(Error::MissingEffectId)
    }

    async fn set_effect(&self, id: EffectId) -> Result<()> {
        let uri = format!("{}/effect", self.require_session()?);
        debug!(effect = %id, "Setting REST effect");
        self.effect_call(self.client.put(&uri).json(&IdRequest { id }), &uri)
            .await?;
        Ok(())
    }

    async fn delete_effect(&self, id: EffectId) -> Result<()> {
        let uri = format!("{}/effect", self.require_session()?);
        debug!(effect = %id, "Deleting REST effect");
        self.effect_call(self.client.delete(&uri).json(&IdRequest { id }), &uri)
            .await?;
        Ok(())
    }

    async fn register_event_notifications(&self, _window: WindowHandle) -> Result<()> {
        Err(Error::NotSupported(
            "event notifications are not available over REST".to_string(),
        ))
    }

    async fn unregister_event_notifications(&self) -> Result<()> {
        Err(Error::NotSupported(
            "event notifications are not available over REST".to_string(),
        ))
    }
}
