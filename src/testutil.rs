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
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::api::{AppInfo, ChromaApi, EffectId, ResultCode, WindowHandle};
use crate::devices::{DeviceId, DeviceInfo, DeviceType};
use crate::effect::Effect;
use crate::error::{Error, Result};

/// A call received by the [`MockApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Initialize(String),
    Uninitialize,
    Query(DeviceId),
    Create(Effect),
    Set(EffectId),
    Delete(EffectId),
    Register(WindowHandle),
    Unregister,
}

/// A recording API. Effect ids are handed out sequentially from 1.
pub struct MockApi {
    pub calls: Arc<Mutex<Vec<ApiCall>>>,
    /// When set, every call is recorded and then fails with this code.
    pub should_fail: Option<ResultCode>,
    /// When set, only `set_effect` fails.
    pub fail_set: Option<ResultCode>,
    next_id: Mutex<u128>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            calls: Arc::new(Mutex::new(Vec::new())),
            should_fail: None,
            fail_set: None,
            next_id: Mutex::new(1),
        }
    }

    pub fn failing(result: ResultCode) -> Self {
        MockApi {
            should_fail: Some(result),
            ..MockApi::new()
        }
    }

    /// The id the n-th created effect receives.
    pub fn id(n: u128) -> EffectId {
        EffectId::from_uuid(Uuid::from_u128(n))
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    /// Ids of every deleted effect, in order.
    pub fn deleted(&self) -> Vec<EffectId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ApiCall::Delete(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Every created effect, in order.
    pub fn created(&self) -> Vec<Effect> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                ApiCall::Create(effect) => Some(effect.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ApiCall) -> Result<()> {
        self.calls.lock().push(call);
        match self.should_fail {
            Some(result) => Err(Error::api(result)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChromaApi for MockApi {
    async fn initialize(&self, info: &AppInfo) -> Result<()> {
        self.record(ApiCall::Initialize(info.title.clone()))
    }

    async fn uninitialize(&self) -> Result<()> {
        self.record(ApiCall::Uninitialize)
    }

    async fn query_device(&self, device: DeviceId) -> Result<DeviceInfo> {
        self.record(ApiCall::Query(device))?;
        Ok(DeviceInfo {
            device_type: DeviceType::Keyboard,
            connected: 1,
        })
    }

    async fn create_effect(&self, effect: &Effect) -> Result<EffectId> {
        self.record(ApiCall::Create(effect.clone()))?;
        let mut next_id = self.next_id.lock();
        let id = MockApi::id(*next_id);
        *next_id += 1;
        Ok(id)
    }

    async fn set_effect(&self, id: EffectId) -> Result<()> {
        self.record(ApiCall::Set(id))?;
        match self.fail_set {
            Some(result) => Err(Error::api(result)),
            None => Ok(()),
        }
    }

    async fn delete_effect(&self, id: EffectId) -> Result<()> {
        self.record(ApiCall::Delete(id))
    }

    async fn register_event_notifications(&self, window: WindowHandle) -> Result<()> {
        self.record(ApiCall::Register(window))
    }

    async fn unregister_event_notifications(&self) -> Result<()> {
        self.record(ApiCall::Unregister)
    }
}

/// Wait for the given predicate to return true or fail.
pub async fn eventually<F>(predicate: F, error_msg: &str)
where
    F: Fn() -> bool,
{
    let start = Instant::now();
    let tick = Duration::from_millis(10);
    let timeout = Duration::from_secs(3);

    loop {
        if start.elapsed() > timeout {
            panic!("{}", error_msg);
        }
        if predicate() {
            return;
        }
        tokio::time::sleep(tick).await;
    }
}
