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

use async_trait::async_trait;
use tracing::{debug, info, span, Instrument, Level};
use uuid::Uuid;

use crate::api::{AppInfo, ChromaApi, EffectId, ResultCode, WindowHandle};
use crate::devices::{DeviceId, DeviceInfo};
use crate::effect::{Effect, EffectTarget};
use crate::error::{Error, Result};

#[cfg(feature = "native-sdk")]
mod library;

#[cfg(feature = "native-sdk")]
pub use library::LibrarySdk;

/// Raw, blocking access to the in-process Chroma SDK.
///
/// Every call returns the SDK's result code untouched; [`NativeApi`] is
/// responsible for turning failures into errors.
pub trait NativeSdk: Send + Sync + 'static {
    fn init(&self) -> ResultCode;

    fn uninit(&self) -> ResultCode;

    fn query_device(&self, device: &Uuid) -> std::result::Result<DeviceInfo, ResultCode>;

    /// Creates an effect. `param` is the packed parameter struct, or `None`
    /// when the effect takes no parameter.
    fn create_effect(
        &self,
        target: EffectTarget,
        effect_type: i32,
        param: Option<&[u8]>,
    ) -> std::result::Result<Uuid, ResultCode>;

    fn set_effect(&self, id: &Uuid) -> ResultCode;

    fn delete_effect(&self, id: &Uuid) -> ResultCode;

    fn register_event_notification(&self, window: WindowHandle) -> ResultCode;

    fn unregister_event_notification(&self) -> ResultCode;
}

/// The in-process transport.
pub struct NativeApi<S: NativeSdk> {
    sdk: Arc<S>,
}

impl<S: NativeSdk> NativeApi<S> {
    pub fn new(sdk: S) -> Self {
        NativeApi { sdk: Arc::new(sdk) }
    }

    /// Runs a blocking SDK call off the async executor.
    async fn call<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&S) -> T + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.sdk.clone();
        Ok(tokio::task::spawn_blocking(move || f(&sdk)).await?)
    }
}

#[async_trait]
impl<S: NativeSdk> ChromaApi for NativeApi<S> {
    async fn initialize(&self, info: &AppInfo) -> Result<()> {
        let span = span!(Level::INFO, "initialize (native)");
        async {
            self.call(|sdk| sdk.init()).await?.into_result()?;
            info!(title = %info.title, "Chroma SDK initialized.");
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn uninitialize(&self) -> Result<()> {
        self.call(|sdk| sdk.uninit()).await?.into_result()?;
        info!("Chroma SDK uninitialized.");
        Ok(())
    }

    async fn query_device(&self, device: DeviceId) -> Result<DeviceInfo> {
        let uuid = *device.as_uuid();
        debug!(device = %device, "Querying device");
        self.call(move |sdk| sdk.query_device(&uuid))
            .await?
            .map_err(Error::api)
    }

    async fn create_effect(&self, effect: &Effect) -> Result<EffectId> {
        let target = effect.target();
        let effect_type = effect.native_type();
        let param = effect.to_native();
        debug!(
            target = ?target,
            effect_type,
            size = param.len(),
            "Creating native effect"
        );

        let id = self
            .call(move |sdk| {
                let param = if param.is_empty() {
                    None
                } else {
                    Some(&param[..])
                };
                sdk.create_effect(target, effect_type, param)
            })
            .await?
            .map_err(Error::api)?;
        Ok(EffectId::from_uuid(id))
    }

    async fn set_effect(&self, id: EffectId) -> Result<()> {
        debug!(effect = %id, "Setting native effect");
        self.call(move |sdk| sdk.set_effect(id.as_uuid()))
            .await?
            .into_result()
    }

    async fn delete_effect(&self, id: EffectId) -> Result<()> {
        debug!(effect = %id, "Deleting native effect");
        self.call(move |sdk| sdk.delete_effect(id.as_uuid()))
            .await?
            .into_result()
    }

    async fn register_event_notifications(&self, window: WindowHandle) -> Result<()> {
        self.call(move |sdk| sdk.register_event_notification(window))
            .await?
            .into_result()
    }

    async fn unregister_event_notifications(&self) -> Result<()> {
        self.call(|sdk| sdk.unregister_event_notification())
            .await?
            .into_result()
    }
}


#[cfg(test)]
mod tests {
    use super::test::{RecordingSdk, SdkCall};
    use super::*;
    use crate::api::ApiDeviceType;
    use crate::color::Color;
    use crate::effect::{GenericEffect, KeyboardEffect};

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_passes_packed_param() {
        let sdk = RecordingSdk::new();
        let calls = sdk.calls.clone();
        let api = NativeApi::new(sdk);

        let id = api
            .create_effect(&Effect::Keyboard(KeyboardEffect::Static(Color::RED)))
            .await
            .unwrap();
        assert!(!id.is_empty());

        assert_eq!(
            calls.lock().clone(),
            vec![SdkCall::Create {
                target: EffectTarget::Family(ApiDeviceType::Keyboard),
                effect_type: 4,
                param: Some(vec![255, 0, 0, 0]),
            }]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_effects_without_parameters_pass_none() {
        let sdk = RecordingSdk::new();
        let calls = sdk.calls.clone();
        let api = NativeApi::new(sdk);

        api.create_effect(&Effect::Keyboard(KeyboardEffect::None))
            .await
            .unwrap();

        let calls = calls.lock();
        match &calls[0] {
            SdkCall::Create { param, .. } => assert_eq!(*param, None),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_generic_effects_are_addressed_by_device() {
        let sdk = RecordingSdk::new();
        let calls = sdk.calls.clone();
        let api = NativeApi::new(sdk);

        api.create_device_effect(DeviceId::FIREFLY, GenericEffect::static_color(Color::BLUE))
            .await
            .unwrap();

        let calls = calls.lock();
        match &calls[0] {
            SdkCall::Create {
                target,
                effect_type,
                param,
            } => {
                assert_eq!(*target, EffectTarget::Device(DeviceId::FIREFLY));
                assert_eq!(*effect_type, 6);
                assert_eq!(param.as_ref().map(|p| p.len()), Some(16));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failures_become_api_errors() {
        let api = NativeApi::new(RecordingSdk::failing(ResultCode::SERVICE_NOT_ACTIVE));

        let err = api.initialize(&AppInfo::default()).await.unwrap_err();
        assert_eq!(err.result_code(), Some(ResultCode::SERVICE_NOT_ACTIVE));

        let err = api
            .create_effect(&Effect::Keyboard(KeyboardEffect::None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Api {
                result: ResultCode::SERVICE_NOT_ACTIVE,
                ..
            }
        ));

        let err = api.query_device(DeviceId::BLADE).await.unwrap_err();
        assert_eq!(err.result_code(), Some(ResultCode::SERVICE_NOT_ACTIVE));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_set_delete_and_events() {
        let sdk = RecordingSdk::new();
        let calls = sdk.calls.clone();
        let api = NativeApi::new(sdk);
        let id = EffectId::from_uuid(Uuid::new_v4());

        api.set_effect(id).await.unwrap();
        api.delete_effect(id).await.unwrap();
        api.register_event_notifications(WindowHandle(42)).await.unwrap();
        api.unregister_event_notifications().await.unwrap();
        let info = api.query_device(DeviceId::BLACKWIDOW).await.unwrap();
        assert!(info.is_connected());

        assert_eq!(
            calls.lock().clone(),
            vec![
                SdkCall::Set(*id.as_uuid()),
                SdkCall::Delete(*id.as_uuid()),
                SdkCall::Register(WindowHandle(42)),
                SdkCall::Unregister,
                SdkCall::Query(*DeviceId::BLACKWIDOW.as_uuid()),
            ]
        );
    }
}
