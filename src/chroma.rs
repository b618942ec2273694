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

use tokio::sync::broadcast;
use tracing::{debug, info, span, Instrument, Level};

use crate::api::{AppInfo, ChromaApi, WindowHandle};
use crate::color::Color;
use crate::config::{Backend, ClientConfig};
use crate::device::{
    ChromaLink, Device, GenericDevice, Headset, Keyboard, Keypad, Mouse, Mousepad,
};
use crate::devices::{DeviceId, DeviceInfo};
use crate::error::{Error, Result};
use crate::events::ChromaEvent;
use crate::rest::RestApi;

/// How many undelivered events a slow subscriber may fall behind by.
const EVENT_CAPACITY: usize = 32;

/// The entry point: one SDK session and one device per family.
pub struct Chroma {
    api: Arc<dyn ChromaApi>,
    initialized: bool,
    keyboard: Keyboard,
    mouse: Mouse,
    headset: Headset,
    mousepad: Mousepad,
    keypad: Keypad,
    chroma_link: ChromaLink,
    events: broadcast::Sender<ChromaEvent>,
}

impl Chroma {
    pub fn new(api: Arc<dyn ChromaApi>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Chroma {
            keyboard: Keyboard::new(api.clone()),
            mouse: Mouse::new(api.clone()),
            headset: Headset::new(api.clone()),
            mousepad: Mousepad::new(api.clone()),
            keypad: Keypad::new(api.clone()),
            chroma_link: ChromaLink::new(api.clone()),
            api,
            initialized: false,
            events,
        }
    }

    /// Builds a client on the configured backend. The session is not
    /// started until [`Chroma::initialize`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api: Arc<dyn ChromaApi> = match config.backend() {
            Backend::Rest => Arc::new(RestApi::from_config(config.rest())?),
            Backend::Native => native_api()?,
        };
        info!(backend = ?config.backend(), "Created Chroma client.");
        Ok(Chroma::new(api))
    }

    pub fn api(&self) -> &Arc<dyn ChromaApi> {
        &self.api
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    pub async fn initialize(&mut self, info: &AppInfo) -> Result<()> {
        let span = span!(Level::INFO, "chroma initialize");
        async {
            self.api.initialize(info).await?;
            self.initialized = true;
            info!(title = %info.title, "Chroma client ready.");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Deletes every device's current effect, then ends the session.
    pub async fn uninitialize(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        let span = span!(Level::INFO, "chroma uninitialize");
        async {
            for device in self.devices_mut() {
                device.delete_current_effect().await?;
            }
            self.api.uninitialize().await?;
            self.initialized = false;
            Ok(())
        }
        .instrument(span)
        .await
    }

    pub async fn query(&self, device: DeviceId) -> Result<DeviceInfo> {
        self.ensure_initialized()?;
        self.api.query_device(device).await
    }

    /// Creates a device driven through the generic, id-addressed effects.
    pub fn create_generic(&self, device: DeviceId) -> Result<GenericDevice> {
        self.ensure_initialized()?;
        GenericDevice::new(self.api.clone(), device)
    }

    pub fn keyboard_mut(&mut self) -> Result<&mut Keyboard> {
        self.ensure_initialized()?;
        Ok(&mut self.keyboard)
    }

    pub fn mouse_mut(&mut self) -> Result<&mut Mouse> {
        self.ensure_initialized()?;
        Ok(&mut self.mouse)
    }

    pub fn headset_mut(&mut self) -> Result<&mut Headset> {
        self.ensure_initialized()?;
        Ok(&mut self.headset)
    }

    pub fn mousepad_mut(&mut self) -> Result<&mut Mousepad> {
        self.ensure_initialized()?;
        Ok(&mut self.mousepad)
    }

    pub fn keypad_mut(&mut self) -> Result<&mut Keypad> {
        self.ensure_initialized()?;
        Ok(&mut self.keypad)
    }

    pub fn chroma_link_mut(&mut self) -> Result<&mut ChromaLink> {
        self.ensure_initialized()?;
        Ok(&mut self.chroma_link)
    }

    fn devices_mut(&mut self) -> [&mut dyn Device; 6] {
        [
            &mut self.keyboard,
            &mut self.mouse,
            &mut self.headset,
            &mut self.mousepad,
            &mut self.keypad,
            &mut self.chroma_link,
        ]
    }

    /// Sets every LED of every family to one color. Stops at the first
    /// failure.
    pub async fn set_all(&mut self, color: Color) -> Result<()> {
        self.ensure_initialized()?;
        for device in self.devices_mut() {
            device.set_all(color).await?;
        }
        Ok(())
    }

    /// Clears every family. Stops at the first failure.
    pub async fn clear(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        for device in self.devices_mut() {
            device.clear().await?;
        }
        Ok(())
    }

    pub async fn register_event_notifications(&self, window: WindowHandle) -> Result<()> {
        self.ensure_initialized()?;
        self.api.register_event_notifications(window).await
    }

    pub async fn unregister_event_notifications(&self) -> Result<()> {
        self.ensure_initialized()?;
        self.api.unregister_event_notifications().await
    }

    /// Feeds a window message to the client. Returns whether it was an SDK
    /// event; if so it is published to subscribers.
    pub fn handle_message(&self, msg: u32, wparam: usize, lparam: isize) -> bool {
        match ChromaEvent::decode(msg, wparam, lparam) {
            Some(event) => {
                debug!(event = ?event, "Chroma event");
                // No subscribers is fine.
                let _ = self.events.send(event);
                true
            }
            None => false,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChromaEvent> {
        self.events.subscribe()
    }
}

#[cfg(feature = "native-sdk")]
fn native_api() -> Result<Arc<dyn ChromaApi>> {
    use crate::native::{LibrarySdk, NativeApi};

    Ok(Arc::new(NativeApi::new(LibrarySdk::load()?)))
}

#[cfg(not(feature = "native-sdk"))]
fn native_api() -> Result<Arc<dyn ChromaApi>> {
    Err(Error::NotSupported(
        "the native backend requires the native-sdk feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiDeviceType, ResultCode};
    use crate::config::RestConfig;
    use crate::effect::{Effect, EffectTarget, KeyboardEffect};
    use crate::events::WM_CHROMA_EVENT;
    use crate::grid::KeyboardGrid;
    use crate::testutil::{ApiCall, MockApi};

    async fn initialized(api: Arc<MockApi>) -> Chroma {
        let _ = tracing_subscriber::fmt::try_init();
        let mut chroma = Chroma::new(api);
        chroma
            .initialize(&AppInfo::new("Test", "A test", "Tester", "test@example.com"))
            .await
            .unwrap();
        chroma
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_operations_require_initialize() {
        let api = Arc::new(MockApi::new());
        let mut chroma = Chroma::new(api.clone());

        assert!(!chroma.is_initialized());
        assert!(matches!(chroma.keyboard_mut(), Err(Error::NotInitialized)));
        assert!(matches!(
            chroma.set_all(Color::RED).await,
            Err(Error::NotInitialized)
        ));
        assert!(matches!(
            chroma.query(DeviceId::BLADE).await,
            Err(Error::NotInitialized)
        ));
        assert!(matches!(
            chroma.create_generic(DeviceId::BLADE),
            Err(Error::NotInitialized)
        ));
        assert!(matches!(
            chroma.uninitialize().await,
            Err(Error::NotInitialized)
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_initialize_stays_uninitialized() {
        let mut chroma = Chroma::new(Arc::new(MockApi::failing(ResultCode::SERVICE_NOT_ACTIVE)));
        let err = chroma.initialize(&AppInfo::default()).await.unwrap_err();
        assert_eq!(err.result_code(), Some(ResultCode::SERVICE_NOT_ACTIVE));
        assert!(!chroma.is_initialized());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_set_all_covers_every_family() {
        let api = Arc::new(MockApi::new());
        let mut chroma = initialized(api.clone()).await;

        chroma.set_all(Color::PINK).await.unwrap();

        let targets: Vec<EffectTarget> = api.created().iter().map(Effect::target).collect();
        assert_eq!(
            targets,
            ApiDeviceType::ALL
                .iter()
                .map(|family| EffectTarget::Family(*family))
                .collect::<Vec<_>>()
        );
        assert_eq!(
            api.created()[0],
            Effect::Keyboard(KeyboardEffect::Custom(KeyboardGrid::filled(Color::PINK)))
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_uninitialize_deletes_current_effects_first() {
        let api = Arc::new(MockApi::new());
        let mut chroma = initialized(api.clone()).await;

        chroma.keyboard_mut().unwrap().set_static(Color::RED).await.unwrap();
        chroma.keypad_mut().unwrap().set_static(Color::BLUE).await.unwrap();
        chroma.uninitialize().await.unwrap();
        assert!(!chroma.is_initialized());

        let calls = api.calls();
        assert_eq!(
            &calls[calls.len() - 3..],
            &[
                ApiCall::Delete(MockApi::id(1)),
                ApiCall::Delete(MockApi::id(2)),
                ApiCall::Uninitialize,
            ]
        );
        assert_eq!(chroma.keyboard.current_effect_id(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_clear_creates_none_for_each_family() {
        let api = Arc::new(MockApi::new());
        let mut chroma = initialized(api.clone()).await;

        chroma.clear().await.unwrap();
        assert_eq!(api.created().len(), 6);
        assert_eq!(api.created()[0], Effect::Keyboard(KeyboardEffect::None));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_first_failure_stops_set_all() {
        let mut api = MockApi::new();
        api.fail_set = Some(ResultCode::DEVICE_NOT_CONNECTED);
        let api = Arc::new(api);
        let mut chroma = initialized(api.clone()).await;

        assert!(chroma.set_all(Color::RED).await.is_err());
        assert_eq!(api.created().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_events_are_published() {
        let api = Arc::new(MockApi::new());
        let chroma = initialized(api.clone()).await;
        let mut events = chroma.subscribe();

        chroma
            .register_event_notifications(WindowHandle(99))
            .await
            .unwrap();
        assert!(chroma.handle_message(WM_CHROMA_EVENT, 3, 1));
        assert!(!chroma.handle_message(0x0001, 3, 1));

        assert_eq!(
            events.recv().await.unwrap(),
            ChromaEvent::DeviceChanged { added: true }
        );
        assert!(api.calls().contains(&ApiCall::Register(WindowHandle(99))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_generic_devices_and_queries() {
        let api = Arc::new(MockApi::new());
        let chroma = initialized(api.clone()).await;

        assert!(chroma.query(DeviceId::BLACKWIDOW).await.unwrap().is_connected());
        let device = chroma.create_generic(DeviceId::KRAKEN).unwrap();
        assert_eq!(device.device_id(), DeviceId::KRAKEN);
    }

    #[cfg(not(feature = "native-sdk"))]
    #[test]
    fn test_native_backend_needs_feature() {
        let config = ClientConfig::new(Backend::Native, RestConfig::default(), AppInfo::default());
        assert!(matches!(
            Chroma::from_config(&config),
            Err(Error::NotSupported(_))
        ));
    }

    #[test]
    fn test_rest_backend_from_config() {
        let config = ClientConfig::new(Backend::Rest, RestConfig::default(), AppInfo::default());
        let chroma = Chroma::from_config(&config).unwrap();
        assert!(!chroma.is_initialized());
    }
}
