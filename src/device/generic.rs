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

use super::{Device, EffectLifecycle};
use crate::api::{ChromaApi, EffectId};
use crate::color::Color;
use crate::devices::DeviceId;
use crate::effect::GenericEffect;
use crate::error::{Error, Result};

/// A device addressed by its model id through the generic effects.
pub struct GenericDevice {
    api: Arc<dyn ChromaApi>,
    device: DeviceId,
    lifecycle: EffectLifecycle,
}

impl GenericDevice {
    /// Creates a device for a model in the catalog.
    pub fn new(api: Arc<dyn ChromaApi>, device: DeviceId) -> Result<Self> {
        if !device.is_known() {
            return Err(Error::UnknownDevice(device));
        }

        Ok(GenericDevice {
            api,
            device,
            lifecycle: EffectLifecycle::new(),
        })
    }

    pub fn device_id(&self) -> DeviceId {
        self.device
    }

    /// Creates a generic effect and makes it the active one.
    pub async fn set_effect(&mut self, effect: GenericEffect) -> Result<EffectId> {
        let id = self.api.create_device_effect(self.device, effect).await?;
        self.lifecycle.set_effect(self.api.as_ref(), id).await?;
        Ok(id)
    }
}

#[async_trait]
impl Device for GenericDevice {
    fn current_effect_id(&self) -> Option<EffectId> {
        self.lifecycle.current()
    }

    async fn set_effect_id(&mut self, id: EffectId) -> Result<()> {
        self.lifecycle.set_effect(self.api.as_ref(), id).await
    }

    async fn delete_current_effect(&mut self) -> Result<()> {
        self.lifecycle.delete_current(self.api.as_ref()).await
    }

    async fn clear(&mut self) -> Result<()> {
        self.set_effect(GenericEffect::none()).await?;
        Ok(())
    }

    async fn set_all(&mut self, _color: Color) -> Result<()> {
        Err(Error::NotSupported(format!(
            "set_all on generic device {}",
            self.device
        )))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::effect::Effect;
    use crate::testutil::{ApiCall, MockApi};

    #[test]
    fn test_unknown_device_is_rejected() {
        let device = DeviceId::from_uuid(Uuid::new_v4());
        let err = GenericDevice::new(Arc::new(MockApi::new()), device)
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownDevice(id) if id == device));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_clear_creates_none_effect() {
        let api = Arc::new(MockApi::new());
        let mut device = GenericDevice::new(api.clone(), DeviceId::FIREFLY).unwrap();

        device.clear().await.unwrap();
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::Create(Effect::Device(DeviceId::FIREFLY, GenericEffect::none())),
                ApiCall::Set(MockApi::id(1)),
            ]
        );
        assert_eq!(device.current_effect_id(), Some(MockApi::id(1)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_set_all_is_not_supported() {
        let api = Arc::new(MockApi::new());
        let mut device = GenericDevice::new(api.clone(), DeviceId::KRAKEN).unwrap();

        assert!(matches!(
            device.set_all(Color::RED).await,
            Err(Error::NotSupported(_))
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_replacing_generic_effects() {
        let api = Arc::new(MockApi::new());
        let mut device = GenericDevice::new(api.clone(), DeviceId::CORE).unwrap();

        device
            .set_effect(GenericEffect::static_color(Color::RED))
            .await
            .unwrap();
        device
            .set_effect(GenericEffect::breathing(Color::RED, Color::BLUE))
            .await
            .unwrap();
        device.delete_current_effect().await.unwrap();

        assert_eq!(api.deleted(), vec![MockApi::id(1), MockApi::id(2)]);
        assert_eq!(device.current_effect_id(), None);
    }
}
