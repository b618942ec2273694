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
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::devices::{DeviceId, DeviceInfo};
use crate::effect::{Effect, GenericEffect};
use crate::error::Result;

/// The operations every transport to the Chroma SDK provides.
///
/// Implementations translate their own failure channel into
/// [`crate::Error::Api`] (or [`crate::Error::Rest`]) so nothing above this
/// trait needs to know which transport is active.
#[async_trait]
pub trait ChromaApi: Send + Sync {
    /// Establishes an SDK session.
    async fn initialize(&self, info: &AppInfo) -> Result<()>;

    /// Tears down the SDK session.
    async fn uninitialize(&self) -> Result<()>;

    /// Queries a device model's type and connection state.
    async fn query_device(&self, device: DeviceId) -> Result<DeviceInfo>;

    /// Creates an effect and returns its handle. The effect is not active
    /// until passed to [`ChromaApi::set_effect`].
    async fn create_effect(&self, effect: &Effect) -> Result<EffectId>;

    /// Creates a generic effect addressed by device id.
    async fn create_device_effect(
        &self,
        device: DeviceId,
        effect: GenericEffect,
    ) -> Result<EffectId> {
        self.create_effect(&Effect::Device(device, effect)).await
    }

    /// Makes a created effect the one currently rendering.
    async fn set_effect(&self, id: EffectId) -> Result<()>;

    /// Releases an effect. The effect does not need to be the active one.
    async fn delete_effect(&self, id: EffectId) -> Result<()>;

    /// Subscribes a window to SDK event messages.
    async fn register_event_notifications(&self, window: WindowHandle) -> Result<()>;

    /// Removes the event message subscription.
    async fn unregister_event_notifications(&self) -> Result<()>;
}

/// The handle of a created effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectId(Uuid);

impl EffectId {
    /// The "no effect" sentinel.
    pub const EMPTY: EffectId = EffectId(Uuid::nil());

    pub const fn from_uuid(uuid: Uuid) -> Self {
        EffectId(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw window handle for event notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub isize);

/// A vendor result code. Zero is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultCode(i32);

impl ResultCode {
    pub const SUCCESS: ResultCode = ResultCode(0);
    pub const ACCESS_DENIED: ResultCode = ResultCode(5);
    pub const INVALID_HANDLE: ResultCode = ResultCode(6);
    pub const NOT_SUPPORTED: ResultCode = ResultCode(50);
    pub const INVALID_PARAMETER: ResultCode = ResultCode(87);
    pub const NO_MORE_ITEMS: ResultCode = ResultCode(259);
    pub const SERVICE_NOT_ACTIVE: ResultCode = ResultCode(1062);
    pub const SINGLE_INSTANCE_APP: ResultCode = ResultCode(1152);
    pub const DEVICE_NOT_CONNECTED: ResultCode = ResultCode(1167);
    pub const NOT_FOUND: ResultCode = ResultCode(1168);
    pub const REQUEST_ABORTED: ResultCode = ResultCode(1235);
    pub const ALREADY_INITIALIZED: ResultCode = ResultCode(1247);
    pub const RESOURCE_DISABLED: ResultCode = ResultCode(4309);
    pub const DEVICE_NOT_AVAILABLE: ResultCode = ResultCode(4319);
    pub const NOT_VALID_STATE: ResultCode = ResultCode(5023);
    pub const FAILED: ResultCode = ResultCode(0x8000_4005_u32 as i32);

    pub const fn from_raw(raw: i32) -> Self {
        ResultCode(raw)
    }

    pub const fn raw(&self) -> i32 {
        self.0
    }

    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// Converts into a `Result`, mapping any failure to an API error.
    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(crate::Error::api(self))
        }
    }

    /// A human readable description of the code.
    pub fn description(&self) -> &'static str {
        match *self {
            ResultCode::SUCCESS => "success",
            ResultCode::ACCESS_DENIED => "access denied",
            ResultCode::INVALID_HANDLE => "invalid handle",
            ResultCode::NOT_SUPPORTED => "not supported",
            ResultCode::INVALID_PARAMETER => "invalid parameter",
            ResultCode::NO_MORE_ITEMS => "no more items",
            ResultCode::SERVICE_NOT_ACTIVE => "the Chroma service is not active",
            ResultCode::SINGLE_INSTANCE_APP => "only a single instance of the application may run",
            ResultCode::DEVICE_NOT_CONNECTED => "device not connected",
            ResultCode::NOT_FOUND => "element not found",
            ResultCode::REQUEST_ABORTED => "request aborted",
            ResultCode::ALREADY_INITIALIZED => "an attempt was made to initialize twice",
            ResultCode::RESOURCE_DISABLED => "resource disabled",
            ResultCode::DEVICE_NOT_AVAILABLE => "device not available or supported",
            ResultCode::NOT_VALID_STATE => "the group or resource is not in the correct state",
            ResultCode::FAILED => "general failure",
            _ => "unknown result code",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "result code {}", self.0)
    }
}

/// A device category an application declares support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiDeviceType {
    Keyboard,
    Mouse,
    Headset,
    Mousepad,
    Keypad,
    #[serde(rename = "chromalink")]
    ChromaLink,
}

impl ApiDeviceType {
    pub const ALL: [ApiDeviceType; 6] = [
        ApiDeviceType::Keyboard,
        ApiDeviceType::Mouse,
        ApiDeviceType::Headset,
        ApiDeviceType::Mousepad,
        ApiDeviceType::Keypad,
        ApiDeviceType::ChromaLink,
    ];

    /// The path segment the REST bridge uses for the family.
    pub fn path(&self) -> &'static str {
        match self {
            ApiDeviceType::Keyboard => "keyboard",
            ApiDeviceType::Mouse => "mouse",
            ApiDeviceType::Headset => "headset",
            ApiDeviceType::Mousepad => "mousepad",
            ApiDeviceType::Keypad => "keypad",
            ApiDeviceType::ChromaLink => "chromalink",
        }
    }
}

/// What kind of application is registering with the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Application,
    Game,
}

/// The author of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub contact: String,
}

/// Information about the application registering with the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub title: String,
    pub description: String,
    pub author: Author,
    #[serde(rename = "device_supported", default = "all_devices")]
    pub supported_devices: Vec<ApiDeviceType>,
    #[serde(default)]
    pub category: Category,
}

fn all_devices() -> Vec<ApiDeviceType> {
    ApiDeviceType::ALL.to_vec()
}

impl AppInfo {
    /// Creates app info that declares support for every device family.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        author_name: impl Into<String>,
        author_contact: impl Into<String>,
    ) -> Self {
        AppInfo {
            title: title.into(),
            description: description.into(),
            author: Author {
                name: author_name.into(),
                contact: author_contact.into(),
            },
            supported_devices: all_devices(),
            category: Category::Application,
        }
    }

    pub fn with_devices(mut self, devices: impl IntoIterator<Item = ApiDeviceType>) -> Self {
        self.supported_devices = devices.into_iter().collect();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        AppInfo::new(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_DESCRIPTION"),
            "unknown",
            "unknown",
        )
    }
}
