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
use std::ffi::{c_void, OsStr};
use std::ptr;

use libloading::Library;
use tracing::info;
use uuid::Uuid;

use super::NativeSdk;
use crate::api::{ApiDeviceType, ResultCode, WindowHandle};
use crate::devices::{DeviceInfo, DeviceType};
use crate::effect::EffectTarget;
use crate::error::Result;

#[cfg(target_pointer_width = "64")]
const LIBRARY_NAME: &str = "RzChromaSDK64.dll";
#[cfg(not(target_pointer_width = "64"))]
const LIBRARY_NAME: &str = "RzChromaSDK.dll";

/// The C `GUID` layout.
#[repr(C)]
#[derive(Clone, Copy, Default)]
struct Guid {
    data1: u32,
    data2: u16,
    data3: u16,
    data4: [u8; 8],
}

impl From<&Uuid> for Guid {
    fn from(uuid: &Uuid) -> Self {
        let (data1, data2, data3, data4) = uuid.as_fields();
        Guid {
            data1,
            data2,
            data3,
            data4: *data4,
        }
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        Uuid::from_fields(guid.data1, guid.data2, guid.data3, &guid.data4)
    }
}

#[repr(C)]
#[derive(Clone, Copy, Default)]
struct RawDeviceInfo {
    device_type: u32,
    connected: u32,
}

type VoidFn = unsafe extern "C" fn() -> i32;
type CreateEffectFn = unsafe extern "C" fn(Guid, i32, *const c_void, *mut Guid) -> i32;
type CreateFamilyEffectFn = unsafe extern "C" fn(i32, *const c_void, *mut Guid) -> i32;
type EffectFn = unsafe extern "C" fn(Guid) -> i32;
type RegisterFn = unsafe extern "C" fn(isize) -> i32;
type QueryDeviceFn = unsafe extern "C" fn(Guid, *mut RawDeviceInfo) -> i32;

/// The vendor's shared library, loaded at runtime.
pub struct LibrarySdk {
    init: VoidFn,
    uninit: VoidFn,
    create_effect: CreateEffectFn,
    create_keyboard_effect: CreateFamilyEffectFn,
    create_mouse_effect: CreateFamilyEffectFn,
    create_headset_effect: CreateFamilyEffectFn,
    create_mousepad_effect: CreateFamilyEffectFn,
    create_keypad_effect: CreateFamilyEffectFn,
    create_chroma_link_effect: CreateFamilyEffectFn,
    set_effect: EffectFn,
    delete_effect: EffectFn,
    register_event_notification: RegisterFn,
    unregister_event_notification: VoidFn,
    query_device: QueryDeviceFn,
    // Must outlive every function pointer above.
    _library: Library,
}

/// Copies a function pointer out of the library.
///
/// # Safety
///
/// `T` must match the exported symbol's real signature.
unsafe fn symbol<T: Copy>(library: &Library, name: &[u8]) -> Result<T> {
    Ok(*library.get::<T>(name)?)
}

impl LibrarySdk {
    /// Loads the SDK library installed with Razer Synapse.
    pub fn load() -> Result<Self> {
        Self::load_from(LIBRARY_NAME)
    }

    pub fn load_from(path: impl AsRef<OsStr>) -> Result<Self> {
        // SAFETY: the library is the vendor SDK, whose initializers have no
        // preconditions, and each signature below matches its C header.
        unsafe {
            let library = Library::new(path.as_ref())?;
            let init = symbol(&library, b"Init\0")?;
            let uninit = symbol(&library, b"UnInit\0")?;
            let create_effect = symbol(&library, b"CreateEffect\0")?;
            let create_keyboard_effect = symbol(&library, b"CreateKeyboardEffect\0")?;
            let create_mouse_effect = symbol(&library, b"CreateMouseEffect\0")?;
            let create_headset_effect = symbol(&library, b"CreateHeadsetEffect\0")?;
            let create_mousepad_effect = symbol(&library, b"CreateMousepadEffect\0")?;
            let create_keypad_effect = symbol(&library, b"CreateKeypadEffect\0")?;
            let create_chroma_link_effect = symbol(&library, b"CreateChromaLinkEffect\0")?;
            let set_effect = symbol(&library, b"SetEffect\0")?;
            let delete_effect = symbol(&library, b"DeleteEffect\0")?;
            let register_event_notification = symbol(&library, b"RegisterEventNotification\0")?;
            let unregister_event_notification =
                symbol(&library, b"UnregisterEventNotification\0")?;
            let query_device = symbol(&library, b"QueryDevice\0")?;

            info!(path = ?path.as_ref(), "Loaded Chroma SDK library.");

            Ok(LibrarySdk {
                init,
                uninit,
                create_effect,
                create_keyboard_effect,
                create_mouse_effect,
                create_headset_effect,
                create_mousepad_effect,
                create_keypad_effect,
                create_chroma_link_effect,
                set_effect,
                delete_effect,
                register_event_notification,
                unregister_event_notification,
                query_device,
                _library: library,
            })
        }
    }

    fn family_fn(&self, family: ApiDeviceType) -> CreateFamilyEffectFn {
        match family {
            ApiDeviceType::Keyboard => self.create_keyboard_effect,
            ApiDeviceType::Mouse => self.create_mouse_effect,
            ApiDeviceType::Headset => self.create_headset_effect,
            ApiDeviceType::Mousepad => self.create_mousepad_effect,
            ApiDeviceType::Keypad => self.create_keypad_effect,
            ApiDeviceType::ChromaLink => self.create_chroma_link_effect,
        }
    }
}

impl NativeSdk for LibrarySdk {
    fn init(&self) -> ResultCode {
        // SAFETY: no arguments.
        ResultCode::from_raw(unsafe { (self.init)() })
    }

    fn uninit(&self) -> ResultCode {
        // SAFETY: no arguments.
        ResultCode::from_raw(unsafe { (self.uninit)() })
    }

    fn query_device(&self, device: &Uuid) -> std::result::Result<DeviceInfo, ResultCode> {
        let mut raw = RawDeviceInfo::default();
        // SAFETY: `raw` is a valid, writable DEVICE_INFO_TYPE.
        let result =
            ResultCode::from_raw(unsafe { (self.query_device)(Guid::from(device), &mut raw) });
        if !result.is_success() {
            return Err(result);
        }
        Ok(DeviceInfo {
            device_type: DeviceType::from_raw(raw.device_type),
            connected: raw.connected,
        })
    }

    fn create_effect(
        &self,
        target: EffectTarget,
        effect_type: i32,
        param: Option<&[u8]>,
    ) -> std::result::Result<Uuid, ResultCode> {
        let param = param.map_or(ptr::null(), |param| param.as_ptr() as *const c_void);
        let mut id = Guid::default();
        // SAFETY: `param` is null or points at a packed struct of the size
        // the SDK expects for `effect_type`, and `id` is writable.
        let raw = unsafe {
            match target {
                EffectTarget::Device(device) => {
                    (self.create_effect)(Guid::from(device.as_uuid()), effect_type, param, &mut id)
                }
                EffectTarget::Family(family) => (self.family_fn(family))(effect_type, param, &mut id),
            }
        };
        match ResultCode::from_raw(raw) {
            ResultCode::SUCCESS => Ok(Uuid::from(id)),
            failure => Err(failure),
        }
    }

    fn set_effect(&self, id: &Uuid) -> ResultCode {
        // SAFETY: passed by value.
        ResultCode::from_raw(unsafe { (self.set_effect)(Guid::from(id)) })
    }

    fn delete_effect(&self, id: &Uuid) -> ResultCode {
        // SAFETY: passed by value.
        ResultCode::from_raw(unsafe { (self.delete_effect)(Guid::from(id)) })
    }

    fn register_event_notification(&self, window: WindowHandle) -> ResultCode {
        // SAFETY: the SDK only posts messages to the handle.
        ResultCode::from_raw(unsafe { (self.register_event_notification)(window.0) })
    }

    fn unregister_event_notification(&self) -> ResultCode {
        // SAFETY: no arguments.
        ResultCode::from_raw(unsafe { (self.unregister_event_notification)() })
    }
}
