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

//! A client for Razer Chroma RGB peripherals.
//!
//! Effects are built from [`Color`]s and [`ColorGrid`]s, handed to a
//! [`ChromaApi`] backend (the local REST bridge or, with the `native-sdk`
//! feature, the in-process SDK library) and tracked per device so that
//! replacing an effect always releases the one before it.

pub mod api;
pub mod chroma;
pub mod color;
pub mod config;
pub mod device;
pub mod devices;
pub mod effect;
pub mod error;
pub mod events;
pub mod grid;
pub mod native;
pub mod rest;
#[cfg(test)]
mod testutil;

pub use api::{AppInfo, ChromaApi, EffectId, ResultCode, WindowHandle};
pub use chroma::Chroma;
pub use color::Color;
pub use crate::config::{Backend, ClientConfig};
pub use device::{
    ChromaLink, Device, EffectLifecycle, GenericDevice, Headset, Keyboard, Keypad, Mouse,
    Mousepad,
};
pub use devices::{DeviceId, DeviceInfo, DeviceType};
pub use effect::{Effect, GenericEffect};
pub use error::{Error, Result};
pub use events::ChromaEvent;
pub use grid::{
    ChromaLinkGrid, ColorGrid, GridLed, HeadsetGrid, Key, KeyboardGrid, KeypadGrid, MouseGrid,
    MousepadGrid,
};
pub use rest::RestApi;
