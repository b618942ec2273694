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
use bytes::{BufMut, Bytes, BytesMut};
use serde_json::Value;

use crate::api::ApiDeviceType;
use crate::color::Color;
use crate::devices::DeviceId;
use crate::error::{Error, Result};
use crate::grid::ColorGrid;

mod family;
mod generic;
mod keyboard;

pub use family::{ChromaLinkEffect, HeadsetEffect, KeypadEffect, MouseEffect, MousepadEffect};
pub use generic::{Envelope, GenericEffect};
pub use keyboard::{KeyboardCustomKey, KeyboardEffect};

/// A descriptor that can be handed to the native SDK.
///
/// `write_native` must emit exactly `native_size` bytes, field by field in
/// the order the SDK header declares them.
pub trait NativeLayout {
    /// The SDK's numeric effect type.
    fn native_type(&self) -> i32;

    /// The byte length of the fixed-layout parameter struct. Zero means the
    /// SDK is passed no parameter at all.
    fn native_size(&self) -> usize;

    /// Appends the parameter struct.
    fn write_native(&self, buf: &mut BytesMut);
}

/// A descriptor that can be sent to the REST bridge.
pub trait RestPayload {
    /// The `effect` field of the request.
    fn rest_name(&self) -> &'static str;

    /// The `param` field of the request, omitted when `None`.
    fn rest_param(&self) -> Option<Value>;
}

/// An effect together with what it is addressed to.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A generic effect addressed by device model.
    Device(DeviceId, GenericEffect),
    Keyboard(KeyboardEffect),
    Mouse(MouseEffect),
    Headset(HeadsetEffect),
    Mousepad(MousepadEffect),
    Keypad(KeypadEffect),
    ChromaLink(ChromaLinkEffect),
}

/// Where the SDK should route an effect creation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    Device(DeviceId),
    Family(ApiDeviceType),
}

impl Effect {
    pub fn target(&self) -> EffectTarget {
        match self {
            Effect::Device(device, _) => EffectTarget::Device(*device),
            Effect::Keyboard(_) => EffectTarget::Family(ApiDeviceType::Keyboard),
            Effect::Mouse(_) => EffectTarget::Family(ApiDeviceType::Mouse),
            Effect::Headset(_) => EffectTarget::Family(ApiDeviceType::Headset),
            Effect::Mousepad(_) => EffectTarget::Family(ApiDeviceType::Mousepad),
            Effect::Keypad(_) => EffectTarget::Family(ApiDeviceType::Keypad),
            Effect::ChromaLink(_) => EffectTarget::Family(ApiDeviceType::ChromaLink),
        }
    }

    fn native(&self) -> &dyn NativeLayout {
        match self {
            Effect::Device(_, effect) => effect,
            Effect::Keyboard(effect) => effect,
            Effect::Mouse(effect) => effect,
            Effect::Headset(effect) => effect,
            Effect::Mousepad(effect) => effect,
            Effect::Keypad(effect) => effect,
            Effect::ChromaLink(effect) => effect,
        }
    }

    fn rest(&self) -> Option<&dyn RestPayload> {
        let rest: &dyn RestPayload = match self {
            Effect::Device(..) => return None,
            Effect::Keyboard(effect) => effect,
            Effect::Mouse(effect) => effect,
            Effect::Headset(effect) => effect,
            Effect::Mousepad(effect) => effect,
            Effect::Keypad(effect) => effect,
            Effect::ChromaLink(effect) => effect,
        };
        Some(rest)
    }

    pub fn native_type(&self) -> i32 {
        self.native().native_type()
    }

    pub fn native_size(&self) -> usize {
        self.native().native_size()
    }

    /// Packs the parameter struct for the native SDK.
    pub fn to_native(&self) -> Bytes {
        let native = self.native();
        let mut buf = BytesMut::with_capacity(native.native_size());
        native.write_native(&mut buf);
        debug_assert_eq!(buf.len(), native.native_size());
        buf.freeze()
    }

    /// Returns the REST `effect` name and `param` payload.
    pub fn to_rest(&self) -> Result<(&'static str, Option<Value>)> {
        match self.rest() {
            Some(rest) => Ok((rest.rest_name(), rest.rest_param())),
            None => Err(Error::NotSupported(
                "device-addressed effects are not available over REST".to_string(),
            )),
        }
    }
}

/// How a breathing effect picks its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreathingType {
    Two,
    Random,
}

impl BreathingType {
    fn raw(self) -> u32 {
        match self {
            BreathingType::Two => 1,
            BreathingType::Random => 2,
        }
    }
}

/// Breathing between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Breathing {
    pub kind: BreathingType,
    pub first: Color,
    pub second: Color,
}

/// How long a reactive effect lingers after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactiveDuration {
    None,
    Short,
    Medium,
    Long,
}

impl ReactiveDuration {
    fn raw(self) -> u32 {
        match self {
            ReactiveDuration::None => 0,
            ReactiveDuration::Short => 1,
            ReactiveDuration::Medium => 2,
            ReactiveDuration::Long => 3,
        }
    }
}

/// A color that lights up in reaction to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reactive {
    pub duration: ReactiveDuration,
    pub color: Color,
}

/// Wave direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    None,
    LeftToRight,
    RightToLeft,
}

impl Direction {
    fn raw(self) -> u32 {
        match self {
            Direction::None => 0,
            Direction::LeftToRight => 1,
            Direction::RightToLeft => 2,
        }
    }
}

/// How a starlight effect picks its colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarlightType {
    Two,
    Random,
}

impl StarlightType {
    fn raw(self) -> u32 {
        match self {
            StarlightType::Two => 1,
            StarlightType::Random => 2,
        }
    }
}

/// Twinkling keys fading between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Starlight {
    pub kind: StarlightType,
    /// Fade duration in milliseconds.
    pub duration: u32,
    pub first: Color,
    pub second: Color,
}

fn put_color(buf: &mut BytesMut, color: Color) {
    buf.put_u32_le(color.value());
}

fn put_grid<const R: usize, const C: usize>(buf: &mut BytesMut, grid: &ColorGrid<R, C>) {
    for color in grid.iter() {
        put_color(buf, *color);
    }
}

/// Renders a grid as the bridge expects: a flat array for strips, nested
/// rows otherwise.
fn grid_json<const R: usize, const C: usize>(grid: &ColorGrid<R, C>) -> Value {
    if R == 1 {
        Value::from(grid.iter().map(|color| color.value()).collect::<Vec<_>>())
    } else {
        Value::from(
            grid.as_rows()
                .iter()
                .map(|row| Value::from(row.iter().map(|c| c.value()).collect::<Vec<_>>()))
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::grid::HeadsetGrid;

    #[test]
    fn test_targets() {
        assert_eq!(
            Effect::Keyboard(KeyboardEffect::None).target(),
            EffectTarget::Family(ApiDeviceType::Keyboard)
        );
        assert_eq!(
            Effect::Device(DeviceId::FIREFLY, GenericEffect::none()).target(),
            EffectTarget::Device(DeviceId::FIREFLY)
        );
    }

    #[test]
    fn test_packed_length_matches_native_size() {
        let effects = vec![
            Effect::Device(DeviceId::NAGA, GenericEffect::none()),
            Effect::Device(DeviceId::NAGA, GenericEffect::static_color(Color::RED)),
            Effect::Device(DeviceId::NAGA, GenericEffect::breathing(Color::RED, Color::BLUE)),
            Effect::Device(DeviceId::NAGA, GenericEffect::blinking(Color::RED)),
            Effect::Device(
                DeviceId::NAGA,
                GenericEffect::reactive(Color::RED, ReactiveDuration::Long),
            ),
            Effect::Device(DeviceId::NAGA, GenericEffect::wave(Direction::LeftToRight)),
            Effect::Device(DeviceId::NAGA, GenericEffect::spectrum_cycling()),
            Effect::Keyboard(KeyboardEffect::None),
            Effect::Keyboard(KeyboardEffect::Static(Color::RED)),
            Effect::Keyboard(KeyboardEffect::Custom(Default::default())),
            Effect::Keyboard(KeyboardEffect::CustomKey(Default::default())),
            Effect::Keyboard(KeyboardEffect::Wave(Direction::RightToLeft)),
            Effect::Keyboard(KeyboardEffect::SpectrumCycling),
            Effect::Keyboard(KeyboardEffect::Breathing(Breathing {
                kind: BreathingType::Two,
                first: Color::RED,
                second: Color::BLUE,
            })),
            Effect::Keyboard(KeyboardEffect::Reactive(Reactive {
                duration: ReactiveDuration::Short,
                color: Color::GREEN,
            })),
            Effect::Keyboard(KeyboardEffect::Starlight(Starlight {
                kind: StarlightType::Random,
                duration: 500,
                first: Color::RED,
                second: Color::BLUE,
            })),
            Effect::Mouse(MouseEffect::Static(Color::RED)),
            Effect::Mouse(MouseEffect::Custom(Default::default())),
            Effect::Headset(HeadsetEffect::Custom(Default::default())),
            Effect::Mousepad(MousepadEffect::Custom(Default::default())),
            Effect::Keypad(KeypadEffect::Custom(Default::default())),
            Effect::ChromaLink(ChromaLinkEffect::Static(Color::WHITE)),
            Effect::ChromaLink(ChromaLinkEffect::None),
        ];

        for effect in effects {
            assert_eq!(effect.to_native().len(), effect.native_size(), "{:?}", effect);
        }
    }

    #[test]
    fn test_custom_layout_is_row_major_little_endian() {
        let mut grid = HeadsetGrid::new();
        grid.set(1, Color::from_packed(0x00030201)).unwrap();
        let bytes = Effect::Headset(HeadsetEffect::Custom(grid)).to_native();
        assert_eq!(&bytes[0..8], &[0, 0, 0, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_rest_body_for_strip_and_grid() {
        let (name, param) = Effect::Headset(HeadsetEffect::Custom(HeadsetGrid::filled(
            Color::RED,
        )))
        .to_rest()
        .unwrap();
        assert_eq!(name, "CHROMA_CUSTOM");
        assert_eq!(param, Some(json!([255, 255, 255, 255, 255])));

        let (name, param) = Effect::Keypad(KeypadEffect::Custom(Default::default()))
            .to_rest()
            .unwrap();
        assert_eq!(name, "CHROMA_CUSTOM");
        let param = param.unwrap();
        assert_eq!(param.as_array().unwrap().len(), 4);
        assert_eq!(param[0].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_device_effects_have_no_rest_form() {
        let effect = Effect::Device(DeviceId::CORE, GenericEffect::static_color(Color::RED));
        assert!(matches!(effect.to_rest(), Err(Error::NotSupported(_))));
    }
}
