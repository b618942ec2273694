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
use bytes::{BufMut, BytesMut};
use serde_json::{json, Value};

use super::{
    grid_json, put_color, put_grid, Breathing, Direction, NativeLayout, Reactive, RestPayload,
    Starlight,
};
use crate::color::Color;
use crate::grid::{Key, KeyboardGrid};

/// Bit marking a cell of the key layer as set.
const KEY_SET_FLAG: u32 = 0x0100_0000;

/// The keyboard's two-layer custom effect: a base color grid and a key
/// layer whose set cells override it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyboardCustomKey {
    pub color: KeyboardGrid,
    pub key: KeyboardGrid,
}

impl KeyboardCustomKey {
    /// Sets a key on the key layer.
    pub fn set_key(&mut self, key: Key, color: Color) {
        self.key
            .set_key(key, Color::from_packed(color.value() | KEY_SET_FLAG));
    }

    /// Whether a key has been set on the key layer.
    pub fn is_set(&self, key: Key) -> bool {
        self.key.get_key(key).value() & KEY_SET_FLAG != 0
    }

    /// The color a key will show: the key layer if set, else the base grid.
    pub fn get_key(&self, key: Key) -> Color {
        if self.is_set(key) {
            Color::from_packed(self.key.get_key(key).value() & !KEY_SET_FLAG)
        } else {
            self.color.get_key(key)
        }
    }
}

/// Keyboard effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyboardEffect {
    None,
    Static(Color),
    Custom(KeyboardGrid),
    CustomKey(KeyboardCustomKey),
    Breathing(Breathing),
    Reactive(Reactive),
    Wave(Direction),
    SpectrumCycling,
    Starlight(Starlight),
}

impl NativeLayout for KeyboardEffect {
    fn native_type(&self) -> i32 {
        match self {
            KeyboardEffect::None => 0,
            KeyboardEffect::Breathing(_) => 1,
            KeyboardEffect::Custom(_) => 2,
            KeyboardEffect::Reactive(_) => 3,
            KeyboardEffect::Static(_) => 4,
            KeyboardEffect::SpectrumCycling => 5,
            KeyboardEffect::Wave(_) => 6,
            KeyboardEffect::Starlight(_) => 7,
            KeyboardEffect::CustomKey(_) => 8,
        }
    }

    fn native_size(&self) -> usize {
        match self {
            KeyboardEffect::None | KeyboardEffect::SpectrumCycling => 0,
            KeyboardEffect::Static(_) | KeyboardEffect::Wave(_) => 4,
            KeyboardEffect::Reactive(_) => 8,
            KeyboardEffect::Breathing(_) => 12,
            KeyboardEffect::Starlight(_) => 16,
            KeyboardEffect::Custom(_) => KeyboardGrid::MAX_LEDS * 4,
            KeyboardEffect::CustomKey(_) => KeyboardGrid::MAX_LEDS * 8,
        }
    }

    fn write_native(&self, buf: &mut BytesMut) {
        match self {
            KeyboardEffect::None | KeyboardEffect::SpectrumCycling => {}
            KeyboardEffect::Static(color) => put_color(buf, *color),
            KeyboardEffect::Custom(grid) => put_grid(buf, grid),
            KeyboardEffect::CustomKey(custom) => {
                put_grid(buf, &custom.color);
                put_grid(buf, &custom.key);
            }
            KeyboardEffect::Breathing(breathing) => {
                buf.put_u32_le(breathing.kind.raw());
                put_color(buf, breathing.first);
                put_color(buf, breathing.second);
            }
            KeyboardEffect::Reactive(reactive) => {
                buf.put_u32_le(reactive.duration.raw());
                put_color(buf, reactive.color);
            }
            KeyboardEffect::Wave(direction) => buf.put_u32_le(direction.raw()),
            KeyboardEffect::Starlight(starlight) => {
                buf.put_u32_le(starlight.kind.raw());
                buf.put_u32_le(starlight.duration);
                put_color(buf, starlight.first);
                put_color(buf, starlight.second);
            }
        }
    }
}

impl RestPayload for KeyboardEffect {
    fn rest_name(&self) -> &'static str {
        match self {
            KeyboardEffect::None => "CHROMA_NONE",
            KeyboardEffect::Static(_) => "CHROMA_STATIC",
            KeyboardEffect::Custom(_) => "CHROMA_CUSTOM",
            KeyboardEffect::CustomKey(_) => "CHROMA_CUSTOM_KEY",
            KeyboardEffect::Breathing(_) => "CHROMA_BREATHING",
            KeyboardEffect::Reactive(_) => "CHROMA_REACTIVE",
            KeyboardEffect::Wave(_) => "CHROMA_WAVE",
            KeyboardEffect::SpectrumCycling => "CHROMA_SPECTRUMCYCLING",
            KeyboardEffect::Starlight(_) => "CHROMA_STARLIGHT",
        }
    }

    fn rest_param(&self) -> Option<Value> {
        match self {
            KeyboardEffect::None | KeyboardEffect::SpectrumCycling => None,
            KeyboardEffect::Static(color) => Some(json!({ "color": color })),
            KeyboardEffect::Custom(grid) => Some(grid_json(grid)),
            KeyboardEffect::CustomKey(custom) => Some(json!({
                "color": grid_json(&custom.color),
                "key": grid_json(&custom.key),
            })),
            KeyboardEffect::Breathing(breathing) => Some(json!({
                "type": breathing.kind.raw(),
                "color1": breathing.first,
                "color2": breathing.second,
            })),
            KeyboardEffect::Reactive(reactive) => Some(json!({
                "duration": reactive.duration.raw(),
                "color": reactive.color,
            })),
            KeyboardEffect::Wave(direction) => Some(json!({ "direction": direction.raw() })),
            KeyboardEffect::Starlight(starlight) => Some(json!({
                "type": starlight.kind.raw(),
                "duration": starlight.duration,
                "color1": starlight.first,
                "color2": starlight.second,
            })),
        }
    }
}
