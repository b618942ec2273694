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

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A packed RGB color as the Chroma SDK expects it: `0x00BBGGRR`.
///
/// The top byte is reserved and always zero for colors built from channels.
/// Colors hash exactly like their packed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const PINK: Color = Color::rgb(255, 192, 203);
    pub const HOT_PINK: Color = Color::rgb(255, 105, 180);

    /// Wraps an already packed `0x00BBGGRR` value.
    pub const fn from_packed(value: u32) -> Self {
        Color(value)
    }

    /// Builds a color from byte channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r as u32 | (g as u32) << 8 | (b as u32) << 16)
    }

    /// Builds a color from normalized channels.
    ///
    /// Each channel is multiplied by 255 and truncated, never rounded, so
    /// `0.9` becomes 229. Values outside `0.0..=1.0` saturate to 0 or 255.
    pub fn from_f32(r: f32, g: f32, b: f32) -> Self {
        Color::rgb(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
        )
    }

    /// Double precision variant of [`Color::from_f32`], same truncation rules.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Color::rgb(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
        )
    }

    pub const fn r(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub const fn g(&self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub const fn b(&self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    /// The packed value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl PartialEq<u32> for Color {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Color> for u32 {
    fn eq(&self, other: &Color) -> bool {
        *self == other.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

/// The bridge has emitted both a bare integer and a `{"Value": n}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireColor {
    Packed(u32),
    Object {
        #[serde(rename = "Value", alias = "value")]
        value: u32,
    },
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireColor::deserialize(deserializer)? {
            WireColor::Packed(value) => Color(value),
            WireColor::Object { value } => Color(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_channels_round_trip() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (1, 2, 3), (0x12, 0x34, 0x56)] {
            let color = Color::rgb(r, g, b);
            assert_eq!(color.r(), r);
            assert_eq!(color.g(), g);
            assert_eq!(color.b(), b);
            assert_eq!(
                color.value(),
                u32::from(r) | u32::from(g) << 8 | u32::from(b) << 16
            );
        }
    }

    #[test]
    fn test_packed_layout() {
        assert_eq!(Color::RED.value(), 0x0000ff);
        assert_eq!(Color::GREEN.value(), 0x00ff00);
        assert_eq!(Color::BLUE.value(), 0xff0000);
        assert_eq!(Color::from_packed(0x563412), Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_float_channels_truncate() {
        let color = Color::from_f32(0.8, 0.2, 0.9);
        assert_eq!(color.r(), 204);
        assert_eq!(color.g(), 51);
        assert_eq!(color.b(), 229);

        // (input, expected) pairs where rounding would give a different answer.
        let table = [(0.5, 127), (0.9, 229), (0.1, 25), (0.3, 76), (1.0, 255), (0.0, 0)];
        for (input, expected) in table {
            assert_eq!(Color::from_f64(input, 0.0, 0.0).r(), expected, "{input}");
            assert_eq!(Color::from_f32(input as f32, 0.0, 0.0).r(), expected, "{input}");
        }
    }

    #[test]
    fn test_float_channels_saturate_out_of_range() {
        let color = Color::from_f64(-0.5, 1.5, f64::NAN);
        assert_eq!(color.r(), 0);
        assert_eq!(color.g(), 255);
        assert_eq!(color.b(), 0);
    }

    #[test]
    fn test_equality_forms() {
        let color = Color::rgb(10, 20, 30);
        assert_eq!(color, Color::from_packed(color.value()));
        assert!(color == color.value());
        assert!(color.value() == color);
        assert!(color != 0u32);
        assert_ne!(color, Color::BLACK);
    }

    #[test]
    fn test_hash_matches_packed_integer() {
        let color = Color::HOT_PINK;
        assert_eq!(hash_of(&color), hash_of(&color.value()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgb(0xab, 0x01, 0xff).to_string(), "#ab01ff");
    }

    #[test]
    fn test_wire_forms() {
        assert_eq!(serde_json::to_string(&Color::BLUE).unwrap(), "16711680");

        let bare: Color = serde_json::from_str("255").unwrap();
        assert_eq!(bare, Color::RED);

        let object: Color = serde_json::from_str(r#"{"Value": 65280}"#).unwrap();
        assert_eq!(object, Color::GREEN);

        let lower: Color = serde_json::from_str(r#"{"value": 65280}"#).unwrap();
        assert_eq!(lower, Color::GREEN);

        assert!(serde_json::from_str::<Color>(r#""red""#).is_err());
    }
}
