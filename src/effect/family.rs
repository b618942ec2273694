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

//! Effects for the families that only support none, static and custom.

use bytes::{BufMut, BytesMut};
use serde_json::{json, Value};

use super::{grid_json, put_color, put_grid, NativeLayout, RestPayload};
use crate::color::Color;
use crate::grid::{ChromaLinkGrid, HeadsetGrid, KeypadGrid, MouseGrid, MousepadGrid};

/// The mouse static struct addresses an LED first; this one means all.
const MOUSE_LED_ALL: u32 = 0x14;

macro_rules! family_effect {
    (
        $(#[$meta:meta])*
        $name:ident, $grid:ty,
        none = $none:expr, solid = $solid:expr, custom = $custom:expr,
        custom_name = $custom_name:expr, static_prefix = $prefix:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            None,
            Static(Color),
            Custom($grid),
        }

        impl NativeLayout for $name {
            fn native_type(&self) -> i32 {
                match self {
                    $name::None => $none,
                    $name::Static(_) => $solid,
                    $name::Custom(_) => $custom,
                }
            }

            fn native_size(&self) -> usize {
                let prefix: &[u32] = $prefix;
                match self {
                    $name::None => 0,
                    $name::Static(_) => 4 * (prefix.len() + 1),
                    $name::Custom(_) => <$grid>::MAX_LEDS * 4,
                }
            }

            fn write_native(&self, buf: &mut BytesMut) {
                let prefix: &[u32] = $prefix;
                match self {
                    $name::None => {}
                    $name::Static(color) => {
                        for field in prefix {
                            buf.put_u32_le(*field);
                        }
                        put_color(buf, *color);
                    }
                    $name::Custom(grid) => put_grid(buf, grid),
                }
            }
        }

        impl RestPayload for $name {
            fn rest_name(&self) -> &'static str {
                match self {
                    $name::None => "CHROMA_NONE",
                    $name::Static(_) => "CHROMA_STATIC",
                    $name::Custom(_) => $custom_name,
                }
            }

            fn rest_param(&self) -> Option<Value> {
                match self {
                    $name::None => None,
                    $name::Static(color) => Some(json!({ "color": color })),
                    $name::Custom(grid) => Some(grid_json(grid)),
                }
            }
        }
    };
}

family_effect!(
    /// Mouse effects. Custom uses the 9x7 grid layout.
    MouseEffect, MouseGrid,
    none = 0, solid = 6, custom = 8,
    custom_name = "CHROMA_CUSTOM2", static_prefix = &[MOUSE_LED_ALL],
);

family_effect!(
    /// Headset effects.
    HeadsetEffect, HeadsetGrid,
    none = 0, solid = 1, custom = 4,
    custom_name = "CHROMA_CUSTOM", static_prefix = &[],
);

family_effect!(
    /// Mousepad effects.
    MousepadEffect, MousepadGrid,
    none = 0, solid = 4, custom = 2,
    custom_name = "CHROMA_CUSTOM", static_prefix = &[],
);

family_effect!(
    /// Keypad effects.
    KeypadEffect, KeypadGrid,
    none = 0, solid = 5, custom = 2,
    custom_name = "CHROMA_CUSTOM", static_prefix = &[],
);

family_effect!(
    /// Chroma Link effects.
    ChromaLinkEffect, ChromaLinkGrid,
    none = 0, solid = 2, custom = 1,
    custom_name = "CHROMA_CUSTOM", static_prefix = &[],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_static_addresses_all_leds() {
        let mut buf = BytesMut::new();
        MouseEffect::Static(Color::RED).write_native(&mut buf);
        assert_eq!(&buf[..], &[0x14, 0, 0, 0, 255, 0, 0, 0]);
        assert_eq!(MouseEffect::Static(Color::RED).native_size(), 8);
    }

    #[test]
    fn test_mouse_custom_uses_custom2() {
        let effect = MouseEffect::Custom(MouseGrid::new());
        assert_eq!(effect.rest_name(), "CHROMA_CUSTOM2");
        assert_eq!(effect.native_type(), 8);
        assert_eq!(effect.native_size(), 63 * 4);
    }

    #[test]
    fn test_effect_type_codes() {
        assert_eq!(HeadsetEffect::Static(Color::RED).native_type(), 1);
        assert_eq!(MousepadEffect::Custom(MousepadGrid::new()).native_type(), 2);
        assert_eq!(KeypadEffect::Static(Color::RED).native_type(), 5);
        assert_eq!(ChromaLinkEffect::Custom(ChromaLinkGrid::new()).native_type(), 1);
        assert_eq!(ChromaLinkEffect::None.native_type(), 0);
    }
}
