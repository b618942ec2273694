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

use super::{put_color, Direction, NativeLayout, ReactiveDuration};
use crate::color::Color;

/// Width of the leading `size_t Size` field.
const SIZE_FIELD: usize = 8;
/// Width of the `DWORD Param` field.
const PARAM_FIELD: usize = 4;
/// The structs contain a `size_t`, so they are 8-byte aligned.
const ALIGNMENT: usize = 8;

/// The `Size`/`Param` header every generic effect struct starts with.
///
/// `size` is the C `sizeof` of the whole struct, fixed when the effect is
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Envelope {
    size: usize,
    parameter: u32,
}

impl Envelope {
    fn for_fields(field_bytes: usize) -> Self {
        let unpadded = SIZE_FIELD + PARAM_FIELD + field_bytes;
        Envelope {
            size: unpadded.div_ceil(ALIGNMENT) * ALIGNMENT,
            parameter: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn parameter(&self) -> u32 {
        self.parameter
    }
}

/// An effect for the device-addressed core API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericEffect {
    None(Envelope),
    Static {
        envelope: Envelope,
        color: Color,
    },
    Breathing {
        envelope: Envelope,
        first: Color,
        second: Color,
    },
    Blinking {
        envelope: Envelope,
        color: Color,
    },
    Reactive {
        envelope: Envelope,
        color: Color,
        duration: ReactiveDuration,
    },
    Wave {
        envelope: Envelope,
        direction: Direction,
    },
    SpectrumCycling(Envelope),
}

impl GenericEffect {
    pub fn none() -> Self {
        GenericEffect::None(Envelope::for_fields(0))
    }

    pub fn static_color(color: Color) -> Self {
        GenericEffect::Static {
            envelope: Envelope::for_fields(4),
            color,
        }
    }

    pub fn breathing(first: Color, second: Color) -> Self {
        GenericEffect::Breathing {
            envelope: Envelope::for_fields(8),
            first,
            second,
        }
    }

    pub fn blinking(color: Color) -> Self {
        GenericEffect::Blinking {
            envelope: Envelope::for_fields(4),
            color,
        }
    }

    pub fn reactive(color: Color, duration: ReactiveDuration) -> Self {
        GenericEffect::Reactive {
            envelope: Envelope::for_fields(8),
            color,
            duration,
        }
    }

    pub fn wave(direction: Direction) -> Self {
        GenericEffect::Wave {
            envelope: Envelope::for_fields(4),
            direction,
        }
    }

    pub fn spectrum_cycling() -> Self {
        GenericEffect::SpectrumCycling(Envelope::for_fields(0))
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            GenericEffect::None(envelope) | GenericEffect::SpectrumCycling(envelope) => *envelope,
            GenericEffect::Static { envelope, .. }
            | GenericEffect::Breathing { envelope, .. }
            | GenericEffect::Blinking { envelope, .. }
            | GenericEffect::Reactive { envelope, .. }
            | GenericEffect::Wave { envelope, .. } => *envelope,
        }
    }
}

impl NativeLayout for GenericEffect {
    fn native_type(&self) -> i32 {
        match self {
            GenericEffect::None(_) => 0,
            GenericEffect::Wave { .. } => 1,
            GenericEffect::SpectrumCycling(_) => 2,
            GenericEffect::Breathing { .. } => 3,
            GenericEffect::Blinking { .. } => 4,
            GenericEffect::Reactive { .. } => 5,
            GenericEffect::Static { .. } => 6,
        }
    }

    fn native_size(&self) -> usize {
        self.envelope().size()
    }

    fn write_native(&self, buf: &mut BytesMut) {
        let envelope = self.envelope();
        let start = buf.len();
        buf.put_u64_le(envelope.size as u64);
        buf.put_u32_le(envelope.parameter);

        match self {
            GenericEffect::None(_) | GenericEffect::SpectrumCycling(_) => {}
            GenericEffect::Static { color, .. } | GenericEffect::Blinking { color, .. } => {
                put_color(buf, *color);
            }
            GenericEffect::Breathing { first, second, .. } => {
                put_color(buf, *first);
                put_color(buf, *second);
            }
            GenericEffect::Reactive {
                color, duration, ..
            } => {
                put_color(buf, *color);
                buf.put_u32_le(duration.raw());
            }
            GenericEffect::Wave { direction, .. } => {
                buf.put_u32_le(direction.raw());
            }
        }

        // Trailing padding up to the struct's alignment.
        let written = buf.len() - start;
        buf.put_bytes(0, envelope.size - written);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_sizes() {
        assert_eq!(GenericEffect::none().envelope().size(), 16);
        assert_eq!(GenericEffect::static_color(Color::RED).envelope().size(), 16);
        assert_eq!(GenericEffect::blinking(Color::RED).envelope().size(), 16);
        assert_eq!(
            GenericEffect::breathing(Color::RED, Color::BLUE).envelope().size(),
            24
        );
        assert_eq!(
            GenericEffect::reactive(Color::RED, ReactiveDuration::Medium)
                .envelope()
                .size(),
            24
        );
        assert_eq!(GenericEffect::wave(Direction::None).envelope().size(), 16);
        assert_eq!(GenericEffect::spectrum_cycling().envelope().size(), 16);
        assert_eq!(GenericEffect::none().envelope().parameter(), 0);
    }

    #[test]
    fn test_static_layout() {
        let mut buf = BytesMut::new();
        GenericEffect::static_color(Color::rgb(1, 2, 3)).write_native(&mut buf);
        assert_eq!(
            &buf[..],
            &[16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 0]
        );
    }

    #[test]
    fn test_reactive_layout_is_padded() {
        let mut buf = BytesMut::new();
        GenericEffect::reactive(Color::RED, ReactiveDuration::Long).write_native(&mut buf);
        assert_eq!(buf.len(), 24);
        assert_eq!(&buf[16..20], &[3, 0, 0, 0]);
        assert_eq!(&buf[20..24], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_effect_types() {
        assert_eq!(GenericEffect::none().native_type(), 0);
        assert_eq!(GenericEffect::static_color(Color::RED).native_type(), 6);
        assert_eq!(GenericEffect::wave(Direction::LeftToRight).native_type(), 1);
    }
}
