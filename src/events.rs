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

/// `WM_APP + 0x2000`, the message the SDK posts to registered windows.
pub const WM_CHROMA_EVENT: u32 = 0xA000;

const DEVICE_ACCESS: usize = 1;
const SDK_SUPPORT: usize = 2;
const DEVICE_CHANGED: usize = 3;

/// An event posted by the SDK to a registered window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaEvent {
    /// The application gained or lost access to the devices.
    DeviceAccess { granted: bool },
    /// Chroma support was switched on or off for the application.
    SdkSupport { enabled: bool },
    /// A device was plugged in or removed.
    DeviceChanged { added: bool },
    Unknown { kind: usize, value: isize },
}

impl ChromaEvent {
    /// Decodes a window message. Returns `None` for messages that are not
    /// from the SDK.
    pub fn decode(msg: u32, wparam: usize, lparam: isize) -> Option<ChromaEvent> {
        if msg != WM_CHROMA_EVENT {
            return None;
        }

        let on = lparam == 1;
        Some(match wparam {
            DEVICE_ACCESS => ChromaEvent::DeviceAccess { granted: on },
            SDK_SUPPORT => ChromaEvent::SdkSupport { enabled: on },
            DEVICE_CHANGED => ChromaEvent::DeviceChanged { added: on },
            kind => ChromaEvent::Unknown {
                kind,
                value: lparam,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let cases = [
            (1, 1, ChromaEvent::DeviceAccess { granted: true }),
            (1, 0, ChromaEvent::DeviceAccess { granted: false }),
            (2, 1, ChromaEvent::SdkSupport { enabled: true }),
            (2, 0, ChromaEvent::SdkSupport { enabled: false }),
            (3, 1, ChromaEvent::DeviceChanged { added: true }),
            (3, 0, ChromaEvent::DeviceChanged { added: false }),
            (9, 7, ChromaEvent::Unknown { kind: 9, value: 7 }),
        ];

        for (wparam, lparam, expected) in cases {
            assert_eq!(
                ChromaEvent::decode(WM_CHROMA_EVENT, wparam, lparam),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_other_messages_are_ignored() {
        assert_eq!(ChromaEvent::decode(0x0010, 1, 1), None);
    }
}
