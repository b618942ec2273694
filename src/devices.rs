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

use uuid::{uuid, Uuid};

/// Identifies a device model (not a physical unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(Uuid);

impl DeviceId {
    pub const BLACKWIDOW: DeviceId = DeviceId(uuid!("2ea1bb63-ca28-428d-9f06-196b88330bbb"));
    pub const BLACKWIDOW_TE: DeviceId = DeviceId(uuid!("ed1c1b82-bfbe-418f-b49d-d03f05b149df"));
    pub const DEATHSTALKER: DeviceId = DeviceId(uuid!("18c5ad9b-4326-4828-92c4-2669a66d2283"));
    pub const OVERWATCH_KEYBOARD: DeviceId =
        DeviceId(uuid!("872ab2a9-7959-4478-9fed-15f6186e72e4"));
    pub const BLACKWIDOW_X: DeviceId = DeviceId(uuid!("5af60076-ade9-43d4-b574-52599293b554"));
    pub const BLACKWIDOW_X_TE: DeviceId =
        DeviceId(uuid!("2d84dd51-3290-4aac-9a89-d8afde38b57c"));
    pub const ORNATA: DeviceId = DeviceId(uuid!("803378c1-cc48-4970-8539-d828cc1d420a"));
    pub const BLADE_STEALTH: DeviceId = DeviceId(uuid!("c83bdfe8-e7fc-40e0-99db-872e23f19891"));
    pub const BLADE: DeviceId = DeviceId(uuid!("f2bedfaf-a0fe-4651-9d41-b6ce603a3ddd"));
    pub const DEATHADDER: DeviceId = DeviceId(uuid!("aec50d91-b1f1-452f-8e16-7b73f376fdf3"));
    pub const MAMBA_TE: DeviceId = DeviceId(uuid!("7ec00450-e0ee-4289-89d5-0d879c19061a"));
    pub const DIAMONDBACK: DeviceId = DeviceId(uuid!("ff8a5929-4512-4257-8d59-c647bf9935d0"));
    pub const MAMBA: DeviceId = DeviceId(uuid!("d527cbdc-eb0a-483a-9e89-66d50e1d6e4b"));
    pub const NAGA_EPIC: DeviceId = DeviceId(uuid!("d714c50b-7158-4368-b99c-601acb985e98"));
    pub const NAGA: DeviceId = DeviceId(uuid!("f1876328-6ca4-46ae-be04-be812b414433"));
    pub const OROCHI: DeviceId = DeviceId(uuid!("52c15681-4ece-4dd9-8a52-a1418459eb34"));
    pub const NAGA_HEX: DeviceId = DeviceId(uuid!("195d70f5-f285-4cff-99f2-b8c0e9658db4"));
    pub const KRAKEN: DeviceId = DeviceId(uuid!("cd1e09a5-d5e6-4a6c-a93b-e6d9bf1d2092"));
    pub const MANOWAR: DeviceId = DeviceId(uuid!("df3164d7-5408-4a0e-8a7f-a7412f26bebf"));
    pub const FIREFLY: DeviceId = DeviceId(uuid!("80f95a94-73d2-48ca-ae9a-0986789a9af2"));
    pub const TARTARUS: DeviceId = DeviceId(uuid!("00f0545c-e180-4ad1-8e8a-419061ce505e"));
    pub const ORBWEAVER: DeviceId = DeviceId(uuid!("9d24b0ab-0162-466c-9640-7a924aa4d9fd"));
    pub const CORE: DeviceId = DeviceId(uuid!("0201203b-62f3-4c50-83dd-598babd208e0"));

    /// Wraps a raw identifier. Identity is by raw value; the id need not be
    /// in the catalog.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        DeviceId(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the catalog name, if the model is known.
    pub fn name(&self) -> Option<&'static str> {
        CATALOG
            .iter()
            .find(|(id, _)| id == self)
            .map(|(_, name)| *name)
    }

    /// Whether the model is in the catalog.
    pub fn is_known(&self) -> bool {
        self.name().is_some()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

const CATALOG: &[(DeviceId, &str)] = &[
    (DeviceId::BLACKWIDOW, "Razer BlackWidow Chroma"),
    (DeviceId::BLACKWIDOW_TE, "Razer BlackWidow Chroma Tournament Edition"),
    (DeviceId::DEATHSTALKER, "Razer DeathStalker Chroma"),
    (DeviceId::OVERWATCH_KEYBOARD, "Overwatch Keyboard"),
    (DeviceId::BLACKWIDOW_X, "Razer BlackWidow X Chroma"),
    (DeviceId::BLACKWIDOW_X_TE, "Razer BlackWidow X Chroma Tournament Edition"),
    (DeviceId::ORNATA, "Razer Ornata Chroma"),
    (DeviceId::BLADE_STEALTH, "Razer Blade Stealth"),
    (DeviceId::BLADE, "Razer Blade"),
    (DeviceId::DEATHADDER, "Razer DeathAdder Chroma"),
    (DeviceId::MAMBA_TE, "Razer Mamba Chroma Tournament Edition"),
    (DeviceId::DIAMONDBACK, "Razer Diamondback Chroma"),
    (DeviceId::MAMBA, "Razer Mamba Chroma"),
    (DeviceId::NAGA_EPIC, "Razer Naga Epic Chroma"),
    (DeviceId::NAGA, "Razer Naga Chroma"),
    (DeviceId::OROCHI, "Razer Orochi Chroma"),
    (DeviceId::NAGA_HEX, "Razer Naga Hex Chroma"),
    (DeviceId::KRAKEN, "Razer Kraken 7.1 Chroma"),
    (DeviceId::MANOWAR, "Razer ManO'War"),
    (DeviceId::FIREFLY, "Razer Firefly"),
    (DeviceId::TARTARUS, "Razer Tartarus Chroma"),
    (DeviceId::ORBWEAVER, "Razer Orbweaver Chroma"),
    (DeviceId::CORE, "Razer Core"),
];

/// The kind of device reported by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Keyboard,
    Mouse,
    Headset,
    Mousepad,
    Keypad,
    System,
    Speakers,
    Unknown(u32),
}

impl DeviceType {
    /// Maps the SDK's numeric device type.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => DeviceType::Keyboard,
            2 => DeviceType::Mouse,
            3 => DeviceType::Headset,
            4 => DeviceType::Mousepad,
            5 => DeviceType::Keypad,
            6 => DeviceType::System,
            7 => DeviceType::Speakers,
            other => DeviceType::Unknown(other),
        }
    }

    pub fn raw(&self) -> u32 {
        match self {
            DeviceType::Keyboard => 1,
            DeviceType::Mouse => 2,
            DeviceType::Headset => 3,
            DeviceType::Mousepad => 4,
            DeviceType::Keypad => 5,
            DeviceType::System => 6,
            DeviceType::Speakers => 7,
            DeviceType::Unknown(other) => *other,
        }
    }
}

/// Result of a device query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_type: DeviceType,
    /// Number of connected devices of this model.
    pub connected: u32,
}

impl DeviceInfo {
    pub fn is_connected(&self) -> bool {
        self.connected > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(DeviceId::BLACKWIDOW.name(), Some("Razer BlackWidow Chroma"));
        assert!(DeviceId::FIREFLY.is_known());
        assert!(!DeviceId::from_uuid(Uuid::nil()).is_known());
    }

    #[test]
    fn test_identity_is_by_raw_value() {
        let raw = *DeviceId::KRAKEN.as_uuid();
        assert_eq!(DeviceId::from_uuid(raw), DeviceId::KRAKEN);
    }

    #[test]
    fn test_device_type_round_trip() {
        for raw in 0..10 {
            assert_eq!(DeviceType::from_raw(raw).raw(), raw);
        }
        assert_eq!(DeviceType::from_raw(4), DeviceType::Mousepad);
    }

    #[test]
    fn test_connected() {
        let info = DeviceInfo {
            device_type: DeviceType::Keyboard,
            connected: 0,
        };
        assert!(!info.is_connected());
    }
}
