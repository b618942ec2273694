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

use crate::color::Color;

use super::KeyboardGrid;

macro_rules! keys {
    ($($name:ident = $code:expr,)*) => {
        /// A physical keyboard key.
        ///
        /// The discriminant is the SDK key code: the row in the high byte and
        /// the column in the low byte.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum Key {
            $($name = $code,)*
        }

        impl Key {
            /// Every key in the table.
            pub const ALL: &'static [Key] = &[$(Key::$name,)*];
        }
    };
}

keys! {
    Escape = 0x0001,
    F1 = 0x0003,
    F2 = 0x0004,
    F3 = 0x0005,
    F4 = 0x0006,
    F5 = 0x0007,
    F6 = 0x0008,
    F7 = 0x0009,
    F8 = 0x000A,
    F9 = 0x000B,
    F10 = 0x000C,
    F11 = 0x000D,
    F12 = 0x000E,
    PrintScreen = 0x000F,
    Scroll = 0x0010,
    Pause = 0x0011,
    Logo = 0x0014,
    Jpn1 = 0x0015,
    Macro1 = 0x0100,
    Oem1 = 0x0101,
    D1 = 0x0102,
    D2 = 0x0103,
    D3 = 0x0104,
    D4 = 0x0105,
    D5 = 0x0106,
    D6 = 0x0107,
    D7 = 0x0108,
    D8 = 0x0109,
    D9 = 0x010A,
    D0 = 0x010B,
    Oem2 = 0x010C,
    Oem3 = 0x010D,
    Backspace = 0x010E,
    Insert = 0x010F,
    Home = 0x0110,
    PageUp = 0x0111,
    NumLock = 0x0112,
    NumDivide = 0x0113,
    NumMultiply = 0x0114,
    NumSubtract = 0x0115,
    Macro2 = 0x0200,
    Tab = 0x0201,
    Q = 0x0202,
    W = 0x0203,
    E = 0x0204,
    R = 0x0205,
    T = 0x0206,
    Y = 0x0207,
    U = 0x0208,
    I = 0x0209,
    O = 0x020A,
    P = 0x020B,
    Oem4 = 0x020C,
    Oem5 = 0x020D,
    Oem6 = 0x020E,
    Delete = 0x020F,
    End = 0x0210,
    PageDown = 0x0211,
    Num7 = 0x0212,
    Num8 = 0x0213,
    Num9 = 0x0214,
    NumAdd = 0x0215,
    Macro3 = 0x0300,
    CapsLock = 0x0301,
    A = 0x0302,
    S = 0x0303,
    D = 0x0304,
    F = 0x0305,
    G = 0x0306,
    H = 0x0307,
    J = 0x0308,
    K = 0x0309,
    L = 0x030A,
    Oem7 = 0x030B,
    Oem8 = 0x030C,
    Eur1 = 0x030D,
    Enter = 0x030E,
    Num4 = 0x0312,
    Num5 = 0x0313,
    Num6 = 0x0314,
    Macro4 = 0x0400,
    LeftShift = 0x0401,
    Eur2 = 0x0402,
    Z = 0x0403,
    X = 0x0404,
    C = 0x0405,
    V = 0x0406,
    B = 0x0407,
    N = 0x0408,
    M = 0x0409,
    Oem9 = 0x040A,
    Oem10 = 0x040B,
    Oem11 = 0x040C,
    RightShift = 0x040E,
    Up = 0x0410,
    Num1 = 0x0412,
    Num2 = 0x0413,
    Num3 = 0x0414,
    NumEnter = 0x0415,
    Macro5 = 0x0500,
    LeftControl = 0x0501,
    LeftWindows = 0x0502,
    LeftAlt = 0x0503,
    Space = 0x0507,
    RightAlt = 0x050B,
    Function = 0x050C,
    RightMenu = 0x050D,
    RightControl = 0x050E,
    Left = 0x050F,
    Down = 0x0510,
    Right = 0x0511,
    Num0 = 0x0513,
    NumDecimal = 0x0514,
}

impl Key {
    /// The raw SDK key code.
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub const fn row(self) -> usize {
        (self.code() >> 8) as usize
    }

    pub const fn column(self) -> usize {
        (self.code() & 0xff) as usize
    }
}

impl KeyboardGrid {
    /// Gets the color of a key.
    pub fn get_key(&self, key: Key) -> Color {
        self[(key.row(), key.column())]
    }

    /// Sets the color of a key.
    pub fn set_key(&mut self, key: Key, color: Color) {
        self[(key.row(), key.column())] = color;
    }
}
