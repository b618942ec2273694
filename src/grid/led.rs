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

use super::MouseGrid;

/// An addressable LED on the mouse grid, encoded like keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GridLed {
    LeftSide1 = 0x0100,
    LeftSide2 = 0x0200,
    LeftSide3 = 0x0300,
    LeftSide4 = 0x0400,
    LeftSide5 = 0x0500,
    LeftSide6 = 0x0600,
    LeftSide7 = 0x0700,
    ScrollWheel = 0x0203,
    Backlight = 0x0403,
    Logo = 0x0703,
    Bottom1 = 0x0801,
    Bottom2 = 0x0802,
    Bottom3 = 0x0803,
    Bottom4 = 0x0804,
    Bottom5 = 0x0805,
    RightSide1 = 0x0106,
    RightSide2 = 0x0206,
    RightSide3 = 0x0306,
    RightSide4 = 0x0406,
    RightSide5 = 0x0506,
    RightSide6 = 0x0606,
    RightSide7 = 0x0706,
}

impl GridLed {
    pub const fn row(self) -> usize {
        (self as u16 >> 8) as usize
    }

    pub const fn column(self) -> usize {
        (self as u16 & 0xff) as usize
    }
}

impl MouseGrid {
    /// Gets the color of a mouse LED.
    pub fn get_led(&self, led: GridLed) -> Color {
        self[(led.row(), led.column())]
    }

    /// Sets the color of a mouse LED.
    pub fn set_led(&mut self, led: GridLed, color: Color) {
        self[(led.row(), led.column())] = color;
    }
}
