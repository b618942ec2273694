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
use super::Mouse;
use crate::api::EffectId;
use crate::color::Color;
use crate::error::Result;
use crate::grid::GridLed;

impl Mouse {
    /// Sets one LED on the cached grid and re-applies it.
    pub async fn set_led(&mut self, led: GridLed, color: Color) -> Result<EffectId> {
        let mut grid = self.grid.clone();
        grid.set_led(led, color);
        self.apply_grid(grid).await
    }

    pub fn get_led(&self, led: GridLed) -> Color {
        self.grid.get_led(led)
    }
}
