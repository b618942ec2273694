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
use super::Keyboard;
use crate::api::EffectId;
use crate::color::Color;
use crate::effect::{
    Breathing, Direction, KeyboardCustomKey, KeyboardEffect, Reactive, Starlight,
};
use crate::error::Result;
use crate::grid::Key;

impl Keyboard {
    /// Sets one key on the cached grid and re-applies it.
    pub async fn set_key(&mut self, key: Key, color: Color) -> Result<EffectId> {
        let mut grid = self.grid.clone();
        grid.set_key(key, color);
        self.apply_grid(grid).await
    }

    /// Sets several keys to the same color with a single effect.
    pub async fn set_keys(
        &mut self,
        keys: impl IntoIterator<Item = Key>,
        color: Color,
    ) -> Result<EffectId> {
        let mut grid = self.grid.clone();
        for key in keys {
            grid.set_key(key, color);
        }
        self.apply_grid(grid).await
    }

    /// The color of a key in the cached grid.
    pub fn get_key(&self, key: Key) -> Color {
        self.grid.get_key(key)
    }

    pub async fn set_breathing(&mut self, breathing: Breathing) -> Result<EffectId> {
        self.set_effect(KeyboardEffect::Breathing(breathing)).await
    }

    pub async fn set_reactive(&mut self, reactive: Reactive) -> Result<EffectId> {
        self.set_effect(KeyboardEffect::Reactive(reactive)).await
    }

    pub async fn set_wave(&mut self, direction: Direction) -> Result<EffectId> {
        self.set_effect(KeyboardEffect::Wave(direction)).await
    }

    pub async fn set_spectrum_cycling(&mut self) -> Result<EffectId> {
        self.set_effect(KeyboardEffect::SpectrumCycling).await
    }

    pub async fn set_starlight(&mut self, starlight: Starlight) -> Result<EffectId> {
        self.set_effect(KeyboardEffect::Starlight(starlight)).await
    }

    /// Applies a two-layer custom effect. Once it is active the base layer
    /// becomes the cached grid.
    pub async fn set_custom_key(&mut self, custom: KeyboardCustomKey) -> Result<EffectId> {
        let base = custom.color.clone();
        let id = self.set_effect(KeyboardEffect::CustomKey(custom)).await?;
        self.grid = base;
        Ok(id)
    }
}
