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
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{ApiDeviceType, ChromaApi, EffectId};
use crate::color::Color;
use crate::effect::{
    ChromaLinkEffect, Effect, HeadsetEffect, KeyboardEffect, KeypadEffect, MouseEffect,
    MousepadEffect,
};
use crate::error::Result;
use crate::grid::{
    ChromaLinkGrid, HeadsetGrid, KeyboardGrid, KeypadGrid, MouseGrid, MousepadGrid,
};

mod generic;
mod keyboard;
mod mouse;

pub use generic::GenericDevice;

/// Tracks the effect currently active on one device.
///
/// Replacing an effect records the new id first, activates it, and only
/// then deletes the previous one. Methods take `&mut self`, so a device can
/// only have one operation in flight; wrap the owning device in a
/// `tokio::sync::Mutex` to share it between tasks.
#[derive(Debug, Default)]
pub struct EffectLifecycle {
    current: Option<EffectId>,
}

impl EffectLifecycle {
    pub fn new() -> Self {
        EffectLifecycle::default()
    }

    /// The active effect, if any.
    pub fn current(&self) -> Option<EffectId> {
        self.current
    }

    /// Makes `id` the active effect and releases the one it replaces.
    ///
    /// The previous effect is deleted even when it has the same value as
    /// `id`, and even when activation fails. An activation failure is
    /// reported ahead of a failed delete. The empty id is never recorded.
    pub async fn set_effect(&mut self, api: &dyn ChromaApi, id: EffectId) -> Result<()> {
        let next = Some(id).filter(|id| !id.is_empty());
        let previous = std::mem::replace(&mut self.current, next);
        debug!(effect = %id, previous = ?previous, "Replacing effect");

        let activated = api.set_effect(id).await;
        let deleted = match previous {
            Some(previous) => api.delete_effect(previous).await,
            None => Ok(()),
        };
        if let Err(e) = &activated {
            if let Err(delete) = deleted {
                warn!(err = %delete, "Unable to delete previous effect after failed activation");
            }
            debug!(err = %e, "Effect activation failed");
            return activated;
        }
        deleted
    }

    /// Deletes the active effect. Does nothing when there is none.
    pub async fn delete_current(&mut self, api: &dyn ChromaApi) -> Result<()> {
        if let Some(id) = self.current.take().filter(|id| !id.is_empty()) {
            debug!(effect = %id, "Deleting current effect");
            api.delete_effect(id).await?;
        }
        Ok(())
    }
}

/// Operations every device supports.
#[async_trait]
pub trait Device: Send {
    fn current_effect_id(&self) -> Option<EffectId>;

    /// Routes an already created effect through the lifecycle.
    async fn set_effect_id(&mut self, id: EffectId) -> Result<()>;

    async fn delete_current_effect(&mut self) -> Result<()>;

    /// Turns every LED off.
    async fn clear(&mut self) -> Result<()>;

    /// Sets every LED to one color.
    async fn set_all(&mut self, color: Color) -> Result<()>;
}

/// A device family addressed by the per-family SDK entry points.
pub trait Family: Send + Sync + 'static {
    type Grid: Clone + Default + PartialEq + fmt::Debug + Send + Sync;
    type Effect: Send + Sync;

    const DEVICE_TYPE: ApiDeviceType;

    fn none() -> Self::Effect;
    fn solid(color: Color) -> Self::Effect;
    fn custom(grid: Self::Grid) -> Self::Effect;
    fn into_effect(effect: Self::Effect) -> Effect;

    fn filled(color: Color) -> Self::Grid;
    fn get(grid: &Self::Grid, index: usize) -> Result<Color>;
    fn set(grid: &mut Self::Grid, index: usize, color: Color) -> Result<()>;
    fn set_at(grid: &mut Self::Grid, row: usize, column: usize, color: Color) -> Result<()>;
}

macro_rules! family {
    ($(#[$meta:meta])* $family:ident, $grid:ty, $effect:ident, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub enum $family {}

        impl Family for $family {
            type Grid = $grid;
            type Effect = $effect;

            const DEVICE_TYPE: ApiDeviceType = ApiDeviceType::$variant;

            fn none() -> $effect {
                $effect::None
            }

            fn solid(color: Color) -> $effect {
                $effect::Static(color)
            }

            fn custom(grid: $grid) -> $effect {
                $effect::Custom(grid)
            }

            fn into_effect(effect: $effect) -> Effect {
                Effect::$variant(effect)
            }

            fn filled(color: Color) -> $grid {
                <$grid>::filled(color)
            }

            fn get(grid: &$grid, index: usize) -> Result<Color> {
                grid.get(index)
            }

            fn set(grid: &mut $grid, index: usize, color: Color) -> Result<()> {
                grid.set(index, color)
            }

            fn set_at(grid: &mut $grid, row: usize, column: usize, color: Color) -> Result<()> {
                grid.set_at(row, column, color)
            }
        }
    };
}

family!(
    /// Keyboards, addressed as a 6x22 grid or by key.
    KeyboardFamily, KeyboardGrid, KeyboardEffect, Keyboard
);
family!(
    /// Mice, addressed as a 9x7 grid or by LED.
    MouseFamily, MouseGrid, MouseEffect, Mouse
);
family!(HeadsetFamily, HeadsetGrid, HeadsetEffect, Headset);
family!(MousepadFamily, MousepadGrid, MousepadEffect, Mousepad);
family!(KeypadFamily, KeypadGrid, KeypadEffect, Keypad);
family!(ChromaLinkFamily, ChromaLinkGrid, ChromaLinkEffect, ChromaLink);

pub type Keyboard = ChromaDevice<KeyboardFamily>;
pub type Mouse = ChromaDevice<MouseFamily>;
pub type Headset = ChromaDevice<HeadsetFamily>;
pub type Mousepad = ChromaDevice<MousepadFamily>;
pub type Keypad = ChromaDevice<KeypadFamily>;
pub type ChromaLink = ChromaDevice<ChromaLinkFamily>;

/// A device driven through its family's effects.
///
/// Keeps a copy of the last custom grid so single LEDs can be changed
/// without rebuilding the whole layout.
pub struct ChromaDevice<F: Family> {
    api: Arc<dyn ChromaApi>,
    lifecycle: EffectLifecycle,
    grid: F::Grid,
}

impl<F: Family> ChromaDevice<F> {
    pub fn new(api: Arc<dyn ChromaApi>) -> Self {
        ChromaDevice {
            api,
            lifecycle: EffectLifecycle::new(),
            grid: F::Grid::default(),
        }
    }

    /// Creates an effect and makes it the active one.
    pub async fn set_effect(&mut self, effect: F::Effect) -> Result<EffectId> {
        let id = self.api.create_effect(&F::into_effect(effect)).await?;
        self.lifecycle.set_effect(self.api.as_ref(), id).await?;
        Ok(id)
    }

    pub async fn set_static(&mut self, color: Color) -> Result<EffectId> {
        self.set_effect(F::solid(color)).await
    }

    /// Applies a custom grid and keeps a copy of it once it is active.
    pub async fn set_custom(&mut self, grid: F::Grid) -> Result<EffectId> {
        self.apply_grid(grid).await
    }

    /// Changes one LED of the cached grid and re-applies it.
    pub async fn set_index(&mut self, index: usize, color: Color) -> Result<EffectId> {
        let mut grid = self.grid.clone();
        F::set(&mut grid, index, color)?;
        self.apply_grid(grid).await
    }

    /// Changes one LED by position and re-applies the cached grid.
    pub async fn set_position(
        &mut self,
        row: usize,
        column: usize,
        color: Color,
    ) -> Result<EffectId> {
        let mut grid = self.grid.clone();
        F::set_at(&mut grid, row, column, color)?;
        self.apply_grid(grid).await
    }

    pub fn get_index(&self, index: usize) -> Result<Color> {
        F::get(&self.grid, index)
    }

    /// The last grid applied through this device.
    pub fn custom_grid(&self) -> &F::Grid {
        &self.grid
    }

    /// Applies `grid` as a custom effect. The cache only changes once the
    /// effect is active.
    async fn apply_grid(&mut self, grid: F::Grid) -> Result<EffectId> {
        let id = self.set_effect(F::custom(grid.clone())).await?;
        self.grid = grid;
        Ok(id)
    }
}

#[async_trait]
impl<F: Family> Device for ChromaDevice<F> {
    fn current_effect_id(&self) -> Option<EffectId> {
        self.lifecycle.current()
    }

    async fn set_effect_id(&mut self, id: EffectId) -> Result<()> {
        self.lifecycle.set_effect(self.api.as_ref(), id).await
    }

    async fn delete_current_effect(&mut self) -> Result<()> {
        self.lifecycle.delete_current(self.api.as_ref()).await
    }

    async fn clear(&mut self) -> Result<()> {
        self.set_effect(F::none()).await?;
        self.grid = F::Grid::default();
        Ok(())
    }

    async fn set_all(&mut self, color: Color) -> Result<()> {
        self.apply_grid(F::filled(color)).await?;
        Ok(())
    }
}
