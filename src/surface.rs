use std::ops::{BitOr, BitOrAssign};

use bevy::prelude::*;

/// A set of surface categories, stored as a bitmask.
///
/// The game decides what each of the 32 categories mean (e.g. "ground", "ice", "spikes"). Define
/// them once as constants and put them on colliders with [`TumbleSurface`]:
///
/// ```
/// # use bevy_tumble::TumbleSurfaceCategories;
/// const GROUND: TumbleSurfaceCategories = TumbleSurfaceCategories::category(0);
/// const SLIPPERY: TumbleSurfaceCategories = TumbleSurfaceCategories::category(1);
///
/// let icy_ground = GROUND | SLIPPERY;
/// assert!(icy_ground.intersects(SLIPPERY));
/// assert!(!GROUND.intersects(SLIPPERY));
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleSurfaceCategories(u32);

impl TumbleSurfaceCategories {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// A set with a single category. There are only 32 categories - a higher `index` gives an
    /// empty set.
    pub const fn category(index: u32) -> Self {
        match 1u32.checked_shl(index) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TumbleSurfaceCategories {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TumbleSurfaceCategories {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The categories of a collider the actor may touch.
///
/// Colliders without this component belong to no category.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TumbleSurface(pub TumbleSurfaceCategories);

/// How the actor reacts to the categories of the surfaces it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleSurfaceRules {
    /// Touching any of these counts as standing on the ground.
    pub ground: TumbleSurfaceCategories,
    /// While touching any of these, jump charges are not replenished.
    pub disallow_regen: TumbleSurfaceCategories,
    /// Cancels [`disallow_regen`](Self::disallow_regen) for surfaces that also belong to one of
    /// these categories.
    pub allow_regen: TumbleSurfaceCategories,
}

impl Default for TumbleSurfaceRules {
    fn default() -> Self {
        Self {
            ground: TumbleSurfaceCategories::category(0),
            disallow_regen: TumbleSurfaceCategories::NONE,
            allow_regen: TumbleSurfaceCategories::NONE,
        }
    }
}

impl TumbleSurfaceRules {
    pub fn is_ground(&self, surface: TumbleSurfaceCategories) -> bool {
        surface.intersects(self.ground)
    }

    pub fn blocks_regen(&self, surface: TumbleSurfaceCategories) -> bool {
        surface.intersects(self.disallow_regen) && !surface.intersects(self.allow_regen)
    }

    pub fn classify(&self, surface: TumbleSurfaceCategories) -> TumbleContactClass {
        TumbleContactClass {
            ground: self.is_ground(surface),
            blocks_regen: self.blocks_regen(surface),
        }
    }
}

/// What a contact counts as. Decided once, when the contact begins, so that changing the
/// [`TumbleSurfaceRules`] while a contact is open does not unbalance its end.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TumbleContactClass {
    pub ground: bool,
    pub blocks_regen: bool,
}

impl TumbleContactClass {
    pub const GROUND: Self = Self {
        ground: true,
        blocks_regen: false,
    };
}
