use bevy::prelude::*;

use crate::math::{Float, Vector3};

/// Thrown when constructing a [`TumbleGravity`] from values that cannot describe a gravity field.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum TumbleGravityError {
    #[error("gravity direction {0} has no usable direction")]
    DegenerateDirection(Vector3),
    #[error("gravity strength {0} must be finite and non-negative")]
    InvalidStrength(Float),
}

/// The gravity currently affecting an actor.
///
/// This is the single "current" field of the actor. Gravity sources, checkpoint transfers, and
/// game code replace it wholesale with [`set`](Self::set) - the direction and strength always
/// change together.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleGravity {
    direction: Vector3,
    strength: Float,
}

impl Default for TumbleGravity {
    fn default() -> Self {
        Self {
            direction: Vector3::NEG_Y,
            strength: 9.81,
        }
    }
}

impl TumbleGravity {
    /// Create a gravity field. The direction does not need to be normalized.
    pub fn new(direction: Vector3, strength: Float) -> Result<Self, TumbleGravityError> {
        let Some(normalized) = direction.try_normalize() else {
            return Err(TumbleGravityError::DegenerateDirection(direction));
        };
        if !strength.is_finite() || strength < 0.0 {
            return Err(TumbleGravityError::InvalidStrength(strength));
        }
        Ok(Self {
            direction: normalized,
            strength,
        })
    }

    /// Unit vector pointing "down".
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn strength(&self) -> Float {
        self.strength
    }

    /// Unit vector pointing "up" - the opposite of [`direction`](Self::direction).
    pub fn up(&self) -> Vector3 {
        -self.direction
    }

    /// The acceleration gravity applies on the actor.
    pub fn acceleration(&self) -> Vector3 {
        self.direction * self.strength
    }

    /// Replace this field with another one. Setting the same field again changes nothing.
    pub fn set(&mut self, other: TumbleGravity) {
        *self = other;
    }
}

/// When, during an overlap with a gravity source, the source applies its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumbleGravityTrigger {
    /// Only when the actor enters the volume.
    OnEnter,
    /// Every tick the actor is inside the volume (including the tick it entered).
    WhileInside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TumbleGravityShape {
    /// The same direction everywhere inside the volume.
    Uniform { direction: Vector3 },
    /// Pull toward the center of the source entity. When `inverted`, push away from it instead.
    Radial { inverted: bool },
}

/// A trigger volume that redirects the gravity of actors overlapping it.
///
/// Put this on a sensor collider. The source position (for [radial](TumbleGravityShape::Radial)
/// sources and for conflict resolution) is taken from the entity's `GlobalTransform`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TumbleGravitySource {
    pub shape: TumbleGravityShape,
    pub strength: Float,
    /// When an actor touches several sources in the same tick, the highest priority wins.
    pub priority: i32,
}

impl TumbleGravitySource {
    pub fn uniform(direction: Vector3, strength: Float) -> Self {
        Self {
            shape: TumbleGravityShape::Uniform { direction },
            strength,
            priority: 0,
        }
    }

    pub fn radial(strength: Float) -> Self {
        Self {
            shape: TumbleGravityShape::Radial { inverted: false },
            strength,
            priority: 0,
        }
    }

    pub fn inverted_radial(strength: Float) -> Self {
        Self {
            shape: TumbleGravityShape::Radial { inverted: true },
            strength,
            priority: 0,
        }
    }

    pub fn with_priority(self, priority: i32) -> Self {
        Self { priority, ..self }
    }

    pub fn trigger(&self) -> TumbleGravityTrigger {
        match self.shape {
            TumbleGravityShape::Uniform { .. } => TumbleGravityTrigger::OnEnter,
            TumbleGravityShape::Radial { .. } => TumbleGravityTrigger::WhileInside,
        }
    }

    /// The field this source produces for an actor at `actor_position`.
    ///
    /// Returns `None` when the field is undefined there - a radial source evaluated exactly at its
    /// center, or a source configured with a zero direction or invalid strength.
    pub fn field_at(&self, source_position: Vector3, actor_position: Vector3) -> Option<TumbleGravity> {
        let direction = match self.shape {
            TumbleGravityShape::Uniform { direction } => direction,
            TumbleGravityShape::Radial { inverted } => {
                let toward_center = source_position - actor_position;
                if inverted {
                    -toward_center
                } else {
                    toward_center
                }
            }
        };
        TumbleGravity::new(direction, self.strength).ok()
    }
}

/// A gravity field offered by a source during one tick, competing with the other sources the
/// actor touched during that tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TumbleGravityCandidate {
    pub field: TumbleGravity,
    pub priority: i32,
    /// Distance between the actor and the source.
    pub distance: Float,
}

impl TumbleGravityCandidate {
    /// Pick the field to apply out of all the candidates offered in a single tick.
    ///
    /// Highest priority wins, then the closest source. On a complete tie the candidate delivered
    /// last wins.
    pub fn resolve(candidates: impl IntoIterator<Item = Self>) -> Option<TumbleGravity> {
        candidates
            .into_iter()
            .fold(None::<Self>, |best, candidate| match best {
                Some(best)
                    if best.priority > candidate.priority
                        || (best.priority == candidate.priority
                            && best.distance < candidate.distance) =>
                {
                    Some(best)
                }
                _ => Some(candidate),
            })
            .map(|winner| winner.field)
    }
}
