use bevy::prelude::*;

use crate::math::{Float, Vector3};
use crate::{
    TumbleCheckpointSnapshot, TumbleContactClass, TumbleGravity, TumbleGravityCandidate,
    TumbleGravityError,
};

/// Something that happened to the actor, to be applied on its next motion tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TumbleEvent {
    /// A gravity source offers its field.
    Gravity(TumbleGravityCandidate),
    /// A contact with a surface has started.
    ContactBegan(TumbleContactClass),
    /// A contact with a surface is still going on.
    ContactPersisted(TumbleContactClass),
    /// A contact with a surface has ended. Must carry the class the contact began with.
    ContactEnded(TumbleContactClass),
    /// The actor entered a checkpoint volume.
    CheckpointEntered(TumbleCheckpointSnapshot),
    /// The actor entered a reset volume.
    ResetEntered,
}

/// Events waiting to be applied to the actor.
///
/// bevy-tumble fills this from the contacts the physics backend reports, and drains it once per
/// motion tick during [`TumblePipelineSystems::Events`](crate::TumblePipelineSystems::Events), in
/// a fixed order: gravity first, then contacts, then checkpoints and resets in the order they
/// arrived. Game code may push events too - e.g. to apply gravity from a scripted sequence.
#[derive(Component, Default, Debug)]
pub struct TumbleEventQueue(Vec<TumbleEvent>);

impl TumbleEventQueue {
    pub fn push(&mut self, event: TumbleEvent) {
        self.0.push(event);
    }

    /// Apply a gravity field, as if a gravity source with priority `0` at distance `0` offered it.
    pub fn apply_gravity(&mut self, gravity: TumbleGravity) {
        self.push(TumbleEvent::Gravity(TumbleGravityCandidate {
            field: gravity,
            priority: 0,
            distance: 0.0,
        }));
    }

    /// Like [`apply_gravity`](Self::apply_gravity), from a raw direction and strength.
    ///
    /// Invalid values are rejected and leave the queue untouched.
    pub fn set_gravity(
        &mut self,
        direction: Vector3,
        strength: Float,
    ) -> Result<(), TumbleGravityError> {
        match TumbleGravity::new(direction, strength) {
            Ok(gravity) => {
                self.apply_gravity(gravity);
                Ok(())
            }
            Err(err) => {
                warn!("Rejected gravity: {err}");
                Err(err)
            }
        }
    }

    /// Report an ongoing contact with a surface.
    ///
    /// A contact is also considered persisted on the tick it begins, so there is no need to call
    /// this together with [`ground_contact_began`](Self::ground_contact_began).
    ///
    /// Use [`TumbleSurfaceRules::classify`](crate::TumbleSurfaceRules::classify) to get the class
    /// of a surface.
    pub fn ground_contact(&mut self, class: TumbleContactClass) {
        self.push(TumbleEvent::ContactPersisted(class));
    }

    pub fn ground_contact_began(&mut self, class: TumbleContactClass) {
        self.push(TumbleEvent::ContactBegan(class));
    }

    pub fn ground_contact_end(&mut self, class: TumbleContactClass) {
        self.push(TumbleEvent::ContactEnded(class));
    }

    pub fn checkpoint_enter(&mut self, snapshot: TumbleCheckpointSnapshot) {
        self.push(TumbleEvent::CheckpointEntered(snapshot));
    }

    pub fn reset_enter(&mut self) {
        self.push(TumbleEvent::ResetEntered);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take all the events, sorted into the order they should be applied in.
    pub fn take_sorted(&mut self) -> TumbleSortedEvents {
        let mut sorted = TumbleSortedEvents::default();
        for event in self.0.drain(..) {
            match event {
                TumbleEvent::Gravity(candidate) => sorted.gravity.push(candidate),
                TumbleEvent::ContactBegan(_)
                | TumbleEvent::ContactPersisted(_)
                | TumbleEvent::ContactEnded(_) => sorted.contacts.push(event),
                TumbleEvent::CheckpointEntered(_) | TumbleEvent::ResetEntered => {
                    sorted.checkpoints.push(event)
                }
            }
        }
        sorted
    }
}

/// The events of a single tick, grouped by the stage that applies them.
#[derive(Default, Debug)]
pub struct TumbleSortedEvents {
    pub gravity: Vec<TumbleGravityCandidate>,
    pub contacts: Vec<TumbleEvent>,
    pub checkpoints: Vec<TumbleEvent>,
}
