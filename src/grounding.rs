use crate::math::Float;
use crate::{TumbleContactClass, TumbleGroundingStrategy};

/// The result of [`TumbleGroundingTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TumbleGroundingUpdate {
    /// Nothing of interest happened this update.
    NoChange,
    /// The actor was airborne and is now grounded.
    Landed,
    /// The actor was grounded and is now airborne.
    LeftGround,
}

/// Decides whether the actor stands on the ground, based on the contacts it reports.
///
/// Contacts are fed through [`contact_began`](Self::contact_began),
/// [`contact_persisted`](Self::contact_persisted) and [`contact_ended`](Self::contact_ended) as
/// they arrive, and [`update`](Self::update) is called once per tick afterwards to settle the
/// grounded state for that tick.
///
/// Independently of the grounding strategy, it also counts the open contacts with surfaces that
/// veto jump replenishment (see
/// [`TumbleSurfaceRules::disallow_regen`](crate::TumbleSurfaceRules::disallow_regen)).
#[derive(Debug, Default, Clone)]
pub struct TumbleGroundingTracker {
    ground_contacts: u32,
    regen_blocking_contacts: u32,
    touched_ground_since_update: bool,
    window_remaining: Float,
    grounded: bool,
}

impl TumbleGroundingTracker {
    pub fn contact_began(&mut self, class: TumbleContactClass) {
        if class.ground {
            self.ground_contacts += 1;
            self.touched_ground_since_update = true;
        }
        if class.blocks_regen {
            self.regen_blocking_contacts += 1;
        }
    }

    pub fn contact_persisted(&mut self, class: TumbleContactClass) {
        if class.ground {
            self.touched_ground_since_update = true;
        }
    }

    /// Close a contact, with the class it was begun with. Ending a contact that was never begun
    /// is ignored.
    pub fn contact_ended(&mut self, class: TumbleContactClass) {
        if class.ground {
            self.ground_contacts = self.ground_contacts.saturating_sub(1);
        }
        if class.blocks_regen {
            self.regen_blocking_contacts = self.regen_blocking_contacts.saturating_sub(1);
        }
    }

    /// Settle the grounded state for this tick.
    ///
    /// `ground_probe` is the distance to the ground along gravity as reported by the proximity
    /// sensor - only [`TumbleGroundingStrategy::Raycast`] uses it.
    pub fn update(
        &mut self,
        frame_duration: Float,
        strategy: &TumbleGroundingStrategy,
        ground_probe: Option<Float>,
    ) -> TumbleGroundingUpdate {
        let touched = std::mem::take(&mut self.touched_ground_since_update);
        let grounded = match strategy {
            TumbleGroundingStrategy::ContactWindow { window } => {
                if touched {
                    self.window_remaining = *window;
                    true
                } else {
                    self.window_remaining = (self.window_remaining - frame_duration).max(0.0);
                    0.0 < self.window_remaining
                }
            }
            TumbleGroundingStrategy::ContactCount => 0 < self.ground_contacts,
            TumbleGroundingStrategy::Raycast { distance } => {
                ground_probe.is_some_and(|proximity| proximity <= *distance)
            }
        };
        match (self.grounded, grounded) {
            (false, true) => {
                self.grounded = true;
                TumbleGroundingUpdate::Landed
            }
            (true, false) => {
                self.grounded = false;
                TumbleGroundingUpdate::LeftGround
            }
            _ => TumbleGroundingUpdate::NoChange,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn ground_contact_count(&self) -> u32 {
        self.ground_contacts
    }

    pub fn regen_blocking_contact_count(&self) -> u32 {
        self.regen_blocking_contacts
    }

    /// Whether jump charges may not be replenished right now because of a vetoing surface.
    pub fn regen_blocked(&self) -> bool {
        0 < self.regen_blocking_contacts
    }
}
