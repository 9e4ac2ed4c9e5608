use bevy::prelude::*;

use crate::math::Float;

/// Whether the level is being played.
///
/// Both the motion tick and the camera only run while [`is_running`](Self::is_running). The menus
/// and the simulation share this resource instead of reaching into each other.
///
/// If the resource is missing, bevy-tumble considers the session to be running.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct TumbleSession {
    paused: bool,
    level_complete: bool,
    elapsed: Float,
}

impl TumbleSession {
    pub fn is_running(&self) -> bool {
        !self.paused && !self.level_complete
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_level_complete(&self) -> bool {
        self.level_complete
    }

    /// Time, in seconds, spent playing the level (paused time excluded).
    pub fn elapsed(&self) -> Float {
        self.elapsed
    }

    /// Pause or unpause. Returns whether the session is now paused.
    ///
    /// Once the level is complete the pause state can no longer change.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.level_complete {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// Stop the run and return the final time. Completing an already completed level returns the
    /// same time again.
    pub fn complete_level(&mut self) -> Float {
        if !self.level_complete {
            self.level_complete = true;
            self.paused = false;
            info!("Level complete in {:.2}s", self.elapsed);
        }
        self.elapsed
    }

    /// Start over: unpaused, not complete, timer at zero.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn advance(&mut self, frame_duration: Float) {
        if self.is_running() {
            self.elapsed += frame_duration;
        }
    }
}

/// Run condition for the systems gated by the session.
pub fn tumble_session_is_running(session: Option<Res<TumbleSession>>) -> bool {
    session.is_none_or(|session| session.is_running())
}
