//! Collaborators the engine talks to but does not own: navigation, audio and
//! visual cues, and the hand tracker.

pub mod tracking;

use orbit_input::ActivationTarget;
use parking_lot::Mutex;
use std::sync::Arc;
use strum::Display as StrumDisplay;

pub use tracking::{HandTrackingProvider, ScriptedTracker, TrackingError, UnavailableTracker};

pub trait NavigationService {
    fn go(&mut self, target: &ActivationTarget);
}

/// Fire-and-forget cues. The engine never waits on or inspects them.
pub trait FeedbackService {
    fn on_grab(&mut self);
    fn on_swipe(&mut self);
    fn on_drop(&mut self);
    fn on_rejected(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Cue {
    Grab,
    Swipe,
    Drop,
    Rejected,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl NavigationService for LogNavigator {
    fn go(&mut self, target: &ActivationTarget) {
        log::info!("Navigate to {}", target);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl FeedbackService for LogFeedback {
    fn on_grab(&mut self) {
        log::info!("cue: {}", Cue::Grab);
    }

    fn on_swipe(&mut self) {
        log::info!("cue: {}", Cue::Swipe);
    }

    fn on_drop(&mut self) {
        log::info!("cue: {}", Cue::Drop);
    }

    fn on_rejected(&mut self) {
        log::info!("cue: {}", Cue::Rejected);
    }
}

/// Records every navigation. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visits: Arc<Mutex<Vec<ActivationTarget>>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<ActivationTarget> {
        self.visits.lock().clone()
    }
}

impl NavigationService for RecordingNavigator {
    fn go(&mut self, target: &ActivationTarget) {
        self.visits.lock().push(target.clone());
    }
}

/// Records every cue. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    cues: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingFeedback {
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().clone()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues.lock().iter().filter(|&&c| c == cue).count()
    }

    fn push(&self, cue: Cue) {
        self.cues.lock().push(cue);
    }
}

impl FeedbackService for RecordingFeedback {
    fn on_grab(&mut self) {
        self.push(Cue::Grab);
    }

    fn on_swipe(&mut self) {
        self.push(Cue::Swipe);
    }

    fn on_drop(&mut self) {
        self.push(Cue::Drop);
    }

    fn on_rejected(&mut self) {
        self.push(Cue::Rejected);
    }
}
