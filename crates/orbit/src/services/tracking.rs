use orbit_input::GestureSample;
use std::collections::VecDeque;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackingError {
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("No camera available")]
    NoCamera,
    #[error("Hand tracker failed: {0}")]
    Provider(String),
}

/// A camera hand tracker producing normalized hand positions and an
/// openness label while tracking.
pub trait HandTrackingProvider {
    fn start(&mut self) -> impl Future<Output = Result<(), TrackingError>> + Send;

    fn stop(&mut self);

    fn is_tracking(&self) -> bool;

    /// The latest reading, if the tracker has one for this frame.
    fn current_sample(&mut self) -> Option<GestureSample>;
}

/// Plays back a fixed list of samples, one per frame, then stops tracking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTracker {
    samples: VecDeque<GestureSample>,
    tracking: bool,
}

impl ScriptedTracker {
    pub fn new(samples: impl IntoIterator<Item = GestureSample>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            tracking: false,
        }
    }
}

impl HandTrackingProvider for ScriptedTracker {
    async fn start(&mut self) -> Result<(), TrackingError> {
        self.tracking = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.tracking = false;
    }

    fn is_tracking(&self) -> bool {
        self.tracking && !self.samples.is_empty()
    }

    fn current_sample(&mut self) -> Option<GestureSample> {
        if !self.tracking {
            return None;
        }
        self.samples.pop_front()
    }
}

/// A tracker that can never start, as when the camera is missing or denied.
#[derive(Debug, Clone)]
pub struct UnavailableTracker {
    reason: TrackingError,
}

impl UnavailableTracker {
    pub fn new(reason: TrackingError) -> Self {
        Self { reason }
    }
}

impl HandTrackingProvider for UnavailableTracker {
    async fn start(&mut self) -> Result<(), TrackingError> {
        Err(self.reason.clone())
    }

    fn stop(&mut self) {}

    fn is_tracking(&self) -> bool {
        false
    }

    fn current_sample(&mut self) -> Option<GestureSample> {
        None
    }
}
