use crate::carousel::CarouselEngine;
use crate::events::EngineInput;
use crate::services::HandTrackingProvider;
use async_channel::{Receiver, Sender};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Starts `provider` and forwards one sample per frame until tracking ends or
/// the receiver goes away. A provider that fails to start leaves the engine in
/// pointer-only mode: the failure is logged and nothing is sent.
pub async fn pump_tracking<P: HandTrackingProvider>(
    mut provider: P,
    tx: Sender<EngineInput>,
    frame_interval: Duration,
) {
    if let Err(e) = provider.start().await {
        log::warn!("Hand tracking unavailable, continuing pointer-only: {}", e);
        return;
    }

    if tx.send(EngineInput::TrackingStarted).await.is_err() {
        provider.stop();
        return;
    }

    let mut interval = tokio::time::interval(frame_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while provider.is_tracking() {
        interval.tick().await;
        let Some(sample) = provider.current_sample() else {
            continue;
        };
        if tx.send(EngineInput::Gesture(sample)).await.is_err() {
            break;
        }
    }

    provider.stop();
    let _ = tx.send(EngineInput::TrackingStopped).await;
}

/// Applies inputs in arrival order until every sender is dropped. Returns the
/// number of inputs applied.
pub async fn drive(engine: &mut CarouselEngine, rx: Receiver<EngineInput>) -> usize {
    let mut applied = 0;
    while let Ok(input) = rx.recv().await {
        engine.apply(input);
        applied += 1;
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{ScriptedTracker, TrackingError, UnavailableTracker};
    use orbit_input::{Classification, GestureSample};

    fn sample(x: f64, at: u64) -> GestureSample {
        GestureSample::new(x, 0.5, Classification::Open, Duration::from_millis(at))
    }

    #[tokio::test]
    async fn test_pump_brackets_samples_with_tracking_events() {
        let (tx, rx) = async_channel::bounded(16);
        let tracker = ScriptedTracker::new([sample(0.2, 0), sample(0.3, 33), sample(0.4, 66)]);

        pump_tracking(tracker, tx, Duration::from_millis(1)).await;

        let mut received = Vec::new();
        while let Ok(input) = rx.try_recv() {
            received.push(input);
        }
        assert_eq!(received.len(), 5);
        assert_eq!(received[0], EngineInput::TrackingStarted);
        assert_eq!(received[3], EngineInput::Gesture(sample(0.4, 66)));
        assert_eq!(received[4], EngineInput::TrackingStopped);
    }

    #[tokio::test]
    async fn test_unavailable_tracker_degrades_silently() {
        let (tx, rx) = async_channel::bounded(16);
        let tracker = UnavailableTracker::new(TrackingError::PermissionDenied);

        pump_tracking(tracker, tx, Duration::from_millis(1)).await;

        assert!(rx.try_recv().is_err());
        assert!(rx.is_closed());
    }
}
