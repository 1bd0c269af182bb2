//! Turns a jittery hand-tracking stream into discrete navigation events and a
//! continuous pull displacement.
//!
//! Horizontal motion is compared against a trailing anchor that follows the
//! hand slowly, so only fast or large moves cross the swipe threshold. A
//! crossing re-centers the anchor on the hand and starts a cooldown during
//! which no further swipes fire. Vertical motion is measured from a snapshot
//! anchor taken when the hand closes, and only while it stays closed.

use crate::config::Tuning;
use orbit_input::{Classification, GestureSample};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnchorState {
    pub anchor_x: Option<f64>,
    pub anchor_y: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Advance,
    Retreat,
    GrabStarted,
    /// Downward travel since the grab, clamped at zero and scaled to display units.
    Pull { displacement: f64 },
    /// Rising edge of the pull threshold.
    PullThresholdCrossed,
    GrabReleased,
}

#[derive(Debug, Clone)]
pub struct GestureSignalFilter {
    swipe_threshold: f64,
    anchor_follow: f64,
    swipe_cooldown: Duration,
    pull_threshold: f64,
    pull_gain: f64,
    anchor: AnchorState,
    classification: Classification,
    swipe_cooldown_until: Option<Duration>,
    past_pull_threshold: bool,
    last_timestamp: Option<Duration>,
}

impl GestureSignalFilter {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            swipe_threshold: tuning.swipe_threshold,
            anchor_follow: tuning.anchor_follow,
            swipe_cooldown: tuning.swipe_cooldown,
            pull_threshold: tuning.pull_threshold,
            pull_gain: tuning.gesture_pull_gain,
            anchor: AnchorState::default(),
            classification: Classification::Unknown,
            swipe_cooldown_until: None,
            past_pull_threshold: false,
            last_timestamp: None,
        }
    }

    pub fn anchor(&self) -> AnchorState {
        self.anchor
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_swipe_cooling_down(&self, now: Duration) -> bool {
        self.swipe_cooldown_until.is_some_and(|until| now < until)
    }

    /// Feeds one sample. Samples older than the previous one are dropped.
    pub fn process(&mut self, sample: &GestureSample, now: Duration) -> Vec<GestureEvent> {
        if let Some(last) = self.last_timestamp
            && sample.timestamp < last
        {
            log::trace!(
                "Ignoring gesture sample at {:?}, earlier than last {:?}",
                sample.timestamp,
                last
            );
            return Vec::new();
        }
        self.last_timestamp = Some(sample.timestamp);

        let mut events = Vec::new();
        self.track_classification(sample, &mut events);
        self.track_horizontal(sample, now, &mut events);
        self.track_vertical(sample, &mut events);
        events
    }

    /// Forgets both anchors and the current classification, as on tracking
    /// start or stop. Returns whether a grab was in progress.
    pub fn reset(&mut self) -> bool {
        let was_grabbing = self.classification.is_closed();
        self.anchor = AnchorState::default();
        self.classification = Classification::Unknown;
        self.past_pull_threshold = false;
        self.last_timestamp = None;
        was_grabbing
    }

    fn track_classification(&mut self, sample: &GestureSample, events: &mut Vec<GestureEvent>) {
        let previous = std::mem::replace(&mut self.classification, sample.classification);
        if previous == sample.classification {
            return;
        }

        self.anchor.anchor_x = Some(sample.hand_x);
        self.past_pull_threshold = false;

        if sample.classification.is_closed() {
            self.anchor.anchor_y = Some(sample.hand_y);
            events.push(GestureEvent::GrabStarted);
        } else if previous.is_closed() {
            self.anchor.anchor_y = None;
            events.push(GestureEvent::GrabReleased);
        }
    }

    fn track_horizontal(
        &mut self,
        sample: &GestureSample,
        now: Duration,
        events: &mut Vec<GestureEvent>,
    ) {
        let Some(anchor) = self.anchor.anchor_x else {
            self.anchor.anchor_x = Some(sample.hand_x);
            return;
        };

        let delta = sample.hand_x - anchor;
        let crossed = delta.abs() > self.swipe_threshold;

        if crossed && !self.classification.is_closed() && !self.is_swipe_cooling_down(now) {
            let event = if delta > 0.0 {
                GestureEvent::Advance
            } else {
                GestureEvent::Retreat
            };
            log::debug!("Swipe {:?}: delta {:.3} from anchor {:.3}", event, delta, anchor);
            events.push(event);
            self.anchor.anchor_x = Some(sample.hand_x);
            self.swipe_cooldown_until = Some(now + self.swipe_cooldown);
        } else {
            self.anchor.anchor_x = Some(anchor + delta * self.anchor_follow);
        }
    }

    fn track_vertical(&mut self, sample: &GestureSample, events: &mut Vec<GestureEvent>) {
        if !self.classification.is_closed() {
            return;
        }
        let Some(anchor) = self.anchor.anchor_y else {
            return;
        };

        let delta = sample.hand_y - anchor;
        events.push(GestureEvent::Pull {
            displacement: delta.max(0.0) * self.pull_gain,
        });

        if delta > self.pull_threshold {
            if !self.past_pull_threshold {
                self.past_pull_threshold = true;
                events.push(GestureEvent::PullThresholdCrossed);
            }
        } else {
            self.past_pull_threshold = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn sample(x: f64, y: f64, classification: Classification, at: u64) -> GestureSample {
        GestureSample::new(x, y, classification, ms(at))
    }

    fn swipes(events: &[GestureEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GestureEvent::Advance | GestureEvent::Retreat))
            .count()
    }

    #[test]
    fn test_tremor_never_swipes() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        let mut total = 0;
        for i in 0..300u64 {
            let jitter = if i % 2 == 0 { 0.08 } else { -0.08 };
            let s = sample(0.5 + jitter, 0.5, Classification::Open, i * 33);
            total += swipes(&filter.process(&s, ms(i * 33)));
        }
        assert_eq!(total, 0);
    }

    #[test]
    fn test_slow_drift_is_absorbed() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        let mut total = 0;
        for i in 0..100u64 {
            let s = sample(0.1 + i as f64 * 0.008, 0.5, Classification::Open, i * 33);
            total += swipes(&filter.process(&s, ms(i * 33)));
        }
        assert_eq!(total, 0);
    }

    #[test]
    fn test_one_swipe_per_crossing_with_cooldown() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        filter.process(&sample(0.2, 0.5, Classification::Open, 0), ms(0));

        let events = filter.process(&sample(0.5, 0.5, Classification::Open, 33), ms(33));
        assert_eq!(events, vec![GestureEvent::Advance]);
        assert_eq!(filter.anchor().anchor_x, Some(0.5));

        // still moving right, inside the cooldown
        let events = filter.process(&sample(0.8, 0.5, Classification::Open, 133), ms(133));
        assert!(events.is_empty());

        let events = filter.process(&sample(0.9, 0.5, Classification::Open, 540), ms(540));
        assert_eq!(events, vec![GestureEvent::Advance]);
    }

    #[test]
    fn test_leftward_crossing_retreats() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        filter.process(&sample(0.7, 0.5, Classification::Open, 0), ms(0));
        let events = filter.process(&sample(0.4, 0.5, Classification::Open, 33), ms(33));
        assert_eq!(events, vec![GestureEvent::Retreat]);
    }

    #[test]
    fn test_closed_hand_does_not_swipe() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        filter.process(&sample(0.2, 0.5, Classification::Closed, 0), ms(0));
        let events = filter.process(&sample(0.6, 0.5, Classification::Closed, 33), ms(33));
        assert_eq!(swipes(&events), 0);
    }

    #[test]
    fn test_pull_measured_from_grab_snapshot() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        filter.process(&sample(0.5, 0.3, Classification::Open, 0), ms(0));

        let events = filter.process(&sample(0.5, 0.4, Classification::Closed, 33), ms(33));
        assert_eq!(
            events,
            vec![
                GestureEvent::GrabStarted,
                GestureEvent::Pull { displacement: 0.0 }
            ]
        );
        assert_eq!(filter.anchor().anchor_y, Some(0.4));

        // upward travel clamps to zero
        let events = filter.process(&sample(0.5, 0.3, Classification::Closed, 66), ms(66));
        assert_eq!(events, vec![GestureEvent::Pull { displacement: 0.0 }]);

        let events = filter.process(&sample(0.5, 0.6, Classification::Closed, 99), ms(99));
        assert!(matches!(events[0], GestureEvent::Pull { displacement } if (displacement - 100.0).abs() < 1e-6));
        assert_eq!(events[1], GestureEvent::PullThresholdCrossed);

        // staying past the threshold does not cross again
        let events = filter.process(&sample(0.5, 0.65, Classification::Closed, 132), ms(132));
        assert!(!events.contains(&GestureEvent::PullThresholdCrossed));

        let events = filter.process(&sample(0.5, 0.65, Classification::Open, 165), ms(165));
        assert_eq!(events, vec![GestureEvent::GrabReleased]);
        assert_eq!(filter.anchor().anchor_y, None);
    }

    #[test]
    fn test_out_of_order_samples_are_dropped() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        filter.process(&sample(0.2, 0.5, Classification::Open, 100), ms(100));
        let events = filter.process(&sample(0.9, 0.5, Classification::Open, 50), ms(101));
        assert!(events.is_empty());
    }

    #[test]
    fn test_reset_forgets_anchors() {
        let mut filter = GestureSignalFilter::new(&Tuning::default());
        filter.process(&sample(0.5, 0.4, Classification::Closed, 0), ms(0));
        assert!(filter.reset());
        assert_eq!(filter.anchor(), AnchorState::default());
        assert_eq!(filter.classification(), Classification::Unknown);
    }
}
