//! The single consumer of pointer events and hand-tracking samples.
//!
//! Every input is applied synchronously and completely before the next one,
//! and every write to rotation, pull, anchors or selection goes through the
//! owning controller.

use crate::carousel::arbiter::{InputArbiter, InputSource};
use crate::carousel::filter::{AnchorState, GestureEvent, GestureSignalFilter};
use crate::carousel::model::{CarouselError, CarouselItem};
use crate::carousel::pointer::{PointerInputAdapter, PointerMotion};
use crate::carousel::pull::{PullPhysicsController, PullState, Resistance};
use crate::carousel::rotation::CarouselRotationController;
use crate::carousel::selection::{Crossing, SelectionPhase, SelectionTrigger};
use crate::config::Tuning;
use crate::events::EngineInput;
use crate::services::{FeedbackService, NavigationService};
use crate::sys::clock::Clock;
use orbit_input::{GestureSample, Point};
use std::time::Duration;

const SETTLE_FRAME: Duration = Duration::from_millis(16);
const SETTLE_FRAME_LIMIT: usize = 1200;

pub struct Collaborators {
    pub clock: Box<dyn Clock>,
    pub navigation: Box<dyn NavigationService>,
    pub feedback: Box<dyn FeedbackService>,
}

impl Collaborators {
    pub fn new(
        clock: impl Clock + 'static,
        navigation: impl NavigationService + 'static,
        feedback: impl FeedbackService + 'static,
    ) -> Self {
        Self {
            clock: Box::new(clock),
            navigation: Box::new(navigation),
            feedback: Box::new(feedback),
        }
    }
}

pub struct CarouselEngine {
    items: Vec<CarouselItem>,
    tuning: Tuning,
    filter: GestureSignalFilter,
    pointer: PointerInputAdapter,
    arbiter: InputArbiter,
    rotation: CarouselRotationController,
    pull: PullPhysicsController,
    selection: SelectionTrigger,
    resistance: Resistance,
    clock: Box<dyn Clock>,
    navigation: Box<dyn NavigationService>,
    feedback: Box<dyn FeedbackService>,
    last_tick: Duration,
    tracking: bool,
}

impl CarouselEngine {
    pub fn new(
        items: Vec<CarouselItem>,
        tuning: Tuning,
        collaborators: Collaborators,
    ) -> Result<Self, CarouselError> {
        let rotation = CarouselRotationController::new(items.len(), tuning.rotation_spring)?;
        let resistance = Resistance::from_tuning(&tuning);
        let last_tick = collaborators.clock.now();

        Ok(Self {
            filter: GestureSignalFilter::new(&tuning),
            pointer: PointerInputAdapter::new(tuning.pointer_rotation_gain, resistance),
            arbiter: InputArbiter::new(),
            rotation,
            pull: PullPhysicsController::new(&tuning),
            selection: SelectionTrigger::new(tuning.selection_cooldown),
            resistance,
            clock: collaborators.clock,
            navigation: collaborators.navigation,
            feedback: collaborators.feedback,
            last_tick,
            tracking: false,
            items,
            tuning,
        })
    }

    pub fn apply(&mut self, input: EngineInput) {
        match input {
            EngineInput::Advance => self.advance(),
            EngineInput::Retreat => self.retreat(),
            EngineInput::PointerDown(p) => self.on_pointer_down(p),
            EngineInput::PointerMove(p) => self.on_pointer_move(p),
            EngineInput::PointerUp(p) => self.on_pointer_up(p),
            EngineInput::Gesture(sample) => self.on_gesture_sample(sample),
            EngineInput::TrackingStarted => self.on_tracking_started(),
            EngineInput::TrackingStopped => self.on_tracking_stopped(),
            EngineInput::Tick => self.tick(),
        }
    }

    pub fn advance(&mut self) {
        self.tick();
        self.rotation.advance();
        self.feedback.on_swipe();
        log::debug!("Advanced to item {}", self.rotation.current_index());
    }

    pub fn retreat(&mut self) {
        self.tick();
        self.rotation.retreat();
        self.feedback.on_swipe();
        log::debug!("Retreated to item {}", self.rotation.current_index());
    }

    pub fn on_pointer_down(&mut self, point: Point) {
        self.tick();
        if !self.arbiter.claim_pointer() {
            return;
        }
        let now = self.clock.now();
        self.pointer.press(
            point,
            self.rotation.rotation_angle(),
            self.rotation.current_index(),
        );
        self.pull.grab();
        self.selection.arm(now);
        self.feedback.on_grab();
    }

    pub fn on_pointer_move(&mut self, point: Point) {
        self.tick();
        if !self.arbiter.admits_pointer() {
            return;
        }
        let selectable = self.focused_item().is_selectable();
        match self.pointer.motion(point, selectable) {
            Some(PointerMotion::Pull { displacement }) => self.pull.set_target(displacement),
            Some(PointerMotion::Rotate { angle }) => {
                self.pull.set_target(0.0);
                self.rotation.drag_to(angle);
            }
            None => {}
        }
    }

    pub fn on_pointer_up(&mut self, point: Point) {
        self.tick();
        let Some(release) = self.pointer.release(point) else {
            return;
        };
        let now = self.clock.now();

        let selected =
            release.crosses(self.tuning.release_threshold) && self.resolve_crossing(now);
        if !selected {
            self.pull.release();
        }
        self.selection.disarm(now);

        if self.rotation.snap_to_nearest() != release.start_index {
            self.feedback.on_swipe();
        }
        self.arbiter.release_pointer();
    }

    pub fn on_gesture_sample(&mut self, sample: GestureSample) {
        self.tick();
        let now = self.clock.now();
        let events = self.filter.process(&sample, now);

        if !self.arbiter.admits_gesture() {
            if !events.is_empty() {
                log::trace!("Pointer drag active; dropping {} gesture events", events.len());
            }
            return;
        }
        for event in events {
            self.apply_gesture(event, now);
        }
    }

    pub fn on_tracking_started(&mut self) {
        self.tick();
        self.filter.reset();
        self.tracking = true;
        log::info!("Hand tracking started");
    }

    /// Forgets the anchors and, unless the pointer is dragging, lets the pull
    /// spring back. Rotation stays where it is.
    pub fn on_tracking_stopped(&mut self) {
        self.tick();
        self.filter.reset();
        self.tracking = false;
        if self.arbiter.source() != InputSource::Pointer {
            let now = self.clock.now();
            self.pull.release();
            self.selection.disarm(now);
            self.arbiter.release_gesture();
        }
        log::info!("Hand tracking stopped");
    }

    /// Advances animations by the clock time elapsed since the previous tick.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        if !dt.is_zero() {
            self.step_animations(dt);
        }
    }

    /// Runs every animation to rest without consulting the clock.
    pub fn settle(&mut self) {
        for _ in 0..SETTLE_FRAME_LIMIT {
            if !self.is_animating() {
                break;
            }
            self.step_animations(SETTLE_FRAME);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.is_animating() || self.pull.is_animating()
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation.rotation_angle()
    }

    pub fn target_angle(&self) -> f64 {
        self.rotation.target_angle()
    }

    pub fn angle_step(&self) -> f64 {
        self.rotation.angle_step()
    }

    pub fn current_index(&self) -> usize {
        self.rotation.current_index()
    }

    pub fn item_angle(&self, index: usize) -> f64 {
        self.rotation.item_angle(index)
    }

    pub fn pull_distance(&self) -> f64 {
        self.pull.pull_distance()
    }

    pub fn pull_state(&self) -> PullState {
        self.pull.state()
    }

    pub fn is_grabbing(&self) -> bool {
        self.pull.is_grabbing()
    }

    pub fn input_source(&self) -> InputSource {
        self.arbiter.source()
    }

    pub fn anchor(&self) -> AnchorState {
        self.filter.anchor()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn selection_phase(&self) -> SelectionPhase {
        self.selection.phase(self.clock.now())
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    pub fn focused_item(&self) -> &CarouselItem {
        &self.items[self.rotation.current_index()]
    }

    fn apply_gesture(&mut self, event: GestureEvent, now: Duration) {
        match event {
            GestureEvent::Advance => {
                self.rotation.advance();
                self.feedback.on_swipe();
                log::debug!("Hand swipe advanced to item {}", self.rotation.current_index());
            }
            GestureEvent::Retreat => {
                self.rotation.retreat();
                self.feedback.on_swipe();
                log::debug!("Hand swipe retreated to item {}", self.rotation.current_index());
            }
            GestureEvent::GrabStarted => {
                if self.arbiter.claim_gesture() {
                    self.pull.grab();
                    self.selection.arm(now);
                    self.feedback.on_grab();
                }
            }
            GestureEvent::Pull { displacement } => {
                if self.arbiter.source() == InputSource::Gesture {
                    let displacement = if self.focused_item().is_selectable() {
                        displacement
                    } else {
                        self.resistance.apply(displacement)
                    };
                    self.pull.set_target(displacement);
                }
            }
            GestureEvent::PullThresholdCrossed => {
                if self.arbiter.source() == InputSource::Gesture {
                    self.resolve_crossing(now);
                }
            }
            GestureEvent::GrabReleased => {
                if self.arbiter.source() == InputSource::Gesture {
                    self.pull.release();
                    self.selection.disarm(now);
                    self.arbiter.release_gesture();
                }
            }
        }
    }

    /// Returns `true` if the focused item was selected.
    fn resolve_crossing(&mut self, now: Duration) -> bool {
        let item = &self.items[self.rotation.current_index()];
        match self.selection.on_threshold_crossed(item, now) {
            Crossing::Fired(target) => {
                log::info!("Selected '{}' ({})", item.title, item.id);
                self.pull.drop_off();
                self.feedback.on_drop();
                self.navigation.go(&target);
                true
            }
            Crossing::Rejected => {
                log::info!("'{}' is locked; selection rejected", item.title);
                self.feedback.on_rejected();
                false
            }
            Crossing::Ignored => false,
        }
    }

    fn step_animations(&mut self, dt: Duration) {
        self.rotation.step(dt);
        if self.pull.step(dt) {
            log::debug!("Drop-off finished");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Cue, RecordingFeedback, RecordingNavigator};
    use crate::sys::clock::ManualClock;

    fn engine() -> (CarouselEngine, RecordingFeedback) {
        let feedback = RecordingFeedback::default();
        let items = vec![
            CarouselItem::selectable("a".into(), "A".into(), "/a".into()),
            CarouselItem::locked("b".into(), "B".into()),
            CarouselItem::selectable("c".into(), "C".into(), "/c".into()),
        ];
        let engine = CarouselEngine::new(
            items,
            Tuning::default(),
            Collaborators::new(
                ManualClock::new(),
                RecordingNavigator::default(),
                feedback.clone(),
            ),
        )
        .unwrap();
        (engine, feedback)
    }

    #[test]
    fn test_empty_item_list_is_rejected() {
        let result = CarouselEngine::new(
            Vec::new(),
            Tuning::default(),
            Collaborators::new(
                ManualClock::new(),
                RecordingNavigator::default(),
                RecordingFeedback::default(),
            ),
        );
        assert!(matches!(result, Err(CarouselError::Empty)));
    }

    #[test]
    fn test_apply_dispatches_inputs() {
        let (mut engine, feedback) = engine();
        engine.apply(EngineInput::Advance);
        engine.apply(EngineInput::Advance);
        engine.apply(EngineInput::Retreat);
        engine.settle();

        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.rotation_angle(), -120.0);
        assert_eq!(feedback.count(Cue::Swipe), 3);
        assert_eq!(engine.focused_item().id.as_str(), "b");
    }

    #[test]
    fn test_pointer_down_grabs() {
        let (mut engine, feedback) = engine();
        engine.on_pointer_down(Point::new(0.0, 0.0));
        assert_eq!(engine.input_source(), InputSource::Pointer);
        assert!(engine.is_grabbing());
        assert_eq!(engine.selection_phase(), SelectionPhase::Armed);
        assert_eq!(feedback.cues(), vec![Cue::Grab]);

        engine.on_pointer_up(Point::new(0.0, 0.0));
        assert_eq!(engine.input_source(), InputSource::None);
        assert!(!engine.is_grabbing());
        assert_eq!(engine.selection_phase(), SelectionPhase::Idle);
    }

    #[test]
    fn test_stray_pointer_events_are_ignored() {
        let (mut engine, feedback) = engine();
        engine.on_pointer_move(Point::new(300.0, 0.0));
        engine.on_pointer_up(Point::new(300.0, 0.0));
        assert_eq!(engine.rotation_angle(), 0.0);
        assert!(feedback.cues().is_empty());
    }
}
