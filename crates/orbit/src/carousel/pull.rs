use crate::carousel::animation::{Animator, SpringAnimator};
use crate::config::{SpringConfig, Tuning};
use std::time::Duration;

/// Soft limit applied to pulls on items that cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistance {
    pub limit: f64,
    pub factor: f64,
}

impl Resistance {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            limit: tuning.resistance_limit,
            factor: tuning.resistance_factor,
        }
    }

    /// Travel past `limit` is scaled by `factor`.
    pub fn apply(&self, displacement: f64) -> f64 {
        if displacement > self.limit {
            self.limit + (displacement - self.limit) * self.factor
        } else {
            displacement
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PullState {
    pub pull_distance: f64,
    pub is_grabbing: bool,
}

/// Owns the pull displacement behind the pull-to-select affordance.
#[derive(Debug, Clone)]
pub struct PullPhysicsController<A: Animator = SpringAnimator> {
    animator: A,
    spring: SpringConfig,
    drop_distance: f64,
    drop_duration: Duration,
    grabbing: bool,
    dropping: bool,
}

impl PullPhysicsController {
    pub fn new(tuning: &Tuning) -> Self {
        Self::with_animator(tuning, SpringAnimator::default())
    }
}

impl<A: Animator> PullPhysicsController<A> {
    pub fn with_animator(tuning: &Tuning, mut animator: A) -> Self {
        animator.jump_to(0.0);
        Self {
            animator,
            spring: tuning.pull_spring,
            drop_distance: tuning.drop_distance,
            drop_duration: tuning.drop_duration,
            grabbing: false,
            dropping: false,
        }
    }

    /// Never negative, including spring overshoot on the way back to rest.
    pub fn pull_distance(&self) -> f64 {
        self.animator.value().max(0.0)
    }

    pub fn is_grabbing(&self) -> bool {
        self.grabbing
    }

    pub fn is_dropping(&self) -> bool {
        self.dropping
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn state(&self) -> PullState {
        PullState {
            pull_distance: self.pull_distance(),
            is_grabbing: self.grabbing,
        }
    }

    /// Marks a grab in progress. A drop-off that is still playing keeps
    /// control of the displacement until it finishes.
    pub fn grab(&mut self) {
        self.grabbing = true;
    }

    /// Follows a live input directly. Ignored while a drop-off is playing.
    pub fn set_target(&mut self, value: f64) {
        if self.dropping {
            return;
        }
        self.animator.jump_to(value.max(0.0));
    }

    /// Springs back to rest.
    pub fn release(&mut self) {
        self.grabbing = false;
        if !self.dropping {
            self.animator.animate_to(0.0, self.spring);
        }
    }

    /// Sends the selected item off-screen over the fixed drop duration.
    pub fn drop_off(&mut self) {
        self.grabbing = false;
        self.animator.tween_to(self.drop_distance, self.drop_duration);
        self.dropping = true;
    }

    /// Returns `true` on the step where a drop-off finishes. The pull then
    /// rests at zero again.
    pub fn step(&mut self, dt: Duration) -> bool {
        self.animator.step(dt);
        if self.dropping && !self.animator.is_animating() {
            self.dropping = false;
            self.animator.jump_to(0.0);
            return true;
        }
        false
    }
}
