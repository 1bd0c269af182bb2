//! Time-bounded interpolation of a single scalar.
//!
//! Each animated value has exactly one motion at a time: starting a new one
//! redirects the value from wherever it currently is, keeping its velocity, so
//! two interpolations can never compete for the same value.

use crate::config::SpringConfig;
use std::time::Duration;

/// Longest integration step; larger frame deltas are split.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;
const REST_DISTANCE: f64 = 0.01;
const REST_VELOCITY: f64 = 0.05;

/// Identifies one animation command. Stale handles cancel nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

pub trait Animator {
    /// Springs toward `target`, superseding any running motion.
    fn animate_to(&mut self, target: f64, spring: SpringConfig) -> AnimationHandle;

    /// Eases toward `target` over a fixed `duration`.
    fn tween_to(&mut self, target: f64, duration: Duration) -> AnimationHandle;

    /// Sets the value immediately and stops any motion.
    fn jump_to(&mut self, value: f64);

    /// Stops the motion started by `handle`, leaving the value where it is.
    fn cancel(&mut self, handle: AnimationHandle);

    fn step(&mut self, dt: Duration);

    fn value(&self) -> f64;

    fn target(&self) -> f64;

    fn is_animating(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Rest,
    Spring(SpringConfig),
    Tween {
        from: f64,
        elapsed: Duration,
        duration: Duration,
    },
}

/// Damped spring integrator with an ease-out tween mode.
#[derive(Debug, Clone)]
pub struct SpringAnimator {
    value: f64,
    velocity: f64,
    target: f64,
    motion: Motion,
    generation: u64,
}

impl SpringAnimator {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            motion: Motion::Rest,
            generation: 0,
        }
    }

    fn next_handle(&mut self) -> AnimationHandle {
        self.generation += 1;
        AnimationHandle(self.generation)
    }

    fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.motion = Motion::Rest;
    }

    fn step_spring(&mut self, spring: SpringConfig, dt: f64) {
        let mass = spring.mass.max(0.0001);
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            let acceleration = (spring.stiffness * (self.target - self.value)
                - spring.damping * self.velocity)
                / mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;
            remaining -= h;

            if (self.target - self.value).abs() < REST_DISTANCE
                && self.velocity.abs() < REST_VELOCITY
            {
                self.settle();
                return;
            }
        }
    }
}

impl Default for SpringAnimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Animator for SpringAnimator {
    fn animate_to(&mut self, target: f64, spring: SpringConfig) -> AnimationHandle {
        self.target = target;
        self.motion = Motion::Spring(spring);
        self.next_handle()
    }

    fn tween_to(&mut self, target: f64, duration: Duration) -> AnimationHandle {
        self.target = target;
        self.velocity = 0.0;
        self.motion = if duration.is_zero() {
            self.value = target;
            Motion::Rest
        } else {
            Motion::Tween {
                from: self.value,
                elapsed: Duration::ZERO,
                duration,
            }
        };
        self.next_handle()
    }

    fn jump_to(&mut self, value: f64) {
        self.target = value;
        self.settle();
        self.generation += 1;
    }

    fn cancel(&mut self, handle: AnimationHandle) {
        if handle.0 == self.generation && self.is_animating() {
            self.target = self.value;
            self.velocity = 0.0;
            self.motion = Motion::Rest;
        }
    }

    fn step(&mut self, dt: Duration) {
        match self.motion {
            Motion::Rest => {}
            Motion::Spring(spring) => self.step_spring(spring, dt.as_secs_f64()),
            Motion::Tween {
                from,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.settle();
                } else {
                    let t = elapsed.as_secs_f64() / duration.as_secs_f64();
                    let eased = 1.0 - (1.0 - t) * (1.0 - t);
                    self.value = from + (self.target - from) * eased;
                    self.motion = Motion::Tween {
                        from,
                        elapsed,
                        duration,
                    };
                }
            }
        }
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn target(&self) -> f64 {
        self.target
    }

    fn is_animating(&self) -> bool {
        self.motion != Motion::Rest
    }
}
