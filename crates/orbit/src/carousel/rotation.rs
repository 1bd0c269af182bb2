use crate::carousel::FULL_TURN;
use crate::carousel::animation::{Animator, SpringAnimator};
use crate::carousel::model::CarouselError;
use crate::config::SpringConfig;
use std::time::Duration;

/// Owns the carousel's rotation angle (degrees) and the index derived from it.
///
/// Advancing moves the angle by `-angle_step`, so the focused index grows as
/// the angle becomes more negative. The index is updated as soon as a command
/// is issued rather than when its animation lands.
#[derive(Debug, Clone)]
pub struct CarouselRotationController<A: Animator = SpringAnimator> {
    animator: A,
    spring: SpringConfig,
    item_count: usize,
    angle_step: f64,
    current_index: usize,
}

impl CarouselRotationController {
    pub fn new(item_count: usize, spring: SpringConfig) -> Result<Self, CarouselError> {
        Self::with_animator(item_count, spring, SpringAnimator::default())
    }
}

impl<A: Animator> CarouselRotationController<A> {
    pub fn with_animator(
        item_count: usize,
        spring: SpringConfig,
        mut animator: A,
    ) -> Result<Self, CarouselError> {
        if item_count == 0 {
            return Err(CarouselError::Empty);
        }
        animator.jump_to(0.0);

        Ok(Self {
            animator,
            spring,
            item_count,
            angle_step: FULL_TURN / item_count as f64,
            current_index: 0,
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    pub fn rotation_angle(&self) -> f64 {
        self.animator.value()
    }

    /// Where the angle will come to rest.
    pub fn target_angle(&self) -> f64 {
        self.animator.target()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// `round(-angle / step) mod item_count`, always in `[0, item_count)`.
    pub fn index_for_angle(&self, angle: f64) -> usize {
        let steps = (-angle / self.angle_step).round() as i64;
        steps.rem_euclid(self.item_count as i64) as usize
    }

    /// On-screen angle of item `index`.
    pub fn item_angle(&self, index: usize) -> f64 {
        self.rotation_angle() + index as f64 * self.angle_step
    }

    pub fn advance(&mut self) {
        self.step_by(-1.0);
    }

    pub fn retreat(&mut self) {
        self.step_by(1.0);
    }

    /// Steps from the resting position of the current command, so rapid calls
    /// accumulate instead of being lost mid-flight.
    fn step_by(&mut self, direction: f64) {
        let base = (self.animator.target() / self.angle_step).round();
        let target = (base + direction) * self.angle_step + 0.0;
        self.animator.animate_to(target, self.spring);
        self.current_index = self.index_for_angle(target);
    }

    /// Direct manipulation: the angle follows the pointer with no animation.
    pub fn drag_to(&mut self, angle: f64) {
        self.animator.jump_to(angle);
        self.current_index = self.index_for_angle(angle);
    }

    /// Animates to the nearest exact multiple of `angle_step` and returns the
    /// index it lands on.
    pub fn snap_to_nearest(&mut self) -> usize {
        let nearest = (-self.animator.target() / self.angle_step).round();
        let target = -nearest * self.angle_step + 0.0;
        self.animator.animate_to(target, self.spring);
        self.current_index = self.index_for_angle(target);
        self.current_index
    }

    pub fn step(&mut self, dt: Duration) {
        self.animator.step(dt);
    }
}
