use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A pointer position in host display units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement between two points, `dy > 0` meaning downward motion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Vertical motion dominates and points downward.
    pub fn is_downward_pull(&self) -> bool {
        self.dy.abs() > self.dx.abs() && self.dy > 0.0
    }
}

impl Sub for Point {
    type Output = Delta;

    fn sub(self, origin: Point) -> Delta {
        Delta::new(self.x - origin.x, self.y - origin.y)
    }
}
