//! The carousel interaction engine: gesture filtering, pointer adaptation,
//! input arbitration, rotation and pull physics, and the selection trigger.

pub mod animation;
pub mod arbiter;
pub mod engine;
pub mod filter;
pub mod model;
pub mod pointer;
pub mod pull;
pub mod rotation;
pub mod selection;

pub use animation::{AnimationHandle, Animator, SpringAnimator};
pub use arbiter::{InputArbiter, InputSource};
pub use engine::{CarouselEngine, Collaborators};
pub use filter::{AnchorState, GestureEvent, GestureSignalFilter};
pub use model::{CarouselError, CarouselItem, Eligibility};
pub use pointer::{PointerInputAdapter, PointerMotion, PointerRelease};
pub use pull::{PullPhysicsController, PullState, Resistance};
pub use rotation::CarouselRotationController;
pub use selection::{Crossing, SelectionPhase, SelectionTrigger};

pub const SWIPE_THRESHOLD: f64 = 0.22; // normalized hand travel
pub const SWIPE_ANCHOR_FOLLOW: f64 = 0.1;
pub const SWIPE_COOLDOWN_MS: u64 = 500;
pub const PULL_THRESHOLD: f64 = 0.15; // normalized hand travel
pub const GESTURE_PULL_GAIN: f64 = 500.0;
pub const SELECTION_COOLDOWN_MS: u64 = 2000;

pub const RESISTANCE_LIMIT: f64 = 50.0; // free travel for locked items
pub const RESISTANCE_FACTOR: f64 = 0.1;
pub const POINTER_ROTATION_GAIN: f64 = 0.3; // degrees per display unit
pub const RELEASE_THRESHOLD: f64 = 100.0; // pointer pull that selects on release

pub const ROTATION_STIFFNESS: f64 = 170.0;
pub const ROTATION_DAMPING: f64 = 26.0;
pub const PULL_STIFFNESS: f64 = 300.0;
pub const PULL_DAMPING: f64 = 30.0;
pub const DROP_DISTANCE: f64 = 600.0;
pub const DROP_DURATION_MS: u64 = 250;

pub const FULL_TURN: f64 = 360.0;
