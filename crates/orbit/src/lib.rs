//! Gesture- and pointer-driven 3D carousel interaction engine.
//!
//! Two noisy input channels, a camera hand tracker and a mouse/touch pointer,
//! are fused into one rotation angle and one pull displacement, with a
//! debounced pull-to-select on the focused item.

pub mod carousel;
pub mod config;
pub mod events;
pub mod services;
pub mod sys;
