//! Input vocabulary shared by the orbit carousel engine and its hosts.
//!
//! Hosts translate whatever their platform delivers (DOM pointer events, a
//! camera hand tracker, a recorded trace) into these types before handing
//! them to the engine.

pub mod geometry;
pub mod item;
pub mod macros;
pub mod sample;

pub use geometry::{Delta, Point};
pub use item::{ActivationTarget, ItemId, ItemTitle};
pub use sample::{Classification, GestureSample};
