use crate::carousel::pull::Resistance;
use orbit_input::{Delta, Point};

/// What a pointer move asks of the controllers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMotion {
    /// Vertical-dominant downward drag, already resisted for locked items.
    Pull { displacement: f64 },
    /// Horizontal drag, as an absolute rotation angle.
    Rotate { angle: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRelease {
    /// Raw displacement from the press point.
    pub delta: Delta,
    pub start_index: usize,
}

impl PointerRelease {
    /// A release selects only when the drag ended as a downward pull past
    /// `threshold`. Horizontal-dominant drags were rotations.
    pub fn crosses(&self, threshold: f64) -> bool {
        self.delta.is_downward_pull() && self.delta.dy > threshold
    }
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    start: Point,
    start_rotation: f64,
    start_index: usize,
}

/// Converts pointer down/move/up into the same pull and rotation vocabulary
/// the gesture channel produces. Moves without a captured press are no-ops.
#[derive(Debug, Clone)]
pub struct PointerInputAdapter {
    rotation_gain: f64,
    resistance: Resistance,
    drag: Option<DragSession>,
}

impl PointerInputAdapter {
    pub fn new(rotation_gain: f64, resistance: Resistance) -> Self {
        Self {
            rotation_gain,
            resistance,
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Starts a drag session. Returns `false` if one is already running.
    pub fn press(&mut self, point: Point, rotation: f64, index: usize) -> bool {
        if self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragSession {
            start: point,
            start_rotation: rotation,
            start_index: index,
        });
        true
    }

    pub fn motion(&self, point: Point, focused_selectable: bool) -> Option<PointerMotion> {
        let drag = self.drag.as_ref()?;
        let delta = point - drag.start;

        if delta.is_downward_pull() {
            let displacement = if focused_selectable {
                delta.dy
            } else {
                self.resistance.apply(delta.dy)
            };
            Some(PointerMotion::Pull { displacement })
        } else {
            Some(PointerMotion::Rotate {
                angle: drag.start_rotation + delta.dx * self.rotation_gain,
            })
        }
    }

    pub fn release(&mut self, point: Point) -> Option<PointerRelease> {
        let drag = self.drag.take()?;
        Some(PointerRelease {
            delta: point - drag.start,
            start_index: drag.start_index,
        })
    }
}
