use orbit_input::{GestureSample, Point};
use serde::{Deserialize, Serialize};

/// Everything that can drive the engine, applied one at a time in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineInput {
    Advance,
    Retreat,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    Gesture(GestureSample),
    TrackingStarted,
    TrackingStopped,
    Tick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_input::Classification;
    use std::time::Duration;

    #[test]
    fn test_input_deserialization() {
        let cases = vec![
            (r#"{"type": "advance"}"#, EngineInput::Advance),
            (
                r#"{"type": "pointer_down", "x": 10.0, "y": 20.5}"#,
                EngineInput::PointerDown(Point::new(10.0, 20.5)),
            ),
            (
                r#"{"type": "gesture", "hand_x": 0.5, "hand_y": 0.25, "classification": "Closed_Fist", "timestamp_ms": 40}"#,
                EngineInput::Gesture(GestureSample::new(
                    0.5,
                    0.25,
                    Classification::Closed,
                    Duration::from_millis(40),
                )),
            ),
            (r#"{"type": "tracking_stopped"}"#, EngineInput::TrackingStopped),
        ];

        for (json, expected) in cases {
            let deserialized: EngineInput = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
