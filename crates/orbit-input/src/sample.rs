use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

/// Hand openness as reported by the pose classifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    #[strum(serialize = "Open", serialize = "open_palm")]
    Open,
    #[strum(serialize = "Closed", serialize = "closed_fist", serialize = "fist")]
    Closed,
    #[default]
    #[strum(serialize = "Unknown", serialize = "none", serialize = "")]
    Unknown,
}

impl Classification {
    pub fn is_closed(self) -> bool {
        matches!(self, Classification::Closed)
    }
}

/// One frame from the hand tracker. Coordinates are normalized to `[0, 1]`
/// with `hand_y` growing downward.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub hand_x: f64,
    pub hand_y: f64,
    #[serde(default)]
    pub classification: Classification,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "timestamp_ms", default)]
    pub timestamp: Duration,
}

impl GestureSample {
    pub fn new(
        hand_x: f64,
        hand_y: f64,
        classification: Classification,
        timestamp: Duration,
    ) -> Self {
        Self {
            hand_x: hand_x.clamp(0.0, 1.0),
            hand_y: hand_y.clamp(0.0, 1.0),
            classification,
            timestamp,
        }
    }
}
