//! Debounced pull-to-select.
//!
//! ```text
//! Idle --arm--> Armed --crossing, selectable--> (fired) --> Cooldown --expiry--> Idle
//!                 |
//!                 +--crossing, locked--> (rejected) --> Idle
//! ```
//!
//! Fired and rejected are momentary and reported through [`Crossing`]. The
//! cooldown is shared by every item.

use crate::carousel::model::{CarouselItem, Eligibility};
use orbit_input::ActivationTarget;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    Armed,
    Cooldown { until: Duration },
}

/// What a pull threshold crossing resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crossing {
    Fired(ActivationTarget),
    Rejected,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SelectionTrigger {
    phase: SelectionPhase,
    cooldown: Duration,
}

impl SelectionTrigger {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            phase: SelectionPhase::Idle,
            cooldown,
        }
    }

    /// The phase as of `now`, with an expired cooldown reported as idle.
    pub fn phase(&self, now: Duration) -> SelectionPhase {
        match self.phase {
            SelectionPhase::Cooldown { until } if now >= until => SelectionPhase::Idle,
            phase => phase,
        }
    }

    pub fn is_cooling_down(&self, now: Duration) -> bool {
        matches!(self.phase(now), SelectionPhase::Cooldown { .. })
    }

    /// A grab began on the focused item.
    pub fn arm(&mut self, now: Duration) {
        self.phase = match self.phase(now) {
            SelectionPhase::Idle | SelectionPhase::Armed => SelectionPhase::Armed,
            cooldown => cooldown,
        };
    }

    /// The grab ended without a selection.
    pub fn disarm(&mut self, now: Duration) {
        self.phase = match self.phase(now) {
            SelectionPhase::Armed => SelectionPhase::Idle,
            phase => phase,
        };
    }

    pub fn on_threshold_crossed(&mut self, item: &CarouselItem, now: Duration) -> Crossing {
        match self.phase(now) {
            SelectionPhase::Cooldown { until } => {
                log::debug!(
                    "Ignoring pull on '{}': selection cooldown for another {:?}",
                    item.title,
                    until - now
                );
                Crossing::Ignored
            }
            SelectionPhase::Idle => Crossing::Ignored,
            SelectionPhase::Armed => match &item.eligibility {
                Eligibility::Selectable(target) => {
                    self.phase = SelectionPhase::Cooldown {
                        until: now + self.cooldown,
                    };
                    Crossing::Fired(target.clone())
                }
                Eligibility::Locked => {
                    self.phase = SelectionPhase::Idle;
                    Crossing::Rejected
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(2000);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn open_item() -> CarouselItem {
        CarouselItem::selectable("a".into(), "A".into(), "/a".into())
    }

    #[test]
    fn test_fires_once_per_cooldown() {
        let mut trigger = SelectionTrigger::new(COOLDOWN);
        let item = open_item();

        trigger.arm(ms(0));
        assert_eq!(
            trigger.on_threshold_crossed(&item, ms(10)),
            Crossing::Fired("/a".into())
        );

        trigger.arm(ms(500));
        assert_eq!(trigger.on_threshold_crossed(&item, ms(600)), Crossing::Ignored);
        assert!(trigger.is_cooling_down(ms(2009)));

        trigger.arm(ms(2010));
        assert_eq!(trigger.phase(ms(2010)), SelectionPhase::Armed);
        assert!(matches!(
            trigger.on_threshold_crossed(&item, ms(2020)),
            Crossing::Fired(_)
        ));
    }

    #[test]
    fn test_locked_rejects_without_cooldown() {
        let mut trigger = SelectionTrigger::new(COOLDOWN);
        let locked = CarouselItem::locked("b".into(), "B".into());

        trigger.arm(ms(0));
        assert_eq!(trigger.on_threshold_crossed(&locked, ms(5)), Crossing::Rejected);
        assert_eq!(trigger.phase(ms(5)), SelectionPhase::Idle);

        // a second crossing in the same grab is not reported again
        assert_eq!(trigger.on_threshold_crossed(&locked, ms(6)), Crossing::Ignored);

        trigger.arm(ms(7));
        assert!(matches!(
            trigger.on_threshold_crossed(&open_item(), ms(8)),
            Crossing::Fired(_)
        ));
    }

    #[test]
    fn test_unarmed_crossings_are_ignored() {
        let mut trigger = SelectionTrigger::new(COOLDOWN);
        assert_eq!(
            trigger.on_threshold_crossed(&open_item(), ms(0)),
            Crossing::Ignored
        );
        trigger.arm(ms(1));
        trigger.disarm(ms(2));
        assert_eq!(
            trigger.on_threshold_crossed(&open_item(), ms(3)),
            Crossing::Ignored
        );
    }
}
