use orbit_input::{ActivationTarget, ItemId, ItemTitle};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Selectable(ActivationTarget),
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselItem {
    pub id: ItemId,
    pub title: ItemTitle,
    pub eligibility: Eligibility,
}

impl CarouselItem {
    pub fn selectable(id: ItemId, title: ItemTitle, target: ActivationTarget) -> Self {
        Self {
            id,
            title,
            eligibility: Eligibility::Selectable(target),
        }
    }

    pub fn locked(id: ItemId, title: ItemTitle) -> Self {
        Self {
            id,
            title,
            eligibility: Eligibility::Locked,
        }
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self.eligibility, Eligibility::Selectable(_))
    }

    pub fn activation_target(&self) -> Option<&ActivationTarget> {
        match &self.eligibility {
            Eligibility::Selectable(target) => Some(target),
            Eligibility::Locked => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("A carousel needs at least one item")]
    Empty,
    #[error("Item '{0}' is selectable but has no activation target")]
    MissingTarget(ItemId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_selectable_items_carry_a_target() {
        let open = CarouselItem::selectable("a".into(), "A".into(), "/a".into());
        let locked = CarouselItem::locked("b".into(), "B".into());

        assert_eq!(open.activation_target().map(|t| t.as_str()), Some("/a"));
        assert!(open.is_selectable());
        assert_eq!(locked.activation_target(), None);
        assert!(!locked.is_selectable());
    }
}
