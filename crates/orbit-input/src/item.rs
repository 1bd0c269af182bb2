use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemTitle(String);

crate::impl_string_newtype!(ItemTitle);

/// Opaque destination handed to the navigation collaborator, usually a route path.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ActivationTarget(String);

crate::impl_string_newtype!(ActivationTarget);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtypes_are_transparent() {
        let target: ActivationTarget = serde_json::from_str("\"/lessons/intro\"").unwrap();
        assert_eq!(target.as_str(), "/lessons/intro");
        assert_eq!(serde_json::to_string(&ItemId::from("math")).unwrap(), "\"math\"");
    }
}
