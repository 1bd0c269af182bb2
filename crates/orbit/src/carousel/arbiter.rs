use strum::Display as StrumDisplay;

/// Which channel currently owns carousel motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay)]
pub enum InputSource {
    #[default]
    None,
    Pointer,
    Gesture,
}

/// Grants motion to one input channel at a time. A captured pointer always
/// wins; gesture output is dropped until the pointer is released.
#[derive(Debug, Clone, Default)]
pub struct InputArbiter {
    source: InputSource,
}

impl InputArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Fails only while the pointer is already captured.
    pub fn claim_pointer(&mut self) -> bool {
        match self.source {
            InputSource::Pointer => false,
            InputSource::Gesture => {
                log::debug!("Pointer drag takes over from an active hand grab");
                self.source = InputSource::Pointer;
                true
            }
            InputSource::None => {
                self.source = InputSource::Pointer;
                true
            }
        }
    }

    pub fn release_pointer(&mut self) {
        if self.source == InputSource::Pointer {
            self.source = InputSource::None;
        }
    }

    pub fn claim_gesture(&mut self) -> bool {
        match self.source {
            InputSource::Pointer => false,
            InputSource::None | InputSource::Gesture => {
                self.source = InputSource::Gesture;
                true
            }
        }
    }

    pub fn release_gesture(&mut self) {
        if self.source == InputSource::Gesture {
            self.source = InputSource::None;
        }
    }

    pub fn admits_gesture(&self) -> bool {
        self.source != InputSource::Pointer
    }

    pub fn admits_pointer(&self) -> bool {
        self.source == InputSource::Pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_silences_gesture() {
        let mut arbiter = InputArbiter::new();
        assert!(arbiter.claim_gesture());
        assert!(arbiter.claim_pointer());
        assert!(!arbiter.admits_gesture());
        assert!(!arbiter.claim_gesture());

        // releasing the gesture does not steal the pointer's claim
        arbiter.release_gesture();
        assert_eq!(arbiter.source(), InputSource::Pointer);

        arbiter.release_pointer();
        assert!(arbiter.admits_gesture());
        assert!(!arbiter.admits_pointer());
    }

    #[test]
    fn test_pointer_cannot_be_captured_twice() {
        let mut arbiter = InputArbiter::new();
        assert!(arbiter.claim_pointer());
        assert!(!arbiter.claim_pointer());
    }
}
