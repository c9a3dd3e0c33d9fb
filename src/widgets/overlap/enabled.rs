/// Couples the container's enabled flag to the overlap phase.
///
/// With auto-disable on, the container starts disabled and becomes enabled once the
/// overlap is done. Both steps assign rather than toggle, so applying them again is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledPolicy {
    auto_disable: bool,
}

impl EnabledPolicy {
    pub fn new(auto_disable: bool) -> Self {
        Self { auto_disable }
    }

    pub fn is_active(&self) -> bool {
        self.auto_disable
    }

    /// Returns true if `enabled` changed.
    pub fn apply_after_creation(&self, enabled: &mut bool) -> bool {
        self.assign(enabled, false)
    }

    /// Returns true if `enabled` changed.
    pub fn apply_after_completion(&self, enabled: &mut bool) -> bool {
        self.assign(enabled, true)
    }

    fn assign(&self, enabled: &mut bool, value: bool) -> bool {
        if !self.auto_disable || *enabled == value {
            return false;
        }
        *enabled = value;
        log::debug!("Overlap layout enabled -> {}", value);
        true
    }
}
