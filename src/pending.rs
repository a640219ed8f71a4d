//! Change tracking for a single module parameter.

/// A parameter value as last confirmed by the module, next to the value the
/// caller wants it to have.
///
/// Only the caller writes `desired`; `confirmed` is written after the module
/// acknowledged a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingValue<T> {
    confirmed: T,
    desired: T,
}

impl<T: Copy + PartialEq> PendingValue<T> {
    pub fn new(value: T) -> Self {
        PendingValue {
            confirmed: value,
            desired: value,
        }
    }

    pub fn confirmed(&self) -> T {
        self.confirmed
    }

    pub fn desired(&self) -> T {
        self.desired
    }

    pub fn desired_mut(&mut self) -> &mut T {
        &mut self.desired
    }

    /// Stage a value for the next synchronization
    pub fn set_desired(&mut self, value: T) {
        self.desired = value;
    }

    pub fn has_changed(&self) -> bool {
        self.desired != self.confirmed
    }

    /// The desired value was pushed and acknowledged
    pub fn mark_confirmed(&mut self) {
        self.confirmed = self.desired;
    }

    /// Record what the module reported, leaving any staged change in place
    pub fn force_confirmed(&mut self, value: T) {
        self.confirmed = value;
    }

    /// Overwrite both sides, e.g. after a factory reset
    pub fn reset(&mut self, value: T) {
        self.confirmed = value;
        self.desired = value;
    }
}
