//! Hit point tracking.

use serde::Serialize;

/// Current, maximum and temporary hit points.
///
/// Built only through the clamping constructors, so `0 <= current <= maximum`
/// and `temporary >= 0` always hold. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Health {
    current: i32,
    maximum: i32,
    temporary: i32,
}

impl Health {
    pub fn new(current: i32, maximum: i32) -> Self {
        Self::with_temporary(current, maximum, 0)
    }

    /// Out-of-range inputs are clamped, never rejected.
    pub fn with_temporary(current: i32, maximum: i32, temporary: i32) -> Self {
        let maximum = maximum.max(0);
        Self {
            current: current.clamp(0, maximum),
            maximum,
            temporary: temporary.max(0),
        }
    }

    /// Full health at the given maximum.
    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn temporary(&self) -> i32 {
        self.temporary
    }

    /// Hit points left before the character drops, shield included.
    pub fn effective(&self) -> i32 {
        self.current.saturating_add(self.temporary)
    }

    pub fn is_down(&self) -> bool {
        self.current == 0
    }

    /// Heals by `delta`. Negative amounts are treated as damage.
    pub fn increase(&self, delta: i32) -> Self {
        if delta < 0 {
            return self.decrease(delta.saturating_neg());
        }

        Self::with_temporary(
            self.current.saturating_add(delta),
            self.maximum,
            self.temporary,
        )
    }

    /// Damages by `delta`. Temporary hit points absorb the hit first.
    /// Negative amounts are treated as healing.
    pub fn decrease(&self, delta: i32) -> Self {
        if delta < 0 {
            return self.increase(delta.saturating_neg());
        }

        let absorbed = self.temporary.min(delta);
        Self::with_temporary(
            self.current.saturating_sub(delta - absorbed),
            self.maximum,
            self.temporary - absorbed,
        )
    }

    /// Lowering the maximum below `current` truncates `current`.
    pub fn set_maximum(&self, maximum: i32) -> Self {
        Self::with_temporary(self.current, maximum, self.temporary)
    }

    /// Replaces the temporary buffer; it does not stack with the old one.
    pub fn set_temporary(&self, temporary: i32) -> Self {
        Self::with_temporary(self.current, self.maximum, temporary)
    }
}
