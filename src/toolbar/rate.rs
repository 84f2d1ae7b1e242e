use std::fmt;

use crate::editor::Background;

/// Highlight strength picked on the toolbar slider, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rate(u8);

impl Rate {
    pub const MAX: u8 = 100;

    /// Create a rate, clamping to `0..=100`.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Highlight opacity, linear in the rate.
    pub fn alpha(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Move the rate by `delta`, staying within bounds.
    #[must_use]
    pub fn step(self, delta: i16) -> Self {
        let value = (i16::from(self.0) + delta).clamp(0, i16::from(Self::MAX));
        Self::new(u8::try_from(value).unwrap_or(Self::MAX))
    }

    /// Yellow background at this rate's opacity.
    pub const fn highlight(self) -> Background {
        Background::Rgba {
            r: 255,
            g: 255,
            b: 0,
            alpha_percent: self.0,
        }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self(50)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
