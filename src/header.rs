//! Header bar state: the signed-in user and the pitch/volume/rate controls.
//!
//! The numeric controls only hold their values for display. Nothing else in
//! the application reads them.

use std::fmt;

/// Which header control a wheel step targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Pitch,
    Volume,
    Rate,
}

impl HeaderField {
    pub const ALL: [Self; 3] = [Self::Pitch, Self::Volume, Self::Rate];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pitch => "Pitch",
            Self::Volume => "Volume",
            Self::Rate => "Rate",
        }
    }
}

/// A numeric input in `0.1..=2.0` with step `0.1`, stored in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericControl {
    tenths: u8,
}

impl NumericControl {
    pub const MIN_TENTHS: u8 = 1;
    pub const MAX_TENTHS: u8 = 20;

    pub fn from_tenths(tenths: u8) -> Self {
        Self {
            tenths: tenths.clamp(Self::MIN_TENTHS, Self::MAX_TENTHS),
        }
    }

    /// Move by `delta` steps, clamped to the control's bounds.
    #[must_use]
    pub fn step(self, delta: i8) -> Self {
        let next = i16::from(self.tenths) + i16::from(delta);
        let clamped = next.clamp(i16::from(Self::MIN_TENTHS), i16::from(Self::MAX_TENTHS));
        Self::from_tenths(u8::try_from(clamped).unwrap_or(Self::MAX_TENTHS))
    }
}

impl Default for NumericControl {
    fn default() -> Self {
        Self { tenths: 10 }
    }
}

impl fmt::Display for NumericControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderControls {
    pub pitch: NumericControl,
    pub volume: NumericControl,
    pub rate: NumericControl,
}

impl HeaderControls {
    pub const fn get(&self, field: HeaderField) -> NumericControl {
        match field {
            HeaderField::Pitch => self.pitch,
            HeaderField::Volume => self.volume,
            HeaderField::Rate => self.rate,
        }
    }

    pub fn step(&mut self, field: HeaderField, delta: i8) {
        let control = match field {
            HeaderField::Pitch => &mut self.pitch,
            HeaderField::Volume => &mut self.volume,
            HeaderField::Rate => &mut self.rate,
        };
        *control = control.step(delta);
    }
}
