use std::fmt;

/// A background color applied to a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    /// Translucent color; alpha is kept in hundredths so attributes stay `Eq`.
    Rgba {
        r: u8,
        g: u8,
        b: u8,
        alpha_percent: u8,
    },
    /// Opaque color.
    Solid { r: u8, g: u8, b: u8 },
}

impl Background {
    /// Light grey used to mark commented text (`#d3d3d3`).
    pub const COMMENT: Self = Self::Solid {
        r: 0xd3,
        g: 0xd3,
        b: 0xd3,
    };

    /// Opacity in `0.0..=1.0`.
    pub fn alpha(self) -> f64 {
        match self {
            Self::Rgba { alpha_percent, .. } => f64::from(alpha_percent.min(100)) / 100.0,
            Self::Solid { .. } => 1.0,
        }
    }

    /// Composite this color over an opaque base color.
    pub fn blend_over(self, base: (u8, u8, u8)) -> (u8, u8, u8) {
        let (r, g, b) = match self {
            Self::Rgba { r, g, b, .. } | Self::Solid { r, g, b } => (r, g, b),
        };
        let alpha = self.alpha();
        let mix = |top: u8, bottom: u8| -> u8 {
            let value = alpha.mul_add(f64::from(top), (1.0 - alpha) * f64::from(bottom));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            // Convex combination of two u8 values stays within 0..=255.
            let channel = value.round().clamp(0.0, 255.0) as u8;
            channel
        };
        (mix(r, base.0), mix(g, base.1), mix(b, base.2))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Rgba { r, g, b, .. } => write!(f, "rgba({r}, {g}, {b}, {})", self.alpha()),
            Self::Solid { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// A single named formatting attribute and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Bold(bool),
    Background(Option<Background>),
}

impl Attribute {
    /// The attribute name as the formatting API knows it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold(_) => "bold",
            Self::Background(_) => "background",
        }
    }
}

/// The full set of inline formats carried by a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub bold: bool,
    pub background: Option<Background>,
}

impl Attributes {
    /// Return a copy with `attribute` applied.
    #[must_use]
    pub const fn with(mut self, attribute: Attribute) -> Self {
        match attribute {
            Attribute::Bold(bold) => self.bold = bold,
            Attribute::Background(background) => self.background = background,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_display_matches_css_syntax() {
        let half = Background::Rgba {
            r: 255,
            g: 255,
            b: 0,
            alpha_percent: 50,
        };
        assert_eq!(half.to_string(), "rgba(255, 255, 0, 0.5)");

        let opaque = Background::Rgba {
            r: 255,
            g: 255,
            b: 0,
            alpha_percent: 100,
        };
        assert_eq!(opaque.to_string(), "rgba(255, 255, 0, 1)");
    }

    #[test]
    fn test_comment_background_is_light_grey_hex() {
        assert_eq!(Background::COMMENT.to_string(), "#d3d3d3");
        assert!((Background::COMMENT.alpha() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blend_zero_alpha_keeps_base() {
        let clear = Background::Rgba {
            r: 255,
            g: 255,
            b: 0,
            alpha_percent: 0,
        };
        assert_eq!(clear.blend_over((51, 51, 51)), (51, 51, 51));
    }

    #[test]
    fn test_blend_full_alpha_replaces_base() {
        let yellow = Background::Rgba {
            r: 255,
            g: 255,
            b: 0,
            alpha_percent: 100,
        };
        assert_eq!(yellow.blend_over((51, 51, 51)), (255, 255, 0));
    }

    #[test]
    fn test_attributes_with_overrides_single_field() {
        let attrs = Attributes::default()
            .with(Attribute::Bold(true))
            .with(Attribute::Background(Some(Background::COMMENT)));
        assert!(attrs.bold);
        assert_eq!(attrs.background, Some(Background::COMMENT));

        let cleared = attrs.with(Attribute::Background(None));
        assert!(cleared.bold);
        assert_eq!(cleared.background, None);
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(Attribute::Bold(true).name(), "bold");
        assert_eq!(Attribute::Background(None).name(), "background");
    }
}
