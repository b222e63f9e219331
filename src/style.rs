//! CSS values written to the wrapper and reveal elements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inline style properties the triggers touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleProperty {
    Opacity,
    Transform,
    Transition,
    WillChange,
}

impl StyleProperty {
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Transform => "transform",
            Self::Transition => "transition",
            Self::WillChange => "will-change",
        }
    }
}

/// Hint set while the wrapper animates.
pub const WILL_CHANGE_HINT: &str = "opacity, transform";

/// Signed vertical distance in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Length {
    px: i32,
}

impl Length {
    pub const ZERO: Length = Length { px: 0 };

    pub const fn px(px: i32) -> Self {
        Self { px }
    }

    pub fn as_px(self) -> i32 {
        self.px
    }

    pub fn is_zero(self) -> bool {
        self.px == 0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.px)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid length '{0}': expected a whole number of px such as '-30px'")]
pub struct LengthParseError(pub String);

impl FromStr for Length {
    type Err = LengthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        number
            .parse::<i32>()
            .map(Length::px)
            .map_err(|_| LengthParseError(s.to_string()))
    }
}

impl TryFrom<String> for Length {
    type Error = LengthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Length> for String {
    fn from(value: Length) -> Self {
        value.to_string()
    }
}

/// `translateY(..)`, with the bare `0` form for a zero offset.
pub fn translate_y(offset: Length) -> String {
    if offset.is_zero() {
        "translateY(0)".to_string()
    } else {
        format!("translateY({offset})")
    }
}

/// Timing curve, named as in CSS.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        }
    }

    /// Whether the control points describe a valid CSS curve.
    pub fn is_valid(self) -> bool {
        let (x1, y1, x2, y2) = self.control_points();
        [x1, y1, x2, y2].iter().all(|v| v.is_finite())
            && (0.0..=1.0).contains(&x1)
            && (0.0..=1.0).contains(&x2)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Ease => f.write_str("ease"),
            Self::EaseIn => f.write_str("ease-in"),
            Self::EaseOut => f.write_str("ease-out"),
            Self::EaseInOut => f.write_str("ease-in-out"),
            Self::CubicBezier(x1, y1, x2, y2) => write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})"),
        }
    }
}

/// `transition` value animating opacity and transform together.
pub fn fade_transition(duration_ms: u64, easing: Easing, delay_ms: u64) -> String {
    if delay_ms == 0 {
        format!("opacity {duration_ms}ms {easing}, transform {duration_ms}ms {easing}")
    } else {
        format!(
            "opacity {duration_ms}ms {easing} {delay_ms}ms, transform {duration_ms}ms {easing} {delay_ms}ms"
        )
    }
}
