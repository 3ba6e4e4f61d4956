//! Closed set of supported layout kinds.

use super::shapes::FixedShape;

/// Default start angle for circular layouts: 12 o'clock.
pub const DEFAULT_START_DEG: f64 = -90.0;

/// Largest card count a straight line layout handles.
pub const MAX_LINE_CARDS: usize = 3;

/// A layout generator family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutKind {
    /// 1–3 cards on the horizontal midline.
    Line(usize),
    /// Two points flanking the center.
    TwoPoint,
    /// Points on a circle or ellipse, starting at `start_deg`.
    Circle {
        /// Angle of the first card, in degrees, clockwise from 3 o'clock.
        start_deg: f64,
    },
    /// Hexagram made of two interleaved triangles.
    Star6,
    /// A hand-tuned coordinate table.
    Fixed(FixedShape),
    /// Row-major grid for very large spreads.
    Grid,
    /// Unrecognized kind; laid out as a circle.
    Fallback,
}

impl LayoutKind {
    /// Parses a kind string such as `line-3`, `cross-10`, `circle-12`, or
    /// `grid-78`. Unknown strings map to [`LayoutKind::Fallback`].
    #[must_use]
    pub fn parse(kind: &str) -> Self {
        let kind = kind.trim().to_ascii_lowercase();
        let circle = Self::Circle {
            start_deg: DEFAULT_START_DEG,
        };

        match kind.as_str() {
            "line" | "line-3" => return Self::Line(3),
            "line-1" | "single" => return Self::Line(1),
            "line-2" => return Self::Line(2),
            "two-point" | "pair" | "two" => return Self::TwoPoint,
            "star-6" | "hexagram" => return Self::Star6,
            "circle" | "polygon" | "ring" => return circle,
            "grid" => return Self::Grid,
            _ => {}
        }

        if let Some(shape) = FixedShape::from_kind(&kind) {
            return Self::Fixed(shape);
        }

        for prefix in ["circle-", "polygon-", "ring-"] {
            if kind.strip_prefix(prefix).is_some_and(is_count) {
                return circle;
            }
        }
        if kind.strip_prefix("grid-").is_some_and(is_count) {
            return Self::Grid;
        }

        Self::Fallback
    }

    /// Card count the kind is drawn for, if it is fixed.
    #[must_use]
    pub fn natural_count(&self) -> Option<usize> {
        match self {
            Self::Line(n) => Some(*n),
            Self::TwoPoint => Some(2),
            Self::Star6 => Some(6),
            Self::Fixed(shape) => Some(shape.slots().len()),
            Self::Circle { .. } | Self::Grid | Self::Fallback => None,
        }
    }

    /// Card width as a fraction of the container width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn card_width_fraction(&self, count: usize) -> f64 {
        match self {
            Self::Line(_) => 0.2,
            Self::TwoPoint => 0.22,
            Self::Star6 => 0.13,
            Self::Fixed(shape) => shape.card_width_fraction(),
            Self::Grid => {
                let (cols, _) = super::generators::grid_dimensions(count.max(1));
                0.9 / cols as f64 * 0.8
            }
            Self::Circle { .. } | Self::Fallback => {
                if count <= 8 {
                    0.14
                } else {
                    (2.0 / count as f64).clamp(0.05, 0.14)
                }
            }
        }
    }
}

fn is_count(suffix: &str) -> bool {
    !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit())
}
