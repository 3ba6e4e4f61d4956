//! Hand-authored layouts. Coordinates are tuned for visual balance on a
//! roughly 3:2 board and are used as-is.

/// One slot of a fixed table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSlot {
    /// Slot key.
    pub key: &'static str,
    /// Horizontal center.
    pub x: f64,
    /// Vertical center.
    pub y: f64,
    /// Rotation in degrees.
    pub rot: f64,
    /// Explicit stacking order; `None` means draw order.
    pub z: Option<u32>,
}

const fn slot(key: &'static str, x: f64, y: f64) -> ShapeSlot {
    ShapeSlot {
        key,
        x,
        y,
        rot: 0.0,
        z: None,
    }
}

/// Shapes with a literal coordinate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedShape {
    Horseshoe,
    CelticCross,
    Pentagram,
    Cross,
    Chakra,
    TreeOfLife,
    Career,
    Planetary,
    Week,
}

const HORSESHOE: [ShapeSlot; 7] = [
    slot("past", 0.10, 0.30),
    slot("present", 0.20, 0.55),
    slot("hidden", 0.33, 0.78),
    slot("obstacle", 0.50, 0.86),
    slot("others", 0.67, 0.78),
    slot("advice", 0.80, 0.55),
    slot("outcome", 0.90, 0.30),
];

// Slot 2 crosses slot 1: same center, turned, always on top.
const CELTIC_CROSS: [ShapeSlot; 10] = [
    ShapeSlot {
        key: "present",
        x: 0.30,
        y: 0.50,
        rot: 0.0,
        z: Some(1),
    },
    ShapeSlot {
        key: "challenge",
        x: 0.30,
        y: 0.50,
        rot: 90.0,
        z: Some(20),
    },
    slot("foundation", 0.30, 0.80),
    slot("past", 0.12, 0.50),
    slot("crown", 0.30, 0.20),
    slot("future", 0.48, 0.50),
    slot("self", 0.80, 0.86),
    slot("environment", 0.80, 0.62),
    slot("hopes_fears", 0.80, 0.38),
    slot("outcome", 0.80, 0.14),
];

const PENTAGRAM: [ShapeSlot; 5] = [
    slot("spirit", 0.50, 0.12),
    slot("water", 0.86, 0.38),
    slot("fire", 0.72, 0.81),
    slot("earth", 0.28, 0.81),
    slot("air", 0.14, 0.38),
];

const CROSS: [ShapeSlot; 5] = [
    slot("center", 0.50, 0.50),
    slot("left", 0.25, 0.50),
    slot("right", 0.75, 0.50),
    slot("above", 0.50, 0.20),
    slot("below", 0.50, 0.80),
];

const CHAKRA: [ShapeSlot; 7] = [
    slot("root", 0.50, 0.92),
    slot("sacral", 0.50, 0.78),
    slot("solar_plexus", 0.50, 0.64),
    slot("heart", 0.50, 0.50),
    slot("throat", 0.50, 0.36),
    slot("third_eye", 0.50, 0.22),
    slot("crown", 0.50, 0.08),
];

const TREE_OF_LIFE: [ShapeSlot; 10] = [
    slot("kether", 0.50, 0.06),
    slot("chokmah", 0.75, 0.20),
    slot("binah", 0.25, 0.20),
    slot("chesed", 0.75, 0.42),
    slot("geburah", 0.25, 0.42),
    slot("tiphareth", 0.50, 0.52),
    slot("netzach", 0.75, 0.68),
    slot("hod", 0.25, 0.68),
    slot("yesod", 0.50, 0.80),
    slot("malkuth", 0.50, 0.94),
];

const CAREER: [ShapeSlot; 6] = [
    slot("goal", 0.50, 0.18),
    slot("strengths", 0.32, 0.50),
    slot("obstacles", 0.68, 0.50),
    slot("resources", 0.15, 0.82),
    slot("action", 0.50, 0.82),
    slot("outcome", 0.85, 0.82),
];

const PLANETARY: [ShapeSlot; 7] = [
    slot("sun", 0.50, 0.50),
    slot("moon", 0.50, 0.16),
    slot("mercury", 0.79, 0.33),
    slot("venus", 0.79, 0.67),
    slot("mars", 0.50, 0.84),
    slot("jupiter", 0.21, 0.67),
    slot("saturn", 0.21, 0.33),
];

const WEEK: [ShapeSlot; 7] = [
    slot("monday", 0.20, 0.32),
    slot("tuesday", 0.40, 0.32),
    slot("wednesday", 0.60, 0.32),
    slot("thursday", 0.80, 0.32),
    slot("friday", 0.30, 0.68),
    slot("saturday", 0.50, 0.68),
    slot("sunday", 0.70, 0.68),
];

impl FixedShape {
    /// Matches kind strings naming a fixed shape.
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        let shape = match kind {
            "horseshoe" | "horseshoe-7" => Self::Horseshoe,
            "cross-10" | "celtic-cross" | "celtic-cross-10" => Self::CelticCross,
            "pentagram" | "pentagram-5" => Self::Pentagram,
            "cross" | "cross-5" => Self::Cross,
            "chakra" | "chakra-7" | "chakras" => Self::Chakra,
            "tree-of-life" | "tree-of-life-10" => Self::TreeOfLife,
            "career" | "career-6" => Self::Career,
            "planetary" | "planetary-7" | "planets-7" => Self::Planetary,
            "week" | "week-7" | "weekly-7" => Self::Week,
            _ => return None,
        };
        Some(shape)
    }

    /// The coordinate table, in slot order.
    #[must_use]
    pub fn slots(self) -> &'static [ShapeSlot] {
        match self {
            Self::Horseshoe => &HORSESHOE,
            Self::CelticCross => &CELTIC_CROSS,
            Self::Pentagram => &PENTAGRAM,
            Self::Cross => &CROSS,
            Self::Chakra => &CHAKRA,
            Self::TreeOfLife => &TREE_OF_LIFE,
            Self::Career => &CAREER,
            Self::Planetary => &PLANETARY,
            Self::Week => &WEEK,
        }
    }

    pub(crate) fn card_width_fraction(self) -> f64 {
        match self {
            Self::Horseshoe | Self::CelticCross => 0.11,
            Self::Pentagram | Self::Week => 0.14,
            Self::Cross => 0.16,
            Self::Chakra => 0.08,
            Self::TreeOfLife => 0.1,
            Self::Career => 0.13,
            Self::Planetary => 0.12,
        }
    }
}
