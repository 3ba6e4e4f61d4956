//! Pixel geometry for resolved positions inside a measured container.

use arcana_core::spread::SpreadPosition;
use serde::{Deserialize, Serialize};

use super::kinds::LayoutKind;

/// Card height divided by card width.
pub const CARD_ASPECT_RATIO: f64 = 1.75;

/// Absolute cap on card width, in pixels.
pub const MAX_CARD_WIDTH_PX: f64 = 140.0;

/// Measured board size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// How large cards are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSizing {
    /// Card width as a fraction of container width.
    pub width_fraction: f64,
    /// Upper bound on card width in pixels.
    pub max_width_px: f64,
    /// Card height divided by width.
    pub aspect_ratio: f64,
}

impl CardSizing {
    /// Sizing for `count` cards laid out as `kind`.
    #[must_use]
    pub fn for_kind(kind: &LayoutKind, count: usize) -> Self {
        Self {
            width_fraction: kind.card_width_fraction(count),
            max_width_px: MAX_CARD_WIDTH_PX,
            aspect_ratio: CARD_ASPECT_RATIO,
        }
    }
}

/// Where one card is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub slot_key: String,
    pub idx: usize,
    /// Left edge of the unrotated card box, in pixels.
    pub left: f64,
    /// Top edge of the unrotated card box, in pixels.
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, applied around the card center.
    pub rotation: f64,
    pub z: u32,
}

/// Projects `positions` onto `container`.
///
/// The card center is clamped so that the bounding box of the rotated card
/// stays inside the container. Returns nothing for an unmeasured container.
#[must_use]
pub fn project_board(
    container: ContainerSize,
    positions: &[SpreadPosition],
    sizing: CardSizing,
) -> Vec<CardGeometry> {
    if !container.is_drawable() {
        return Vec::new();
    }

    let aspect = if sizing.aspect_ratio > 0.0 {
        sizing.aspect_ratio
    } else {
        CARD_ASPECT_RATIO
    };
    let mut width = (container.width * sizing.width_fraction).min(sizing.max_width_px);
    let mut height = width * aspect;
    if height > container.height {
        height = container.height;
        width = height / aspect;
    }

    // Cards share one size, small enough for the most tilted box to fit.
    let scale = positions
        .iter()
        .map(|p| {
            let (box_w, box_h) = rotated_extent(width, height, p.rot);
            (container.width / box_w).min(container.height / box_h)
        })
        .fold(1.0_f64, f64::min);
    width *= scale;
    height *= scale;

    positions
        .iter()
        .map(|p| {
            let (box_w, box_h) = rotated_extent(width, height, p.rot);
            let cx = clamp_center(p.x * container.width, box_w, container.width);
            let cy = clamp_center(p.y * container.height, box_h, container.height);
            CardGeometry {
                slot_key: p.slot_key.clone(),
                idx: p.idx,
                left: cx - width / 2.0,
                top: cy - height / 2.0,
                width,
                height,
                rotation: p.rot,
                z: p.z,
            }
        })
        .collect()
}

/// Width and height of the box bounding a `width` × `height` card turned by
/// `rot` degrees.
fn rotated_extent(width: f64, height: f64, rot: f64) -> (f64, f64) {
    let (sin, cos) = rot.to_radians().sin_cos();
    (
        (width * cos).abs() + (height * sin).abs(),
        (width * sin).abs() + (height * cos).abs(),
    )
}

fn clamp_center(center: f64, extent: f64, bound: f64) -> f64 {
    let half = extent / 2.0;
    if extent >= bound {
        bound / 2.0
    } else {
        center.clamp(half, bound - half)
    }
}
