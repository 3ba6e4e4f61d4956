//! Generated layouts. All functions work in the unit square with the y axis
//! pointing down and return slots in draw order.

use std::f64::consts::TAU;

use arcana_core::spread::SpreadPosition;

use super::normalize::clamp_coord;
use super::shapes::FixedShape;

/// Circle radius for up to [`WIDE_ELLIPSE_THRESHOLD`] cards.
pub const CIRCLE_RADIUS: f64 = 0.38;

/// Above this many cards the circle becomes a wide, short ellipse.
pub const WIDE_ELLIPSE_THRESHOLD: usize = 20;

/// Above this many cards the ellipse widens further.
pub const EXTRA_WIDE_ELLIPSE_THRESHOLD: usize = 40;

/// Radius of the hexagram's circumscribed circle.
pub const STAR_RADIUS: f64 = 0.36;

/// Usable band for grids, as `[margin, 1 - margin]`.
pub const GRID_MARGIN: f64 = 0.05;

/// Center and radii of a circular layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

/// Picks the ellipse for `count` cards. Large rings get wider and move up so
/// the bottom edge does not crowd.
#[must_use]
pub fn ellipse_for(count: usize) -> Ellipse {
    if count > EXTRA_WIDE_ELLIPSE_THRESHOLD {
        Ellipse {
            cx: 0.5,
            cy: 0.46,
            rx: 0.47,
            ry: 0.32,
        }
    } else if count > WIDE_ELLIPSE_THRESHOLD {
        Ellipse {
            cx: 0.5,
            cy: 0.47,
            rx: 0.44,
            ry: 0.34,
        }
    } else {
        Ellipse {
            cx: 0.5,
            cy: 0.5,
            rx: CIRCLE_RADIUS,
            ry: CIRCLE_RADIUS,
        }
    }
}

fn slot(idx: usize, x: f64, y: f64) -> SpreadPosition {
    SpreadPosition::at(idx, clamp_coord(x), clamp_coord(y))
}

/// `count` cards evenly spaced on the horizontal midline.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn line(count: usize) -> Vec<SpreadPosition> {
    let step = 1.0 / (count as f64 + 1.0);
    (1..=count).map(|i| slot(i, step * i as f64, 0.5)).collect()
}

/// Two points flanking the center.
#[must_use]
pub fn two_point() -> Vec<SpreadPosition> {
    vec![slot(1, 0.3, 0.5), slot(2, 0.7, 0.5)]
}

/// `count` points on [`ellipse_for`]`(count)`, stepping `2π/count` from
/// `start_deg`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn circle(count: usize, start_deg: f64) -> Vec<SpreadPosition> {
    let Ellipse { cx, cy, rx, ry } = ellipse_for(count);
    let start = start_deg.to_radians();
    let step = TAU / count.max(1) as f64;
    (0..count)
        .map(|i| {
            let angle = start + step * i as f64;
            slot(i + 1, cx + rx * angle.cos(), cy + ry * angle.sin())
        })
        .collect()
}

/// Upward triangle first (slots 1–3), then the downward one (slots 4–6).
#[must_use]
pub fn star6() -> Vec<SpreadPosition> {
    [-90.0_f64, 30.0, 150.0, 90.0, 210.0, 330.0]
        .iter()
        .enumerate()
        .map(|(i, deg)| {
            let angle = deg.to_radians();
            slot(
                i + 1,
                0.5 + STAR_RADIUS * angle.cos(),
                0.5 + STAR_RADIUS * angle.sin(),
            )
        })
        .collect()
}

/// Columns and rows for a grid of `count` cards: `ceil(sqrt(2n))` columns,
/// which gives 7×3 for 21, 9×4 for 36 and 13×6 for 78.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn grid_dimensions(count: usize) -> (usize, usize) {
    let cols = ((2.0 * count as f64).sqrt().ceil() as usize).clamp(1, count.max(1));
    let rows = count.div_ceil(cols).max(1);
    (cols, rows)
}

/// Row-major grid inside the `[GRID_MARGIN, 1 - GRID_MARGIN]` band.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid(count: usize) -> Vec<SpreadPosition> {
    let (cols, rows) = grid_dimensions(count);
    let span = 1.0 - 2.0 * GRID_MARGIN;
    let cell_w = span / cols as f64;
    let cell_h = span / rows as f64;
    (0..count)
        .map(|i| {
            let (row, col) = (i / cols, i % cols);
            slot(
                i + 1,
                GRID_MARGIN + (col as f64 + 0.5) * cell_w,
                GRID_MARGIN + (row as f64 + 0.5) * cell_h,
            )
        })
        .collect()
}

/// Copies a fixed table into position slots.
#[must_use]
pub fn fixed(shape: FixedShape) -> Vec<SpreadPosition> {
    shape
        .slots()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut position = slot(i + 1, s.x, s.y);
            s.key.clone_into(&mut position.slot_key);
            position.rot = s.rot;
            if let Some(z) = s.z {
                position.z = z;
            }
            position
        })
        .collect()
}
