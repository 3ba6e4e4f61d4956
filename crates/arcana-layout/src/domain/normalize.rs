//! Normalization of externally authored position data.

use std::collections::HashSet;

use arcana_core::spread::{RawPosition, SpreadPosition};

/// Lowest coordinate a card center may take.
pub const MIN_COORD: f64 = 0.02;

/// Highest coordinate a card center may take.
pub const MAX_COORD: f64 = 0.98;

/// Clamps a unit-square coordinate into `[MIN_COORD, MAX_COORD]`.
#[must_use]
pub fn clamp_coord(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_COORD, MAX_COORD)
    } else {
        0.5
    }
}

/// Normalizes one axis value: absent or non-finite → center, magnitude above
/// 1 → percentage, then clamped.
#[must_use]
pub fn normalize_axis(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => {
            let v = if v.abs() > 1.0 { v / 100.0 } else { v };
            clamp_coord(v)
        }
        _ => 0.5,
    }
}

/// Returns `base`, or `base-{idx}`, `base-{idx}-2`, ... when taken, and
/// records the result in `seen`.
fn unique_key(seen: &mut HashSet<String>, base: String, idx: usize) -> String {
    if seen.insert(base.clone()) {
        return base;
    }
    let suffixed = format!("{base}-{idx}");
    let mut candidate = suffixed.clone();
    let mut n = 2;
    while !seen.insert(candidate.clone()) {
        candidate = format!("{suffixed}-{n}");
        n += 1;
    }
    candidate
}

/// Converts raw positions into slots sorted by `idx`.
///
/// Positions without an `idx` keep their input order. Missing slot keys
/// become `p{idx}`; a key already used gets the idx appended, plus a
/// counter if that is taken too. Rotation
/// defaults to 0 and z-order to the draw order.
#[must_use]
pub fn normalize_positions(raw: &[RawPosition]) -> Vec<SpreadPosition> {
    let mut ordered: Vec<(usize, &RawPosition)> = raw
        .iter()
        .enumerate()
        .map(|(i, p)| (p.idx.unwrap_or(i + 1), p))
        .collect();
    ordered.sort_by_key(|(idx, _)| *idx);

    let mut seen = HashSet::new();
    ordered
        .into_iter()
        .enumerate()
        .map(|(order, (idx, p))| {
            let base = p
                .slot_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map_or_else(|| format!("p{idx}"), str::to_owned);
            let slot_key = unique_key(&mut seen, base, idx);

            SpreadPosition {
                slot_key,
                idx,
                x: normalize_axis(p.x),
                y: normalize_axis(p.y),
                rot: p.rot.filter(|r| r.is_finite()).unwrap_or(0.0),
                z: p
                    .z
                    .unwrap_or_else(|| u32::try_from(order + 1).unwrap_or(u32::MAX)),
                title: p.title.clone(),
                upright_copy: p.upright_copy.clone(),
                reversed_copy: p.reversed_copy.clone(),
            }
        })
        .collect()
}
