//! Position Resolver: kind + card count (+ authored positions) → slots.

use arcana_core::spread::{RawPosition, Spread, SpreadPosition};
use tracing::debug;

use crate::domain::generators;
use crate::domain::kinds::{DEFAULT_START_DEG, LayoutKind};
use crate::domain::normalize::normalize_positions;

/// Resolves exactly `required_count` positions.
///
/// Authored positions win when there are at least `required_count` of them;
/// they are normalized and the first `required_count` in idx order are used.
/// Otherwise `kind` generates the layout. A kind drawn for a different card
/// count degrades to the circle so the length always matches.
#[must_use]
pub fn resolve_positions(
    kind: &LayoutKind,
    required_count: usize,
    explicit_positions: Option<&[RawPosition]>,
) -> Vec<SpreadPosition> {
    if let Some(raw) = explicit_positions.filter(|raw| raw.len() >= required_count) {
        let mut positions = normalize_positions(raw);
        positions.truncate(required_count);
        return positions;
    }

    match kind.natural_count() {
        Some(natural) if natural != required_count => {
            debug!(
                ?kind,
                natural, required_count, "layout kind does not fit card count, using circle"
            );
            return generators::circle(required_count, DEFAULT_START_DEG);
        }
        _ => {}
    }

    match kind {
        LayoutKind::Line(count) => generators::line(*count),
        LayoutKind::TwoPoint => generators::two_point(),
        LayoutKind::Circle { start_deg } => generators::circle(required_count, *start_deg),
        LayoutKind::Star6 => generators::star6(),
        LayoutKind::Fixed(shape) => generators::fixed(*shape),
        LayoutKind::Grid => generators::grid(required_count),
        LayoutKind::Fallback => generators::circle(required_count, DEFAULT_START_DEG),
    }
}

/// The layout kind a spread asks for; spreads without one use the fallback.
#[must_use]
pub fn spread_kind(spread: &Spread) -> LayoutKind {
    spread
        .layout
        .as_deref()
        .map_or(LayoutKind::Fallback, LayoutKind::parse)
}

/// Resolves the positions of a spread schema.
#[must_use]
pub fn resolve_spread_positions(spread: &Spread) -> Vec<SpreadPosition> {
    resolve_positions(
        &spread_kind(spread),
        spread.cards_required,
        spread.positions.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generators::{CIRCLE_RADIUS, ellipse_for};
    use crate::domain::normalize::{MAX_COORD, MIN_COORD};

    const KINDS: [&str; 16] = [
        "line-1", "line-2", "line-3", "two-point", "circle", "star-6", "horseshoe-7",
        "cross-10", "pentagram-5", "cross-5", "chakra-7", "tree-of-life-10", "career-6",
        "planetary-7", "grid-78", "mystery",
    ];

    #[test]
    fn test_every_kind_and_count_yields_exact_in_bounds_positions() {
        for kind in KINDS {
            for count in 1..=80 {
                let positions = resolve_positions(&LayoutKind::parse(kind), count, None);
                assert_eq!(positions.len(), count, "{kind} with {count}");
                for p in &positions {
                    assert!((MIN_COORD..=MAX_COORD).contains(&p.x), "{kind}/{count}: x {}", p.x);
                    assert!((MIN_COORD..=MAX_COORD).contains(&p.y), "{kind}/{count}: y {}", p.y);
                }
            }
        }
    }

    #[test]
    fn test_ppf_three_card_line() {
        let spread: Spread = serde_json::from_value(serde_json::json!({
            "id": "ppf-3",
            "cards_required": 3,
            "allow_reversals": true,
            "layout": "line-3"
        }))
        .unwrap();

        let points: Vec<_> = resolve_spread_positions(&spread)
            .iter()
            .map(|p| (p.x, p.y))
            .collect();

        assert_eq!(points, vec![(0.25, 0.5), (0.5, 0.5), (0.75, 0.5)]);
    }

    #[test]
    fn test_celtic_cross_table() {
        let positions = resolve_positions(&LayoutKind::parse("cross-10"), 10, None);

        assert_eq!(positions.len(), 10);
        assert_eq!((positions[1].x, positions[1].y), (positions[0].x, positions[0].y));
        assert!((positions[1].rot - 90.0).abs() < f64::EPSILON);
        assert!(positions[1].z > positions[0].z);
        assert_eq!(positions[9].slot_key, "outcome");
    }

    #[test]
    fn test_star_six_hexagram() {
        let positions = resolve_positions(&LayoutKind::parse("star-6"), 6, None);

        assert_eq!(positions.len(), 6);
        let radii: Vec<f64> = positions
            .iter()
            .map(|p| (p.x - 0.5).hypot(p.y - 0.5))
            .collect();
        assert!(radii.iter().all(|r| (r - radii[0]).abs() < 1e-9));
    }

    #[test]
    fn test_twenty_five_cards_use_wide_ellipse() {
        let positions = resolve_positions(&LayoutKind::parse("circle"), 25, None);
        let min_x = positions.iter().map(|p| p.x).fold(f64::MAX, f64::min);
        let max_x = positions.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let max_y = positions.iter().map(|p| p.y).fold(f64::MIN, f64::max);

        let ellipse = ellipse_for(25);
        assert!(ellipse.rx > CIRCLE_RADIUS);
        assert!(max_x - min_x > 2.0 * CIRCLE_RADIUS);
        assert!(max_y < 0.5 + CIRCLE_RADIUS);
    }

    #[test]
    fn test_explicit_positions_take_precedence() {
        let raw: Vec<RawPosition> = serde_json::from_value(serde_json::json!([
            { "slot_key": "b", "idx": 2, "x": 60, "y": 40 },
            { "slot_key": "a", "idx": 1, "x": 0.1, "y": 0.2 },
            { "slot_key": "c", "idx": 3, "x": 0.9, "y": 0.9 }
        ]))
        .unwrap();

        let positions = resolve_positions(&LayoutKind::parse("line-2"), 2, Some(&raw));

        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].slot_key, "a");
        assert!((positions[1].x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_explicit_positions_fall_back_to_kind() {
        let raw = vec![RawPosition::default()];

        let positions = resolve_positions(&LayoutKind::parse("line-3"), 3, Some(&raw));

        assert_eq!(positions.len(), 3);
        assert!((positions[0].x - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_fixed_kind_degrades_to_circle() {
        let positions = resolve_positions(&LayoutKind::parse("cross-10"), 4, None);
        let circle = generators::circle(4, DEFAULT_START_DEG);

        assert_eq!(positions, circle);
    }

    #[test]
    fn test_spread_without_layout_uses_circle() {
        let spread: Spread = serde_json::from_value(serde_json::json!({
            "id": "open-5",
            "cards_required": 5
        }))
        .unwrap();

        assert_eq!(spread_kind(&spread), LayoutKind::Fallback);
        assert_eq!(
            resolve_spread_positions(&spread),
            generators::circle(5, DEFAULT_START_DEG)
        );
    }
}
