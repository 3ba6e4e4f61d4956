//! Board Projection with memoization.
//!
//! Hosts feed container size changes as they observe them (a resize
//! observer, not every layout pass). Geometry is recomputed only when the
//! size actually changes or a different position list is installed.

use std::sync::Arc;

use arcana_core::spread::SpreadPosition;
use tracing::trace;

use crate::domain::projection::{CardGeometry, CardSizing, ContainerSize, project_board};

/// Keeps the pixel layout of one board in sync with its inputs.
#[derive(Debug)]
pub struct BoardProjector {
    sizing: CardSizing,
    positions: Option<Arc<[SpreadPosition]>>,
    size: Option<ContainerSize>,
    cards: Vec<CardGeometry>,
    recomputations: usize,
}

impl BoardProjector {
    #[must_use]
    pub fn new(sizing: CardSizing) -> Self {
        Self {
            sizing,
            positions: None,
            size: None,
            cards: Vec::new(),
            recomputations: 0,
        }
    }

    /// Installs a position list and card sizing. Returns `true` if the
    /// geometry was recomputed, which happens only when `positions` is a
    /// different list than the current one (by identity, not by value) or
    /// `sizing` changed.
    pub fn set_positions(&mut self, positions: Arc<[SpreadPosition]>, sizing: CardSizing) -> bool {
        let same_list = self
            .positions
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &positions));
        if same_list && self.sizing == sizing {
            return false;
        }
        self.positions = Some(positions);
        self.sizing = sizing;
        self.recompute()
    }

    /// Records a measured container size. Returns `true` if the geometry
    /// was recomputed.
    pub fn observe_resize(&mut self, size: ContainerSize) -> bool {
        if self.size == Some(size) {
            return false;
        }
        self.size = Some(size);
        self.recompute()
    }

    /// Current geometry; empty until both a size and positions are known.
    #[must_use]
    pub fn cards(&self) -> &[CardGeometry] {
        &self.cards
    }

    /// How many times the geometry has been recomputed.
    #[must_use]
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    fn recompute(&mut self) -> bool {
        let (Some(size), Some(positions)) = (self.size, self.positions.as_ref()) else {
            return false;
        };
        self.cards = project_board(size, positions, self.sizing);
        self.recomputations += 1;
        trace!(
            width = size.width,
            height = size.height,
            cards = self.cards.len(),
            "board geometry recomputed"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::resolver::resolve_positions;
    use crate::domain::kinds::LayoutKind;

    fn positions(kind: &str, count: usize) -> (Arc<[SpreadPosition]>, CardSizing) {
        let kind = LayoutKind::parse(kind);
        (
            resolve_positions(&kind, count, None).into(),
            CardSizing::for_kind(&kind, count),
        )
    }

    #[test]
    fn test_waits_for_both_size_and_positions() {
        let (list, sizing) = positions("line-3", 3);
        let mut board = BoardProjector::new(sizing);

        assert!(!board.set_positions(list, sizing));
        assert!(board.cards().is_empty());

        assert!(board.observe_resize(ContainerSize::new(800.0, 500.0)));
        assert_eq!(board.cards().len(), 3);
    }

    #[test]
    fn test_same_size_and_same_list_do_not_recompute() {
        let (list, sizing) = positions("cross-10", 10);
        let mut board = BoardProjector::new(sizing);
        board.observe_resize(ContainerSize::new(800.0, 500.0));
        board.set_positions(Arc::clone(&list), sizing);

        assert!(!board.observe_resize(ContainerSize::new(800.0, 500.0)));
        assert!(!board.set_positions(Arc::clone(&list), sizing));
        assert_eq!(board.recomputations(), 1);
    }

    #[test]
    fn test_new_list_with_equal_values_recomputes() {
        let (list, sizing) = positions("line-2", 2);
        let mut board = BoardProjector::new(sizing);
        board.observe_resize(ContainerSize::new(640.0, 480.0));
        board.set_positions(list, sizing);

        let (same_values, _) = positions("line-2", 2);
        assert!(board.set_positions(same_values, sizing));
        assert!(board.observe_resize(ContainerSize::new(320.0, 480.0)));
        assert_eq!(board.recomputations(), 3);
        assert!(board.cards().iter().all(|c| c.left + c.width <= 320.0 + 1e-9));
    }

    #[test]
    fn test_new_sizing_on_same_list_recomputes() {
        let (list, sizing) = positions("line-3", 3);
        let mut board = BoardProjector::new(sizing);
        board.observe_resize(ContainerSize::new(900.0, 600.0));
        board.set_positions(Arc::clone(&list), sizing);
        let before = board.cards()[0].width;

        let narrower = CardSizing {
            width_fraction: sizing.width_fraction / 2.0,
            ..sizing
        };

        assert!(board.set_positions(Arc::clone(&list), narrower));
        assert_eq!(board.recomputations(), 2);
        assert!(board.cards()[0].width < before);
        assert!(!board.set_positions(list, narrower));
    }
}
