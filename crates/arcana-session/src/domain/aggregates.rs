//! The reading session aggregate.
//!
//! ```text
//! loading ──► picking ──confirm──► reading
//!    │           ▲                    │
//!    ▼           └── start over / ────┘
//!  error             locale reset
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use arcana_core::clock::Clock;
use arcana_core::deck::DeckCard;
use arcana_core::error::DomainError;
use arcana_core::interpretation::InterpretationResult;
use arcana_core::locale::Locale;
use arcana_core::rng::{DeterministicRng, shuffle};
use arcana_core::spread::{Spread, SpreadPosition};
use arcana_layout::application::resolver::{resolve_spread_positions, spread_kind};
use arcana_layout::domain::kinds::LayoutKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::draw::{DrawPolicy, DrawnCard, draw_cards};
use super::errors::SessionError;

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Loading,
    Error,
    Picking,
    Reading,
}

/// Where the interpretation of the current draw stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InterpretationStatus {
    /// Nothing requested for this draw.
    Idle,
    /// A request is in flight.
    Pending {
        /// Identifies the request so late answers can be matched.
        request_id: Uuid,
    },
    /// The last request failed; it can be retried.
    Failed {
        /// Failure description for display.
        message: String,
    },
    /// An interpretation was accepted.
    Ready,
}

/// Effect of a selection toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
    /// Not picking, index outside the deck, or selection already full.
    Rejected,
}

/// What happened to an interpretation answer handed back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationCompletion {
    /// The result is now shown.
    Accepted,
    /// The request failed; the session stays in `reading` and can retry.
    Failed,
    /// The locale changed while the request was pending. The answer was
    /// dropped and the session went back to `picking`.
    DiscardedStaleLocale,
    /// The answer belongs to a request the session no longer waits for.
    Superseded,
}

/// One spread visit.
#[derive(Debug)]
pub struct ReadingSession {
    id: Uuid,
    phase: SessionPhase,
    locale: Locale,
    deck_locale: Locale,
    policy: DrawPolicy,
    spread: Option<Spread>,
    layout: LayoutKind,
    positions: Arc<[SpreadPosition]>,
    shuffled_deck: Vec<DeckCard>,
    selected_indices: Vec<usize>,
    draw: Vec<DrawnCard>,
    drawn_at: Option<DateTime<Utc>>,
    interpretation: Option<InterpretationResult>,
    request_locale: Option<Locale>,
    interpretation_status: InterpretationStatus,
    last_persona: Option<String>,
    load_error: Option<String>,
}

impl ReadingSession {
    /// Creates a session in the `loading` phase.
    #[must_use]
    pub fn new(id: Uuid, locale: Locale, policy: DrawPolicy) -> Self {
        Self {
            id,
            phase: SessionPhase::Loading,
            deck_locale: locale.clone(),
            locale,
            policy,
            spread: None,
            layout: LayoutKind::Fallback,
            positions: Vec::new().into(),
            shuffled_deck: Vec::new(),
            selected_indices: Vec::new(),
            draw: Vec::new(),
            drawn_at: None,
            interpretation: None,
            request_locale: None,
            interpretation_status: InterpretationStatus::Idle,
            last_persona: None,
            load_error: None,
        }
    }

    /// Leaves `loading`: to `picking` with a resolved layout and a freshly
    /// shuffled deck, or to the terminal `error` phase.
    ///
    /// # Errors
    ///
    /// Returns the load failure after recording it on the session; also
    /// `DomainError::DeckLoadFailure` for an empty deck, a deck with
    /// duplicate card ids, or fewer cards than the spread requires, and
    /// `DomainError::Validation` if the session was not loading.
    pub fn finish_loading(
        &mut self,
        loaded: Result<(Spread, Vec<DeckCard>), DomainError>,
        rng: &mut dyn DeterministicRng,
    ) -> Result<(), DomainError> {
        if self.phase != SessionPhase::Loading {
            return Err(DomainError::Validation(
                "session must be in loading phase".to_owned(),
            ));
        }

        let checked = loaded.and_then(|(spread, deck)| {
            check_loaded(&spread, &deck)?;
            Ok((spread, deck))
        });

        match checked {
            Ok((spread, deck)) => {
                self.layout = spread_kind(&spread);
                self.positions = resolve_spread_positions(&spread).into();
                self.shuffled_deck = deck;
                self.deck_locale = self.locale.clone();
                shuffle(&mut self.shuffled_deck, rng);
                info!(
                    session_id = %self.id,
                    spread_id = %spread.id,
                    cards_required = spread.cards_required,
                    deck_size = self.shuffled_deck.len(),
                    "session ready for picking"
                );
                self.spread = Some(spread);
                self.phase = SessionPhase::Picking;
                Ok(())
            }
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "session failed to load");
                self.load_error = Some(err.to_string());
                self.phase = SessionPhase::Error;
                Err(err)
            }
        }
    }

    /// Toggles a card of the shuffled deck. Re-selecting removes it; a new
    /// index is refused once the selection is full.
    pub fn toggle_selection(&mut self, index: usize) -> SelectionChange {
        if self.phase != SessionPhase::Picking || index >= self.shuffled_deck.len() {
            return SelectionChange::Rejected;
        }
        if let Some(at) = self.selected_indices.iter().position(|&i| i == index) {
            self.selected_indices.remove(at);
            return SelectionChange::Deselected;
        }
        if self.selected_indices.len() >= self.cards_required() {
            return SelectionChange::Rejected;
        }
        self.selected_indices.push(index);
        SelectionChange::Selected
    }

    /// `true` when the selection is complete.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.phase == SessionPhase::Picking
            && self.cards_required() > 0
            && self.selected_indices.len() == self.cards_required()
    }

    /// Draws the selected cards onto the slots and moves to `reading`.
    /// Returns `false`, changing nothing, if the selection is incomplete.
    pub fn confirm(&mut self, rng: &mut dyn DeterministicRng, clock: &dyn Clock) -> bool {
        if !self.can_confirm() {
            debug!(
                session_id = %self.id,
                selected = self.selected_indices.len(),
                required = self.cards_required(),
                "confirm ignored"
            );
            return false;
        }
        let Some(spread) = self.spread.as_ref() else {
            return false;
        };

        self.draw = draw_cards(
            &self.shuffled_deck,
            &self.selected_indices,
            &self.positions,
            spread.allow_reversals,
            self.policy,
            rng,
        );
        self.drawn_at = Some(clock.now());
        self.interpretation = None;
        self.request_locale = None;
        self.interpretation_status = InterpretationStatus::Idle;
        self.phase = SessionPhase::Reading;
        info!(
            session_id = %self.id,
            reversed = self.draw.iter().filter(|d| d.is_reversed).count(),
            "draw confirmed"
        );
        true
    }

    /// Clears the selection, draw, and interpretation, reshuffles, and
    /// returns to `picking`. Returns `false` outside `picking`/`reading`.
    pub fn start_over(&mut self, rng: &mut dyn DeterministicRng) -> bool {
        if !matches!(self.phase, SessionPhase::Picking | SessionPhase::Reading) {
            return false;
        }
        info!(session_id = %self.id, "start over");
        self.reset(rng);
        true
    }

    /// Replaces card names with those of `deck`, loaded for `locale`.
    ///
    /// Cards are matched by id, so the shuffle order, the selection, and the
    /// draw keep their meaning. Returns `false`, changing nothing, if the
    /// session has since moved to another locale.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DeckLoadFailure` if `deck` lacks a card of the
    /// current deck.
    pub fn relocalize_deck(
        &mut self,
        locale: &Locale,
        deck: Vec<DeckCard>,
    ) -> Result<bool, DomainError> {
        if *locale != self.locale {
            debug!(session_id = %self.id, %locale, active = %self.locale, "ignoring deck for stale locale");
            return Ok(false);
        }

        let mut by_id: HashMap<String, DeckCard> =
            deck.into_iter().map(|card| (card.id.clone(), card)).collect();
        let mut localized = Vec::with_capacity(self.shuffled_deck.len());
        for card in &self.shuffled_deck {
            let replacement = by_id.remove(&card.id).ok_or_else(|| {
                DomainError::DeckLoadFailure(format!("deck for {locale} has no card {}", card.id))
            })?;
            localized.push(replacement);
        }

        for drawn in &mut self.draw {
            if let Some(card) = localized.iter().find(|c| c.id == drawn.card.id) {
                drawn.card = card.clone();
            }
        }
        self.shuffled_deck = localized;
        self.deck_locale = locale.clone();
        info!(session_id = %self.id, %locale, "deck relocalized");
        Ok(true)
    }

    /// Switches the active locale.
    ///
    /// An accepted interpretation in another locale no longer matches what
    /// the user reads, so the session resets to `picking`; the return value
    /// says whether that happened. A pending request is left alone and
    /// checked against the locale when it completes.
    pub fn change_locale(&mut self, locale: Locale, rng: &mut dyn DeterministicRng) -> bool {
        if locale == self.locale {
            return false;
        }
        debug!(session_id = %self.id, from = %self.locale, to = %locale, "locale changed");
        self.locale = locale;

        let stale = self.phase == SessionPhase::Reading
            && self.interpretation_status == InterpretationStatus::Ready
            && self.request_locale.as_ref() != Some(&self.locale);
        if stale {
            info!(session_id = %self.id, "interpretation locale is stale, resetting");
            self.reset(rng);
        }
        stale
    }

    /// Marks a request as in flight and captures the request locale.
    ///
    /// # Errors
    ///
    /// `SessionError::NotReading` without a confirmed draw;
    /// `SessionError::InterpretationInFlight` while another request is
    /// pending.
    pub fn begin_interpretation(
        &mut self,
        request_id: Uuid,
        persona_id: &str,
    ) -> Result<Locale, SessionError> {
        if self.phase != SessionPhase::Reading {
            return Err(SessionError::NotReading);
        }
        if matches!(
            self.interpretation_status,
            InterpretationStatus::Pending { .. }
        ) {
            return Err(SessionError::InterpretationInFlight);
        }
        self.check_deck_locale()?;

        self.interpretation = None;
        self.request_locale = Some(self.locale.clone());
        self.last_persona = Some(persona_id.to_owned());
        self.interpretation_status = InterpretationStatus::Pending { request_id };
        Ok(self.locale.clone())
    }

    /// Applies the answer to request `request_id`.
    ///
    /// The answer is dropped if the session no longer waits for that
    /// request, and dropped with a reset to `picking` if the active locale
    /// differs from the one captured when the request began.
    pub fn complete_interpretation(
        &mut self,
        request_id: Uuid,
        outcome: Result<InterpretationResult, String>,
        rng: &mut dyn DeterministicRng,
    ) -> InterpretationCompletion {
        let waiting = matches!(
            self.interpretation_status,
            InterpretationStatus::Pending { request_id: pending } if pending == request_id
        );
        if !waiting {
            debug!(session_id = %self.id, %request_id, "ignoring superseded interpretation");
            return InterpretationCompletion::Superseded;
        }

        if self.request_locale.as_ref() != Some(&self.locale) {
            info!(
                session_id = %self.id,
                %request_id,
                locale = %self.locale,
                "locale changed while interpretation was pending, discarding"
            );
            self.reset(rng);
            return InterpretationCompletion::DiscardedStaleLocale;
        }

        match outcome {
            Ok(result) => {
                self.interpretation = Some(result);
                self.interpretation_status = InterpretationStatus::Ready;
                InterpretationCompletion::Accepted
            }
            Err(message) => {
                warn!(session_id = %self.id, %request_id, error = %message, "interpretation failed");
                self.interpretation_status = InterpretationStatus::Failed { message };
                InterpretationCompletion::Failed
            }
        }
    }

    fn reset(&mut self, rng: &mut dyn DeterministicRng) {
        self.selected_indices.clear();
        self.draw.clear();
        self.drawn_at = None;
        self.interpretation = None;
        self.request_locale = None;
        self.interpretation_status = InterpretationStatus::Idle;
        shuffle(&mut self.shuffled_deck, rng);
        self.phase = SessionPhase::Picking;
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Locale the card names were loaded in.
    #[must_use]
    pub fn deck_locale(&self) -> &Locale {
        &self.deck_locale
    }

    /// `true` when card names are in the active locale.
    #[must_use]
    pub fn deck_matches_locale(&self) -> bool {
        self.deck_locale == self.locale
    }

    /// # Errors
    ///
    /// `SessionError::DeckLocaleMismatch` until the deck is relocalized
    /// after a locale change.
    pub fn check_deck_locale(&self) -> Result<(), SessionError> {
        if self.deck_matches_locale() {
            return Ok(());
        }
        Err(SessionError::DeckLocaleMismatch {
            deck: self.deck_locale.clone(),
            active: self.locale.clone(),
        })
    }

    /// The spread, once loaded.
    #[must_use]
    pub fn spread(&self) -> Option<&Spread> {
        self.spread.as_ref()
    }

    #[must_use]
    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    /// Resolved slots. The same `Arc` is handed out until the layout
    /// changes, so projections can compare by identity.
    #[must_use]
    pub fn positions(&self) -> Arc<[SpreadPosition]> {
        Arc::clone(&self.positions)
    }

    /// Zero until the spread is loaded.
    #[must_use]
    pub fn cards_required(&self) -> usize {
        self.spread.as_ref().map_or(0, |s| s.cards_required)
    }

    #[must_use]
    pub fn shuffled_deck(&self) -> &[DeckCard] {
        &self.shuffled_deck
    }

    #[must_use]
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected_indices
    }

    /// The confirmed draw; empty before `reading`.
    #[must_use]
    pub fn draw(&self) -> &[DrawnCard] {
        &self.draw
    }

    #[must_use]
    pub fn drawn_at(&self) -> Option<DateTime<Utc>> {
        self.drawn_at
    }

    #[must_use]
    pub fn interpretation(&self) -> Option<&InterpretationResult> {
        self.interpretation.as_ref()
    }

    #[must_use]
    pub fn request_locale(&self) -> Option<&Locale> {
        self.request_locale.as_ref()
    }

    #[must_use]
    pub fn interpretation_status(&self) -> &InterpretationStatus {
        &self.interpretation_status
    }

    /// Persona of the most recent request, for retries.
    #[must_use]
    pub fn last_persona(&self) -> Option<&str> {
        self.last_persona.as_deref()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

fn check_loaded(spread: &Spread, deck: &[DeckCard]) -> Result<(), DomainError> {
    spread.validate()?;
    if deck.is_empty() {
        return Err(DomainError::DeckLoadFailure("deck is empty".to_owned()));
    }
    if deck.len() < spread.cards_required {
        return Err(DomainError::DeckLoadFailure(format!(
            "deck has {} cards but spread {} requires {}",
            deck.len(),
            spread.id,
            spread.cards_required
        )));
    }
    let mut ids = HashSet::with_capacity(deck.len());
    if let Some(dup) = deck.iter().find(|card| !ids.insert(card.id.as_str())) {
        return Err(DomainError::DeckLoadFailure(format!(
            "duplicate card id {}",
            dup.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use arcana_core::rng::StdRngSource;
    use arcana_test_support::{FixedClock, MockRng, sample_deck, sample_spread};

    fn picking_session(required: usize, allow_reversals: bool) -> ReadingSession {
        let mut session = ReadingSession::new(Uuid::new_v4(), Locale::new("en"), DrawPolicy::default());
        session
            .finish_loading(
                Ok((
                    sample_spread("ppf-3", required, allow_reversals, "line-3"),
                    sample_deck(22),
                )),
                &mut StdRngSource::seeded(5),
            )
            .unwrap();
        session
    }

    fn reading_session() -> ReadingSession {
        let mut session = picking_session(3, true);
        for i in [4, 0, 9] {
            session.toggle_selection(i);
        }
        assert!(session.confirm(&mut StdRngSource::seeded(6), &FixedClock::default()));
        session
    }

    fn answer(text: &str) -> InterpretationResult {
        InterpretationResult::from_value(serde_json::json!({ "text": text })).unwrap()
    }

    // --- loading ---

    #[test]
    fn test_finish_loading_moves_to_picking_with_shuffled_deck() {
        let session = picking_session(3, true);

        assert_eq!(session.phase(), SessionPhase::Picking);
        assert_eq!(session.positions().len(), 3);
        assert_eq!(session.layout(), LayoutKind::Line(3));
        let ids: HashSet<_> = session.shuffled_deck().iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), 22);
        assert_ne!(session.shuffled_deck(), sample_deck(22).as_slice());
    }

    #[test]
    fn test_finish_loading_with_missing_spread_is_terminal() {
        let mut session = ReadingSession::new(Uuid::new_v4(), Locale::default(), DrawPolicy::default());

        let result = session.finish_loading(
            Err(DomainError::SpreadNotFound("nope".to_owned())),
            &mut MockRng,
        );

        assert!(matches!(result, Err(DomainError::SpreadNotFound(_))));
        assert_eq!(session.phase(), SessionPhase::Error);
        assert_eq!(session.load_error(), Some("spread not found: nope"));
        assert_eq!(session.toggle_selection(0), SelectionChange::Rejected);
        assert!(!session.start_over(&mut MockRng));
        assert_eq!(session.phase(), SessionPhase::Error);
    }

    #[test]
    fn test_finish_loading_rejects_unusable_decks() {
        let mut duplicate = sample_deck(4);
        duplicate[3].id = duplicate[0].id.clone();
        let cases = [Vec::new(), sample_deck(2), duplicate];

        for deck in cases {
            let mut session =
                ReadingSession::new(Uuid::new_v4(), Locale::default(), DrawPolicy::default());
            let result = session.finish_loading(
                Ok((sample_spread("ppf-3", 3, false, "line-3"), deck)),
                &mut MockRng,
            );

            assert!(matches!(result, Err(DomainError::DeckLoadFailure(_))));
            assert_eq!(session.phase(), SessionPhase::Error);
        }
    }

    #[test]
    fn test_finish_loading_only_once() {
        let mut session = picking_session(3, false);

        let result = session.finish_loading(
            Ok((sample_spread("x", 1, false, "line-1"), sample_deck(3))),
            &mut MockRng,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(session.cards_required(), 3);
    }

    // --- selection ---

    #[test]
    fn test_toggle_selection_adds_and_removes() {
        let mut session = picking_session(3, false);

        assert_eq!(session.toggle_selection(5), SelectionChange::Selected);
        assert_eq!(session.toggle_selection(2), SelectionChange::Selected);
        assert_eq!(session.toggle_selection(5), SelectionChange::Deselected);

        assert_eq!(session.selected_indices(), &[2]);
    }

    #[test]
    fn test_toggle_selection_is_noop_when_full() {
        let mut session = picking_session(3, false);
        for i in [1, 2, 3] {
            session.toggle_selection(i);
        }

        assert_eq!(session.toggle_selection(7), SelectionChange::Rejected);
        assert_eq!(session.selected_indices(), &[1, 2, 3]);
        // Removing still works when full.
        assert_eq!(session.toggle_selection(2), SelectionChange::Deselected);
    }

    #[test]
    fn test_toggle_selection_rejects_out_of_range() {
        let mut session = picking_session(3, false);

        assert_eq!(session.toggle_selection(22), SelectionChange::Rejected);
        assert!(session.selected_indices().is_empty());
    }

    // --- confirm ---

    #[test]
    fn test_confirm_requires_complete_selection() {
        let mut session = picking_session(3, false);
        session.toggle_selection(0);
        session.toggle_selection(1);

        assert!(!session.can_confirm());
        assert!(!session.confirm(&mut MockRng, &FixedClock::default()));
        assert_eq!(session.phase(), SessionPhase::Picking);
        assert!(session.draw().is_empty());
    }

    #[test]
    fn test_confirm_draws_one_distinct_card_per_slot() {
        let session = reading_session();

        assert_eq!(session.phase(), SessionPhase::Reading);
        assert_eq!(session.draw().len(), 3);
        let ids: HashSet<_> = session.draw().iter().map(|d| &d.card.id).collect();
        assert_eq!(ids.len(), 3);
        let slots: Vec<_> = session
            .draw()
            .iter()
            .map(|d| d.position_slot_key.as_str())
            .collect();
        assert_eq!(slots, vec!["p1", "p2", "p3"]);
        assert_eq!(session.draw()[0].card, session.shuffled_deck()[4]);
        assert_eq!(session.drawn_at(), Some(FixedClock::default().0));
    }

    #[test]
    fn test_selection_is_frozen_while_reading() {
        let mut session = reading_session();

        assert_eq!(session.toggle_selection(4), SelectionChange::Rejected);
        assert!(!session.confirm(&mut MockRng, &FixedClock::default()));
        assert_eq!(session.draw().len(), 3);
    }

    #[test]
    fn test_start_over_clears_and_reshuffles() {
        let mut session = reading_session();
        let before = session.shuffled_deck().to_vec();

        assert!(session.start_over(&mut StdRngSource::seeded(99)));

        assert_eq!(session.phase(), SessionPhase::Picking);
        assert!(session.selected_indices().is_empty());
        assert!(session.draw().is_empty());
        assert!(session.drawn_at().is_none());
        assert_ne!(session.shuffled_deck(), before.as_slice());
    }

    // --- interpretation ---

    #[test]
    fn test_begin_interpretation_guards() {
        let mut picking = picking_session(3, false);
        assert_eq!(
            picking.begin_interpretation(Uuid::new_v4(), "sage"),
            Err(SessionError::NotReading)
        );

        let mut session = reading_session();
        let locale = session.begin_interpretation(Uuid::new_v4(), "sage").unwrap();
        assert_eq!(locale, Locale::new("en"));
        assert_eq!(session.request_locale(), Some(&Locale::new("en")));
        assert_eq!(
            session.begin_interpretation(Uuid::new_v4(), "sage"),
            Err(SessionError::InterpretationInFlight)
        );
    }

    #[test]
    fn test_complete_interpretation_accepts_matching_locale() {
        let mut session = reading_session();
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, "sage").unwrap();

        let outcome = session.complete_interpretation(request_id, Ok(answer("bright")), &mut MockRng);

        assert_eq!(outcome, InterpretationCompletion::Accepted);
        assert_eq!(session.interpretation_status(), &InterpretationStatus::Ready);
        assert_eq!(session.interpretation().unwrap().text.as_deref(), Some("bright"));
    }

    #[test]
    fn test_complete_interpretation_failure_stays_reading() {
        let mut session = reading_session();
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, "sage").unwrap();

        let outcome = session.complete_interpretation(request_id, Err("timeout".to_owned()), &mut MockRng);

        assert_eq!(outcome, InterpretationCompletion::Failed);
        assert_eq!(session.phase(), SessionPhase::Reading);
        assert_eq!(session.draw().len(), 3);
        assert!(session.interpretation().is_none());
        assert_eq!(session.last_persona(), Some("sage"));
        assert!(session.begin_interpretation(Uuid::new_v4(), "sage").is_ok());
    }

    #[test]
    fn test_locale_change_while_pending_discards_result() {
        let mut session = reading_session();
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, "sage").unwrap();

        assert!(!session.change_locale(Locale::new("es"), &mut MockRng));
        let outcome = session.complete_interpretation(request_id, Ok(answer("bright")), &mut MockRng);

        assert_eq!(outcome, InterpretationCompletion::DiscardedStaleLocale);
        assert_eq!(session.phase(), SessionPhase::Picking);
        assert!(session.draw().is_empty());
        assert!(session.interpretation().is_none());
        assert!(session.request_locale().is_none());
    }

    #[test]
    fn test_locale_round_trip_while_pending_still_accepts() {
        let mut session = reading_session();
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, "sage").unwrap();

        session.change_locale(Locale::new("es"), &mut MockRng);
        session.change_locale(Locale::new("en"), &mut MockRng);

        assert_eq!(
            session.complete_interpretation(request_id, Ok(answer("bright")), &mut MockRng),
            InterpretationCompletion::Accepted
        );
    }

    #[test]
    fn test_locale_change_after_acceptance_resets() {
        let mut session = reading_session();
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, "sage").unwrap();
        session.complete_interpretation(request_id, Ok(answer("bright")), &mut MockRng);

        assert!(session.change_locale(Locale::new("es"), &mut MockRng));

        assert_eq!(session.phase(), SessionPhase::Picking);
        assert!(session.interpretation().is_none());
        assert_eq!(session.locale(), &Locale::new("es"));
    }

    #[test]
    fn test_answer_after_start_over_is_superseded() {
        let mut session = reading_session();
        let request_id = Uuid::new_v4();
        session.begin_interpretation(request_id, "sage").unwrap();
        session.start_over(&mut MockRng);

        let outcome = session.complete_interpretation(request_id, Ok(answer("late")), &mut MockRng);

        assert_eq!(outcome, InterpretationCompletion::Superseded);
        assert_eq!(session.phase(), SessionPhase::Picking);
        assert!(session.interpretation().is_none());
    }

    // --- deck locale ---

    fn deck_in(locale: &str, size: usize) -> Vec<DeckCard> {
        sample_deck(size)
            .into_iter()
            .map(|card| DeckCard::new(card.id, format!("{locale}-{}", card.name)))
            .collect()
    }

    #[test]
    fn test_locale_change_blocks_interpretation_until_deck_is_relocalized() {
        // Arrange
        let mut session =
            ReadingSession::new(Uuid::new_v4(), Locale::new("en"), DrawPolicy::default());
        session
            .finish_loading(
                Ok((sample_spread("ppf-3", 3, false, "line-3"), deck_in("en", 10))),
                &mut MockRng,
            )
            .unwrap();
        session.change_locale(Locale::new("es"), &mut MockRng);
        for i in [2, 5, 7] {
            session.toggle_selection(i);
        }
        assert!(session.confirm(&mut MockRng, &FixedClock::default()));

        // Act
        let refused = session.begin_interpretation(Uuid::new_v4(), "sage");
        let applied = session
            .relocalize_deck(&Locale::new("es"), deck_in("es", 10))
            .unwrap();

        // Assert
        assert_eq!(
            refused,
            Err(SessionError::DeckLocaleMismatch {
                deck: Locale::new("en"),
                active: Locale::new("es"),
            })
        );
        assert!(applied);
        assert!(session.deck_matches_locale());
        assert!(session.draw().iter().all(|d| d.card.name.starts_with("es-")));
        assert!(session.shuffled_deck().iter().all(|c| c.name.starts_with("es-")));
        assert!(session.begin_interpretation(Uuid::new_v4(), "sage").is_ok());
    }

    #[test]
    fn test_relocalize_keeps_shuffle_order_and_draw_cards() {
        let mut session = reading_session();
        let ids_before: Vec<String> = session.shuffled_deck().iter().map(|c| c.id.clone()).collect();
        let drawn_before: Vec<String> = session.draw().iter().map(|d| d.card.id.clone()).collect();
        session.change_locale(Locale::new("fr"), &mut MockRng);

        session
            .relocalize_deck(&Locale::new("fr"), deck_in("fr", 22))
            .unwrap();

        let ids_after: Vec<String> = session.shuffled_deck().iter().map(|c| c.id.clone()).collect();
        let drawn_after: Vec<String> = session.draw().iter().map(|d| d.card.id.clone()).collect();
        assert_eq!(ids_before, ids_after);
        assert_eq!(drawn_before, drawn_after);
        assert_eq!(session.phase(), SessionPhase::Reading);
    }

    #[test]
    fn test_relocalize_for_stale_locale_is_ignored() {
        let mut session = picking_session(3, false);
        session.change_locale(Locale::new("es"), &mut MockRng);
        session.change_locale(Locale::new("de"), &mut MockRng);

        let applied = session
            .relocalize_deck(&Locale::new("es"), deck_in("es", 22))
            .unwrap();

        assert!(!applied);
        assert_eq!(session.deck_locale(), &Locale::new("en"));
    }

    #[test]
    fn test_relocalize_with_missing_card_fails() {
        let mut session = picking_session(3, false);
        session.change_locale(Locale::new("es"), &mut MockRng);

        let result = session.relocalize_deck(&Locale::new("es"), deck_in("es", 5));

        assert!(matches!(result, Err(DomainError::DeckLoadFailure(_))));
        assert_eq!(session.deck_locale(), &Locale::new("en"));
    }
}
