//! Routes for reading sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use arcana_core::locale::Locale;
use arcana_interpretation::application::gateway::InterpretationGateway;
use arcana_session::application::command_handlers::load_spread_and_deck;
use arcana_session::application::query_handlers::{SessionView, session_view};
use arcana_session::domain::aggregates::{
    InterpretationCompletion, ReadingSession, SelectionChange,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub spread_id: String,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Request body for POST /{id}/select.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Position in the shuffled deck.
    pub index: usize,
}

/// Request body for PUT /{id}/locale.
#[derive(Debug, Deserialize)]
pub struct LocaleRequest {
    pub locale: String,
}

/// Request body for POST /{id}/interpretation.
#[derive(Debug, Deserialize)]
pub struct InterpretationRequestBody {
    pub persona_id: String,
}

/// Response body for commands that may be refused without an error.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Whether the command changed the session.
    pub applied: bool,
    pub session: SessionView,
}

/// Response body for PUT /{id}/locale.
#[derive(Debug, Serialize)]
pub struct LocaleResponse {
    /// Whether the change sent the session back to picking.
    pub reset: bool,
    pub session: SessionView,
}

/// Response body for interpretation requests.
#[derive(Debug, Serialize)]
pub struct InterpretationResponse {
    /// `accepted`, `failed`, `discarded_stale_locale`, or `superseded`.
    pub completion: &'static str,
    pub session: SessionView,
}

fn completion_name(completion: InterpretationCompletion) -> &'static str {
    match completion {
        InterpretationCompletion::Accepted => "accepted",
        InterpretationCompletion::Failed => "failed",
        InterpretationCompletion::DiscardedStaleLocale => "discarded_stale_locale",
        InterpretationCompletion::Superseded => "superseded",
    }
}

/// POST /
#[instrument(skip(state, request), fields(spread_id = %request.spread_id))]
async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let locale = request.locale.map(Locale::new).unwrap_or_default();
    let loaded = load_spread_and_deck(
        &request.spread_id,
        &locale,
        state.spreads.as_ref(),
        state.decks.as_ref(),
    )
    .await;

    let mut session = ReadingSession::new(Uuid::new_v4(), locale, state.policy);
    {
        let mut rng = state
            .rng
            .lock()
            .map_err(|e| ApiError::Internal(format!("RNG mutex poisoned: {e}")))?;
        // A failed load leaves the session in the error phase; the view
        // reports it.
        let _ = session.finish_loading(loaded, &mut *rng);
    }

    info!(session_id = %session.id(), phase = ?session.phase(), "session opened");
    let view = session_view(&session);
    state.insert_session(session)?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// DELETE /{id}
#[instrument(skip(state))]
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.remove_session(id)?;
    info!(session_id = %id, "session closed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /{id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let view = state.with_session(id, |session, _| session_view(session))?;
    Ok(Json(view))
}

/// POST /{id}/select
#[instrument(skip(state, request), fields(index = request.index))]
async fn select_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let response = state.with_session(id, |session, _| {
        let change = session.toggle_selection(request.index);
        CommandResponse {
            applied: change != SelectionChange::Rejected,
            session: session_view(session),
        }
    })?;
    Ok(Json(response))
}

/// POST /{id}/confirm
#[instrument(skip(state))]
async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let clock = state.clock.clone();
    let response = state.with_session(id, |session, rng| {
        let applied = session.confirm(rng, clock.as_ref());
        CommandResponse {
            applied,
            session: session_view(session),
        }
    })?;
    Ok(Json(response))
}

/// POST /{id}/start-over
#[instrument(skip(state))]
async fn start_over(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommandResponse>, ApiError> {
    let response = state.with_session(id, |session, rng| {
        let applied = session.start_over(rng);
        CommandResponse {
            applied,
            session: session_view(session),
        }
    })?;
    Ok(Json(response))
}

/// PUT /{id}/locale
///
/// Card names are re-fetched for the new locale without holding the session
/// lock. A later locale change wins; the stale deck is then ignored.
#[instrument(skip(state, request), fields(locale = %request.locale))]
async fn change_locale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LocaleRequest>,
) -> Result<Json<LocaleResponse>, ApiError> {
    let locale = Locale::new(request.locale);
    let (reset, needs_deck) = state.with_session(id, |session, rng| {
        let reset = session.change_locale(locale.clone(), rng);
        let needs_deck = !session.shuffled_deck().is_empty() && !session.deck_matches_locale();
        (reset, needs_deck)
    })?;

    if needs_deck {
        let deck = state.decks.load_deck(&locale).await?;
        state.with_session(id, |session, _| session.relocalize_deck(&locale, deck))??;
    }

    let session = state.with_session(id, |session, _| session_view(session))?;
    Ok(Json(LocaleResponse { reset, session }))
}

/// Sends the pending request and applies the answer. The session lock is
/// released while the service works.
async fn run_interpretation(
    state: &AppState,
    id: Uuid,
    persona: Option<String>,
) -> Result<InterpretationResponse, ApiError> {
    let gateway = &state.gateway;
    let pending = state.with_session(id, |session, _| {
        let persona = match persona {
            Some(persona) => persona,
            None => InterpretationGateway::retry_persona(session)?,
        };
        gateway.begin(session, &persona)
    })??;

    let outcome = gateway.dispatch(&pending).await;

    state.with_session(id, |session, rng| {
        let completion = gateway.complete(session, pending.request_id, outcome, rng);
        info!(
            session_id = %id,
            request_id = %pending.request_id,
            completion = completion_name(completion),
            "interpretation completed"
        );
        InterpretationResponse {
            completion: completion_name(completion),
            session: session_view(session),
        }
    })
}

/// POST /{id}/interpretation
#[instrument(skip(state, request), fields(persona_id = %request.persona_id))]
async fn request_interpretation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InterpretationRequestBody>,
) -> Result<Json<InterpretationResponse>, ApiError> {
    let response = run_interpretation(&state, id, Some(request.persona_id)).await?;
    Ok(Json(response))
}

/// POST /{id}/interpretation/retry
#[instrument(skip(state))]
async fn retry_interpretation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterpretationResponse>, ApiError> {
    let response = run_interpretation(&state, id, None).await?;
    Ok(Json(response))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{id}", get(get_session).delete(delete_session))
        .route("/{id}/select", post(select_card))
        .route("/{id}/confirm", post(confirm))
        .route("/{id}/start-over", post(start_over))
        .route("/{id}/locale", put(change_locale))
        .route("/{id}/interpretation", post(request_interpretation))
        .route("/{id}/interpretation/retry", post(retry_interpretation))
}
