//! REST surface for the onboarding wizard.
//!
//! Each step's view owns its submission route; the route validates, awaits
//! the simulated submission, mutates through the manager, and hands back
//! the refreshed status so the client can render the next step.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::billing::{CardDetails, CardRules};
use crate::error::DatabaseError;
use crate::invites::EmailRule;
use crate::plans::{PLANS, find_plan};
use crate::submit::SampleSubmission;

use super::manager::OnboardingManager;

/// Shared state for the onboarding routes.
#[derive(Clone)]
pub struct RouteState {
    pub manager: Arc<OnboardingManager>,
    pub submission: SampleSubmission,
    pub card_rules: Arc<CardRules>,
    pub email_rule: Arc<EmailRule>,
}

impl RouteState {
    pub fn new(manager: Arc<OnboardingManager>, submission: SampleSubmission) -> Self {
        Self {
            manager,
            submission,
            card_rules: Arc::new(CardRules::default()),
            email_rule: Arc::new(EmailRule::default()),
        }
    }
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: RouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/plans", get(list_plans))
        .route("/api/onboarding/plan", post(submit_plan))
        .route("/api/onboarding/billing", post(submit_billing))
        .route("/api/onboarding/invites", post(add_invite))
        .route("/api/onboarding/invites/{index}", delete(remove_invite))
        .route("/api/onboarding/finish", post(finish))
        .route("/api/onboarding/back", post(go_back))
        .route("/api/onboarding/clear", post(clear_session))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Response helpers ────────────────────────────────────────────────

fn internal_error(e: DatabaseError) -> Response {
    error!(error = %e, "Onboarding request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "internal error"})),
    )
        .into_response()
}

fn unprocessable(body: serde_json::Value) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

fn wrong_step(expected: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(serde_json::json!({"error": format!("Not on the {expected} step")})),
    )
        .into_response()
}

/// The refreshed status, as every mutating route's success response.
async fn status_response(state: &RouteState) -> Response {
    match state.manager.status().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Check that the wizard is currently on `step_id`; each step's routes
/// only act for their own view.
async fn require_step(state: &RouteState, step_id: &str) -> Result<(), Response> {
    let status = state.manager.status().await.map_err(internal_error)?;
    match status.current_step {
        Some(current) if current.id == step_id => Ok(()),
        _ => Err(wrong_step(step_id)),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "onboard"
    }))
}

/// GET /api/onboarding/status
async fn get_status(State(state): State<RouteState>) -> Response {
    status_response(&state).await
}

/// GET /api/onboarding/plans
async fn list_plans() -> impl IntoResponse {
    Json(PLANS)
}

#[derive(Debug, Deserialize)]
struct PlanSelection {
    plan: String,
}

/// POST /api/onboarding/plan — select a plan and move to billing.
async fn submit_plan(
    State(state): State<RouteState>,
    Json(body): Json<PlanSelection>,
) -> Response {
    if let Err(resp) = require_step(&state, "pricing").await {
        return resp;
    }
    let Some(plan) = find_plan(&body.plan) else {
        return unprocessable(serde_json::json!({
            "error": format!("Unknown plan: {}", body.plan)
        }));
    };

    state.submission.run().await;

    if let Err(e) = state.manager.set_selected_plan(plan.id.to_string()).await {
        return internal_error(e);
    }
    if let Err(e) = state.manager.advance().await {
        return internal_error(e);
    }
    info!(plan = plan.id, "Plan selected");
    status_response(&state).await
}

/// POST /api/onboarding/billing — submit card details and move to invites.
async fn submit_billing(
    State(state): State<RouteState>,
    Json(card): Json<CardDetails>,
) -> Response {
    if let Err(resp) = require_step(&state, "billing").await {
        return resp;
    }
    if let Err(errors) = state.card_rules.validate(&card) {
        return unprocessable(serde_json::json!({"errors": errors}));
    }

    state.submission.run().await;

    if let Err(e) = state.manager.set_billing(Some(card)).await {
        return internal_error(e);
    }
    if let Err(e) = state.manager.advance().await {
        return internal_error(e);
    }
    info!("Billing details captured");
    status_response(&state).await
}

#[derive(Debug, Deserialize)]
struct InviteRequest {
    email: String,
}

/// POST /api/onboarding/invites — add one teammate email.
async fn add_invite(
    State(state): State<RouteState>,
    Json(body): Json<InviteRequest>,
) -> Response {
    if let Err(resp) = require_step(&state, "invites").await {
        return resp;
    }
    if !state.email_rule.is_valid(&body.email) {
        return unprocessable(serde_json::json!({
            "error": "Invalid email address"
        }));
    }

    let status = match state.manager.status().await {
        Ok(status) => status,
        Err(e) => return internal_error(e),
    };
    let mut invites = status.invites;
    invites.push(body.email);

    if let Err(e) = state.manager.set_invites(invites).await {
        return internal_error(e);
    }
    status_response(&state).await
}

/// DELETE /api/onboarding/invites/{index} — remove one invite by position.
async fn remove_invite(
    State(state): State<RouteState>,
    Path(index): Path<usize>,
) -> Response {
    if let Err(resp) = require_step(&state, "invites").await {
        return resp;
    }

    let status = match state.manager.status().await {
        Ok(status) => status,
        Err(e) => return internal_error(e),
    };
    let mut invites = status.invites;
    if index >= invites.len() {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "No invite at that position"})),
        )
            .into_response();
    }
    invites.remove(index);

    if let Err(e) = state.manager.set_invites(invites).await {
        return internal_error(e);
    }
    status_response(&state).await
}

/// POST /api/onboarding/finish — complete the wizard from the last step.
/// Mirrors the view: the finish control is disabled until at least one
/// teammate has been invited.
async fn finish(State(state): State<RouteState>) -> Response {
    if let Err(resp) = require_step(&state, "invites").await {
        return resp;
    }
    let status = match state.manager.status().await {
        Ok(status) => status,
        Err(e) => return internal_error(e),
    };
    if status.invites.is_empty() {
        return unprocessable(serde_json::json!({
            "error": "Invite at least one teammate before finishing"
        }));
    }

    state.submission.run().await;

    if let Err(e) = state.manager.advance().await {
        return internal_error(e);
    }
    info!("Onboarding completed");
    status_response(&state).await
}

/// POST /api/onboarding/back — go back one step (no-op on the first).
async fn go_back(State(state): State<RouteState>) -> Response {
    if let Err(e) = state.manager.retreat().await {
        return internal_error(e);
    }
    status_response(&state).await
}

/// POST /api/onboarding/clear — drop the session.
///
/// The completed view fires this exactly once on mount; nothing of the
/// response is consumed, hence 204.
async fn clear_session(State(state): State<RouteState>) -> Response {
    match state.manager.clear_session().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => internal_error(e),
    }
}
