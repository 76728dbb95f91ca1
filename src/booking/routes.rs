//! Booking API route handlers

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::backend::BackendError;
use crate::booking::calculators::calculate_quote;
use crate::booking::models::{BookingDraft, Space};
use crate::booking::requests::{ContactForm, QuoteRequest, WizardRequest};
use crate::booking::responses::{QuoteResponse, StepValidationResponse, WizardStateResponse};
use crate::booking::validation::{validate_all, validate_step, WizardStep};
use crate::booking::wizard::{BookingWizard, WizardError};
use crate::error::{AppError, Result};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(quote))
        .route("/spaces/:space_id/quote", post(space_quote))
        .route("/spaces/:space_id/steps/:step/validate", post(validate))
        .route("/spaces/:space_id/wizard/next", post(wizard_next))
        .route("/spaces/:space_id/wizard/back", post(wizard_back))
        .route("/spaces/:space_id/bookings", post(submit_booking))
}

/// Quote against a price supplied by the caller
async fn quote(Json(request): Json<QuoteRequest>) -> Json<QuoteResponse> {
    let quote = calculate_quote(&request.price, &request.draft);
    Json(QuoteResponse::new(quote, request.price.unit))
}

/// Quote against a space's current price
async fn space_quote(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(draft): Json<BookingDraft>,
) -> Result<Json<QuoteResponse>> {
    let space = load_space(&state, &space_id).await?;
    let quote = calculate_quote(&space.price, &draft);
    Ok(Json(QuoteResponse::new(quote, space.price.unit)))
}

async fn validate(
    State(state): State<AppState>,
    Path((space_id, step)): Path<(String, usize)>,
    Json(draft): Json<BookingDraft>,
) -> Result<Json<StepValidationResponse>> {
    let step = parse_step(step)?;
    let space = load_space(&state, &space_id).await?;
    let errors = validate_step(step, &draft, space.price.unit);
    Ok(Json(StepValidationResponse::new(step, errors)))
}

async fn wizard_next(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(request): Json<WizardRequest>,
) -> Result<Json<WizardStateResponse>> {
    let mut wizard = resume_wizard(&state, &space_id, request).await?;
    if wizard.next().is_ok() {
        info!(space_id = %space_id, step = wizard.step().index(), "wizard advanced");
    }
    Ok(Json(WizardStateResponse::from(&wizard)))
}

async fn wizard_back(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(request): Json<WizardRequest>,
) -> Result<Json<WizardStateResponse>> {
    let mut wizard = resume_wizard(&state, &space_id, request).await?;
    wizard.back();
    Ok(Json(WizardStateResponse::from(&wizard)))
}

/// Validate the whole draft and forward it to the backend
async fn submit_booking(
    State(state): State<AppState>,
    Path(space_id): Path<String>,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let space = load_space(&state, &space_id).await?;

    let mut errors = validate_all(&draft, space.price.unit);
    errors.extend(ContactForm::from_draft(&draft).format_errors());
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let wizard = BookingWizard::resume(space.price.clone(), WizardStep::Review, draft, BTreeSet::new());
    let submission = wizard.submission(&space_id).map_err(|e| match e {
        WizardError::Invalid(errors) => AppError::Validation(errors),
        WizardError::Unpriced => AppError::BadRequest(e.to_string()),
        WizardError::NotAtReview(_) => AppError::Internal(e.to_string()),
    })?;

    let created = state.backend.create_booking(&submission).await?;
    info!(
        space_id = %space_id,
        total_price = %submission.total_price,
        "booking submitted"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

async fn resume_wizard(
    state: &AppState,
    space_id: &str,
    request: WizardRequest,
) -> Result<BookingWizard> {
    let step = parse_step(request.step)?;
    let space = load_space(state, space_id).await?;
    Ok(BookingWizard::resume(
        space.price.clone(),
        step,
        request.draft,
        request.touched,
    ))
}

async fn load_space(state: &AppState, space_id: &str) -> Result<Arc<Space>> {
    let valid = !space_id.is_empty()
        && space_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(AppError::BadRequest(format!("Invalid space id '{}'", space_id)));
    }

    state
        .cache
        .space(&state.backend, space_id)
        .await
        .map_err(|e| match e {
            BackendError::NotFound(_) => AppError::NotFound(format!("space '{}'", space_id)),
            other => AppError::Backend(other),
        })
}

fn parse_step(index: usize) -> Result<WizardStep> {
    WizardStep::from_index(index)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown wizard step {}", index)))
}
