//! Calendar event handlers - owner-scoped CRUD.

use actix_web::{HttpResponse, web};

use campus_core::domain::CalendarEvent;
use campus_shared::dto::CalendarEventRequest;
use campus_shared::{ApiResponse, ListResponse};

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

async fn fetch_owned(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> Result<CalendarEvent, AppError> {
    let event = state
        .calendar
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Calendar event {} not found", id)))?;

    if !state.guard.check_ownership(&user.0, &event.ra) {
        return Err(AppError::Forbidden);
    }
    Ok(event)
}

/// GET /api/calendar
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let events = state.calendar.list_by_owner(&user.0.ra).await?;
    Ok(HttpResponse::Ok().json(ListResponse::ok(events)))
}

/// POST /api/calendar
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CalendarEventRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let event = state
        .calendar
        .save(CalendarEvent {
            id: 0,
            ra: user.0.ra.clone(),
            date: req.date,
            kind_id: req.kind_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(event)))
}

/// GET /api/calendar/{id}
pub async fn get(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let event = fetch_owned(&state, &user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(event)))
}

/// PUT /api/calendar/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<CalendarEventRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut event = fetch_owned(&state, &user, path.into_inner()).await?;
    event.date = req.date;
    event.kind_id = req.kind_id;

    let event = state.calendar.save(event).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(event, "Calendar event updated")))
}

/// DELETE /api/calendar/{id}
pub async fn remove(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let event = fetch_owned(&state, &user, path.into_inner()).await?;
    state.calendar.delete(event.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({ "deleted_id": event.id }),
        "Calendar event deleted",
    )))
}
