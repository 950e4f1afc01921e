//! Timetable handlers - owner-scoped CRUD.

use actix_web::{HttpResponse, web};

use campus_core::domain::ScheduleEntry;
use campus_shared::dto::ScheduleRequest;
use campus_shared::{ApiResponse, ListResponse};

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

fn validate(req: &ScheduleRequest) -> Result<(), AppError> {
    // Monday through Saturday.
    if !(1..=6).contains(&req.weekday) {
        return Err(AppError::BadRequest(
            "Weekday must be between 1 and 6".to_string(),
        ));
    }
    Ok(())
}

async fn fetch_owned(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
) -> Result<ScheduleEntry, AppError> {
    let entry = state
        .schedule
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Schedule entry {} not found", id)))?;

    if !state.guard.check_ownership(&user.0, &entry.ra) {
        return Err(AppError::Forbidden);
    }
    Ok(entry)
}

/// GET /api/schedule
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let entries = state.schedule.list_by_owner(&user.0.ra).await?;
    Ok(HttpResponse::Ok().json(ListResponse::ok(entries)))
}

/// POST /api/schedule
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<ScheduleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let entry = state
        .schedule
        .save(ScheduleEntry {
            id: 0,
            ra: user.0.ra.clone(),
            weekday: req.weekday,
            periods: req.periods,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(entry)))
}

/// GET /api/schedule/{id}
pub async fn get(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let entry = fetch_owned(&state, &user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(entry)))
}

/// PUT /api/schedule/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<ScheduleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let mut entry = fetch_owned(&state, &user, path.into_inner()).await?;
    entry.weekday = req.weekday;
    entry.periods = req.periods;

    let entry = state.schedule.save(entry).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(entry, "Schedule entry updated")))
}

/// DELETE /api/schedule/{id}
pub async fn remove(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let entry = fetch_owned(&state, &user, path.into_inner()).await?;
    state.schedule.delete(entry.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({ "deleted_id": entry.id }),
        "Schedule entry deleted",
    )))
}
