//! Note handlers - owner-scoped CRUD.

use actix_web::{HttpResponse, web};

use campus_core::domain::Note;
use campus_shared::dto::NoteRequest;
use campus_shared::{ApiResponse, ListResponse};

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

fn validate(req: &NoteRequest) -> Result<(), AppError> {
    if req.title.is_empty() || req.title.len() > 50 {
        return Err(AppError::BadRequest(
            "Title must be between 1 and 50 characters".to_string(),
        ));
    }
    if req.body.is_empty() || req.body.len() > 255 {
        return Err(AppError::BadRequest(
            "Note must be between 1 and 255 characters".to_string(),
        ));
    }
    Ok(())
}

async fn fetch_owned(state: &AppState, user: &CurrentUser, id: i64) -> Result<Note, AppError> {
    let note = state
        .notes
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Note {} not found", id)))?;

    if !state.guard.check_ownership(&user.0, &note.ra) {
        return Err(AppError::Forbidden);
    }
    Ok(note)
}

/// GET /api/notes
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let notes = state.notes.list_by_owner(&user.0.ra).await?;
    Ok(HttpResponse::Ok().json(ListResponse::ok(notes)))
}

/// POST /api/notes
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<NoteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let note = state
        .notes
        .save(Note {
            id: 0,
            ra: user.0.ra.clone(),
            title: req.title,
            body: req.body,
            written_on: req.written_on,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(note)))
}

/// GET /api/notes/{id}
pub async fn get(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let note = fetch_owned(&state, &user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(note)))
}

/// PUT /api/notes/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<NoteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let mut note = fetch_owned(&state, &user, path.into_inner()).await?;
    note.title = req.title;
    note.body = req.body;
    note.written_on = req.written_on;

    let note = state.notes.save(note).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(note, "Note updated")))
}

/// DELETE /api/notes/{id}
pub async fn remove(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let note = fetch_owned(&state, &user, path.into_inner()).await?;
    state.notes.delete(note.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({ "deleted_id": note.id }),
        "Note deleted",
    )))
}
