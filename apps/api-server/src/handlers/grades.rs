//! Grade handlers - owner-scoped CRUD.

use actix_web::{HttpResponse, web};

use campus_core::domain::Grade;
use campus_shared::dto::GradeRequest;
use campus_shared::{ApiResponse, ListResponse};

use crate::middleware::{AppError, AppResult, CurrentUser};
use crate::state::AppState;

fn validate(req: &GradeRequest) -> Result<(), AppError> {
    if !(1..=4).contains(&req.term) {
        return Err(AppError::BadRequest(
            "Term must be between 1 and 4".to_string(),
        ));
    }
    if let Some(score) = req.score {
        if !(0.0..=10.0).contains(&score) {
            return Err(AppError::BadRequest(
                "Score must be between 0 and 10".to_string(),
            ));
        }
    }
    Ok(())
}

async fn fetch_owned(state: &AppState, user: &CurrentUser, id: i64) -> Result<Grade, AppError> {
    let grade = state
        .grades
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Grade {} not found", id)))?;

    if !state.guard.check_ownership(&user.0, &grade.ra) {
        return Err(AppError::Forbidden);
    }
    Ok(grade)
}

/// GET /api/grades
pub async fn list(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let grades = state.grades.list_by_owner(&user.0.ra).await?;
    Ok(HttpResponse::Ok().json(ListResponse::ok(grades)))
}

/// POST /api/grades
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<GradeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let grade = state
        .grades
        .save(Grade {
            id: 0,
            ra: user.0.ra.clone(),
            subject_id: req.subject_id,
            term: req.term,
            score: req.score,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(grade)))
}

/// GET /api/grades/{id}
pub async fn get(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let grade = fetch_owned(&state, &user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(grade)))
}

/// PUT /api/grades/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<GradeRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req)?;

    let mut grade = fetch_owned(&state, &user, path.into_inner()).await?;
    grade.subject_id = req.subject_id;
    grade.term = req.term;
    grade.score = req.score;

    let grade = state.grades.save(grade).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(grade, "Grade updated")))
}

/// DELETE /api/grades/{id}
pub async fn remove(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let grade = fetch_owned(&state, &user, path.into_inner()).await?;
    state.grades.delete(grade.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        serde_json::json!({ "deleted_id": grade.id }),
        "Grade deleted",
    )))
}
