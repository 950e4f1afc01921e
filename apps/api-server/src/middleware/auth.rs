//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use campus_core::domain::Identity;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated identity extractor.
///
/// Use this in handlers to require a valid bearer token:
/// ```ignore
/// async fn protected_route(user: CurrentUser) -> impl Responder {
///     format!("Hello, {}!", user.0.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req).map(str::to_owned);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            // Missing or non-Bearer header fails exactly like a bad token.
            let token = token.ok_or(AppError::Unauthorized)?;

            let identity = state.guard.authenticate(&token).await?;
            Ok(CurrentUser(identity))
        })
    }
}
