use crate::db::RepositoryError;
use crate::enums::responses::ErrorResponse;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};
use std::fmt::{Debug, Display};

pub fn status_for(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::ValidationError(_) | RepositoryError::InvalidReference(_) => {
            StatusCode::BAD_REQUEST
        }
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::DatabaseError(_)
        | RepositoryError::ConnectionPoolError(_)
        | RepositoryError::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn error_response(err: &RepositoryError) -> HttpResponse {
    HttpResponse::build(status_for(err)).json(ErrorResponse {
        error: err.to_string(),
    })
}

/// Extractor error handler for JSON bodies, query strings and path segments.
pub(crate) fn bad_request_handler<E>(err: E, req: &HttpRequest) -> Error
where
    E: Debug + Display + 'static,
{
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: err.to_string(),
    });
    InternalError::from_response(err, response).into()
}
