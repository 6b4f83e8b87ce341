//! HTML rendering of [`AppError`] for gate pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: &'static str,
    pub message: &'static str,
}

/// Gate page failure.
///
/// Unknown identifiers render the 404 page; anything else renders the same
/// page with status 500 and is logged.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if self.0.is_not_found() {
            let page = ErrorTemplate {
                title: "Link not found",
                message: "This short link does not exist or has been removed.",
            };
            return (StatusCode::NOT_FOUND, page).into_response();
        }

        tracing::error!(code = self.0.code(), "Gate page failed: {}", self.0);

        let page = ErrorTemplate {
            title: "Something went wrong",
            message: "Please try again in a moment.",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
    }
}
