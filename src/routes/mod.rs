use actix_web::http::StatusCode;
use actix_web::{HttpResponse, error, web};
use serde::Serialize;

pub mod categories;

/// JSON body attached to error responses that carry a description.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or_default().to_string(),
        message: message.into(),
    })
}

/// Turn an extractor failure (body, query string or path) into a 400 with an
/// [`ErrorBody`].
fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = error_response(StatusCode::BAD_REQUEST, err.to_string());
    error::InternalError::from_response(err, response).into()
}

/// Register the extractor error handlers and every API route.
///
/// Handlers expect `web::Data<DieselRepository>` and
/// `web::Data<PaginationConfig>` to be registered on the `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(
            web::scope("/api/v1/categorias")
                .route("", web::get().to(categories::list_categories))
                .route("", web::post().to(categories::create_category))
                .route("/{id}", web::get().to(categories::get_category))
                .route("/{id}", web::put().to(categories::update_category))
                .route("/{id}", web::delete().to(categories::delete_category)),
        );
}
