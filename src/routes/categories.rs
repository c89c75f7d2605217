use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};

use crate::forms::categories::{CategoryForm, CategoryFormPayload};
use crate::pagination::{PageParams, PaginationConfig};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::ServiceError;
use crate::services::categories::{
    create_category as create_category_service, delete_category as delete_category_service,
    get_category as get_category_service, list_categories as list_categories_service,
    update_category as update_category_service,
};

pub async fn list_categories(
    params: web::Query<PageParams>,
    repo: web::Data<DieselRepository>,
    pagination: web::Data<PaginationConfig>,
) -> impl Responder {
    log::info!("list categories {:?}", params.0);

    match list_categories_service(params.into_inner(), pagination.get_ref(), repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(ServiceError::Form(message)) => error_response(StatusCode::BAD_REQUEST, message),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn get_category(
    category_id: web::Path<i64>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    log::info!("get category id={category_id}");

    match get_category_service(category_id, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => error_response(
            StatusCode::NOT_FOUND,
            format!("Categoría con ID {category_id} no encontrada"),
        ),
        Err(ServiceError::Form(message)) => error_response(StatusCode::BAD_REQUEST, message),
        Err(err) => {
            log::error!("Failed to get category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn create_category(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    log::info!("create category");

    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, ServiceError::from(e).to_string());
        }
    };

    match create_category_service(payload, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(ServiceError::Form(message)) => error_response(StatusCode::BAD_REQUEST, message),
        Err(err) => {
            log::error!("Failed to create category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn update_category(
    category_id: web::Path<i64>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CategoryForm>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    log::info!("update category id={category_id}");

    let payload: CategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, ServiceError::from(e).to_string());
        }
    };

    match update_category_service(category_id, payload, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => error_response(StatusCode::BAD_REQUEST, message),
        Err(err) => {
            log::error!("Failed to update category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn delete_category(
    category_id: web::Path<i64>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    log::info!("delete category id={category_id}");

    match delete_category_service(category_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::Form(message)) => error_response(StatusCode::BAD_REQUEST, message),
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
