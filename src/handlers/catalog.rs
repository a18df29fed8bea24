use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::database::models::ServiceInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    pub owner_id: Uuid,
}

pub async fn create_service(
    state: web::Data<AppState>,
    input: web::Json<ServiceInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    if input.name.trim().is_empty() {
        return Err(AppError::validation("service name must not be empty"));
    }
    if input.base_price_cents < 0 {
        return Err(AppError::validation("base price must not be negative"));
    }

    let service = state.catalog.create(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(service)))
}

pub async fn get_service(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let service_id = path.into_inner();
    let service = state
        .catalog
        .get_by_id(service_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {}", service_id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(service)))
}

pub async fn get_services(
    state: web::Data<AppState>,
    query: web::Query<ServiceListQuery>,
) -> Result<HttpResponse, AppError> {
    let services = state.catalog.list_by_owner(query.owner_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(services)))
}
