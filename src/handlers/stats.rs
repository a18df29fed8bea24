use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

pub async fn get_service_stats(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let service_id = path.into_inner();
    if state.catalog.get_by_id(service_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Service {}", service_id)));
    }

    let stats = state.stats.stats_for_service(service_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats)))
}

// Owner ids are opaque; an unknown owner simply aggregates to zeros.
pub async fn get_owner_stats(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let stats = state.stats.stats_for_owner(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats)))
}
