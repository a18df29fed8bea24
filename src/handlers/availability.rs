use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    pub date: String,
}

/// Times already booked for a service on a date. Clients render the
/// complement as free and re-check by actually reserving; this listing is
/// advisory, the unique index is authoritative.
pub async fn get_availability(
    state: web::Data<AppState>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, AppError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("invalid date '{}', expected YYYY-MM-DD", query.date))
    })?;

    if state.catalog.get_by_id(query.service_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Service {}", query.service_id)));
    }

    let booked = state.slots.booked_times(query.service_id, date).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(booked)))
}
