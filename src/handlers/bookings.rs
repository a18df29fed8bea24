use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{BookingInput, BookingStatus, CancelOutcome};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub user_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
}

pub async fn create_booking(
    state: web::Data<AppState>,
    input: web::Json<BookingInput>,
) -> Result<HttpResponse, AppError> {
    let booking = state.bookings.create(input.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(booking)))
}

/// List bookings filtered by exactly one of user, service, or owner.
/// Cancelled bookings are included: history views need them, and the status
/// field tells them apart.
pub async fn get_bookings(
    state: web::Data<AppState>,
    query: web::Query<BookingListQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let bookings = match (query.user_id, query.service_id, query.owner_id) {
        (Some(user_id), None, None) => state.bookings.list_by_user(user_id).await?,
        (None, Some(service_id), None) => state.bookings.list_by_service(service_id).await?,
        (None, None, Some(owner_id)) => state.bookings.list_by_owner(owner_id).await?,
        _ => {
            return Err(AppError::validation(
                "provide exactly one of user_id, service_id, owner_id",
            ));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(bookings)))
}

pub async fn get_booking(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = state.bookings.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}

/// Newest-first audit trail for a booking: creation, status changes,
/// cancellation, and assignment churn.
pub async fn get_booking_activity(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let trail = state.bookings.activity_trail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(trail)))
}

pub async fn cancel_booking(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    let message = match state.bookings.cancel(booking_id).await? {
        CancelOutcome::Cancelled => "Booking cancelled",
        CancelOutcome::AlreadyCancelled => "Booking was already cancelled",
    };

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, message)))
}

pub async fn update_booking_status(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    input: web::Json<StatusInput>,
) -> Result<HttpResponse, AppError> {
    let status = input
        .status
        .parse::<BookingStatus>()
        .map_err(AppError::validation)?;

    let booking = state
        .bookings
        .update_status(path.into_inner(), status)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}
