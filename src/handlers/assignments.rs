use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::database::models::AssignmentInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::UnassignOutcome;

#[derive(Debug, Deserialize)]
pub struct AssignableQuery {
    pub owner_id: Uuid,
    pub booking_id: Uuid,
}

pub async fn create_assignment(
    state: web::Data<AppState>,
    input: web::Json<AssignmentInput>,
) -> Result<HttpResponse, AppError> {
    let assignment = state
        .assignments
        .assign(input.booking_id, input.staff_id)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(assignment)))
}

/// Unassign by the `(booking_id, staff_id)` composite key. Repeating a
/// successful unassign stays 204; a pair that never existed is 404.
pub async fn delete_assignment(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (booking_id, staff_id) = path.into_inner();
    match state.assignments.unassign(booking_id, staff_id).await? {
        UnassignOutcome::Released | UnassignOutcome::AlreadyReleased => {
            Ok(HttpResponse::NoContent().finish())
        }
    }
}

pub async fn get_booking_assignments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let assignments = state.assignments.list_by_booking(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assignments)))
}

pub async fn get_assignable_staff(
    state: web::Data<AppState>,
    query: web::Query<AssignableQuery>,
) -> Result<HttpResponse, AppError> {
    let staff = state
        .assignments
        .assignable_staff(query.owner_id, query.booking_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(staff)))
}
