use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{StaffInput, UserInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub owner_id: Uuid,
}

pub async fn create_user(
    state: web::Data<AppState>,
    input: web::Json<UserInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(AppError::validation("name and email must not be empty"));
    }

    let user = state.users.create(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

pub async fn create_staff(
    state: web::Data<AppState>,
    input: web::Json<StaffInput>,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(AppError::validation("name and email must not be empty"));
    }

    let staff = state.staff.create(input).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(staff)))
}

pub async fn get_staff(
    state: web::Data<AppState>,
    query: web::Query<StaffListQuery>,
) -> Result<HttpResponse, AppError> {
    let staff = state.staff.list_by_owner(query.owner_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(staff)))
}
