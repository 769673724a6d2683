use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::{NewUser, UserUpdate};

macros_utils::routes! {
    route list_users,
    route get_user,
    route create_user,
    route update_user,
    route delete_user,
}

fn user_not_found(id: u32) -> ApiError {
    ApiError::NotFound(format!("User {id} not found"))
}

#[get("/api/users")]
async fn list_users(state: web::Data<AppState>) -> HttpResponse {
    let users = state.users.list();
    let total = users.len();
    HttpResponse::Ok().json(ApiResponse::data(users).with_total(total))
}

#[get("/api/users/{id}")]
async fn get_user(state: web::Data<AppState>, id: web::Path<u32>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let user = state.users.get(id).ok_or_else(|| user_not_found(id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(user)))
}

#[post("/api/users")]
async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ApiError> {
    let user = state.users.create(body.into_inner())?;
    tracing::info!(user_id = user.id, "User created");
    Ok(HttpResponse::Ok().json(ApiResponse::data(user).with_message("User created")))
}

#[put("/api/users/{id}")]
async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<u32>,
    body: web::Json<UserUpdate>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let user = state.users.update(id, body.into_inner()).ok_or_else(|| user_not_found(id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(user).with_message("User updated")))
}

#[delete("/api/users/{id}")]
async fn delete_user(state: web::Data<AppState>, id: web::Path<u32>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    if !state.users.delete(id) {
        return Err(user_not_found(id));
    }
    tracing::info!(user_id = id, "User deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted")))
}
