use actix_web::{HttpResponse, delete, get, post, web};

use crate::error::ApiError;
use crate::monitoring::{MonitorError, MonitorId, NewMonitor};
use crate::response::ApiResponse;
use crate::state::AppState;

macros_utils::routes! {
    route list_monitors,
    route get_monitor,
    route create_monitor,
    route delete_monitor,
}

#[get("/api/url-monitors")]
async fn list_monitors(state: web::Data<AppState>) -> HttpResponse {
    let monitors = state.monitors.list();
    let total = monitors.len();
    HttpResponse::Ok().json(ApiResponse::data(monitors).with_total(total))
}

#[get("/api/url-monitors/{id}")]
async fn get_monitor(
    state: web::Data<AppState>,
    id: web::Path<MonitorId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let monitor = state.monitors.get(id).ok_or(MonitorError::NotFound(id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(monitor)))
}

#[post("/api/url-monitors")]
async fn create_monitor(
    state: web::Data<AppState>,
    body: web::Json<NewMonitor>,
) -> Result<HttpResponse, ApiError> {
    let monitor = state.monitors.create(body.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(monitor).with_message("Monitor created")))
}

#[delete("/api/url-monitors/{id}")]
async fn delete_monitor(
    state: web::Data<AppState>,
    id: web::Path<MonitorId>,
) -> Result<HttpResponse, ApiError> {
    state.monitors.delete(id.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Monitor deleted")))
}
