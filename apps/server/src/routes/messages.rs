use actix_web::{HttpResponse, get, post, web};

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::NewMessage;

macros_utils::routes! {
    route list_messages,
    route post_message,
}

#[get("/api/messages")]
async fn list_messages(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::data(state.messages.list()))
}

#[post("/api/messages")]
async fn post_message(
    state: web::Data<AppState>,
    body: web::Json<NewMessage>,
) -> Result<HttpResponse, ApiError> {
    let message = state.messages.post(body.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(message).with_message("Message posted")))
}
