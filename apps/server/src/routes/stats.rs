use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

macros_utils::routes! {
    route stats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    user_count: usize,
    message_count: usize,
    monitor_count: usize,
    server: &'static str,
    timestamp: DateTime<Utc>,
}

#[get("/api/stats")]
async fn stats(state: web::Data<AppState>) -> HttpResponse {
    let stats = Stats {
        user_count: state.users.len(),
        message_count: state.messages.len(),
        monitor_count: state.monitors.len(),
        server: "actix-web",
        timestamp: Utc::now(),
    };

    HttpResponse::Ok().json(ApiResponse::data(stats))
}
