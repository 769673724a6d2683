mod assets;
mod health;
mod messages;
mod monitors;
mod stats;
mod users;

use actix_cors::Cors;
use actix_web::web;

pub use assets::serve_static;

use crate::error::ApiError;

macros_utils::routes! {
    module health,
    module users,
    module messages,
    module stats,
    module monitors,
}

/// Register the routes along with extractor configs that render
/// extraction failures as JSON envelopes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(path_config()).configure(routes);
}

/// Cross-origin access for browser clients on any origin
pub fn cors() -> Cors {
    Cors::permissive()
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(format!("Invalid JSON body: {err}")).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ApiError::NotFound(err.to_string()).into())
}
