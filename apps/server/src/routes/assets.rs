use std::path::{Component, Path, PathBuf};

use actix_web::http::{Method, header::ContentType};
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::error::ApiError;
use crate::state::AppState;

/// Fallback for every unmatched request: a file from the static directory,
/// else its `index.html`, else a 404 envelope. Unknown `/api` paths always
/// get the 404.
pub async fn serve_static(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let not_found = || ApiError::NotFound(format!("No route for {}", req.path())).error_response();

    let readable = *req.method() == Method::GET || *req.method() == Method::HEAD;
    if !readable || req.path().starts_with("/api/") {
        return not_found();
    }
    let Some(root) = state.static_dir() else {
        return not_found();
    };

    if let Some(path) = resolve(root, req.path()) {
        if let Ok(bytes) = tokio::fs::read(&path).await {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            return HttpResponse::Ok().content_type(mime.as_ref()).body(bytes);
        }
    }

    match tokio::fs::read(root.join("index.html")).await {
        Ok(bytes) => HttpResponse::Ok().insert_header(ContentType::html()).body(bytes),
        Err(_) => not_found(),
    }
}

/// Map a request path into `root`, refusing anything but plain components
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));

    if relative.as_os_str().is_empty()
        || !relative.components().all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(relative))
}
