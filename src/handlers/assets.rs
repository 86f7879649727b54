use axum::{
    http::header,
    response::{Html, IntoResponse},
};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SERVICE_WORKER_JS: &str = include_str!("../../static/sw.js");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Served from the root so its scope covers the whole site.
pub async fn service_worker() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], SERVICE_WORKER_JS)
}

pub async fn script() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], SCRIPT_JS)
}
