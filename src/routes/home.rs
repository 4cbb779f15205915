use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;

/// Entry point of the newsletter: always sends visitors to the subscribe form.
pub async fn home() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.append(LOCATION, HeaderValue::from_static("/subscriber"));

    (StatusCode::FOUND, headers)
}
