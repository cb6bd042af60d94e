//! Instructional landing page
//!
//! Shown only on the bare root path; every tenant-scoped path serves
//! script content instead.

use axum::response::Html;

const LANDING_PAGE: &str = include_str!("../../static/index.html");

/// Setup instructions for the service
pub async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
