use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[get("/")]
pub async fn handler() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
