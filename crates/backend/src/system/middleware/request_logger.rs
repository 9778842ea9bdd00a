use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::time::Duration;

use crate::shared::format::format_number;

// ANSI colours: cyan for 2xx, yellow for client errors, red for server errors
const CYAN: &str = "36";
const YELLOW: &str = "33";
const RED: &str = "31";

/// Middleware для логирования HTTP запросов
///
/// Одна строка на запрос: время, длительность, размер ответа, статус, метод и путь.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let (size, body) = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => (Some(bytes.len()), Body::from(bytes)),
        Err(e) => {
            tracing::warn!("Failed to buffer response body for {}: {}", path, e);
            (None, Body::default())
        }
    };

    println!(
        "{}",
        log_line(parts.status, &method, &path, start.elapsed(), size)
    );

    Response::from_parts(parts, body)
}

fn status_color(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        RED
    } else if status.is_client_error() {
        YELLOW
    } else {
        CYAN
    }
}

fn log_line(
    status: StatusCode,
    method: &Method,
    path: &str,
    elapsed: Duration,
    size: Option<usize>,
) -> String {
    let size = size.map(format_number).unwrap_or_else(|| "error".to_string());
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        status_color(status),
        Local::now().format("%H:%M:%S"),
        elapsed.as_millis(),
        size,
        status.as_u16(),
        method,
        path
    )
}
