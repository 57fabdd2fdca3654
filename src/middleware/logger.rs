use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Tags each request with a trace id and logs its outcome.
pub async fn logger<B>(mut req: Request<B>, next: Next<B>) -> Response {
    let trace_id = Uuid::new_v4();
    req.extensions_mut().insert(trace_id);
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed = start.elapsed().as_millis();

    if status.is_server_error() {
        warn!(trace_id = %trace_id, method = %method, uri = %uri, status = status.as_u16(), elapsed_ms = elapsed, "Request failed");
    } else {
        info!(trace_id = %trace_id, method = %method, uri = %uri, status = status.as_u16(), elapsed_ms = elapsed, "Request log");
    }
    response
}
