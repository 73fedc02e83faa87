use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, Instrument};
use uuid::Uuid;

/// 요청 단위 추적 ID
#[derive(Clone)]
#[allow(dead_code)]
pub struct RequestId(pub String);

/// 요청마다 추적 ID를 부여하고 span으로 감싸는 미들웨어
///
/// 클라이언트가 `x-request-id`를 보내면 그대로 쓰고, 없으면 새로 발급합니다.
/// 플로우 실패 진단 로그가 같은 span 아래 묶이므로 요청 단위로 추적할 수 있습니다.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );

    let request_id_for_header = request_id;
    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        info!(
            duration_ms = duration_ms,
            status = status,
            "request completed"
        );

        if let Ok(value) = request_id_for_header.parse() {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}
