use std::net::SocketAddr;
use std::sync::Arc;

use trifolio_server::{
    app,
    config::AppConfig,
    content::SiteContent,
    domain::ai::{AiClient, FlowService, OpenAiClient},
    state::AppState,
    utils::logging::init_logging,
};

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 프로세스 종료까지 유지)
    let _guard = init_logging();

    // 3. 설정 로드
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("failed to load configuration: {}", e);
            return;
        }
    };

    // 4. 플로우 서비스 구성
    let client: AiClient = Arc::new(OpenAiClient::new(&config.openai_api_key));
    let content = Arc::new(SiteContent::bundled());
    let flows = Arc::new(FlowService::new(
        client,
        content,
        config.generation_model.clone(),
    ));

    // 5. 라우터 설정
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = app(AppState { config, flows });

    // 6. 서버 실행
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
