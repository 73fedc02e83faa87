pub mod config;
pub mod content;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::AppConfig;
use content::SiteContent;
use domain::ai::{AiClient, FlowService};
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::ai::handler::project_idea_handler,
        domain::ai::handler::ask_handler,
        domain::ai::handler::ethics_scenario_handler,
        domain::ai::handler::place_history_handler,
        domain::ai::handler::project_breakdown_handler,
        domain::ai::handler::seo_keywords_handler,
    ),
    components(
        schemas(
            domain::ai::dto::ProjectIdeaRequest,
            domain::ai::dto::ProjectIdeaResult,
            domain::ai::dto::ProjectIdeaSuccessResponse,
            domain::ai::dto::QuestionRequest,
            domain::ai::dto::AnswerResult,
            domain::ai::dto::AnswerSuccessResponse,
            domain::ai::dto::EthicsScenarioRequest,
            domain::ai::dto::EthicsScenarioResult,
            domain::ai::dto::EthicsScenarioSuccessResponse,
            domain::ai::dto::PlaceHistoryRequest,
            domain::ai::dto::PlaceHistoryResult,
            domain::ai::dto::PlaceHistorySuccessResponse,
            domain::ai::dto::ProjectBreakdownRequest,
            domain::ai::dto::ProjectComponent,
            domain::ai::dto::ProjectBreakdownResult,
            domain::ai::dto::ProjectBreakdownSuccessResponse,
            domain::ai::dto::SeoKeywordsRequest,
            domain::ai::dto::SeoKeywordsResult,
            domain::ai::dto::SeoKeywordsSuccessResponse,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "AI", description = "포트폴리오 AI 플로우 API")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/ai/project-idea",
            post(domain::ai::handler::project_idea_handler),
        )
        .route("/api/ai/ask", post(domain::ai::handler::ask_handler))
        .route(
            "/api/ai/ethics-scenario",
            post(domain::ai::handler::ethics_scenario_handler),
        )
        .route(
            "/api/ai/place-history",
            post(domain::ai::handler::place_history_handler),
        )
        .route(
            "/api/ai/project-breakdown",
            post(domain::ai::handler::project_breakdown_handler),
        )
        .route(
            "/api/ai/seo-keywords",
            post(domain::ai::handler::seo_keywords_handler),
        )
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 통합 테스트용 라우터 생성
///
/// 주입된 클라이언트(보통 스텁)와 번들 콘텐츠로 전체 앱을 구성합니다.
pub fn create_test_router(client: AiClient) -> Router {
    let config = AppConfig {
        server_port: 0,
        openai_api_key: "test-key".to_string(),
        generation_model: "gpt-4o-mini".to_string(),
    };
    let content = Arc::new(SiteContent::bundled());
    let flows = Arc::new(FlowService::new(
        client,
        content,
        config.generation_model.clone(),
    ));

    app(AppState { config, flows })
}
