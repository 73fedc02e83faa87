use axum::{extract::State, response::IntoResponse, Json};

use super::dto::{
    AnswerSuccessResponse, EthicsScenarioRequest, EthicsScenarioSuccessResponse,
    PlaceHistoryRequest, PlaceHistorySuccessResponse, ProjectBreakdownRequest,
    ProjectBreakdownSuccessResponse, ProjectIdeaRequest, ProjectIdeaSuccessResponse,
    QuestionRequest, SeoKeywordsRequest, SeoKeywordsSuccessResponse,
};
use crate::state::AppState;
use crate::utils::{error::AppError, response::BaseResponse, response::ErrorResponse};

/// 프로젝트 아이디어 API 핸들러
#[utoipa::path(
    post,
    path = "/api/ai/project-idea",
    tag = "AI",
    request_body = ProjectIdeaRequest,
    responses(
        (status = 200, body = ProjectIdeaSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 502, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
pub async fn project_idea_handler(
    State(state): State<AppState>,
    Json(request): Json<ProjectIdeaRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.flows.suggest_project_idea(request).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 방문자 Q&A API 핸들러
#[utoipa::path(
    post,
    path = "/api/ai/ask",
    tag = "AI",
    request_body = QuestionRequest,
    responses(
        (status = 200, body = AnswerSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 502, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.flows.answer_question(request).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 윤리 시나리오 API 핸들러
#[utoipa::path(
    post,
    path = "/api/ai/ethics-scenario",
    tag = "AI",
    request_body = EthicsScenarioRequest,
    responses(
        (status = 200, body = EthicsScenarioSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 502, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
pub async fn ethics_scenario_handler(
    State(state): State<AppState>,
    Json(request): Json<EthicsScenarioRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.flows.generate_ethics_scenario(request).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 장소 역사 요약 API 핸들러
#[utoipa::path(
    post,
    path = "/api/ai/place-history",
    tag = "AI",
    request_body = PlaceHistoryRequest,
    responses(
        (status = 200, body = PlaceHistorySuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 502, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
pub async fn place_history_handler(
    State(state): State<AppState>,
    Json(request): Json<PlaceHistoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.flows.summarize_place_history(request).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 분해 API 핸들러
#[utoipa::path(
    post,
    path = "/api/ai/project-breakdown",
    tag = "AI",
    request_body = ProjectBreakdownRequest,
    responses(
        (status = 200, body = ProjectBreakdownSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 502, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
pub async fn project_breakdown_handler(
    State(state): State<AppState>,
    Json(request): Json<ProjectBreakdownRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.flows.break_down_project(request).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// SEO 키워드 제안 API 핸들러
#[utoipa::path(
    post,
    path = "/api/ai/seo-keywords",
    tag = "AI",
    request_body = SeoKeywordsRequest,
    responses(
        (status = 200, body = SeoKeywordsSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 502, body = ErrorResponse),
        (status = 503, body = ErrorResponse)
    )
)]
pub async fn seo_keywords_handler(
    State(state): State<AppState>,
    Json(request): Json<SeoKeywordsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.flows.suggest_seo_keywords(request).await?;
    Ok(Json(BaseResponse::success(result)))
}
