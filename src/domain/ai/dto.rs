use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ===== 프로젝트 아이디어 플로우 =====

/// 프로젝트 아이디어 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdeaRequest {
    /// 아이디어 주제 (선택, 지정 시 3자 이상)
    #[validate(length(min = 3, message = "must be at least 3 characters when provided"))]
    pub topic: Option<String>,
}

/// 프로젝트 아이디어 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdeaResult {
    /// 제안된 아이디어 한 건
    pub idea: String,
    /// 아이디어가 가치 있는 이유
    pub explanation: String,
}

// ===== Q&A 플로우 =====

/// 방문자 질문 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    /// 방문자 질문 (5자 이상)
    #[validate(length(min = 5, message = "must be at least 5 characters"))]
    pub question: String,
}

/// 방문자 질문 답변 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    /// 프로필 기반 답변
    pub answer: String,
}

// ===== 윤리 시나리오 플로우 =====

/// 윤리 시나리오 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EthicsScenarioRequest {
    /// 시나리오 테마 (3자 이상)
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub theme: String,
}

/// 윤리 시나리오 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EthicsScenarioResult {
    /// 시나리오 본문
    pub scenario: String,
    /// 시나리오가 제기하는 중심 질문
    pub ethical_question: String,
    /// 서로 다른 관점 (2~4개)
    pub perspectives: Vec<String>,
}

// ===== 장소 역사 플로우 =====

/// 장소 역사 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceHistoryRequest {
    /// 장소 이름 (2자 이상)
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub place_name: String,
}

/// 장소 역사 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceHistoryResult {
    /// 역사 요약
    pub summary: String,
    /// 연대순 주요 사건 (3~5개)
    pub key_events: Vec<String>,
    /// 흥미로운 사실 (2~4개)
    pub interesting_facts: Vec<String>,
    /// 이미지 검색 키워드 (후처리로 최대 2 단어)
    pub suggested_image_keywords: String,
}

// ===== 프로젝트 분해 플로우 =====

/// 프로젝트 분해 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdownRequest {
    /// 분해할 프로젝트 URL
    #[validate(url(message = "must be a valid URL"))]
    pub project_url: String,
}

/// 프로젝트 구성 요소
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectComponent {
    /// 구성 요소 이름
    pub name: String,
    /// 담당하는 역할
    pub purpose: String,
}

/// 프로젝트 분해 결과
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBreakdownResult {
    /// 프로젝트 요약
    pub summary: String,
    /// 주요 구성 요소 (3~6개)
    pub components: Vec<ProjectComponent>,
    /// 사용 기술 (1개 이상)
    pub technologies: Vec<String>,
    /// 재구현 시 어려운 지점 (1개 이상)
    pub challenges: Vec<String>,
}

// ===== SEO 키워드 플로우 =====

/// SEO 키워드 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeoKeywordsRequest {
    /// 엔지니어링 섹션 설명 (1개 이상)
    #[validate(length(min = 1, message = "must contain at least 1 description"))]
    pub engineering: Vec<String>,
    /// 음악 섹션 설명 (1개 이상)
    #[validate(length(min = 1, message = "must contain at least 1 description"))]
    pub music: Vec<String>,
    /// 사진 섹션 설명 (1개 이상)
    #[validate(length(min = 1, message = "must contain at least 1 description"))]
    pub photography: Vec<String>,
}

/// SEO 키워드 결과
///
/// `keywords`는 비어 있을 수는 있어도 null이 되지는 않습니다.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeoKeywordsResult {
    pub keywords: Vec<String>,
}

// ===== 성공 응답 (OpenAPI 스키마용) =====

macro_rules! success_response_schema {
    ($(#[$doc:meta])* $name:ident, $result:ty) => {
        $(#[$doc])*
        #[derive(Debug, Serialize, ToSchema)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            /// 성공 여부
            #[schema(example = true)]
            pub is_success: bool,
            /// 응답 코드
            #[schema(example = "COMMON200")]
            pub code: String,
            /// 응답 메시지
            #[schema(example = "success")]
            pub message: String,
            /// 플로우 결과
            pub result: $result,
        }
    };
}

success_response_schema!(
    /// 프로젝트 아이디어 성공 응답
    ProjectIdeaSuccessResponse, ProjectIdeaResult);
success_response_schema!(
    /// Q&A 성공 응답
    AnswerSuccessResponse, AnswerResult);
success_response_schema!(
    /// 윤리 시나리오 성공 응답
    EthicsScenarioSuccessResponse, EthicsScenarioResult);
success_response_schema!(
    /// 장소 역사 성공 응답
    PlaceHistorySuccessResponse, PlaceHistoryResult);
success_response_schema!(
    /// 프로젝트 분해 성공 응답
    ProjectBreakdownSuccessResponse, ProjectBreakdownResult);
success_response_schema!(
    /// SEO 키워드 성공 응답
    SeoKeywordsSuccessResponse, SeoKeywordsResult);
