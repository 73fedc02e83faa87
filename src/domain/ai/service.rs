//! 플로우 인보커
//!
//! 여섯 플로우 모두 같은 파이프라인 하나를 지나갑니다.
//! 입력 검증 → 프롬프트 렌더링 → 모델 호출 → JSON 추출 → 스키마 검사 → 후처리.
//! 중간 상태를 저장하지 않는 단방향 파이프라인이며 재시도도 없습니다.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;
use validator::Validate;

use super::client::{AiClient, GenerationRequest, ModelConfig, SafetyThresholds};
use super::dto::{
    AnswerResult, EthicsScenarioRequest, EthicsScenarioResult, PlaceHistoryRequest,
    PlaceHistoryResult, ProjectBreakdownRequest, ProjectBreakdownResult, ProjectIdeaRequest,
    ProjectIdeaResult, QuestionRequest, SeoKeywordsRequest, SeoKeywordsResult,
};
use super::prompt;
use super::schema::{FieldSpec, OutputSchema};
use crate::content::{FlowCopy, SiteContent};
use crate::utils::error::AppError;

/// 발산형 플로우 (아이디어, 시나리오)
const IDEATION_TEMPERATURE: f32 = 0.7;
/// 사실 기반 플로우 (역사 요약, 프로젝트 분해)
const FACTUAL_TEMPERATURE: f32 = 0.4;
/// 그 외 (Q&A, 키워드)
const BALANCED_TEMPERATURE: f32 = 0.5;

/// 플로우 하나의 정적 정의
///
/// 서비스 생성 시 한 번 만들어지고 이후 변경되지 않습니다.
struct FlowDefinition {
    key: &'static str,
    config: ModelConfig,
    schema: OutputSchema,
    copy: FlowCopy,
}

/// 여섯 AI 플로우의 오케스트레이션 서비스
pub struct FlowService {
    client: AiClient,
    content: Arc<SiteContent>,
    project_idea: FlowDefinition,
    qna: FlowDefinition,
    ethics_scenario: FlowDefinition,
    place_history: FlowDefinition,
    project_breakdown: FlowDefinition,
    seo_keywords: FlowDefinition,
}

impl FlowService {
    pub fn new(client: AiClient, content: Arc<SiteContent>, model: String) -> Self {
        let flows = content.flows;

        let project_idea = FlowDefinition {
            key: "project-idea",
            config: ModelConfig {
                model: model.clone(),
                temperature: IDEATION_TEMPERATURE,
                safety: None,
            },
            schema: OutputSchema::new(vec![
                FieldSpec::text("idea", "the single suggested project idea, one or two sentences"),
                FieldSpec::text(
                    "explanation",
                    "why this idea fits the portfolio and what building it would teach",
                ),
            ]),
            copy: flows.project_idea,
        };

        let qna = FlowDefinition {
            key: "qna",
            config: ModelConfig {
                model: model.clone(),
                temperature: BALANCED_TEMPERATURE,
                // 공개 위젯이므로 입력을 카테고리별 임계값으로 선별
                safety: Some(SafetyThresholds::moderate()),
            },
            schema: OutputSchema::new(vec![FieldSpec::text(
                "answer",
                "one short paragraph answering the visitor's question from the profile",
            )]),
            copy: flows.qna,
        };

        let ethics_scenario = FlowDefinition {
            key: "ethics-scenario",
            config: ModelConfig {
                model: model.clone(),
                temperature: IDEATION_TEMPERATURE,
                safety: None,
            },
            schema: OutputSchema::new(vec![
                FieldSpec::text("scenario", "the scenario itself, a short paragraph"),
                FieldSpec::text(
                    "ethicalQuestion",
                    "the single central question the scenario raises",
                ),
                FieldSpec::text_array(
                    "perspectives",
                    Some(2),
                    Some(4),
                    "genuinely conflicting positions a reader could take",
                ),
            ]),
            copy: flows.ethics_scenario,
        };

        let place_history = FlowDefinition {
            key: "place-history",
            config: ModelConfig {
                model: model.clone(),
                temperature: FACTUAL_TEMPERATURE,
                safety: None,
            },
            schema: OutputSchema::new(vec![
                FieldSpec::text("summary", "two or three sentences summarizing the place's history"),
                FieldSpec::text_array(
                    "keyEvents",
                    Some(3),
                    Some(5),
                    "key historical events in chronological order, one sentence each",
                ),
                FieldSpec::text_array(
                    "interestingFacts",
                    Some(2),
                    Some(4),
                    "short facts a photo caption could quote",
                ),
                FieldSpec::text(
                    "suggestedImageKeywords",
                    "a short phrase for an image search about this place",
                ),
            ]),
            copy: flows.place_history,
        };

        let project_breakdown = FlowDefinition {
            key: "project-breakdown",
            config: ModelConfig {
                model: model.clone(),
                temperature: FACTUAL_TEMPERATURE,
                safety: None,
            },
            schema: OutputSchema::new(vec![
                FieldSpec::text("summary", "what the project is, two sentences at most"),
                FieldSpec::object_array(
                    "components",
                    vec![
                        FieldSpec::text("name", "the building block's name"),
                        FieldSpec::text("purpose", "what the building block is responsible for"),
                    ],
                    Some(3),
                    Some(6),
                    "the project's major building blocks",
                ),
                FieldSpec::text_array(
                    "technologies",
                    Some(1),
                    None,
                    "languages, frameworks, or services the project most likely uses",
                ),
                FieldSpec::text_array(
                    "challenges",
                    Some(1),
                    None,
                    "the hard parts of rebuilding this project",
                ),
            ]),
            copy: flows.project_breakdown,
        };

        let seo_keywords = FlowDefinition {
            key: "seo-keywords",
            config: ModelConfig {
                model,
                temperature: BALANCED_TEMPERATURE,
                safety: None,
            },
            schema: OutputSchema::new(vec![FieldSpec::text_array(
                "keywords",
                None,
                None,
                "search keywords visitors would type, each one or two words",
            )
            .optional()]),
            copy: flows.seo_keywords,
        };

        Self {
            client,
            content,
            project_idea,
            qna,
            ethics_scenario,
            place_history,
            project_breakdown,
            seo_keywords,
        }
    }

    /// 프로젝트 아이디어 제안
    pub async fn suggest_project_idea(
        &self,
        request: ProjectIdeaRequest,
    ) -> Result<ProjectIdeaResult, AppError> {
        request.validate()?;

        let def = &self.project_idea;
        let system = prompt::ideas::system_prompt(&self.content);
        let user = prompt::ideas::user_prompt(request.topic.as_deref(), &self.content);

        let value = self.run_flow(def, system, user).await?;
        parse_result(def, value)
    }

    /// 방문자 질문 답변
    pub async fn answer_question(&self, request: QuestionRequest) -> Result<AnswerResult, AppError> {
        request.validate()?;

        let def = &self.qna;
        let system = prompt::qna::system_prompt(&self.content);
        let user = prompt::qna::user_prompt(&request.question);

        let value = self.run_flow(def, system, user).await?;
        parse_result(def, value)
    }

    /// 윤리 시나리오 생성
    pub async fn generate_ethics_scenario(
        &self,
        request: EthicsScenarioRequest,
    ) -> Result<EthicsScenarioResult, AppError> {
        request.validate()?;

        let def = &self.ethics_scenario;
        let system = prompt::ethics::system_prompt(&self.content);
        let user = prompt::ethics::user_prompt(&request.theme);

        let value = self.run_flow(def, system, user).await?;
        parse_result(def, value)
    }

    /// 장소 역사 요약
    pub async fn summarize_place_history(
        &self,
        request: PlaceHistoryRequest,
    ) -> Result<PlaceHistoryResult, AppError> {
        request.validate()?;

        let def = &self.place_history;
        let system = prompt::history::system_prompt(&self.content);
        let user = prompt::history::user_prompt(&request.place_name);

        let value = self.run_flow(def, system, user).await?;
        let mut result: PlaceHistoryResult = parse_result(def, value)?;

        // 모델이 더 길게 답해도 이미지 검색 키워드는 최대 2 단어만 유지
        result.suggested_image_keywords = truncate_keywords(&result.suggested_image_keywords);

        Ok(result)
    }

    /// 프로젝트 분해
    pub async fn break_down_project(
        &self,
        request: ProjectBreakdownRequest,
    ) -> Result<ProjectBreakdownResult, AppError> {
        request.validate()?;

        let def = &self.project_breakdown;
        let system = prompt::deconstruct::system_prompt(&self.content);
        let user = prompt::deconstruct::user_prompt(&request.project_url);

        let value = self.run_flow(def, system, user).await?;
        parse_result(def, value)
    }

    /// SEO 키워드 제안
    pub async fn suggest_seo_keywords(
        &self,
        request: SeoKeywordsRequest,
    ) -> Result<SeoKeywordsResult, AppError> {
        request.validate()?;

        let def = &self.seo_keywords;
        let system = prompt::seo::system_prompt(&self.content);
        let user = prompt::seo::user_prompt(&request.engineering, &request.music, &request.photography);

        let value = self.run_flow(def, system, user).await?;

        // keywords가 없거나 null이어도 결과는 항상 문자열 배열
        let keywords = value
            .get("keywords")
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(SeoKeywordsResult { keywords })
    }

    /// 공통 파이프라인: 모델 호출 → JSON 추출 → 스키마 검사
    ///
    /// 반환된 값은 해당 플로우의 출력 스키마를 온전히 만족합니다.
    async fn run_flow(
        &self,
        def: &FlowDefinition,
        system_prompt: String,
        user_prompt: String,
    ) -> Result<Value, AppError> {
        let input_summary = summarize_input(&user_prompt);

        let request = GenerationRequest {
            system_prompt: format!("{}\n\n{}", system_prompt, def.schema.render_instructions()),
            user_prompt,
            config: def.config.clone(),
        };

        let raw = self
            .client
            .generate(request)
            .await
            .map_err(|e| normalize_flow_error(def, &input_summary, e))?;

        if raw.trim().is_empty() {
            return Err(normalize_flow_error(
                def,
                &input_summary,
                AppError::empty_output("provider returned no output"),
            ));
        }

        let value = extract_json(&raw).ok_or_else(|| {
            normalize_flow_error(
                def,
                &input_summary,
                AppError::empty_output("provider output is not valid JSON"),
            )
        })?;

        if let Err(violation) = def.schema.conform(&value) {
            return Err(normalize_flow_error(
                def,
                &input_summary,
                AppError::empty_output(format!("output failed schema check: {}", violation)),
            ));
        }

        Ok(value)
    }
}

/// 검사를 통과한 값을 타입이 있는 결과로 변환
fn parse_result<T: DeserializeOwned>(def: &FlowDefinition, value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| {
        error!(flow = def.key, cause = %e, "conformed output failed typed conversion");
        AppError::empty_output(def.copy.empty_message)
    })
}

/// 플로우 공통 에러 정규화
///
/// 이미 이 플로우의 사용자 대면 문자열로 선언된 메시지는 그대로 통과시키고 (이중 포장 방지),
/// 그 외 실패는 원인을 로깅한 뒤 플로우별 고정 문구로 치환합니다.
/// 입력 검증 실패 메시지는 그 자체가 사용자 대면이므로 손대지 않습니다.
fn normalize_flow_error(def: &FlowDefinition, input_summary: &str, error: AppError) -> AppError {
    if def.copy.is_user_facing(&error.message()) {
        return error;
    }

    match error {
        AppError::Validation(_) => error,
        AppError::EmptyOutput(cause) => {
            error!(
                flow = def.key,
                input = input_summary,
                cause = %cause,
                "flow produced no usable output"
            );
            AppError::empty_output(def.copy.empty_message)
        }
        other => {
            error!(
                flow = def.key,
                input = input_summary,
                cause = %other.message(),
                "flow provider call failed"
            );
            AppError::provider(def.copy.failure_message)
        }
    }
}

/// 모델 응답 텍스트에서 JSON 오브젝트를 추출
///
/// 지시를 어기고 코드 펜스나 산문이 섞여 와도 첫 `{`부터 마지막 `}`까지를 파싱해 봅니다.
fn extract_json(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&trimmed[start..=end]).ok()
}

/// 진단 로그용 입력 요약 (원문이 길면 앞부분만)
fn summarize_input(input: &str) -> String {
    const MAX_CHARS: usize = 120;
    if input.chars().count() <= MAX_CHARS {
        return input.to_string();
    }
    let truncated: String = input.chars().take(MAX_CHARS).collect();
    format!("{}...", truncated)
}

/// 키워드 문자열을 공백 기준 최대 2 토큰으로 자름
fn truncate_keywords(raw: &str) -> String {
    raw.split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::client::MockGenerationClient;
    use serde_json::json;

    fn service_with(mock: MockGenerationClient) -> FlowService {
        FlowService::new(
            Arc::new(mock),
            Arc::new(SiteContent::bundled()),
            "gpt-4o-mini".to_string(),
        )
    }

    fn bundled_copy() -> crate::content::FlowCopyTable {
        SiteContent::bundled().flows
    }

    #[tokio::test]
    async fn should_not_contact_provider_when_question_too_short() {
        // Arrange
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().times(0);
        let service = service_with(mock);

        // Act
        let result = service
            .answer_question(QuestionRequest {
                question: "Hi".to_string(),
            })
            .await;

        // Assert
        let error = result.unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
        assert!(error.message().contains("question"));
    }

    #[tokio::test]
    async fn should_not_contact_provider_when_url_invalid() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().times(0);
        let service = service_with(mock);

        let result = service
            .break_down_project(ProjectBreakdownRequest {
                project_url: "not a url".to_string(),
            })
            .await;

        let error = result.unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
        assert!(error.message().contains("project_url"));
    }

    #[tokio::test]
    async fn should_resolve_answer_verbatim_from_provider() {
        // Arrange
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(json!({ "answer": "Alex specializes in BI and AI." }).to_string()));
        let service = service_with(mock);

        // Act
        let result = service
            .answer_question(QuestionRequest {
                question: "What are Alex's main skills?".to_string(),
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(result.answer, "Alex specializes in BI and AI.");
    }

    #[tokio::test]
    async fn should_reject_blank_output_with_flow_empty_message() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| Ok("   ".to_string()));
        let service = service_with(mock);

        let error = service
            .answer_question(QuestionRequest {
                question: "What are Alex's main skills?".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.message(), bundled_copy().qna.empty_message);
        assert!(matches!(error, AppError::EmptyOutput(_)));
    }

    #[tokio::test]
    async fn should_replace_provider_detail_with_flow_failure_message() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .returning(|_| Err(AppError::provider("http 429: too many requests")));
        let service = service_with(mock);

        let error = service
            .answer_question(QuestionRequest {
                question: "What are Alex's main skills?".to_string(),
            })
            .await
            .unwrap_err();

        // 프로바이더 내부 정보는 메시지에 남지 않음
        assert_eq!(error.message(), bundled_copy().qna.failure_message);
        assert!(matches!(error, AppError::Provider(_)));
    }

    #[tokio::test]
    async fn should_pass_known_user_facing_error_through_unchanged() {
        // Arrange: 클라이언트가 이미 이 플로우의 선언된 메시지로 실패한 상황
        let empty_message = bundled_copy().qna.empty_message;
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .returning(move |_| Err(AppError::empty_output(empty_message)));
        let service = service_with(mock);

        // Act
        let error = service
            .answer_question(QuestionRequest {
                question: "What are Alex's main skills?".to_string(),
            })
            .await
            .unwrap_err();

        // Assert: 이중 포장 없이 그대로 전달
        assert_eq!(error, AppError::empty_output(empty_message));
    }

    #[tokio::test]
    async fn should_append_schema_instructions_and_flow_temperature() {
        // Arrange
        let mut mock = MockGenerationClient::new();
        mock.expect_generate()
            .withf(|request| {
                request.system_prompt.contains("## Output format")
                    && request.system_prompt.contains("\"keyEvents\"")
                    && request.config.temperature == FACTUAL_TEMPERATURE
            })
            .returning(|_| {
                Ok(json!({
                    "summary": "An old harbor town.",
                    "keyEvents": ["Founded in 1201", "Fire of 1624", "Rebuilt in 1630"],
                    "interestingFacts": ["The harbor never freezes", "Fourteen lighthouses"],
                    "suggestedImageKeywords": "harbor lighthouse"
                })
                .to_string())
            });
        let service = service_with(mock);

        // Act
        let result = service
            .summarize_place_history(PlaceHistoryRequest {
                place_name: "Bergen".to_string(),
            })
            .await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_truncate_image_keywords_to_two_tokens() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| {
            Ok(json!({
                "summary": "An old harbor town.",
                "keyEvents": ["Founded in 1201", "Fire of 1624", "Rebuilt in 1630"],
                "interestingFacts": ["The harbor never freezes", "Fourteen lighthouses"],
                "suggestedImageKeywords": "ancient harbor lighthouse sunset"
            })
            .to_string())
        });
        let service = service_with(mock);

        let result = service
            .summarize_place_history(PlaceHistoryRequest {
                place_name: "Bergen".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.suggested_image_keywords, "ancient harbor");
        assert!(result.key_events.len() >= 3 && result.key_events.len() <= 5);
        assert!(result.interesting_facts.len() >= 2 && result.interesting_facts.len() <= 4);
    }

    #[tokio::test]
    async fn should_reject_history_with_too_many_key_events() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| {
            Ok(json!({
                "summary": "s",
                "keyEvents": ["1", "2", "3", "4", "5", "6"],
                "interestingFacts": ["a", "b"],
                "suggestedImageKeywords": "x"
            })
            .to_string())
        });
        let service = service_with(mock);

        let error = service
            .summarize_place_history(PlaceHistoryRequest {
                place_name: "Bergen".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.message(), bundled_copy().place_history.empty_message);
    }

    #[tokio::test]
    async fn should_resolve_empty_keyword_list_when_field_missing() {
        // Arrange: 모델이 keywords 필드를 아예 생략
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| Ok("{}".to_string()));
        let service = service_with(mock);

        // Act
        let result = service
            .suggest_seo_keywords(SeoKeywordsRequest {
                engineering: vec!["real-time BI dashboards".to_string()],
                music: vec!["ambient modular sets".to_string()],
                photography: vec!["old-town night photography".to_string()],
            })
            .await
            .unwrap();

        // Assert: null이 아니라 빈 배열
        assert!(result.keywords.is_empty());
    }

    #[tokio::test]
    async fn should_collect_suggested_keywords() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| {
            Ok(json!({ "keywords": ["bi dashboards", "modular synth", "travel photography"] })
                .to_string())
        });
        let service = service_with(mock);

        let result = service
            .suggest_seo_keywords(SeoKeywordsRequest {
                engineering: vec!["dashboards".to_string()],
                music: vec!["synth".to_string()],
                photography: vec!["travel".to_string()],
            })
            .await
            .unwrap();

        assert_eq!(
            result.keywords,
            vec!["bi dashboards", "modular synth", "travel photography"]
        );
    }

    #[tokio::test]
    async fn should_parse_fenced_json_output() {
        // Arrange: 지시를 어기고 코드 펜스로 감싼 응답
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| {
            Ok("```json\n{\"idea\": \"a sensor garden\", \"explanation\": \"hands-on telemetry\"}\n```"
                .to_string())
        });
        let service = service_with(mock);

        // Act
        let result = service
            .suggest_project_idea(ProjectIdeaRequest { topic: None })
            .await
            .unwrap();

        // Assert
        assert_eq!(result.idea, "a sensor garden");
    }

    #[tokio::test]
    async fn should_parse_nested_component_objects() {
        let mut mock = MockGenerationClient::new();
        mock.expect_generate().returning(|_| {
            Ok(json!({
                "summary": "A home telemetry hub.",
                "components": [
                    { "name": "collector", "purpose": "polls the sensors" },
                    { "name": "store", "purpose": "keeps readings" },
                    { "name": "dashboard", "purpose": "renders charts" }
                ],
                "technologies": ["Rust", "SQLite"],
                "challenges": ["clock drift between sensors"]
            })
            .to_string())
        });
        let service = service_with(mock);

        let result = service
            .break_down_project(ProjectBreakdownRequest {
                project_url: "https://github.com/example/telemetry-hub".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.components.len(), 3);
        assert_eq!(result.components[0].name, "collector");
    }

    #[tokio::test]
    async fn should_render_identical_prompts_for_identical_input() {
        // Arrange: 두 번의 동일한 호출이 프로바이더에 보내는 프롬프트를 수집
        let captured: Arc<std::sync::Mutex<Vec<(String, String)>>> =
            Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);

        let mut mock = MockGenerationClient::new();
        mock.expect_generate().times(2).returning(move |request| {
            sink.lock()
                .unwrap()
                .push((request.system_prompt, request.user_prompt));
            Ok(json!({ "answer": "ok" }).to_string())
        });
        let service = service_with(mock);

        // Act
        for _ in 0..2 {
            service
                .answer_question(QuestionRequest {
                    question: "What are Alex's main skills?".to_string(),
                })
                .await
                .unwrap();
        }

        // Assert: 렌더링은 입력의 순수 함수
        let captured = captured.lock().unwrap();
        assert_eq!(captured[0], captured[1]);
    }

    #[test]
    fn should_truncate_keywords_helper_cases() {
        assert_eq!(truncate_keywords("ancient harbor lighthouse"), "ancient harbor");
        assert_eq!(truncate_keywords("harbor"), "harbor");
        assert_eq!(truncate_keywords("  harbor   lighthouse  "), "harbor lighthouse");
        assert_eq!(truncate_keywords(""), "");
    }

    #[test]
    fn should_extract_json_from_prose_wrapped_output() {
        let raw = "Here you go:\n```json\n{\"answer\": \"ok\"}\n```\nHope this helps!";

        let value = extract_json(raw).unwrap();

        assert_eq!(value["answer"], "ok");
    }

    #[test]
    fn should_return_none_for_non_json_output() {
        assert!(extract_json("no structured data here").is_none());
    }
}
