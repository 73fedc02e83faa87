use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateModerationRequestArgs,
    },
    Client,
};

use crate::utils::error::AppError;

/// 유해 콘텐츠 카테고리
///
/// Q&A 플로우의 입력 사전 검사에 사용됩니다. 프로바이더가 세분화해 주는 점수들은
/// 카테고리 그룹 단위로 합쳐서 판정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmCategory {
    Hate,
    Harassment,
    SelfHarm,
    Sexual,
    Violence,
}

impl std::fmt::Display for HarmCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HarmCategory::Hate => "hate",
            HarmCategory::Harassment => "harassment",
            HarmCategory::SelfHarm => "self-harm",
            HarmCategory::Sexual => "sexual",
            HarmCategory::Violence => "violence",
        };
        write!(f, "{}", label)
    }
}

/// 카테고리별 차단 임계값 (0.0 ~ 1.0, 점수가 임계값을 넘으면 차단)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyThresholds {
    pub hate: f64,
    pub harassment: f64,
    pub self_harm: f64,
    pub sexual: f64,
    pub violence: f64,
}

impl SafetyThresholds {
    /// 공개 Q&A 위젯에 쓰는 중간 강도 임계값
    pub const fn moderate() -> Self {
        Self {
            hate: 0.5,
            harassment: 0.5,
            self_harm: 0.4,
            sexual: 0.5,
            violence: 0.5,
        }
    }

    pub fn limit(&self, category: HarmCategory) -> f64 {
        match category {
            HarmCategory::Hate => self.hate,
            HarmCategory::Harassment => self.harassment,
            HarmCategory::SelfHarm => self.self_harm,
            HarmCategory::Sexual => self.sexual,
            HarmCategory::Violence => self.violence,
        }
    }

    /// 임계값을 넘은 첫 카테고리를 반환
    pub fn first_blocked(&self, scores: &[(HarmCategory, f64)]) -> Option<HarmCategory> {
        scores
            .iter()
            .find(|(category, score)| *score > self.limit(*category))
            .map(|(category, _)| *category)
    }
}

/// 모델 호출 설정
///
/// 플로우마다 고정된 값입니다. 사실 기반 플로우는 낮은 temperature,
/// 발산형 플로우는 높은 temperature를 사용합니다.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub safety: Option<SafetyThresholds>,
}

/// 한 번의 생성 요청
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub config: ModelConfig,
}

/// 생성 클라이언트 인터페이스
///
/// 프로바이더 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerationClient: Send + Sync {
    /// 프롬프트와 모델 설정으로 텍스트 생성 요청
    async fn generate(&self, request: GenerationRequest) -> Result<String, AppError>;
}

/// Arc로 래핑된 생성 클라이언트 (Clone 지원)
pub type AiClient = Arc<dyn GenerationClient>;

/// OpenAI 에러를 진단용 메시지가 담긴 AppError로 변환
///
/// 여기서 만든 메시지는 플로우 경계에서 로깅 후 플로우별 고정 문구로 치환되므로
/// 사용자에게 직접 노출되지 않습니다.
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("unknown");
            let err_code = api_err
                .code
                .as_ref()
                .map(|v| v.as_str())
                .unwrap_or("none");
            AppError::provider(format!(
                "api error (type={}, code={}): {}",
                err_type, err_code, api_err.message
            ))
        }
        OpenAIError::Reqwest(req_err) => {
            if req_err.is_timeout() || req_err.is_connect() {
                AppError::provider(format!("transport error: {}", req_err))
            } else if let Some(status) = req_err.status() {
                AppError::provider(format!("http {}: {}", status.as_u16(), req_err))
            } else {
                AppError::provider(format!("request error: {}", req_err))
            }
        }
        _ => AppError::provider(error.to_string()),
    }
}

/// OpenAI API 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
        }
    }

    /// 생성 전에 입력을 moderation API로 선별합니다.
    ///
    /// 임계값을 넘는 카테고리가 있으면 빈 출력 경로로 실패시킵니다.
    /// moderation 호출 자체가 실패한 경우에는 경고만 남기고 생성을 막지 않습니다.
    async fn screen_input(
        &self,
        input: &str,
        thresholds: &SafetyThresholds,
    ) -> Result<(), AppError> {
        let request = match CreateModerationRequestArgs::default().input(input).build() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "moderation request build failed, skipping screen");
                return Ok(());
            }
        };

        let response = match self.client.moderations().create(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "moderation call failed, skipping screen");
                return Ok(());
            }
        };

        let Some(result) = response.results.first() else {
            return Ok(());
        };

        let scores = &result.category_scores;
        let grouped = [
            (
                HarmCategory::Hate,
                f64::from(scores.hate).max(f64::from(scores.hate_threatening)),
            ),
            (
                HarmCategory::Harassment,
                f64::from(scores.harassment).max(f64::from(scores.harassment_threatening)),
            ),
            (
                HarmCategory::SelfHarm,
                f64::from(scores.self_harm)
                    .max(f64::from(scores.self_harm_intent))
                    .max(f64::from(scores.self_harm_instructions)),
            ),
            (
                HarmCategory::Sexual,
                f64::from(scores.sexual).max(f64::from(scores.sexual_minors)),
            ),
            (
                HarmCategory::Violence,
                f64::from(scores.violence).max(f64::from(scores.violence_graphic)),
            ),
        ];

        if let Some(category) = thresholds.first_blocked(&grouped) {
            tracing::warn!(category = %category, "input blocked by safety thresholds");
            return Err(AppError::empty_output(format!(
                "input blocked by safety thresholds (category: {})",
                category
            )));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl GenerationClient for OpenAiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AppError> {
        if let Some(thresholds) = &request.config.safety {
            self.screen_input(&request.user_prompt, thresholds).await?;
        }

        let messages = vec![
            build_system_message(&request.system_prompt)?,
            build_user_message(&request.user_prompt)?,
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(request.config.model.as_str())
            .messages(messages)
            .temperature(request.config.temperature)
            .build()
            .map_err(|e| AppError::internal(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(classify_openai_error)?;

        // 응답이 없거나 내용이 비어 있으면 빈 문자열로 두고,
        // 빈 출력 처리는 플로우 경계에서 일괄 수행
        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default())
    }
}

/// 메시지 빌더 헬퍼 함수 (crate 내부용)
pub(crate) fn build_system_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::internal(e.to_string()))?,
    ))
}

pub(crate) fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::internal(e.to_string()))?,
    ))
}
