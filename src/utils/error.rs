use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
///
/// AI 플로우 실패는 세 종류로 수렴합니다.
/// - `Validation`: 입력값이 필드 제약을 위반 (프로바이더 호출 전에 반환)
/// - `EmptyOutput`: 모델이 빈 응답을 주었거나 출력 스키마로 강제할 수 없음
/// - `Provider`: 모델 호출 자체가 실패 (네트워크, 쿼터, 비정상 응답 등)
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Validation(String),
    EmptyOutput(String),
    Provider(String),
    Internal(String),
}

impl AppError {
    /// 에러 메시지 반환
    ///
    /// `Validation` / `EmptyOutput` / `Provider`의 메시지는 그대로 사용자에게 노출되므로
    /// 프로바이더 내부 정보가 섞이지 않도록 플로우 경계에서 정규화된 상태여야 합니다.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::EmptyOutput(msg) => msg.clone(),
            AppError::Provider(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::Validation(_) => "COMMON400",
            AppError::EmptyOutput(_) => "AI_002",
            AppError::Provider(_) => "AI_003",
            AppError::Internal(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyOutput(_) => StatusCode::BAD_GATEWAY,
            AppError::Provider(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        match &self {
            AppError::Internal(_) => {
                error!("Internal Server Error: {}", message);
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// validator 검증 실패를 AppError로 변환
///
/// 필드명과 위반 규칙이 포함된 메시지를 그대로 전달합니다.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// 편의 함수들
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn empty_output(msg: impl Into<String>) -> Self {
        AppError::EmptyOutput(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        AppError::Provider(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_validation_error_to_400() {
        let error = AppError::validation("question: too short");

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_code(), "COMMON400");
    }

    #[test]
    fn should_map_empty_output_to_502() {
        let error = AppError::empty_output("try again");

        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.error_code(), "AI_002");
    }

    #[test]
    fn should_map_provider_error_to_503() {
        let error = AppError::provider("service unavailable");

        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.error_code(), "AI_003");
    }

    #[test]
    fn should_preserve_message_verbatim() {
        let error = AppError::empty_output("The assistant had trouble answering. Please try again.");

        assert_eq!(
            error.message(),
            "The assistant had trouble answering. Please try again."
        );
    }

    #[test]
    fn should_convert_validation_errors_with_field_name() {
        // Arrange
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 5, message = "must be at least 5 characters"))]
            question: String,
        }

        let probe = Probe {
            question: "Hi".to_string(),
        };

        // Act
        let error: AppError = probe.validate().unwrap_err().into();

        // Assert
        assert!(matches!(error, AppError::Validation(_)));
        assert!(error.message().contains("question"));
    }
}
