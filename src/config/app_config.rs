use std::env;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,

    // AI Service
    pub openai_api_key: String,
    pub generation_model: String,
}

/// 기본 생성 모델 (빠른 범용 챗 모델)
const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
            tracing::warn!(
                "OPENAI_API_KEY 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "test-key".to_string()
        });

        let generation_model =
            env::var("GENERATION_MODEL").unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());

        Ok(Self {
            server_port,
            openai_api_key,
            generation_model,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
}
