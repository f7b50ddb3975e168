//! 요청 DTO
//!
//! 클라이언트 입력 데이터의 검증과 타입 안전성을 보장합니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 로컬 회원 가입 요청
///
/// JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JoinRequest {
    /// 사용자명 (2-30자, 영문/숫자/언더스코어만 허용)
    #[validate(length(min = 2, max = 30, message = "사용자명은 2-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 계정 비밀번호 (최소 4자)
    #[validate(length(min = 4, message = "비밀번호는 최소 4자 이상이어야 합니다"))]
    pub password: String,

    /// 이메일 주소 (선택)
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
}

/// 로컬 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OAuth 콜백 쿼리 파라미터
///
/// 정상 흐름에서는 `code`/`state`가, 사용자가 동의를 거부한 경우에는
/// `error`/`error_description`이 내려옵니다.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_request_accepts_valid_input() {
        let req = JoinRequest {
            username: "ssar".to_string(),
            password: "1234".to_string(),
            email: Some("ssar@example.com".to_string()),
        };

        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_join_request_rejects_bad_username() {
        let req = JoinRequest {
            username: "s s!".to_string(),
            password: "1234".to_string(),
            email: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_join_request_rejects_short_password() {
        let req = JoinRequest {
            username: "ssar".to_string(),
            password: "12".to_string(),
            email: None,
        };

        assert!(req.validate().is_err());
    }
}
