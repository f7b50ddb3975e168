//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 인증 게이트웨이를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | 에러 | 상태 코드 | 의미 |
//! |------|-----------|------|
//! | `UnsupportedProvider` | 400 | 알 수 없는 OAuth 프로바이더 등록 ID |
//! | `ValidationError` | 400 | 입력값 검증 실패 |
//! | `Unauthenticated` | 401 | 인증되지 않은 요청 |
//! | `Forbidden` | 403 | 역할 부족 |
//! | `NotFound` | 404 | 리소스 없음 |
//! | `ConflictError` | 409 | 유니크 제약 위반 (중복 삽입) |
//! | `ExternalServiceError` | 502 | OAuth 프로바이더 호출 실패 |
//! | `StoreUnavailable` | 503 | 사용자 저장소 타임아웃/연결 실패 |
//! | 나머지 | 500 | 내부 오류 |
//!
//! 5xx 계열 응답 본문은 내부 상세를 노출하지 않고 일반화된 메시지만 내려갑니다.

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 로그인 플로우와 인가 결정에서 발생할 수 있는 모든 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 알 수 없는 OAuth 프로바이더 (400 Bad Request)
    ///
    /// 로그인 시도를 즉시 중단시킵니다. 프로파일이 비어 있는 채로
    /// 진행하는 일은 없습니다.
    #[error("지원하지 않는 OAuth 프로바이더입니다: {0}")]
    UnsupportedProvider(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    ///
    /// 동시 최초 로그인 레이스에서 저장소의 유니크 제약이 거부한 경우로,
    /// 리컨실러가 기존 레코드를 다시 읽어 복구합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 사용자 저장소 타임아웃/연결 실패 (503 Service Unavailable)
    ///
    /// 로그인 실패로 표면화되며 자동 재시도하지 않습니다.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// 외부 서비스(OAuth 프로바이더) 호출 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 세션 저장소 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트 응답에 사용할 에러 코드 문자열
    fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedProvider(_) => "unsupported_provider",
            AppError::ValidationError(_) => "validation_error",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::ExternalServiceError(_) => "external_service_error",
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                "internal_server_error"
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::UnsupportedProvider(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 4xx 에러는 메시지를 그대로 전달하고, 5xx 에러는 내부 상세를 감춘
    /// 일반화된 메시지로 대체합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            "요청을 처리하지 못했습니다. 잠시 후 다시 시도해주세요".to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "error": self.error_code(),
            "message": message
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_unsupported_provider_is_bad_request() {
        let error = AppError::UnsupportedProvider("kakao".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(error.to_string().contains("kakao"));
    }

    #[test]
    fn test_unauthenticated_error_response() {
        let error = AppError::Unauthenticated("세션이 없습니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_error_response() {
        let error = AppError::Forbidden("ADMIN 역할이 필요합니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("이미 존재하는 사용자명입니다".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_unavailable_is_service_unavailable() {
        let error = AppError::StoreUnavailable("server selection timeout".to_string());
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_server_errors_hide_internal_detail() {
        let error = AppError::DatabaseError("connection pool exhausted at 10.0.0.3".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // 본문에는 내부 상세가 아닌 일반화된 메시지만 포함되어야 함
    }
}
