//! 서버 및 데이터 계층 설정
//!
//! 실행 환경, HTTP 서버 바인딩, 비밀번호 해싱 강도, 저장소 타임아웃 등
//! 인증 플로우 바깥의 설정값들을 관리합니다.

use std::env;

/// 실행 환경 구분
///
/// `PROFILE` 환경변수로 결정되며, 환경별로 비밀번호 해싱 강도 등이 달라집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// 현재 실행 환경을 반환합니다.
    ///
    /// `PROFILE` 환경변수가 없으면 개발 환경으로 간주합니다.
    pub fn current() -> Self {
        match env::var("PROFILE").as_deref() {
            Ok("prod") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        }
    }
}

/// 비밀번호 해싱(bcrypt) 설정
///
/// 로컬 회원가입 비밀번호와 연합 계정의 플레이스홀더 비밀번호 모두
/// 저장 전에 이 설정의 cost로 해싱됩니다. 평문은 절대 저장하지 않습니다.
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost factor를 반환합니다.
    ///
    /// `BCRYPT_COST` 환경변수가 없으면 실행 환경에 맞는 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 환경별 기본 bcrypt cost
    ///
    /// 개발/테스트에서는 빠른 피드백을 위해 낮은 값을, 운영에서는 높은 값을 사용합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Production => 12,
            Environment::Development => 8,
            Environment::Test => 4,
        }
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 바인드 호스트 (기본값: 127.0.0.1)
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// 서버 바인드 포트 (기본값: 8080)
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080)
    }
}

/// 사용자 저장소 호출 제한 설정
///
/// 저장소 호출은 이 코어의 유일한 블로킹 지점이므로 반드시 타임아웃이
/// 걸려 있어야 합니다. 타임아웃 시 요청은 실패로 처리되며 재시도하지
/// 않습니다. 제약 기반 중복 방지 없이 삽입을 재시도하면 계정이 이중으로
/// 프로비저닝될 수 있기 때문입니다.
pub struct StoreConfig;

impl StoreConfig {
    /// MongoDB 연결/서버 선택 타임아웃 (초 단위, 기본값: 5)
    pub fn timeout_seconds() -> u64 {
        env::var("STORE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_cost_for_env() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 8);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
    }
}
