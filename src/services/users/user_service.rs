//! # 사용자 서비스
//!
//! 로컬 가입과 아이디/비밀번호 검증을 담당합니다. OAuth 자동 가입은
//! [`crate::services::auth::reconciler`]가 별도로 처리하며, 두 경로 모두
//! 같은 `users` 컬렉션과 유니크 제약을 공유합니다.

use std::sync::Arc;

use validator::Validate;

use crate::domain::dto::JoinRequest;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::repositories::users::UserStore;
use crate::utils::string_utils::{clean_optional_string, validate_required_string};

/// 로컬 계정 서비스
pub struct UserService {
    store: Arc<dyn UserStore>,
    /// 비밀번호 해시 비용 (테스트는 낮은 비용 사용)
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            bcrypt_cost: crate::config::PasswordConfig::bcrypt_cost(),
        }
    }

    pub fn with_cost(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// 로컬 회원 가입
    ///
    /// 비밀번호를 bcrypt로 해시하고 기본 역할 `ROLE_USER`로 저장합니다.
    /// 평문 비밀번호는 절대 저장되지 않습니다.
    ///
    /// ## 에러
    ///
    /// - `ValidationError` - 입력 형식 위반
    /// - `ConflictError` - 이미 존재하는 사용자명 (유니크 제약)
    pub async fn join(&self, request: JoinRequest) -> Result<User, AppError> {
        request
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let username = validate_required_string(&request.username, "username")?;
        let email = clean_optional_string(request.email);

        let password_hash = bcrypt::hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해시 실패: {}", e)))?;

        let user = self
            .store
            .insert_unique(User::new_local(username, password_hash, email))
            .await?;

        log::info!("로컬 가입 완료: {}", user.username);
        Ok(user)
    }

    /// 아이디/비밀번호 검증
    ///
    /// 사용자 없음, 비밀번호 없음, 불일치를 구분하지 않고 모두 같은
    /// `Unauthenticated`로 응답합니다. 계정 존재 여부를 노출하지 않습니다.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<User, AppError> {
        let denied = || AppError::Unauthenticated("아이디 또는 비밀번호가 올바르지 않습니다".to_string());

        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or_else(denied)?;

        let hash = user.password.as_deref().ok_or_else(denied)?;

        let matches = bcrypt::verify(password, hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", username);
            return Err(denied());
        }

        Ok(user)
    }
}
