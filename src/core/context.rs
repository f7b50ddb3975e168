//! # 애플리케이션 컨텍스트
//!
//! 리포지토리, 서비스, 인가 정책을 명시적 생성자 호출로 조립합니다.
//! 조립 그래프가 한 함수 안에 다 보이므로, 테스트에서는 같은 생성자에
//! 인메모리 저장소를 꽂는 것만으로 전체 플로우를 재현할 수 있습니다.

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::db::Database;
use crate::domain::models::auth::AuthorizationPolicy;
use crate::errors::AppError;
use crate::repositories::users::{UserRepository, UserStore};
use crate::services::auth::{IdentityReconciler, OAuthLoginService, SessionService};
use crate::services::users::UserService;

/// 조립된 애플리케이션 구성 요소 묶음
///
/// actix `web::Data`로 핸들러에 공유됩니다.
#[derive(Clone)]
pub struct AppContext {
    pub user_service: Arc<UserService>,
    pub oauth_service: Arc<OAuthLoginService>,
    pub session_service: Arc<SessionService>,
    pub policy: &'static AuthorizationPolicy,
    user_repo: Arc<UserRepository>,
}

impl AppContext {
    /// 프로덕션 조립: MongoDB 리포지토리 + Redis 세션 저장소
    pub fn new(db: Arc<Database>, redis: Arc<RedisClient>) -> Self {
        let user_repo = Arc::new(UserRepository::new(db));
        let store: Arc<dyn UserStore> = user_repo.clone();

        let reconciler = Arc::new(IdentityReconciler::new(store.clone()));

        Self {
            user_service: Arc::new(UserService::new(store)),
            oauth_service: Arc::new(OAuthLoginService::new(reconciler)),
            session_service: Arc::new(SessionService::new(redis)),
            policy: AuthorizationPolicy::standard(),
            user_repo,
        }
    }

    /// 필수 인덱스 보장 (기동 시 1회)
    ///
    /// `users.username` 유니크 인덱스 없이는 동시 첫 로그인 보호가
    /// 성립하지 않으므로, 실패하면 기동을 중단해야 합니다.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        self.user_repo.create_indexes().await
    }
}
