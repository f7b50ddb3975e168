//! # 신원 조정 서비스
//!
//! OAuth 프로필을 로컬 사용자 계정으로 조정(find-or-create)합니다.
//! 소셜 로그인에는 별도 가입 절차가 없습니다. 첫 로그인 시
//! `{provider}_{provider_id}` 사용자명으로 계정이 자동 생성되고,
//! 이후 로그인은 같은 계정을 다시 찾습니다.
//!
//! ## 동시성
//!
//! 같은 프로필의 첫 로그인 N개가 동시에 들어와도 계정은 정확히 하나만
//! 생깁니다. 방어선은 저장소의 `username` 유니크 인덱스 하나이며,
//! 경쟁에서 진 삽입은 `ConflictError`를 받고 기존 레코드를 다시 읽어
//! 성공으로 복구합니다.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::users::User;
use crate::domain::models::oauth::NormalizedProfile;
use crate::errors::AppError;
use crate::repositories::users::UserStore;

/// OAuth 프로필 → 로컬 계정 조정자
///
/// ## 한계
///
/// 기존 계정의 필드는 절대 갱신하지 않습니다. 프로바이더 쪽에서
/// 이메일이 바뀌어도 저장된 레코드는 첫 로그인 시점의 값을 유지합니다.
pub struct IdentityReconciler {
    store: Arc<dyn UserStore>,
    /// 플레이스홀더 비밀번호 해시 비용 (테스트는 낮은 비용 사용)
    bcrypt_cost: u32,
}

impl IdentityReconciler {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            bcrypt_cost: crate::config::PasswordConfig::bcrypt_cost(),
        }
    }

    pub fn with_cost(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// 프로필 하나를 로컬 계정으로 조정합니다.
    ///
    /// 1. `{provider}_{provider_id}`로 기존 계정 조회, 있으면 그대로 반환
    /// 2. 없으면 `ROLE_USER` + 플레이스홀더 비밀번호 해시로 새 계정 삽입
    /// 3. 삽입이 유니크 제약에 걸리면(동시 첫 로그인) 기존 레코드 재조회
    ///
    /// 반환되는 사용자는 항상 역할과 (플레이스홀더일 수 있는)
    /// 비밀번호 해시를 가집니다.
    pub async fn reconcile(&self, profile: &NormalizedProfile) -> Result<User, AppError> {
        let username = profile.canonical_username();

        if let Some(existing) = self.store.find_by_username(&username).await? {
            log::info!("기존 소셜 계정 로그인: {}", username);
            return Ok(existing);
        }

        // 로컬 로그인 경로로는 절대 맞출 수 없는 무작위 플레이스홀더
        let placeholder = Uuid::new_v4().to_string();
        let placeholder_hash = bcrypt::hash(&placeholder, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해시 실패: {}", e)))?;

        let user = User::new_oauth(
            username.clone(),
            placeholder_hash,
            profile.email.clone(),
            profile.provider,
            profile.provider_id.clone(),
        );

        match self.store.insert_unique(user).await {
            Ok(created) => {
                log::info!("소셜 계정 자동 가입: {}", username);
                Ok(created)
            }
            // 동시 첫 로그인 경쟁에서 진 경우: 이긴 쪽의 레코드를 반환
            Err(AppError::ConflictError(_)) => self
                .store
                .find_by_username(&username)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError(format!(
                        "중복 키 이후 사용자를 찾을 수 없습니다: {}",
                        username
                    ))
                }),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use async_trait::async_trait;
    use futures_util::future::join_all;
    use mongodb::bson::oid::ObjectId;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 유니크 제약을 흉내 내는 인메모리 사용자 저장소
    struct InMemoryStore {
        users: Mutex<HashMap<String, User>>,
    }

    impl InMemoryStore {
        fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
            }
        }

        fn count(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserStore for InMemoryStore {
        async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
            Ok(self.users.lock().unwrap().get(username).cloned())
        }

        async fn insert_unique(&self, mut user: User) -> Result<User, AppError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&user.username) {
                return Err(AppError::ConflictError(user.username.clone()));
            }
            user.id = Some(ObjectId::new());
            users.insert(user.username.clone(), user.clone());
            Ok(user)
        }
    }

    fn naver_profile() -> NormalizedProfile {
        NormalizedProfile {
            provider: AuthProvider::Naver,
            provider_id: "abc123".to_string(),
            email: Some("a@b.com".to_string()),
            display_name: Some("love".to_string()),
        }
    }

    fn reconciler(store: Arc<InMemoryStore>) -> IdentityReconciler {
        // 테스트는 낮은 해시 비용으로 충분하다
        IdentityReconciler::with_cost(store, 4)
    }

    #[actix_web::test]
    async fn test_first_login_provisions_account() {
        let store = Arc::new(InMemoryStore::new());
        let sut = reconciler(store.clone());

        let user = sut.reconcile(&naver_profile()).await.unwrap();

        assert_eq!(user.username, "naver_abc123");
        assert_eq!(user.role, crate::domain::entities::users::UserRole::User);
        assert_eq!(user.provider, Some(AuthProvider::Naver));
        assert_eq!(user.provider_id.as_deref(), Some("abc123"));
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
        assert!(user.id.is_some());
        assert!(!user.password.as_deref().unwrap_or_default().is_empty());
        assert_eq!(store.count(), 1);
    }

    #[actix_web::test]
    async fn test_second_login_returns_same_account_unchanged() {
        let store = Arc::new(InMemoryStore::new());
        let sut = reconciler(store.clone());

        let first = sut.reconcile(&naver_profile()).await.unwrap();

        // 프로바이더 쪽 이메일이 바뀌어도 저장된 레코드는 그대로다
        let mut drifted = naver_profile();
        drifted.email = Some("changed@b.com".to_string());
        let second = sut.reconcile(&drifted).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.email.as_deref(), Some("a@b.com"));
        assert_eq!(store.count(), 1);
    }

    #[actix_web::test]
    async fn test_conflict_on_insert_recovers_existing_record() {
        let store = Arc::new(InMemoryStore::new());

        // 다른 요청이 먼저 가입을 끝낸 상황을 흉내 낸다
        store
            .insert_unique(User::new_oauth(
                "naver_abc123".to_string(),
                "$2b$04$hash".to_string(),
                Some("a@b.com".to_string()),
                AuthProvider::Naver,
                "abc123".to_string(),
            ))
            .await
            .unwrap();

        let sut = reconciler(store.clone());
        let user = sut.reconcile(&naver_profile()).await.unwrap();

        assert_eq!(user.username, "naver_abc123");
        assert_eq!(store.count(), 1);
    }

    #[actix_web::test]
    async fn test_parallel_first_logins_create_exactly_one_account() {
        let store = Arc::new(InMemoryStore::new());
        let sut = Arc::new(reconciler(store.clone()));

        let attempts = (0..8).map(|_| {
            let sut = sut.clone();
            async move { sut.reconcile(&naver_profile()).await }
        });

        let results = join_all(attempts).await;

        let ids: Vec<_> = results
            .into_iter()
            .map(|r| r.unwrap().id.unwrap())
            .collect();

        assert_eq!(store.count(), 1);
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
    }

    #[actix_web::test]
    async fn test_distinct_providers_get_distinct_accounts() {
        let store = Arc::new(InMemoryStore::new());
        let sut = reconciler(store.clone());

        let naver = sut.reconcile(&naver_profile()).await.unwrap();

        let google = NormalizedProfile {
            provider: AuthProvider::Google,
            provider_id: "abc123".to_string(),
            email: None,
            display_name: None,
        };
        let google_user = sut.reconcile(&google).await.unwrap();

        assert_ne!(naver.username, google_user.username);
        assert_eq!(store.count(), 2);
    }
}
