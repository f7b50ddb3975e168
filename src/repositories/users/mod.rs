//! 사용자 저장소 모듈
//!
//! [`UserStore`] 트레이트가 사용자 저장소의 계약을 정의하고,
//! [`user_repo::UserRepository`]가 MongoDB 구현을 제공합니다.

use async_trait::async_trait;

use crate::domain::entities::users::User;
use crate::errors::AppError;

pub mod user_repo;

pub use user_repo::UserRepository;

/// 사용자 저장소 계약
///
/// 동시성 안전의 핵심은 `insert_unique`입니다: 저장소의 유니크 제약이
/// 중복 삽입을 거부하면 `ConflictError`로 표면화되고, 호출자는
/// 기존 레코드를 다시 읽어 복구합니다. 애플리케이션 수준의
/// 중복 제거에 의존하지 않습니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자명으로 조회 (유니크 인덱스 사용)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// 유니크 제약 하에 삽입
    ///
    /// ## 에러
    ///
    /// - `ConflictError` - 같은 `username`이 이미 존재 (경쟁 삽입 포함)
    /// - `StoreUnavailable` - 저장소 접근 불가/타임아웃
    async fn insert_unique(&self, user: User) -> Result<User, AppError>;
}
