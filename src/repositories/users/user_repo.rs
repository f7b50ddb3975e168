//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 MongoDB 데이터 액세스 계층입니다.
//!
//! ## 특징
//!
//! - **유니크 제약**: `username` 유니크 인덱스가 동시 가입 경쟁의
//!   유일한 방어선입니다 (기동 시 `create_indexes`로 보장)
//! - **에러 분류**: 중복 키(11000)는 `ConflictError`로, 연결/선택
//!   타임아웃은 `StoreUnavailable`로 구분해 표면화합니다
//! - **재시도 없음**: 타임아웃된 호출은 그대로 실패합니다

use async_trait::async_trait;
use mongodb::{
    Collection, IndexModel,
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use std::sync::Arc;

use crate::db::Database;
use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::repositories::users::UserStore;

/// MongoDB 기반 사용자 리포지토리
///
/// ## 인덱스
///
/// | 인덱스 | 필드 | 속성 |
/// |--------|------|------|
/// | `username_unique` | `username` (asc) | UNIQUE |
/// | `created_at_desc` | `created_at` (desc) | 일반 |
#[derive(Clone)]
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection("users")
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 기동 시 한 번 호출됩니다. `username` 유니크
    /// 인덱스는 선택 사항이 아닙니다. 이 인덱스가 없으면 동시
    /// 첫 로그인이 같은 사용자를 두 번 만들 수 있습니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.collection()
            .create_indexes([username_index, created_at_index])
            .await
            .map_err(map_store_error)?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(map_store_error)
    }

    async fn insert_unique(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(map_store_error)?;

        user.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError("삽입 결과에 ObjectId가 없습니다".to_string())
        })?);

        Ok(user)
    }
}

/// MongoDB 드라이버 에러를 애플리케이션 에러로 분류합니다.
///
/// 중복 키(코드 11000)는 유니크 제약 위반이므로 `ConflictError`,
/// 연결 실패와 서버 선택 타임아웃은 `StoreUnavailable`입니다.
fn map_store_error(e: mongodb::error::Error) -> AppError {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000 => {
            AppError::ConflictError("이미 존재하는 사용자명입니다".to_string())
        }
        ErrorKind::Command(ce) if ce.code == 11000 => {
            AppError::ConflictError("이미 존재하는 사용자명입니다".to_string())
        }
        ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
            AppError::StoreUnavailable(e.to_string())
        }
        _ => AppError::DatabaseError(e.to_string()),
    }
}
