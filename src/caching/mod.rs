//! 캐싱/세션 저장 계층 모듈
//!
//! Redis를 백엔드로 하는 세션 저장소와 JSON 기반 객체 직렬화를 제공합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("session:abc", &principal, 3600).await?;
//! let principal: Option<SessionPrincipal> = cache.get("session:abc").await?;
//! cache.del("session:abc").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
