//! 애플리케이션 에러 모듈
//!
//! 게이트웨이 전역에서 사용하는 [`AppError`](errors::AppError) 타입을 제공합니다.

pub mod errors;

pub use errors::{AppError, AppResult};
