//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 비즈니스 객체와 도메인 규칙을 담당합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - 영속되는 핵심 비즈니스 객체 (User)
//! ├── DTOs      - 데이터 전송 객체 (Request/Response)
//! └── Models    - 외부 시스템 통합 모델 (OAuth 프로필, 세션 프린시펄, 인가 정책)
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB, Redis)
//! ```
//!
//! ## 모듈 구성
//!
//! - [`entities`] - MongoDB에 저장되는 `User` 엔티티와 역할 열거형
//! - [`dto`] - HTTP 계약: 가입/로그인 요청, 응답 본문 (validator 검증 포함)
//! - [`models`] - 프로바이더 프로필 정규화, 세션 프린시펄, 경로/메서드 인가 규칙

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
