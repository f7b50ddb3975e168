//! 데이터 전송 객체 (DTO) 모듈
//!
//! HTTP 계약을 정의합니다. 요청 DTO는 `validator` 파생으로
//! 입력 검증을 수행하고, 응답 DTO는 엔티티에서 민감 필드
//! (비밀번호 해시)를 제거한 뷰를 제공합니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
