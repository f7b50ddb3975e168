//! 리포지토리 계층 모듈
//!
//! 데이터 액세스 계층을 정의합니다. 서비스 계층은 구체 타입이 아니라
//! [`users::UserStore`] 트레이트에 의존하므로, MongoDB 없이
//! 인메모리 구현으로도 동일한 의미론을 검증할 수 있습니다.

pub mod users;
