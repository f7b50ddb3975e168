//! OAuth 통합 모델 모듈
//!
//! 프로바이더별 원시 프로필 형태를 하나의 [`NormalizedProfile`]로
//! 정규화하는 어댑터와, 토큰 교환 응답 모델을 제공합니다.
//!
//! 정규화는 순수 함수입니다. 네트워크나 저장소 접근 없이
//! `serde_json::Value` 입력만으로 결과가 결정됩니다.

pub mod token_response;
pub mod user_info;

pub use token_response::OAuthTokenResponse;
pub use user_info::{FacebookUserInfo, GoogleUserInfo, NaverUserInfo, NormalizedProfile, normalize};
