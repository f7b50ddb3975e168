//! 애플리케이션 코어 모듈
//!
//! 구성 요소 조립([`context`])을 담당합니다. 전역 레지스트리나
//! 싱글톤 매크로 없이, 의존성은 `main`에서 명시적 생성자 호출로
//! 연결됩니다.

pub mod context;

pub use context::AppContext;
