//! # 문자열 유틸리티
//!
//! 입력 문자열 정리와 관련된 공통 유틸리티 함수들입니다.

use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  ssar  ", "username").unwrap(), "ssar");
/// assert!(validate_required_string("   ", "username").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{}은(는) 필수입니다",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None이거나 공백뿐이면 None, 아니면 앞뒤 공백을 제거한 Some을 반환합니다.
/// 프로바이더가 빈 문자열 이메일을 내려주는 경우를 흡수합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("ssar", "username").unwrap(), "ssar");
        assert_eq!(validate_required_string("  cos  ", "username").unwrap(), "cos");

        assert!(validate_required_string("", "username").is_err());
        assert!(validate_required_string("   ", "username").is_err());
        assert!(validate_required_string("\t\n", "username").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(
            clean_optional_string(Some("  a@b.com  ".to_string())),
            Some("a@b.com".to_string())
        );
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }
}
