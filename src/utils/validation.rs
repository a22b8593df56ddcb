//! # 입력 검증 함수 모듈
//!
//! 도서 카탈로그 도메인의 필드 형식 검증 함수들입니다.
//! 모든 함수는 상태가 없고 I/O를 수행하지 않으며 panic하지 않습니다.
//!
//! `validate_*` 함수들은 `validator` derive의 `custom` 검증기로 DTO에
//! 연결되고, `is_valid_*` / `parse_object_id`는 경로 파라미터처럼
//! DTO 바깥에서 검증이 필요한 곳에서 직접 사용됩니다.

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use validator::ValidationError;

use crate::errors::AppError;

/// MongoDB ObjectId 형식(24자리 16진수)인지 확인합니다.
pub fn is_valid_object_id(value: &str) -> bool {
    value.len() == 24 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// 경로 파라미터 문자열을 ObjectId로 파싱합니다.
///
/// 형식이 잘못된 경우 필드 이름을 담은 `ValidationError`를 반환합니다.
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim()).map_err(|_| {
        AppError::ValidationError(format!("유효하지 않은 {} 형식입니다", field_name))
    })
}

/// ObjectId 형식 custom 검증기 (DTO용)
pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    if is_valid_object_id(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_object_id")
            .with_message("유효하지 않은 ID 형식입니다".into()))
    }
}

/// 비어 있지 않은(공백만이 아닌) 문자열인지 확인하는 custom 검증기
///
/// `length(min = 1)`은 공백만 있는 문자열을 통과시키므로 별도로 둡니다.
pub fn validate_non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank_field")
            .with_message("값이 비어 있을 수 없습니다".into()))
    } else {
        Ok(())
    }
}

/// 사람/도시 이름 검증기: 문자와 공백만 허용
pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(ValidationError::new("invalid_name")
            .with_message("이름은 문자와 공백만 포함할 수 있습니다".into()));
    }
    Ok(())
}

/// 휴대전화 번호가 유효한 10자리 번호인지 확인합니다.
///
/// 국가 코드(`+91`, `91`) 또는 선행 `0`을 허용하며,
/// 국내 번호 부분은 6-9로 시작하는 10자리 숫자여야 합니다.
pub fn is_valid_mobile(value: &str) -> bool {
    let v = value.trim();
    let v = v.strip_prefix('+').unwrap_or(v);
    if v.is_empty() || !v.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let national = if v.len() == 12 && v.starts_with("91") {
        &v[2..]
    } else if v.len() == 11 && v.starts_with('0') {
        &v[1..]
    } else {
        v
    };

    national.len() == 10 && matches!(national.as_bytes()[0], b'6'..=b'9')
}

/// 휴대전화 번호 custom 검증기 (DTO용)
pub fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    if is_valid_mobile(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_mobile")
            .with_message("유효한 10자리 휴대전화 번호가 아닙니다".into()))
    }
}

/// ISBN 검증기: 공백 제거 후 10자리 또는 13자리, 영숫자와 하이픈만 허용
pub fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    let valid_length = trimmed.len() == 10 || trimmed.len() == 13;
    let valid_chars = trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid_length && valid_chars {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_isbn")
            .with_message("ISBN은 10자리 또는 13자리여야 합니다".into()))
    }
}

/// 우편번호 검증기: 6자리 숫자
pub fn validate_pincode(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_pincode")
            .with_message("우편번호는 6자리 숫자여야 합니다".into()))
    }
}

/// 비밀번호 복잡성 검증기: 최소 1개의 문자와 1개의 숫자 포함
///
/// 길이(8-15자)는 DTO의 `length` 검증에서 별도로 확인합니다.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let has_letter = value.chars().any(|c| c.is_alphabetic());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    if has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 최소 1개의 문자와 1개의 숫자를 포함해야 합니다".into()))
    }
}

/// 출간일 검증기: `YYYY-MM-DD` 형식이면서 실제 달력에 존재하는 날짜
pub fn validate_release_date(value: &str) -> Result<(), ValidationError> {
    let error = || {
        ValidationError::new("invalid_date")
            .with_message("날짜는 YYYY-MM-DD 형식이어야 합니다".into())
    };

    let bytes = value.as_bytes();
    // chrono는 "2023-5-1" 같은 한 자리 월/일도 허용하므로 자릿수를 먼저 고정한다
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(error());
    }
    let digits_ok = [0, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|&i| bytes[i].is_ascii_digit());
    if !digits_ok {
        return Err(error());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| error())
}

/// 비어 있는 Optional 문자열을 None으로 정리합니다.
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

/// JSON 역직렬화 시점에 Optional 문자열을 trim/정리하는 도우미
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_shape() {
        assert!(is_valid_object_id("507f1f77bcf86cd799439011"));
        assert!(!is_valid_object_id("507f1f77bcf86cd79943901"));   // 23자리
        assert!(!is_valid_object_id("507f1f77bcf86cd7994390111")); // 25자리
        assert!(!is_valid_object_id("507f1f77bcf86cd79943901z")); // 16진수 아님
        assert!(!is_valid_object_id(""));
    }

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011", "bookId").is_ok());
        let err = parse_object_id("not-an-id", "bookId").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_non_blank() {
        assert!(validate_non_blank("tech").is_ok());
        assert!(validate_non_blank("  x ").is_ok());
        assert!(validate_non_blank("").is_err());
        assert!(validate_non_blank("   ").is_err());
        assert!(validate_non_blank("\t\n").is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("John Doe").is_ok());
        assert!(validate_person_name("김철수").is_ok());
        assert!(validate_person_name("John3").is_err());
        assert!(validate_person_name("").is_err());
    }

    #[test]
    fn test_mobile() {
        assert!(is_valid_mobile("9876543210"));
        assert!(is_valid_mobile("+919876543210"));
        assert!(is_valid_mobile("919876543210"));
        assert!(is_valid_mobile("09876543210"));
        assert!(!is_valid_mobile("1234567890"));  // 6-9로 시작하지 않음
        assert!(!is_valid_mobile("987654321"));   // 9자리
        assert!(!is_valid_mobile("98765432100")); // 11자리 (0 선행 아님)
        assert!(!is_valid_mobile("98765abcde"));
        assert!(!is_valid_mobile(""));
    }

    #[test]
    fn test_isbn() {
        assert!(validate_isbn("1234567890").is_ok());
        assert!(validate_isbn("978-316148").is_ok());
        assert!(validate_isbn("9783161484100").is_ok());
        assert!(validate_isbn(" 1234567890 ").is_ok()); // 공백 제거 후 10자리
        assert!(validate_isbn("123456789").is_err());   // 9자리
        assert!(validate_isbn("12345678901").is_err()); // 11자리
        assert!(validate_isbn("12345678@0").is_err());
    }

    #[test]
    fn test_pincode() {
        assert!(validate_pincode("110001").is_ok());
        assert!(validate_pincode("1100011").is_err());
        assert!(validate_pincode("11000a").is_err());
    }

    #[test]
    fn test_password_complexity() {
        assert!(validate_password("abcd1234").is_ok());
        assert!(validate_password("a1").is_ok()); // 길이는 별도 검증
        assert!(validate_password("abcdefgh").is_err()); // 숫자 없음
        assert!(validate_password("12345678").is_err()); // 문자 없음
    }

    #[test]
    fn test_release_date() {
        assert!(validate_release_date("2023-05-01").is_ok());
        assert!(validate_release_date("2024-02-29").is_ok()); // 윤년
        assert!(validate_release_date("2023-02-29").is_err()); // 평년
        assert!(validate_release_date("2023-13-01").is_err());
        assert!(validate_release_date("2023-5-1").is_err()); // 자릿수 미달
        assert!(validate_release_date("01-05-2023").is_err());
        assert!(validate_release_date("2023/05/01").is_err());
        assert!(validate_release_date("").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Go".to_string())), Some("Go".to_string()));
        assert_eq!(clean_optional_string(Some("  Go  ".to_string())), Some("Go".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }
}
