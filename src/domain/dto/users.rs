//! # 사용자 요청/응답 DTO
//!
//! 회원가입과 로그인 엔드포인트의 데이터 구조입니다.
//! 원래 순차적이던 필드별 검사를 `validator` derive 스키마로
//! 한 번에 수행합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Address, User, UserTitle};
use crate::utils::validation::{
    validate_mobile, validate_non_blank, validate_password, validate_person_name,
    validate_pincode,
};

/// 회원가입 요청의 주소 부분
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressPayload {
    #[validate(custom(function = "validate_non_blank"))]
    pub street: String,

    #[validate(custom(function = "validate_person_name"))]
    pub city: String,

    #[validate(custom(function = "validate_pincode"))]
    pub pincode: String,
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Address {
            street: payload.street.trim().to_string(),
            city: payload.city.trim().to_string(),
            pincode: payload.pincode.trim().to_string(),
        }
    }
}

/// 회원가입 요청 DTO
///
/// `title`은 serde enum이므로 Mr/Mrs/Miss 외의 값은
/// 역직렬화 단계에서 거부됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUserRequest {
    pub title: UserTitle,

    #[validate(custom(function = "validate_person_name"))]
    pub name: String,

    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,

    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub email: String,

    /// 8-15자, 최소 1개의 문자와 1개의 숫자 포함
    #[validate(length(min = 8, max = 15, message = "비밀번호는 8자 이상 15자 이하여야 합니다"))]
    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[validate(nested)]
    pub address: AddressPayload,
}

/// 로그인 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub email: String,

    #[validate(length(min = 8, max = 15, message = "비밀번호는 8자 이상 15자 이하여야 합니다"))]
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// 사용자 응답 DTO
///
/// 비밀번호 해시는 응답에 포함되지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: UserTitle,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            title: user.title,
            name: user.name,
            phone: user.phone,
            email: user.email,
            address: user.address,
            created_at: user.created_at.to_chrono(),
            updated_at: user.updated_at.to_chrono(),
        }
    }
}

/// 로그인 성공 시 `data`에 담기는 토큰 정보
#[derive(Debug, Clone, Serialize)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register_json() -> serde_json::Value {
        serde_json::json!({
            "title": "Mr",
            "name": "John Doe",
            "phone": "9876543210",
            "email": "john@example.com",
            "password": "abcd1234",
            "address": {
                "street": "110 Main Street",
                "city": "Seoul",
                "pincode": "110001"
            }
        })
    }

    #[test]
    fn test_valid_register_request_passes() {
        let request: RegisterUserRequest =
            serde_json::from_value(valid_register_json()).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_title_fails_at_deserialization() {
        let mut json = valid_register_json();
        json["title"] = serde_json::json!("Dr");
        assert!(serde_json::from_value::<RegisterUserRequest>(json).is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        let mut json = valid_register_json();
        json["password"] = serde_json::json!("abc1"); // 8자 미만
        let request: RegisterUserRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());

        let mut json = valid_register_json();
        json["password"] = serde_json::json!("abcdefgh12345678"); // 15자 초과
        let request: RegisterUserRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_password_without_digit_fails() {
        let mut json = valid_register_json();
        json["password"] = serde_json::json!("abcdefghi");
        let request: RegisterUserRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_nested_address_is_validated() {
        let mut json = valid_register_json();
        json["address"]["pincode"] = serde_json::json!("12"); // 6자리 아님
        let request: RegisterUserRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_response_has_no_password_field() {
        let user = User::new(
            UserTitle::Mr,
            "John Doe".to_string(),
            "9876543210".to_string(),
            "john@example.com".to_string(),
            "$2b$04$secret-hash".to_string(),
            Address {
                street: "110 Main Street".to_string(),
                city: "Seoul".to_string(),
                pincode: "110001".to_string(),
            },
        );

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let text = json.to_string();
        assert!(!text.contains("password"));
        assert!(!text.contains("secret-hash"));
    }
}
