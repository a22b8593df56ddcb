//! User Entity Implementation
//!
//! 회원가입 시 생성되는 사용자 엔티티입니다.
//! 비밀번호는 bcrypt 해시로만 저장하며, 현재 범위에서는
//! 수정/삭제 경로가 없습니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 사용자 호칭 (허용 값: Mr, Mrs, Miss)
///
/// serde enum으로 표현하여 허용되지 않은 값은 역직렬화 단계에서 거부됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserTitle {
    Mr,
    Mrs,
    Miss,
}

/// 사용자 주소 서브도큐먼트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub pincode: String,
}

/// 사용자 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 호칭 (Mr/Mrs/Miss)
    pub title: UserTitle,
    /// 사용자 이름
    pub name: String,
    /// 휴대전화 번호 (unique)
    pub phone: String,
    /// 이메일 (unique)
    pub email: String,
    /// bcrypt 해시된 비밀번호
    pub password_hash: String,
    /// 주소
    pub address: Address,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    pub fn new(
        title: UserTitle,
        name: String,
        phone: String,
        email: String,
        password_hash: String,
        address: Address,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title,
            name,
            phone,
            email,
            password_hash,
            address,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_address() -> Address {
        Address {
            street: "110 Main Street".to_string(),
            city: "Seoul".to_string(),
            pincode: "110001".to_string(),
        }
    }

    #[test]
    fn test_new_user_has_no_id() {
        let user = User::new(
            UserTitle::Mr,
            "John Doe".to_string(),
            "9876543210".to_string(),
            "john@example.com".to_string(),
            "$2b$04$hash".to_string(),
            sample_address(),
        );

        assert!(user.id.is_none());
        assert!(user.id_string().is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_title_rejects_unknown_value() {
        let result: Result<UserTitle, _> = serde_json::from_str("\"Dr\"");
        assert!(result.is_err());

        let parsed: UserTitle = serde_json::from_str("\"Miss\"").unwrap();
        assert_eq!(parsed, UserTitle::Miss);
    }
}
