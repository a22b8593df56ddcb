//! # DTO 모듈
//!
//! HTTP 경계의 요청/응답 데이터 구조를 정의합니다.
//! 요청 DTO는 `validator` derive로 한 번에 검증되는 명시적 스키마이며,
//! 응답은 모든 엔드포인트가 공유하는 `{status, message, data}` 봉투로
//! 감쌉니다.

pub mod books;
pub mod reviews;
pub mod users;

use mongodb::bson::oid::ObjectId;
use serde::{Serialize, Serializer};

/// 모든 엔드포인트가 사용하는 응답 봉투
///
/// `message`와 `data`는 없는 경우 JSON에서 생략됩니다.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 메시지와 데이터를 모두 담은 성공 응답
    pub fn with_data(message: &str, data: T) -> Self {
        Self {
            status: true,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }

    /// 메시지만 담은 성공 응답 (삭제 등)
    pub fn message_only(message: &str) -> Self {
        Self {
            status: true,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

/// ObjectId를 JSON에서 `{"$oid": ...}` 대신 24자리 16진수 문자열로 직렬화
pub fn serialize_object_id_as_hex<S>(id: &ObjectId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&id.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let response = ApiResponse::with_data("Book List", vec!["a", "b"]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], true);
        assert_eq!(json["message"], "Book List");
        assert_eq!(json["data"][0], "a");
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let response = ApiResponse::<()>::message_only("deleted successfully");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["message"], "deleted successfully");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_object_id_serializes_as_hex() {
        #[derive(Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize_object_id_as_hex")]
            id: ObjectId,
        }

        let id = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let json = serde_json::to_value(Wrapper { id }).unwrap();
        assert_eq!(json["id"], "507f1f77bcf86cd799439011");
    }
}
