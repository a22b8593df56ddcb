//! Review Entity Implementation
//!
//! 도서에 첨부되는 리뷰 엔티티입니다. 리뷰는 항상 생성 시점에
//! 삭제되지 않은 도서 하나에 속하며, 소프트 삭제만 지원합니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 작성자 이름이 없을 때 사용하는 기본값
pub const DEFAULT_REVIEWER: &str = "Guest";

/// 리뷰 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 대상 도서 참조
    #[serde(rename = "bookId")]
    pub book_id: ObjectId,
    /// 리뷰 본문
    pub review: String,
    /// 평점 (1-5 정수)
    pub rating: i32,
    /// 작성자 이름 (없으면 "Guest")
    #[serde(rename = "reviewedBy")]
    pub reviewed_by: String,
    /// 작성 시각 (서버에서 설정)
    #[serde(rename = "reviewedAt")]
    pub reviewed_at: DateTime,
    /// 소프트 삭제 여부
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

impl Review {
    /// 새 리뷰 생성
    ///
    /// `reviewed_by`가 없으면 "Guest"로 채우고 작성 시각을 서버에서 설정합니다.
    pub fn new(book_id: ObjectId, review: String, rating: i32, reviewed_by: Option<String>) -> Self {
        Self {
            id: None,
            book_id,
            review,
            rating,
            reviewed_by: reviewed_by.unwrap_or_else(|| DEFAULT_REVIEWER.to_string()),
            reviewed_at: DateTime::now(),
            is_deleted: false,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 아직 소프트 삭제되지 않은 상태인지 확인
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviewer_defaults_to_guest() {
        let review = Review::new(ObjectId::new(), "solid read".to_string(), 4, None);
        assert_eq!(review.reviewed_by, "Guest");
        assert!(review.is_active());
    }

    #[test]
    fn test_reviewer_name_is_kept_when_given() {
        let review = Review::new(
            ObjectId::new(),
            "solid read".to_string(),
            4,
            Some("Alice".to_string()),
        );
        assert_eq!(review.reviewed_by, "Alice");
    }

    #[test]
    fn test_bson_field_names_match_store_schema() {
        let review = Review::new(ObjectId::new(), "solid read".to_string(), 4, None);
        let doc = mongodb::bson::to_document(&review).unwrap();

        assert!(doc.contains_key("bookId"));
        assert!(doc.contains_key("reviewedBy"));
        assert!(doc.contains_key("reviewedAt"));
        assert!(doc.contains_key("isDeleted"));
    }
}
