//! Book Entity Implementation
//!
//! 도서 엔티티와 소프트 삭제 생명주기를 정의합니다.
//!
//! 도서는 물리적으로 삭제되지 않습니다. 생명주기는 Active → Deleted
//! 두 상태뿐이며, Deleted는 종결 상태입니다. 전이는 "현재 Active일 것"
//! 조건으로만 허용되고, 리포지토리의 `isDeleted: false` 필터가 이를
//! 강제합니다.
//!
//! `reviews` 필드는 비정규화 카운터로, 해당 도서의 삭제되지 않은 리뷰
//! 수와 항상 일치해야 합니다. 리뷰 생성/삭제 시 트랜잭션 안에서
//! 증가/감소로 유지됩니다.

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 도서 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 도서 제목 (unique, trim 후 저장)
    pub title: String,
    /// 요약문
    pub excerpt: String,
    /// 작성자 참조 (저장소 수준 외래키는 아님)
    #[serde(rename = "userId")]
    pub user_id: ObjectId,
    /// ISBN (unique, 10자리 또는 13자리)
    #[serde(rename = "ISBN")]
    pub isbn: String,
    /// 분류
    pub category: String,
    /// 하위 분류
    pub subcategory: String,
    /// 출간일 (YYYY-MM-DD)
    #[serde(rename = "releasedAt")]
    pub released_at: String,
    /// 삭제되지 않은 리뷰 수 (비정규화 카운터)
    pub reviews: i64,
    /// 표지 이미지 URL (선택)
    #[serde(rename = "bookCover", skip_serializing_if = "Option::is_none")]
    pub book_cover: Option<String>,
    /// 소프트 삭제 여부
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    /// 삭제 시각 (삭제된 경우에만 존재)
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Book {
    /// 새 도서 생성
    ///
    /// 리뷰 카운터 0, Active 상태로 시작합니다.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        excerpt: String,
        user_id: ObjectId,
        isbn: String,
        category: String,
        subcategory: String,
        released_at: String,
        book_cover: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title: title.trim().to_string(),
            excerpt,
            user_id,
            isbn: isbn.trim().to_string(),
            category,
            subcategory,
            released_at,
            reviews: 0,
            book_cover,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
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

    fn sample_book() -> Book {
        Book::new(
            "  Go  ".to_string(),
            "A language for building simple, reliable software".to_string(),
            ObjectId::new(),
            " 1234567890 ".to_string(),
            "tech".to_string(),
            "lang".to_string(),
            "2023-05-01".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_book_starts_active_with_zero_reviews() {
        let book = sample_book();

        assert_eq!(book.reviews, 0);
        assert!(book.is_active());
        assert!(book.deleted_at.is_none());
        assert!(book.id.is_none());
    }

    #[test]
    fn test_new_book_trims_title_and_isbn() {
        let book = sample_book();

        assert_eq!(book.title, "Go");
        assert_eq!(book.isbn, "1234567890");
    }

    #[test]
    fn test_bson_field_names_match_store_schema() {
        let book = sample_book();
        let doc = mongodb::bson::to_document(&book).unwrap();

        assert!(doc.contains_key("ISBN"));
        assert!(doc.contains_key("userId"));
        assert!(doc.contains_key("releasedAt"));
        assert!(doc.contains_key("isDeleted"));
        assert!(!doc.contains_key("_id")); // 삽입 전에는 없음
        assert!(!doc.contains_key("deletedAt"));
    }
}
