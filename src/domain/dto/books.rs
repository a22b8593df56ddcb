//! # 도서 요청/응답 DTO

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::serialize_object_id_as_hex;
use crate::domain::entities::Book;
use crate::utils::validation::{
    deserialize_optional_string, validate_isbn, validate_non_blank, validate_object_id,
    validate_release_date,
};

/// 도서 생성 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(custom(function = "validate_non_blank"))]
    pub title: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub excerpt: String,

    #[serde(rename = "userId")]
    #[validate(custom(function = "validate_object_id"))]
    pub user_id: String,

    #[serde(rename = "ISBN")]
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub category: String,

    #[validate(custom(function = "validate_non_blank"))]
    pub subcategory: String,

    #[serde(rename = "releasedAt")]
    #[validate(custom(function = "validate_release_date"))]
    pub released_at: String,

    /// 표지 이미지 URL (외부 스토리지에 업로드된 결과)
    #[serde(rename = "bookCover", default, deserialize_with = "deserialize_optional_string")]
    pub book_cover: Option<String>,
}

/// 도서 부분 수정 요청 DTO
///
/// 모든 필드가 선택이며, 존재하는 필드만 검증 후 `$set`에 포함됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(custom(function = "validate_non_blank"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_non_blank"))]
    pub excerpt: Option<String>,

    #[serde(rename = "ISBN")]
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: Option<String>,

    #[validate(custom(function = "validate_non_blank"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_non_blank"))]
    pub subcategory: Option<String>,

    #[serde(rename = "releasedAt")]
    #[validate(custom(function = "validate_release_date"))]
    pub released_at: Option<String>,

    #[serde(rename = "bookCover", default, deserialize_with = "deserialize_optional_string")]
    pub book_cover: Option<String>,
}

impl UpdateBookRequest {
    /// 수정할 필드가 하나도 없는 빈 패치인지 확인
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.excerpt.is_none()
            && self.isbn.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.released_at.is_none()
            && self.book_cover.is_none()
    }
}

/// 도서 목록 조회 쿼리 필터
///
/// 세 필드가 모두 없으면 필터 없는 전체 조회로 처리됩니다.
/// 존재하는 필드는 비어 있을 수 없습니다 (`?category=`는 400).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookListQuery {
    #[serde(rename = "userId")]
    #[validate(custom(function = "validate_object_id"))]
    pub user_id: Option<String>,

    #[validate(custom(function = "validate_non_blank"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_non_blank"))]
    pub subcategory: Option<String>,
}

impl BookListQuery {
    /// 쿼리 필터가 하나도 주어지지 않았는지 확인
    pub fn is_unfiltered(&self) -> bool {
        self.user_id.is_none() && self.category.is_none() && self.subcategory.is_none()
    }
}

/// 목록 조회용 도서 요약 (projection 결과)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex")]
    pub id: ObjectId,
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "userId", serialize_with = "serialize_object_id_as_hex")]
    pub user_id: ObjectId,
    pub category: String,
    #[serde(rename = "releasedAt")]
    pub released_at: String,
    pub reviews: i64,
}

/// 도서 전체 필드 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub category: String,
    pub subcategory: String,
    #[serde(rename = "releasedAt")]
    pub released_at: String,
    pub reviews: i64,
    #[serde(rename = "bookCover", skip_serializing_if = "Option::is_none")]
    pub book_cover: Option<String>,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id_string().unwrap_or_default(),
            title: book.title,
            excerpt: book.excerpt,
            user_id: book.user_id.to_hex(),
            isbn: book.isbn,
            category: book.category,
            subcategory: book.subcategory,
            released_at: book.released_at,
            reviews: book.reviews,
            book_cover: book.book_cover,
            is_deleted: book.is_deleted,
            deleted_at: book.deleted_at.map(|dt| dt.to_chrono()),
            created_at: book.created_at.to_chrono(),
            updated_at: book.updated_at.to_chrono(),
        }
    }
}

/// 리뷰 수정 응답에 첨부하는 필드 한정 도서 응답
///
/// `bookCover`와 `deletedAt`을 제외한 projection입니다. 상세 조회와
/// 리뷰 생성은 전체 필드(`BookResponse`)를 사용합니다.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedBookResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub category: String,
    pub subcategory: String,
    #[serde(rename = "releasedAt")]
    pub released_at: String,
    pub reviews: i64,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for ProjectedBookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id_string().unwrap_or_default(),
            title: book.title,
            excerpt: book.excerpt,
            user_id: book.user_id.to_hex(),
            isbn: book.isbn,
            category: book.category,
            subcategory: book.subcategory,
            released_at: book.released_at,
            reviews: book.reviews,
            is_deleted: book.is_deleted,
            created_at: book.created_at.to_chrono(),
            updated_at: book.updated_at.to_chrono(),
        }
    }
}

/// 도서에 리뷰 데이터를 첨부한 응답
///
/// `reviewData`는 상세 조회에서는 리뷰 배열, 리뷰 생성/수정에서는
/// 해당 리뷰 하나입니다. 도서 부분은 전체 필드(`BookResponse`) 또는
/// 필드 한정(`ProjectedBookResponse`) 형태를 씁니다. 저장된 도서
/// 문서 자체는 변경되지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct BookWithReviewData<B: Serialize, T: Serialize> {
    #[serde(flatten)]
    pub book: B,
    #[serde(rename = "reviewData")]
    pub review_data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_json() -> serde_json::Value {
        serde_json::json!({
            "title": "Go",
            "excerpt": "xxxxxxxxxxxxxxxxxxxx",
            "userId": "507f1f77bcf86cd799439011",
            "ISBN": "1234567890",
            "category": "tech",
            "subcategory": "lang",
            "releasedAt": "2023-05-01"
        })
    }

    #[test]
    fn test_valid_create_request_passes() {
        let request: CreateBookRequest = serde_json::from_value(valid_create_json()).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.book_cover.is_none());
    }

    #[test]
    fn test_missing_required_field_fails_deserialization() {
        let mut json = valid_create_json();
        json.as_object_mut().unwrap().remove("ISBN");
        assert!(serde_json::from_value::<CreateBookRequest>(json).is_err());
    }

    #[test]
    fn test_blank_title_fails_validation() {
        let mut json = valid_create_json();
        json["title"] = serde_json::json!("   ");
        let request: CreateBookRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_malformed_user_id_fails_validation() {
        let mut json = valid_create_json();
        json["userId"] = serde_json::json!("not-an-object-id");
        let request: CreateBookRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalid_release_date_fails_validation() {
        let mut json = valid_create_json();
        json["releasedAt"] = serde_json::json!("2023-13-01");
        let request: CreateBookRequest = serde_json::from_value(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_patch_emptiness() {
        let empty = UpdateBookRequest::default();
        assert!(empty.is_empty());

        let patch = UpdateBookRequest {
            title: Some("New Title".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_update_validates_present_fields_only() {
        let patch = UpdateBookRequest {
            isbn: Some("123".to_string()), // 10자리도 13자리도 아님
            ..Default::default()
        };
        assert!(patch.validate().is_err());

        let patch = UpdateBookRequest {
            excerpt: Some("shorter excerpt".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_list_query_unfiltered_detection() {
        let query = BookListQuery::default();
        assert!(query.is_unfiltered());

        let query = BookListQuery {
            category: Some("tech".to_string()),
            ..Default::default()
        };
        assert!(!query.is_unfiltered());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_projected_book_omits_cover_and_deletion_fields() {
        let mut book = Book::new(
            "Go".to_string(),
            "xxxxxxxxxxxxxxxxxxxx".to_string(),
            mongodb::bson::oid::ObjectId::new(),
            "1234567890".to_string(),
            "tech".to_string(),
            "lang".to_string(),
            "2023-05-01".to_string(),
            Some("https://cdn.example.com/cover.jpg".to_string()),
        );
        book.id = Some(mongodb::bson::oid::ObjectId::new());

        let json = serde_json::to_value(ProjectedBookResponse::from(book)).unwrap();
        let keys = json.as_object().unwrap();

        // 표지 URL이 있어도 projection에서는 빠진다
        assert!(!keys.contains_key("bookCover"));
        assert!(!keys.contains_key("deletedAt"));
        assert!(keys.contains_key("subcategory"));
        assert!(keys.contains_key("ISBN"));
        assert!(keys.contains_key("isDeleted"));
    }

    #[test]
    fn test_list_query_rejects_empty_values() {
        let query = BookListQuery {
            category: Some("".to_string()),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
