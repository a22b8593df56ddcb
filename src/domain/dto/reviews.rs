//! # 리뷰 요청/응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Review;
use crate::utils::validation::{deserialize_optional_string, validate_non_blank};

/// 리뷰 생성 요청 DTO
///
/// `rating`은 정수 타입이므로 1.5 같은 소수나 문자열은
/// 역직렬화 단계에서 거부됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 2, max = 1000, message = "리뷰는 2자 이상 1000자 이하여야 합니다"))]
    #[validate(custom(function = "validate_non_blank"))]
    pub review: String,

    #[validate(range(min = 1, max = 5, message = "평점은 1 이상 5 이하여야 합니다"))]
    pub rating: i32,

    /// 작성자 이름. 없으면 "Guest"로 저장됩니다.
    #[serde(rename = "reviewedBy", default, deserialize_with = "deserialize_optional_string")]
    pub reviewed_by: Option<String>,
}

/// 리뷰 부분 수정 요청 DTO
///
/// 없는 필드는 변경되지 않습니다. `reviewedBy`는 명시적으로 제공된
/// 경우에만 덮어씁니다 (수정 시 "Guest"로 되돌리지 않음).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 2, max = 1000, message = "리뷰는 2자 이상 1000자 이하여야 합니다"))]
    #[validate(custom(function = "validate_non_blank"))]
    pub review: Option<String>,

    #[validate(range(min = 1, max = 5, message = "평점은 1 이상 5 이하여야 합니다"))]
    pub rating: Option<i32>,

    #[serde(rename = "reviewedBy", default, deserialize_with = "deserialize_optional_string")]
    pub reviewed_by: Option<String>,
}

impl UpdateReviewRequest {
    /// 수정할 필드가 하나도 없는 빈 패치인지 확인
    pub fn is_empty(&self) -> bool {
        self.review.is_none() && self.rating.is_none() && self.reviewed_by.is_none()
    }
}

/// 리뷰 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "bookId")]
    pub book_id: String,
    pub review: String,
    pub rating: i32,
    #[serde(rename = "reviewedBy")]
    pub reviewed_by: String,
    #[serde(rename = "reviewedAt")]
    pub reviewed_at: DateTime<Utc>,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id_string().unwrap_or_default(),
            book_id: review.book_id.to_hex(),
            review: review.review,
            rating: review.rating,
            reviewed_by: review.reviewed_by,
            reviewed_at: review.reviewed_at.to_chrono(),
            is_deleted: review.is_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_review_passes() {
        let request: CreateReviewRequest = serde_json::from_value(serde_json::json!({
            "review": "solid read",
            "rating": 4
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert!(request.reviewed_by.is_none());
    }

    #[test]
    fn test_rating_bounds() {
        for bad in [0, 6, -1] {
            let request: CreateReviewRequest = serde_json::from_value(serde_json::json!({
                "review": "solid read",
                "rating": bad
            }))
            .unwrap();
            assert!(request.validate().is_err(), "rating {} should fail", bad);
        }

        for good in [1, 3, 5] {
            let request: CreateReviewRequest = serde_json::from_value(serde_json::json!({
                "review": "solid read",
                "rating": good
            }))
            .unwrap();
            assert!(request.validate().is_ok(), "rating {} should pass", good);
        }
    }

    #[test]
    fn test_fractional_rating_fails_deserialization() {
        let result = serde_json::from_value::<CreateReviewRequest>(serde_json::json!({
            "review": "solid read",
            "rating": 1.5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_rating_fails_deserialization() {
        let result = serde_json::from_value::<CreateReviewRequest>(serde_json::json!({
            "review": "solid read",
            "rating": "four"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_review_text_fails_deserialization() {
        let result = serde_json::from_value::<CreateReviewRequest>(serde_json::json!({
            "rating": 4
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_reviewer_name_becomes_none() {
        let request: CreateReviewRequest = serde_json::from_value(serde_json::json!({
            "review": "solid read",
            "rating": 4,
            "reviewedBy": "   "
        }))
        .unwrap();
        assert!(request.reviewed_by.is_none());
    }

    #[test]
    fn test_update_patch_emptiness() {
        assert!(UpdateReviewRequest::default().is_empty());

        let patch = UpdateReviewRequest {
            rating: Some(5),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
    }
}
