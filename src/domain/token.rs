//! JWT 클레임과 인증 컨텍스트 정의

use serde::{Deserialize, Serialize};

/// 로그인 시 발급되는 액세스 토큰의 클레임
///
/// `exp`는 발급 시각으로부터 100분 뒤로 설정됩니다 (`JwtConfig` 참조).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (MongoDB ObjectId 문자열)
    #[serde(rename = "userId")]
    pub user_id: String,
    /// 발급 시각 (unix timestamp, 초)
    pub iat: i64,
    /// 만료 시각 (unix timestamp, 초)
    pub exp: i64,
}

/// 인증 미들웨어가 요청 extensions에 저장하는 사용자 정보
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 토큰에서 추출한 사용자 ID
    pub user_id: String,
}
