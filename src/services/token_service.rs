//! JWT 토큰 관리 서비스 구현
//!
//! HMAC-SHA256 서명으로 액세스 토큰을 생성하고 검증합니다.
//! 토큰은 로그인 응답 본문의 `data.token`과 `x-api-key` 응답 헤더
//! 양쪽으로 전달되며, 보호된 라우트에서 검증됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::JwtConfig;
use crate::domain::token::TokenClaims;
use crate::errors::AppError;

/// JWT 토큰 관리 서비스
///
/// 외부 의존성이 없는 순수 서비스입니다. 시크릿과 만료 시간은
/// 환경 변수 기반의 `JwtConfig`에서 읽습니다.
pub struct TokenService;

impl TokenService {
    pub fn new() -> Self {
        Self
    }

    /// 사용자 ID로 JWT 액세스 토큰 생성
    ///
    /// # Returns
    ///
    /// * `Ok((token, claims))` - 서명된 토큰과, 응답 본문에 그대로
    ///   노출되는 발급/만료 타임스탬프가 담긴 클레임
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 서명 실패
    pub fn generate_token(&self, user_id: &str) -> Result<(String, TokenClaims), AppError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(JwtConfig::expiration_minutes());

        let claims = TokenClaims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        let token = encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))?;

        Ok((token, claims))
    }

    /// 토큰 서명과 만료를 검증하고 클레임을 반환
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 서명 불일치, 만료, 형식 오류
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                log::warn!("토큰 검증 실패: {}", e);
                AppError::AuthenticationError("유효하지 않은 인증 토큰입니다".to_string())
            })
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

/// `Authorization` 헤더 값에서 Bearer 토큰 추출
///
/// `Bearer ` 접두사가 없으면 값 전체를 토큰으로 취급합니다
/// (`x-api-key` 헤더와 동일한 형식 지원).
pub fn extract_bearer_token(header_value: &str) -> &str {
    header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify_roundtrip() {
        let service = TokenService::new();
        let (token, claims) = service
            .generate_token("507f1f77bcf86cd799439011")
            .unwrap();

        let verified = service.verify_token(&token).unwrap();
        assert_eq!(verified.user_id, "507f1f77bcf86cd799439011");
        assert_eq!(verified.iat, claims.iat);
        assert_eq!(verified.exp, claims.exp);
    }

    #[test]
    fn test_default_expiry_is_100_minutes() {
        let service = TokenService::new();
        let (_, claims) = service.generate_token("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(claims.exp - claims.iat, 100 * 60);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = TokenService::new();
        let (token, _) = service.generate_token("507f1f77bcf86cd799439011").unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(service.verify_token(&tampered).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = TokenService::new();
        assert!(service.verify_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), "abc.def.ghi");
        assert_eq!(extract_bearer_token("abc.def.ghi"), "abc.def.ghi");
        assert_eq!(extract_bearer_token("Bearer   abc "), "abc");
    }
}
