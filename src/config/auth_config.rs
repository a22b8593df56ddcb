//! JWT 인증 설정 관리 모듈

use std::env;

/// JWT 토큰 설정
///
/// 로그인 시 발급되는 액세스 토큰의 서명 비밀키와 만료 시간을 관리합니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명 비밀키를 반환합니다.
    ///
    /// `JWT_SECRET` 환경 변수가 없으면 개발용 기본값을 사용합니다.
    /// 프로덕션에서는 반드시 환경 변수로 제공해야 합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "book-catalog-secret".to_string()
        })
    }

    /// 액세스 토큰 만료 시간(분)을 반환합니다. 기본값은 100분입니다.
    pub fn expiration_minutes() -> i64 {
        env::var("JWT_EXPIRATION_MINUTES")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100)
    }
}
