//! Token 签发与校验。
//!
//! 线上格式为紧凑 JWS：`base64url(header).base64url(claims).base64url(sig)`，
//! header 固定 `{"alg":"HS256","typ":"JWT"}`，签名为 HMAC-SHA256。
//! 服务端不记录已签发 token，校验完全无状态。

use serde::{Deserialize, Serialize};
use tg_shared_protocol::{TokenClaims, now_unix};
use thiserror::Error;

use super::token_crypto::{b64url_decode, b64url_encode, hmac_b64url, verify_hmac_b64url};

/// 唯一支持的签名算法。
const JWS_ALG: &str = "HS256";
/// header `typ` 字段。
const JWS_TYP: &str = "JWT";

/// JWS header。
#[derive(Debug, Serialize, Deserialize)]
struct JwsHeader {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

/// token 校验失败原因。
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub(crate) enum TokenError {
    /// 解码失败或签名不匹配。
    #[error("token signature or encoding is invalid")]
    BadSignature,
    /// `now >= exp`。
    #[error("token has expired")]
    Expired,
}

/// token 签发失败原因。
#[derive(Debug, Error)]
pub(crate) enum IssueError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("encode token claims failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("signing key rejected by HMAC")]
    Key,
}

/// 签发结果：token 与其内嵌 claims。
#[derive(Debug, Clone)]
pub(crate) struct IssuedToken {
    pub(crate) token: String,
    pub(crate) claims: TokenClaims,
}

/// Token 服务：持有签名密钥，显式构造后通过 `AppState` 注入。
#[derive(Clone)]
pub(crate) struct TokenService {
    secret: String,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenService {
    pub(crate) fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// 为 `username` 签发 `ttl_minutes` 分钟后过期的 token。
    ///
    /// 不校验用户是否存在于凭证表，调用方需先完成 `authenticate`。
    /// `ttl_minutes <= 0` 得到的 token 签发即过期。
    pub(crate) fn issue(
        &self,
        username: &str,
        ttl_minutes: i64,
    ) -> Result<IssuedToken, IssueError> {
        self.issue_at(username, ttl_minutes, now_unix())
    }

    /// 以指定时刻签发。
    pub(crate) fn issue_at(
        &self,
        username: &str,
        ttl_minutes: i64,
        now: i64,
    ) -> Result<IssuedToken, IssueError> {
        if username.is_empty() {
            return Err(IssueError::EmptyUsername);
        }
        let claims = TokenClaims {
            username: username.to_string(),
            iat: now,
            exp: now.saturating_add(ttl_minutes.saturating_mul(60)),
        };
        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// 校验签名与有效期，成功返回 claims。
    pub(crate) fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, now_unix())
    }

    /// 以指定时刻校验。
    pub(crate) fn verify_at(&self, token: &str, now: i64) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// 编码 header/claims 并附加签名。
    fn sign(&self, claims: &TokenClaims) -> Result<String, IssueError> {
        let header = JwsHeader {
            alg: JWS_ALG.to_string(),
            typ: Some(JWS_TYP.to_string()),
        };
        let header_b64 = b64url_encode(&serde_json::to_vec(&header)?);
        let payload_b64 = b64url_encode(&serde_json::to_vec(claims)?);
        let signing_input = format!("{header_b64}.{payload_b64}");
        let sig_b64 = hmac_b64url(&self.secret, signing_input.as_bytes())
            .map_err(|_| IssueError::Key)?;
        Ok(format!("{signing_input}.{sig_b64}"))
    }

    /// 拆分并校验签名，返回未判定过期的 claims。
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut parts = token.split('.');
        let header_b64 = parts.next().unwrap_or_default();
        let payload_b64 = parts.next().unwrap_or_default();
        let sig_b64 = parts.next().unwrap_or_default();
        if header_b64.is_empty()
            || payload_b64.is_empty()
            || sig_b64.is_empty()
            || parts.next().is_some()
        {
            return Err(TokenError::BadSignature);
        }

        let header: JwsHeader = b64url_decode(header_b64)
            .and_then(|raw| serde_json::from_slice(&raw).ok())
            .ok_or(TokenError::BadSignature)?;
        if header.alg != JWS_ALG {
            return Err(TokenError::BadSignature);
        }

        let signing_input_len = header_b64.len() + 1 + payload_b64.len();
        let signing_input = &token[..signing_input_len];
        if !verify_hmac_b64url(&self.secret, signing_input.as_bytes(), sig_b64) {
            return Err(TokenError::BadSignature);
        }

        b64url_decode(payload_b64)
            .and_then(|raw| serde_json::from_slice::<TokenClaims>(&raw).ok())
            .ok_or(TokenError::BadSignature)
    }
}

#[cfg(test)]
mod tests {
    use tg_shared_protocol::now_unix;

    use super::{IssueError, TokenError, TokenService};

    const NOW: i64 = 1_700_000_000;

    fn service() -> TokenService {
        TokenService::new("test-secret")
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let svc = service();
        for username in ["admin", "user", "someone-not-in-table"] {
            let token = svc.issue(username, 60).expect("issue").token;
            let claims = svc.verify(&token).expect("verify");
            assert_eq!(claims.username, username);
            assert_eq!(claims.exp - claims.iat, 3600);
            assert!(claims.iat <= now_unix());
        }
    }

    #[test]
    fn token_has_three_jws_segments() {
        let token = service().issue_at("admin", 60, NOW).expect("issue").token;
        let parts = token.split('.').collect::<Vec<_>>();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
    }

    #[test]
    fn non_positive_ttl_is_expired_immediately() {
        let svc = service();
        for ttl in [0, -1, -60] {
            let token = svc.issue("admin", ttl).expect("issue").token;
            assert_eq!(svc.verify(&token), Err(TokenError::Expired), "ttl={ttl}");
        }
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let svc = service();
        let token = svc.issue_at("admin", 1, NOW).expect("issue").token;
        assert!(svc.verify_at(&token, NOW + 59).is_ok());
        assert_eq!(svc.verify_at(&token, NOW + 60), Err(TokenError::Expired));
        assert_eq!(svc.verify_at(&token, NOW + 61), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_secret_is_bad_signature() {
        let token = TokenService::new("other-secret")
            .issue("admin", 60)
            .expect("issue")
            .token;
        assert_eq!(service().verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn foreign_secret_wins_over_expiry() {
        let token = TokenService::new("other-secret")
            .issue("admin", -5)
            .expect("issue")
            .token;
        assert_eq!(service().verify(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn tampered_payload_is_bad_signature() {
        let svc = service();
        let token = svc.issue_at("user", 60, NOW).expect("issue").token;
        let forged = svc.issue_at("admin", 60, NOW).expect("issue").token;
        let mut parts = token.split('.').collect::<Vec<_>>();
        let forged_payload = forged.split('.').nth(1).expect("payload");
        parts[1] = forged_payload;
        let spliced = parts.join(".");
        assert_eq!(svc.verify_at(&spliced, NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn garbage_tokens_are_bad_signature() {
        let svc = service();
        for token in ["", "abc", "a.b", "a.b.c", "a.b.c.d", "..", "eyJ9.eyJ9.sig"] {
            assert_eq!(svc.verify(token), Err(TokenError::BadSignature), "{token:?}");
        }
    }

    #[test]
    fn accepts_standard_hs256_jwt() {
        // 由标准 JWT 库按相同密钥签出的 token。
        let svc = TokenService::new("your-secret-key-change-in-production");
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                     eyJ1c2VybmFtZSI6ImFkbWluIiwiZXhwIjoxNzAwMDAzNjAwLCJpYXQiOjE3MDAwMDAwMDB9.\
                     U-4MYcozFzrZTHO1KC1oi_XjlqA4sQxifvZQOXBJqK0";
        let claims = svc.verify_at(token, NOW).expect("verify");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 3600);
    }

    #[test]
    fn accepts_standard_jwt_without_iat() {
        let svc = TokenService::new("your-secret-key-change-in-production");
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
                     eyJ1c2VybmFtZSI6ImFkbWluIiwiZXhwIjoxNzAwMDAzNjAwfQ.\
                     GtM5yJI4zjPip6cCNzTrEtbZ7G01AjlUZYvfRCIm-tQ";
        let claims = svc.verify_at(token, NOW).expect("verify");
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.iat, 0);
        assert_eq!(svc.verify_at(token, NOW + 3600), Err(TokenError::Expired));
    }

    #[test]
    fn verify_is_idempotent() {
        let svc = service();
        let token = svc.issue("admin", 60).expect("issue").token;
        let first = svc.verify(&token).expect("first");
        let second = svc.verify(&token).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_username_is_rejected() {
        assert!(matches!(
            service().issue("", 60),
            Err(IssueError::EmptyUsername)
        ));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains("test-secret"));
    }
}
