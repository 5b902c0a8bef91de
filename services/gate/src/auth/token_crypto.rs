//! Token 签名与编码辅助函数。

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac, digest::InvalidLength};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 并输出 base64url。
pub(crate) fn hmac_b64url(secret: &str, payload: &[u8]) -> Result<String, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(payload);
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// 常量时间校验 base64url 形式的 HMAC-SHA256 签名。
pub(crate) fn verify_hmac_b64url(secret: &str, payload: &[u8], signature_b64: &str) -> bool {
    let Ok(sig) = URL_SAFE_NO_PAD.decode(signature_b64.as_bytes()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&sig).is_ok()
}

/// base64url（无填充）编码。
pub(crate) fn b64url_encode(raw: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(raw)
}

/// base64url（无填充）解码。
pub(crate) fn b64url_decode(encoded: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(encoded.as_bytes()).ok()
}

/// sha256 hex。
pub(crate) fn sha256_hex(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}

/// token/密钥指纹：sha256 前 12 位 hex，只用于日志与诊断输出。
pub(crate) fn fingerprint(value: &str) -> String {
    let mut hex = sha256_hex(value);
    hex.truncate(12);
    hex
}

#[cfg(test)]
mod tests {
    use super::{fingerprint, hmac_b64url, sha256_hex, verify_hmac_b64url};

    #[test]
    fn hmac_matches_rfc4231_case_two() {
        // RFC 4231 test case 2, key "Jefe"。
        let sig = hmac_b64url("Jefe", b"what do ya want for nothing?").expect("hmac");
        assert_eq!(sig, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM");
    }

    #[test]
    fn verify_rejects_other_secret_and_garbage() {
        let sig = hmac_b64url("k1", b"payload").expect("hmac");
        assert!(verify_hmac_b64url("k1", b"payload", &sig));
        assert!(!verify_hmac_b64url("k2", b"payload", &sig));
        assert!(!verify_hmac_b64url("k1", b"payload2", &sig));
        assert!(!verify_hmac_b64url("k1", b"payload", "***"));
    }

    #[test]
    fn fingerprint_is_sha256_prefix() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(fingerprint("abc"), "ba7816bf8f01");
    }
}
