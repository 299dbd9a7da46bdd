//! Token fixtures
//!
//! Tokens are structurally valid JWTs with a fixed header and a fake
//! signature; they decode but would never verify.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;

const HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

/// Unsigned JWT for `sub` expiring at `exp` (Unix seconds)
pub fn jwt(sub: &str, exp: i64) -> String {
    let payload = serde_json::json!({ "sub": sub, "exp": exp, "iat": exp - 3600 });
    format!("{HEADER}.{}.fake-signature", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

/// Token valid for the next hour
pub fn valid_jwt() -> String {
    jwt("user@example.com", Utc::now().timestamp() + 3600)
}

/// Token that expired a minute ago
pub fn expired_jwt() -> String {
    jwt("user@example.com", Utc::now().timestamp() - 60)
}
