//! Signed session tokens and the authenticated-identity extension.
//!
//! A session is a cookie carrying `"{account_id}.{mac}"` where the MAC is
//! a blake3 keyed hash of the id's decimal form. The server keeps no
//! session table: possession of a validly signed id is the session, and
//! the id is re-resolved against storage on every request.

use http::request::Parts;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Key-derivation context string; versioned so a format change can
/// invalidate all outstanding tokens at once.
const KEY_CONTEXT: &str = "lorebank 2026 session token v1";

/// An authenticated account identity, resolved from a valid session.
///
/// Stored in HTTP request extensions by [`SessionService`] and read by
/// gated handlers. Deliberately not the storage-layer `Account`: the
/// session representation carries no password hash, and fact authorship
/// is constructed from `id` alone.
///
/// [`SessionService`]: crate::SessionService
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    /// The account's storage id.
    pub id: i64,
    /// The account's email address.
    pub email: String,
    /// The account's display name.
    pub username: String,
}

/// Extract the `CurrentAccount` from HTTP request `Parts`, if present.
pub fn account_from_parts(parts: &Parts) -> Option<&CurrentAccount> {
    parts.extensions.get::<CurrentAccount>()
}

/// Signs and verifies session tokens with a derived 32-byte key.
#[derive(Clone)]
pub struct SessionKey {
    key: [u8; 32],
}

impl SessionKey {
    /// Derive the signing key from the configured secret string.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
        }
    }

    /// Issue a signed token for an account id.
    pub fn sign(&self, account_id: i64) -> String {
        let id = account_id.to_string();
        let mac = blake3::keyed_hash(&self.key, id.as_bytes());
        format!("{id}.{}", mac.to_hex())
    }

    /// Verify a token and return the account id it binds.
    ///
    /// Returns `None` for malformed tokens and bad signatures alike; the
    /// caller treats both as an anonymous request. Comparison goes
    /// through `blake3::Hash` equality, which is constant-time.
    pub fn verify(&self, token: &str) -> Option<i64> {
        let (id_part, mac_part) = token.split_once('.')?;
        let account_id: i64 = id_part.parse().ok()?;
        let claimed = blake3::Hash::from_hex(mac_part).ok()?;
        let expected = blake3::keyed_hash(&self.key, id_part.as_bytes());
        (claimed == expected).then_some(account_id)
    }
}

/// Pull the session token out of a `Cookie` request header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
}

/// Build the `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Build the `Set-Cookie` value clearing the session.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}
