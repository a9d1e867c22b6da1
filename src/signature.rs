//! API call signatures.
//!
//! Last.fm verifies every authenticated call by recomputing an `api_sig` from
//! the parameters it received: keys sorted, each `key` + `value` concatenated,
//! the shared secret appended, then an MD5 digest rendered as lowercase hex.

use md5::{Digest, Md5};

/// Parameters the service leaves out of the signature base string.
pub const UNSIGNED_KEYS: [&str; 3] = ["api_sig", "callback", "format"];

/// Compute the signature of a parameter set for the given shared secret.
///
/// Ordering of the input does not matter; keys are sorted before hashing.
/// Keys listed in [`UNSIGNED_KEYS`] are skipped.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
///
/// let mut params = HashMap::new();
/// params.insert("method", "auth.getsession");
/// params.insert("token", "abc");
///
/// let sig = lastfm_scrobble::sign(&params, "secret");
/// assert_eq!(sig.len(), 32);
/// assert_eq!(sig, lastfm_scrobble::sign(&params, "secret"));
/// ```
pub fn sign<I, K, V>(params: I, secret: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut pairs: Vec<(K, V)> = params
        .into_iter()
        .filter(|(key, _)| !UNSIGNED_KEYS.contains(&key.as_ref()))
        .collect();
    pairs.sort_by(|(a, _), (b, _)| a.as_ref().cmp(b.as_ref()));

    let mut hasher = Md5::new();
    for (key, value) in &pairs {
        hasher.update(key.as_ref().as_bytes());
        hasher.update(value.as_ref().as_bytes());
    }
    hasher.update(secret.as_bytes());

    format!("{:x}", hasher.finalize())
}
