//! Detached Ed25519 signature checks for unlock challenges.
//!
//! Wallets sign the exact ASCII challenge produced by [`challenge_message`].
//! Signatures arrive either hex-encoded (browser extensions) or base64-encoded
//! (mobile deep-link redirects); public keys are base58, as wallets display
//! them. [`verify_signature`] never fails loudly: every decode or
//! cryptographic error collapses to `false`.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use ed25519_dalek::{Signature, VerifyingKey};

const MESSAGE_PREFIX: &str = "Unlock request for lock ";
const MESSAGE_REQUEST_SEPARATOR: &str = " with request ID ";

/// Reasons a signature could not be checked. Only surfaced to callers that
/// want the detail; [`verify_signature`] folds them all into `false`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature is neither hex nor base64")]
    SignatureEncoding,

    #[error("signature must be 64 bytes, got {0}")]
    SignatureLength(usize),

    #[error("public key is not valid base58")]
    KeyEncoding,

    #[error("public key must be 32 bytes, got {0}")]
    KeyLength(usize),

    #[error("public key is not a valid Ed25519 point")]
    KeyPoint,

    #[error("signature does not match message")]
    Mismatch,
}

/// Build the canonical challenge a wallet must sign for `request_id` on `lock_id`.
pub fn challenge_message(lock_id: &str, request_id: &str) -> String {
    format!("{MESSAGE_PREFIX}{lock_id}{MESSAGE_REQUEST_SEPARATOR}{request_id}")
}

/// The identifiers embedded in a challenge message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeIds<'a> {
    pub lock_id: &'a str,
    pub request_id: &'a str,
}

/// Split a challenge message back into its lock and request identifiers.
///
/// Returns `None` for anything not shaped like [`challenge_message`] output.
pub fn parse_challenge_message(message: &str) -> Option<ChallengeIds<'_>> {
    let rest = message.strip_prefix(MESSAGE_PREFIX)?;
    let (lock_id, request_id) = rest.rsplit_once(MESSAGE_REQUEST_SEPARATOR)?;
    if lock_id.is_empty() || request_id.is_empty() {
        return None;
    }
    Some(ChallengeIds {
        lock_id,
        request_id,
    })
}

/// Decode a signature given as hex or base64.
///
/// A string made only of hex digits is always read as hex.
pub fn decode_signature(encoded: &str) -> Result<Signature, SignatureError> {
    let encoded = encoded.trim();
    let bytes = if !encoded.is_empty() && encoded.chars().all(|c| c.is_ascii_hexdigit()) {
        hex::decode(encoded).map_err(|_| SignatureError::SignatureEncoding)?
    } else {
        STANDARD
            .decode(encoded)
            .or_else(|_| STANDARD_NO_PAD.decode(encoded))
            .or_else(|_| URL_SAFE_NO_PAD.decode(encoded))
            .map_err(|_| SignatureError::SignatureEncoding)?
    };

    Signature::from_slice(&bytes).map_err(|_| SignatureError::SignatureLength(bytes.len()))
}

/// Decode a base58 Ed25519 public key.
pub fn decode_public_key(encoded: &str) -> Result<VerifyingKey, SignatureError> {
    let bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|_| SignatureError::KeyEncoding)?;
    let raw: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| SignatureError::KeyLength(bytes.len()))?;
    VerifyingKey::from_bytes(&raw).map_err(|_| SignatureError::KeyPoint)
}

/// Check `signature` over `message` under `public_key`, reporting why it failed.
pub fn check_signature(
    message: &[u8],
    signature: &str,
    public_key: &str,
) -> Result<(), SignatureError> {
    let signature = decode_signature(signature)?;
    let key = decode_public_key(public_key)?;
    key.verify_strict(message, &signature)
        .map_err(|_| SignatureError::Mismatch)
}

/// `true` iff `signature` is a valid detached signature of `message` by `public_key`.
pub fn verify_signature(message: &[u8], signature: &str, public_key: &str) -> bool {
    check_signature(message, signature, public_key).is_ok()
}
