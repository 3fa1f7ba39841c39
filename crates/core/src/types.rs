/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of a provisioned lock (e.g. `lock001`).
pub type LockId = String;

/// A base58-encoded Ed25519 public key, as wallets present it.
pub type PublicKey = String;

/// Opaque identifier of an access request.
pub type RequestId = String;
