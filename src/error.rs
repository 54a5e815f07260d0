use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    /// The RNG or the key encoder failed. Never retried.
    #[error("crypto backend error: {0}")]
    CryptoBackend(String),

    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("public key must be 65 bytes, got {0}")]
    PublicKeyLength(usize),

    #[error("public key is not an uncompressed point (leading byte {0:#04x})")]
    PublicKeyCompressed(u8),

    #[error("public key is not on P-256: {0}")]
    PublicKeyPoint(String),

    #[error("private key is not a P-256 PKCS8 document: {0}")]
    PrivateKey(String),

    #[error("public key does not belong to the private key")]
    KeyMismatch,
}
