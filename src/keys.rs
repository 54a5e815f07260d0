use base64::{
    alphabet,
    engine::{general_purpose::URL_SAFE_NO_PAD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use p256::{
    ecdsa::{SigningKey, VerifyingKey},
    elliptic_curve::rand_core::CryptoRngCore,
    pkcs8::{DecodePrivateKey, EncodePrivateKey},
    FieldBytes,
};
use rand::rngs::OsRng;
use tracing::{debug, trace};

use crate::error::KeyError;

/// Length of an uncompressed SEC1 point on P-256: 0x04 || X || Y.
pub const PUBLIC_KEY_LEN: usize = 65;

const UNCOMPRESSED_TAG: u8 = 0x04;

/// A healthy RNG lands outside the scalar range with probability ~2^-32.
const MAX_SCALAR_DRAWS: usize = 8;

/// Encodes without padding, decodes with or without it.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A VAPID key pair, both halves as unpadded base64url.
#[derive(Clone, PartialEq, Eq)]
pub struct VapidKeys {
    /// Uncompressed public point, 65 bytes decoded.
    pub public_key: String,
    /// Unencrypted PKCS8 DER document.
    pub private_key: String,
}

impl std::fmt::Debug for VapidKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidKeys")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl VapidKeys {
    /// Encodes an existing signing key.
    pub fn from_signing_key(signing_key: &SigningKey) -> Result<Self, KeyError> {
        let pub_ep = signing_key.verifying_key().to_encoded_point(false);
        let pub_bytes = pub_ep.as_bytes();
        debug_assert_eq!(pub_bytes.len(), PUBLIC_KEY_LEN);

        let priv_der = signing_key
            .to_pkcs8_der()
            .map_err(|e| KeyError::CryptoBackend(format!("PKCS8 encoding failed: {e}")))?;
        trace!("PKCS8 private key: {} bytes", priv_der.as_bytes().len());

        Ok(VapidKeys {
            public_key: URL_SAFE_NO_PAD.encode(pub_bytes),
            private_key: URL_SAFE_NO_PAD.encode(priv_der.as_bytes()),
        })
    }
}

/// Generates a fresh key pair from the operating system RNG.
pub fn generate() -> Result<VapidKeys, KeyError> {
    generate_with_rng(&mut OsRng)
}

/// Generates a key pair from the given RNG.
///
/// A scalar that is zero or not below the curve order is redrawn, up to
/// `MAX_SCALAR_DRAWS` times. An RNG error, or an RNG that never yields a
/// valid scalar, aborts with [`KeyError::CryptoBackend`].
pub fn generate_with_rng(rng: &mut impl CryptoRngCore) -> Result<VapidKeys, KeyError> {
    let signing_key = random_signing_key(rng)?;
    let keys = VapidKeys::from_signing_key(&signing_key)?;
    debug!("Generated P-256 key pair");
    Ok(keys)
}

fn random_signing_key(rng: &mut impl CryptoRngCore) -> Result<SigningKey, KeyError> {
    let mut bytes = FieldBytes::default();
    for _ in 0..MAX_SCALAR_DRAWS {
        rng.try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| KeyError::CryptoBackend(format!("RNG unavailable: {e}")))?;
        match SigningKey::from_bytes(&bytes) {
            Ok(key) => return Ok(key),
            Err(_) => trace!("Scalar out of range, redrawing"),
        }
    }
    Err(KeyError::CryptoBackend(format!(
        "RNG produced no valid scalar in {MAX_SCALAR_DRAWS} draws"
    )))
}

/// Decodes a base64url public key and checks it is an uncompressed P-256 point.
pub fn decode_public_key(b64: &str) -> Result<VerifyingKey, KeyError> {
    let bytes = URL_SAFE_LENIENT.decode(b64)?;
    if bytes.len() != PUBLIC_KEY_LEN {
        return Err(KeyError::PublicKeyLength(bytes.len()));
    }
    if bytes[0] != UNCOMPRESSED_TAG {
        return Err(KeyError::PublicKeyCompressed(bytes[0]));
    }
    VerifyingKey::from_sec1_bytes(&bytes).map_err(|e| KeyError::PublicKeyPoint(e.to_string()))
}

/// Decodes a base64url PKCS8 DER private key on P-256.
pub fn decode_private_key(b64: &str) -> Result<SigningKey, KeyError> {
    let bytes = URL_SAFE_LENIENT.decode(b64)?;
    SigningKey::from_pkcs8_der(&bytes).map_err(|e| KeyError::PrivateKey(e.to_string()))
}

/// Checks that both keys decode and that the public key is derived from the private one.
pub fn verify_pair(public_b64: &str, private_b64: &str) -> Result<(), KeyError> {
    let public = decode_public_key(public_b64)?;
    let private = decode_private_key(private_b64)?;
    if *private.verifying_key() != public {
        return Err(KeyError::KeyMismatch);
    }
    Ok(())
}
