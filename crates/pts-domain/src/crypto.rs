//! Key derivation, deterministic generation, and the sealed blob format.
//!
//! All key material is derived with HKDF-SHA256 from the master key. The
//! sealed blob is AES-256-GCM with a fresh salt and nonce per seal, laid out
//! as `[version][salt][nonce][ciphertext+tag]` and base64-encoded.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::StoreError;
use crate::secret::Algorithm;

/// Characters of generated output when no explicit length is stored.
pub const DEFAULT_SECRET_LENGTH: usize = 20;

pub(crate) const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const BLOB_VERSION: u8 = 1;
const GENERATE_OKM_LEN: usize = 64;

const INFO_GENERATE_V1: &[u8] = b"pts:generate:v1";
const INFO_SEAL_V1: &[u8] = b"pts:seal:v1";
pub(crate) const INFO_MASTER_V1: &[u8] = b"pts:master:v1";

/// The combined generation/encryption key: `owner|master-password`, or just
/// the master password when no owner is configured. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey(String);

impl MasterKey {
    pub fn new(owner: Option<&str>, master: &str) -> Self {
        match owner {
            Some(owner) if !owner.is_empty() => Self(format!("{owner}|{master}")),
            _ => Self(master.to_owned()),
        }
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

pub(crate) fn derive(
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
    out: &mut [u8],
) -> Result<(), StoreError> {
    Hkdf::<Sha256>::new(Some(salt), ikm)
        .expand(info, out)
        .map_err(|_| StoreError::KeyDerivation)
}

/// Constant-time equality for fixed-purpose digests.
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub(crate) fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// Deterministically derives a secret value from a salt and the master key.
///
/// The same inputs always produce the same output; nothing derived here is
/// ever persisted. Unknown algorithm versions are rejected so a newer store
/// fails loudly instead of generating a different password.
pub fn generate(salt: &str, key: &MasterKey, algorithm: &Algorithm) -> Result<String, StoreError> {
    if algorithm.version != 1 {
        return Err(StoreError::UnknownAlgorithm {
            version: algorithm.version,
        });
    }

    let mut okm = [0u8; GENERATE_OKM_LEN];
    derive(key.expose(), salt.as_bytes(), INFO_GENERATE_V1, &mut okm)?;
    let encoded = BASE64.encode(okm);
    okm.zeroize();

    let length = algorithm.length.unwrap_or(DEFAULT_SECRET_LENGTH);
    if length == 0 || length > encoded.len() {
        return Err(StoreError::InvalidLength {
            requested: length,
            max: encoded.len(),
        });
    }

    Ok(encoded[..length].to_owned())
}

/// Seals a plaintext under the master key, producing a base64 blob.
pub fn seal(plaintext: &[u8], key: &MasterKey) -> Result<String, StoreError> {
    let salt = random_bytes::<SALT_LEN>();
    let nonce = random_bytes::<NONCE_LEN>();

    let cipher = blob_cipher(key, &salt)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| StoreError::Encrypt)?;

    let mut blob = Vec::with_capacity(1 + SALT_LEN + NONCE_LEN + ciphertext.len());
    blob.push(BLOB_VERSION);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Opens a sealed blob. Fails on tampering or a wrong master key.
pub fn open(blob: &str, key: &MasterKey) -> Result<Vec<u8>, StoreError> {
    let raw = BASE64
        .decode(blob)
        .map_err(|_| StoreError::MalformedPayload)?;
    if raw.len() < 1 + SALT_LEN + NONCE_LEN || raw[0] != BLOB_VERSION {
        return Err(StoreError::MalformedPayload);
    }

    let salt = &raw[1..1 + SALT_LEN];
    let nonce = &raw[1 + SALT_LEN..1 + SALT_LEN + NONCE_LEN];
    let ciphertext = &raw[1 + SALT_LEN + NONCE_LEN..];

    let cipher = blob_cipher(key, salt)?;
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StoreError::Decrypt)
}

fn blob_cipher(key: &MasterKey, salt: &[u8]) -> Result<Aes256Gcm, StoreError> {
    let mut key_bytes = [0u8; 32];
    derive(key.expose(), salt, INFO_SEAL_V1, &mut key_bytes)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
    key_bytes.zeroize();
    Ok(cipher)
}
