//! Request signing for gateway write operations.
//!
//! Write payloads carry a signature over their `idData` section, produced
//! with the account's Ed25519 secret. Keys and signatures travel as
//! `0x`-prefixed hex strings (the prefix is optional on input).

use ed25519_dalek::{Signer, SigningKey, SECRET_KEY_LENGTH};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("Invalid private key format")]
    InvalidKeyFormat,
}

/// Decode a 64-hex-char secret (32 bytes) into a signing key.
fn decode_key(private_key: &str) -> Result<SigningKey, SignError> {
    let hex_str = private_key.strip_prefix("0x").unwrap_or(private_key);
    let bytes = hex::decode(hex_str).map_err(|_| SignError::InvalidKeyFormat)?;
    let bytes: [u8; SECRET_KEY_LENGTH] =
        bytes.try_into().map_err(|_| SignError::InvalidKeyFormat)?;
    Ok(SigningKey::from_bytes(&bytes))
}

/// Sign a payload: Ed25519 over the SHA-256 digest of its serialization,
/// returned as a `0x`-hex string. Deterministic for a given key and payload.
pub fn sign(private_key: &str, payload: &Value) -> Result<String, SignError> {
    let key = decode_key(private_key)?;
    let digest = Sha256::digest(payload.to_string().as_bytes());
    let signature = key.sign(&digest);
    Ok(format!("0x{}", hex::encode(signature.to_bytes())))
}

/// The account address for a secret: `0x`-hex of the verifying key. Used
/// for `createdBy` when no explicit address is configured.
pub fn address(private_key: &str) -> Result<String, SignError> {
    let key = decode_key(private_key)?;
    Ok(format!("0x{}", hex::encode(key.verifying_key().to_bytes())))
}

/// `0x`-hex SHA-256 of a serialized value; used for `idData.dataHash`.
pub fn hash_data(value: &Value) -> String {
    format!(
        "0x{}",
        hex::encode(Sha256::digest(value.to_string().as_bytes()))
    )
}
