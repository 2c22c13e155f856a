//! Shared fixtures: RSA keys are expensive to generate, so each test binary
//! makes them once.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use certseal_core::envelope::{seal_bytes, PrivateKeyMaterial, PublicKeyMaterial};
use once_cell::sync::Lazy;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

/// 4096 bits: the smallest size a 500-byte chunk fits into
static PRIMARY: Lazy<RsaPrivateKey> = Lazy::new(|| generate(4096));
static OTHER: Lazy<RsaPrivateKey> = Lazy::new(|| generate(4096));
static SMALL: Lazy<RsaPrivateKey> = Lazy::new(|| generate(2048));

fn generate(bits: usize) -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rand::thread_rng(), bits).expect("key generation")
}

pub fn private_key() -> PrivateKeyMaterial {
    PrivateKeyMaterial::from_rsa(PRIMARY.clone())
}

pub fn public_key() -> PublicKeyMaterial {
    private_key().public_half()
}

pub fn other_private_key() -> PrivateKeyMaterial {
    PrivateKeyMaterial::from_rsa(OTHER.clone())
}

pub fn small_private_key() -> PrivateKeyMaterial {
    PrivateKeyMaterial::from_rsa(SMALL.clone())
}

/// Seal a YAML document under the primary key
pub fn seal_yaml(yaml: &str) -> Vec<u8> {
    seal_bytes(yaml.as_bytes(), &public_key()).expect("seal")
}

/// Write the primary key pair in the `<ssldir>/{public,private}_keys/<cert>` layout
pub fn write_key_pair(ssl_dir: &Path, cert: &str) -> (PathBuf, PathBuf) {
    let public_dir = ssl_dir.join("public_keys");
    let private_dir = ssl_dir.join("private_keys");
    fs::create_dir_all(&public_dir).unwrap();
    fs::create_dir_all(&private_dir).unwrap();

    let public_path = public_dir.join(cert);
    let private_path = private_dir.join(cert);
    let public_pem = PRIMARY
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .unwrap();
    let private_pem = PRIMARY.to_pkcs1_pem(LineEnding::LF).unwrap();
    fs::write(&public_path, public_pem).unwrap();
    fs::write(&private_path, private_pem.as_bytes()).unwrap();
    (public_path, private_path)
}

/// Deterministic non-text bytes
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
