// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password storage using PBKDF2-HMAC-SHA256.
//!
//! Stored form: `pbkdf2_sha256$<iterations>$<salt hex>$<hash hex>`.

use anyhow::{anyhow, Context};
use ring::digest::SHA256_OUTPUT_LEN;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const SCHEME: &str = "pbkdf2_sha256";
const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let iterations =
        NonZeroU32::new(PBKDF2_ITERATIONS).context("PBKDF2 iteration count must be non-zero")?;

    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| anyhow!("Failed to generate password salt"))?;

    let mut hash = [0u8; SHA256_OUTPUT_LEN];
    pbkdf2::derive(ALGORITHM, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        hex::encode(salt),
        hex::encode(hash)
    ))
}

/// Check a password against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    if scheme != SCHEME {
        return false;
    }
    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (hex::decode(salt), hex::decode(hash)) else {
        return false;
    };

    pbkdf2::verify(ALGORITHM, iterations, &salt, password.as_bytes(), &hash).is_ok()
}
