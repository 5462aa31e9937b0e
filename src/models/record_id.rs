// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record identifiers.
//!
//! Ids are 12 bytes rendered as 24 lowercase hex characters:
//! 4 bytes of big-endian Unix seconds, 5 random bytes chosen once per
//! process and a 3 byte counter. Within one process, sorting ids lexically
//! sorts records by creation order.

use anyhow::anyhow;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

pub const RECORD_ID_LEN: usize = 24;

static COUNTER: AtomicU32 = AtomicU32::new(0);
static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();

fn process_unique() -> anyhow::Result<[u8; 5]> {
    if let Some(bytes) = PROCESS_UNIQUE.get() {
        return Ok(*bytes);
    }

    let mut bytes = [0u8; 5];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| anyhow!("Failed to generate random bytes for record ids"))?;

    // Another thread may have won the race; use whichever value was stored.
    Ok(*PROCESS_UNIQUE.get_or_init(|| bytes))
}

/// Generate a new record id.
pub fn new_record_id() -> anyhow::Result<String> {
    let mut bytes = [0u8; 12];

    let seconds = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());

    bytes[4..9].copy_from_slice(&process_unique()?);

    let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

    Ok(hex::encode(bytes))
}

/// Check that `id` has the shape of a record id.
///
/// Also keeps path separators and other characters out of document ids.
pub fn is_valid_record_id(id: &str) -> bool {
    id.len() == RECORD_ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
