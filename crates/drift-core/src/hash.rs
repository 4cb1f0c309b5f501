//! SHA-256 fingerprints of simulation state, for determinism checks

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

const PREFIX: &str = "sha256:";

/// Digest of a simulation's full state.
///
/// Two runs with the same seed and the same tick durations produce equal
/// hashes; a single flipped bit in any particle changes it.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct StateHash([u8; 32]);

impl StateHash {
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// `sha256:<64 hex digits>`, the form printed by `drift trace`
    pub fn to_prefixed_hex(&self) -> String {
        format!("{PREFIX}{}", self.to_hex())
    }

    /// Inverse of [`StateHash::to_prefixed_hex`]. The prefix is optional.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.trim();
        let digits = digits.strip_prefix(PREFIX).unwrap_or(digits);
        if digits.len() != 64 || !digits.is_ascii() {
            return None;
        }
        let mut out = [0u8; 32];
        for (byte, pair) in out.iter_mut().zip(digits.as_bytes().chunks(2)) {
            let pair = std::str::from_utf8(pair).ok()?;
            *byte = u8::from_str_radix(pair, 16).ok()?;
        }
        Some(Self(out))
    }
}

impl fmt::Debug for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for StateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Incremental hasher fed with the raw bit patterns of state values
pub struct StateHasher {
    inner: Sha256,
}

impl StateHasher {
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    /// Little-endian IEEE bits, so `0.0` and `-0.0` differ
    pub fn write_f64(&mut self, v: f64) {
        self.inner.update(v.to_bits().to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.inner.update(v.to_le_bytes());
    }

    pub fn write_bool(&mut self, v: bool) {
        self.inner.update([v as u8]);
    }

    pub fn finish(self) -> StateHash {
        StateHash(self.inner.finalize().into())
    }
}

impl Default for StateHasher {
    fn default() -> Self {
        Self::new()
    }
}
