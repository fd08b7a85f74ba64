//! Per-signature salt.
//!
//! Two structurally identical transactions (same payload, fee and nonce)
//! must still sign different bytes, so every signing attempt draws a fresh
//! salt. The source is a trait so tests can observe or pin it.

use rand::rngs::OsRng;
use rand::RngCore;

/// Supplier of salt bytes.
pub trait SaltSource: Send + Sync {
    /// Fills `buf` with fresh bytes.
    fn fill(&self, buf: &mut [u8]);

    /// Returns `len` fresh bytes.
    fn generate(&self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf);
        buf
    }
}

/// Salt from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSalt;

impl SaltSource for OsSalt {
    fn fill(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}
