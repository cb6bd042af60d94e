//! Session pin generation
//!
//! A pin is a short random suffix appended to the tenant identity so the
//! forward proxy can route one browser session's connections to the same
//! backend. Pins live exactly as long as the script instance embedding
//! them; nothing here stores or compares them.

use crate::error::{PacError, PacResult};
use rand::rngs::OsRng;
use rand::RngCore;

/// Pin length in symbols
pub const PIN_LENGTH: usize = 12;

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

// Largest multiple of the alphabet size that fits in a byte (36 * 7).
// Bytes at or above it are discarded so `byte % 36` stays unbiased.
const REJECTION_THRESHOLD: u8 = 252;

const MAX_REDRAW_ROUNDS: usize = 100;

/// Random session affinity suffix: 12 symbols from `[a-z0-9]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPin(String);

impl SessionPin {
    /// Generate a fresh pin from the OS random source.
    ///
    /// Rejection probability per byte is ~1.6%, so the initial two-bytes-
    /// per-symbol draw all but always suffices; the redraw loop is bounded
    /// so a degenerate source fails instead of spinning.
    pub fn generate() -> PacResult<Self> {
        let mut pin = String::with_capacity(PIN_LENGTH);

        let mut buf = [0u8; 2 * PIN_LENGTH];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|_| PacError::PinGeneration)?;
        push_accepted(&mut pin, &buf);

        let mut rounds = 0;
        while pin.len() < PIN_LENGTH {
            rounds += 1;
            if rounds > MAX_REDRAW_ROUNDS {
                return Err(PacError::PinGeneration);
            }
            tracing::debug!(rounds, "supplemental draw for session pin");
            let mut extra = [0u8; PIN_LENGTH];
            OsRng
                .try_fill_bytes(&mut extra)
                .map_err(|_| PacError::PinGeneration)?;
            push_accepted(&mut pin, &extra);
        }

        Ok(Self(pin))
    }

    /// Pin as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn push_accepted(pin: &mut String, bytes: &[u8]) {
    for &byte in bytes {
        if pin.len() == PIN_LENGTH {
            break;
        }
        if byte < REJECTION_THRESHOLD {
            pin.push(ALPHABET[usize::from(byte % ALPHABET.len() as u8)] as char);
        }
    }
}
