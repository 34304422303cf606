//! Rate Limiter (Token Bucket Algorithm)
//!
//! Caps how fast callers can mutate queues. State is a single packed atomic,
//! so concurrent handlers never contend on a lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// One token, in the fixed-point unit stored in the bucket
const MILLI: u64 = 1000;

/// Largest burst whose millitoken balance fits the 32-bit packed field
pub const MAX_BURST: u32 = u32::MAX / MILLI as u32;

/// Token bucket with millitoken precision
///
/// Packed state: upper 32 bits hold the balance in millitokens, lower 32 bits
/// the time of the last refill in ms since `origin` (wrapping).
pub struct RateLimiter {
    packed: AtomicU64,
    origin: Instant,
    capacity_milli: u64,
    refill_per_sec: u64,
}

impl RateLimiter {
    /// Create a full bucket
    ///
    /// # Arguments
    /// * `burst` - Maximum tokens available at once (clamped to [`MAX_BURST`])
    /// * `refill_per_sec` - Tokens restored per second
    pub fn new(burst: u32, refill_per_sec: u32) -> Self {
        let capacity_milli = burst.min(MAX_BURST) as u64 * MILLI;
        Self {
            packed: AtomicU64::new(pack(capacity_milli, 0)),
            origin: Instant::now(),
            capacity_milli,
            refill_per_sec: refill_per_sec as u64,
        }
    }

    /// Take one token; false when the bucket is empty
    pub fn try_acquire(&self) -> bool {
        loop {
            // Load before reading the clock so now_ms is never behind last_ms
            let current = self.packed.load(Ordering::Acquire);
            let now_ms = self.origin.elapsed().as_millis() as u32;
            let (balance, last_ms) = unpack(current);

            // refill_per_sec tokens/s == refill_per_sec millitokens/ms
            let elapsed = now_ms.wrapping_sub(last_ms) as u64;
            let refilled = balance
                .saturating_add(elapsed.saturating_mul(self.refill_per_sec))
                .min(self.capacity_milli);

            let (next_balance, allowed) = if refilled >= MILLI {
                (refilled - MILLI, true)
            } else {
                (refilled, false)
            };

            if self
                .packed
                .compare_exchange(
                    current,
                    pack(next_balance, now_ms),
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
            {
                return allowed;
            }
        }
    }

    /// Whole tokens currently available (without refilling)
    pub fn available(&self) -> u64 {
        unpack(self.packed.load(Ordering::Acquire)).0 / MILLI
    }
}

fn pack(balance_milli: u64, last_ms: u32) -> u64 {
    (balance_milli << 32) | last_ms as u64
}

fn unpack(packed: u64) -> (u64, u32) {
    (packed >> 32, (packed & 0xFFFF_FFFF) as u32)
}
