use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;
use uuid::Uuid;

/// Ticks (100 ns units since 0001-01-01) at the unix epoch.
pub const UNIX_EPOCH_TICKS: u64 = 621_355_968_000_000_000;

/// Produces the per-request nonce a signing scheme embeds.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> String;
}

/// Strictly increasing tick counts derived from the UTC wall clock.
///
/// Two calls within the same tick, or a clock step backwards, still yield increasing values.
#[derive(Debug, Default)]
pub struct TickNonce {
    last: AtomicU64,
}

impl TickNonce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_tick(&self) -> u64 {
        let now = current_ticks();
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1))
    }
}

impl NonceSource for TickNonce {
    fn next_nonce(&self) -> String {
        self.next_tick().to_string()
    }
}

fn current_ticks() -> u64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    let ticks = u64::try_from(nanos / 100).unwrap_or(0);
    UNIX_EPOCH_TICKS.saturating_add(ticks)
}

/// 128-bit random token rendered as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn next_nonce(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
