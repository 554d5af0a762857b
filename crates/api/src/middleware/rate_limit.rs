//! Per-phone rate limiting for OTP issuance.

use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::num::NonZeroU32;

/// Limits how often an OTP can be requested for the same phone number.
pub struct OtpRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    per_minute: NonZeroU32,
}

impl OtpRateLimiter {
    /// Returns `None` when `per_minute` is 0, meaning no limit.
    pub fn new(per_minute: u32) -> Option<Self> {
        let per_minute = NonZeroU32::new(per_minute)?;
        Some(Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
            per_minute,
        })
    }

    pub fn per_minute(&self) -> u32 {
        self.per_minute.get()
    }

    /// Record an attempt for `phone`. On rejection returns the seconds to
    /// wait, never less than 1.
    pub fn check(&self, phone: &str) -> Result<(), u64> {
        self.limiter.check_key(&phone.to_string()).map_err(|not_until| {
            not_until
                .wait_time_from(DefaultClock::default().now())
                .as_secs()
                .max(1)
        })
    }

    /// Forget phones whose quota has fully replenished.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }

    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

impl std::fmt::Debug for OtpRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRateLimiter")
            .field("per_minute", &self.per_minute)
            .field("tracked_keys", &self.limiter.len())
            .finish()
    }
}
