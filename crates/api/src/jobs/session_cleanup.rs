//! Background job purging expired sessions and OTP codes.

use std::sync::Arc;
use tracing::info;

use super::scheduler::{Job, JobFrequency};
use crate::middleware::OtpRateLimiter;
use crate::session::SessionStore;

pub struct SessionCleanupJob {
    sessions: Arc<dyn SessionStore>,
    otp_limiter: Option<Arc<OtpRateLimiter>>,
    interval_secs: u64,
}

impl SessionCleanupJob {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        otp_limiter: Option<Arc<OtpRateLimiter>>,
        interval_secs: u64,
    ) -> Self {
        Self {
            sessions,
            otp_limiter,
            interval_secs,
        }
    }
}

#[async_trait::async_trait]
impl Job for SessionCleanupJob {
    fn name(&self) -> &'static str {
        "session_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs)
    }

    async fn execute(&self) -> Result<(), String> {
        let removed = self.sessions.purge_expired().await;
        if removed > 0 {
            info!(removed, "Purged expired sessions and OTP codes");
        }

        if let Some(limiter) = &self.otp_limiter {
            limiter.retain_recent();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;
    use chrono::Duration;

    #[tokio::test]
    async fn test_cleanup_purges_expired() {
        let store = Arc::new(InMemorySessionStore::new());
        store.create_session(1, Duration::seconds(-5)).await;
        let live = store.create_session(2, Duration::hours(1)).await;
        store.put_otp("13800000000", "123456", Duration::seconds(-5)).await;

        let job = SessionCleanupJob::new(store.clone(), OtpRateLimiter::new(1).map(Arc::new), 60);
        assert_eq!(job.frequency(), JobFrequency::Seconds(60));
        job.execute().await.unwrap();

        assert_eq!(store.session_count().await, 1);
        assert_eq!(store.otp_count().await, 0);
        assert!(store.get_session(live.as_str()).await.is_some());
    }
}
