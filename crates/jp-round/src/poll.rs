//! Status poll scheduling

/// Fixed-interval poll timer that can be suspended
#[derive(Debug, Clone)]
pub struct PollScheduler {
    interval_ms: f64,
    last_poll_ms: Option<f64>,
    suspended: bool,
}

impl PollScheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            last_poll_ms: None,
            suspended: false,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.max(1.0);
    }

    /// Should the host poll at `now_ms`? Never while suspended; immediately
    /// after creation or resume.
    pub fn due(&self, now_ms: f64) -> bool {
        if self.suspended {
            return false;
        }
        match self.last_poll_ms {
            None => true,
            Some(last) => now_ms - last >= self.interval_ms,
        }
    }

    pub fn mark_polled(&mut self, now_ms: f64) {
        self.last_poll_ms = Some(now_ms);
    }

    /// Stop reporting polls as due
    pub fn suspend(&mut self) {
        if !self.suspended {
            log::debug!("Status polling suspended");
        }
        self.suspended = true;
    }

    /// Resume polling; the next check is due at once
    pub fn resume(&mut self) {
        if self.suspended {
            log::debug!("Status polling resumed");
        }
        self.suspended = false;
        self.last_poll_ms = None;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new(2_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval() {
        let mut poller = PollScheduler::default();
        assert!(poller.due(0.0));
        poller.mark_polled(0.0);
        assert!(!poller.due(1_999.0));
        assert!(poller.due(2_000.0));
    }

    #[test]
    fn test_suspend_resume() {
        let mut poller = PollScheduler::new(500.0);
        poller.mark_polled(0.0);
        poller.suspend();
        assert!(poller.is_suspended());
        assert!(!poller.due(10_000.0));
        poller.resume();
        assert!(poller.due(10_000.0));
    }

    #[test]
    fn test_interval_floor() {
        let poller = PollScheduler::new(0.0);
        assert_eq!(poller.interval_ms(), 1.0);
    }
}
