//! Leading + trailing event throttle with injected timestamps (ms).
//!
//! - An event arriving while idle is emitted at once and opens a window.
//! - Events inside the window are coalesced; only the latest is kept.
//! - When the window closes, a kept event is emitted at the closing time
//!   and opens the next window; otherwise the throttle goes idle.

use anyhow::{ensure, Result};

#[derive(Debug)]
pub struct Throttle<T> {
    interval: f64,
    deadline: Option<f64>,
    pending: Option<T>,
    coalesced: u64,
}

impl<T> Throttle<T> {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval: interval_ms.max(0.0),
            deadline: None,
            pending: None,
            coalesced: 0,
        }
    }

    /// Interval of `1000 / hz` ms, truncated to whole milliseconds.
    pub fn from_hz(hz: f64) -> Result<Self> {
        ensure!(hz.is_finite() && hz > 0.0, "rate must be finite and positive, got {hz}");
        Ok(Self::new((1000.0 / hz).floor()))
    }

    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Events dropped because a later one replaced them.
    #[inline]
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    /// Offer an event at time `now`; returns everything emitted up to `now`.
    pub fn offer(&mut self, now: f64, item: T) -> Vec<(f64, T)> {
        let mut out = Vec::new();
        self.advance(now, &mut out);
        if self.deadline.is_none() {
            out.push((now, item));
            self.deadline = Some(now + self.interval);
        } else if self.pending.replace(item).is_some() {
            self.coalesced += 1;
        }
        out
    }

    /// Close all open windows and emit the trailing event, if any.
    pub fn finish(&mut self) -> Vec<(f64, T)> {
        let mut out = Vec::new();
        self.advance(f64::INFINITY, &mut out);
        out
    }

    fn advance(&mut self, now: f64, out: &mut Vec<(f64, T)>) {
        while let Some(deadline) = self.deadline {
            if deadline > now {
                break;
            }
            match self.pending.take() {
                Some(item) => {
                    out.push((deadline, item));
                    self.deadline = Some(deadline + self.interval);
                }
                None => self.deadline = None,
            }
        }
    }
}
