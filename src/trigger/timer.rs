//! Clocks and timers owned by a single paginator instance

use std::cell::Cell;
use std::rc::Rc;

/// Delay coalescing a burst of resize events
pub const RESIZE_DEBOUNCE_MS: u64 = 150;

/// Source of the current time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock of the host environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() as u64
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        }
    }
}

/// Manually advanced clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// One-shot timer where each schedule supersedes the pending one
pub struct DebounceTimer {
    clock: Rc<dyn Clock>,
    delay_ms: u64,
    deadline: Option<u64>,
}

impl DebounceTimer {
    pub fn new(clock: Rc<dyn Clock>, delay_ms: u64) -> Self {
        Self {
            clock,
            delay_ms,
            deadline: None,
        }
    }

    /// Clear any pending deadline and start a fresh delay
    pub fn schedule(&mut self) {
        self.deadline = Some(self.clock.now_ms() + self.delay_ms);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Consume the pending deadline if it has passed
    pub fn fire_if_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now_ms() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Repeating timer polled by its owner
pub struct IntervalTimer {
    clock: Rc<dyn Clock>,
    period_ms: u64,
    next: u64,
}

impl IntervalTimer {
    pub fn new(clock: Rc<dyn Clock>, period_ms: u64) -> Self {
        let next = clock.now_ms() + period_ms;
        Self {
            clock,
            period_ms,
            next,
        }
    }

    /// True at most once per elapsed period
    pub fn fire_if_due(&mut self) -> bool {
        let now = self.clock.now_ms();
        if now < self.next {
            return false;
        }
        self.next = now + self.period_ms;
        true
    }
}
