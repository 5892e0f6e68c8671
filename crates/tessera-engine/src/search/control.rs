//! Search control: shared stop flag plus an optional deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Decides when a running search must unwind.
///
/// Polled by the search at every node; the clock is only read every
/// 2048 nodes. Once the deadline passes the stop flag is raised, so every
/// later poll (from any ply) agrees that the search is cancelled.
#[derive(Debug)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    deadline: Option<Duration>,
}

impl SearchControl {
    /// Control that only stops when the flag is raised.
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self::new(stopped, None)
    }

    /// Control that also stops once `deadline` has elapsed; the clock starts now.
    pub fn new(stopped: Arc<AtomicBool>, deadline: Option<Duration>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            deadline,
        }
    }

    /// Check whether the search should abort now.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if nodes & 2047 != 0 {
            return false;
        }

        self.check_deadline()
    }

    /// Check whether another iteration may start.
    pub fn should_stop_iterating(&self) -> bool {
        self.stopped.load(Ordering::Relaxed) || self.check_deadline()
    }

    fn check_deadline(&self) -> bool {
        match self.deadline {
            Some(limit) if self.elapsed() >= limit => {
                self.stopped.store(true, Ordering::Release);
                true
            }
            _ => false,
        }
    }

    /// Return `true` once the stop flag is raised.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Time since this control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The configured deadline, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

}
