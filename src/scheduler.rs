//! Cooperative scheduling
//!
//! A running attack does a bounded amount of work per poll and then tells the
//! driver loop when it wants to run again. The scheduler decides how that wait
//! happens and is where an external stop request enters.

use std::thread;
use std::time::{Duration, Instant};

/// When the active run wants to be polled again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// As soon as the next frame is due
    NextFrame,
    /// After a fixed delay
    After(Duration),
}

/// What the driver loop should do after a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

pub trait Scheduler {
    /// Suspend until the requested wake-up, then say whether to keep going
    fn wait(&mut self, wake: Wake) -> Control;
}

/// Sleeps the calling thread; stops once an optional deadline passes
#[derive(Debug, Clone)]
pub struct RealtimeScheduler {
    frame: Duration,
    skip_delays: bool,
    deadline: Option<Instant>,
}

impl RealtimeScheduler {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            skip_delays: false,
            deadline: None,
        }
    }

    /// Never sleeps, but still honors a time limit
    pub fn instant() -> Self {
        Self {
            frame: Duration::ZERO,
            skip_delays: true,
            deadline: None,
        }
    }

    /// Request a stop once `limit` has elapsed from now
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Some(Instant::now() + limit);
        self
    }
}

impl Scheduler for RealtimeScheduler {
    fn wait(&mut self, wake: Wake) -> Control {
        let delay = match wake {
            Wake::NextFrame => self.frame,
            Wake::After(_) if self.skip_delays => Duration::ZERO,
            Wake::After(d) => d,
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Control::Stop,
            _ => Control::Continue,
        }
    }
}

/// Never sleeps; optionally stops after a fixed number of waits
#[derive(Debug, Clone, Default)]
pub struct ImmediateScheduler {
    pub frames: u64,
    pub delays: u64,
    stop_after: Option<u64>,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop on the `waits`-th wait
    pub fn stop_after(waits: u64) -> Self {
        Self {
            stop_after: Some(waits),
            ..Self::default()
        }
    }

    pub fn waits(&self) -> u64 {
        self.frames + self.delays
    }
}

impl Scheduler for ImmediateScheduler {
    fn wait(&mut self, wake: Wake) -> Control {
        match wake {
            Wake::NextFrame => self.frames += 1,
            Wake::After(_) => self.delays += 1,
        }

        match self.stop_after {
            Some(limit) if self.waits() >= limit => Control::Stop,
            _ => Control::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_counts_waits() {
        let mut sched = ImmediateScheduler::new();
        assert_eq!(sched.wait(Wake::NextFrame), Control::Continue);
        assert_eq!(sched.wait(Wake::After(Duration::from_millis(10))), Control::Continue);
        assert_eq!(sched.frames, 1);
        assert_eq!(sched.delays, 1);
    }

    #[test]
    fn test_immediate_stop_after() {
        let mut sched = ImmediateScheduler::stop_after(2);
        assert_eq!(sched.wait(Wake::NextFrame), Control::Continue);
        assert_eq!(sched.wait(Wake::NextFrame), Control::Stop);
    }

    #[test]
    fn test_realtime_deadline() {
        let mut sched = RealtimeScheduler::new(Duration::ZERO).with_time_limit(Duration::ZERO);
        assert_eq!(sched.wait(Wake::NextFrame), Control::Stop);

        let mut sched = RealtimeScheduler::new(Duration::ZERO);
        assert_eq!(sched.wait(Wake::After(Duration::ZERO)), Control::Continue);

        let mut sched = RealtimeScheduler::instant();
        assert_eq!(sched.wait(Wake::After(Duration::from_secs(60))), Control::Continue);
    }
}
