//! Simulated attack animation
//!
//! Used when the target is too long for a literal search. Nothing here looks
//! at the target: each tick produces one synthetic log line with a random
//! 128-bit value, and the run ends after a fixed number of ticks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;

/// Ticks in one simulated run
pub const DEFAULT_TICKS: u32 = 150;

/// Delay between simulated ticks
pub const DEFAULT_TICK_DELAY: Duration = Duration::from_millis(10);

/// Lines kept on screen during a simulated run
pub const SIMULATED_LOG_LINES: usize = 10;

/// Lines kept on screen during a literal run
pub const LITERAL_LOG_LINES: usize = 8;

/// Random 128-bit value as `0x` followed by 32 lowercase hex digits
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("0x{:032x}", rng.gen::<u128>())
}

/// Fixed-capacity log that drops its oldest line when full
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, returning the line evicted to make room
    pub fn push(&mut self, line: String) -> Option<String> {
        if self.capacity == 0 {
            return Some(line);
        }
        let evicted = if self.lines.len() >= self.capacity {
            self.lines.pop_front()
        } else {
            None
        };
        self.lines.push_back(line);
        evicted
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Cosmetic attack that emits a fixed number of synthetic log lines
#[derive(Debug)]
pub struct SimulatedAttack<R: Rng = StdRng> {
    total_ticks: u32,
    ticks_done: u32,
    delay: Duration,
    log: LogBuffer,
    rng: R,
}

impl SimulatedAttack<StdRng> {
    /// Simulation seeded from system entropy
    pub fn new(total_ticks: u32, delay: Duration, log_capacity: usize) -> Self {
        Self::with_rng(total_ticks, delay, log_capacity, StdRng::from_entropy())
    }
}

impl<R: Rng> SimulatedAttack<R> {
    pub fn with_rng(total_ticks: u32, delay: Duration, log_capacity: usize, rng: R) -> Self {
        Self {
            total_ticks,
            ticks_done: 0,
            delay,
            log: LogBuffer::new(log_capacity),
            rng,
        }
    }

    /// Produce the next log line, or `None` once every tick has run
    pub fn tick(&mut self) -> Option<String> {
        if self.is_finished() {
            return None;
        }
        self.ticks_done += 1;
        let line = format!(
            "> ITERATION {} :: CHECKING HASHES :: {}",
            self.ticks_done,
            random_hex(&mut self.rng)
        );
        self.log.push(line.clone());
        Some(line)
    }

    pub fn is_finished(&self) -> bool {
        self.ticks_done >= self.total_ticks
    }

    pub fn ticks_done(&self) -> u32 {
        self.ticks_done
    }

    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Delay before the next tick
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Lines currently on screen
    pub fn log(&self) -> &LogBuffer {
        &self.log
    }
}
