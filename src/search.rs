//! Literal brute-force search
//!
//! Enumerates candidate strings over a small fixed alphabet and compares each
//! one against the target. Only lowercase letters and digits are tried, so a
//! target using any other character can never be matched; the search then
//! ends once candidates grow longer than the target.

use std::time::Instant;

/// Alphabet the literal search enumerates
pub const LITERAL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Longest target the literal search is attempted on
pub const LITERAL_MAX_LENGTH: usize = 4;

/// Mixed-radix counter over [`LITERAL_ALPHABET`], least-significant digit first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedRadixCounter {
    digits: Vec<usize>,
}

impl MixedRadixCounter {
    /// Counter holding a single zero digit
    pub fn new() -> Self {
        Self { digits: vec![0] }
    }

    /// Advance by one.
    ///
    /// A digit past the last symbol resets to zero and carries; a carry out
    /// of the most-significant position appends a new zero digit.
    pub fn advance(&mut self) {
        for digit in self.digits.iter_mut() {
            if *digit < LITERAL_ALPHABET.len() - 1 {
                *digit += 1;
                return;
            }
            *digit = 0;
        }
        self.digits.push(0);
    }

    /// Number of positions currently represented
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Render most-significant digit first
    pub fn render(&self) -> String {
        self.digits
            .iter()
            .rev()
            .map(|&d| char::from(LITERAL_ALPHABET[d]))
            .collect()
    }
}

impl Default for MixedRadixCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of running one batch of steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Batch finished without a match; the search can continue
    Pending,
    /// The candidate equals the target
    Matched { guess: String, attempts: u64 },
    /// Candidates outgrew the target without a match
    LengthExceeded { guess: String, attempts: u64 },
}

impl SearchOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchOutcome::Pending)
    }
}

/// In-progress literal search against one target
#[derive(Debug, Clone)]
pub struct LiteralSearch {
    target: String,
    target_len: usize,
    counter: MixedRadixCounter,
    attempts: u64,
    started: Instant,
    last_guess: String,
    finished: bool,
}

impl LiteralSearch {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            target_len: target.chars().count(),
            counter: MixedRadixCounter::new(),
            attempts: 0,
            started: Instant::now(),
            last_guess: String::new(),
            finished: false,
        }
    }

    /// Test one candidate.
    ///
    /// The initial counter state is the first candidate; every later call
    /// advances the counter before testing.
    pub fn step(&mut self) -> SearchOutcome {
        if self.finished {
            return self.terminal_outcome();
        }

        if self.attempts > 0 {
            self.counter.advance();
        }
        self.attempts += 1;
        self.last_guess = self.counter.render();

        if self.last_guess == self.target {
            self.finished = true;
            return SearchOutcome::Matched {
                guess: self.last_guess.clone(),
                attempts: self.attempts,
            };
        }

        if self.counter.len() > self.target_len {
            self.finished = true;
            return SearchOutcome::LengthExceeded {
                guess: self.last_guess.clone(),
                attempts: self.attempts,
            };
        }

        SearchOutcome::Pending
    }

    /// Run up to `batch_size` steps, stopping early on a terminal outcome
    pub fn run_batch(&mut self, batch_size: usize) -> SearchOutcome {
        for _ in 0..batch_size {
            let outcome = self.step();
            if outcome.is_terminal() {
                return outcome;
            }
        }
        SearchOutcome::Pending
    }

    /// Run to a terminal outcome without yielding
    pub fn run_to_end(&mut self) -> SearchOutcome {
        loop {
            let outcome = self.step();
            if outcome.is_terminal() {
                return outcome;
            }
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Most recently tested candidate
    pub fn current_guess(&self) -> &str {
        &self.last_guess
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Real time since the search was created
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn terminal_outcome(&self) -> SearchOutcome {
        if self.last_guess == self.target {
            SearchOutcome::Matched {
                guess: self.last_guess.clone(),
                attempts: self.attempts,
            }
        } else {
            SearchOutcome::LengthExceeded {
                guess: self.last_guess.clone(),
                attempts: self.attempts,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIX: u64 = LITERAL_ALPHABET.len() as u64;

    #[test]
    fn test_counter_carry() {
        let mut counter = MixedRadixCounter::new();
        assert_eq!(counter.render(), "a");

        counter.advance();
        assert_eq!(counter.render(), "b");

        for _ in 0..34 {
            counter.advance();
        }
        assert_eq!(counter.render(), "9");

        counter.advance();
        assert_eq!(counter.render(), "aa");
        assert_eq!(counter.len(), 2);

        counter.advance();
        assert_eq!(counter.render(), "ab");
    }

    #[test]
    fn test_match_single_char() {
        let mut search = LiteralSearch::new("a");
        assert_eq!(
            search.step(),
            SearchOutcome::Matched {
                guess: "a".to_string(),
                attempts: 1
            }
        );

        let mut search = LiteralSearch::new("9");
        assert_eq!(
            search.run_to_end(),
            SearchOutcome::Matched {
                guess: "9".to_string(),
                attempts: RADIX
            }
        );
    }

    #[test]
    fn test_match_ab() {
        let mut search = LiteralSearch::new("ab");
        let outcome = search.run_to_end();

        // every 1-char candidate, then "aa", then "ab"
        assert_eq!(
            outcome,
            SearchOutcome::Matched {
                guess: "ab".to_string(),
                attempts: RADIX + 2
            }
        );
        assert!(search.attempts() <= RADIX * RADIX);
    }

    #[test]
    fn test_uppercase_target_exceeds_length() {
        let mut search = LiteralSearch::new("AB");
        let outcome = search.run_to_end();

        assert_eq!(
            outcome,
            SearchOutcome::LengthExceeded {
                guess: "aaa".to_string(),
                attempts: RADIX + RADIX * RADIX + 1
            }
        );
    }

    #[test]
    fn test_batch_size_does_not_change_result() {
        for batch in [1, 7, 500, 5000] {
            let mut search = LiteralSearch::new("z9");
            let outcome = loop {
                let outcome = search.run_batch(batch);
                if outcome.is_terminal() {
                    break outcome;
                }
            };
            assert_eq!(
                outcome,
                SearchOutcome::Matched {
                    guess: "z9".to_string(),
                    attempts: RADIX + 25 * RADIX + 36
                }
            );
        }
    }

    #[test]
    fn test_step_after_finish_is_stable() {
        let mut search = LiteralSearch::new("c");
        let first = search.run_to_end();
        let attempts = search.attempts();
        assert_eq!(search.step(), first);
        assert_eq!(search.attempts(), attempts);
    }

    #[test]
    fn test_pending_batch_reports_progress() {
        let mut search = LiteralSearch::new("zz");
        assert_eq!(search.run_batch(10), SearchOutcome::Pending);
        assert_eq!(search.attempts(), 10);
        assert_eq!(search.current_guess(), "j");
    }
}
