//! Attack session controller
//!
//! Owns the single run session, turns user input into metrics updates and
//! attack runs, and drives whichever engine is active one poll at a time.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::cli::Args;
use crate::error::AttackError;
use crate::format::{format_elapsed, format_number};
use crate::metrics::{compute_metrics_with_speed, MetricsDisplay, DEFAULT_CRACK_SPEED};
use crate::presenter::{LogStyle, Presenter, RunSummary, StatusColor};
use crate::scheduler::{Control, Scheduler, Wake};
use crate::search::{LiteralSearch, SearchOutcome, LITERAL_MAX_LENGTH};
use crate::simulate::{
    LogBuffer, SimulatedAttack, DEFAULT_TICKS, DEFAULT_TICK_DELAY, LITERAL_LOG_LINES,
    SIMULATED_LOG_LINES,
};

/// Steps the literal search performs per frame
pub const DEFAULT_BATCH_SIZE: usize = 500;

pub const STATUS_CALCULATING: &str = "CALCULATING...";
pub const STATUS_LITERAL: &str = "BRUTE FORCING (REAL TIME)...";
pub const STATUS_SIMULATED: &str = "SIMULATING (THEORETICAL TIME)...";
pub const STATUS_CRACKED: &str = "PASSWORD CRACKED";
pub const STATUS_SIMULATION_COMPLETE: &str = "SIMULATION COMPLETE";
pub const STATUS_TOO_COMPLEX: &str = "FAILURE: Too Complex for Real-Time Brute Force";
pub const STATUS_STOPPED: &str = "ATTACK STOPPED";

/// Attack configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AttackConfig {
    /// Assumed guesses per second for the crack-time estimate
    pub crack_speed: f64,
    /// Literal search steps per frame
    pub batch_size: usize,
    /// Longest target that gets a literal search
    pub literal_max_length: usize,
    /// Ticks in a simulated run
    pub ticks: u32,
    pub tick_delay: Duration,
    pub simulated_log_lines: usize,
    pub literal_log_lines: usize,
    /// Seed for the simulated log's random values
    pub seed: Option<u64>,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            crack_speed: DEFAULT_CRACK_SPEED,
            batch_size: DEFAULT_BATCH_SIZE,
            literal_max_length: LITERAL_MAX_LENGTH,
            ticks: DEFAULT_TICKS,
            tick_delay: DEFAULT_TICK_DELAY,
            simulated_log_lines: SIMULATED_LOG_LINES,
            literal_log_lines: LITERAL_LOG_LINES,
            seed: None,
        }
    }
}

impl AttackConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let config = Self {
            crack_speed: args.crack_speed,
            batch_size: args.batch_size,
            ticks: args.ticks,
            tick_delay: Duration::from_millis(args.tick_delay_ms),
            simulated_log_lines: args.log_lines,
            seed: args.seed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AttackError> {
        if !self.crack_speed.is_finite() || self.crack_speed <= 0.0 {
            return Err(AttackError::InvalidConfig(format!(
                "crack speed must be a positive number, got {}",
                self.crack_speed
            )));
        }
        if self.batch_size == 0 {
            return Err(AttackError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.simulated_log_lines == 0 || self.literal_log_lines == 0 {
            return Err(AttackError::InvalidConfig(
                "log must keep at least 1 line".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which engine, if any, currently owns the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    RunningLiteral,
    RunningSimulated,
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Literal,
    Simulated,
    /// A run was already active; nothing changed
    AlreadyRunning,
}

/// Result of polling the active run once
#[derive(Debug, Clone, PartialEq)]
pub enum Poll {
    /// Work remains; poll again at the given wake-up
    Yield(Wake),
    /// The run reached a terminal state
    Complete(RunSummary),
    /// No run is active
    Idle,
}

#[derive(Debug)]
struct LiteralRun {
    search: LiteralSearch,
    log: LogBuffer,
}

#[derive(Debug)]
struct SimulatedRun {
    attack: SimulatedAttack<StdRng>,
    metrics: MetricsDisplay,
}

/// The run session; the variant is the mutual-exclusion gate
#[derive(Debug)]
enum RunSession {
    Idle,
    RunningLiteral(LiteralRun),
    RunningSimulated(SimulatedRun),
}

/// Controller owning the run session and the presenter
pub struct Controller<P: Presenter> {
    config: AttackConfig,
    session: RunSession,
    presenter: P,
}

impl<P: Presenter> Controller<P> {
    pub fn new(config: AttackConfig, presenter: P) -> Self {
        Self {
            config,
            session: RunSession::Idle,
            presenter,
        }
    }

    pub fn config(&self) -> &AttackConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match self.session {
            RunSession::Idle => SessionState::Idle,
            RunSession::RunningLiteral(_) => SessionState::RunningLiteral,
            RunSession::RunningSimulated(_) => SessionState::RunningSimulated,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() != SessionState::Idle
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Lines currently on screen for the active run
    pub fn visible_log(&self) -> Vec<String> {
        match &self.session {
            RunSession::Idle => Vec::new(),
            RunSession::RunningLiteral(run) => run.log.lines().map(str::to_string).collect(),
            RunSession::RunningSimulated(run) => {
                run.attack.log().lines().map(str::to_string).collect()
            }
        }
    }

    /// Recompute and show metrics for the new input; empty input resets the display
    pub fn on_password_changed(&mut self, value: &str) {
        if value.is_empty() {
            self.presenter.metrics_cleared();
            return;
        }
        let metrics = compute_metrics_with_speed(value, self.config.crack_speed);
        self.presenter.metrics_updated(&metrics.display());
    }

    /// Start an attack on `target`.
    ///
    /// A request while a run is active is ignored. An empty target raises an
    /// alert and leaves the session untouched.
    pub fn on_start_requested(&mut self, target: &str) -> Result<StartOutcome, AttackError> {
        if self.is_running() {
            debug!("Start ignored, a run is already active ({:?})", self.state());
            return Ok(StartOutcome::AlreadyRunning);
        }

        if target.is_empty() {
            let err = AttackError::EmptyInput;
            self.presenter.alert(&err.to_string());
            return Err(err);
        }

        let metrics = compute_metrics_with_speed(target, self.config.crack_speed);
        let display = metrics.display();
        self.presenter.metrics_updated(&display);

        self.presenter.status_changed(STATUS_CALCULATING, StatusColor::Active);
        self.presenter.log_cleared();

        if metrics.length <= self.config.literal_max_length {
            info!("Starting literal search (length {})", metrics.length);
            self.presenter.status_changed(STATUS_LITERAL, StatusColor::Active);
            self.session = RunSession::RunningLiteral(LiteralRun {
                search: LiteralSearch::new(target),
                log: LogBuffer::new(self.config.literal_log_lines),
            });
            Ok(StartOutcome::Literal)
        } else {
            info!(
                "Starting simulated attack (length {}, {} ticks)",
                metrics.length, self.config.ticks
            );
            self.presenter.status_changed(STATUS_SIMULATED, StatusColor::Active);
            let rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            self.session = RunSession::RunningSimulated(SimulatedRun {
                attack: SimulatedAttack::with_rng(
                    self.config.ticks,
                    self.config.tick_delay,
                    self.config.simulated_log_lines,
                    rng,
                ),
                metrics: display,
            });
            Ok(StartOutcome::Simulated)
        }
    }

    /// Cancel the active run. Returns whether a run was active.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        info!("Run cancelled ({:?})", self.state());
        self.session = RunSession::Idle;
        self.presenter.status_changed(STATUS_STOPPED, StatusColor::Neutral);
        true
    }

    /// Perform one scheduling step of the active run
    pub fn poll(&mut self) -> Poll {
        let summary = match &mut self.session {
            RunSession::Idle => return Poll::Idle,

            RunSession::RunningLiteral(run) => match run.search.run_batch(self.config.batch_size) {
                SearchOutcome::Pending => {
                    self.presenter.progress_updated(
                        &format_number(run.search.attempts()),
                        &format_elapsed(run.search.elapsed_secs()),
                    );
                    let line = format!("> TESTING HASH: [ {} ] ... FAIL", run.search.current_guess());
                    self.presenter.log_line_appended(&line, LogStyle::Normal);
                    run.log.push(line);
                    return Poll::Yield(Wake::NextFrame);
                }
                SearchOutcome::Matched { guess, attempts } => RunSummary::Matched {
                    guess,
                    attempts,
                    elapsed_secs: run.search.elapsed_secs(),
                },
                SearchOutcome::LengthExceeded { guess, attempts } => RunSummary::LengthExceeded {
                    guess,
                    target_length: run.search.target().chars().count(),
                    attempts,
                    elapsed_secs: run.search.elapsed_secs(),
                },
            },

            RunSession::RunningSimulated(run) => match run.attack.tick() {
                Some(line) => {
                    self.presenter.log_line_appended(&line, LogStyle::Normal);
                    return Poll::Yield(Wake::After(run.attack.delay()));
                }
                None => RunSummary::SimulationComplete {
                    combinations: run.metrics.combinations.clone(),
                    crack_time: run.metrics.crack_time.clone(),
                    entropy: run.metrics.entropy.clone(),
                },
            },
        };

        self.finish(&summary);
        Poll::Complete(summary)
    }

    /// Drive the active run to its end, honoring stop requests from the scheduler
    pub fn run<S: Scheduler>(&mut self, scheduler: &mut S) -> Option<RunSummary> {
        loop {
            match self.poll() {
                Poll::Yield(wake) => {
                    if scheduler.wait(wake) == Control::Stop {
                        self.stop();
                    }
                }
                Poll::Complete(summary) => return Some(summary),
                Poll::Idle => return None,
            }
        }
    }

    fn finish(&mut self, summary: &RunSummary) {
        self.session = RunSession::Idle;
        info!("Run finished: {}", summary.kind());

        self.presenter.log_cleared();
        match summary {
            RunSummary::Matched {
                guess,
                attempts,
                elapsed_secs,
            } => {
                self.presenter.status_changed(STATUS_CRACKED, StatusColor::Success);
                self.presenter
                    .progress_updated(&format_number(*attempts), &format_elapsed(*elapsed_secs));
                self.presenter
                    .log_line_appended(&format!(">>> MATCH FOUND: {}", guess), LogStyle::Match);
                self.presenter.log_line_appended(
                    &format!(">>> EFFORT: {} attempts", format_number(*attempts)),
                    LogStyle::Normal,
                );
                self.presenter.log_line_appended(
                    &format!(">>> REAL TIME TAKEN: {:.2} seconds", elapsed_secs),
                    LogStyle::Normal,
                );
            }
            RunSummary::LengthExceeded {
                target_length,
                attempts,
                elapsed_secs,
                ..
            } => {
                self.presenter.status_changed(STATUS_TOO_COMPLEX, StatusColor::Failure);
                self.presenter
                    .progress_updated(&format_number(*attempts), &format_elapsed(*elapsed_secs));
                self.presenter.log_line_appended(
                    &format!(">>> TARGET EXCEEDS BRUTE FORCE LIMIT (L={})", target_length),
                    LogStyle::Error,
                );
                self.presenter
                    .log_line_appended(">>> Displaying calculated metrics below.", LogStyle::Normal);
            }
            RunSummary::SimulationComplete {
                combinations,
                crack_time,
                entropy,
            } => {
                self.presenter
                    .status_changed(STATUS_SIMULATION_COMPLETE, StatusColor::Success);
                self.presenter.progress_updated(combinations, crack_time);
                self.presenter.log_line_appended(
                    &format!(">>> TARGET HASHES ANALYZED: {}", combinations),
                    LogStyle::Highlight,
                );
                self.presenter.log_line_appended(
                    &format!(">>> Estimated Time to Crack: {}", crack_time),
                    LogStyle::Normal,
                );
                self.presenter
                    .log_line_appended(&format!(">>> Entropy: {}", entropy), LogStyle::Normal);
            }
        }
        self.presenter.run_completed(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{EventLog, PresenterEvent};
    use crate::scheduler::ImmediateScheduler;

    fn controller() -> Controller<EventLog> {
        let config = AttackConfig {
            seed: Some(42),
            ..AttackConfig::default()
        };
        Controller::new(config, EventLog::new())
    }

    #[test]
    fn test_password_change_updates_metrics() {
        let mut ctl = controller();
        ctl.on_password_changed("abc1");
        let metrics = ctl.presenter().last_metrics().unwrap();
        assert_eq!(metrics.length, 4);
        assert_eq!(metrics.pool_size, 36);

        ctl.on_password_changed("");
        assert_eq!(ctl.presenter().events.last(), Some(&PresenterEvent::MetricsCleared));
    }

    #[test]
    fn test_empty_start_alerts_without_state_change() {
        let mut ctl = controller();
        assert_eq!(ctl.on_start_requested(""), Err(AttackError::EmptyInput));
        assert_eq!(ctl.state(), SessionState::Idle);
        assert_eq!(
            ctl.presenter().events,
            vec![PresenterEvent::Alert("Enter a password first!".to_string())]
        );
    }

    #[test]
    fn test_dispatch_by_length() {
        let mut ctl = controller();
        assert_eq!(ctl.on_start_requested("abcd"), Ok(StartOutcome::Literal));
        assert_eq!(ctl.state(), SessionState::RunningLiteral);
        assert!(ctl.stop());

        assert_eq!(ctl.on_start_requested("abcde"), Ok(StartOutcome::Simulated));
        assert_eq!(ctl.state(), SessionState::RunningSimulated);
    }

    #[test]
    fn test_second_start_is_noop() {
        let mut ctl = controller();
        ctl.on_start_requested("zzzz").unwrap();
        let events_before = ctl.presenter().events.len();

        assert_eq!(ctl.on_start_requested("a"), Ok(StartOutcome::AlreadyRunning));
        assert_eq!(ctl.state(), SessionState::RunningLiteral);
        assert_eq!(ctl.presenter().events.len(), events_before);
    }

    #[test]
    fn test_literal_progress_per_batch() {
        let mut ctl = controller();
        ctl.on_start_requested("zzzz").unwrap();
        assert_eq!(ctl.poll(), Poll::Yield(Wake::NextFrame));

        let log = ctl.presenter().log_lines();
        assert_eq!(log.last(), Some(&"> TESTING HASH: [ m5 ] ... FAIL"));
        assert!(ctl
            .presenter()
            .events
            .iter()
            .any(|e| matches!(e, PresenterEvent::ProgressUpdated(a, _) if a == "500")));
    }

    #[test]
    fn test_literal_log_is_bounded() {
        let mut ctl = controller();
        ctl.on_start_requested("zzzz").unwrap();
        for _ in 0..20 {
            ctl.poll();
        }
        assert_eq!(ctl.visible_log().len(), LITERAL_LOG_LINES);
    }

    #[test]
    fn test_stop_then_poll_is_idle() {
        let mut ctl = controller();
        ctl.on_start_requested("password").unwrap();
        ctl.poll();
        assert!(ctl.stop());
        assert_eq!(ctl.poll(), Poll::Idle);
        assert!(!ctl.stop());
        assert!(ctl.presenter().completions().is_empty());
        assert_eq!(ctl.presenter().statuses().last(), Some(&STATUS_STOPPED));
    }

    #[test]
    fn test_run_matched_summary_lines() {
        let mut ctl = controller();
        ctl.on_start_requested("ab").unwrap();
        let summary = ctl.run(&mut ImmediateScheduler::new()).unwrap();

        match summary {
            RunSummary::Matched { guess, attempts, .. } => {
                assert_eq!(guess, "ab");
                assert_eq!(attempts, 38);
            }
            other => panic!("unexpected summary {:?}", other),
        }

        let log = ctl.presenter().log_lines();
        assert!(log.contains(&">>> MATCH FOUND: ab"));
        assert!(log.contains(&">>> EFFORT: 38 attempts"));
        assert!(log
            .iter()
            .any(|l| l.starts_with(">>> REAL TIME TAKEN: ") && l.ends_with(" seconds")));
        assert_eq!(ctl.presenter().statuses().last(), Some(&STATUS_CRACKED));
        assert_eq!(ctl.state(), SessionState::Idle);
    }

    #[test]
    fn test_config_validation() {
        assert!(AttackConfig::default().validate().is_ok());

        let bad = AttackConfig {
            batch_size: 0,
            ..AttackConfig::default()
        };
        assert!(matches!(bad.validate(), Err(AttackError::InvalidConfig(_))));

        let bad = AttackConfig {
            crack_speed: 0.0,
            ..AttackConfig::default()
        };
        assert!(bad.validate().is_err());

        let bad = AttackConfig {
            crack_speed: f64::NAN,
            ..AttackConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}
