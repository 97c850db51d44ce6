//! Presentation boundary
//!
//! The controller never renders anything itself; every visible change goes
//! through a [`Presenter`].

use crate::error::AttackError;
use crate::metrics::MetricsDisplay;

/// Color hint for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Active,
    Success,
    Failure,
    Neutral,
}

/// Style hint for a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Normal,
    Highlight,
    Match,
    Error,
}

/// Final report of a run that reached a terminal state
#[derive(Debug, Clone, PartialEq)]
pub enum RunSummary {
    Matched {
        guess: String,
        attempts: u64,
        elapsed_secs: f64,
    },
    LengthExceeded {
        guess: String,
        target_length: usize,
        attempts: u64,
        elapsed_secs: f64,
    },
    SimulationComplete {
        combinations: String,
        crack_time: String,
        entropy: String,
    },
}

impl RunSummary {
    /// Short name of the terminal state
    pub fn kind(&self) -> &'static str {
        match self {
            RunSummary::Matched { .. } => "matched",
            RunSummary::LengthExceeded { .. } => "length_exceeded",
            RunSummary::SimulationComplete { .. } => "simulation_complete",
        }
    }

    /// The failure carried by this summary, if any
    pub fn failure(&self) -> Option<AttackError> {
        match self {
            RunSummary::LengthExceeded {
                target_length,
                attempts,
                ..
            } => Some(AttackError::UnreachableTarget {
                length: *target_length,
                attempts: *attempts,
            }),
            _ => None,
        }
    }
}

/// Receiver of everything the controller wants shown
pub trait Presenter {
    fn metrics_updated(&mut self, metrics: &MetricsDisplay);
    fn metrics_cleared(&mut self);
    fn status_changed(&mut self, text: &str, color: StatusColor);
    fn log_line_appended(&mut self, text: &str, style: LogStyle);
    fn log_cleared(&mut self);
    fn progress_updated(&mut self, attempts: &str, elapsed: &str);
    fn run_completed(&mut self, summary: &RunSummary);
    /// User-facing validation message
    fn alert(&mut self, message: &str);
}

/// One recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    MetricsUpdated(MetricsDisplay),
    MetricsCleared,
    StatusChanged(String, StatusColor),
    LogLineAppended(String, LogStyle),
    LogCleared,
    ProgressUpdated(String, String),
    RunCompleted(RunSummary),
    Alert(String),
}

/// Presenter that records every call, for headless use and tests
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<PresenterEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::StatusChanged(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn log_lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::LogLineAppended(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> Vec<&RunSummary> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::RunCompleted(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }

    pub fn last_metrics(&self) -> Option<&MetricsDisplay> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::MetricsUpdated(m) => Some(m),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for EventLog {
    fn metrics_updated(&mut self, metrics: &MetricsDisplay) {
        self.events.push(PresenterEvent::MetricsUpdated(metrics.clone()));
    }

    fn metrics_cleared(&mut self) {
        self.events.push(PresenterEvent::MetricsCleared);
    }

    fn status_changed(&mut self, text: &str, color: StatusColor) {
        self.events
            .push(PresenterEvent::StatusChanged(text.to_string(), color));
    }

    fn log_line_appended(&mut self, text: &str, style: LogStyle) {
        self.events
            .push(PresenterEvent::LogLineAppended(text.to_string(), style));
    }

    fn log_cleared(&mut self) {
        self.events.push(PresenterEvent::LogCleared);
    }

    fn progress_updated(&mut self, attempts: &str, elapsed: &str) {
        self.events.push(PresenterEvent::ProgressUpdated(
            attempts.to_string(),
            elapsed.to_string(),
        ));
    }

    fn run_completed(&mut self, summary: &RunSummary) {
        self.events.push(PresenterEvent::RunCompleted(summary.clone()));
    }

    fn alert(&mut self, message: &str) {
        self.events.push(PresenterEvent::Alert(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_only_for_length_exceeded() {
        let exceeded = RunSummary::LengthExceeded {
            guess: "aaaa".to_string(),
            target_length: 3,
            attempts: 47_989,
            elapsed_secs: 0.1,
        };
        assert_eq!(
            exceeded.failure(),
            Some(AttackError::UnreachableTarget {
                length: 3,
                attempts: 47_989
            })
        );

        let matched = RunSummary::Matched {
            guess: "ab".to_string(),
            attempts: 38,
            elapsed_secs: 0.0,
        };
        assert_eq!(matched.failure(), None);
        assert_eq!(matched.kind(), "matched");
    }

    #[test]
    fn test_event_log_filters() {
        let mut log = EventLog::new();
        log.status_changed("RUNNING", StatusColor::Active);
        log.log_line_appended("> one", LogStyle::Normal);
        log.progress_updated("1", "0.00s");
        log.log_line_appended("> two", LogStyle::Match);
        log.status_changed("DONE", StatusColor::Success);

        assert_eq!(log.statuses(), vec!["RUNNING", "DONE"]);
        assert_eq!(log.log_lines(), vec!["> one", "> two"]);
        assert!(log.completions().is_empty());
        assert!(log.last_metrics().is_none());

        log.clear();
        assert!(log.events.is_empty());
    }
}
