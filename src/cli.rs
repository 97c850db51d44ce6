//! Command-line interface definition for crack-visualizer
//!
//! Provides argument parsing and validation for the visualizer.

use clap::Parser;
use std::time::Duration;

use crate::metrics::DEFAULT_CRACK_SPEED;
use crate::session::DEFAULT_BATCH_SIZE;
use crate::simulate::{DEFAULT_TICKS, SIMULATED_LOG_LINES};

/// Password strength estimator and brute-force visualizer
///
/// Shows pool size, combinations, entropy and estimated crack time for a
/// password, then either brute-forces it for real (up to 4 characters) or
/// plays a simulated attack.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "crack-visualizer",
    author = "m0h1nd4",
    version,
    about = "Password strength estimator with a brute-force visualization",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                         CRACK-VISUALIZER v1.0.0                              ║
║                 Password Strength & Brute-Force Demonstration                ║
╚══════════════════════════════════════════════════════════════════════════════╝

Estimates how long a password survives a fixed-rate guesser. Passwords of up
to 4 characters are brute-forced for real over lowercase letters and digits;
longer ones get a simulated attack animation.

Without a TARGET an interactive session starts: every line typed updates the
metrics, an empty line clears them, ":start" attacks the last password and
":quit" exits.

EXAMPLES:
    # Real-time brute force of a short password
    crack-visualizer ab1

    # Simulated attack on a long password
    crack-visualizer 'Tr0ub4dor&3'

    # Metrics only, assuming a slower guesser
    crack-visualizer --metrics-only --crack-speed 1e6 hunter2

    # Give up after 5 seconds
    crack-visualizer --stop-after 5 z9z9
"#
)]
pub struct Args {
    /// Password to analyze (interactive mode when omitted)
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// Only print metrics, do not run an attack
    #[arg(short, long, default_value_t = false)]
    pub metrics_only: bool,

    /// Assumed guesses per second for the crack-time estimate
    #[arg(long, value_name = "RATE", default_value_t = DEFAULT_CRACK_SPEED)]
    pub crack_speed: f64,

    /// Literal search steps per frame
    #[arg(short, long, value_name = "STEPS", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Number of ticks in a simulated attack
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TICKS)]
    pub ticks: u32,

    /// Delay between simulated ticks in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 10)]
    pub tick_delay_ms: u64,

    /// Log lines kept on screen during a simulated attack
    #[arg(long, value_name = "N", default_value_t = SIMULATED_LOG_LINES)]
    pub log_lines: usize,

    /// Frame interval between literal search batches in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 16)]
    pub frame_ms: u64,

    /// Stop the attack after this many seconds
    #[arg(short, long, value_name = "SECS", allow_negative_numbers = true)]
    pub stop_after: Option<f64>,

    /// Do not sleep between frames and ticks
    #[arg(long, default_value_t = false)]
    pub instant: bool,

    /// Seed for the simulated attack log
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Frame interval for the literal search
    pub fn frame_duration(&self) -> Duration {
        if self.instant {
            Duration::ZERO
        } else {
            Duration::from_millis(self.frame_ms)
        }
    }

    /// Parse the stop-after limit
    pub fn stop_after_duration(&self) -> anyhow::Result<Option<Duration>> {
        let Some(secs) = self.stop_after else {
            return Ok(None);
        };

        if !secs.is_finite() || secs < 0.0 {
            anyhow::bail!("Invalid --stop-after value: '{}'. Use a non-negative number of seconds", secs);
        }

        Ok(Some(Duration::from_secs_f64(secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("crack-visualizer").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["abc"]);
        assert_eq!(args.target.as_deref(), Some("abc"));
        assert_eq!(args.crack_speed, 2_000_000_000.0);
        assert_eq!(args.batch_size, 500);
        assert_eq!(args.ticks, 150);
        assert_eq!(args.tick_delay_ms, 10);
        assert_eq!(args.log_lines, 10);
        assert!(!args.metrics_only);
        assert_eq!(args.frame_duration(), Duration::from_millis(16));
        assert_eq!(args.stop_after_duration().unwrap(), None);
    }

    #[test]
    fn test_interactive_has_no_target() {
        let args = parse(&[]);
        assert!(args.target.is_none());
    }

    #[test]
    fn test_instant_zeroes_frame() {
        let args = parse(&["--instant", "ab"]);
        assert_eq!(args.frame_duration(), Duration::ZERO);
    }

    #[test]
    fn test_stop_after() {
        let args = parse(&["--stop-after", "1.5", "ab"]);
        assert_eq!(
            args.stop_after_duration().unwrap(),
            Some(Duration::from_millis(1500))
        );

        let args = parse(&["--stop-after=-2", "ab"]);
        assert!(args.stop_after_duration().is_err());
    }

    #[test]
    fn test_crack_speed_scientific() {
        let args = parse(&["--crack-speed", "1e6", "-m", "hunter2"]);
        assert_eq!(args.crack_speed, 1_000_000.0);
        assert!(args.metrics_only);
    }
}
