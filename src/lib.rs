//! # Crack Visualizer
//!
//! Password strength estimation with a brute-force demonstration.
//!
//! ## Features
//!
//! - **Strength metrics**: character pool size, combination count, entropy in bits
//! - **Crack-time estimate**: bucketed time for a fixed-rate guesser (2 billion guesses/sec by default)
//! - **Literal brute force**: real enumeration over lowercase letters and digits for targets of up to 4 characters
//! - **Simulated attack**: a fixed-length animated log for longer targets
//! - **Cooperative scheduling**: runs advance in bounded steps and can be stopped between any two of them
//!
//! ## Usage
//!
//! ```bash
//! # Real-time brute force
//! crack-visualizer ab1
//!
//! # Metrics only
//! crack-visualizer --metrics-only 'Tr0ub4dor&3'
//! ```
//!
//! ## Example
//!
//! ```rust
//! use crack_visualizer::presenter::{EventLog, RunSummary};
//! use crack_visualizer::scheduler::ImmediateScheduler;
//! use crack_visualizer::session::{AttackConfig, Controller};
//!
//! let mut controller = Controller::new(AttackConfig::default(), EventLog::new());
//! controller.on_start_requested("ab").unwrap();
//!
//! let summary = controller.run(&mut ImmediateScheduler::new());
//! assert!(matches!(summary, Some(RunSummary::Matched { attempts: 38, .. })));
//! ```

pub mod cli;
pub mod display;
pub mod error;
pub mod format;
pub mod metrics;
pub mod presenter;
pub mod scheduler;
pub mod search;
pub mod session;
pub mod simulate;

pub use cli::Args;
pub use error::AttackError;
pub use format::format_duration;
pub use metrics::{compute_metrics, Metrics};
pub use session::{AttackConfig, Controller};
