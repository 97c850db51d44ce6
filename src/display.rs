//! Terminal display module
//!
//! Styled messages, a progress spinner and the terminal [`Presenter`] with the
//! green-on-black attack-console look.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::format::{format_number, CENTURIES_MARKER};
use crate::metrics::MetricsDisplay;
use crate::presenter::{LogStyle, Presenter, RunSummary, StatusColor};

/// Color theme for the tool
pub mod theme {
    use colored::Color;

    pub const PRIMARY: Color = Color::Green;
    pub const SECONDARY: Color = Color::BrightGreen;
    pub const ACCENT: Color = Color::Cyan;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
    pub const MUTED: Color = Color::BrightBlack;
}

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║    ██████╗██████╗  █████╗  ██████╗██╗  ██╗                                   ║
║   ██╔════╝██╔══██╗██╔══██╗██╔════╝██║ ██╔╝                                   ║
║   ██║     ██████╔╝███████║██║     █████╔╝                                    ║
║   ██║     ██╔══██╗██╔══██║██║     ██╔═██╗                                    ║
║   ╚██████╗██║  ██║██║  ██║╚██████╗██║  ██╗                                   ║
║    ╚═════╝╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝                                   ║
║                                                                              ║
║                 Password Strength & Brute-Force Visualizer                   ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner for attack progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// One-line wrap-up for a successful run
pub fn completion_message(summary: &RunSummary) -> Option<String> {
    match summary {
        RunSummary::Matched {
            guess, attempts, ..
        } => Some(format!(
            "Recovered '{}' after {} attempts",
            guess,
            format_number(*attempts)
        )),
        RunSummary::SimulationComplete { crack_time, .. } => {
            Some(format!("Estimated crack time: {}", crack_time))
        }
        RunSummary::LengthExceeded { .. } => None,
    }
}

/// Presenter that renders to the terminal
pub struct TerminalPresenter {
    spinner: Option<ProgressBar>,
    running: bool,
    quiet: bool,
}

impl TerminalPresenter {
    pub fn new(quiet: bool) -> Self {
        Self {
            spinner: None,
            running: false,
            quiet,
        }
    }

    /// Print above the spinner when one is active
    fn line(&self, text: String) {
        match &self.spinner {
            Some(pb) => pb.println(text),
            None => println!("{}", text),
        }
    }

    fn finish_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

impl Presenter for TerminalPresenter {
    fn metrics_updated(&mut self, metrics: &MetricsDisplay) {
        if self.quiet {
            return;
        }
        let crack_time = if metrics.crack_time == CENTURIES_MARKER {
            format!("{} 🕰️", metrics.crack_time)
        } else {
            metrics.crack_time.clone()
        };

        print_header("Password Metrics");
        print_bullet(&format!("{} {}", "Length:         ".green(), metrics.length));
        print_bullet(&format!("{} {}", "Character pool: ".green(), metrics.pool_size));
        print_bullet(&format!("{} {}", "Combinations:   ".green(), metrics.combinations));
        print_bullet(&format!("{} {}", "Entropy:        ".green(), metrics.entropy));
        print_bullet(&format!(
            "{} {}",
            "Crack time:     ".green(),
            crack_time.bold()
        ));
    }

    fn metrics_cleared(&mut self) {
        if self.quiet {
            return;
        }
        print_header("Password Metrics");
        print_bullet(&"Length: 0  Pool: 0  Combinations: 0  Entropy: 0  Crack time: 0".color(theme::MUTED).to_string());
    }

    fn status_changed(&mut self, text: &str, color: StatusColor) {
        let styled = match color {
            StatusColor::Active => text.color(theme::SECONDARY).bold(),
            StatusColor::Success => text.color(theme::PRIMARY).bold(),
            StatusColor::Failure => text.color(theme::ERROR).bold(),
            StatusColor::Neutral => text.color(theme::WARNING).bold(),
        };

        self.running = color == StatusColor::Active;
        if !self.running {
            self.finish_spinner();
        }
        self.line(format!("\n{} {}", "▶".green(), styled));

        if self.running && self.spinner.is_none() && !self.quiet {
            self.spinner = Some(create_spinner("starting..."));
        }
    }

    fn log_line_appended(&mut self, text: &str, style: LogStyle) {
        if self.quiet && self.running {
            return;
        }
        let styled = match style {
            LogStyle::Normal => text.color(theme::PRIMARY),
            LogStyle::Highlight => text.white().bold(),
            LogStyle::Match => text.color(theme::ACCENT).bold(),
            LogStyle::Error => text.color(theme::ERROR).bold(),
        };
        self.line(format!("  {}", styled));
    }

    fn log_cleared(&mut self) {}

    fn progress_updated(&mut self, attempts: &str, elapsed: &str) {
        match &self.spinner {
            Some(pb) => pb.set_message(format!("attempts: {}  timer: {}", attempts, elapsed)),
            None if !self.quiet => print_info(&format!("Attempts: {}  Timer: {}", attempts, elapsed)),
            None => {}
        }
    }

    fn run_completed(&mut self, summary: &RunSummary) {
        self.finish_spinner();
        match summary {
            RunSummary::LengthExceeded { .. } => {
                print_warning("Only lowercase letters and digits are tried in real time")
            }
            _ => {
                if let Some(text) = completion_message(summary) {
                    print_success(&text);
                }
            }
        }
    }

    fn alert(&mut self, message: &str) {
        print_warning(message);
    }
}
