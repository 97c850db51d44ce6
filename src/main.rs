//! Crack Visualizer - password strength estimation and brute-force demonstration
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::process;

use crack_visualizer::cli::Args;
use crack_visualizer::display::{print_banner, print_error, print_header, print_info, TerminalPresenter};
use crack_visualizer::scheduler::RealtimeScheduler;
use crack_visualizer::session::{AttackConfig, Controller};

const START_COMMAND: &str = ":start";
const QUIT_COMMAND: &str = ":quit";

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    validate_args(&args)?;

    let config = AttackConfig::from_args(&args)?;
    let mut controller = Controller::new(config, TerminalPresenter::new(args.quiet));

    match args.target.clone() {
        Some(target) => run_target(&args, &mut controller, &target),
        None => run_interactive(&args, &mut controller),
    }
}

/// Validate command-line arguments
fn validate_args(args: &Args) -> anyhow::Result<()> {
    if let Some(ref target) = args.target {
        if target.is_empty() {
            anyhow::bail!("Target password must not be empty");
        }
    }

    args.stop_after_duration()?;

    Ok(())
}

/// Build the scheduler for one run; the stop-after limit counts from now
fn make_scheduler(args: &Args) -> anyhow::Result<RealtimeScheduler> {
    let scheduler = if args.instant {
        RealtimeScheduler::instant()
    } else {
        RealtimeScheduler::new(args.frame_duration())
    };

    Ok(match args.stop_after_duration()? {
        Some(limit) => scheduler.with_time_limit(limit),
        None => scheduler,
    })
}

fn run_target(
    args: &Args,
    controller: &mut Controller<TerminalPresenter>,
    target: &str,
) -> anyhow::Result<()> {
    if args.metrics_only {
        controller.on_password_changed(target);
        return Ok(());
    }

    controller.on_start_requested(target)?;
    attack(args, controller)
}

fn attack(args: &Args, controller: &mut Controller<TerminalPresenter>) -> anyhow::Result<()> {
    let mut scheduler = make_scheduler(args)?;

    if let Some(summary) = controller.run(&mut scheduler) {
        if let Some(failure) = summary.failure() {
            log::warn!("{}", failure);
        }
    }

    Ok(())
}

fn run_interactive(args: &Args, controller: &mut Controller<TerminalPresenter>) -> anyhow::Result<()> {
    if !args.quiet {
        print_header("Interactive mode");
        print_info("Type a password to see its metrics (empty line clears)");
        print_info(&format!("{} attacks the last password, {} exits", START_COMMAND, QUIT_COMMAND));
    }

    let stdin = io::stdin();
    let mut last = String::new();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line {
            QUIT_COMMAND => break,
            START_COMMAND => {
                if args.metrics_only {
                    print_info("Attacks are disabled with --metrics-only");
                    continue;
                }
                // an empty password was already reported to the user
                if controller.on_start_requested(&last).is_ok() {
                    attack(args, controller)?;
                }
            }
            password => {
                last = password.to_string();
                controller.on_password_changed(&last);
            }
        }
    }

    Ok(())
}
