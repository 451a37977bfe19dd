use clap::Parser;
use colored::Colorize;
use std::error::Error as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = txlens::Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let Err(err) = txlens::run(&args) else {
        return ExitCode::SUCCESS;
    };

    let mut shown = err.to_string();
    eprintln!("{}: {}", "error".red(), shown);

    // Most variants already embed their source in the message
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !shown.contains(&text) {
            eprintln!("  {} {}", "caused by:".dimmed(), text);
        }
        shown = text;
        source = cause.source();
    }

    ExitCode::from(err.exit_code() as u8)
}
