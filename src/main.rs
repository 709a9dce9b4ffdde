use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use taskmaster::cli::commands::Cli;
use taskmaster::cli::handlers;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TM_LOG";
const LOG_FILE_NAME: &str = "taskmaster.log";

fn main() {
    let cli = Cli::parse();

    let ctx = match handlers::load_context(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The TUI owns the terminal, so it logs next to the task file instead of stderr
    let log_dir = ctx.task_file.parent().unwrap_or(Path::new("."));
    init_logging(cli.command.is_none(), log_dir);

    if let Err(e) = handlers::dispatch(cli, &ctx) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(to_file: bool, log_dir: &Path) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if to_file {
        let file = std::fs::create_dir_all(log_dir).and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join(LOG_FILE_NAME))
        });
        // No log file means no logging; stderr would corrupt the screen
        if let Ok(file) = file {
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}
