use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::io::store::Store;
use crate::model::config::Config;
use crate::notifier::{DesktopNotifier, Notifier, NullNotifier};
use crate::ops::session::{Session, SessionOptions};
use crate::ops::task_ops::OpError;

/// Config and task file resolved from flags, environment and config file
pub struct Context {
    pub config: Config,
    pub task_file: PathBuf,
    pub quiet: bool,
}

impl Context {
    pub fn notifications_enabled(&self) -> bool {
        !self.quiet && self.config.notify.enabled
    }

    pub fn notifier(&self) -> Box<dyn Notifier> {
        if self.notifications_enabled() {
            Box::new(DesktopNotifier)
        } else {
            Box::new(NullNotifier)
        }
    }

    pub fn open_session(&self) -> Result<Session, Box<dyn std::error::Error>> {
        let session = Session::open(
            Store::new(&self.task_file),
            self.notifier(),
            SessionOptions::from(&self.config),
        )?;
        Ok(session)
    }
}

pub fn load_context(cli: &Cli) -> Result<Context, ConfigError> {
    let data_dir = config_io::data_dir();
    let config = config_io::load_config(cli.config.as_deref(), &data_dir)?;
    let task_file = config_io::resolve_task_file(cli.file.as_deref(), &config, &data_dir);
    Ok(Context {
        config,
        task_file,
        quiet: cli.quiet,
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        None => crate::tui::run(ctx),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(ctx, args, json),
            Commands::Stats => cmd_stats(ctx, json),
            Commands::Add(args) => cmd_add(ctx, args),
            Commands::Done(args) => cmd_set_done(ctx, args, true),
            Commands::Undone(args) => cmd_set_done(ctx, args, false),
            Commands::Toggle(args) => cmd_toggle(ctx, args),
            Commands::Rm(args) => cmd_rm(ctx, args),
            Commands::Clear(args) => cmd_clear(ctx, args),
        },
    }
}

/// Convert a 1-based position into an index
fn to_index(position: usize) -> Result<usize, OpError> {
    position
        .checked_sub(1)
        .ok_or(OpError::NoSuchTask { position })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = parse_filter(&args.filter)?;
    let session = ctx.open_session()?;
    let indices = session.visible_indices(filter);

    if json {
        let out = list_to_json(session.tasks(), &indices, filter);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_listing(session.tasks(), &indices) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(ctx: &Context, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = ctx.open_session()?;
    let stats = session.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_stats(&stats));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ctx.open_session()?;
    let index = session.add(&args.text.join(" "))?;
    println!("{}", index + 1);
    Ok(())
}

fn cmd_set_done(
    ctx: &Context,
    args: PositionArgs,
    done: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let mut session = ctx.open_session()?;
    session.set_done(index, done)?;
    Ok(())
}

fn cmd_toggle(ctx: &Context, args: PositionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let mut session = ctx.open_session()?;
    let done = session.toggle(index)?;
    println!("{}", if done { "done" } else { "active" });
    Ok(())
}

fn cmd_rm(ctx: &Context, args: PositionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = to_index(args.position)?;
    let mut session = ctx.open_session()?;
    let task = session.remove(index)?;
    println!("removed: {}", task.text);
    Ok(())
}

fn cmd_clear(ctx: &Context, args: ClearArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ctx.open_session()?;
    if !args.yes {
        return Err(format!(
            "refusing to clear {} task(s) without --yes",
            session.tasks().len()
        )
        .into());
    }
    let count = session.clear()?;
    println!("cleared {} task(s)", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_zero_is_rejected() {
        assert_eq!(to_index(0), Err(OpError::NoSuchTask { position: 0 }));
        assert_eq!(to_index(1), Ok(0));
    }

    #[test]
    fn quiet_or_disabled_means_no_notifications() {
        let mut ctx = Context {
            config: Config::default(),
            task_file: PathBuf::from("tasks.txt"),
            quiet: true,
        };
        assert!(!ctx.notifications_enabled());
        ctx.quiet = false;
        assert!(ctx.notifications_enabled());
        ctx.config.notify.enabled = false;
        assert!(!ctx.notifications_enabled());
    }
}
