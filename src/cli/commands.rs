use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tm", about = concat!("[x] taskmaster v", env!("CARGO_PKG_VERSION"), " - a to-do list in a text file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different task file
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<PathBuf>,

    /// Use a different config file
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Don't show desktop notifications
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Mark a task done
    Done(PositionArgs),
    /// Mark a task not done
    Undone(PositionArgs),
    /// Flip a task between done and not done
    Toggle(PositionArgs),
    /// Remove a single task
    Rm(PositionArgs),
    /// Remove every task and delete the task file
    Clear(ClearArgs),
    /// Show task counts
    Stats,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show (all, active, done)
    #[arg(long, default_value = "all")]
    pub filter: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct PositionArgs {
    /// 1-based position, as printed by `tm list`
    pub position: usize,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Required: confirm deleting every task
    #[arg(long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["tm", "add", "buy", "more", "bread"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text.join(" "), "buy more bread"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tm", "list", "--json", "-f", "/tmp/t.txt"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/t.txt")));
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tm"]).unwrap();
        assert!(cli.command.is_none());
    }
}
