use crate::model::TaskStatus;
use clap::Parser;
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_NUMBER"));

#[derive(Parser, Debug)]
#[command(name = "waterfall", version = VERSION, about = "CI build waterfall viewer")]
pub struct Cli {
    /// Snapshot JSON file to display ("-" reads stdin)
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Project name for page and variant links (defaults to the snapshot's)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Start in collapsed view
    #[arg(short, long)]
    pub collapsed: bool,

    /// Initial build variant filter
    #[arg(long = "variant", default_value = "")]
    pub variant_filter: String,

    /// Initial task filter
    #[arg(long = "task", default_value = "")]
    pub task_filter: String,

    /// Show full commit messages in version headers
    #[arg(long)]
    pub full_messages: bool,

    /// Statuses kept as individual boxes in collapsed view
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_status,
        default_value = "failed,system-failed"
    )]
    pub attention: Vec<TaskStatus>,

    /// Print the grid once as plain text and exit
    #[arg(long)]
    pub print: bool,

    /// Enable verbose logging to $XDG_STATE_HOME/waterfall/debug.log
    #[arg(long)]
    pub verbose: bool,
}

pub fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(s).ok_or_else(|| {
        format!(
            "Unknown task status '{s}'. Expected one of: success, failed, system-failed, \
             started, undispatched, inactive."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["waterfall", "--snapshot", "page.json"]).unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("page.json"));
        assert_eq!(cli.project, None);
        assert!(!cli.collapsed);
        assert!(!cli.full_messages);
        assert_eq!(cli.variant_filter, "");
        assert_eq!(cli.attention, vec![TaskStatus::Failed, TaskStatus::SystemFailed]);
    }

    #[test]
    fn attention_list_parses() {
        let cli = Cli::try_parse_from([
            "waterfall",
            "-s",
            "page.json",
            "--attention",
            "failed,undispatched",
        ])
        .unwrap();
        assert_eq!(cli.attention, vec![TaskStatus::Failed, TaskStatus::Undispatched]);
    }

    #[test]
    fn bad_attention_status_is_rejected() {
        let result = Cli::try_parse_from(["waterfall", "-s", "p.json", "--attention", "melted"]);
        assert!(result.is_err());
    }

    #[test]
    fn snapshot_is_required() {
        assert!(Cli::try_parse_from(["waterfall"]).is_err());
    }

    #[test]
    fn filters_and_flags() {
        let cli = Cli::try_parse_from([
            "waterfall",
            "-s",
            "-",
            "-c",
            "--variant",
            "linux",
            "--task",
            "lint",
            "--full-messages",
            "--print",
        ])
        .unwrap();
        assert!(cli.collapsed);
        assert!(cli.print);
        assert!(cli.full_messages);
        assert_eq!(cli.variant_filter, "linux");
        assert_eq!(cli.task_filter, "lint");
    }
}
