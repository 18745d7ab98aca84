use crate::console::{
    run_clear, run_export, run_list, run_submit, run_summary, ExportArgs, SubmitArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use interview_tracker::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Interview Status",
    about = "Record candidate interview outcomes and serve the interview dashboard",
    version
)]
struct Cli {
    /// Override the configured interview data file (APP_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Record one interview from the command line
    Submit(SubmitArgs),
    /// Print the interview table
    List,
    /// Print total entries and per-status counts
    Summary,
    /// Write the interview table as CSV
    Export(ExportArgs),
    /// Delete every stored interview, keeping the column header
    Clear,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Keep interviews in memory instead of the data file
    #[arg(long)]
    pub(crate) ephemeral: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let data_file = cli.data_file;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, data_file).await,
        Command::Submit(args) => run_submit(args, data_file),
        Command::List => run_list(data_file),
        Command::Summary => run_summary(data_file),
        Command::Export(args) => run_export(args, data_file),
        Command::Clear => run_clear(data_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_when_no_command_given() {
        let cli = Cli::try_parse_from(["interview-tracker-api"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(cli.data_file.is_none());
    }

    #[test]
    fn data_file_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["interview-tracker-api", "list", "--data-file", "x.csv"])
            .expect("parses");
        assert!(matches!(cli.command, Some(Command::List)));
        assert_eq!(cli.data_file, Some(PathBuf::from("x.csv")));
    }

    #[test]
    fn submit_rejects_round_zero() {
        let result = Cli::try_parse_from(["interview-tracker-api", "submit", "--round", "0"]);
        assert!(result.is_err());
    }
}
