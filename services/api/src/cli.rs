use crate::commands::{run_apply, run_company, run_positions, ApplyArgs, PositionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use td_careers::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TD Careers",
    about = "Serve the TD Consulting careers landing page or use it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the open positions offered by the application form
    Positions(PositionsArgs),
    /// Show the company profile panel
    Company,
    /// Submit a full-time application to the configured webhook
    Apply(Box<ApplyArgs>),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Positions(args) => run_positions(args).await,
        Command::Company => run_company().await,
        Command::Apply(args) => run_apply(*args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["td-careers-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn apply_collects_repeated_links() {
        let cli = Cli::try_parse_from([
            "td-careers-api",
            "apply",
            "--full-name",
            "Nguyễn Văn An",
            "--link",
            "https://an.dev",
            "--link",
            "https://github.com/an",
            "--resume",
            "cv.pdf",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Apply(args)) => {
                assert_eq!(args.full_name, "Nguyễn Văn An");
                assert_eq!(args.links, vec!["https://an.dev", "https://github.com/an"]);
                assert_eq!(args.employment_type, "Full-time");
                assert!(args.resume.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn positions_accepts_a_title_to_describe() {
        let cli = Cli::try_parse_from(["td-careers-api", "positions", "--describe", "Recruiter"])
            .expect("parses");
        match cli.command {
            Some(Command::Positions(args)) => {
                assert_eq!(args.describe.as_deref(), Some("Recruiter"))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
