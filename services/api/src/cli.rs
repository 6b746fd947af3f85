use crate::commands::{
    run_answer, run_presets, run_questions, run_reset, run_result, run_share, AnswerArgs,
    ResultArgs, ShareArgs,
};
use crate::server;
use archetype_quiz::config::AppConfig;
use archetype_quiz::error::AppError;
use archetype_quiz::telemetry;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Archetype Quiz",
    about = "Find your Commander color identity from the command line or over HTTP",
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
    /// Take the quiz and inspect or share the result
    Quiz {
        #[command(subcommand)]
        command: QuizCommand,
    },
}

#[derive(Subcommand, Debug)]
enum QuizCommand {
    /// Print every question with its choices and color weights
    Questions,
    /// List the sample answer sets
    Presets,
    /// Record one answer in the local answer store
    Answer(AnswerArgs),
    /// Clear the local answer store
    Reset,
    /// Resolve a color identity and commander recommendation
    Result(ResultArgs),
    /// Print a shareable link for a set of answers
    Share(ShareArgs),
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
        Command::Quiz { command } => {
            let config = AppConfig::load()?;
            telemetry::init(&config.telemetry)?;
            match command {
                QuizCommand::Questions => run_questions(),
                QuizCommand::Presets => run_presets(),
                QuizCommand::Answer(args) => run_answer(&config.quiz, args),
                QuizCommand::Reset => run_reset(&config.quiz),
                QuizCommand::Result(args) => run_result(&config.quiz, args),
                QuizCommand::Share(args) => run_share(&config.quiz, args),
            }
        }
    }
}
