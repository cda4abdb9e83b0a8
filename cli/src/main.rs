mod commands;
mod terminal;

use commands::{CommandLine, Commands, batch, history, scan};
use penscan_common::{config::Config, error};
use terminal::{logging, print};

#[tokio::main]
async fn main() {
    let commands = CommandLine::parse_args();

    let cfg = Config {
        history_path: commands.history,
        verbosity: commands.verbose,
    };

    logging::init_logging(cfg.verbosity);

    let outcome: anyhow::Result<()> = match commands.command {
        Commands::Scan(args) => {
            print::header("starting scanner");
            scan::scan(args, &cfg).await
        }
        Commands::Batch { file } => {
            print::header("running batch file");
            batch::batch(&file, &cfg).await.map(|_failed| ())
        }
        Commands::History { count } => {
            print::header("scan history");
            history::history(count, &cfg)
        }
    };

    if let Err(e) = outcome {
        error!("{e:#}");
        std::process::exit(1);
    }
}
