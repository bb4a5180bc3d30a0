use clap::Parser as _;
use tracing::debug;
use tracing::level_filters::LevelFilter;

use dirsketch::{
    application::{Application, ApplicationError},
    cli::Cli,
};

#[compio::main]
#[snafu::report]
async fn main() -> Result<(), ApplicationError> {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    Application::run(cli_args).await?;

    Ok(())
}

fn setup_tracing(cli_args: &Cli) {
    let filter = cli_args.log_level.level_filter();
    if filter != LevelFilter::OFF {
        tracing_subscriber::fmt()
            .with_max_level(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
