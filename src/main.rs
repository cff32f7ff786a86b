use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match tdlive::cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(tdlive::cli::handle_parse_error(err)),
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = tdlive::run(cli).await;
    std::process::exit(exit_code);
}
