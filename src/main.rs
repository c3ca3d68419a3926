use clap::Parser;
use cleaning_rota::cli::Args;
use cleaning_rota::config::Config;
use cleaning_rota::data_fetcher::HttpPageSource;
use cleaning_rota::error::AppError;
use cleaning_rota::export::write_schedule;
use cleaning_rota::logging::setup_logging;
use cleaning_rota::pipeline;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match try_main(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn try_main(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load(args.config_path.as_deref()).await?;
    args.apply_to(&mut config);

    // Dropping the guard flushes the log file, so it lives until the run ends
    let (log_file_path, _guard) = setup_logging(&config, args.debug).await?;
    info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        let source = args
            .config_path
            .clone()
            .unwrap_or_else(Config::get_config_path);
        config.display(&source);
        return Ok(());
    }

    run(args, config)
        .await
        .inspect_err(|e| error!("Run failed: {e}"))
}

async fn run(args: &Args, config: Config) -> Result<(), AppError> {
    config.validate()?;

    if args.write_config {
        match &args.config_path {
            Some(path) => config.save_to_path(path).await?,
            None => config.save().await?,
        }
        println!("Config updated successfully!");
        return Ok(());
    }

    let source = HttpPageSource::from_config(&config)?;

    if args.dry_run {
        let schedule = pipeline::build_schedule(&config, &source).await?;
        write_schedule(std::io::stdout().lock(), &schedule.rows)?;
        return Ok(());
    }

    let summary = pipeline::run(&config, &source).await?;
    println!(
        "Schedule saved to {} ({} sessions for {} players)",
        summary.output_path.display(),
        summary.sessions,
        summary.players
    );
    Ok(())
}
