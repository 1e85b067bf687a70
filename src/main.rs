use readmegen::cli::CliArgs;
use readmegen::{
    init_logging, BuildError, BuildRequest, PromptClient, ReadmeOrchestrator, ReadmegenConfig,
    TemplateRenderer, UsageError, VERSION,
};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let mut config = ReadmegenConfig::default();
    init_logging(args.logging_config(&config.log_level));

    debug!("readmegen v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(level) = &args.log_level {
        config = config.with_log_level(level.clone());
    }

    let exit_code = match run(&args, &config).await {
        Ok(written) => {
            println!("README written to {}", written.display());
            0
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            exit_code(&err)
        }
    };

    std::process::exit(exit_code);
}

async fn run(args: &CliArgs, config: &ReadmegenConfig) -> Result<PathBuf> {
    let source = args.source()?;

    config.validate().context("Invalid configuration")?;
    debug!("{}", config);

    let renderer = match &args.template {
        Some(path) => TemplateRenderer::from_file(path)?,
        None => TemplateRenderer::new()?,
    };

    let client = config.create_client()?;
    let orchestrator = ReadmeOrchestrator::new(
        PromptClient::new(client),
        Arc::new(config.create_fetcher()),
        renderer,
    )
    .with_max_preview_bytes(config.max_preview_bytes);

    let request = BuildRequest::new(source, &args.out).with_max_files(args.max_files);
    Ok(orchestrator.build_document(&request).await?)
}

fn exit_code(err: &anyhow::Error) -> i32 {
    let usage = err.downcast_ref::<UsageError>().is_some()
        || err
            .downcast_ref::<BuildError>()
            .is_some_and(BuildError::is_usage);
    if usage {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}
