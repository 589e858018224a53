//! Prefijador: command-line host for the CSS transform worker
//!
//! ## Usage
//!
//! ```bash
//! prefijador transform ".a { display: flex; }"   # Prefix a snippet
//! prefijador transform --input app.css --map     # Prefix a file with a source map
//! prefijador test                                # Run the bundled fixture suite
//! prefijador status                              # Show worker capability flags
//! prefijador serve --port 3000                   # Serve the protocol over HTTP
//! ```

use clap::Parser;
use prefijador::{
    Cli, CliError, CliResult, Commands, ReportFormat, ServeConfig, StatusReporter, TestArgs,
    TransformArgs, TransformServer,
};
use prefijar::{PipelineConfig, PluginToggles, TransformOptions, TransformWorker, WorkerReply};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    let reporter = StatusReporter::new(!cli.no_color, cli.quiet);

    let runtime = tokio::runtime::Runtime::new()?;
    match cli.command {
        Commands::Transform(args) => runtime.block_on(run_transform(&reporter, &args)),
        Commands::Test(args) => runtime.block_on(run_test(&reporter, &args)),
        Commands::Status => runtime.block_on(run_status(&reporter)),
        Commands::Serve(args) => {
            let config = ServeConfig {
                host: args.host.clone(),
                port: args.port,
                cors: args.cors,
            };
            runtime.block_on(TransformServer::new(config).run())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_transform(reporter: &StatusReporter, args: &TransformArgs) -> CliResult<()> {
    let css = match (&args.css, &args.input) {
        (Some(css), _) => css.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(CliError::invalid_argument(
                "provide CSS text or --input <file>",
            ))
        }
    };

    // empty input never reaches the worker
    if css.trim().is_empty() {
        reporter.warning("no CSS provided, nothing to transform");
        return Ok(());
    }

    reporter.info("transforming stylesheet");

    let worker = TransformWorker::spawn();
    if args.no_prefix {
        worker
            .init(Some(PipelineConfig {
                plugins: PluginToggles { prefixer: false },
            }))
            .await?;
    }

    let options = TransformOptions {
        css: None,
        from: args.from.clone(),
        to: args.to.as_ref().map(|p| p.display().to_string()),
        map: args.map,
    };

    // a channel-level failure surfaces here as Err, distinct from the
    // data-carried transform_error below
    let reply = worker.transform(css, Some(options)).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return if reply.is_error() {
            Err(CliError::transform("transform returned an error envelope"))
        } else {
            Ok(())
        };
    }

    match reply {
        WorkerReply::TransformSuccess { data } => {
            for warning in &data.warnings {
                reporter.warning(warning);
            }
            match &args.to {
                Some(path) => {
                    std::fs::write(path, &data.css)?;
                    if let Some(map) = &data.map {
                        let map_path = format!("{}.map", path.display());
                        std::fs::write(&map_path, serde_json::to_string(map)?)?;
                        reporter.success(&format!("wrote {} and {map_path}", path.display()));
                    } else {
                        reporter.success(&format!("wrote {}", path.display()));
                    }
                }
                None => {
                    reporter.success("transform complete");
                    println!("{}", data.css);
                    if data.map.is_some() {
                        reporter.info("use --to or --json to capture the source map");
                    }
                }
            }
            Ok(())
        }
        WorkerReply::TransformError { error, .. } => {
            reporter.failure(&error);
            Err(CliError::transform(error))
        }
        other => Err(CliError::transform(format!(
            "unexpected reply: {}",
            other.kind()
        ))),
    }
}

async fn run_test(reporter: &StatusReporter, args: &TestArgs) -> CliResult<()> {
    let worker = TransformWorker::spawn();
    match worker.run_tests().await? {
        WorkerReply::TestSuccess { data } => {
            match args.format {
                ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
                ReportFormat::Text => reporter.render_report(&data),
            }
            if data.summary.failed > 0 {
                Err(CliError::test_execution(format!(
                    "{} of {} fixtures failed",
                    data.summary.failed, data.summary.total
                )))
            } else {
                Ok(())
            }
        }
        WorkerReply::TestError { error } => {
            reporter.failure(&error);
            Err(CliError::test_execution(error))
        }
        other => Err(CliError::test_execution(format!(
            "unexpected reply: {}",
            other.kind()
        ))),
    }
}

async fn run_status(reporter: &StatusReporter) -> CliResult<()> {
    let worker = TransformWorker::spawn();
    let status = worker.status().await?;
    reporter.render_status(&status);
    Ok(())
}
