use anyhow::Context;
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use usa_analyzer::{AnalyzerConfig, ExecutionMode, SceneCollectionAnalyzer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Command::new("usa")
        .version(usa_analyzer::VERSION)
        .about("Dump the Transform hierarchy of Unity scene files")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_parser(value_parser!(PathBuf))
                .help("Directory scanned recursively for scene files"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_parser(value_parser!(PathBuf))
                .help("Directory receiving the .dump files"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .value_parser(value_parser!(ExecutionMode))
                .help("Execution mode: sequential or concurrent"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf))
                .help("YAML configuration file; flags override its values"),
        );

    let matches = cli.get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AnalyzerConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config.input_dir.clone_from(input);
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.output_dir.clone_from(output);
    }
    if let Some(mode) = matches.get_one::<ExecutionMode>("mode") {
        config.mode = *mode;
    }

    let analyzer = SceneCollectionAnalyzer::new(config).context("invalid analyzer configuration")?;
    let report = analyzer.run().await;

    println!(
        "{} mode: {} dumped, {} failed, {} ms",
        report.mode,
        report.dumped.len(),
        report.failures.len(),
        report.elapsed_ms()
    );
    for failure in &report.failures {
        println!("  {}: {}", failure.path.display(), failure.error);
    }

    std::process::exit(if report.succeeded() { 0 } else { 1 });
}
