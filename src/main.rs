use afiliados::cli::Args;
use afiliados::config::PipelineConfig;
use afiliados::pipeline;
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── init logging ────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── configure & run ─────────────────────────────────────────────
    let config = PipelineConfig::new(args.data_dir(), args.out_dir());
    info!(data = %config.data_dir.display(), out = %config.out_dir.display(), "startup");

    let summary = if args.from_checkpoint {
        pipeline::run_from_checkpoint(&config)?
    } else {
        pipeline::run(&config)?
    };

    info!(
        combined = summary.combined_rows,
        municipality = summary.municipality_rows,
        provincial = summary.provincial_rows,
        national = summary.national_rows,
        "done"
    );
    Ok(())
}
