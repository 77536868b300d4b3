//! Rollup node binary

fn main() {
    use clap::Parser;
    use rollup_node::RollupNodeArgs;

    init_tracing_subscriber();

    // Enable backtraces unless a RUST_BACKTRACE value has already been explicitly provided.
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    if let Err(err) = run(RollupNodeArgs::parse()) {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

/// Launches the node on a multi-threaded runtime and runs it to completion.
fn run(args: rollup_node::RollupNodeArgs) -> eyre::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async move {
        tracing::info!(target: "rollup::node", "Launching node");
        args.build().await?.run().await
    })
}

/// Initialize the tracing subscriber.
///
/// Logs are written to the console, filtered through `RUST_LOG` (defaults to `info`).
fn init_tracing_subscriber() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(false)
                .with_ansi(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
