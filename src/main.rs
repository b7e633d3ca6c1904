use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    // `RUST_LOG` overrides; library `log` records are forwarded.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("starting styled input demo");

    if let Err(err) = platform::run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
