use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `info,oaidoc_core=debug` so component registration shows up
/// while the document is being built. Calling it twice is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,oaidoc_core=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
