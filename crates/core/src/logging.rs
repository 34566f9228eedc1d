/// Install a `tracing` subscriber for plugin log output
///
/// Meant for hosts; plugins never call it. A subscriber that is already
/// installed is kept, and this returns `false` without doing anything.
pub fn init_tracing() -> bool {
    // Enhanced logging for debug builds
    #[cfg(debug_assertions)]
    let result = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .try_init();

    #[cfg(not(debug_assertions))]
    let result = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .compact()
        .try_init();

    if result.is_ok() {
        tracing::debug!("Plugin logging enabled");
    }
    result.is_ok()
}
