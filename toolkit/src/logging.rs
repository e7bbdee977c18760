/// Initialises the `env_logger` backend for the `log` facade used across the
/// workspace. Safe to call more than once; only the first call wins.
pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .is_test(false)
        .try_init();
}
