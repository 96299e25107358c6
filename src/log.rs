use log::LevelFilter;
use std::io::Write;

/// Installs an [`env_logger`] writing to stderr with the given level.
/// Calling it twice (e.g. from tests) is a no-op the second time.
pub fn build_logger_for_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{:<5}] {}", record.level(), record.args()))
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// As [`build_logger_for_level`], but raises `base_level` one step per
/// `-v` occurrence on the command line.
pub fn build_logger_for_verbosity(base_level: LevelFilter, verbosity: usize) {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base = levels.iter().position(|&l| l == base_level).unwrap_or(0);
    let level = levels[(base + verbosity).min(levels.len() - 1)];

    build_logger_for_level(level);
}
