//! Logging utilities with indicatif integration

use indicatif::MultiProgress;

/// Logger that prints through indicatif MultiProgress so log lines do not
/// tear an active spinner.
pub struct SpinnerLogger {
    inner: env_logger::Logger,
    multi: MultiProgress,
}

impl SpinnerLogger {
    pub fn new(inner: env_logger::Logger, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl log::Log for SpinnerLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let line = format!("[{:<5}] {}", record.level(), record.args());
            self.multi.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Initialize logging, optionally bridged through a MultiProgress.
///
/// `quiet` drops the default filter to warn (TTY mode, where the spinner
/// already shows activity); `debug` raises it to debug. RUST_LOG
/// overrides both.
pub fn init_logging(quiet: bool, debug: bool, multi: Option<&MultiProgress>) {
    use std::io::Write;

    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    if let Some(multi) = multi {
        let logger = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_level),
        )
        .build();
        let max_level = logger.filter();

        log::set_boxed_logger(Box::new(SpinnerLogger::new(logger, multi.clone())))
            .expect("failed to init logger");
        log::set_max_level(max_level);
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .format(|buf, record| writeln!(buf, "[{:<5}] {}", record.level(), record.args()))
            .init();
    }
}
