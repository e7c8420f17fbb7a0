//! `log` backends: a browser console sink on wasm32, `env_logger` natively.

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let value = wasm_bindgen::JsValue::from_str(&format!("[sandfall] {}", record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::info_1(&value),
                Level::Debug | Level::Trace => web_sys::console::log_1(&value),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the logger. Safe to call more than once; only the first call
/// installs, later calls just adjust the level.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: LevelFilter) {
    let _ = log::set_logger(&console::LOGGER);
    log::set_max_level(level);
}

/// Install `env_logger` at `level`; `RUST_LOG` still refines it per module.
/// Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
    log::set_max_level(level);
}
