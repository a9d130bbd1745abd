use log::LevelFilter;

/// Installs the process logger. Calling it more than once is harmless.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_logger(&console::LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Installs the process logger. Calling it more than once is harmless.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    let _ = env_logger::builder()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    pub(super) struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }

            let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&message),
                Level::Warn => web_sys::console::warn_1(&message),
                Level::Info => web_sys::console::info_1(&message),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
            }
        }

        fn flush(&self) {}
    }
}
