use std::sync::Once;

static INIT: Once = Once::new();

fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Install the process logger. Safe to call from every JNI entry point.
pub fn init() {
    INIT.call_once(install);
}

#[cfg(not(target_os = "android"))]
fn install() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level().as_str()),
    )
    .is_test(cfg!(test))
    .try_init();
}

#[cfg(target_os = "android")]
fn install() {
    if log::set_logger(&android::LOGGER).is_ok() {
        log::set_max_level(default_level());
    }
}

#[cfg(target_os = "android")]
mod android {
    use android_log_sys::{LogPriority, __android_log_write};
    use log::{Log, Metadata, Record};
    use std::ffi::CString;
    use std::os::raw::c_int;

    const TAG: &str = "webshell";

    pub(super) struct AndroidLogger;

    pub(super) static LOGGER: AndroidLogger = AndroidLogger;

    impl Log for AndroidLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let prio = match record.level() {
                log::Level::Error => LogPriority::ERROR,
                log::Level::Warn => LogPriority::WARN,
                log::Level::Info => LogPriority::INFO,
                log::Level::Debug => LogPriority::DEBUG,
                log::Level::Trace => LogPriority::VERBOSE,
            };
            // Interior NULs would truncate the line; replace them instead of dropping it.
            let message = format!("{}", record.args()).replace('\0', "\u{FFFD}");
            let text = CString::new(message).unwrap_or_default();
            let tag = CString::new(TAG).unwrap_or_default();
            unsafe {
                __android_log_write(prio as c_int, tag.as_ptr(), text.as_ptr());
            }
        }

        fn flush(&self) {}
    }
}
