//! Logger setup plus logging macros that can be silenced per module.
//!
//! A module opts in by declaring its own switch and importing the macros
//! from the crate root:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn};
//!
//! log_info!("Lesson parsed: {} words", word_count);
//! ```

/// Install the global logger. `RUST_LOG` wins; otherwise `info`.
/// Calling it more than once is harmless.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    const ENABLE_LOGS: bool = false;

    #[test]
    fn macros_expand_with_module_switch() {
        super::init_logging();
        super::init_logging();
        crate::log_debug!("debug {}", 1);
        crate::log_info!("info {}", 2);
        crate::log_warn!("warn {}", 3);
        crate::log_error!("error {}", 4);
    }
}
