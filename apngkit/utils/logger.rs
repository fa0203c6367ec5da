use std::fmt::Display;
use std::sync::OnceLock;

#[cfg(not(target_arch = "wasm32"))]
use std::time::SystemTime;

#[cfg(target_arch = "wasm32")]
use js_sys::Date;
#[cfg(target_arch = "wasm32")]
use web_sys::console;

const RESET: &str = "\x1b[0m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Environment variable holding the minimum level that gets printed.
pub const LOG_ENV: &str = "APNGKIT_LOG";

#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Info,
            &$msg.to_string()
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Info,
            &format!($fmt, $($arg)*)
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Debug,
            &$msg.to_string()
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Debug,
            &format!($fmt, $($arg)*)
        )
    };
}

#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Warning,
            &$msg.to_string()
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Warning,
            &format!($fmt, $($arg)*)
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($msg:expr) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Error,
            &$msg.to_string()
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::utils::logger::Logger::log(
            $crate::utils::logger::LogLevel::Error,
            &format!($fmt, $($arg)*)
        )
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Off,
}

impl LogLevel {
    pub fn parse(value: &str) -> Option<LogLevel> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            "off" | "none" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

pub struct Logger {}

impl Logger {
    /// Minimum level that is printed, read once from `APNGKIT_LOG`.
    pub fn threshold() -> LogLevel {
        static THRESHOLD: OnceLock<LogLevel> = OnceLock::new();

        *THRESHOLD.get_or_init(|| {
            #[cfg(not(target_arch = "wasm32"))]
            let configured = std::env::var(LOG_ENV).ok().and_then(|v| LogLevel::parse(&v));

            #[cfg(target_arch = "wasm32")]
            let configured: Option<LogLevel> = None;

            configured.unwrap_or(LogLevel::Warning)
        })
    }

    pub fn enabled(level: LogLevel) -> bool {
        level != LogLevel::Off && level >= Self::threshold()
    }

    fn get_timestamp() -> String {
        #[cfg(target_arch = "wasm32")]
        let (secs, millis) = {
            let now = Date::now();
            ((now / 1000.0) as u64, (now % 1000.0) as u32)
        };

        #[cfg(not(target_arch = "wasm32"))]
        let (secs, millis) = {
            let now = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_default();
            (now.as_secs(), now.subsec_millis())
        };

        let hours = (secs / 3600) % 24;
        let minutes = (secs / 60) % 60;
        let seconds = secs % 60;

        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }

    pub fn log(level: LogLevel, message: impl Display) {
        if !Self::enabled(level) {
            return;
        }

        let (level_str, color) = match level {
            LogLevel::Debug => ("DEBUG", BLUE),
            LogLevel::Info => ("INFO", GREEN),
            LogLevel::Warning => ("WARN", YELLOW),
            LogLevel::Error | LogLevel::Off => ("ERROR", RED),
        };

        #[cfg(target_arch = "wasm32")]
        console::log_1(&format!("{} [{}] apngkit: {}", Self::get_timestamp(), level_str, message).into());

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!(
            "{} [{}{}{}] apngkit: {}",
            Self::get_timestamp(),
            color,
            level_str,
            RESET,
            message
        );

        #[cfg(target_arch = "wasm32")]
        let _ = color;
    }
}
