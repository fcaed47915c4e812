pub mod device_finder;
pub mod permissions;

pub use device_finder::DeviceFinder;
pub use permissions::{AccessProbe, DryRunAccessProbe, SessionAccessProbe};

// Условное логирование для горячего пути: кадры тачпада приходят с частотой ~100 Гц
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
