//! Unified logging macro for the planner.
//!
//! `plan_log!` picks the backend from the active feature flags so the
//! allocation code logs the same way in every build.
//!
//! # Usage
//!
//! ```rust,ignore
//! plan_log!(debug, "next physical address {}.{}.{}", area, line, device);
//! plan_log!(warn, "channel list truncated from {} to {}", old, new);
//! ```
//!
//! # Feature Flags
//!
//! - `log` - Uses the `log::` facade
//! - `defmt` - Uses `defmt::` (only when `log` is off)
//! - Neither - Compiles to nothing; arguments are still type-checked
//!
//! Only pass integers and `&str` so that all three backends accept them.

#[macro_export]
#[cfg(feature = "log")]
macro_rules! plan_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! plan_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! plan_log {
    ($level:ident, $($arg:tt)*) => {{
        if false {
            let _ = core::format_args!($($arg)*);
        }
    }};
}
