//! Optional diagnostics
//!
//! The scheduler logs through these macros so the same code builds with the
//! `log` facade (host), `defmt` (firmware), or nothing at all. When both are
//! enabled `log` wins. With neither, arguments are type-checked but never
//! formatted.

#[cfg(feature = "log")]
macro_rules! stream_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! stream_debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! stream_debug {
    ($($arg:tt)*) => { if false { let _ = ::core::format_args!($($arg)*); } };
}

#[cfg(feature = "log")]
macro_rules! stream_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! stream_info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! stream_info {
    ($($arg:tt)*) => { if false { let _ = ::core::format_args!($($arg)*); } };
}

#[cfg(feature = "log")]
macro_rules! stream_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! stream_warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! stream_warn {
    ($($arg:tt)*) => { if false { let _ = ::core::format_args!($($arg)*); } };
}
