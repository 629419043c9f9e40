//! The backends audiohost can drive.

#[cfg(all(
    feature = "alsa",
    any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd"
    )
))]
pub mod alsa;
pub mod custom;
pub mod null;
