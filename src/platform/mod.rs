//! Platform-specific items.
//!
//! This module contains the identities of the host APIs a native audio subsystem can expose and
//! the selection of the backend compiled in for the current platform.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::traits::Backend;

// A macro to assist with declaring the known host API identities.
//
// For example the invocation `host_ids!(Alsa 8 "ALSA", Jack 12 "JACK")` expands to:
//
// ```
// pub enum HostId {
//     Alsa = 8,
//     Jack = 12,
// }
// ```
//
// together with `ALL_HOSTS`, `HostId::name`, `HostId::type_id` and the conversion from a native
// type id.
macro_rules! host_ids {
    ($($HostVariant:ident $type_id:literal $host_name:literal),* $(,)?) => {
        /// All host API identities known to audiohost, in native type id order.
        pub const ALL_HOSTS: &[HostId] = &[
            $(
                HostId::$HostVariant,
            )*
        ];

        /// Identity of a host API, as reported by the native subsystem's type id.
        #[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum HostId {
            $(
                $HostVariant = $type_id,
            )*
        }

        impl HostId {
            /// The display name of this host API family.
            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        HostId::$HostVariant => $host_name,
                    )*
                }
            }

            /// The native type id of this host API family.
            pub fn type_id(&self) -> u32 {
                *self as u32
            }
        }

        impl TryFrom<u32> for HostId {
            type Error = UnknownHostId;

            fn try_from(type_id: u32) -> Result<Self, Self::Error> {
                match type_id {
                    $(
                        $type_id => Ok(HostId::$HostVariant),
                    )*
                    _ => Err(UnknownHostId(type_id)),
                }
            }
        }
    };
}

host_ids!(
    InDevelopment 0 "InDevelopment",
    DirectSound 1 "DirectSound",
    Mme 2 "MME",
    Asio 3 "ASIO",
    SoundManager 4 "SoundManager",
    CoreAudio 5 "CoreAudio",
    Oss 7 "OSS",
    Alsa 8 "ALSA",
    Al 9 "AL",
    BeOs 10 "BeOS",
    Wdmks 11 "WDMKS",
    Jack 12 "JACK",
    Wasapi 13 "WASAPI",
    AudioScienceHpi 14 "AudioScience",
);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A native type id that does not correspond to any known [`HostId`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unknown host id {0}")]
pub struct UnknownHostId(pub u32);

/// The backend compiled in for the current platform.
///
/// This is the ALSA backend on Linux and the BSDs when the `alsa` feature is enabled, and the
/// null backend (no host APIs, no devices) everywhere else.
pub fn default_backend() -> Arc<dyn Backend> {
    platform_impl::default_backend()
}

#[cfg(all(
    feature = "alsa",
    any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd"
    )
))]
mod platform_impl {
    use std::sync::Arc;

    use crate::host::alsa::AlsaBackend;
    use crate::traits::Backend;

    pub fn default_backend() -> Arc<dyn Backend> {
        Arc::new(AlsaBackend::new())
    }
}

#[cfg(not(all(
    feature = "alsa",
    any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd"
    )
)))]
mod platform_impl {
    use std::sync::Arc;

    use crate::host::null::NullBackend;
    use crate::traits::Backend;

    pub fn default_backend() -> Arc<dyn Backend> {
        Arc::new(NullBackend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ids_round_trip() {
        for host in ALL_HOSTS {
            assert_eq!(HostId::try_from(host.type_id()), Ok(*host));
        }
    }

    #[test]
    fn gap_in_type_ids_is_unknown() {
        assert_eq!(HostId::try_from(6), Err(UnknownHostId(6)));
        assert_eq!(HostId::try_from(15), Err(UnknownHostId(15)));
        assert_eq!(UnknownHostId(42).to_string(), "unknown host id 42");
    }

    #[test]
    fn names_follow_type_ids() {
        assert_eq!(HostId::Oss.name(), "OSS");
        assert_eq!(HostId::Alsa.name(), "ALSA");
        assert_eq!(HostId::Wasapi.to_string(), "WASAPI");
        assert_eq!(HostId::AudioScienceHpi.name(), "AudioScience");
    }
}
