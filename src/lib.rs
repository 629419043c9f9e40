//! # How to use audiohost
//!
//! Here are some concepts audiohost exposes:
//!
//! - A [`Runtime`] is a reference-counted handle to a native audio subsystem (a
//!   [`Backend`](traits::Backend)). The subsystem is initialized when the first handle is acquired
//!   and torn down when the last one is dropped.
//! - A [`HostApi`] is one audio backend family offered by the subsystem (ALSA, WASAPI, Core
//!   Audio, ...). Each host API lazily enumerates the [`SystemDevice`]s it owns.
//! - A [`Device`] is a [`SystemDevice`] bound to a [`DeviceDirection`], validated against the
//!   device's capabilities, carrying the [`StreamParameters`] a stream would be opened with.
//! - [`Audio`] is the entry point tying the above together: it enumerates the host APIs, keeps
//!   track of the current one and resolves default devices.
//!
//! ## Quick Start
//!
//! ```no_run
//! use audiohost::{Audio, Device, DeviceDirection};
//!
//! let audio = Audio::new()?;
//! println!("Using backend: {}", audio.build_info());
//!
//! let api = audio.current_api();
//! if let Some(system_device) = api.default_output_device() {
//!     let device = Device::new(system_device, DeviceDirection::Output)?;
//!     println!("{:?}", device.output_params());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A specific host API can be requested by its [`HostId`]:
//!
//! ```no_run
//! use audiohost::{Audio, HostId};
//!
//! let audio = Audio::from_host_id(HostId::Alsa)?;
//! for device in audio.current_api().devices() {
//!     println!("{}: {}", device.index(), device.name());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Backends other than the platform default can be plugged in through
//! [`Runtime::with_backend`]; see [`CustomBackend`](host::custom::CustomBackend) for an
//! in-memory one.

use std::fmt;
use std::ops::{Div, Mul};

pub use audio::{Audio, HostSelection};
pub use device::{Device, StreamParameters};
pub use device_description::{DeviceDirection, SystemDevice};
pub use devices::DeviceCatalog;
pub use error::*;
pub use host_api::{HostApi, HostApiCatalog};
pub use platform::{default_backend, HostId, UnknownHostId, ALL_HOSTS};
pub use runtime::Runtime;
pub use samples_formats::{FromSample, Sample, SampleFormat, SizedSample, I24, U24};
pub use traits::{DeviceInfo, HostApiInfo};

mod audio;
mod device;
mod device_description;
mod devices;
mod error;
pub mod host;
mod host_api;
pub mod platform;
mod runtime;
mod samples_formats;
pub mod traits;

/// Number of channels.
pub type ChannelCount = u16;

/// The number of samples processed per second for a single channel of audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleRate(pub u32);

impl<T> Mul<T> for SampleRate
where
    u32: Mul<T, Output = u32>,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        SampleRate(self.0 * rhs)
    }
}

impl<T> Div<T> for SampleRate
where
    u32: Div<T, Output = u32>,
{
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        SampleRate(self.0 / rhs)
    }
}

/// Global index of a device.
///
/// The native subsystem assigns one flat index over the devices of all host APIs, in its
/// enumeration order. It identifies a device without knowing which host API owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceIndex(pub usize);

/// Index of a host API in the native subsystem's enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostApiIndex(pub usize);

impl fmt::Display for DeviceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for HostApiIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
