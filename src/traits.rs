//! The trait allowing audiohost to abstract over native audio subsystems.

use std::time::Duration;

use crate::{BackendSpecificError, ChannelCount, DeviceIndex, HostApiIndex, SampleRate};

/// A **Backend** is the native audio subsystem audiohost discovers host APIs and devices through.
///
/// A backend exposes one or more host APIs (for example, on Windows a single subsystem may offer
/// MME, DirectSound, WASAPI and ASIO at the same time). Every device the backend knows about is
/// reachable through a single flat [`DeviceIndex`], and each device records which host API owns
/// it.
///
/// All queries other than [`initialize`](Backend::initialize) are only meaningful between a
/// successful `initialize` and the matching [`terminate`](Backend::terminate). The
/// [`Runtime`](crate::Runtime) guarantees this pairing; backends are never driven directly.
pub trait Backend: Send + Sync {
    /// Prepares the native subsystem for use.
    fn initialize(&self) -> Result<(), BackendSpecificError>;

    /// Releases everything acquired by `initialize`.
    fn terminate(&self);

    /// A human readable description of the backend and its version.
    fn version_text(&self) -> String;

    /// The number of devices of all host APIs.
    fn device_count(&self) -> usize;

    /// The number of host APIs.
    fn host_api_count(&self) -> usize;

    /// Information about the device with the given global index.
    ///
    /// Returns `None` if the index is out of range.
    fn device_info(&self, index: DeviceIndex) -> Option<DeviceInfo>;

    /// Information about the host API with the given index.
    ///
    /// Returns `None` if the index is out of range.
    fn host_api_info(&self, index: HostApiIndex) -> Option<HostApiInfo>;

    /// Converts a native host API type id into the index of the first host API of that type.
    ///
    /// Returns `None` if no host API of that type is available.
    fn host_api_type_to_index(&self, type_id: u32) -> Option<HostApiIndex>;

    /// The system's default output device, if there is one.
    fn default_output_device(&self) -> Option<DeviceIndex>;

    /// The system's default input device, if there is one.
    fn default_input_device(&self) -> Option<DeviceIndex>;

    /// The system's default host API, if there is one.
    fn default_host_api(&self) -> Option<HostApiIndex>;
}

/// Native description of a single device.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceInfo {
    pub name: String,
    /// Index of the host API owning this device.
    pub host_api: HostApiIndex,
    pub max_input_channels: ChannelCount,
    pub max_output_channels: ChannelCount,
    pub default_low_input_latency: Duration,
    pub default_low_output_latency: Duration,
    pub default_high_input_latency: Duration,
    pub default_high_output_latency: Duration,
    pub default_sample_rate: SampleRate,
}

/// Native description of a host API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostApiInfo {
    pub name: String,
    /// The native type id, see [`HostId`](crate::HostId) for the known values.
    pub type_id: u32,
    /// Number of devices owned by this host API.
    pub device_count: usize,
    /// Global index of this host API's default input device.
    pub default_input_device: Option<DeviceIndex>,
    /// Global index of this host API's default output device.
    pub default_output_device: Option<DeviceIndex>,
}
