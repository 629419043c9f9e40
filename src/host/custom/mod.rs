//! A user-defined backend described entirely in memory.
//!
//! Useful for integrating audio systems that audiohost has no native support for, and for
//! simulating a machine's host API and device layout.
//!
//! ```
//! use audiohost::host::custom::{CustomBackend, CustomDevice, CustomHostApi};
//! use audiohost::{HostApiIndex, HostId};
//!
//! let backend = CustomBackend::builder()
//!     .host_api(CustomHostApi::new("ALSA", HostId::Alsa))
//!     .device(CustomDevice::new("hw:0,0", HostApiIndex(0)).channels(2, 2))
//!     .device(CustomDevice::new("hdmi", HostApiIndex(0)).output_channels(8))
//!     .build();
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::traits::{Backend, DeviceInfo, HostApiInfo};
use crate::{BackendSpecificError, ChannelCount, DeviceIndex, HostApiIndex, HostId, SampleRate};

const DEFAULT_LOW_LATENCY: Duration = Duration::from_millis(10);
const DEFAULT_HIGH_LATENCY: Duration = Duration::from_millis(100);
const DEFAULT_SAMPLE_RATE: SampleRate = SampleRate(44_100);

/// An in-memory [`Backend`].
///
/// Devices are numbered in the order they were added to the builder; host APIs likewise.
#[derive(Debug)]
pub struct CustomBackend {
    version: String,
    host_apis: Vec<CustomHostApi>,
    devices: Vec<DeviceInfo>,
    default_host_api: Option<HostApiIndex>,
    default_input_device: Option<DeviceIndex>,
    default_output_device: Option<DeviceIndex>,
    init_error: Option<BackendSpecificError>,
    initializations: AtomicUsize,
    terminations: AtomicUsize,
}

/// A host API of a [`CustomBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomHostApi {
    name: String,
    type_id: u32,
    default_input_device: Option<DeviceIndex>,
    default_output_device: Option<DeviceIndex>,
}

/// A device of a [`CustomBackend`].
#[derive(Clone, Debug, PartialEq)]
pub struct CustomDevice {
    info: DeviceInfo,
}

/// Builder for constructing a [`CustomBackend`].
#[derive(Debug, Default)]
pub struct CustomBackendBuilder {
    version: Option<String>,
    host_apis: Vec<CustomHostApi>,
    devices: Vec<DeviceInfo>,
    default_host_api: Option<HostApiIndex>,
    default_input_device: Option<DeviceIndex>,
    default_output_device: Option<DeviceIndex>,
    init_error: Option<BackendSpecificError>,
}

impl CustomHostApi {
    /// A host API of the given family, with no recorded defaults.
    pub fn new(name: impl Into<String>, host_id: HostId) -> Self {
        Self::with_type_id(name, host_id.type_id())
    }

    /// A host API with a raw native type id, which need not be a known [`HostId`].
    pub fn with_type_id(name: impl Into<String>, type_id: u32) -> Self {
        CustomHostApi {
            name: name.into(),
            type_id,
            default_input_device: None,
            default_output_device: None,
        }
    }

    /// Records the default output device of this host API.
    ///
    /// Without it, the first output capable device of this host API is the default. The index is
    /// recorded as given, even if it belongs to another host API.
    pub fn default_output_device(mut self, index: DeviceIndex) -> Self {
        self.default_output_device = Some(index);
        self
    }

    /// Records the default input device of this host API.
    pub fn default_input_device(mut self, index: DeviceIndex) -> Self {
        self.default_input_device = Some(index);
        self
    }
}

impl CustomDevice {
    /// A device owned by the host API at `host_api`, with no channels.
    pub fn new(name: impl Into<String>, host_api: HostApiIndex) -> Self {
        CustomDevice {
            info: DeviceInfo {
                name: name.into(),
                host_api,
                max_input_channels: 0,
                max_output_channels: 0,
                default_low_input_latency: DEFAULT_LOW_LATENCY,
                default_low_output_latency: DEFAULT_LOW_LATENCY,
                default_high_input_latency: DEFAULT_HIGH_LATENCY,
                default_high_output_latency: DEFAULT_HIGH_LATENCY,
                default_sample_rate: DEFAULT_SAMPLE_RATE,
            },
        }
    }

    /// Sets the maximum number of input channels.
    pub fn input_channels(mut self, channels: ChannelCount) -> Self {
        self.info.max_input_channels = channels;
        self
    }

    /// Sets the maximum number of output channels.
    pub fn output_channels(mut self, channels: ChannelCount) -> Self {
        self.info.max_output_channels = channels;
        self
    }

    /// Sets the maximum number of input and output channels.
    pub fn channels(self, input: ChannelCount, output: ChannelCount) -> Self {
        self.input_channels(input).output_channels(output)
    }

    /// Sets the default low input and output latencies. Defaults to 10ms.
    pub fn low_latency(mut self, input: Duration, output: Duration) -> Self {
        self.info.default_low_input_latency = input;
        self.info.default_low_output_latency = output;
        self
    }

    /// Sets the default high input and output latencies. Defaults to 100ms.
    pub fn high_latency(mut self, input: Duration, output: Duration) -> Self {
        self.info.default_high_input_latency = input;
        self.info.default_high_output_latency = output;
        self
    }

    /// Sets the default sample rate. Defaults to 44.1kHz.
    pub fn sample_rate(mut self, sample_rate: SampleRate) -> Self {
        self.info.default_sample_rate = sample_rate;
        self
    }
}

impl CustomBackendBuilder {
    /// Sets the version text reported by the backend.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a host API. Its index is the number of host APIs added before it.
    pub fn host_api(mut self, host_api: CustomHostApi) -> Self {
        self.host_apis.push(host_api);
        self
    }

    /// Adds a device. Its global index is the number of devices added before it.
    pub fn device(mut self, device: CustomDevice) -> Self {
        self.devices.push(device.info);
        self
    }

    /// Sets the default host API. Defaults to the first host API.
    pub fn default_host_api(mut self, index: HostApiIndex) -> Self {
        self.default_host_api = Some(index);
        self
    }

    /// Sets the system default output device. Defaults to the default output device of the
    /// default host API.
    pub fn default_output_device(mut self, index: DeviceIndex) -> Self {
        self.default_output_device = Some(index);
        self
    }

    /// Sets the system default input device. Defaults to the default input device of the
    /// default host API.
    pub fn default_input_device(mut self, index: DeviceIndex) -> Self {
        self.default_input_device = Some(index);
        self
    }

    /// Makes every call to [`Backend::initialize`] fail with the given description.
    pub fn fail_initialization(mut self, description: impl Into<String>) -> Self {
        self.init_error = Some(BackendSpecificError::new(description));
        self
    }

    /// Finishes the backend, filling in the defaults that were not set explicitly.
    pub fn build(self) -> CustomBackend {
        let mut host_apis = self.host_apis;
        for (api_index, api) in host_apis.iter_mut().enumerate() {
            let owned = |capable: fn(&DeviceInfo) -> bool| {
                self.devices
                    .iter()
                    .position(|d| d.host_api == HostApiIndex(api_index) && capable(d))
                    .map(DeviceIndex)
            };
            if api.default_output_device.is_none() {
                api.default_output_device = owned(|d| d.max_output_channels > 0);
            }
            if api.default_input_device.is_none() {
                api.default_input_device = owned(|d| d.max_input_channels > 0);
            }
        }

        let default_host_api = self
            .default_host_api
            .or_else(|| (!host_apis.is_empty()).then_some(HostApiIndex(0)));
        let default_api = default_host_api.and_then(|i| host_apis.get(i.0));
        let default_output_device = self
            .default_output_device
            .or_else(|| default_api.and_then(|api| api.default_output_device));
        let default_input_device = self
            .default_input_device
            .or_else(|| default_api.and_then(|api| api.default_input_device));

        let version = self.version.unwrap_or_else(|| {
            format!("audiohost custom backend {}", env!("CARGO_PKG_VERSION"))
        });
        CustomBackend {
            version,
            host_apis,
            devices: self.devices,
            default_host_api,
            default_input_device,
            default_output_device,
            init_error: self.init_error,
            initializations: AtomicUsize::new(0),
            terminations: AtomicUsize::new(0),
        }
    }
}

impl CustomBackend {
    /// Starts describing a backend with no host APIs and no devices.
    pub fn builder() -> CustomBackendBuilder {
        CustomBackendBuilder::default()
    }

    /// How many times [`Backend::initialize`] has been called.
    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }

    /// How many times [`Backend::terminate`] has been called.
    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }
}

impl Backend for CustomBackend {
    fn initialize(&self) -> Result<(), BackendSpecificError> {
        self.initializations.fetch_add(1, Ordering::SeqCst);
        match &self.init_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn terminate(&self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
    }

    fn version_text(&self) -> String {
        self.version.clone()
    }

    fn device_count(&self) -> usize {
        self.devices.len()
    }

    fn host_api_count(&self) -> usize {
        self.host_apis.len()
    }

    fn device_info(&self, index: DeviceIndex) -> Option<DeviceInfo> {
        self.devices.get(index.0).cloned()
    }

    fn host_api_info(&self, index: HostApiIndex) -> Option<HostApiInfo> {
        let api = self.host_apis.get(index.0)?;
        Some(HostApiInfo {
            name: api.name.clone(),
            type_id: api.type_id,
            device_count: self.devices.iter().filter(|d| d.host_api == index).count(),
            default_input_device: api.default_input_device,
            default_output_device: api.default_output_device,
        })
    }

    fn host_api_type_to_index(&self, type_id: u32) -> Option<HostApiIndex> {
        self.host_apis
            .iter()
            .position(|api| api.type_id == type_id)
            .map(HostApiIndex)
    }

    fn default_output_device(&self) -> Option<DeviceIndex> {
        self.default_output_device
    }

    fn default_input_device(&self) -> Option<DeviceIndex> {
        self.default_input_device
    }

    fn default_host_api(&self) -> Option<HostApiIndex> {
        self.default_host_api
    }
}
