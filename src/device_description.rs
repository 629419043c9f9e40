use std::fmt;
use std::time::Duration;

use crate::traits::DeviceInfo;
use crate::{ChannelCount, DeviceIndex, HostApiIndex, SampleRate};

/// A snapshot of one physical or virtual device, as enumerated by its host API.
///
/// The snapshot is immutable. Cloning it copies the native information; it does not share it
/// with the catalog it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemDevice {
    info: DeviceInfo,
    index: DeviceIndex,
}

/// The direction(s) of a device or device session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceDirection {
    /// Input only (capture/recording)
    Input,

    /// Output only (playback/rendering)
    Output,

    /// Both input and output
    Duplex,

    /// Direction unknown or not yet determined
    #[default]
    Unknown,
}

impl SystemDevice {
    /// A snapshot of the device described by `info`, found at the global `index`.
    pub fn new(info: DeviceInfo, index: DeviceIndex) -> Self {
        SystemDevice { info, index }
    }

    /// Returns the human-readable device name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// The native information this snapshot was taken from.
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// The global index of this device, across all host APIs.
    pub fn index(&self) -> DeviceIndex {
        self.index
    }

    /// The index of the host API owning this device.
    pub fn host_api(&self) -> HostApiIndex {
        self.info.host_api
    }

    /// The maximum number of input channels, `0` if the device cannot capture.
    pub fn max_input_channels(&self) -> ChannelCount {
        self.info.max_input_channels
    }

    /// The maximum number of output channels, `0` if the device cannot play back.
    pub fn max_output_channels(&self) -> ChannelCount {
        self.info.max_output_channels
    }

    /// The sample rate the device runs at by default.
    pub fn default_sample_rate(&self) -> SampleRate {
        self.info.default_sample_rate
    }

    /// Input latency suggested for robust, non-interactive use.
    pub fn default_high_input_latency(&self) -> Duration {
        self.info.default_high_input_latency
    }

    /// Output latency suggested for robust, non-interactive use.
    pub fn default_high_output_latency(&self) -> Duration {
        self.info.default_high_output_latency
    }

    /// Whether the device has at least one input channel.
    pub fn can_input(&self) -> bool {
        self.info.max_input_channels > 0
    }

    /// Whether the device has at least one output channel.
    pub fn can_output(&self) -> bool {
        self.info.max_output_channels > 0
    }

    /// Whether the device can both capture and play back.
    pub fn can_duplex(&self) -> bool {
        self.can_input() && self.can_output()
    }

    /// The directions this device is physically capable of.
    pub fn direction(&self) -> DeviceDirection {
        direction_from_caps(self.can_input(), self.can_output())
    }
}

impl DeviceDirection {
    /// Returns whether this direction includes audio input (capture).
    ///
    /// This is a convenience method that checks if direction is `Input` or `Duplex`.
    pub fn is_input(&self) -> bool {
        matches!(self, DeviceDirection::Input | DeviceDirection::Duplex)
    }

    /// Returns whether this direction includes audio output (playback).
    ///
    /// This is a convenience method that checks if direction is `Output` or `Duplex`.
    pub fn is_output(&self) -> bool {
        matches!(self, DeviceDirection::Output | DeviceDirection::Duplex)
    }
}

impl fmt::Display for SystemDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.info.name, self.index)?;

        if self.direction() != DeviceDirection::Unknown {
            write!(f, " [{}]", self.direction())?;
        }

        Ok(())
    }
}

impl fmt::Display for DeviceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceDirection::Input => write!(f, "Input"),
            DeviceDirection::Output => write!(f, "Output"),
            DeviceDirection::Duplex => write!(f, "Duplex"),
            DeviceDirection::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Determines device direction from input/output capabilities.
pub(crate) fn direction_from_caps(has_input: bool, has_output: bool) -> DeviceDirection {
    match (has_input, has_output) {
        (true, true) => DeviceDirection::Duplex,
        (true, false) => DeviceDirection::Input,
        (false, true) => DeviceDirection::Output,
        (false, false) => DeviceDirection::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::custom::CustomDevice;
    use crate::traits::Backend;

    fn device(input: ChannelCount, output: ChannelCount) -> SystemDevice {
        let backend = crate::host::custom::CustomBackend::builder()
            .device(
                CustomDevice::new("dev", HostApiIndex(0))
                    .channels(input, output),
            )
            .build();
        SystemDevice::new(backend.device_info(DeviceIndex(0)).unwrap(), DeviceIndex(0))
    }

    #[test]
    fn duplex_is_input_and_output() {
        for (input, output) in [(0, 0), (1, 0), (0, 2), (2, 6)] {
            let d = device(input, output);
            assert_eq!(d.can_duplex(), d.can_input() && d.can_output());
        }
    }

    #[test]
    fn direction_follows_capabilities() {
        assert_eq!(device(0, 0).direction(), DeviceDirection::Unknown);
        assert_eq!(device(2, 0).direction(), DeviceDirection::Input);
        assert_eq!(device(0, 2).direction(), DeviceDirection::Output);
        assert_eq!(device(1, 2).direction(), DeviceDirection::Duplex);
    }

    #[test]
    fn display() {
        assert_eq!(device(0, 2).to_string(), "dev (#0) [Output]");
        assert_eq!(device(0, 0).to_string(), "dev (#0)");
    }
}
