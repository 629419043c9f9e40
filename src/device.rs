use std::time::Duration;

use crate::{
    ChannelCount, DeviceDirection, DeviceIndex, DirectionError, SampleFormat, SampleRate,
    SizedSample, SystemDevice,
};

/// The parameters a stream on one direction of a device would be opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamParameters {
    pub device: DeviceIndex,
    pub channel_count: ChannelCount,
    pub sample_format: SampleFormat,
    pub suggested_latency: Duration,
}

/// A device bound to a direction.
///
/// The direction is validated against the device's capabilities when the session is created and
/// never changes afterwards. The default stream parameters of every direction the session
/// covers are derived at the same time.
///
/// ```
/// # use std::sync::Arc;
/// use audiohost::host::custom::{CustomBackend, CustomDevice, CustomHostApi};
/// use audiohost::{Audio, Device, DeviceDirection, HostApiIndex, HostId, Runtime};
///
/// let backend = CustomBackend::builder()
///     .host_api(CustomHostApi::new("ALSA", HostId::Alsa))
///     .device(CustomDevice::new("hdmi", HostApiIndex(0)).output_channels(8))
///     .build();
/// let audio = Audio::with_runtime(Runtime::with_backend(Arc::new(backend))?)?;
///
/// let hdmi = audio.current_api().devices()[0].clone();
/// let device = Device::new(hdmi.clone(), DeviceDirection::Output)?;
/// assert_eq!(device.output_params().unwrap().channel_count, 2);
///
/// assert!(Device::new(hdmi, DeviceDirection::Input).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    device: SystemDevice,
    input: Option<StreamParameters>,
    output: Option<StreamParameters>,
    direction: DeviceDirection,
    sample_format: SampleFormat,
}

impl Device {
    /// Binds `device` to `direction`, using 32-bit float samples.
    ///
    /// With [`DeviceDirection::Unknown`] the direction is picked from the device's capabilities:
    /// output if it can output, else input if it can input. A device that can do neither yields
    /// a session that stays `Unknown` and has no stream parameters.
    ///
    /// An explicit direction the device cannot provide is an error; duplex in particular is never
    /// downgraded to a single direction.
    pub fn new(device: SystemDevice, direction: DeviceDirection) -> Result<Self, DirectionError> {
        Self::with_sample_format(device, direction, SampleFormat::F32)
    }

    /// Like [`new`](Self::new), with samples of type `T`.
    pub fn with_sample_type<T: SizedSample>(
        device: SystemDevice,
        direction: DeviceDirection,
    ) -> Result<Self, DirectionError> {
        Self::with_sample_format(device, direction, T::FORMAT)
    }

    /// Like [`new`](Self::new), with the given sample format.
    pub fn with_sample_format(
        device: SystemDevice,
        direction: DeviceDirection,
        sample_format: SampleFormat,
    ) -> Result<Self, DirectionError> {
        let mut session = Device {
            device,
            input: None,
            output: None,
            direction: DeviceDirection::Unknown,
            sample_format,
        };
        session.direction = session.resolve(direction)?;
        if session.direction.is_output() {
            session.set_default_output_params()?;
        }
        if session.direction.is_input() {
            session.set_default_input_params()?;
        }
        log::debug!(
            "bound {} as {} ({})",
            session.device,
            session.direction,
            sample_format
        );
        Ok(session)
    }

    fn resolve(&self, requested: DeviceDirection) -> Result<DeviceDirection, DirectionError> {
        let d = &self.device;
        let supported = match requested {
            DeviceDirection::Unknown => {
                return Ok(if d.can_output() {
                    DeviceDirection::Output
                } else if d.can_input() {
                    DeviceDirection::Input
                } else if d.can_duplex() {
                    DeviceDirection::Duplex
                } else {
                    DeviceDirection::Unknown
                });
            }
            DeviceDirection::Output => d.can_output(),
            DeviceDirection::Input => d.can_input(),
            DeviceDirection::Duplex => d.can_duplex(),
        };
        if supported {
            Ok(requested)
        } else {
            Err(self.unsupported(requested))
        }
    }

    fn unsupported(&self, requested: DeviceDirection) -> DirectionError {
        DirectionError::Unsupported {
            device: self.device.name().to_owned(),
            requested,
        }
    }

    /// Derives the default output stream parameters, replacing any previous ones.
    ///
    /// Stereo if the device has at least two output channels, its channel count otherwise; the
    /// session's sample format; the device's high output latency.
    pub fn set_default_output_params(&mut self) -> Result<(), DirectionError> {
        if !self.device.can_output() {
            return Err(self.unsupported(DeviceDirection::Output));
        }
        self.output = Some(StreamParameters {
            device: self.device.index(),
            channel_count: self.device.max_output_channels().min(2),
            sample_format: self.sample_format,
            suggested_latency: self.device.default_high_output_latency(),
        });
        Ok(())
    }

    /// Derives the default input stream parameters, replacing any previous ones.
    pub fn set_default_input_params(&mut self) -> Result<(), DirectionError> {
        if !self.device.can_input() {
            return Err(self.unsupported(DeviceDirection::Input));
        }
        self.input = Some(StreamParameters {
            device: self.device.index(),
            channel_count: self.device.max_input_channels().min(2),
            sample_format: self.sample_format,
            suggested_latency: self.device.default_high_input_latency(),
        });
        Ok(())
    }

    /// The name of the bound device.
    pub fn name(&self) -> &str {
        self.device.name()
    }

    /// The device this session is bound to.
    pub fn system_device(&self) -> &SystemDevice {
        &self.device
    }

    /// The direction this session was bound to.
    pub fn direction(&self) -> DeviceDirection {
        self.direction
    }

    /// The sample format used for every stream parameter block of this session.
    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    /// The default sample rate of the bound device.
    pub fn default_sample_rate(&self) -> SampleRate {
        self.device.default_sample_rate()
    }

    /// Whether this session plays back, i.e. is `Output` or `Duplex`.
    pub fn is_output(&self) -> bool {
        self.direction.is_output()
    }

    /// Whether this session captures, i.e. is `Input` or `Duplex`.
    pub fn is_input(&self) -> bool {
        self.direction.is_input()
    }

    /// Whether this session was bound as `Duplex`.
    pub fn is_duplex(&self) -> bool {
        self.direction == DeviceDirection::Duplex
    }

    /// Whether output stream parameters have been derived.
    pub fn has_output_params(&self) -> bool {
        self.output.is_some()
    }

    /// Whether input stream parameters have been derived.
    pub fn has_input_params(&self) -> bool {
        self.input.is_some()
    }

    /// The derived output stream parameters, if any.
    pub fn output_params(&self) -> Option<&StreamParameters> {
        self.output.as_ref()
    }

    /// The derived input stream parameters, if any.
    pub fn input_params(&self) -> Option<&StreamParameters> {
        self.input.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::custom::{CustomBackend, CustomDevice};
    use crate::traits::Backend;
    use crate::{HostApiIndex, I24};

    fn device(input: ChannelCount, output: ChannelCount) -> SystemDevice {
        let backend = CustomBackend::builder()
            .device(
                CustomDevice::new("dev", HostApiIndex(0))
                    .channels(input, output)
                    .high_latency(Duration::from_millis(80), Duration::from_millis(120)),
            )
            .build();
        SystemDevice::new(backend.device_info(DeviceIndex(0)).unwrap(), DeviceIndex(7))
    }

    #[test]
    fn explicit_output() {
        let session = Device::new(device(0, 2), DeviceDirection::Output).unwrap();
        assert!(session.is_output());
        assert!(!session.is_input());
        assert!(session.has_output_params());
        assert!(!session.has_input_params());
        assert_eq!(
            session.output_params(),
            Some(&StreamParameters {
                device: DeviceIndex(7),
                channel_count: 2,
                sample_format: SampleFormat::F32,
                suggested_latency: Duration::from_millis(120),
            })
        );
    }

    #[test]
    fn output_on_input_only_device_fails() {
        let err = Device::new(device(2, 0), DeviceDirection::Output).unwrap_err();
        assert_eq!(
            err,
            DirectionError::Unsupported {
                device: "dev".to_owned(),
                requested: DeviceDirection::Output,
            }
        );
    }

    #[test]
    fn duplex_is_never_downgraded() {
        assert!(Device::new(device(0, 2), DeviceDirection::Duplex).is_err());
        assert!(Device::new(device(2, 0), DeviceDirection::Duplex).is_err());

        let session = Device::new(device(1, 2), DeviceDirection::Duplex).unwrap();
        assert!(session.is_duplex());
        assert!(session.is_input() && session.is_output());
        assert!(session.has_input_params() && session.has_output_params());
        assert_eq!(session.input_params().unwrap().channel_count, 1);
        assert_eq!(
            session.input_params().unwrap().suggested_latency,
            Duration::from_millis(80)
        );
    }

    #[test]
    fn auto_direction_prefers_output() {
        let session = Device::new(device(2, 2), DeviceDirection::Unknown).unwrap();
        assert_eq!(session.direction(), DeviceDirection::Output);
        assert!(!session.has_input_params());

        let session = Device::new(device(2, 0), DeviceDirection::Unknown).unwrap();
        assert_eq!(session.direction(), DeviceDirection::Input);
        assert!(session.has_input_params());
    }

    #[test]
    fn auto_direction_on_unusable_device() {
        let session = Device::new(device(0, 0), DeviceDirection::Unknown).unwrap();
        assert_eq!(session.direction(), DeviceDirection::Unknown);
        assert!(!session.is_output() && !session.is_input());
        assert!(!session.has_output_params() && !session.has_input_params());
    }

    #[test]
    fn channel_count_is_capped_at_stereo() {
        for (max, expected) in [(1, 1), (2, 2), (6, 2)] {
            let session = Device::new(device(0, max), DeviceDirection::Output).unwrap();
            assert_eq!(session.output_params().unwrap().channel_count, expected);
        }
    }

    #[test]
    fn rederiving_is_idempotent() {
        let mut session = Device::new(device(2, 2), DeviceDirection::Output).unwrap();
        let before = *session.output_params().unwrap();
        session.set_default_output_params().unwrap();
        assert_eq!(session.output_params(), Some(&before));

        session.set_default_input_params().unwrap();
        assert!(session.has_input_params());
        assert_eq!(session.direction(), DeviceDirection::Output);
    }

    #[test]
    fn deriving_unsupported_direction_fails() {
        let mut session = Device::new(device(0, 2), DeviceDirection::Output).unwrap();
        assert!(session.set_default_input_params().is_err());
        assert!(!session.has_input_params());
    }

    #[test]
    fn sample_format_flows_into_params() {
        let session =
            Device::with_sample_type::<I24>(device(0, 2), DeviceDirection::Output).unwrap();
        assert_eq!(session.sample_format(), SampleFormat::I24);
        assert_eq!(
            session.output_params().unwrap().sample_format,
            SampleFormat::I24
        );

        let session =
            Device::with_sample_format(device(2, 0), DeviceDirection::Input, SampleFormat::I16)
                .unwrap();
        assert_eq!(
            session.input_params().unwrap().sample_format,
            SampleFormat::I16
        );
    }
}
