use std::sync::Arc;
use std::time::Duration;

use audiohost::host::custom::{CustomBackend, CustomDevice, CustomHostApi};
use audiohost::{
    Audio, AudioError, Device, DeviceDirection, DirectionError, HostApiIndex, HostId, Runtime,
    SampleFormat, SystemDevice,
};

fn devices() -> Vec<SystemDevice> {
    let backend = CustomBackend::builder()
        .host_api(CustomHostApi::new("Core Audio", HostId::CoreAudio))
        .device(
            CustomDevice::new("Built-in Microphone", HostApiIndex(0))
                .input_channels(2),
        )
        .device(
            CustomDevice::new("Surround", HostApiIndex(0))
                .output_channels(6)
                .high_latency(Duration::from_millis(90), Duration::from_millis(75)),
        )
        .device(
            CustomDevice::new("Mono Speaker", HostApiIndex(0))
                .output_channels(1),
        )
        .device(CustomDevice::new("Headset", HostApiIndex(0)).channels(1, 2))
        .build();
    let audio = Audio::with_runtime(Runtime::with_backend(Arc::new(backend)).unwrap()).unwrap();
    audio.current_api().devices().to_vec()
}

#[test]
fn duplex_capability_is_input_and_output() {
    for device in devices() {
        assert_eq!(
            device.can_duplex(),
            device.can_input() && device.can_output()
        );
    }
}

#[test]
fn output_session_requires_output_capability() {
    let devices = devices();
    let err = Device::new(devices[0].clone(), DeviceDirection::Output).unwrap_err();
    assert!(matches!(
        err,
        DirectionError::Unsupported {
            requested: DeviceDirection::Output,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "device \"Built-in Microphone\" does not support Output streams"
    );

    let session = Device::new(devices[1].clone(), DeviceDirection::Output).unwrap();
    assert!(session.is_output());
    assert!(session.has_output_params());
    assert!(!session.has_input_params());
    let params = session.output_params().unwrap();
    assert_eq!(params.channel_count, 2);
    assert_eq!(params.sample_format, SampleFormat::F32);
    assert_eq!(params.suggested_latency, Duration::from_millis(75));
}

#[test]
fn channel_count_is_capped_at_stereo() {
    let devices = devices();
    let surround = Device::new(devices[1].clone(), DeviceDirection::Output).unwrap();
    let mono = Device::new(devices[2].clone(), DeviceDirection::Output).unwrap();
    assert_eq!(surround.output_params().unwrap().channel_count, 2);
    assert_eq!(mono.output_params().unwrap().channel_count, 1);
}

#[test]
fn auto_direction() {
    for device in devices() {
        let session = Device::new(device.clone(), DeviceDirection::Unknown).unwrap();
        if device.can_output() {
            assert!(session.is_output());
        } else {
            assert_eq!(session.direction(), DeviceDirection::Input);
        }
    }
}

#[test]
fn duplex_session_on_headset() {
    let devices = devices();
    let session = Device::new(devices[3].clone(), DeviceDirection::Duplex).unwrap();
    assert!(session.is_duplex());
    assert_eq!(session.input_params().unwrap().channel_count, 1);
    assert_eq!(session.output_params().unwrap().channel_count, 2);

    assert!(Device::new(devices[1].clone(), DeviceDirection::Duplex).is_err());
}

#[test]
fn direction_errors_convert_into_audio_errors() {
    fn open(device: SystemDevice) -> Result<Device, AudioError> {
        Ok(Device::new(device, DeviceDirection::Input)?)
    }
    let devices = devices();
    assert!(matches!(
        open(devices[2].clone()),
        Err(AudioError::Direction(_))
    ));
    assert!(open(devices[0].clone()).is_ok());
}

#[test]
fn failed_initialization() {
    let backend = CustomBackend::builder()
        .fail_initialization("no sound card")
        .build();
    let err = Runtime::with_backend(Arc::new(backend)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "the audio subsystem failed to initialize: A backend-specific error has occurred: no sound card"
    );
}
