use std::sync::Arc;

use audiohost::host::custom::{CustomBackend, CustomDevice, CustomHostApi};
use audiohost::{Audio, DeviceIndex, HostApiIndex, HostId, Runtime};

fn backend() -> CustomBackend {
    CustomBackend::builder()
        .version("PortAudio V19.7.0-devel")
        .host_api(CustomHostApi::new("ALSA", HostId::Alsa))
        .host_api(CustomHostApi::new(
            "JACK Audio Connection Kit",
            HostId::Jack,
        ))
        .device(
            CustomDevice::new("HDA Intel PCH: ALC3246 Analog", HostApiIndex(0))
                .channels(2, 2),
        )
        .device(
            CustomDevice::new("HDA Intel PCH: HDMI 0", HostApiIndex(0))
                .output_channels(8),
        )
        .device(
            CustomDevice::new("USB Microphone", HostApiIndex(0))
                .input_channels(1),
        )
        .device(CustomDevice::new("system", HostApiIndex(1)).channels(2, 2))
        .default_output_device(DeviceIndex(3))
        .build()
}

fn audio() -> Audio {
    Audio::with_runtime(Runtime::with_backend(Arc::new(backend())).unwrap()).unwrap()
}

#[test]
fn devices_belong_to_their_host_api() {
    let audio = audio();
    for (i, api) in audio.host_apis().iter().enumerate() {
        assert!(api
            .devices()
            .iter()
            .all(|d| d.host_api() == HostApiIndex(i)));
    }
    let alsa = audio.find_host_api(HostId::Alsa).unwrap();
    let indices: Vec<_> = alsa.devices().iter().map(|d| d.index()).collect();
    assert_eq!(
        indices,
        vec![DeviceIndex(0), DeviceIndex(1), DeviceIndex(2)]
    );
    assert_eq!(alsa.catalog().count(), 4);
}

#[test]
fn refresh_yields_the_same_apis() {
    let mut audio = audio();
    let names = |audio: &Audio| {
        audio
            .host_apis()
            .iter()
            .map(|a| (a.name().to_owned(), a.host_id()))
            .collect::<Vec<_>>()
    };
    let before = names(&audio);
    audio.refresh();
    assert_eq!(before, names(&audio));
}

#[test]
fn lookups_by_name_and_id_agree() {
    let audio = audio();
    assert!(audio.find_host_api_by_name("nonexistent").is_none());
    let by_name = audio
        .find_host_api_by_name("JACK Audio Connection Kit")
        .unwrap();
    let by_id = audio.find_host_api(by_name.host_id()).unwrap();
    assert_eq!(by_name.name(), by_id.name());
    assert_eq!(by_id.host_id(), HostId::Jack);
}

#[test]
fn default_output_instance_switches_current_api() {
    let mut audio = audio();
    assert_eq!(audio.current_api().host_id(), HostId::Alsa);

    let device = audio.default_output_device_instance().unwrap().unwrap();
    assert_eq!(audio.current_api().host_id(), HostId::Jack);
    assert!(device.is_output());
    assert_eq!(device.name(), "system");
    assert_eq!(device.output_params().unwrap().device, DeviceIndex(3));
}

#[test]
fn stale_api_default_falls_back_to_first_device() {
    let backend = CustomBackend::builder()
        .host_api(
            CustomHostApi::new("MME", HostId::Mme)
                .default_output_device(DeviceIndex(2)),
        )
        .host_api(CustomHostApi::new("Windows WASAPI", HostId::Wasapi))
        .device(
            CustomDevice::new("Microsoft Sound Mapper - Output", HostApiIndex(0))
                .output_channels(2),
        )
        .device(
            CustomDevice::new("Speakers", HostApiIndex(0))
                .output_channels(2),
        )
        .device(
            CustomDevice::new("Speakers", HostApiIndex(1))
                .output_channels(2),
        )
        .build();
    let audio = Audio::with_runtime(Runtime::with_backend(Arc::new(backend)).unwrap()).unwrap();
    let mme = audio.find_host_api(HostId::Mme).unwrap();
    assert_eq!(mme.default_output_device().unwrap().index(), DeviceIndex(0));
}

#[test]
fn catalogs_keep_the_runtime_alive() {
    let backend = Arc::new(backend());
    let audio = Audio::with_runtime(Runtime::with_backend(backend.clone()).unwrap()).unwrap();
    let jack = audio.find_host_api(HostId::Jack).unwrap();
    assert_eq!(audio.build_info(), "PortAudio V19.7.0-devel");

    drop(audio);
    assert_eq!(backend.terminations(), 0);
    assert_eq!(jack.devices().len(), 1);

    drop(jack);
    assert_eq!(backend.initializations(), 1);
    assert_eq!(backend.terminations(), 1);
}
