//! Lists the host APIs and devices of the platform's audio backend, then opens a session on the
//! default output device.
//!
//! Set `RUST_LOG=debug` to see how the runtime and catalogs are driven.

use audiohost::{Audio, Device, DeviceDirection, HostId, HostSelection, Runtime};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "audiohost enumeration example", long_about = None)]
struct Opt {
    /// Name of the host API to start from, e.g. "ALSA"
    #[arg(long, value_name = "HOST")]
    host: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::parse();

    let runtime = Runtime::platform()?;
    println!("Build info:\n  {}", runtime.build_info());
    println!("Known hosts:\n  {:?}", audiohost::ALL_HOSTS);

    let mut audio = Audio::open(runtime, HostSelection::Default)?;
    if let Some(name) = opt.host.as_deref() {
        let api = audio
            .find_host_api_by_name(name)
            .ok_or_else(|| anyhow::anyhow!("no host api named \"{name}\""))?;
        audio.set_current_api(api);
    }
    println!("Current host api:\n  {}", audio.current_api().name());

    for api in audio.host_apis() {
        println!("{} ({})", api.name(), api.host_id());
        if api.host_id() == HostId::InDevelopment {
            println!("  type id {}", api.info().type_id);
        }
        let default_in = api.default_input_device().map(|d| d.name().to_owned());
        let default_out = api.default_output_device().map(|d| d.name().to_owned());
        println!("  Default Input Device:\n    {:?}", default_in);
        println!("  Default Output Device:\n    {:?}", default_out);

        println!("  Devices: ");
        for device in api.devices() {
            println!("  {}. \"{}\"", device.index(), device.name());
            println!(
                "    channels: {} in, {} out; {} Hz",
                device.max_input_channels(),
                device.max_output_channels(),
                device.default_sample_rate().0
            );
            if let Ok(session) = Device::new(device.clone(), DeviceDirection::Unknown) {
                if let Some(params) = session.output_params() {
                    println!("    Default output stream parameters:\n      {:?}", params);
                }
                if let Some(params) = session.input_params() {
                    println!("    Default input stream parameters:\n      {:?}", params);
                }
            }
        }
    }

    match audio.default_output_device_instance()? {
        Some(device) => println!(
            "Default output session:\n  {} on {}\n  {:?}",
            device.name(),
            audio.current_api().name(),
            device.output_params()
        ),
        None => println!("No default output device"),
    }

    Ok(())
}
