use std::cmp;
use std::time::Duration;

use alsa::{device_name::HintIter, pcm::HwParams, Direction, PCM};

use crate::traits::DeviceInfo;
use crate::{BackendSpecificError, ChannelCount, HostApiIndex, SampleRate};

// ALSA reports no latency hints of its own, these are the conventional defaults.
const DEFAULT_LOW_LATENCY: Duration = Duration::from_millis(10);
const DEFAULT_HIGH_LATENCY: Duration = Duration::from_millis(40);
const PREFERRED_SAMPLE_RATE: u32 = 44_100;
const MAX_CHANNELS: u32 = 32;

struct Probe {
    channels: ChannelCount,
    rate_min: u32,
    rate_max: u32,
}

/// Lists every PCM device that can be opened for playback or capture.
pub(super) fn enumerate_devices() -> Result<Vec<DeviceInfo>, BackendSpecificError> {
    let hints = HintIter::new_str(None, "pcm").map_err(unhandled_error)?;
    let mut devices = Vec::new();
    for hint in hints {
        // skip null device
        let name = match hint.name {
            Some(ref name) if name == "null" => continue,
            Some(name) => name,
            None => continue,
        };
        let output = probe(&name, Direction::Playback);
        let input = probe(&name, Direction::Capture);
        if output.is_none() && input.is_none() {
            log::trace!("skipping ALSA device {}: cannot be opened", name);
            continue;
        }
        devices.push(device_info(name, input, output));
    }
    Ok(devices)
}

fn probe(name: &str, direction: Direction) -> Option<Probe> {
    let handle = PCM::new(name, direction, true).ok()?;
    let hw_params = HwParams::any(&handle).ok()?;
    // cap at 32 channels.
    let channels = cmp::min(hw_params.get_channels_max().ok()?, MAX_CHANNELS);
    Some(Probe {
        channels: channels as ChannelCount,
        rate_min: hw_params.get_rate_min().ok()?,
        rate_max: hw_params.get_rate_max().ok()?,
    })
}

fn device_info(name: String, input: Option<Probe>, output: Option<Probe>) -> DeviceInfo {
    let rate = output
        .as_ref()
        .or(input.as_ref())
        .map(|p| {
            if (p.rate_min..=p.rate_max).contains(&PREFERRED_SAMPLE_RATE) {
                PREFERRED_SAMPLE_RATE
            } else {
                p.rate_max
            }
        })
        .unwrap_or(PREFERRED_SAMPLE_RATE);
    DeviceInfo {
        name,
        host_api: HostApiIndex(0),
        max_input_channels: input.map_or(0, |p| p.channels),
        max_output_channels: output.map_or(0, |p| p.channels),
        default_low_input_latency: DEFAULT_LOW_LATENCY,
        default_low_output_latency: DEFAULT_LOW_LATENCY,
        default_high_input_latency: DEFAULT_HIGH_LATENCY,
        default_high_output_latency: DEFAULT_HIGH_LATENCY,
        default_sample_rate: SampleRate(rate),
    }
}

/// A simple function to help handling unexpected errors by casting them to string and wrapping
/// them in BackendSpecificError
fn unhandled_error(error: alsa::Error) -> BackendSpecificError {
    BackendSpecificError {
        description: error.to_string(),
    }
}
