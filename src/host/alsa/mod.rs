mod enumerate;

use std::sync::{PoisonError, RwLock};

use crate::traits::{Backend, DeviceInfo, HostApiInfo};
use crate::{BackendSpecificError, DeviceIndex, HostApiIndex, HostId};

/// The default linux and bsd backend.
///
/// ALSA is exposed as a single host API. The PCM devices are listed and probed once, when the
/// backend is initialized, and the snapshot is dropped again on termination.
#[derive(Debug, Default)]
pub struct AlsaBackend {
    devices: RwLock<Vec<DeviceInfo>>,
}

impl AlsaBackend {
    pub fn new() -> Self {
        AlsaBackend::default()
    }

    fn with_devices<T>(&self, f: impl FnOnce(&[DeviceInfo]) -> T) -> T {
        let devices = self.devices.read().unwrap_or_else(PoisonError::into_inner);
        f(&devices)
    }

    fn default_device(&self, capable: fn(&DeviceInfo) -> bool) -> Option<DeviceIndex> {
        self.with_devices(|devices| {
            devices
                .iter()
                .position(|d| d.name == "default" && capable(d))
                .or_else(|| devices.iter().position(capable))
                .map(DeviceIndex)
        })
    }
}

impl Backend for AlsaBackend {
    fn initialize(&self) -> Result<(), BackendSpecificError> {
        let devices = enumerate::enumerate_devices()?;
        log::debug!("found {} ALSA devices", devices.len());
        *self.devices.write().unwrap_or_else(PoisonError::into_inner) = devices;
        Ok(())
    }

    fn terminate(&self) {
        self.devices
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn version_text(&self) -> String {
        "ALSA (audiohost)".to_owned()
    }

    fn device_count(&self) -> usize {
        self.with_devices(|devices| devices.len())
    }

    fn host_api_count(&self) -> usize {
        1
    }

    fn device_info(&self, index: DeviceIndex) -> Option<DeviceInfo> {
        self.with_devices(|devices| devices.get(index.0).cloned())
    }

    fn host_api_info(&self, index: HostApiIndex) -> Option<HostApiInfo> {
        if index != HostApiIndex(0) {
            return None;
        }
        Some(HostApiInfo {
            name: HostId::Alsa.name().to_owned(),
            type_id: HostId::Alsa.type_id(),
            device_count: self.device_count(),
            default_input_device: self.default_input_device(),
            default_output_device: self.default_output_device(),
        })
    }

    fn host_api_type_to_index(&self, type_id: u32) -> Option<HostApiIndex> {
        (type_id == HostId::Alsa.type_id()).then_some(HostApiIndex(0))
    }

    fn default_output_device(&self) -> Option<DeviceIndex> {
        self.default_device(|d| d.max_output_channels > 0)
    }

    fn default_input_device(&self) -> Option<DeviceIndex> {
        self.default_device(|d| d.max_input_channels > 0)
    }

    fn default_host_api(&self) -> Option<HostApiIndex> {
        Some(HostApiIndex(0))
    }
}
