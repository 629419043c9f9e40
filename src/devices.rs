use std::cell::OnceCell;

use crate::{DeviceIndex, Runtime, SystemDevice};

/// The devices owned by one host API.
///
/// The list is read from the native subsystem the first time it is requested and cached from
/// then on. It is either empty or complete: a half-populated list is never observable.
///
/// Cloning a catalog copies its cache, populated or not. The copy is independent of the
/// original.
#[derive(Debug, Clone)]
pub struct DeviceCatalog {
    runtime: Runtime,
    type_id: u32,
    devices: OnceCell<Vec<SystemDevice>>,
}

impl DeviceCatalog {
    /// A catalog of the devices owned by the host API with the given native type id.
    pub(crate) fn new(runtime: Runtime, type_id: u32) -> Self {
        DeviceCatalog {
            runtime,
            type_id,
            devices: OnceCell::new(),
        }
    }

    /// The number of devices of the whole system, not only of this catalog's host API.
    pub fn count(&self) -> usize {
        self.runtime.device_count()
    }

    /// The devices of this catalog's host API, in global index order.
    pub fn devices(&self) -> &[SystemDevice] {
        self.devices.get_or_init(|| self.enumerate())
    }

    /// The runtime this catalog reads from.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Whether the device list has been read from the native subsystem.
    pub fn is_populated(&self) -> bool {
        self.devices.get().is_some()
    }

    /// Reads the device list from the native subsystem again, replacing the cached one.
    pub fn populate(&mut self) {
        self.devices = OnceCell::from(self.enumerate());
    }

    fn enumerate(&self) -> Vec<SystemDevice> {
        let Some(api_index) = self.runtime.host_api_type_to_index(self.type_id) else {
            log::debug!("no host api with type id {}", self.type_id);
            return Vec::new();
        };
        let devices: Vec<_> = (0..self.runtime.device_count())
            .map(DeviceIndex)
            .filter_map(|index| match self.runtime.device_info(index) {
                Some(info) => Some(SystemDevice::new(info, index)),
                None => {
                    log::warn!("skipping device {}: no device info", index);
                    None
                }
            })
            .filter(|device| device.host_api() == api_index)
            .collect();
        log::trace!(
            "host api {} owns {} of {} devices",
            api_index,
            devices.len(),
            self.count()
        );
        devices
    }
}
