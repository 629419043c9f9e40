use crate::traits::HostApiInfo;
use crate::{DeviceCatalog, DeviceIndex, HostApiIndex, HostId, Runtime, SystemDevice};

/// One audio backend family offered by the native subsystem, together with its devices.
///
/// Cloning a `HostApi` deep-copies its device cache: the copy is an independent snapshot and
/// refreshing one never affects the other.
#[derive(Debug, Clone)]
pub struct HostApi {
    devices: DeviceCatalog,
    host_id: HostId,
    index: HostApiIndex,
    info: HostApiInfo,
}

impl HostApi {
    pub(crate) fn new(runtime: Runtime, index: HostApiIndex, info: HostApiInfo) -> Self {
        let host_id = HostId::try_from(info.type_id).unwrap_or_else(|err| {
            log::warn!(
                "host api \"{}\": {}, treating it as in development",
                info.name,
                err
            );
            HostId::InDevelopment
        });
        HostApi {
            devices: DeviceCatalog::new(runtime, info.type_id),
            host_id,
            index,
            info,
        }
    }

    /// The name reported by the native subsystem.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// The identity of this host API's family.
    pub fn host_id(&self) -> HostId {
        self.host_id
    }

    /// The native index of this host API, as the devices it owns record it.
    pub fn index(&self) -> HostApiIndex {
        self.index
    }

    /// The native information this host API was created from.
    pub fn info(&self) -> &HostApiInfo {
        &self.info
    }

    /// The devices owned by this host API, read on first use.
    pub fn devices(&self) -> &[SystemDevice] {
        self.devices.devices()
    }

    /// The device catalog backing [`devices`](Self::devices).
    pub fn catalog(&self) -> &DeviceCatalog {
        &self.devices
    }

    /// The runtime this host API was enumerated from.
    pub fn runtime(&self) -> &Runtime {
        self.devices.runtime()
    }

    /// Finds a device of this host API by its global index.
    pub fn device(&self, index: DeviceIndex) -> Option<&SystemDevice> {
        self.devices().iter().find(|d| d.index() == index)
    }

    /// Reads this host API's device list from the native subsystem again.
    pub fn refresh(&mut self) {
        self.devices.populate();
    }

    /// The default output device of this host API.
    ///
    /// If the default recorded by the native subsystem is not one of this host API's devices,
    /// the first device of this host API is returned instead. Returns `None` only if this host
    /// API has no devices at all.
    pub fn default_output_device(&self) -> Option<SystemDevice> {
        self.default_or_first(self.info.default_output_device)
    }

    /// The default input device of this host API, with the same fallback as
    /// [`default_output_device`](Self::default_output_device).
    pub fn default_input_device(&self) -> Option<SystemDevice> {
        self.default_or_first(self.info.default_input_device)
    }

    fn default_or_first(&self, recorded: Option<DeviceIndex>) -> Option<SystemDevice> {
        recorded
            .and_then(|index| self.device(index))
            .or_else(|| {
                log::trace!(
                    "host api \"{}\": default device {:?} not found, using the first device",
                    self.info.name,
                    recorded
                );
                self.devices().first()
            })
            .cloned()
    }
}

/// The host APIs available on the machine, in native enumeration order.
///
/// A host API the native subsystem cannot describe is left out, so the position of a host API
/// in [`apis`](Self::apis) is not necessarily its native index.
#[derive(Debug)]
pub struct HostApiCatalog {
    runtime: Runtime,
    apis: Vec<HostApi>,
}

impl HostApiCatalog {
    /// Creates the catalog and enumerates the host APIs once.
    pub fn new(runtime: Runtime) -> Self {
        let mut catalog = HostApiCatalog {
            runtime,
            apis: Vec::new(),
        };
        catalog.enumerate();
        catalog
    }

    /// Rebuilds the list of host APIs from the native subsystem.
    pub fn enumerate(&mut self) {
        self.apis = (0..self.runtime.api_count())
            .map(HostApiIndex)
            .filter_map(|index| match self.runtime.host_api_info(index) {
                Some(info) => Some(HostApi::new(self.runtime.clone(), index, info)),
                None => {
                    log::warn!("skipping host api {}: no host api info", index);
                    None
                }
            })
            .collect();
        log::debug!("enumerated {} host apis", self.apis.len());
    }

    /// The enumerated host APIs.
    pub fn apis(&self) -> &[HostApi] {
        &self.apis
    }

    /// The enumerated host API with the given native index.
    pub fn get(&self, index: HostApiIndex) -> Option<&HostApi> {
        self.apis.iter().find(|api| api.index() == index)
    }

    /// Number of enumerated host APIs.
    pub fn len(&self) -> usize {
        self.apis.len()
    }

    /// Whether no host API was enumerated.
    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }

    /// The system's default host API.
    ///
    /// The native subsystem is asked every time and a fresh `HostApi` is built, independent of
    /// the enumerated list.
    pub fn default_host_api(&self) -> Option<HostApi> {
        let index = self.runtime.default_host_api()?;
        let info = self.runtime.host_api_info(index)?;
        Some(HostApi::new(self.runtime.clone(), index, info))
    }

    /// The runtime the host APIs are enumerated from.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
}
