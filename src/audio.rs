use crate::{
    AudioError, Device, DeviceDirection, DeviceIndex, HostApi, HostApiCatalog, HostId, Runtime,
    SystemDevice,
};

/// How [`Audio`] picks its current host API at construction.
#[derive(Debug, Clone)]
pub enum HostSelection {
    /// The system's default host API.
    Default,
    /// The first enumerated host API with the given identity.
    Id(HostId),
    /// This host API, as given.
    Api(HostApi),
}

/// The entry point of audiohost.
///
/// `Audio` holds a reference to the [`Runtime`], the enumerated host APIs and the host API
/// currently selected. A current host API is always present: construction fails with
/// [`AudioError::NoValidBackend`] if none can be selected.
#[derive(Debug)]
pub struct Audio {
    runtime: Runtime,
    apis: HostApiCatalog,
    current: HostApi,
}

impl Audio {
    /// Selects the default host API of the platform's default backend.
    pub fn new() -> Result<Self, AudioError> {
        Self::open(Runtime::platform()?, HostSelection::Default)
    }

    /// Selects the host API with the given identity on the platform's default backend.
    pub fn from_host_id(host_id: HostId) -> Result<Self, AudioError> {
        Self::open(Runtime::platform()?, HostSelection::Id(host_id))
    }

    /// Adopts `api` as the current host API, on the runtime it was enumerated from.
    pub fn from_host_api(api: HostApi) -> Result<Self, AudioError> {
        let runtime = api.runtime().clone();
        Self::open(runtime, HostSelection::Api(api))
    }

    /// Selects the default host API of the given runtime.
    pub fn with_runtime(runtime: Runtime) -> Result<Self, AudioError> {
        Self::open(runtime, HostSelection::Default)
    }

    /// Enumerates the host APIs of `runtime` and selects the current one.
    pub fn open(runtime: Runtime, selection: HostSelection) -> Result<Self, AudioError> {
        let apis = HostApiCatalog::new(runtime.clone());
        let current = match selection {
            HostSelection::Default => apis.default_host_api(),
            HostSelection::Id(host_id) => apis
                .apis()
                .iter()
                .find(|a| a.host_id() == host_id)
                .cloned(),
            HostSelection::Api(api) => Some(api),
        }
        .ok_or(AudioError::NoValidBackend)?;
        log::debug!(
            "current host api: {} ({})",
            current.name(),
            current.host_id()
        );
        Ok(Audio {
            runtime,
            apis,
            current,
        })
    }

    /// Version string of the native subsystem.
    pub fn build_info(&self) -> String {
        self.runtime.build_info()
    }

    /// The runtime this object was opened on.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// The enumerated host APIs, in native order.
    pub fn host_apis(&self) -> &[HostApi] {
        self.apis.apis()
    }

    /// The host API currently selected.
    pub fn current_api(&self) -> &HostApi {
        &self.current
    }

    /// Makes `api` the current host API.
    pub fn set_current_api(&mut self, api: HostApi) {
        self.current = api;
    }

    /// The system's default host API, queried afresh.
    pub fn default_api(&self) -> Option<HostApi> {
        self.apis.default_host_api()
    }

    /// Enumerates the host APIs again. The current host API is left as it is.
    pub fn refresh(&mut self) {
        self.apis.enumerate();
    }

    /// Returns a copy of the first enumerated host API with the given identity.
    pub fn find_host_api(&self, host_id: HostId) -> Option<HostApi> {
        self.host_apis()
            .iter()
            .find(|a| a.host_id() == host_id)
            .cloned()
    }

    /// Returns a copy of the first enumerated host API with exactly the given name.
    pub fn find_host_api_by_name(&self, name: &str) -> Option<HostApi> {
        self.host_apis().iter().find(|a| a.name() == name).cloned()
    }

    /// An output session on the system's default output device.
    ///
    /// The host APIs are enumerated again and the host API owning the default output device
    /// becomes the current one. Returns `Ok(None)` if the system has no default output device.
    pub fn default_output_device_instance(&mut self) -> Result<Option<Device>, AudioError> {
        let default = self.runtime.default_output_device();
        self.default_device_instance(default, DeviceDirection::Output)
    }

    /// An input session on the system's default input device.
    ///
    /// Like [`default_output_device_instance`](Self::default_output_device_instance), this makes
    /// the owning host API current.
    pub fn default_input_device_instance(&mut self) -> Result<Option<Device>, AudioError> {
        let default = self.runtime.default_input_device();
        self.default_device_instance(default, DeviceDirection::Input)
    }

    fn default_device_instance(
        &mut self,
        default: Option<DeviceIndex>,
        direction: DeviceDirection,
    ) -> Result<Option<Device>, AudioError> {
        self.apis.enumerate();
        let Some(index) = default else {
            log::debug!("no default {} device", direction);
            return Ok(None);
        };
        let Some(info) = self.runtime.device_info(index) else {
            log::warn!("default {} device {} has no device info", direction, index);
            return Ok(None);
        };
        let count = self.runtime.api_count();
        if info.host_api.0 >= count {
            return Err(AudioError::HostApiOutOfRange {
                index: info.host_api,
                count,
            });
        }
        let Some(api) = self.apis.get(info.host_api) else {
            log::warn!(
                "host api {} owning the default {} device was not enumerated",
                info.host_api,
                direction
            );
            return Ok(None);
        };
        self.current = api.clone();

        let system_device = self
            .current
            .device(index)
            .cloned()
            .or_else(|| self.default_of_current(direction));
        match system_device {
            Some(system_device) => Ok(Some(Device::new(system_device, direction)?)),
            None => Ok(None),
        }
    }

    fn default_of_current(&self, direction: DeviceDirection) -> Option<SystemDevice> {
        if direction.is_output() {
            self.current.default_output_device()
        } else {
            self.current.default_input_device()
        }
    }
}
