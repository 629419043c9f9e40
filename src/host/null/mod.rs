use crate::traits::{Backend, DeviceInfo, HostApiInfo};
use crate::{BackendSpecificError, DeviceIndex, HostApiIndex};

/// The backend used on platforms without a compiled-in native subsystem.
///
/// It initializes successfully and exposes no host APIs and no devices, so an
/// [`Audio`](crate::Audio) built on it fails with
/// [`AudioError::NoValidBackend`](crate::AudioError::NoValidBackend).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NullBackend;

impl Backend for NullBackend {
    fn initialize(&self) -> Result<(), BackendSpecificError> {
        Ok(())
    }

    fn terminate(&self) {}

    fn version_text(&self) -> String {
        "null".to_owned()
    }

    #[inline]
    fn device_count(&self) -> usize {
        0
    }

    #[inline]
    fn host_api_count(&self) -> usize {
        0
    }

    #[inline]
    fn device_info(&self, _index: DeviceIndex) -> Option<DeviceInfo> {
        None
    }

    #[inline]
    fn host_api_info(&self, _index: HostApiIndex) -> Option<HostApiInfo> {
        None
    }

    #[inline]
    fn host_api_type_to_index(&self, _type_id: u32) -> Option<HostApiIndex> {
        None
    }

    #[inline]
    fn default_output_device(&self) -> Option<DeviceIndex> {
        None
    }

    #[inline]
    fn default_input_device(&self) -> Option<DeviceIndex> {
        None
    }

    #[inline]
    fn default_host_api(&self) -> Option<HostApiIndex> {
        None
    }
}
