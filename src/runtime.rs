use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::platform::default_backend;
use crate::traits::{Backend, DeviceInfo, HostApiInfo};
use crate::{BackendSpecificError, DeviceIndex, HostApiIndex, RuntimeError};

/// A reference-counted handle to an initialized native audio subsystem.
///
/// The backend is initialized when the first handle is acquired and terminated when the last
/// handle is dropped. Cloning a `Runtime` acquires another reference to the same backend.
///
/// Every catalog and descriptor produced by audiohost holds a `Runtime`, so the backend stays
/// initialized for as long as anything enumerated from it is alive.
pub struct Runtime {
    shared: Arc<Shared>,
}

struct Shared {
    backend: Arc<dyn Backend>,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    refs: usize,
    failed: Option<BackendSpecificError>,
}

impl Shared {
    fn new(backend: Arc<dyn Backend>) -> Self {
        Shared {
            backend,
            state: Mutex::new(State::default()),
        }
    }

    // Initialization and teardown are not re-entrant, so the lock is held across them.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Runtime {
    /// Acquires a reference to the process-wide runtime of the platform's default backend.
    ///
    /// See [`default_backend`](crate::default_backend) for which backend that is.
    pub fn platform() -> Result<Self, RuntimeError> {
        static PLATFORM: OnceLock<Arc<Shared>> = OnceLock::new();
        let shared = PLATFORM.get_or_init(|| Arc::new(Shared::new(default_backend())));
        Self::acquire(Arc::clone(shared))
    }

    /// Creates a runtime for the given backend and acquires the first reference to it.
    ///
    /// The returned runtime is independent of every other runtime, including one created from the
    /// same backend. Clone the returned handle to share it.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Result<Self, RuntimeError> {
        Self::acquire(Arc::new(Shared::new(backend)))
    }

    fn acquire(shared: Arc<Shared>) -> Result<Self, RuntimeError> {
        {
            let mut state = shared.lock();
            if let Some(err) = &state.failed {
                return Err(err.clone().into());
            }
            if state.refs == 0 {
                log::debug!("initializing {}", shared.backend.version_text());
                if let Err(err) = shared.backend.initialize() {
                    log::warn!("audio backend failed to initialize: {}", err);
                    state.failed = Some(err.clone());
                    return Err(err.into());
                }
            }
            state.refs += 1;
        }
        Ok(Runtime { shared })
    }

    /// Number of live references to this runtime.
    pub fn ref_count(&self) -> usize {
        self.shared.lock().refs
    }

    /// The backend driven by this runtime.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.shared.backend
    }

    /// Version string of the native subsystem.
    pub fn build_info(&self) -> String {
        self.shared.backend.version_text()
    }

    /// Number of devices of all host APIs.
    pub fn device_count(&self) -> usize {
        self.shared.backend.device_count()
    }

    /// Number of host APIs.
    pub fn api_count(&self) -> usize {
        self.shared.backend.host_api_count()
    }

    /// Information about the device with the given global index.
    pub fn device_info(&self, index: DeviceIndex) -> Option<DeviceInfo> {
        self.shared.backend.device_info(index)
    }

    /// Information about the host API with the given index.
    pub fn host_api_info(&self, index: HostApiIndex) -> Option<HostApiInfo> {
        self.shared.backend.host_api_info(index)
    }

    /// The index of the first host API with the given native type id.
    pub fn host_api_type_to_index(&self, type_id: u32) -> Option<HostApiIndex> {
        self.shared.backend.host_api_type_to_index(type_id)
    }

    /// The system's default output device.
    pub fn default_output_device(&self) -> Option<DeviceIndex> {
        self.shared.backend.default_output_device()
    }

    /// The system's default input device.
    pub fn default_input_device(&self) -> Option<DeviceIndex> {
        self.shared.backend.default_input_device()
    }

    /// The system's default host API.
    pub fn default_host_api(&self) -> Option<HostApiIndex> {
        self.shared.backend.default_host_api()
    }

    /// Whether both handles refer to the same runtime.
    pub fn same_runtime(&self, other: &Runtime) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Clone for Runtime {
    fn clone(&self) -> Self {
        // A live handle implies a successful initialization.
        self.shared.lock().refs += 1;
        Runtime {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.refs -= 1;
        if state.refs == 0 {
            log::debug!("terminating {}", self.shared.backend.version_text());
            self.shared.backend.terminate();
        }
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("refs", &self.ref_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::custom::CustomBackend;

    #[test]
    fn initializes_once_and_terminates_with_last_reference() {
        let backend = Arc::new(CustomBackend::builder().build());
        let runtime = Runtime::with_backend(backend.clone()).unwrap();
        let second = runtime.clone();
        let third = second.clone();
        assert_eq!(runtime.ref_count(), 3);
        assert_eq!(backend.initializations(), 1);

        drop(runtime);
        drop(second);
        assert_eq!(third.ref_count(), 1);
        assert_eq!(backend.terminations(), 0);

        drop(third);
        assert_eq!(backend.terminations(), 1);
    }

    #[test]
    fn failed_initialization_is_reported_to_every_acquirer() {
        let backend = Arc::new(
            CustomBackend::builder()
                .fail_initialization("no sound card")
                .build(),
        );
        let shared = Arc::new(Shared::new(backend.clone()));

        let first = Runtime::acquire(Arc::clone(&shared)).unwrap_err();
        let second = Runtime::acquire(Arc::clone(&shared)).unwrap_err();
        assert_eq!(first, second);
        assert!(matches!(first, RuntimeError::InitFailed { .. }));
        assert_eq!(backend.initializations(), 1);
        assert_eq!(backend.terminations(), 0);
    }

    #[test]
    fn reinitializes_after_full_release() {
        let backend = Arc::new(CustomBackend::builder().build());
        let shared = Arc::new(Shared::new(backend.clone()));

        drop(Runtime::acquire(Arc::clone(&shared)).unwrap());
        let again = Runtime::acquire(Arc::clone(&shared)).unwrap();
        assert_eq!(backend.initializations(), 2);
        assert_eq!(backend.terminations(), 1);
        assert!(again.same_runtime(&again.clone()));
    }

    #[test]
    fn independent_runtimes_for_the_same_backend() {
        let backend = Arc::new(CustomBackend::builder().build());
        let a = Runtime::with_backend(backend.clone()).unwrap();
        let b = Runtime::with_backend(backend.clone()).unwrap();
        assert!(!a.same_runtime(&b));
        assert_eq!(a.ref_count(), 1);
        assert_eq!(b.ref_count(), 1);
    }
}
