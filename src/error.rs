use thiserror::Error;

use crate::{DeviceDirection, HostApiIndex};

/// Some error has occurred that is specific to the backend from which it was produced.
///
/// This error is often used as a catch-all in cases where:
///
/// - It is unclear exactly what error might be produced by the native audio subsystem.
/// - It does not make sense to add a variant to the enclosing error type.
///
/// **Note:** If you notice a `BackendSpecificError` that you believe could be better handled in a
/// cross-platform manner, please add the necessary error variant to the appropriate error enum.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("A backend-specific error has occurred: {description}")]
pub struct BackendSpecificError {
    pub description: String,
}

impl BackendSpecificError {
    pub fn new(description: impl Into<String>) -> Self {
        BackendSpecificError {
            description: description.into(),
        }
    }
}

/// An error that may occur while acquiring a reference to the audio runtime.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// The native audio subsystem could not be initialized.
    ///
    /// Once initialization has failed for a runtime, every later acquisition reports the same
    /// error without attempting to initialize the subsystem again.
    #[error("the audio subsystem failed to initialize: {err}")]
    InitFailed {
        #[source]
        err: BackendSpecificError,
    },
}

/// Returned when a device session is asked for a direction the device cannot provide.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DirectionError {
    /// E.g. an output session was requested on an input-only device.
    #[error("device \"{device}\" does not support {requested} streams")]
    Unsupported {
        device: String,
        requested: DeviceDirection,
    },
}

/// Errors produced by the [`Audio`](crate::Audio) entry point.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No host API could be selected while constructing the `Audio` object.
    #[error("audio object cannot find a valid backend api")]
    NoValidBackend,
    /// The backend reported a device owned by a host API that was not enumerated.
    #[error("host api index {index} is out of range ({count} host apis enumerated)")]
    HostApiOutOfRange { index: HostApiIndex, count: usize },
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Direction(#[from] DirectionError),
}

impl From<BackendSpecificError> for RuntimeError {
    fn from(err: BackendSpecificError) -> Self {
        RuntimeError::InitFailed { err }
    }
}
