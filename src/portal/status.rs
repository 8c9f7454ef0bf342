//! Shared Wi-Fi status snapshots.
//!
//! The Wi-Fi manager task renders its scan results and IP status to JSON on
//! its own schedule and publishes the strings into a slot guarded by a
//! mutex. The portal reads that slot while serving `GET /ap.json` and
//! `GET /status.json`, taking the lock under a short fixed bounded wait and
//! copying the snapshot out before releasing; the portal never holds a
//! reference into the slot past the release. A contended lock is not
//! retried: it surfaces immediately as a 503, and the client polls again.

use alloc::string::String;

/// Why a snapshot could not be read.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusError {
    /// The producer held the lock past the bounded wait.
    Busy,
    /// No snapshot has been published yet.
    Empty,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            StatusError::Busy => defmt::write!(f, "Busy"),
            StatusError::Empty => defmt::write!(f, "Empty"),
        }
    }
}

/// Reader side of the status slot.
///
/// Both accessors acquire the producer's lock within a short fixed bounded
/// wait, clone the snapshot out and release. Implementations map onto
/// whatever mutex the platform offers; [`MutexStatus`] covers `std` hosts.
pub trait SharedStatus {
    /// Copy out the latest scan-result JSON.
    fn ap_list_json(&self) -> Result<String, StatusError>;

    /// Copy out the latest IP/status JSON.
    fn ip_info_json(&self) -> Result<String, StatusError>;
}

impl<T: SharedStatus + ?Sized> SharedStatus for &T {
    fn ap_list_json(&self) -> Result<String, StatusError> {
        (**self).ap_list_json()
    }

    fn ip_info_json(&self) -> Result<String, StatusError> {
        (**self).ip_info_json()
    }
}

#[cfg(feature = "std")]
mod mutex_status {
    use std::sync::{Mutex, MutexGuard, TryLockError};
    use std::time::{Duration, Instant};

    use super::{SharedStatus, StatusError};
    use alloc::string::String;

    #[derive(Debug, Default)]
    struct Snapshot {
        ap_list: Option<String>,
        ip_info: Option<String>,
    }

    /// `std::sync::Mutex`-backed status slot for host targets and tests.
    ///
    /// Shared between the producer task and the portal, typically behind an
    /// `Arc`. The reader side honors the configured bounded wait. The
    /// producer side blocks, but only holds the lock long enough to swap a
    /// string in.
    #[derive(Debug)]
    pub struct MutexStatus {
        slot: Mutex<Snapshot>,
        wait: Duration,
    }

    impl MutexStatus {
        /// Create an empty slot with the default 10 ms reader wait.
        pub fn new() -> Self {
            Self::with_wait(Duration::from_millis(10))
        }

        /// Create an empty slot with a custom reader wait.
        pub fn with_wait(wait: Duration) -> Self {
            Self {
                slot: Mutex::new(Snapshot::default()),
                wait,
            }
        }

        /// Publish a new scan-result snapshot (producer side).
        pub fn set_ap_list(&self, json: &str) {
            let mut guard = self.lock_producer();
            guard.ap_list = Some(String::from(json));
        }

        /// Publish a new IP/status snapshot (producer side).
        pub fn set_ip_info(&self, json: &str) {
            let mut guard = self.lock_producer();
            guard.ip_info = Some(String::from(json));
        }

        fn lock_producer(&self) -> MutexGuard<'_, Snapshot> {
            self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn lock_bounded(&self) -> Option<MutexGuard<'_, Snapshot>> {
            let deadline = Instant::now() + self.wait;
            loop {
                match self.slot.try_lock() {
                    Ok(guard) => return Some(guard),
                    Err(TryLockError::Poisoned(poisoned)) => return Some(poisoned.into_inner()),
                    Err(TryLockError::WouldBlock) => {
                        if Instant::now() >= deadline {
                            return None;
                        }
                        std::thread::yield_now();
                    }
                }
            }
        }
    }

    impl Default for MutexStatus {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SharedStatus for MutexStatus {
        fn ap_list_json(&self) -> Result<String, StatusError> {
            let guard = self.lock_bounded().ok_or(StatusError::Busy)?;
            guard.ap_list.clone().ok_or(StatusError::Empty)
        }

        fn ip_info_json(&self) -> Result<String, StatusError> {
            let guard = self.lock_bounded().ok_or(StatusError::Busy)?;
            guard.ip_info.clone().ok_or(StatusError::Empty)
        }
    }

    impl<T: SharedStatus + ?Sized> SharedStatus for std::sync::Arc<T> {
        fn ap_list_json(&self) -> Result<String, StatusError> {
            (**self).ap_list_json()
        }

        fn ip_info_json(&self) -> Result<String, StatusError> {
            (**self).ip_info_json()
        }
    }
}

#[cfg(feature = "std")]
pub use mutex_status::MutexStatus;
