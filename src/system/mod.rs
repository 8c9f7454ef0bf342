//! System control boundary.
//!
//! Reboots are requested over the wire (`POST /reboot.json` and friends) but
//! carried out by platform code: an implementation typically flips a boot
//! partition or an RTC flag and calls the SoC restart routine. The portal
//! writes its response *before* invoking [`Reboot::reboot`], so the client
//! sees the 200 even when the implementation never returns.

#![deny(unsafe_code)]

/// Target state for a requested reboot.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RebootMode {
    /// Restart into the firmware-update application.
    Ota,
    /// Plain restart of the current firmware.
    Restart,
    /// Restart into the recovery application.
    Recovery,
}

#[cfg(feature = "defmt")]
impl defmt::Format for RebootMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RebootMode::Ota => defmt::write!(f, "Ota"),
            RebootMode::Restart => defmt::write!(f, "Restart"),
            RebootMode::Recovery => defmt::write!(f, "Recovery"),
        }
    }
}

/// Platform reboot controller.
pub trait Reboot {
    /// Reboot the device into the given mode.
    ///
    /// May not return on real hardware. Failures are the implementation's
    /// to report (log, LED, ...); the response has already been sent.
    fn reboot(&mut self, mode: RebootMode);
}
