//! Typed errors for the firmware's fallible subsystems.
//!
//! One enum per subsystem, all `Copy` so they pass through the tick path
//! without allocation.  None of these are fatal: the loop never halts on
//! an error.  A sensor timeout degrades to the sentinel reading, network
//! failures are skipped, and an unsynced clock degrades the history
//! timestamp to "N/A".

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No echo came back within the 30 ms window.  The sampler maps this
    /// to the 999 cm "out of range" sentinel rather than propagating it.
    EchoTimeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EchoTimeout => write!(f, "echo timed out"),
        }
    }
}

impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The I²C transaction to the LCD backpack failed.
    I2cWriteFailed,
    /// The controller did not come out of its init sequence.
    InitFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2cWriteFailed => write!(f, "I2C write failed"),
            Self::InitFailed => write!(f, "LCD init failed"),
        }
    }
}

impl std::error::Error for DisplayError {}

// ---------------------------------------------------------------------------
// Telemetry errors
// ---------------------------------------------------------------------------

/// Failures of the remote-datastore link.  The upload coordinator logs
/// these and moves on — there is deliberately no retry or backoff, and a
/// failed write never blocks the sibling writes of the same cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// The link was never established or has gone away.
    NotReady,
    /// The HTTP request could not be sent.
    RequestFailed,
    /// The datastore answered with a non-success status.
    Rejected(u16),
    /// The record could not be serialised.
    EncodeFailed,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "link not ready"),
            Self::RequestFailed => write!(f, "request failed"),
            Self::Rejected(status) => write!(f, "rejected (HTTP {status})"),
            Self::EncodeFailed => write!(f, "record encode failed"),
        }
    }
}

impl std::error::Error for TelemetryError {}
