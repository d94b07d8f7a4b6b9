//! Monotonic and wall-clock time sources.
//!
//! - Monotonic milliseconds drive every soft timer in the monitor loop.
//!   On ESP-IDF this wraps `esp_timer_get_time()`; on the host it falls
//!   back to `std::time::Instant`.
//! - Wall-clock time is SNTP-synced and only consulted when a history
//!   record is stamped.  Until the first sync completes the adapter
//!   reports `None` and the record goes out with an `"N/A"` stamp.

use core::fmt::Write as _;

use crate::app::ports::WallClock;

/// Timezone for history timestamps (UTC+7, Indochina Time).
#[cfg(target_os = "espidf")]
const POSIX_TZ: &core::ffi::CStr = c"ICT-7";

/// Anything earlier than 2020-01-01 means SNTP has not synced yet.
#[cfg(target_os = "espidf")]
const EPOCH_2020: i64 = 1_577_836_800;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot.  Wraps at `u32::MAX` (~49.7 days); every
    /// consumer compares with wrapping arithmetic.
    #[cfg(target_os = "espidf")]
    pub fn now_ms(&self) -> u32 {
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1_000) as u32
    }

    /// Milliseconds since construction.
    #[cfg(not(target_os = "espidf"))]
    pub fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SystemClock {
    #[cfg(target_os = "espidf")]
    fn now_formatted(&self) -> Option<heapless::String<20>> {
        use esp_idf_svc::sys::{gettimeofday, localtime_r, time_t, timeval, tm};

        let mut tv = timeval { tv_sec: 0, tv_usec: 0 };
        // SAFETY: gettimeofday writes into the provided struct only.
        if unsafe { gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return None;
        }
        if (tv.tv_sec as i64) < EPOCH_2020 {
            return None;
        }

        let secs = tv.tv_sec as time_t;
        // SAFETY: localtime_r writes into the zeroed tm and returns it.
        let mut broken: tm = unsafe { core::mem::zeroed() };
        if unsafe { localtime_r(&secs, &mut broken) }.is_null() {
            return None;
        }

        let mut out = heapless::String::new();
        write!(
            out,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            broken.tm_year + 1900,
            broken.tm_mon + 1,
            broken.tm_mday,
            broken.tm_hour,
            broken.tm_min,
            broken.tm_sec
        )
        .ok()?;
        Some(out)
    }

    /// No wall clock off-target.
    #[cfg(not(target_os = "espidf"))]
    fn now_formatted(&self) -> Option<heapless::String<20>> {
        None
    }
}

/// Start SNTP and set the local timezone.  The returned handle must stay
/// alive for the sync to complete; drop it and SNTP stops.
#[cfg(target_os = "espidf")]
pub fn start_sntp() -> Result<esp_idf_svc::sntp::EspSntp<'static>, esp_idf_svc::sys::EspError> {
    // SAFETY: setenv/tzset before the loop starts, single-threaded.
    unsafe {
        esp_idf_svc::sys::setenv(c"TZ".as_ptr(), POSIX_TZ.as_ptr(), 1);
        esp_idf_svc::sys::tzset();
    }
    let sntp = esp_idf_svc::sntp::EspSntp::new_default()?;
    log::info!("sntp: started (TZ=ICT-7), timestamps degrade to N/A until synced");
    Ok(sntp)
}
