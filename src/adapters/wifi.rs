//! Boot-time WiFi station connect.
//!
//! The network is joined exactly once, before the monitor loop starts:
//! up to [`BOOT_ATTEMPTS`] half-second waits, then the boot continues
//! either way. There is no runtime reconnection; if the join failed the
//! telemetry link stays down until the next reboot, and every local
//! output keeps working.
//!
//! Credentials are baked in at build time via `AQUA_WIFI_SSID` /
//! `AQUA_WIFI_PASS` environment variables.

use core::fmt;

/// How many half-second waits before giving up on the join.
pub const BOOT_ATTEMPTS: u32 = 20;
/// Wait between connection checks.
pub const ATTEMPT_WAIT_MS: u32 = 500;

pub const WIFI_SSID: &str = match option_env!("AQUA_WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};
pub const WIFI_PASS: &str = match option_env!("AQUA_WIFI_PASS") {
    Some(pass) => pass,
    None => "",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    DriverFailed,
    Timeout,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::DriverFailed => write!(f, "WiFi driver call failed"),
            Self::Timeout => write!(f, "no connection within the boot window"),
        }
    }
}

// ── Credential validation ─────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

pub fn validate_ssid(ssid: &str) -> Result<(), WifiError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(WifiError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(WifiError::InvalidSsid);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), WifiError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(WifiError::InvalidPassword);
    }
    Ok(())
}

// ── Boot-time join ────────────────────────────────────────────

/// Bring up the STA interface and wait, bounded, for an association.
///
/// `on_attempt` is invoked once per wait slot so the caller can show
/// progress (the boot screen draws a dot per attempt).  Returns the live
/// driver handle on success; the caller keeps it alive for the rest of
/// the run.
#[cfg(target_os = "espidf")]
pub fn connect_station(
    modem: esp_idf_hal::modem::Modem,
    sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
    nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
    mut on_attempt: impl FnMut(u32),
) -> Result<esp_idf_svc::wifi::EspWifi<'static>, WifiError> {
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};
    use log::info;

    if WIFI_SSID.is_empty() {
        return Err(WifiError::NoCredentials);
    }
    validate_ssid(WIFI_SSID)?;
    validate_password(WIFI_PASS)?;

    let mut wifi =
        EspWifi::new(modem, sysloop, Some(nvs)).map_err(|_| WifiError::DriverFailed)?;

    let auth_method = if WIFI_PASS.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: WIFI_SSID.try_into().map_err(|_| WifiError::InvalidSsid)?,
        password: WIFI_PASS.try_into().map_err(|_| WifiError::InvalidPassword)?,
        auth_method,
        ..Default::default()
    }))
    .map_err(|_| WifiError::DriverFailed)?;

    wifi.start().map_err(|_| WifiError::DriverFailed)?;
    wifi.connect().map_err(|_| WifiError::DriverFailed)?;

    info!("wifi: joining '{}'", WIFI_SSID);
    for attempt in 1..=BOOT_ATTEMPTS {
        let has_ip = wifi
            .sta_netif()
            .get_ip_info()
            .map(|info| !info.ip.is_unspecified())
            .unwrap_or(false);
        if wifi.is_connected().unwrap_or(false) && has_ip {
            info!("wifi: connected after {} attempt(s)", attempt);
            return Ok(wifi);
        }
        on_attempt(attempt);
        FreeRtos::delay_ms(ATTEMPT_WAIT_MS);
    }
    Err(WifiError::Timeout)
}
