//! AquaSentry firmware — main entry point.
//!
//! Hexagonal architecture around a single cooperative loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter   LcdDisplay   RtdbClient   SystemClock │
//! │  (Sensor+Indicator)(Display)    (Telemetry)  (WallClock) │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ─────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           MonitorService (pure logic)              │  │
//! │  │  classify · alarm · dashboard · uplink             │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Boot order: peripherals → LCD → WiFi (bounded) → SNTP → loop.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use aquasentry::adapters::clock::SystemClock;
use aquasentry::adapters::hardware::HardwareAdapter;
use aquasentry::adapters::lcd::LcdDisplay;
use aquasentry::adapters::log_sink::LogEventSink;
use aquasentry::adapters::rtdb::RtdbClient;
use aquasentry::app::service::MonitorService;
use aquasentry::config::SystemConfig;

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    use aquasentry::adapters::{clock, wifi};
    use aquasentry::app::ports::DisplayPort;
    use aquasentry::drivers::hw_init;
    use aquasentry::pins;
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::Hertz;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use log::{error, warn};

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AquaSentry v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let config = SystemConfig::default();

    // ── 3. LCD ────────────────────────────────────────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )?;
    let mut display = LcdDisplay::new(i2c)?;
    display.render("AquaSentry", "Connecting WiFi");

    // ── 4. Network (bounded, best effort) ─────────────────────
    let mut link_ready = false;
    let mut _wifi = None;
    let mut _sntp = None;
    let join = wifi::connect_station(peripherals.modem, sysloop, nvs, |attempt| {
        // One dot per half-second wait slot on the boot screen.
        display.render("Connecting WiFi", &".".repeat((attempt as usize).min(16)));
    });
    match join {
        Ok(handle) => {
            display.render("AquaSentry", "WiFi Connected!");
            link_ready = true;
            _wifi = Some(handle);
            match clock::start_sntp() {
                Ok(sntp) => _sntp = Some(sntp),
                Err(e) => warn!("sntp start failed ({}), timestamps will be N/A", e),
            }
        }
        Err(e) => {
            // The monitor runs fully offline; only telemetry is lost.
            warn!("wifi join failed ({}), running offline", e);
            display.render("AquaSentry", "WiFi Failed :(");
        }
    }
    FreeRtos::delay_ms(2_000);

    // ── 5. Monitor loop ───────────────────────────────────────
    let clock = SystemClock::new();
    let mut hw = HardwareAdapter::new(config.clone());
    let mut link = RtdbClient::new(link_ready);
    let mut sink = LogEventSink;
    let mut service = MonitorService::new(config);
    service.start(&mut sink);

    info!("System ready. Entering monitor loop.");
    loop {
        service.tick(
            clock.now_ms(),
            &mut hw,
            &mut display,
            &mut link,
            &clock,
            &mut sink,
        );
        // Yield to FreeRTOS; all cadences are enforced by the soft timers.
        FreeRtos::delay_ms(10);
    }
}

/// Host build: run the monitor against the simulated peripherals.
#[cfg(not(target_os = "espidf"))]
fn main() -> Result<()> {
    env_logger::init();
    info!("AquaSentry v{} (host simulation)", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    let clock = SystemClock::new();
    let mut hw = HardwareAdapter::new(config.clone());
    let mut display = LcdDisplay::new()?;
    let mut link = RtdbClient::new(false);
    let mut sink = LogEventSink;
    let mut service = MonitorService::new(config);
    service.start(&mut sink);

    loop {
        service.tick(
            clock.now_ms(),
            &mut hw,
            &mut display,
            &mut link,
            &clock,
            &mut sink,
        );
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
}
