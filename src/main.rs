//! Windlass Firmware: Main Entry Point
//!
//! Wires the ESP32 GPIO into the library's hexagonal core and runs the
//! cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  RelayMotor     RelayThruster   GpioSensor    GpioRemote       │
//! │  (Motor)        (Thruster)      (BinarySensor)(RemotePort)     │
//! │  LogEventSink   MonotonicClock  pulse ISR (hw_init)            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AnchorApp (pure logic)                    │    │
//! │  │  Remote · Pulses · Auto mode · Emergency stop          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use esp_idf_svc::sys::EspError;
use log::{error, info};

use windlass::adapters::log_sink::LogEventSink;
use windlass::adapters::time::MonotonicClock;
use windlass::app::events::AppEvent;
use windlass::app::ports::{EventSink, RemotePort};
use windlass::app::service::AnchorApp;
use windlass::config::SystemConfig;
use windlass::control::bow::BowPropellerController;
use windlass::control::winch::WinchController;
use windlass::drivers::hw_init;
use windlass::drivers::remote_inputs::GpioRemote;
use windlass::drivers::thruster::RelayThruster;
use windlass::drivers::winch_motor::RelayMotor;
use windlass::error::{self, Error};
use windlass::pins;
use windlass::sensors::gpio::{GpioSensor, Polarity};
use windlass::sensors::home::HomeSensor;

fn gpio_error(gpio: i32, e: EspError) -> Error {
    error!("GPIO{} setup failed: {}", gpio, e);
    Error::Gpio(gpio)
}

/// Relay output driven to the released (HIGH) level before anything else
/// can touch it.
fn relay_output(gpio: i32) -> error::Result<PinDriver<'static, AnyOutputPin, Output>> {
    // SAFETY: every number in `windlass::pins` is claimed exactly once, here
    // in `main`, and `Peripherals` is never taken.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    let mut driver = PinDriver::output(pin).map_err(|e| gpio_error(gpio, e))?;
    driver.set_high().map_err(|e| gpio_error(gpio, e))?;
    Ok(driver)
}

fn pulled_input(gpio: i32, pull: Pull) -> error::Result<PinDriver<'static, AnyIOPin, Input>> {
    // SAFETY: as for `relay_output`.
    let pin = unsafe { AnyIOPin::new(gpio) };
    let mut driver = PinDriver::input(pin).map_err(|e| gpio_error(gpio, e))?;
    driver.set_pull(pull).map_err(|e| gpio_error(gpio, e))?;
    Ok(driver)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Windlass v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // The persisted-config layer hands its document to
    // SystemConfig::from_json; until one is wired the defaults apply.
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;

    // ── 3. GPIO ───────────────────────────────────────────────
    let motor = RelayMotor::new(
        relay_output(pins::WINCH_UP_GPIO)?,
        relay_output(pins::WINCH_DOWN_GPIO)?,
    );

    let home_pin = pulled_input(pins::ANCHOR_HOME_GPIO, Pull::Up)?;
    let home = HomeSensor::new(GpioSensor::new(home_pin, Polarity::ActiveLow));

    let bow = if config.bow_thruster_installed {
        Some(BowPropellerController::new(RelayThruster::new(
            relay_output(pins::BOW_PORT_GPIO)?,
            relay_output(pins::BOW_STARBOARD_GPIO)?,
        )))
    } else {
        None
    };

    let mut remote = GpioRemote::new(
        pulled_input(pins::REMOTE_UP_GPIO, Pull::Down)?,
        pulled_input(pins::REMOTE_DOWN_GPIO, Pull::Down)?,
        pulled_input(pins::REMOTE_FUNC3_GPIO, Pull::Down)?,
        pulled_input(pins::REMOTE_FUNC4_GPIO, Pull::Down)?,
    );

    // ── 4. App service + pulse ISR ────────────────────────────
    let mut app = AnchorApp::new(config.clone(), WinchController::new(motor, home), bow);
    hw_init::init_pulse_isr(&app.pulse_handle()).map_err(Error::from)?;

    let clock = MonotonicClock::new();
    let mut log_sink = LogEventSink::new();
    app.start(&mut log_sink);

    // External commands stay blocked until a network binding reports its
    // link through `set_link_connected`; the wired remote works regardless.
    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let telemetry_interval_ms = u64::from(config.telemetry_interval_ms);
    let mut last_telemetry_ms: u64 = 0;

    loop {
        let now_ms = clock.uptime_ms();
        let buttons = remote.read_buttons();
        app.tick(now_ms, buttons, &mut log_sink);

        if now_ms.saturating_sub(last_telemetry_ms) >= telemetry_interval_ms {
            let t = app.build_telemetry();
            log_sink.emit(&AppEvent::Telemetry(t));
            last_telemetry_ms = now_ms;
        }

        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
