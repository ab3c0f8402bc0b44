//! Minima Transceiver Main Application
//!
//! Entry point for the STM32G474 build of the Minima firmware.
//! Initializes hardware and spawns async tasks: the tuning pot moves the
//! dial, and a beacon task keys the stored QRSS message on that dial at a
//! fixed interval.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use minima_firmware::hal::adc::TuningPotAdc;
use minima_firmware::hal::display::LogDisplay;
use minima_firmware::hal::gpio::{KeyInput, StatusLed, TrRelay};
use minima_firmware::hal::rig::BoardRig;
use minima_firmware::hal::timer::EmbassyClock;
use minima_firmware::prelude::*;

/// Frequency steps from the tuning task to the main loop
static TUNING_DELTAS: Channel<CriticalSectionRawMutex, i32, 4> = Channel::new();

/// Latest dial frequency for the beacon task
static DIAL: Signal<CriticalSectionRawMutex, Frequency> = Signal::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Minima Firmware v{}", env!("CARGO_PKG_VERSION"));

    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    let led = StatusLed::new(Output::new(p.PA5, Level::Low, Speed::Low));
    let pot = TuningPotAdc::new(p.ADC1, p.PA0);
    let key = KeyInput::new(Input::new(p.PA3, Pull::Up));
    let relay = TrRelay::new(Output::new(p.PB0, Level::Low, Speed::Low));
    let key_line = Output::new(p.PB1, Level::Low, Speed::Low);

    let mut frequency = default_frequency().unwrap();
    let rig = BoardRig::new(relay, key_line, frequency);

    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(tuning_task(pot)).unwrap();
    spawner.spawn(beacon_task(rig, key)).unwrap();

    info!("Tasks spawned, entering main loop");

    loop {
        let delta = TUNING_DELTAS.receive().await;
        frequency = frequency.offset(delta);
        DIAL.signal(frequency);
        info!("tuned to {} Hz", frequency.as_hz());
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: StatusLed<'static>) {
    loop {
        led.on();
        Timer::after(Duration::from_millis(100)).await;
        led.off();
        Timer::after(Duration::from_millis(900)).await;
    }
}

/// Tuning task - samples the pot once per control cycle
#[embassy_executor::task]
async fn tuning_task(pot: TuningPotAdc<'static>) {
    let clock = EmbassyClock::new();
    let mut tuning = TuningProcessor::setup(pot);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(CONTROL_CYCLE_MS)));

    loop {
        ticker.next().await;
        tuning.sample_once();

        let delta = tuning.frequency_delta(clock.now_ms());
        if delta != 0 && TUNING_DELTAS.try_send(delta).is_err() {
            warn!("tuning delta dropped: {}", delta);
        }
    }
}

/// Beacon task - keys the stored QRSS message, then waits out the interval
#[embassy_executor::task]
async fn beacon_task(mut rig: BoardRig<'static>, mut key: KeyInput<'static>) {
    let clock = EmbassyClock::new();
    let mut display = LogDisplay::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(CONTROL_CYCLE_MS)));

    loop {
        if let Some(dial) = DIAL.try_take() {
            rig.set_dial(dial);
        }

        let request = TransmissionRequest::qrss(BEACON_QRSS_LENGTH, BEACON_SHIFT_HZ, BEACON_TEXT);
        let started = BeaconSequencer::start(
            request,
            clock.now_ms(),
            CONTROL_CYCLE_MS,
            &mut rig,
            &mut display,
            &mut key,
        );

        match started {
            Ok(mut beacon) => {
                info!("beacon on {}", rig.frequency());
                ticker.reset();
                while beacon.tick(clock.now_ms(), &mut rig, &mut display, &mut key)
                    == BeaconStatus::Running
                {
                    ticker.next().await;
                }

                // Operator took over: stay on the air until the key opens
                while key.is_key_closed() || !beacon.hold_expired(clock.now_ms()) {
                    ticker.next().await;
                }
                rig.enter_receive();
                info!("beacon {}", beacon.status());
            }
            Err(e) => warn!("beacon refused: {}", e),
        }

        Timer::after(Duration::from_secs(BEACON_INTERVAL_S)).await;
    }
}
