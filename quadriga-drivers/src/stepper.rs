//! Timer-driven four-wire stepper driver
//!
//! Each stepper owns a hardware alarm whose interrupt advances the phase
//! sequence by one step. The alarm interval is derived from the requested
//! speed, so speed changes reprogram the alarm rather than busy-waiting
//! between steps. Speed itself follows a linear ramp: the cooperative
//! context moves it by one unit per update tick toward the target, except
//! from near standstill where the target is applied immediately.
//!
//! # Execution contexts
//!
//! Two contexts touch a driver, with a strict per-field split:
//!
//! - The alarm interrupt calls [`Stepper::step`] and is the only writer of
//!   `step_index`. It performs no allocation and only writes pin levels.
//! - The cooperative context (periodic tick + frame processing) calls
//!   everything else and is the only writer of `current_speed`,
//!   `target_speed`, and `tick_interval`. The interrupt observes speed
//!   changes indirectly through the reprogrammed alarm and may run at most
//!   one stale tick at the previous interval.
//!
//! The embedder serializes the two contexts around the shared `&mut`
//! (critical section or equivalent) when registering the alarm handler.

use quadriga_hal::{AlarmControl, DigitalOutput, PinId, TimerId};

/// Alarm ticks per step at one speed unit, for one step per revolution
///
/// Calibrated to the reference board's alarm tick rate; the step interval
/// for a speed `v` is `steps_per_rev / |v|` scaled by this factor.
pub const SPEED_TICK_SCALE: u64 = 3000;

/// Alarm interval programmed while the speed is zero
///
/// At zero speed the alarm keeps running and every tick coasts the
/// outputs; the alarm is never cancelled from the speed path.
pub const IDLE_TICK_INTERVAL: u64 = 8000;

/// Speed magnitude below which a new target is applied without ramping
///
/// Ramping up one unit at a time from standstill would take seconds; from
/// a near-stalled state the motor can jump straight to the target.
pub const SNAP_START_THRESHOLD: i32 = 100;

/// Cadence at which [`Stepper::update_speed`] must be invoked, in ms
///
/// The ±1-unit ramp slope is defined relative to this period.
pub const SPEED_UPDATE_PERIOD_MS: u32 = 5;

/// Full-step sequence: two coils energized per step, period 4
const FULL_TABLE: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// Half-step sequence: alternating two- and one-coil steps, period 8
const HALF_TABLE: [[bool; 4]; 8] = [
    [true, false, false, true],
    [true, false, false, false],
    [true, false, true, false],
    [false, false, true, false],
    [false, true, true, false],
    [false, true, false, false],
    [false, true, false, true],
    [false, false, false, true],
];

/// Wave-drive sequence: exactly one coil energized per step, period 4
const WAVE_TABLE: [[bool; 4]; 4] = [
    [true, false, false, false],
    [false, false, true, false],
    [false, true, false, false],
    [false, false, false, true],
];

/// Phase sequencing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMode {
    /// Standard bipolar drive, full torque
    #[default]
    Full,
    /// Double angular resolution
    Half,
    /// Single-coil drive, lower torque and current draw
    Wave,
}

impl StepMode {
    /// The phase table for this mode
    pub fn table(self) -> &'static [[bool; 4]] {
        match self {
            StepMode::Full => &FULL_TABLE,
            StepMode::Half => &HALF_TABLE,
            StepMode::Wave => &WAVE_TABLE,
        }
    }

    /// Number of entries in the phase table
    pub fn table_len(self) -> usize {
        self.table().len()
    }
}

/// Driver for one 4-wire stepper motor
///
/// Constructed once at startup, permanently bound to its pins and alarm.
/// The sign of `current_speed` is the direction; zero speed coasts.
pub struct Stepper {
    steps_per_rev: u32,
    timer: TimerId,
    pins: [PinId; 4],
    mode: StepMode,
    /// Position in the phase table; written only from the alarm interrupt
    step_index: usize,
    current_speed: i32,
    target_speed: i32,
    tick_interval: u64,
}

impl Stepper {
    /// Create a driver bound to a motor's four pins and its alarm
    pub fn new(steps_per_rev: u32, timer: TimerId, pins: [PinId; 4]) -> Self {
        Self {
            steps_per_rev,
            timer,
            pins,
            mode: StepMode::Full,
            step_index: 0,
            current_speed: 0,
            target_speed: 0,
            tick_interval: IDLE_TICK_INTERVAL,
        }
    }

    /// Set the speed the ramp moves toward
    ///
    /// From below the snap-start threshold the target is applied
    /// immediately; a stalled motor would otherwise crawl through the
    /// whole ramp before producing useful motion.
    pub fn set_target_speed<H: AlarmControl>(&mut self, hal: &mut H, speed: i32) {
        self.target_speed = speed;
        if self.current_speed.abs() < SNAP_START_THRESHOLD {
            self.set_speed(hal, speed);
        }
    }

    /// Advance the ramp by one tick
    ///
    /// Moves the current speed one unit toward the target and reprograms
    /// the alarm; a no-op once the target is reached. Must be called every
    /// [`SPEED_UPDATE_PERIOD_MS`] while the channel is in stepper mode.
    pub fn update_speed<H: AlarmControl>(&mut self, hal: &mut H) {
        if self.current_speed < self.target_speed {
            self.set_speed(hal, self.current_speed + 1);
        } else if self.current_speed > self.target_speed {
            self.set_speed(hal, self.current_speed - 1);
        }
    }

    /// Apply a speed now and reprogram the step alarm
    fn set_speed<H: AlarmControl>(&mut self, hal: &mut H, speed: i32) {
        self.current_speed = speed;
        if speed != 0 {
            let magnitude = speed.unsigned_abs() as u64;
            // round(steps_per_rev / |v| * scale), in integer arithmetic
            self.tick_interval =
                (self.steps_per_rev as u64 * SPEED_TICK_SCALE + magnitude / 2) / magnitude;
            hal.program_alarm(self.timer, self.tick_interval);
            hal.enable_alarm(self.timer);
        } else {
            self.tick_interval = IDLE_TICK_INTERVAL;
        }
    }

    /// Alarm interrupt body: advance one step and energize the phase
    ///
    /// Short and non-blocking. At zero speed the outputs are de-energized
    /// instead of stepping, so a stopped motor coasts rather than holding.
    pub fn step<H: DigitalOutput>(&mut self, hal: &mut H) {
        if self.current_speed == 0 {
            self.coast(hal);
            return;
        }
        let len = self.mode.table_len();
        if self.current_speed > 0 {
            self.step_index = (self.step_index + 1) % len;
        } else {
            self.step_index = self.step_index.checked_sub(1).unwrap_or(len - 1);
        }
        self.write_phase(hal);
    }

    /// De-energize all four coils
    pub fn coast<H: DigitalOutput>(&mut self, hal: &mut H) {
        for pin in self.pins {
            hal.set_digital(pin, false);
        }
    }

    /// Select the phase sequencing mode
    ///
    /// Keeps `step_index` inside the new table when the period shrinks.
    pub fn set_mode(&mut self, mode: StepMode) {
        self.mode = mode;
        self.step_index %= mode.table_len();
    }

    /// Bring the stepper up after its channel switches to stepper mode
    ///
    /// Resets to full-step drive at zero speed and starts the alarm at the
    /// idle interval. The caller must have released the pins first.
    pub fn activate<H: AlarmControl>(&mut self, hal: &mut H) {
        self.set_mode(StepMode::Full);
        self.target_speed = 0;
        self.set_speed(hal, 0);
        hal.program_alarm(self.timer, self.tick_interval);
        hal.enable_alarm(self.timer);
    }

    /// Stop the step alarm
    ///
    /// Idempotent; no step interrupt fires afterwards. Does not force the
    /// outputs low - quiescing the pins is the arbiter's job.
    pub fn disconnect<H: AlarmControl>(&mut self, hal: &mut H) {
        hal.disable_alarm(self.timer);
    }

    fn write_phase<H: DigitalOutput>(&mut self, hal: &mut H) {
        let row = &self.mode.table()[self.step_index];
        for (pin, &high) in self.pins.iter().zip(row) {
            hal.set_digital(*pin, high);
        }
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn current_speed(&self) -> i32 {
        self.current_speed
    }

    pub fn target_speed(&self) -> i32 {
        self.target_speed
    }

    pub fn tick_interval(&self) -> u64 {
        self.tick_interval
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }
}
