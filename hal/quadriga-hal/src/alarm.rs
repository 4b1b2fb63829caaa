//! Hardware alarm abstraction
//!
//! Each stepper channel owns one auto-reloading hardware alarm that fires
//! its step interrupt. The interrupt itself is registered by the embedder
//! with an explicit per-channel context (never an ambient global array);
//! the drivers only program intervals and gate the alarm on and off.

/// Identifies a hardware alarm/timer unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerId(pub u8);

/// Alarm programming addressed by timer unit
///
/// Intervals are in raw alarm ticks; the tick rate is a property of the
/// board and is baked into the driver's timing constants.
pub trait AlarmControl {
    /// Set the alarm's reload interval in ticks
    ///
    /// May be called while the alarm is running. Implementations must
    /// latch the value atomically: an in-flight alarm may deliver at most
    /// one tick at the previous interval, never a torn one.
    fn program_alarm(&mut self, timer: TimerId, ticks: u64);

    /// Start the alarm (enable its interrupt and counter)
    ///
    /// Enabling an already-enabled alarm is a no-op.
    fn enable_alarm(&mut self, timer: TimerId);

    /// Stop the alarm (disable its interrupt and pause its counter)
    ///
    /// Idempotent. No step interrupt fires after this returns.
    fn disable_alarm(&mut self, timer: TimerId);
}
