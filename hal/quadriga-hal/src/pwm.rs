//! PWM routing and duty control
//!
//! The chips this targets (ESP32-style LEDC, RP2040 slices) expose PWM as
//! generator channels that can be routed onto arbitrary pins at runtime.
//! The DC motor driver exploits exactly that: one generator per motor,
//! re-routed between the two H-bridge legs as the direction flips.

use crate::gpio::PinId;

/// Identifies a PWM generator channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmChannel(pub u8);

/// PWM attach/detach and duty writes
///
/// Duty resolution is fixed at 8 bits (0 = always low, 255 = always high),
/// matching the wire protocol's speed magnitude range.
pub trait PwmControl {
    /// Route a PWM generator onto a pin
    ///
    /// The pin carries the generator's waveform until [`detach_pwm`] is
    /// called for it.
    ///
    /// [`detach_pwm`]: PwmControl::detach_pwm
    fn attach_pwm(&mut self, pin: PinId, channel: PwmChannel);

    /// Disconnect a pin from any PWM generator
    ///
    /// After detaching, the pin level is whatever
    /// [`crate::gpio::DigitalOutput::set_digital`] writes next.
    fn detach_pwm(&mut self, pin: PinId);

    /// Set a generator's duty cycle (0-255)
    fn set_duty(&mut self, channel: PwmChannel, duty: u8);
}
