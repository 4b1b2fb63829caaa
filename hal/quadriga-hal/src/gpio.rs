//! Digital output abstraction
//!
//! Motor phase outputs and static H-bridge legs are plain push-pull
//! outputs addressed by chip-level pin number.

/// Identifies a physical pin by its chip-level GPIO number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// Digital output writes addressed by pin
///
/// Implementations handle the actual hardware register manipulation for
/// the specific chip. Pins are configured as outputs by the embedder at
/// startup; the drivers only write levels.
pub trait DigitalOutput {
    /// Drive a pin to a static level (`true` = high)
    ///
    /// Writing a pin that currently carries a PWM carrier is undefined;
    /// callers must detach PWM first (see [`crate::pwm::PwmControl`]).
    fn set_digital(&mut self, pin: PinId, high: bool);
}
