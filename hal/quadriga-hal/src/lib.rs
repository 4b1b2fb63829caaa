//! Quadriga Hardware Abstraction Layer
//!
//! This crate defines the hardware capability consumed by the motor channel
//! drivers. The drivers never touch pins, PWM units, or timers directly -
//! everything goes through these traits, so the same driver logic runs
//! against a real chip HAL or a recording test double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Channel drivers (quadriga-drivers)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  quadriga-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  test double  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalOutput`] - static digital pin levels
//! - [`pwm::PwmControl`] - PWM attach/detach and duty writes
//! - [`alarm::AlarmControl`] - hardware alarm programming
//! - [`MotorHal`] - all of the above, for code that needs the full capability

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod gpio;
pub mod pwm;

// Re-export key traits and identifiers at crate root for convenience
pub use alarm::{AlarmControl, TimerId};
pub use gpio::{DigitalOutput, PinId};
pub use pwm::{PwmChannel, PwmControl};

/// The complete hardware capability needed to drive a motor channel
///
/// Mode switching touches digital levels, PWM routing, and alarms in one
/// transition, so the channel arbiter is generic over this combined trait.
pub trait MotorHal: DigitalOutput + PwmControl + AlarmControl {}

// Blanket implementation for types that implement all three traits
impl<T: DigitalOutput + PwmControl + AlarmControl> MotorHal for T {}
