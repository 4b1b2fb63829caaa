//! Quadriga motor channel drivers
//!
//! This crate implements the shield's motor control core:
//!
//! - Stepper driver with timer-driven phase sequencing and a linear
//!   speed ramp ([`stepper`])
//! - Brushed DC motor driver with glitch-free H-bridge leg switchover
//!   ([`dc`])
//! - Per-channel mode arbitration so exactly one driver owns a channel's
//!   pins at any time ([`channel`])
//! - Routing of decoded control frames to the right driver ([`dispatch`])
//!
//! All drivers are generic over the `quadriga-hal` traits and never touch
//! hardware directly, so the whole crate is unit-tested on the host
//! against a recording mock HAL.

#![no_std]
#![deny(unsafe_code)]

pub mod channel;
pub mod dc;
pub mod dispatch;
pub mod stepper;

#[cfg(test)]
mod mock;

pub use channel::{Channel, ChannelBank, ChannelConfig};
pub use dc::DcMotor;
pub use dispatch::{apply_frame, process_frame};
pub use stepper::{StepMode, Stepper};
