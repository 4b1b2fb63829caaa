//! Quadriga Control Protocol
//!
//! This crate defines the binary frames that carry mode and speed updates
//! from the remote controller to the motor shield. The transport (WebSocket
//! in the reference setup) delivers whole frames; there is no reassembly,
//! no checksum, and no acknowledgment path back to the sender.
//!
//! # Frame formats
//!
//! Channel configuration (type 0):
//! ```text
//! ┌──────┬─────────┬─────────┬─────────┬─────────┐
//! │ 0x00 │ mode ch0│ mode ch1│ mode ch2│ mode ch3│
//! └──────┴─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! Speed update (type 1), one sign/magnitude pair per motor slot:
//! ```text
//! ┌──────┬────────┬───────┬─────┬────────┬───────┐
//! │ 0x01 │ sign 0 │ mag 0 │ ... │ sign 7 │ mag 7 │
//! └──────┴────────┴───────┴─────┴────────┴───────┘
//! ```
//!
//! Decoding is permissive: missing speed pairs read as zero and unknown
//! mode bytes fail safe to [`ChannelMode::Off`].

#![no_std]
#![deny(unsafe_code)]

// Host-side tests (proptest) need the standard library
#[cfg(test)]
extern crate std;

pub mod frame;

pub use frame::{
    ChannelMode, ControlFrame, DecodeError, CHANNEL_COUNT, FRAME_MODES, FRAME_SPEEDS,
    MAX_FRAME_LEN, MOTOR_COUNT,
};
