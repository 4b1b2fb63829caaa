//! Frame dispatch: from transport bytes to driver calls
//!
//! The transport hands over whole binary frames; this module decodes them
//! and walks the channel bank. Mode frames drive arbiter transitions,
//! speed frames fan out one slot per motor. Routing by mode lives on
//! [`Channel`], so a speed slot simply lands wherever the channel
//! currently points it.

use quadriga_hal::MotorHal;
use quadriga_protocol::{ControlFrame, DecodeError, CHANNEL_COUNT};

use crate::channel::ChannelBank;

/// Decode a raw frame and apply it to the bank
///
/// Decode errors (empty frame, unknown type byte) are reported to the
/// caller and leave every driver untouched.
pub fn process_frame<H: MotorHal>(
    bank: &mut ChannelBank,
    hal: &mut H,
    bytes: &[u8],
) -> Result<(), DecodeError> {
    let frame = ControlFrame::decode(bytes)?;
    apply_frame(bank, hal, &frame);
    Ok(())
}

/// Apply an already-decoded frame to the bank
pub fn apply_frame<H: MotorHal>(bank: &mut ChannelBank, hal: &mut H, frame: &ControlFrame) {
    match frame {
        ControlFrame::Modes(modes) => {
            for (channel, &mode) in bank.channels_mut().zip(modes) {
                channel.set_mode(hal, mode);
            }
        }
        ControlFrame::Speeds(speeds) => {
            let (primary, secondary) = speeds.split_at(CHANNEL_COUNT);
            for ((channel, &a), &b) in bank.channels_mut().zip(primary).zip(secondary) {
                channel.set_primary_speed(hal, a);
                channel.set_secondary_speed(hal, b);
            }
        }
    }
}
