//! Control frame decoding and encoding
//!
//! A frame is a single type byte followed by type-specific payload. Frames
//! arrive whole from the transport, so decoding works on a complete byte
//! slice rather than a streaming parser.

use heapless::Vec;

/// Frame type byte for channel configuration
pub const FRAME_MODES: u8 = 0x00;

/// Frame type byte for speed updates
pub const FRAME_SPEEDS: u8 = 0x01;

/// Number of motor channels on the shield
pub const CHANNEL_COUNT: usize = 4;

/// Number of motor slots in a speed frame (4 primary + 4 secondary)
pub const MOTOR_COUNT: usize = 8;

/// Maximum encoded frame length (type byte + 8 sign/magnitude pairs)
pub const MAX_FRAME_LEN: usize = 1 + MOTOR_COUNT * 2;

/// Errors that can occur while decoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Frame has no type byte
    Empty,
    /// Type byte does not name a known frame type
    UnknownType(u8),
}

/// What a channel's four pins are currently used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMode {
    /// All pins released, everything electrically quiescent
    #[default]
    Off,
    /// One 4-wire stepper motor on all four pins
    Stepper,
    /// Two brushed DC motors, one H-bridge per pin pair
    DualDc,
}

impl ChannelMode {
    /// Decode a wire mode byte
    ///
    /// Unknown values fail safe to [`ChannelMode::Off`] rather than being
    /// rejected; a garbled configuration must never energize a motor.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => ChannelMode::Stepper,
            2 => ChannelMode::DualDc,
            _ => ChannelMode::Off,
        }
    }

    /// Wire representation of this mode
    pub fn to_byte(self) -> u8 {
        match self {
            ChannelMode::Off => 0,
            ChannelMode::Stepper => 1,
            ChannelMode::DualDc => 2,
        }
    }
}

/// A decoded control frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlFrame {
    /// Per-channel mode assignment (frame type 0)
    Modes([ChannelMode; CHANNEL_COUNT]),
    /// Per-motor signed speeds (frame type 1)
    ///
    /// Slots 0-3 address the channel's stepper or primary DC motor,
    /// slots 4-7 the secondary DC motor of channels 0-3.
    Speeds([i32; MOTOR_COUNT]),
}

impl ControlFrame {
    /// Decode a whole frame from raw bytes
    ///
    /// Short payloads are tolerated: missing mode bytes read as
    /// [`ChannelMode::Off`] and missing speed pairs as zero. Only a missing
    /// or unknown type byte is an error.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        match bytes.first() {
            None => Err(DecodeError::Empty),
            Some(&FRAME_MODES) => {
                let mut modes = [ChannelMode::Off; CHANNEL_COUNT];
                for (channel, mode) in modes.iter_mut().enumerate() {
                    if let Some(&byte) = bytes.get(1 + channel) {
                        *mode = ChannelMode::from_byte(byte);
                    }
                }
                Ok(ControlFrame::Modes(modes))
            }
            Some(&FRAME_SPEEDS) => {
                let mut speeds = [0i32; MOTOR_COUNT];
                for (motor, speed) in speeds.iter_mut().enumerate() {
                    // Both bytes of the pair must be present, otherwise the
                    // slot keeps its zero default.
                    if let (Some(&sign), Some(&magnitude)) =
                        (bytes.get(1 + motor * 2), bytes.get(2 + motor * 2))
                    {
                        *speed = decode_speed(sign, magnitude);
                    }
                }
                Ok(ControlFrame::Speeds(speeds))
            }
            Some(&other) => Err(DecodeError::UnknownType(other)),
        }
    }

    /// Encode this frame into wire bytes (for testing or simulation)
    ///
    /// Speeds outside the encodable [-255, 255] range are clamped.
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_FRAME_LEN> {
        let mut bytes = Vec::new();
        match self {
            ControlFrame::Modes(modes) => {
                // Capacity covers the largest frame type, pushes cannot fail.
                let _ = bytes.push(FRAME_MODES);
                for mode in modes {
                    let _ = bytes.push(mode.to_byte());
                }
            }
            ControlFrame::Speeds(speeds) => {
                let _ = bytes.push(FRAME_SPEEDS);
                for &speed in speeds {
                    let (sign, magnitude) = encode_speed(speed);
                    let _ = bytes.push(sign);
                    let _ = bytes.push(magnitude);
                }
            }
        }
        bytes
    }
}

/// Decode one sign/magnitude pair into a signed speed
///
/// The sign byte is an offset direction: 2 = forward, 1 = stop (magnitude
/// is ignored), 0 = reverse. The arithmetic form keeps any other sign byte
/// deterministic instead of rejecting it.
fn decode_speed(sign: u8, magnitude: u8) -> i32 {
    magnitude as i32 * (sign as i32 - 1)
}

/// Encode a signed speed into a sign/magnitude pair, clamping to ±255
fn encode_speed(speed: i32) -> (u8, u8) {
    match speed {
        0 => (1, 0),
        s if s > 0 => (2, s.min(255) as u8),
        s => (0, (-s).min(255) as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_empty_frame() {
        assert_eq!(ControlFrame::decode(&[]), Err(DecodeError::Empty));
    }

    #[test]
    fn test_decode_unknown_type() {
        assert_eq!(
            ControlFrame::decode(&[9, 1, 2]),
            Err(DecodeError::UnknownType(9))
        );
    }

    #[test]
    fn test_decode_modes_frame() {
        let frame = ControlFrame::decode(&[0, 1, 2, 0, 0]).unwrap();
        assert_eq!(
            frame,
            ControlFrame::Modes([
                ChannelMode::Stepper,
                ChannelMode::DualDc,
                ChannelMode::Off,
                ChannelMode::Off,
            ])
        );
    }

    #[test]
    fn test_unknown_mode_byte_fails_safe_to_off() {
        let frame = ControlFrame::decode(&[0, 7, 255, 1, 2]).unwrap();
        assert_eq!(
            frame,
            ControlFrame::Modes([
                ChannelMode::Off,
                ChannelMode::Off,
                ChannelMode::Stepper,
                ChannelMode::DualDc,
            ])
        );
    }

    #[test]
    fn test_short_modes_frame_defaults_to_off() {
        let frame = ControlFrame::decode(&[0, 2]).unwrap();
        assert_eq!(
            frame,
            ControlFrame::Modes([
                ChannelMode::DualDc,
                ChannelMode::Off,
                ChannelMode::Off,
                ChannelMode::Off,
            ])
        );
    }

    #[test]
    fn test_decode_speed_forward() {
        let frame = ControlFrame::decode(&[1, 2, 100]).unwrap();
        let ControlFrame::Speeds(speeds) = frame else {
            panic!("expected speed frame");
        };
        assert_eq!(speeds[0], 100);
        assert_eq!(&speeds[1..], &[0; 7]);
    }

    #[test]
    fn test_decode_speed_reverse() {
        let frame = ControlFrame::decode(&[1, 0, 100]).unwrap();
        let ControlFrame::Speeds(speeds) = frame else {
            panic!("expected speed frame");
        };
        assert_eq!(speeds[0], -100);
    }

    #[test]
    fn test_decode_speed_stop_ignores_magnitude() {
        let frame = ControlFrame::decode(&[1, 1, 200]).unwrap();
        let ControlFrame::Speeds(speeds) = frame else {
            panic!("expected speed frame");
        };
        assert_eq!(speeds[0], 0);
    }

    #[test]
    fn test_truncated_speed_pair_reads_zero() {
        // Motor 0 complete, motor 1 has a sign byte but no magnitude.
        let frame = ControlFrame::decode(&[1, 2, 50, 2]).unwrap();
        let ControlFrame::Speeds(speeds) = frame else {
            panic!("expected speed frame");
        };
        assert_eq!(speeds[0], 50);
        assert_eq!(speeds[1], 0);
    }

    #[test]
    fn test_full_speed_frame() {
        let mut bytes = heapless::Vec::<u8, MAX_FRAME_LEN>::new();
        bytes.push(1).unwrap();
        for motor in 0..MOTOR_COUNT as u8 {
            bytes.extend_from_slice(&[2, motor + 1]).unwrap();
        }
        let frame = ControlFrame::decode(&bytes).unwrap();
        assert_eq!(
            frame,
            ControlFrame::Speeds([1, 2, 3, 4, 5, 6, 7, 8])
        );
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..32)) {
            let _ = ControlFrame::decode(&bytes);
        }

        #[test]
        fn speed_frame_roundtrip(speeds in proptest::array::uniform8(-255i32..=255)) {
            let frame = ControlFrame::Speeds(speeds);
            let encoded = frame.encode_to_vec();
            prop_assert_eq!(ControlFrame::decode(&encoded).unwrap(), frame);
        }
    }
}
