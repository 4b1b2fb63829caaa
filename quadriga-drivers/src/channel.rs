//! Per-channel mode arbitration
//!
//! A channel is four physical pins that carry either one stepper or two
//! brushed DC motors. All three drivers for a channel exist for the whole
//! process lifetime; switching modes only changes which of them is live.
//! The arbiter is the single authority for that switch and enforces the
//! ordering rule: the outgoing driver's alarm/PWM is fully released
//! before the incoming driver configures the pins, so no transitional
//! state has two drivers asserting conflicting levels.

use quadriga_hal::{AlarmControl, DigitalOutput, MotorHal, PinId, PwmChannel, TimerId};
use quadriga_protocol::{ChannelMode, CHANNEL_COUNT};

use crate::dc::DcMotor;
use crate::stepper::Stepper;

/// Fixed hardware binding of one channel
///
/// Built by the embedder from the board's pin map, once, at startup.
#[derive(Debug, Clone, Copy)]
pub struct ChannelConfig {
    /// The four motor pins, in phase order
    ///
    /// The primary DC motor bridges `pins[0]`/`pins[1]`, the secondary
    /// `pins[2]`/`pins[3]`.
    pub pins: [PinId; 4],
    /// Hardware alarm driving the stepper's step interrupt
    pub timer: TimerId,
    /// PWM generator of the primary DC motor
    pub primary_pwm: PwmChannel,
    /// PWM generator of the secondary DC motor
    pub secondary_pwm: PwmChannel,
    /// Steps per revolution of the attached stepper
    pub steps_per_rev: u32,
}

/// One motor channel: mode plus its three permanently-bound drivers
pub struct Channel {
    mode: ChannelMode,
    stepper: Stepper,
    primary: DcMotor,
    secondary: DcMotor,
}

impl Channel {
    pub fn new(config: ChannelConfig) -> Self {
        let [a, b, c, d] = config.pins;
        Self {
            mode: ChannelMode::Off,
            stepper: Stepper::new(config.steps_per_rev, config.timer, config.pins),
            primary: DcMotor::new(a, b, config.primary_pwm),
            secondary: DcMotor::new(c, d, config.secondary_pwm),
        }
    }

    /// Switch the channel's live driver
    ///
    /// Idempotent: re-applying the current mode re-runs the same
    /// transition and lands in the same pin state. Always releases the
    /// outgoing side before the incoming side touches anything.
    pub fn set_mode<H: MotorHal>(&mut self, hal: &mut H, mode: ChannelMode) {
        match mode {
            ChannelMode::Stepper => {
                // DC drivers off the pins before the stepper claims them.
                self.primary.disconnect(hal);
                self.secondary.disconnect(hal);
                self.stepper.activate(hal);
            }
            ChannelMode::DualDc => {
                // Step alarm silenced before the bridges come up idle.
                self.stepper.disconnect(hal);
                self.primary.set_speed(hal, 0);
                self.secondary.set_speed(hal, 0);
            }
            ChannelMode::Off => {
                self.stepper.disconnect(hal);
                self.primary.disconnect(hal);
                self.secondary.disconnect(hal);
            }
        }
        self.mode = mode;
    }

    /// Route a primary-slot speed update (wire motors 0-3)
    ///
    /// Goes to the stepper's ramp target in stepper mode, straight to the
    /// primary DC motor in dual-DC mode, and nowhere when the channel is
    /// off.
    pub fn set_primary_speed<H: MotorHal>(&mut self, hal: &mut H, speed: i32) {
        match self.mode {
            ChannelMode::Stepper => self.stepper.set_target_speed(hal, speed),
            ChannelMode::DualDc => self.primary.set_speed(hal, speed),
            ChannelMode::Off => {}
        }
    }

    /// Route a secondary-slot speed update (wire motors 4-7)
    ///
    /// Only meaningful in dual-DC mode; ignored otherwise.
    pub fn set_secondary_speed<H: MotorHal>(&mut self, hal: &mut H, speed: i32) {
        if self.mode == ChannelMode::DualDc {
            self.secondary.set_speed(hal, speed);
        }
    }

    /// Alarm interrupt entry point for this channel's stepper
    ///
    /// The embedder registers this with the channel's alarm handle.
    pub fn step<H: DigitalOutput>(&mut self, hal: &mut H) {
        self.stepper.step(hal);
    }

    /// Advance the stepper's speed ramp if this channel is in stepper mode
    pub fn update_speed<H: AlarmControl>(&mut self, hal: &mut H) {
        if self.mode == ChannelMode::Stepper {
            self.stepper.update_speed(hal);
        }
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn primary(&self) -> &DcMotor {
        &self.primary
    }

    pub fn secondary(&self) -> &DcMotor {
        &self.secondary
    }
}

/// The four channels of the shield, constructed once and injected wherever
/// frames or ticks need to reach the drivers
pub struct ChannelBank {
    channels: [Channel; CHANNEL_COUNT],
}

impl ChannelBank {
    pub fn new(configs: [ChannelConfig; CHANNEL_COUNT]) -> Self {
        Self {
            channels: configs.map(Channel::new),
        }
    }

    pub fn channel(&self, id: usize) -> Option<&Channel> {
        self.channels.get(id)
    }

    pub fn channel_mut(&mut self, id: usize) -> Option<&mut Channel> {
        self.channels.get_mut(id)
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Channel> {
        self.channels.iter_mut()
    }

    /// Periodic tick: advance every stepper-mode channel's speed ramp
    ///
    /// The external scheduler calls this every
    /// [`crate::stepper::SPEED_UPDATE_PERIOD_MS`].
    pub fn tick<H: MotorHal>(&mut self, hal: &mut H) {
        for channel in &mut self.channels {
            channel.update_speed(hal);
        }
    }
}
