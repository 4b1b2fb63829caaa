//! Brushed DC motor driver with glitch-free direction switchover
//!
//! One motor sits across two H-bridge legs. Exactly one leg carries the
//! PWM carrier at any instant and sets the speed; the other is held at a
//! static level (low to coast, high to brake against the carrier). The
//! sign of the requested speed selects the carrier leg.
//!
//! The switchover ordering is the safety property of this module: the
//! outgoing leg is detached and parked at a static level before the
//! incoming leg attaches. Two PWM-driven legs would short the bridge
//! supply through the motor windings.

use quadriga_hal::{DigitalOutput, PinId, PwmChannel, PwmControl};

/// Maximum speed magnitude / PWM duty
pub const MAX_SPEED: i32 = 255;

/// Which H-bridge leg currently carries the PWM carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leg {
    Forward,
    Reverse,
}

/// Driver for one brushed DC motor on an H-bridge pin pair
///
/// Constructed once at startup, permanently bound to its pins and PWM
/// generator. All state lives in the cooperative context; nothing here is
/// touched from interrupts.
pub struct DcMotor {
    forward_pin: PinId,
    reverse_pin: PinId,
    pwm: PwmChannel,
    /// `None` until the first speed write or after a disconnect
    active: Option<Leg>,
    braking: bool,
    speed: i32,
}

impl DcMotor {
    /// Create a driver bound to a motor's leg pins and PWM generator
    pub fn new(forward_pin: PinId, reverse_pin: PinId, pwm: PwmChannel) -> Self {
        Self {
            forward_pin,
            reverse_pin,
            pwm,
            active: None,
            braking: false,
            speed: 0,
        }
    }

    /// Set speed and direction; positive drives the forward leg
    ///
    /// Speeds are clamped to ±[`MAX_SPEED`] and the magnitude becomes the
    /// PWM duty. Zero parks on the reverse leg at zero duty. The leg
    /// switchover sequence only runs when the sign actually crosses.
    pub fn set_speed<H: DigitalOutput + PwmControl>(&mut self, hal: &mut H, speed: i32) {
        let speed = speed.clamp(-MAX_SPEED, MAX_SPEED);
        self.speed = speed;

        let leg = if speed > 0 { Leg::Forward } else { Leg::Reverse };
        if self.active != Some(leg) {
            self.switch_leg(hal, leg);
        }
        hal.set_duty(self.pwm, speed.unsigned_abs() as u8);
    }

    /// Choose the static level for the inactive leg
    ///
    /// `true` brakes (inactive leg held high so the PWM off-phase shorts
    /// the windings), `false` coasts. Takes effect at the next switchover;
    /// a leg that is already parked keeps its level.
    pub fn set_braking(&mut self, braking: bool) {
        self.braking = braking;
    }

    /// Release the motor completely: zero duty, no PWM, both legs low
    ///
    /// Idempotent, safe from any state. The next `set_speed` re-attaches
    /// from scratch.
    pub fn disconnect<H: DigitalOutput + PwmControl>(&mut self, hal: &mut H) {
        hal.set_duty(self.pwm, 0);
        hal.detach_pwm(self.forward_pin);
        hal.detach_pwm(self.reverse_pin);
        hal.set_digital(self.forward_pin, false);
        hal.set_digital(self.reverse_pin, false);
        self.active = None;
        self.speed = 0;
    }

    /// Move the PWM carrier to the other leg
    ///
    /// Ordering is load-bearing: detach and park the outgoing leg before
    /// the incoming leg attaches, so the two legs are never PWM-driven
    /// simultaneously.
    fn switch_leg<H: DigitalOutput + PwmControl>(&mut self, hal: &mut H, leg: Leg) {
        let (incoming, outgoing) = match leg {
            Leg::Forward => (self.forward_pin, self.reverse_pin),
            Leg::Reverse => (self.reverse_pin, self.forward_pin),
        };
        hal.detach_pwm(outgoing);
        hal.set_digital(outgoing, self.braking);
        hal.attach_pwm(incoming, self.pwm);
        self.active = Some(leg);
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn braking(&self) -> bool {
        self.braking
    }
}
