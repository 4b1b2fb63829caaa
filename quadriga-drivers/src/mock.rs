//! Recording mock HAL for host-side driver tests
//!
//! Journals every hardware operation in order and mirrors enough state
//! (pin levels, PWM routing, alarm gating) to assert on the electrical
//! outcome of a driver sequence.

use heapless::Vec;
use quadriga_hal::{AlarmControl, DigitalOutput, PinId, PwmChannel, PwmControl, TimerId};

/// One recorded hardware operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalOp {
    Digital { pin: PinId, high: bool },
    AttachPwm { pin: PinId, channel: PwmChannel },
    DetachPwm { pin: PinId },
    Duty { channel: PwmChannel, duty: u8 },
    Program { timer: TimerId, ticks: u64 },
    Enable { timer: TimerId },
    Disable { timer: TimerId },
}

#[derive(Debug, Default)]
pub struct MockHal {
    pub journal: Vec<HalOp, 512>,
    levels: Vec<(PinId, bool), 16>,
    attached: Vec<PinId, 16>,
    alarms: Vec<(TimerId, u64, bool), 8>,
    /// High-water mark of simultaneously attached pins
    pub max_attached: usize,
}

impl MockHal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, op: HalOp) {
        self.journal.push(op).unwrap();
    }

    /// Last digital level written to a pin, if any
    pub fn level(&self, pin: PinId) -> Option<bool> {
        self.levels.iter().find(|(p, _)| *p == pin).map(|&(_, h)| h)
    }

    pub fn is_attached(&self, pin: PinId) -> bool {
        self.attached.contains(&pin)
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn alarm_enabled(&self, timer: TimerId) -> bool {
        self.alarms
            .iter()
            .any(|&(t, _, enabled)| t == timer && enabled)
    }

    pub fn alarm_ticks(&self, timer: TimerId) -> Option<u64> {
        self.alarms
            .iter()
            .find(|(t, _, _)| *t == timer)
            .map(|&(_, ticks, _)| ticks)
    }

    fn alarm_entry(&mut self, timer: TimerId) -> &mut (TimerId, u64, bool) {
        if let Some(index) = self.alarms.iter().position(|(t, _, _)| *t == timer) {
            return &mut self.alarms[index];
        }
        self.alarms.push((timer, 0, false)).unwrap();
        let last = self.alarms.len() - 1;
        &mut self.alarms[last]
    }
}

impl DigitalOutput for MockHal {
    fn set_digital(&mut self, pin: PinId, high: bool) {
        self.record(HalOp::Digital { pin, high });
        if let Some(entry) = self.levels.iter_mut().find(|(p, _)| *p == pin) {
            entry.1 = high;
        } else {
            self.levels.push((pin, high)).unwrap();
        }
    }
}

impl PwmControl for MockHal {
    fn attach_pwm(&mut self, pin: PinId, channel: PwmChannel) {
        self.record(HalOp::AttachPwm { pin, channel });
        if !self.attached.contains(&pin) {
            self.attached.push(pin).unwrap();
        }
        self.max_attached = self.max_attached.max(self.attached.len());
    }

    fn detach_pwm(&mut self, pin: PinId) {
        self.record(HalOp::DetachPwm { pin });
        self.attached.retain(|p| *p != pin);
    }

    fn set_duty(&mut self, channel: PwmChannel, duty: u8) {
        self.record(HalOp::Duty { channel, duty });
    }
}

impl AlarmControl for MockHal {
    fn program_alarm(&mut self, timer: TimerId, ticks: u64) {
        self.record(HalOp::Program { timer, ticks });
        self.alarm_entry(timer).1 = ticks;
    }

    fn enable_alarm(&mut self, timer: TimerId) {
        self.record(HalOp::Enable { timer });
        self.alarm_entry(timer).2 = true;
    }

    fn disable_alarm(&mut self, timer: TimerId) {
        self.record(HalOp::Disable { timer });
        self.alarm_entry(timer).2 = false;
    }
}
