//! Hardware binding of one LED chain
//!
//! A binding names the data pin, the timer channel that generates the pulse
//! train and the transfer channel that feeds its compare register. Each
//! controller owns its binding; two chains must not share a timer or a
//! transfer channel.

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    A,
    B,
    C,
}

/// GPIO pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pin {
    pub port: Port,
    pub number: u8,
}

impl Pin {
    pub const fn new(port: Port, number: u8) -> Self {
        Self { port, number }
    }
}

pub const PA0: Pin = Pin::new(Port::A, 0);
pub const PA6: Pin = Pin::new(Port::A, 6);
pub const PA7: Pin = Pin::new(Port::A, 7);
pub const PA8: Pin = Pin::new(Port::A, 8);
pub const PB0: Pin = Pin::new(Port::B, 0);
pub const PB5: Pin = Pin::new(Port::B, 5);

/// General purpose or advanced timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    Tim1,
    Tim2,
    Tim3,
    Tim4,
}

impl Timer {
    /// Advanced timers gate their outputs behind a main-output enable
    pub const fn is_advanced(self) -> bool {
        matches!(self, Self::Tim1)
    }
}

/// Capture/compare channel of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerChannel {
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

/// Channel number of the DMA controller (1-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferChannelId(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareBinding {
    pin: Pin,
    timer: Timer,
    timer_channel: TimerChannel,
    transfer_channel: TransferChannelId,
}

impl HardwareBinding {
    pub const fn new(
        pin: Pin,
        timer: Timer,
        timer_channel: TimerChannel,
        transfer_channel: TransferChannelId,
    ) -> Self {
        Self {
            pin,
            timer,
            timer_channel,
            transfer_channel,
        }
    }

    /// Known pairings for STM32F103 pins. The transfer channel is the one
    /// serving the timer's update event.
    pub const fn for_pin(pin: Pin) -> Option<Self> {
        let (timer, channel, transfer) = match (pin.port, pin.number) {
            (Port::A, 0) => (Timer::Tim2, TimerChannel::Ch1, 2),
            (Port::A, 6) => (Timer::Tim3, TimerChannel::Ch1, 3),
            (Port::A, 7) | (Port::B, 5) => (Timer::Tim3, TimerChannel::Ch2, 3),
            (Port::A, 8) => (Timer::Tim1, TimerChannel::Ch1, 5),
            (Port::B, 0) => (Timer::Tim3, TimerChannel::Ch3, 3),
            _ => return None,
        };
        Some(Self::new(pin, timer, channel, TransferChannelId(transfer)))
    }

    pub const fn pin(&self) -> Pin {
        self.pin
    }

    pub const fn timer(&self) -> Timer {
        self.timer
    }

    pub const fn timer_channel(&self) -> TimerChannel {
        self.timer_channel
    }

    pub const fn transfer_channel(&self) -> TransferChannelId {
        self.transfer_channel
    }

    /// PB5 reaches TIM3 CH2 only through the partial remap
    pub const fn requires_remap(&self) -> bool {
        matches!(self.pin.port, Port::B)
            && self.pin.number == 5
            && matches!(self.timer, Timer::Tim3)
    }

    /// Whether two chains would fight over the same timer or transfer channel
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.timer == other.timer || self.transfer_channel == other.transfer_channel
    }
}

impl Default for HardwareBinding {
    /// PA7 on TIM3 CH2, fed by DMA1 CH3
    fn default() -> Self {
        Self::new(PA7, Timer::Tim3, TimerChannel::Ch2, TransferChannelId(3))
    }
}
