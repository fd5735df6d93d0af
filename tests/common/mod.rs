//! Shared test infrastructure for the controller and strategy tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorKind, ErrorType, OutputPin},
};
use myrtio_ws2812::{
    Clock, Error, Instant, LedConfig, Pin, PwmTimer, TimerChannel, TransferChannel,
    TransferHandle, TransmissionStrategy,
};

// ============================================================================
// Mock Clock
// ============================================================================

/// Manually driven clock, in microseconds
///
/// Every call to `now()` moves the clock forward by `step`, so busy-wait loops
/// make progress.
pub struct MockClock {
    micros: Cell<u64>,
    step: Cell<u64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::with_step(0)
    }

    pub fn with_step(step: u64) -> Self {
        Self {
            micros: Cell::new(1_000),
            step: Cell::new(step),
        }
    }

    pub fn advance(&self, micros: u64) {
        self.micros.set(self.micros.get() + micros);
    }

    pub fn set(&self, micros: u64) {
        self.micros.set(micros);
    }

    pub fn set_step(&self, step: u64) {
        self.step.set(step);
    }

    pub fn micros(&self) -> u64 {
        self.micros.get()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        let now = self.micros.get();
        self.micros.set(now + self.step.get());
        Instant::from_micros(now)
    }
}

// ============================================================================
// Simulated timer and transfer channel
// ============================================================================

/// Register access recorded by the simulated peripherals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AttachPin {
        pin: Pin,
        channel: TimerChannel,
        remap: bool,
    },
    ConfigurePwm {
        channel: TimerChannel,
        period: u16,
    },
    EnableMainOutput,
    SetCompare {
        channel: TimerChannel,
        duty: u16,
    },
    UpdateDmaRequest(bool),
    ResetCounter,
    TimerStart,
    TimerStop,
    DmaInit,
    DmaArm {
        len: usize,
        destination: u32,
    },
    DmaEnable,
    DmaDisarm,
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub const COMPARE_BASE: u32 = 0x4000_0434;

pub struct SimTimer {
    log: EventLog,
}

impl SimTimer {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl PwmTimer for SimTimer {
    fn attach_pin(&mut self, pin: Pin, channel: TimerChannel, remap: bool) {
        self.record(Event::AttachPin {
            pin,
            channel,
            remap,
        });
    }

    fn configure_pwm(&mut self, channel: TimerChannel, period: u16) {
        self.record(Event::ConfigurePwm { channel, period });
    }

    fn enable_main_output(&mut self) {
        self.record(Event::EnableMainOutput);
    }

    fn set_compare(&mut self, channel: TimerChannel, duty: u16) {
        self.record(Event::SetCompare { channel, duty });
    }

    fn compare_address(&self, channel: TimerChannel) -> u32 {
        let offset = match channel {
            TimerChannel::Ch1 => 0,
            TimerChannel::Ch2 => 4,
            TimerChannel::Ch3 => 8,
            TimerChannel::Ch4 => 12,
        };
        COMPARE_BASE + offset
    }

    fn set_update_dma_request(&mut self, enabled: bool) {
        self.record(Event::UpdateDmaRequest(enabled));
    }

    fn reset_counter(&mut self) {
        self.record(Event::ResetCounter);
    }

    fn start(&mut self) {
        self.record(Event::TimerStart);
    }

    fn stop(&mut self) {
        self.record(Event::TimerStop);
    }
}

/// Transfer channel that reports completion after a number of polls
pub struct SimDma {
    log: EventLog,
    /// `None` never completes
    complete_after: Option<u32>,
    polls: Cell<u32>,
    frames: Rc<RefCell<Vec<Vec<u16>>>>,
}

impl SimDma {
    pub fn new(log: &EventLog) -> Self {
        Self::completing_after(log, Some(0))
    }

    pub fn completing_after(log: &EventLog, polls: Option<u32>) -> Self {
        Self {
            log: log.clone(),
            complete_after: polls,
            polls: Cell::new(0),
            frames: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Shared view of every frame armed so far
    pub fn frames(&self) -> Rc<RefCell<Vec<Vec<u16>>>> {
        self.frames.clone()
    }

    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl TransferChannel for SimDma {
    fn init(&mut self) {
        self.record(Event::DmaInit);
    }

    fn arm(&mut self, source: &[u16], destination: u32) {
        self.polls.set(0);
        self.frames.borrow_mut().push(source.to_vec());
        self.record(Event::DmaArm {
            len: source.len(),
            destination,
        });
    }

    fn enable(&mut self) {
        self.record(Event::DmaEnable);
    }

    fn is_complete(&self) -> bool {
        let Some(after) = self.complete_after else {
            return false;
        };
        let polls = self.polls.get();
        self.polls.set(polls + 1);
        polls >= after
    }

    fn disarm(&mut self) {
        self.record(Event::DmaDisarm);
    }
}

// ============================================================================
// Scripted strategy
// ============================================================================

/// Strategy that completes instantly and counts calls
#[derive(Default)]
pub struct CountingStrategy {
    pub initialized: u32,
    pub transmitted: u32,
    pub finished: u32,
    pub released: u32,
    pub fail_initialize: bool,
    pub last_frame: Vec<u16>,
}

impl TransmissionStrategy for CountingStrategy {
    fn initialize(&mut self, _config: &LedConfig) -> Result<(), Error> {
        if self.fail_initialize {
            return Err(Error::Output);
        }
        self.initialized += 1;
        Ok(())
    }

    fn transmit(&mut self, bitstream: &[u16]) -> Result<TransferHandle, Error> {
        self.transmitted += 1;
        self.last_frame = bitstream.to_vec();
        Ok(TransferHandle::new(self.transmitted, bitstream.len()))
    }

    fn is_complete(&self, _handle: &TransferHandle) -> bool {
        true
    }

    fn finish(&mut self, _handle: TransferHandle) {
        self.finished += 1;
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

// ============================================================================
// Mock pin and delay
// ============================================================================

/// Level change or delay seen on the data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    High,
    Low,
    Delay(u32),
}

pub type WireLog = Rc<RefCell<Vec<Wire>>>;

pub fn wire_log() -> WireLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct MockPin {
    log: WireLog,
    fail: bool,
}

impl MockPin {
    pub fn new(log: &WireLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(log: &WireLog) -> Self {
        Self {
            log: log.clone(),
            fail: true,
        }
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.log.borrow_mut().push(Wire::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.log.borrow_mut().push(Wire::High);
        Ok(())
    }
}

pub struct MockDelay {
    log: WireLog,
}

impl MockDelay {
    pub fn new(log: &WireLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Wire::Delay(ns));
    }
}
