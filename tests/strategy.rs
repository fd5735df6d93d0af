mod common;

mod tests {
    use super::common::*;
    use myrtio_ws2812::{
        BitBangStrategy, Error, HardwareBinding, LedConfig, TimerChannel, TimerDmaStrategy,
        TransferHandle, TransmissionStrategy,
        binding::{PA8, PB5},
    };

    fn bit_bang(log: &WireLog) -> BitBangStrategy<MockPin, MockDelay> {
        BitBangStrategy::new(MockPin::new(log), MockDelay::new(log))
    }

    #[test]
    fn test_bit_bang_initialize_drives_low() {
        let log = wire_log();
        let mut strategy = bit_bang(&log);
        strategy.initialize(&LedConfig::default()).unwrap();
        assert_eq!(log.borrow().as_slice(), &[Wire::Low]);
    }

    #[test]
    fn test_bit_bang_pulse_widths() {
        let log = wire_log();
        let mut strategy = bit_bang(&log);
        strategy.initialize(&LedConfig::default()).unwrap();
        log.borrow_mut().clear();

        let handle = strategy.transmit(&[58, 29, 0]).unwrap();
        assert_eq!(handle.len(), 3);
        assert!(strategy.is_complete(&handle));
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Wire::High,
                Wire::Delay(805),
                Wire::Low,
                Wire::Delay(445),
                Wire::High,
                Wire::Delay(402),
                Wire::Low,
                Wire::Delay(848),
                Wire::Low,
                Wire::Delay(1_250),
            ]
        );

        strategy.finish(handle);
        assert_eq!(log.borrow().last(), Some(&Wire::Low));
    }

    #[test]
    fn test_bit_bang_handles_are_sequential() {
        let log = wire_log();
        let mut strategy = bit_bang(&log);
        let first = strategy.transmit(&[]).unwrap();
        let second = strategy.transmit(&[0]).unwrap();
        assert_eq!(second.id(), first.id() + 1);
        assert!(first.is_empty());
    }

    #[test]
    fn test_bit_bang_pin_error() {
        let log = wire_log();
        let mut strategy = BitBangStrategy::new(MockPin::failing(&log), MockDelay::new(&log));
        assert_eq!(
            strategy.initialize(&LedConfig::default()),
            Err(Error::Output)
        );
        assert_eq!(strategy.transmit(&[58]), Err(Error::Output));
    }

    #[test]
    fn test_bit_bang_finish_tolerates_pin_error() {
        let log = wire_log();
        let mut strategy = BitBangStrategy::new(MockPin::failing(&log), MockDelay::new(&log));
        strategy.finish(TransferHandle::new(0, 0));
        strategy.release();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_timer_dma_initialize() {
        let log = event_log();
        let mut strategy = TimerDmaStrategy::new(SimTimer::new(&log), SimDma::new(&log));
        strategy.initialize(&LedConfig::default()).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::AttachPin {
                    pin: HardwareBinding::default().pin(),
                    channel: TimerChannel::Ch2,
                    remap: false,
                },
                Event::ConfigurePwm {
                    channel: TimerChannel::Ch2,
                    period: 90,
                },
                Event::DmaInit,
            ]
        );
    }

    #[test]
    fn test_timer_dma_remapped_pin() {
        let log = event_log();
        let mut strategy = TimerDmaStrategy::new(SimTimer::new(&log), SimDma::new(&log));
        let config = LedConfig::new(1, HardwareBinding::for_pin(PB5).unwrap());
        strategy.initialize(&config).unwrap();

        assert_eq!(
            log.borrow()[0],
            Event::AttachPin {
                pin: PB5,
                channel: TimerChannel::Ch2,
                remap: true,
            }
        );
    }

    #[test]
    fn test_timer_dma_advanced_timer_enables_outputs() {
        let log = event_log();
        let mut strategy = TimerDmaStrategy::new(SimTimer::new(&log), SimDma::new(&log));
        let config = LedConfig::new(1, HardwareBinding::for_pin(PA8).unwrap());
        strategy.initialize(&config).unwrap();
        assert!(log.borrow().contains(&Event::EnableMainOutput));
    }

    #[test]
    fn test_timer_dma_transmit_and_finish() {
        let log = event_log();
        let dma = SimDma::new(&log);
        let frames = dma.frames();
        let mut strategy = TimerDmaStrategy::new(SimTimer::new(&log), dma);
        strategy.initialize(&LedConfig::default()).unwrap();
        log.borrow_mut().clear();

        let handle = strategy.transmit(&[58, 29, 0, 0]).unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::DmaDisarm,
                Event::DmaArm {
                    len: 4,
                    destination: COMPARE_BASE + 4,
                },
                Event::UpdateDmaRequest(true),
                Event::DmaEnable,
                Event::ResetCounter,
                Event::TimerStart,
            ]
        );
        assert_eq!(frames.borrow().as_slice(), &[vec![58u16, 29, 0, 0]]);
        assert!(strategy.is_complete(&handle));

        log.borrow_mut().clear();
        strategy.finish(handle);
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::TimerStop,
                Event::UpdateDmaRequest(false),
                Event::DmaDisarm,
                Event::SetCompare {
                    channel: TimerChannel::Ch2,
                    duty: 0,
                },
            ]
        );
    }

    #[test]
    fn test_timer_dma_release() {
        let log = event_log();
        let mut strategy = TimerDmaStrategy::new(SimTimer::new(&log), SimDma::new(&log));
        strategy.release();
        assert_eq!(
            log.borrow().as_slice(),
            &[Event::DmaDisarm, Event::TimerStop]
        );
    }
}
