//! Coordinator driving the real `Board` + `EpdDisplay` + `Ssd1681` stack
//! over a fake SPI bus.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use battpwr::adapters::board::Board;
use battpwr::adapters::epd_display::EpdDisplay;
use battpwr::app::coordinator::PowerCoordinator;
use battpwr::app::ports::Rail;
use battpwr::config::PowerConfig;
use battpwr::drivers::rails::BoardPower;
use battpwr::drivers::ssd1681::Ssd1681;
use battpwr::events::ButtonEvent;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal::spi::{ErrorType as SpiErrorType, Operation, SpiDevice};

use crate::mock_hw::RecordingSink;

const SOFT_RESET: u8 = 0x12;
const WRITE_RAM_BW: u8 = 0x24;
const MASTER_ACTIVATION: u8 = 0x20;
const DEEP_SLEEP: u8 = 0x10;

// ── Fakes ─────────────────────────────────────────────────────

/// Command bytes seen on the bus (DC low), in order.
type Commands = Rc<RefCell<Vec<u8>>>;

struct Bus {
    commands: Commands,
    dc: Rc<Cell<bool>>,
}

impl SpiErrorType for Bus {
    type Error = Infallible;
}

impl SpiDevice<u8> for Bus {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        for op in operations {
            if let Operation::Write(bytes) = op {
                if !self.dc.get() {
                    self.commands.borrow_mut().extend_from_slice(bytes);
                }
            }
        }
        Ok(())
    }
}

struct Line(Rc<Cell<bool>>);

impl PinErrorType for Line {
    type Error = Infallible;
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

struct IdleBusy;

impl PinErrorType for IdleBusy {
    type Error = Infallible;
}

impl InputPin for IdleBusy {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(false)
    }
    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(true)
    }
}

#[derive(Clone, Copy)]
struct NoWait;

impl DelayNs for NoWait {
    fn delay_ns(&mut self, _ns: u32) {}
}

type TestBoard = Board<EpdDisplay<Bus, Line, Line, IdleBusy, NoWait>, NoWait>;

fn board() -> (TestBoard, Commands) {
    let commands: Commands = Rc::default();
    let dc = Rc::new(Cell::new(false));
    let epd = Ssd1681::new(
        Bus {
            commands: Rc::clone(&commands),
            dc: Rc::clone(&dc),
        },
        Line(dc),
        Line(Rc::new(Cell::new(true))),
        IdleBusy,
        NoWait,
        100,
    );
    (
        Board::new(EpdDisplay::new(epd), BoardPower::new(), NoWait),
        commands,
    )
}

fn count(commands: &Commands, cmd: u8) -> usize {
    commands.borrow().iter().filter(|&&c| c == cmd).count()
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn boot_renders_once_and_hibernates() {
    let (mut board, commands) = board();
    let mut c = PowerCoordinator::new(&PowerConfig::default());
    let mut sink = RecordingSink::new();

    c.bring_up(&mut board, &mut sink);
    c.start(&mut board, &mut sink);

    assert_eq!(count(&commands, SOFT_RESET), 1, "begin() initialises once");
    // White clear in begin(), then the ON screen.
    assert_eq!(count(&commands, WRITE_RAM_BW), 2);
    assert_eq!(count(&commands, MASTER_ACTIVATION), 2);
    assert_eq!(commands.borrow().last(), Some(&DEEP_SLEEP));
    assert_eq!(board.display().renders(), 1);
    for rail in Rail::BOOT_ORDER {
        assert!(board.power().is_on(rail), "{} should be on", rail.name());
    }
}

#[test]
fn bring_up_clears_panel_without_counting_a_render() {
    let (mut board, commands) = board();
    let mut c = PowerCoordinator::new(&PowerConfig::default());
    let mut sink = RecordingSink::new();

    c.bring_up(&mut board, &mut sink);

    let stream = commands.borrow();
    assert_eq!(stream.first(), Some(&SOFT_RESET));
    assert_eq!(stream.last(), Some(&MASTER_ACTIVATION), "left awake after the clear");
    assert_eq!(count(&commands, WRITE_RAM_BW), 1);
    assert_eq!(board.display().framebuffer().ink_count(), 0);
    assert_eq!(board.display().renders(), 0);
}

#[test]
fn power_down_reinitialises_panel_after_hibernate() {
    let (mut board, commands) = board();
    let mut c = PowerCoordinator::new(&PowerConfig::default());
    let mut sink = RecordingSink::new();

    c.bring_up(&mut board, &mut sink);
    c.start(&mut board, &mut sink);
    commands.borrow_mut().clear();

    c.handle(ButtonEvent::LongPress, &mut board, &mut sink);

    let stream = commands.borrow();
    assert_eq!(stream.first(), Some(&SOFT_RESET), "wake from deep sleep first");
    assert_eq!(stream.last(), Some(&DEEP_SLEEP));
    assert_eq!(board.display().renders(), 2);
    assert!(!board.power().is_on(Rail::Vbat));
    assert!(board.power().is_on(Rail::Epd));
}

#[test]
fn off_screen_differs_from_on_screen() {
    let (mut board, _) = board();
    let mut c = PowerCoordinator::new(&PowerConfig::default());
    let mut sink = RecordingSink::new();

    c.bring_up(&mut board, &mut sink);
    c.start(&mut board, &mut sink);
    let on_frame = *board.display().framebuffer().as_bytes();

    c.handle(ButtonEvent::LongPress, &mut board, &mut sink);
    let off_frame = *board.display().framebuffer().as_bytes();

    assert_ne!(on_frame, off_frame);
}
