//! Simulated hardware for running joints without a driver board.
//!
//! All state lives in `Cell`s owned by the test or demo, so a driver, a limit
//! switch and the test itself can observe the same axis while the controller
//! owns the adapters.
//!
//! ```rust,ignore
//! let axis = SimAxis::new(500, 10);
//! let driver = SimDriver::new(&axis);
//! let switch = SimSwitch::new(&axis, Direction::Negative, -12, Level::High);
//! ```

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::{DriverAdapter, DriverStatus, DriverTuning};
use crate::config::units::{Direction, Level};

/// State of one simulated ramp-generating driver.
///
/// Each read of the actual position advances the axis toward its target by
/// at most `steps_per_poll`, standing in for the time a bus round trip takes.
/// Because the axis keeps moving between the poll that spots a switch and the
/// stop that follows, homing against it overshoots like real hardware does.
#[derive(Debug)]
pub struct SimAxis {
    actual: Cell<i32>,
    target: Cell<i32>,
    steps_per_poll: Cell<u32>,
    status: Cell<DriverStatus>,
    tuning: Cell<Option<DriverTuning>>,
    bus_failure: Cell<bool>,
    resets: Cell<u32>,
    target_writes: Cell<u32>,
    bus_ops: Cell<u32>,
}

impl SimAxis {
    /// Create an axis at rest at `actual`.
    pub fn new(actual: i32, steps_per_poll: u32) -> Self {
        Self {
            actual: Cell::new(actual),
            target: Cell::new(actual),
            steps_per_poll: Cell::new(steps_per_poll),
            status: Cell::new(DriverStatus::HEALTHY),
            tuning: Cell::new(None),
            bus_failure: Cell::new(false),
            resets: Cell::new(0),
            target_writes: Cell::new(0),
            bus_ops: Cell::new(0),
        }
    }

    /// Current physical position.
    pub fn actual(&self) -> i32 {
        self.actual.get()
    }

    /// Current ramp target.
    pub fn target(&self) -> i32 {
        self.target.get()
    }

    /// Teleport the axis and leave it at rest there.
    pub fn place(&self, steps: i32) {
        self.actual.set(steps);
        self.target.set(steps);
    }

    /// Set the target behind the controller's back (e.g. a stale command).
    pub fn force_target(&self, steps: i32) {
        self.target.set(steps);
    }

    /// Health report the next setup will read back.
    pub fn set_status(&self, status: DriverStatus) {
        self.status.set(status);
    }

    /// Make every subsequent bus transaction fail.
    pub fn set_bus_failure(&self, failing: bool) {
        self.bus_failure.set(failing);
    }

    /// Tuning last pushed to the driver, if any.
    pub fn tuning(&self) -> Option<DriverTuning> {
        self.tuning.get()
    }

    /// Number of resets performed.
    pub fn resets(&self) -> u32 {
        self.resets.get()
    }

    /// Number of target writes performed.
    pub fn target_writes(&self) -> u32 {
        self.target_writes.get()
    }

    /// Number of bus transactions of any kind.
    pub fn bus_ops(&self) -> u32 {
        self.bus_ops.get()
    }

    /// Advance the ramp by one poll interval.
    pub fn advance(&self) {
        let actual = self.actual.get();
        let target = self.target.get();
        let budget = self.steps_per_poll.get().min(i32::MAX as u32) as i32;
        let delta = target.saturating_sub(actual).clamp(-budget, budget);
        self.actual.set(actual + delta);
    }

    fn transact(&self) -> Result<(), SimBusError> {
        self.bus_ops.set(self.bus_ops.get() + 1);
        if self.bus_failure.get() {
            Err(SimBusError)
        } else {
            Ok(())
        }
    }
}

/// Bus failure injected with [`SimAxis::set_bus_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimBusError;

/// [`DriverAdapter`] over a [`SimAxis`].
#[derive(Debug, Clone, Copy)]
pub struct SimDriver<'a> {
    axis: &'a SimAxis,
}

impl<'a> SimDriver<'a> {
    /// Wrap an axis.
    pub fn new(axis: &'a SimAxis) -> Self {
        Self { axis }
    }
}

impl DriverAdapter for SimDriver<'_> {
    type Error = SimBusError;

    fn read_actual_steps(&mut self) -> Result<i32, Self::Error> {
        self.axis.transact()?;
        self.axis.advance();
        Ok(self.axis.actual())
    }

    fn read_target_steps(&mut self) -> Result<i32, Self::Error> {
        self.axis.transact()?;
        Ok(self.axis.target())
    }

    fn write_target_steps(&mut self, steps: i32) -> Result<(), Self::Error> {
        self.axis.transact()?;
        self.axis.target_writes.set(self.axis.target_writes.get() + 1);
        self.axis.target.set(steps);
        Ok(())
    }

    fn reset_and_begin(&mut self) -> Result<(), Self::Error> {
        self.axis.transact()?;
        self.axis.resets.set(self.axis.resets.get() + 1);
        self.axis.tuning.set(None);
        Ok(())
    }

    fn read_health_status(&mut self) -> Result<DriverStatus, Self::Error> {
        self.axis.transact()?;
        Ok(self.axis.status.get())
    }

    fn write_tuning(&mut self, tuning: &DriverTuning) -> Result<(), Self::Error> {
        self.axis.transact()?;
        self.axis.tuning.set(Some(*tuning));
        Ok(())
    }
}

/// Limit switch that trips once the axis reaches a step threshold.
///
/// Pressed whenever the axis' actual position is at `at` or beyond it in
/// direction `beyond`; reads `level` while pressed.
#[derive(Debug, Clone, Copy)]
pub struct SimSwitch<'a> {
    axis: &'a SimAxis,
    beyond: Direction,
    at: i32,
    level: Level,
}

impl<'a> SimSwitch<'a> {
    /// Create a switch on `axis`.
    pub fn new(axis: &'a SimAxis, beyond: Direction, at: i32, level: Level) -> Self {
        Self {
            axis,
            beyond,
            at,
            level,
        }
    }

    /// Whether the switch is mechanically closed right now.
    pub fn is_tripped(&self) -> bool {
        let actual = self.axis.actual();
        actual == self.at || self.beyond.heads_toward(self.at, actual)
    }
}

impl ErrorType for SimSwitch<'_> {
    type Error = Infallible;
}

impl InputPin for SimSwitch<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let tripped = self.is_tripped();
        Ok(match self.level {
            Level::High => tripped,
            Level::Low => !tripped,
        })
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// A digital line shared between a [`SimPin`] and the observer.
#[derive(Debug, Default)]
pub struct SimLine {
    high: Cell<bool>,
    edges: Cell<u32>,
}

impl SimLine {
    /// Create a line at the given level.
    pub fn new(high: bool) -> Self {
        Self {
            high: Cell::new(high),
            edges: Cell::new(0),
        }
    }

    /// Current level.
    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    /// Drive the line, counting level changes.
    pub fn set(&self, high: bool) {
        if self.high.get() != high {
            self.edges.set(self.edges.get() + 1);
        }
        self.high.set(high);
    }

    /// Level changes seen so far.
    pub fn edges(&self) -> u32 {
        self.edges.get()
    }
}

/// Input/output pin over a [`SimLine`].
#[derive(Debug, Clone, Copy)]
pub struct SimPin<'a> {
    line: &'a SimLine,
}

impl<'a> SimPin<'a> {
    /// Attach to a line.
    pub fn new(line: &'a SimLine) -> Self {
        Self { line }
    }
}

impl ErrorType for SimPin<'_> {
    type Error = Infallible;
}

impl OutputPin for SimPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.line.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.line.set(true);
        Ok(())
    }
}

impl InputPin for SimPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.line.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.line.is_high())
    }
}
