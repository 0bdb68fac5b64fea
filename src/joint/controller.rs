//! Joint controller.
//!
//! Generic over the driver adapter and embedded-hal 1.0 pins, with a runtime
//! lifecycle state (see [`JointState`]).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::DriverTuning;
use crate::driver::DriverAdapter;
use crate::error::{DriverFault, JointError, JointResult};

use super::bounds::MotionBounds;
use super::converter::UnitConverter;
use super::sensor::LimitSensor;
use super::state::{JointState, SafetyStop, StopReason};

/// How long the driver enable line is held inactive after a reset so the
/// driver drops its cached settings.
const RESET_PULSE_MS: u32 = 1000;

/// Controller for one stepper joint.
///
/// Generic over:
/// - `DRV`: driver adapter (must implement [`DriverAdapter`])
/// - `SW`: limit switch input (must implement `InputPin`)
/// - `CS`: bus select line (must implement `OutputPin`)
/// - `EN`: active-low driver enable line (must implement `OutputPin`)
/// - `DELAY`: delay provider (must implement `DelayNs`)
///
/// Lifecycle: `presetup` on every joint, then `setup`, then `calibrate` on
/// joints with a switch, then `update` once per control tick. Moves may be
/// issued any time the joint is ready.
pub struct JointController<DRV, SW, CS, EN, DELAY>
where
    DRV: DriverAdapter,
    SW: InputPin,
    CS: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Joint name for logging/debugging.
    name: heapless::String<32>,

    /// Stepper driver.
    driver: DRV,

    /// Homing switch and calibrated offset.
    sensor: LimitSensor<SW>,

    /// Bus select line, claimed in `presetup`.
    select_pin: CS,

    /// Driver enable line (low = enabled).
    enable_pin: EN,

    /// Delay provider for the reset pulse and `block`.
    delay: DELAY,

    converter: UnitConverter,
    bounds: MotionBounds,
    tuning: DriverTuning,
    state: JointState,
    last_stop: Option<StopReason>,
}

impl<DRV, SW, CS, EN, DELAY> JointController<DRV, SW, CS, EN, DELAY>
where
    DRV: DriverAdapter,
    SW: InputPin,
    CS: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new controller in the `Uninitialized` state.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: heapless::String<32>,
        driver: DRV,
        sensor: LimitSensor<SW>,
        select_pin: CS,
        enable_pin: EN,
        delay: DELAY,
        converter: UnitConverter,
        bounds: MotionBounds,
        tuning: DriverTuning,
    ) -> Self {
        Self {
            name,
            driver,
            sensor,
            select_pin,
            enable_pin,
            delay,
            converter,
            bounds,
            tuning,
            state: JointState::Uninitialized,
            last_stop: None,
        }
    }

    /// Get the joint name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> JointState {
        self.state
    }

    /// Whether positions are anchored to the limit switch.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.sensor.is_calibrated()
    }

    /// Step/position converter.
    #[inline]
    pub fn converter(&self) -> &UnitConverter {
        &self.converter
    }

    /// Soft limits.
    #[inline]
    pub fn bounds(&self) -> &MotionBounds {
        &self.bounds
    }

    /// Limit switch state.
    #[inline]
    pub fn sensor(&self) -> &LimitSensor<SW> {
        &self.sensor
    }

    /// Tuning pushed to the driver during setup.
    #[inline]
    pub fn tuning(&self) -> &DriverTuning {
        &self.tuning
    }

    /// Step offset between driver origin and position zero.
    #[inline]
    pub fn offset(&self) -> i32 {
        self.sensor.offset()
    }

    /// Reason for the most recent stop, if any.
    #[inline]
    pub fn last_stop(&self) -> Option<StopReason> {
        self.last_stop
    }

    /// Claim the bus select line by driving it to its idle (high) level.
    ///
    /// Must run on every joint sharing the bus before any joint's `setup`,
    /// so no driver listens to another joint's transactions.
    pub fn presetup(&mut self) -> JointResult<()> {
        self.ensure_not_faulted()?;
        self.select_pin.set_high().map_err(|_| JointError::PinError)?;
        if self.state == JointState::Uninitialized {
            self.state = JointState::Claimed;
        }
        Ok(())
    }

    /// Reset and program the driver, then verify its health.
    ///
    /// On a failed health check the joint becomes `Faulted` for good and
    /// `JointError::Fatal` is returned; other joints are unaffected. Bus
    /// errors during setup count as a communication failure. A successful
    /// setup leaves the joint ready but uncalibrated if it has a switch.
    pub fn setup(&mut self) -> JointResult<()> {
        self.ensure_not_faulted()?;
        if self.state == JointState::Uninitialized {
            return Err(JointError::InvalidState("presetup must run before setup"));
        }

        info!("Initializing joint {}", self.name.as_str());

        self.enable_pin.set_low().map_err(|_| JointError::PinError)?;
        if self.driver.reset_and_begin().is_err() {
            return Err(self.fault(DriverFault::CommunicationFailure));
        }

        // Disable to clear the driver's cache, then re-enable to load parameters.
        self.enable_pin.set_high().map_err(|_| JointError::PinError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.enable_pin.set_low().map_err(|_| JointError::PinError)?;

        let status = match self.driver.read_health_status() {
            Ok(status) => status,
            Err(_) => return Err(self.fault(DriverFault::CommunicationFailure)),
        };
        if let Some(fault) = status.fault() {
            return Err(self.fault(fault));
        }

        if self.driver.write_tuning(&self.tuning).is_err() {
            return Err(self.fault(DriverFault::CommunicationFailure));
        }

        // The reset zeroed the driver's position registers.
        self.sensor.forget_calibration();
        self.state = JointState::Ready {
            calibrated: self.sensor.is_calibrated(),
        };

        info!("Joint {} ready", self.name.as_str());
        Ok(())
    }

    /// Home against the limit switch (blocking, iteration-bounded).
    ///
    /// No-op for joints without a switch. Creeps `homing_increment` steps at
    /// a time toward the switch until it reads pressed, stops, and sets the
    /// offset from the actual step count so that it reads as the switch's
    /// reference position.
    ///
    /// The switch is checked once more after the final increment settles, so
    /// a switch exactly `max_homing_iterations` increments away still homes.
    ///
    /// # Errors
    ///
    /// `JointError::CalibrationTimeout` if the switch is not reached within
    /// `max_homing_iterations`; the joint is stopped, stays usable and
    /// calibration may be retried. The offset from an earlier successful
    /// calibration is kept, so such a joint stays `Ready { calibrated: true }`;
    /// otherwise it stays uncalibrated.
    pub fn calibrate(&mut self) -> JointResult<()> {
        self.ensure_ready()?;

        let config = match self.sensor.config() {
            Some(config) => *config,
            None => return Ok(()),
        };

        info!("Homing joint {}", self.name.as_str());

        let step = config.homing_step();
        for _ in 0..config.max_homing_iterations {
            if self.sensor.is_pressed()? {
                let actual = self.halt(StopReason::Homed)?;
                self.home_at(actual, config.reference_position);
                return Ok(());
            }

            let actual = self.read_actual()?;
            self.write_target(actual.saturating_add(step))?;
        }

        // The last increment may have landed on the switch.
        let actual = self.halt(StopReason::HomingTimeout)?;
        if self.sensor.is_pressed()? {
            self.last_stop = Some(StopReason::Homed);
            self.home_at(actual, config.reference_position);
            return Ok(());
        }

        warn!(
            "Joint {} did not reach its limit switch after {} iterations",
            self.name.as_str(),
            config.max_homing_iterations
        );
        Err(JointError::CalibrationTimeout {
            iterations: config.max_homing_iterations,
        })
    }

    /// Per-tick safety interlock.
    ///
    /// If the switch is attached, blocking and pressed while the commanded
    /// target lies further toward it than the actual position, the target is
    /// pinned to the actual position and the stop is reported. Never blocks;
    /// does nothing on a joint that is not ready.
    pub fn update(&mut self) -> JointResult<Option<SafetyStop>> {
        if !self.state.is_ready() {
            return Ok(None);
        }

        let approach = match self.sensor.config() {
            Some(config) if config.blocking => config.approach,
            _ => return Ok(None),
        };

        if !self.sensor.is_pressed()? {
            return Ok(None);
        }

        let target = self.read_target()?;
        let actual = self.read_actual()?;
        if !approach.heads_toward(actual, target) {
            return Ok(None);
        }

        self.write_target(actual)?;
        self.last_stop = Some(StopReason::LimitSwitch);

        warn!(
            "Joint {} stopped at limit switch ({} -> {} cancelled)",
            self.name.as_str(),
            actual,
            target
        );
        Ok(Some(SafetyStop {
            actual_steps: actual,
            cancelled_target: target,
        }))
    }

    /// Stop where the joint is: pin the target to the actual position.
    ///
    /// The driver's ramp generator decelerates onto the new target. A no-op
    /// on a joint at rest.
    pub fn stop(&mut self) -> JointResult<()> {
        self.ensure_ready()?;
        self.halt(StopReason::Commanded).map(|_| ())
    }

    /// Wait for the current move to finish, polling every `poll_interval_ms`.
    ///
    /// For scripts and manual sequencing only; never call from a control tick.
    pub fn block(&mut self, poll_interval_ms: u32) -> JointResult<()> {
        while self.is_moving()? {
            self.delay.delay_ms(poll_interval_ms);
        }
        Ok(())
    }

    /// Move to an absolute position.
    ///
    /// Returns the commanded step target.
    ///
    /// A position at a soft limit whose nearest step lies past the limit is
    /// commanded to the adjacent step inside it.
    ///
    /// # Errors
    ///
    /// `JointError::OutOfBounds` if `position` is outside the soft limits;
    /// nothing is written to the driver in that case.
    pub fn move_to(&mut self, position: f64) -> JointResult<i32> {
        self.ensure_ready()?;
        let position = self.checked(position)?;
        let steps = self.steps_within_bounds(position)?;
        self.write_target(steps)?;
        Ok(steps)
    }

    /// Move by a relative amount from the current actual position.
    pub fn move_by(&mut self, delta: f64) -> JointResult<i32> {
        let current = self.position()?;
        self.move_to(current + delta)
    }

    /// Move to an absolute step count.
    ///
    /// The step target is still held to the soft limits.
    pub fn move_to_steps(&mut self, steps: i32) -> JointResult<i32> {
        self.ensure_ready()?;
        self.checked(self.converter.steps_to_position(steps, self.sensor.offset()))?;
        self.write_target(steps)?;
        Ok(steps)
    }

    /// Move by a relative number of steps from the current actual position.
    pub fn move_by_steps(&mut self, delta: i32) -> JointResult<i32> {
        self.ensure_ready()?;
        let actual = self.read_actual()?;
        self.move_to_steps(actual.saturating_add(delta))
    }

    /// Driver's actual step count.
    pub fn actual_steps(&mut self) -> JointResult<i32> {
        self.ensure_ready()?;
        self.read_actual()
    }

    /// Commanded step target.
    pub fn target_steps(&mut self) -> JointResult<i32> {
        self.ensure_ready()?;
        self.read_target()
    }

    /// Actual position.
    ///
    /// Before calibration a joint with a switch reports positions relative to
    /// the driver's power-up origin (offset zero).
    pub fn position(&mut self) -> JointResult<f64> {
        let steps = self.actual_steps()?;
        Ok(self.converter.steps_to_position(steps, self.sensor.offset()))
    }

    /// Commanded target position.
    pub fn target_position(&mut self) -> JointResult<f64> {
        let steps = self.target_steps()?;
        Ok(self.converter.steps_to_position(steps, self.sensor.offset()))
    }

    /// Whether the driver is still travelling to its target.
    pub fn is_moving(&mut self) -> JointResult<bool> {
        let target = self.target_steps()?;
        let actual = self.read_actual()?;
        Ok(target != actual)
    }

    fn checked(&self, position: f64) -> JointResult<f64> {
        self.bounds.validate(position).map_err(|e| {
            warn!(
                "Joint {} rejected move to {}",
                self.name.as_str(),
                position
            );
            e
        })
    }

    fn home_at(&mut self, actual: i32, reference_position: f64) {
        let offset = self.converter.offset_for(actual, reference_position);
        self.sensor.set_offset(offset);
        self.state = JointState::Ready { calibrated: true };

        info!(
            "Joint {} homed at {} steps, offset {}",
            self.name.as_str(),
            actual,
            offset
        );
    }

    /// Nearest step target for `position` that reads back within the limits.
    fn steps_within_bounds(&self, position: f64) -> JointResult<i32> {
        let offset = self.sensor.offset();
        let sign = self.converter.direction().sign();
        let limits = self.bounds.limits();

        let mut steps = self.converter.position_to_steps(position, offset);
        let reached = self.converter.steps_to_position(steps, offset);
        if reached > limits.max {
            steps = steps.saturating_sub(sign);
        } else if reached < limits.min {
            steps = steps.saturating_add(sign);
        }

        self.checked(self.converter.steps_to_position(steps, offset))?;
        Ok(steps)
    }

    fn halt(&mut self, reason: StopReason) -> JointResult<i32> {
        let actual = self.read_actual()?;
        self.write_target(actual)?;
        self.last_stop = Some(reason);
        Ok(actual)
    }

    fn fault(&mut self, fault: DriverFault) -> JointError {
        error!("Joint {}: {}", self.name.as_str(), fault);
        self.state = JointState::Faulted(fault);
        JointError::Fatal(fault)
    }

    fn ensure_not_faulted(&self) -> JointResult<()> {
        match self.state.fault() {
            Some(fault) => Err(JointError::Faulted(fault)),
            None => Ok(()),
        }
    }

    fn ensure_ready(&self) -> JointResult<()> {
        self.ensure_not_faulted()?;
        if self.state.is_ready() {
            Ok(())
        } else {
            Err(JointError::InvalidState("joint has not completed setup"))
        }
    }

    fn read_actual(&mut self) -> JointResult<i32> {
        self.driver.read_actual_steps().map_err(|_| JointError::Bus)
    }

    fn read_target(&mut self) -> JointResult<i32> {
        self.driver.read_target_steps().map_err(|_| JointError::Bus)
    }

    fn write_target(&mut self, steps: i32) -> JointResult<()> {
        self.driver.write_target_steps(steps).map_err(|_| JointError::Bus)
    }
}
