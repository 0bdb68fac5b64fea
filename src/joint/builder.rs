//! Builder pattern for JointController.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{bounded_name, validate_joint, JointConfig, MechanismConfig};
use crate::driver::DriverAdapter;
use crate::error::{ConfigError, Error, Result};

use super::bounds::MotionBounds;
use super::controller::JointController;
use super::converter::UnitConverter;
use super::sensor::{LimitSensor, NoSwitch};

/// Builder for creating JointController instances.
///
/// The limit switch pin is optional; adding one changes the builder's switch
/// type from [`NoSwitch`] to the pin's type.
pub struct JointControllerBuilder<DRV, CS, EN, DELAY, SW = NoSwitch>
where
    DRV: DriverAdapter,
    CS: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    SW: InputPin,
{
    driver: Option<DRV>,
    select_pin: Option<CS>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    switch_pin: Option<SW>,
    config: Option<JointConfig>,
}

impl<DRV, CS, EN, DELAY> Default for JointControllerBuilder<DRV, CS, EN, DELAY>
where
    DRV: DriverAdapter,
    CS: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DRV, CS, EN, DELAY> JointControllerBuilder<DRV, CS, EN, DELAY>
where
    DRV: DriverAdapter,
    CS: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder without a limit switch.
    pub fn new() -> Self {
        Self {
            driver: None,
            select_pin: None,
            enable_pin: None,
            delay: None,
            switch_pin: None,
            config: None,
        }
    }
}

impl<DRV, CS, EN, DELAY, SW> JointControllerBuilder<DRV, CS, EN, DELAY, SW>
where
    DRV: DriverAdapter,
    CS: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    SW: InputPin,
{
    /// Set the driver adapter.
    pub fn driver(mut self, driver: DRV) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Set the bus select pin.
    pub fn select_pin(mut self, pin: CS) -> Self {
        self.select_pin = Some(pin);
        self
    }

    /// Set the driver enable pin (active low).
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the limit switch input.
    ///
    /// The joint configuration must then carry a `limit_switch` section.
    pub fn limit_switch<P: InputPin>(self, pin: P) -> JointControllerBuilder<DRV, CS, EN, DELAY, P> {
        JointControllerBuilder {
            driver: self.driver,
            select_pin: self.select_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            switch_pin: Some(pin),
            config: self.config,
        }
    }

    /// Configure from a JointConfig.
    pub fn from_joint_config(mut self, config: &JointConfig) -> Self {
        self.config = Some(config.clone());
        self
    }

    /// Configure from MechanismConfig by joint name.
    pub fn from_config(self, config: &MechanismConfig, joint_name: &str) -> Result<Self> {
        let joint_config = config.joint(joint_name).ok_or_else(|| {
            Error::Config(ConfigError::JointNotFound(bounded_name(joint_name)))
        })?;

        Ok(self.from_joint_config(joint_config))
    }

    /// Build the JointController.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part is missing, the configuration is
    /// invalid, or a switch pin and switch configuration are not given together.
    pub fn build(self) -> Result<JointController<DRV, SW, CS, EN, DELAY>> {
        let driver = self.driver.ok_or(ConfigError::MissingField("driver"))?;
        let select_pin = self.select_pin.ok_or(ConfigError::MissingField("select_pin"))?;
        let enable_pin = self.enable_pin.ok_or(ConfigError::MissingField("enable_pin"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;
        let config = self.config.ok_or(ConfigError::MissingField("joint configuration"))?;

        validate_joint(&config)?;

        let sensor = match (self.switch_pin, config.limit_switch) {
            (Some(pin), Some(switch)) => LimitSensor::attached(pin, switch),
            (None, None) => LimitSensor::Detached,
            _ => return Err(ConfigError::SensorMismatch(config.name.clone()).into()),
        };

        let converter = UnitConverter::new(config.steps_per_unit()?, config.direction());

        Ok(JointController::new(
            config.name.clone(),
            driver,
            sensor,
            select_pin,
            enable_pin,
            delay,
            converter,
            MotionBounds::new(config.limits()),
            config.tuning,
        ))
    }
}
