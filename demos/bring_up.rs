//! Example: Bringing up a two-joint mechanism on simulated hardware.
//!
//! This example demonstrates how to:
//! - Build joints from a TOML mechanism configuration
//! - Claim every joint's select line before any driver is reset
//! - Set up and home the joints
//! - Run the periodic control loop with the safety interlock
//!
//! Run with: `cargo run --example bring_up`

use embedded_hal_mock::eh1::delay::NoopDelay;
use stepper_joint::driver::sim::{SimAxis, SimDriver, SimLine, SimPin, SimSwitch};
use stepper_joint::{parse_config, Direction, JointControllerBuilder, Level, Result};

const MECHANISM: &str = r#"
# Turntable: no switch, degrees of rotation
[joints.base]
name = "base"

[joints.base.gearbox]
full_steps_per_revolution = 200
microsteps = 16
gear_ratio = 4.0
unit = "degrees"

# Shoulder: homed against a switch at its lower end stop
[joints.shoulder]
name = "shoulder"
steps_per_unit = 819.2
min_limit = -1.57
max_limit = 1.57

[joints.shoulder.tuning]
current_ma = 1200
speed = 100000
acceleration = 10000

[joints.shoulder.limit_switch]
triggered_level = "high"
approach = "negative"
reference_position = -1.57
"#;

fn main() -> Result<()> {
    println!("=== Joint Bring-up Example ===\n");

    let config = parse_config(MECHANISM)?;
    for name in config.joint_names() {
        println!("Configured joint: {}", name);
    }

    // Simulated hardware: the shoulder powers up somewhere above its switch.
    let base_axis = SimAxis::new(0, 40);
    let shoulder_axis = SimAxis::new(600, 25);
    let base_lines = (SimLine::default(), SimLine::default());
    let shoulder_lines = (SimLine::default(), SimLine::default());
    let shoulder_switch = SimSwitch::new(&shoulder_axis, Direction::Negative, -40, Level::High);

    let mut base = JointControllerBuilder::new()
        .from_config(&config, "base")?
        .driver(SimDriver::new(&base_axis))
        .select_pin(SimPin::new(&base_lines.0))
        .enable_pin(SimPin::new(&base_lines.1))
        .delay(NoopDelay::new())
        .build()?;

    let mut shoulder = JointControllerBuilder::new()
        .from_config(&config, "shoulder")?
        .driver(SimDriver::new(&shoulder_axis))
        .select_pin(SimPin::new(&shoulder_lines.0))
        .enable_pin(SimPin::new(&shoulder_lines.1))
        .delay(NoopDelay::new())
        .limit_switch(shoulder_switch)
        .build()?;

    // Every select line must be idle before any driver sees bus traffic.
    base.presetup()?;
    shoulder.presetup()?;

    base.setup()?;
    shoulder.setup()?;
    println!("\nbase: {}, shoulder: {}", base.state().name(), shoulder.state().name());

    base.calibrate()?;
    shoulder.calibrate()?;
    println!(
        "Shoulder homed: offset {} steps, position {:.4} rad",
        shoulder.offset(),
        shoulder.position()?
    );

    base.move_to(90.0)?;
    shoulder.move_to(0.75)?;

    // An out-of-range request is rejected without touching the driver.
    if let Err(e) = shoulder.move_to(2.0) {
        println!("Rejected: {}", e);
    }

    // Periodic control loop.
    let mut ticks = 0;
    while base.is_moving()? || shoulder.is_moving()? {
        base.update()?;
        if let Some(event) = shoulder.update()? {
            println!("Safety stop at {} steps", event.actual_steps);
        }
        ticks += 1;
    }

    println!("\nSettled after {} ticks", ticks);
    println!("base:     {:.2} deg", base.position()?);
    println!("shoulder: {:.4} rad", shoulder.position()?);

    // Drive back down into the switch; the interlock stops the joint.
    shoulder_axis.force_target(-5000);
    for _ in 0..200 {
        if let Some(event) = shoulder.update()? {
            println!(
                "\nInterlock: cancelled target {} at {} steps ({:?})",
                event.cancelled_target,
                event.actual_steps,
                shoulder.last_stop()
            );
            break;
        }
        shoulder.actual_steps()?;
    }

    Ok(())
}
