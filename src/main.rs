use anyhow::{bail, Context};
use buttons::ScriptedKeypad;
use calibration::{autopa, CalibrationMenu, Gyro, Io, Mount, SkyPoint};
use config::Config;
use log::*;
use sim::{ConsoleDisplay, SimGyro, SimMount};
use std::fs;
use std::thread;
use std::time::Duration;

mod config;
mod logging;
mod sim;

fn main() -> anyhow::Result<()> {
    logging::init_logging()?;

    let config = Config::load()?;
    logging::set_level(config.get_log_level())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("autopa") => run_autopa(&config, &args[1..]),
        script => run_menu(&config, script),
    }
}

/// Replay a key script through the calibration menu.
fn run_menu(config: &Config, script_arg: Option<&str>) -> anyhow::Result<()> {
    let mut keypad = match script_arg.or(config.get_script()) {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading key script {}", path))?;
            info!("Replaying key script {}", path);
            ScriptedKeypad::parse(&content).with_context(|| format!("in {}", path))?
        }
        None => {
            info!("Replaying built-in demo script");
            ScriptedKeypad::parse(include_str!("../demo.keys"))?
        }
    };

    let capabilities = config.capabilities();
    info!("Hardware: {:?}", capabilities);

    let mut mount = SimMount::new(&config.simulation);
    let mut gyro = SimGyro::new(&config.simulation);
    let mut display = ConsoleDisplay::default();
    let mut menu = CalibrationMenu::new(capabilities, config.polar_reference());
    let tick = Duration::from_millis(config.get_tick_ms());

    info!("{} ticks queued", keypad.remaining());
    while !keypad.is_finished() {
        let gyro_io: Option<&mut dyn Gyro> = if capabilities.gyro_level {
            Some(&mut gyro)
        } else {
            None
        };
        let mut io = Io {
            mount: &mut mount,
            gyro: gyro_io,
            display: &mut display,
            keypad: &mut keypad,
        };
        menu.tick(&mut io);

        if !tick.is_zero() {
            thread::sleep(tick);
        }
    }

    info!(
        "Script finished in state {:?}, left the menu {} times",
        menu.state(),
        display.menus_left()
    );
    mount.report();
    if capabilities.gyro_level {
        gyro.report();
    }
    Ok(())
}

/// `autopa <ra1> <dec1> <ra2> <dec2> <ra3> <dec3> [--force]`, all in degrees.
fn run_autopa(config: &Config, args: &[String]) -> anyhow::Result<()> {
    let force = args.iter().any(|arg| arg == "--force");
    let values = args
        .iter()
        .filter(|arg| arg.as_str() != "--force")
        .map(|arg| {
            arg.parse::<f64>()
                .with_context(|| format!("not a number: {:?}", arg))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;
    if values.len() != 6 {
        bail!("expected three RA/DEC pairs, got {} values", values.len());
    }

    let point = |i: usize| SkyPoint {
        ra: values[2 * i],
        dec: values[2 * i + 1],
    };
    let error = autopa::solve([point(0), point(1), point(2)], config.site())?;
    println!("Azimuth error correction is: {:.4} arcminutes.", error.azimuth_arcmin);
    println!("Altitude error correction is: {:.4} arcminutes.", error.altitude_arcmin);

    let mut mount = SimMount::new(&config.simulation);
    mount.enable_az_alt_motors();
    let applied = error.apply(&mut mount, config.capabilities(), force)?;
    info!("Applied corrections: {:?}", applied);
    mount.report();
    Ok(())
}
