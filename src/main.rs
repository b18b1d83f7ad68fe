use std::{env, thread, time::Duration};

use actuator_sim::{
    ActuatorConfig, ControlRequest, MotionConstraints, MotorKind, MotorSpec, PidGains,
    RADIANS_TO_ROTATIONS, ui::terminal_ui::{DisplayData, log_to_terminal},
};
use chrono::Local;
use fern::Dispatch;
use log::{error, info};

const LOOP_PERIOD: f64 = 0.02;
const RENDER_EVERY: u32 = 5;

fn setup_logger() -> Result<(), Box<dyn std::error::Error>> {
    Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::fs::File::create("actuator-sim.log")?)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}

/// An arm-like mechanism on a Kraken X60 FOC, reporting rotations.
fn default_config() -> ActuatorConfig {
    let mut config = ActuatorConfig::new(MotorSpec::Preset(MotorKind::KrakenX60Foc), 0.003);
    config.conversion_factor = RADIANS_TO_ROTATIONS;
    config.gains = PidGains::new(8.0, 0.0, 0.2);
    config.motion = MotionConstraints::new(4.0, 8.0);
    config
}

/// `(start time in seconds, request)`, in order.
fn script() -> Vec<(f64, ControlRequest)> {
    vec![
        (0.0, ControlRequest::voltage(3.0)),
        (1.0, ControlRequest::voltage(0.0)),
        (2.0, ControlRequest::velocity(2.0)),
        (4.0, ControlRequest::motion_magic(0.0)),
        (7.0, ControlRequest::duty_cycle(-0.2)),
        (
            8.0,
            ControlRequest::Follower {
                leader_id: 2,
                oppose_leader: false,
            },
        ),
        (9.0, ControlRequest::motion_magic_velocity(-1.0)),
        (11.0, ControlRequest::position(0.0)),
    ]
}

fn main() {
    if let Err(e) = setup_logger() {
        eprintln!("logger setup failed: {e}");
    }

    let config = match env::args().nth(1) {
        Some(path) => match ActuatorConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("could not load {path}: {e}");
                eprintln!("could not load {path}: {e}");
                return;
            }
        },
        None => default_config(),
    };

    let mut actuator = match config.build() {
        Ok(actuator) => actuator,
        Err(e) => {
            error!("invalid actuator config: {e}");
            eprintln!("invalid actuator config: {e}");
            return;
        }
    };
    info!("simulating {:?}", config);

    let mut schedule = script().into_iter().peekable();
    let end_time = 14.0;
    let mut request_name = String::from("none");
    let mut tick: u32 = 0;

    while actuator.timestamp() < end_time {
        while let Some((_, request)) = schedule.next_if(|(at, _)| *at <= actuator.timestamp()) {
            info!("t={:.2} applying {}", actuator.timestamp(), request.name());
            request_name = request.name().to_string();
            actuator.set_request(request);
        }

        actuator.advance(LOOP_PERIOD);
        tick += 1;

        if tick % RENDER_EVERY == 0 {
            log_to_terminal(&DisplayData::capture(&actuator, &request_name));
        }

        thread::sleep(Duration::from_millis(20));
    }

    info!(
        "finished at t={:.2}: position={:.3} velocity={:.3}",
        actuator.timestamp(),
        actuator.position(),
        actuator.velocity()
    );
}
