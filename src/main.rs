//! Airlink daemon
//!
//! Assembles the module pipeline from configuration, connects the vehicle
//! link, and ticks until Ctrl-C. Module order is fixed here and nowhere
//! else: controller first (produces the control command), then engines
//! (consumes it), then virtual sensors, then the link.

use airlink::config::Config;
use airlink::control::ControlInputs;
use airlink::error::Result;
use airlink::link::UdpLink;
use airlink::mixer::{ActuatorSink, create_mixer};
use airlink::modules::sensors::{AccelSource, RangeSource};
use airlink::modules::{ControllerModule, EngineModule, LinkModule, VirtualSensorsModule};
use airlink::pipeline::{DroneContext, Pipeline};
use airlink::sim::{FixedRangeSensor, NoisyAccelerometer, PwmMotor};
use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `airlink <path>` (positional)
/// - `airlink --config <path>` (flag-based)
/// - `airlink -c <path>` (short flag)
///
/// Defaults to `/etc/airlink.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "/etc/airlink.toml".to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("airlink starting...");

    let config_path = parse_config_path();
    let config = match Config::load(&config_path) {
        Ok(config) => {
            log::info!("Using config: {}", config_path);
            config
        }
        Err(e) => {
            log::warn!("Cannot load {} ({}), using defaults", config_path, e);
            Config::airboat_defaults()
        }
    };

    let ctx = DroneContext::new();
    let inputs = ControlInputs::new();

    let link = Arc::new(UdpLink::new(
        config.link.clone(),
        Arc::clone(&ctx.control),
        Arc::clone(&ctx.telemetry),
    ));

    let mut pipeline = Pipeline::new(ctx);
    pipeline.add_module(Box::new(ControllerModule::new(inputs.clone())));

    let mixer = create_mixer(&config.vehicle.mixer)?;
    if config.vehicle.simulate {
        let actuators: Vec<Box<dyn ActuatorSink>> = vec![
            Box::new(PwmMotor::new("left")),
            Box::new(PwmMotor::new("right")),
        ];
        pipeline.add_module(Box::new(EngineModule::new(mixer, actuators)));

        let accel: Box<dyn AccelSource> =
            Box::new(NoisyAccelerometer::new([0.0, 0.0, 0.0], 0.5, 0));
        let ranges: Vec<Box<dyn RangeSource>> =
            (0..6).map(|_| Box::new(FixedRangeSensor::new(2.0)) as Box<dyn RangeSource>).collect();
        pipeline.add_module(Box::new(VirtualSensorsModule::new(Some(accel), ranges)));
    } else {
        // Remote hardware: mixing happens on the vehicle, telemetry comes
        // over the link
        pipeline.add_module(Box::new(EngineModule::new(mixer, Vec::new())));
    }
    pipeline.add_module(Box::new(LinkModule::new(Arc::clone(&link))));

    pipeline.init();

    if let Err(e) = link.connect() {
        // Bad address is fatal to the connect only; the pipeline keeps
        // running without an active link
        log::error!("link connect failed: {}", e);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| airlink::Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let tick_interval = config.pipeline.validated_tick_interval();
    log::info!("airlink running ({:?} tick). Press Ctrl-C to stop.", tick_interval);

    while running.load(Ordering::Relaxed) {
        let cycle_start = Instant::now();
        pipeline.tick();

        let elapsed = cycle_start.elapsed();
        if elapsed < tick_interval {
            std::thread::sleep(tick_interval - elapsed);
        } else {
            log::warn!(
                "pipeline tick overrun: {:?} (target {:?})",
                elapsed,
                tick_interval
            );
        }
    }

    log::info!("Shutting down...");
    pipeline.shutdown();
    log::info!("airlink stopped");
    Ok(())
}
