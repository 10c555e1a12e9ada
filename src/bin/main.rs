#![warn(rust_2018_idioms)]

use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
        Arc,
    },
    time::Duration,
};

use anyhow::{Context, Result};
use batstat::{
    collection::{ObservationSource, ReplaySource, Snapshot},
    estimator::ChargeTimeEstimator,
    options::{args, init_options, BatstatOptions},
    reading::{BatteryReading, LiveTime},
    service::BatteryTimeService,
    utils::error,
};

/// How long to wait on events before checking whether we were told to stop.
const TICK_RATE: Duration = Duration::from_millis(200);

type BoxedSource = Box<dyn ObservationSource>;

fn main() -> Result<()> {
    let args = args::get_args();

    #[cfg(all(feature = "logging", debug_assertions))]
    {
        batstat::utils::logging::init_logger(
            log::LevelFilter::Debug,
            std::ffi::OsStr::new("debug.log"),
        )?;
    }

    let options = init_options(&args).context("Unable to properly set up the options.")?;

    if options.once {
        return print_summary(&options);
    }

    // Set termination hook
    let is_terminated = Arc::new(AtomicBool::new(false));
    {
        let is_terminated = is_terminated.clone();
        ctrlc::set_handler(move || {
            is_terminated.store(true, Ordering::SeqCst);
        })?;
    }

    let mut service =
        BatteryTimeService::new(ChargeTimeEstimator::new(options.history_size), options.rate);
    let (sender, receiver) = mpsc::channel();

    service
        .start(source_factory(options.replay.clone()), sender)
        .context("Unable to start reading the battery.")?;

    while !is_terminated.load(Ordering::SeqCst) {
        match receiver.recv_timeout(TICK_RATE) {
            Ok(event) => println!("{event}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // The worker is done, e.g. the trace ran out.
                break;
            }
        }
    }

    service.stop()?;

    Ok(())
}

/// Builds the source on the worker thread.
fn source_factory(
    replay: Option<PathBuf>,
) -> impl FnOnce() -> error::Result<BoxedSource> + Send + 'static {
    move || match replay {
        Some(path) => Ok(Box::new(ReplaySource::open(&path)?) as BoxedSource),
        None => host_source(),
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "battery")] {
        fn host_source() -> error::Result<BoxedSource> {
            Ok(Box::new(batstat::collection::HostSource::new()?))
        }
    } else {
        fn host_source() -> error::Result<BoxedSource> {
            Err(error::BatstatError::collection(
                "batstat was built without host battery support, use '--replay' instead",
            ))
        }
    }
}

fn first_snapshot(replay: Option<&Path>) -> Result<Snapshot> {
    let mut source = match replay {
        Some(path) => Box::new(ReplaySource::open(path)?) as BoxedSource,
        None => host_source()?,
    };

    source
        .next_snapshot()?
        .context("No battery snapshot was available.")
}

fn print_summary(options: &BatstatOptions) -> Result<()> {
    let snapshot = first_snapshot(options.replay.as_deref())
        .context("Unable to read the battery.")?;
    let reading = BatteryReading::from(snapshot.extras);

    println!("{}", LiveTime::now().greeting());
    println!("Level: {}%", reading.level());
    println!("Health: {}", reading.health_text());
    println!("Plugged: {}", reading.plugged_state().as_str());
    println!(
        "Temperature: {}",
        reading.temperature_text(options.temperature_type)
    );
    println!("Voltage: {}", reading.voltage_text(&options.voltage_pattern));
    if let Some(technology) = reading.technology() {
        println!("Technology: {technology}");
    }

    Ok(())
}
