/* 3rd party libraries */
use clap::{Arg, ArgMatches, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::path::Path;
use std::time::Duration;

/* Custom libraries */
use dispatcher::{Dispatcher, DispatcherRuntime};
use shared::{Request, StatusSnapshot};

/* Modules */
mod config;
mod dispatcher;
mod shared;

fn cli() -> Command<'static> {
    Command::new("elevator_bank")
        .about("Simulates a bank of elevator cars dispatched to hall calls")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .help("Seed for the random request generator"),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .takes_value(true)
                .help("Stop after this many time units"),
        )
        .arg(
            Arg::new("request")
                .short('r')
                .long("request")
                .takes_value(true)
                .multiple_occurrences(true)
                .help("Hall call to submit at startup, as FLOOR:DIR (e.g. 3:up)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print status snapshots as JSON lines"),
        )
}

fn render(snapshot: &StatusSnapshot, json: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("Failed to serialize snapshot: {}", e),
        }
    } else {
        for line in snapshot.lines() {
            println!("{}", line);
        }
        println!();
    }
}

fn startup_requests(matches: &ArgMatches) -> Vec<Request> {
    matches
        .values_of("request")
        .map(|values| values.map(|value| unwrap_or_exit!(value.parse::<Request>())).collect())
        .unwrap_or_default()
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    let json = matches.is_present("json");

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = unwrap_or_exit!(config::load_config(Path::new(config_path)));
    if matches.is_present("seed") {
        config.generator.seed = Some(unwrap_or_exit!(matches.value_of_t::<u64>("seed")));
    }
    let duration = if matches.is_present("duration") {
        Some(unwrap_or_exit!(matches.value_of_t::<u64>("duration")))
    } else {
        None
    };
    let requests = startup_requests(&matches);

    // Start the dispatcher
    let dispatcher = unwrap_or_exit!(Dispatcher::new(&config));
    let (runtime_thread, handle) = unwrap_or_exit!(DispatcherRuntime::spawn(
        dispatcher,
        config.timing.time_unit(),
    ));
    info!(
        "Dispatching {} cars over floors {}..={}",
        config.bank.n_cars, config.bank.min_floor, config.bank.max_floor
    );

    let subscription = unwrap_or_exit!(handle.subscribe());
    for request in requests {
        if let Err(e) = handle.submit(request) {
            warn!("Request {} rejected: {}", request, e);
        }
    }

    let generator_ticker = cbc::tick(config.generator_period());
    let deadline = match duration {
        Some(units) => cbc::after(Duration::from_millis(
            config.timing.time_unit_ms.saturating_mul(units),
        )),
        None => cbc::never(),
    };

    let mut running = true;
    while running {
        running = cbc::select! {
            recv(subscription.snapshot_rx) -> snapshot => {
                match snapshot {
                    Ok(snapshot) => {
                        render(&snapshot, json);
                        true
                    }
                    Err(_) => {
                        error!("Status feed closed unexpectedly");
                        false
                    }
                }
            },
            recv(generator_ticker) -> _ => {
                match handle.generate_random_request() {
                    Ok(request) => {
                        info!("Generated request: {}", request);
                        true
                    }
                    Err(e) => {
                        error!("Failed to generate request: {}", e);
                        false
                    }
                }
            },
            recv(deadline) -> _ => {
                info!("Simulation time is up");
                false
            },
        };
    }

    // Teardown: stop listening, stop generating, stop the bank
    let _ = handle.unsubscribe(subscription.id);
    let _ = handle.terminate();
    match runtime_thread.join() {
        Ok(dispatcher) => {
            info!(
                "Handled {} requests in {} time units",
                dispatcher.request_log().len(),
                dispatcher.now().0
            );
            for (floor, directions) in dispatcher.floor_queues() {
                info!("Floor {}: {} calls", floor, directions.len());
            }
            render(&dispatcher.snapshot(), json);
        }
        Err(_) => error!("Dispatcher thread panicked"),
    }
}
