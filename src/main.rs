/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::info;
use std::io::BufRead;
use std::sync::Arc;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use elevator_system::config;
use elevator_system::shared::{Direction, HallRequest};
use elevator_system::unwrap_or_exit;
use elevator_system::Dispatcher;

/* Main */
fn main() {
    env_logger::init();

    let matches = Command::new("elevator-system")
        .about("Discrete-tick elevator fleet simulator")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("cars")
                .long("cars")
                .takes_value(true)
                .help("Override the configured fleet size"),
        )
        .get_matches();

    // Load the configuration
    let mut config = unwrap_or_exit!(config::load_config(matches.value_of("config").unwrap()));
    if let Some(n_cars) = matches.value_of("cars") {
        config.fleet.n_cars = unwrap_or_exit!(n_cars.parse::<u8>());
    }

    // Create the dispatcher and its fleet
    let dispatcher = Arc::new(Dispatcher::new(&config.fleet));
    info!(
        "fleet of {} cars, floors {}..={}",
        config.fleet.n_cars, config.fleet.min_floor, config.fleet.max_floor
    );

    // Forward stdin lines to the event loop
    let (line_tx, line_rx) = cbc::unbounded::<String>();
    let input_thread = Builder::new().name("input".into());
    unwrap_or_exit!(input_thread.spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    }));

    print_help();

    // Event loop: ticks advance the fleet, commands come from stdin
    let ticker = cbc::tick(Duration::from_millis(config.simulation.tick_interval_ms));
    let mut running = false;
    let mut request_counter: u64 = 0;

    loop {
        cbc::select! {
            recv(ticker) -> _ => {
                if running {
                    dispatcher.step();
                }
            }
            recv(line_rx) -> line => {
                match line {
                    Ok(line) => {
                        if !handle_command(&dispatcher, &mut running, &mut request_counter, &line) {
                            break;
                        }
                    }
                    Err(_) => break, // stdin closed
                }
            }
        }
    }
}

fn handle_command(
    dispatcher: &Dispatcher,
    running: &mut bool,
    request_counter: &mut u64,
    line: &str,
) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();

    match words.as_slice() {
        ["start"] => {
            *running = true;
            println!("simulation running");
        }
        ["stop"] => {
            *running = false;
            println!("simulation paused");
        }
        ["step"] => {
            dispatcher.step();
            print_state(dispatcher);
        }
        ["call", floor, direction] => {
            let floor = match floor.parse::<u8>() {
                Ok(floor) => floor,
                Err(_) => {
                    println!("invalid floor: {}", floor);
                    return true;
                }
            };
            let direction = match *direction {
                "up" => Direction::Up,
                "down" => Direction::Down,
                other => {
                    println!("invalid direction: {}", other);
                    return true;
                }
            };

            *request_counter += 1;
            let request = HallRequest::new(format!("req-{}", request_counter), floor, direction);
            match dispatcher.request_elevator(&request) {
                Some(car_id) => println!("{} -> {}", request.id, car_id),
                None => println!("{} rejected", request.id),
            }
        }
        ["go", car_id, floor] => {
            let floor = match floor.parse::<u8>() {
                Ok(floor) => floor,
                Err(_) => {
                    println!("invalid floor: {}", floor);
                    return true;
                }
            };
            if dispatcher.select_destination(car_id, floor) {
                println!("{} will stop at floor {}", car_id, floor);
            } else {
                println!("destination rejected");
            }
        }
        ["state"] => print_state(dispatcher),
        ["quit"] | ["exit"] => return false,
        [] => {}
        _ => print_help(),
    }

    true
}

fn print_state(dispatcher: &Dispatcher) {
    let snapshot = dispatcher.snapshot();
    println!("{}", unwrap_or_exit!(serde_json::to_string_pretty(&snapshot)));
}

fn print_help() {
    println!("commands:");
    println!("  start                      run ticks continuously");
    println!("  stop                       pause ticking");
    println!("  step                       advance one tick");
    println!("  call <floor> <up|down>     place a hall call");
    println!("  go <car-id> <floor>        pick a destination inside a car");
    println!("  state                      print the fleet snapshot");
    println!("  quit                       exit");
}
