/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Mutex;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::Car;
use crate::config::FleetConfig;
use crate::shared::{CarSnapshot, Direction, HallRequest};

/**
 * Assigns hall calls to cars and advances the fleet.
 *
 * The `Dispatcher` owns the fleet for the life of the process: cars are
 * created once at startup and only ever mutated through `add_stop` and
 * `step_one_floor`. Hall calls are matched to a car with a three-tier
 * policy (committed match, nearest idle, nearest overall); car-interior
 * destination picks are forwarded to the named car.
 *
 * Locking: the dispatcher's own lock guards the assignment map and makes
 * the selection-then-commit sequence in `request_elevator` atomic. It is
 * always acquired before any car's lock, never after. `step` and
 * `snapshot` rely on the per-car locks alone, so ticking interleaves
 * freely with concurrent requests.
 *
 * # Fields
 * - `cars`:         Fleet in fixed index order; the tie-break for distance
 *                   ties is lowest index.
 * - `assignments`:  Request id -> car id, for auditing. Reusing a request
 *                   id silently overwrites the old entry.
 * - `min_floor`:    Lowest served floor, from configuration.
 * - `max_floor`:    Highest served floor, from configuration.
 *
 */
pub struct Dispatcher {
    cars: Vec<Car>,
    assignments: Mutex<HashMap<String, String>>,
    min_floor: u8,
    max_floor: u8,
}

impl Dispatcher {
    pub fn new(config: &FleetConfig) -> Dispatcher {
        let cars = (0..config.n_cars)
            .map(|i| {
                Car::new(
                    format!("car-{}", i),
                    config.capacity,
                    config.min_floor,
                    config.max_floor,
                )
            })
            .collect();

        Dispatcher {
            cars,
            assignments: Mutex::new(HashMap::new()),
            min_floor: config.min_floor,
            max_floor: config.max_floor,
        }
    }

    /// Build a dispatcher over an explicit fleet. Floor bounds must match
    /// the cars' own.
    pub fn with_cars(cars: Vec<Car>, min_floor: u8, max_floor: u8) -> Dispatcher {
        Dispatcher {
            cars,
            assignments: Mutex::new(HashMap::new()),
            min_floor,
            max_floor,
        }
    }

    /// Assign a hall call to a car and queue the pickup floor on it.
    /// Returns the chosen car's id, or `None` for an invalid request or an
    /// empty fleet.
    pub fn request_elevator(&self, request: &HallRequest) -> Option<String> {
        if !request.is_valid(self.min_floor, self.max_floor) {
            warn!(
                "rejected hall request {}: floor {} {:?} out of range or direction invalid",
                request.id, request.floor, request.direction
            );
            return None;
        }

        // Selection and commit happen under the assignments lock.
        let mut assignments = self.assignments.lock().unwrap();

        let car = self.select_best_car(request.floor, request.direction)?;
        car.add_stop(request.floor);
        assignments.insert(request.id.clone(), car.id().to_string());

        info!(
            "hall request {} (floor {} {:?}) assigned to {}",
            request.id, request.floor, request.direction, car.id()
        );
        Some(car.id().to_string())
    }

    /// Forward a car-interior destination pick to the named car.
    pub fn select_destination(&self, car_id: &str, floor: u8) -> bool {
        if floor < self.min_floor || floor > self.max_floor {
            warn!("rejected destination {} for {}: out of range", floor, car_id);
            return false;
        }

        match self.cars.iter().find(|car| car.id() == car_id) {
            Some(car) => car.add_stop(floor),
            None => {
                warn!("rejected destination {}: unknown car {}", floor, car_id);
                false
            }
        }
    }

    /// One synchronous simulation tick: every car advances at most one
    /// floor, in fleet order.
    pub fn step(&self) {
        for car in &self.cars {
            if let Some(floor) = car.step_one_floor() {
                debug!("{} now at floor {}", car.id(), floor);
            }
        }
    }

    /// Consistent per-car read of the whole fleet. Never mutates.
    pub fn snapshot(&self) -> Vec<CarSnapshot> {
        self.cars.iter().map(|car| car.snapshot()).collect()
    }

    /// Audit read: which car a hall request was assigned to.
    pub fn assignment(&self, request_id: &str) -> Option<String> {
        self.assignments.lock().unwrap().get(request_id).cloned()
    }

    fn select_best_car(&self, floor: u8, direction: Direction) -> Option<&Car> {
        // 1) Cars already committed toward the floor in the same direction.
        let committed = self.closest_by_distance(floor, |car| {
            car.will_pass_floor_in_direction(floor, direction)
        });
        if committed.is_some() {
            return committed;
        }

        // 2) Nearest idle car.
        let idle = self.closest_by_distance(floor, |car| car.is_idle());
        if idle.is_some() {
            return idle;
        }

        // 3) Nearest overall; may force a later reversal.
        self.closest_by_distance(floor, |_| true)
    }

    /// Minimum `|current_floor - floor|` over cars passing the filter; ties
    /// go to the lowest fleet index (only a strict improvement replaces the
    /// running best).
    fn closest_by_distance<F>(&self, floor: u8, filter: F) -> Option<&Car>
    where
        F: Fn(&Car) -> bool,
    {
        let mut best: Option<(&Car, u8)> = None;

        for car in &self.cars {
            if !filter(car) {
                continue;
            }
            let dist = car.current_floor().abs_diff(floor);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((car, dist));
            }
        }

        best.map(|(car, _)| car)
    }
}
