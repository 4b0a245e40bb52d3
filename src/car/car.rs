use crate::shared::{CarSnapshot, Direction};
use std::sync::Mutex;

/**
 * Owns one elevator car's travel state.
 *
 * A `Car` keeps two ordered stop queues and a travel direction, and exposes
 * queue mutation and movement operations that are safe under concurrent
 * access. All mutable fields live behind the car's own mutex; every public
 * operation acquires that lock exactly once.
 *
 * # Fields
 * - `id`:          Stable identifier used by the dispatcher and front ends.
 * - `capacity`:    Rated passenger capacity. Informational only, never enforced.
 * - `min_floor`:   Lowest floor the car serves.
 * - `max_floor`:   Highest floor the car serves.
 * - `state`:       Lock-guarded mutable state (floor, direction, stop queues).
 *
 */
pub struct Car {
    id: String,
    capacity: u8,
    min_floor: u8,
    max_floor: u8,
    state: Mutex<CarState>,
}

struct CarState {
    current_floor: u8,
    direction: Direction,
    // up_stops ascending, down_stops descending; head is always the next stop.
    up_stops: Vec<u8>,
    down_stops: Vec<u8>,
}

impl Car {
    pub fn new(id: String, capacity: u8, min_floor: u8, max_floor: u8) -> Car {
        Car {
            id,
            capacity,
            min_floor,
            max_floor,
            state: Mutex::new(CarState {
                current_floor: min_floor,
                direction: Direction::Idle,
                up_stops: Vec::new(),
                down_stops: Vec::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    pub fn current_floor(&self) -> u8 {
        self.state.lock().unwrap().current_floor
    }

    /// Queue a stop at `floor`. Returns `false` for out-of-bounds floors and
    /// stops already pending; a stop at the current floor counts as served
    /// immediately and returns `true` without touching the queues.
    pub fn add_stop(&self, floor: u8) -> bool {
        if floor < self.min_floor || floor > self.max_floor {
            return false;
        }

        let mut state = self.state.lock().unwrap();

        if floor == state.current_floor {
            // Already here; treat as served.
            return true;
        }

        if state.up_stops.contains(&floor) || state.down_stops.contains(&floor) {
            return false;
        }

        if floor > state.current_floor {
            let idx = state.up_stops.binary_search(&floor).unwrap_or_else(|i| i);
            state.up_stops.insert(idx, floor);
        } else {
            let idx = state
                .down_stops
                .binary_search_by(|probe| probe.cmp(&floor).reverse())
                .unwrap_or_else(|i| i);
            state.down_stops.insert(idx, floor);
        }

        // An idle car commits to the side that just received work.
        if state.direction == Direction::Idle {
            state.direction = if !state.up_stops.is_empty() {
                Direction::Up
            } else {
                Direction::Down
            };
        }

        true
    }

    /// Next floor the car is heading for, normalizing the direction on the
    /// way: an idle car adopts whichever side has work, and a car whose
    /// active queue has drained flips to the opposite queue before idling.
    pub fn next_target(&self) -> Option<u8> {
        let mut state = self.state.lock().unwrap();
        Self::next_target_locked(&mut state)
    }

    fn next_target_locked(state: &mut CarState) -> Option<u8> {
        if state.direction == Direction::Idle {
            if !state.up_stops.is_empty() {
                state.direction = Direction::Up;
            } else if !state.down_stops.is_empty() {
                state.direction = Direction::Down;
            } else {
                return None;
            }
        }

        match state.direction {
            Direction::Up => {
                if let Some(&floor) = state.up_stops.first() {
                    return Some(floor);
                }
                if let Some(&floor) = state.down_stops.first() {
                    state.direction = Direction::Down;
                    return Some(floor);
                }
                state.direction = Direction::Idle;
                None
            }
            Direction::Down => {
                if let Some(&floor) = state.down_stops.first() {
                    return Some(floor);
                }
                if let Some(&floor) = state.up_stops.first() {
                    state.direction = Direction::Up;
                    return Some(floor);
                }
                state.direction = Direction::Idle;
                None
            }
            // Normalized above; only reachable with both queues empty.
            Direction::Idle => None,
        }
    }

    /// Advance the car one floor toward its next target. Returns the floor
    /// after moving, or `None` if the car has nothing to do. Reaching the
    /// target pops exactly one stop, the matching queue head.
    pub fn step_one_floor(&self) -> Option<u8> {
        let mut state = self.state.lock().unwrap();
        let target = Self::next_target_locked(&mut state)?;

        if state.current_floor < target {
            state.current_floor += 1;
            state.direction = Direction::Up;
        } else if state.current_floor > target {
            state.current_floor -= 1;
            state.direction = Direction::Down;
        }

        if state.current_floor == target {
            self.mark_floor_reached(&mut state, target);
        }

        Some(state.current_floor)
    }

    fn mark_floor_reached(&self, state: &mut CarState, floor: u8) {
        let up_head = state.up_stops.first().copied();
        let down_head = state.down_stops.first().copied();

        match (up_head, down_head) {
            (Some(head), _) if head == floor => {
                state.up_stops.remove(0);
            }
            (_, Some(head)) if head == floor => {
                state.down_stops.remove(0);
            }
            _ => panic!(
                "car {}: arrived at floor {} with no matching queue head (up: {:?}, down: {:?})",
                self.id, floor, state.up_stops, state.down_stops
            ),
        }

        state.direction = if !state.up_stops.is_empty() {
            Direction::Up
        } else if !state.down_stops.is_empty() {
            Direction::Down
        } else {
            Direction::Idle
        };
    }

    /// True if the car is committed to `direction` and `floor` lies ahead of
    /// it, so it can pick up there without deviating. Idle cars never match.
    pub fn will_pass_floor_in_direction(&self, floor: u8, direction: Direction) -> bool {
        let state = self.state.lock().unwrap();

        if state.direction != direction {
            return false;
        }

        match direction {
            Direction::Up => floor >= state.current_floor,
            Direction::Down => floor <= state.current_floor,
            Direction::Idle => false,
        }
    }

    pub fn is_idle(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.direction == Direction::Idle
            && state.up_stops.is_empty()
            && state.down_stops.is_empty()
    }

    pub fn snapshot(&self) -> CarSnapshot {
        let state = self.state.lock().unwrap();
        CarSnapshot {
            id: self.id.clone(),
            floor: state.current_floor,
            direction: state.direction,
            up_stops: state.up_stops.clone(),
            down_stops: state.down_stops.clone(),
        }
    }
}
