/*
 * Unit tests for the dispatch module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_idle_car_gets_hall_call
 * - test_committed_car_takes_in_path_pickup
 * - test_fallback_picks_nearest_despite_reversal
 * - test_idle_tier_beats_closer_busy_car
 * - test_distance_tie_goes_to_lowest_index
 * - test_invalid_requests_rejected
 * - test_empty_fleet_rejects_requests
 * - test_select_destination
 * - test_destination_at_current_floor_is_a_no_op
 * - test_assignment_map_records_and_overwrites
 * - test_step_advances_fleet_in_lockstep
 * - test_concurrent_requests_and_ticks
 *
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatcher_tests {
    use crate::car::Car;
    use crate::dispatch::Dispatcher;
    use crate::shared::{Direction, HallRequest};
    use std::sync::Arc;
    use std::thread::spawn;

    const MIN_FLOOR: u8 = 0;
    const MAX_FLOOR: u8 = 10;

    fn setup_fleet(n_cars: u8) -> Dispatcher {
        let cars = (0..n_cars)
            .map(|i| Car::new(format!("car-{}", i), 8, MIN_FLOOR, MAX_FLOOR))
            .collect();
        Dispatcher::with_cars(cars, MIN_FLOOR, MAX_FLOOR)
    }

    fn hall_request(id: &str, floor: u8, direction: Direction) -> HallRequest {
        HallRequest::new(id.to_string(), floor, direction)
    }

    #[test]
    fn test_idle_car_gets_hall_call() {
        // Purpose: scenario A — a single idle car at floor 0 takes the call

        // Arrange
        let dispatcher = setup_fleet(1);

        // Act
        let assigned = dispatcher.request_elevator(&hall_request("req-1", 5, Direction::Up));

        // Assert
        assert_eq!(assigned, Some("car-0".to_string()));
        let snapshot = dispatcher.snapshot()[0].clone();
        assert_eq!(snapshot.up_stops, vec![5]);
        assert_eq!(snapshot.direction, Direction::Up);
    }

    #[test]
    fn test_committed_car_takes_in_path_pickup() {
        // Purpose: scenario B — a car heading UP past the request floor is
        // preferred and the pickup slots into its run

        // Arrange: car-0 at floor 3, UP, up_stops = [5]
        let dispatcher = setup_fleet(1);
        dispatcher.request_elevator(&hall_request("req-1", 5, Direction::Up));
        for _ in 0..3 {
            dispatcher.step();
        }
        assert_eq!(dispatcher.snapshot()[0].floor, 3);

        // Act
        let assigned = dispatcher.request_elevator(&hall_request("req-2", 4, Direction::Up));

        // Assert
        assert_eq!(assigned, Some("car-0".to_string()));
        assert_eq!(dispatcher.snapshot()[0].up_stops, vec![4, 5]);
    }

    #[test]
    fn test_fallback_picks_nearest_despite_reversal() {
        // Purpose: scenario C — with every car moving away and none idle,
        // the nearest car is drafted even though it must reverse later

        // Arrange: both cars at floor 3, UP, heading for 5
        let dispatcher = setup_fleet(2);
        assert!(dispatcher.select_destination("car-0", 5));
        assert!(dispatcher.select_destination("car-1", 5));
        for _ in 0..3 {
            dispatcher.step();
        }

        // Act
        let assigned = dispatcher.request_elevator(&hall_request("req-1", 2, Direction::Down));

        // Assert: distance tie at 1, lowest index wins
        assert_eq!(assigned, Some("car-0".to_string()));
        assert_eq!(dispatcher.snapshot()[0].down_stops, vec![2]);
    }

    #[test]
    fn test_idle_tier_beats_closer_busy_car() {
        // Purpose: an idle car is preferred over a closer car committed the
        // wrong way

        // Arrange: car-0 busy at floor 3 heading UP, car-1 idle at floor 0
        let dispatcher = setup_fleet(2);
        assert!(dispatcher.select_destination("car-0", 5));
        for _ in 0..3 {
            dispatcher.step();
        }

        // Act: floor 2 DOWN — car-0 is closer but moving away
        let assigned = dispatcher.request_elevator(&hall_request("req-1", 2, Direction::Down));

        // Assert
        assert_eq!(assigned, Some("car-1".to_string()));
        assert_eq!(dispatcher.snapshot()[1].up_stops, vec![2]);
    }

    #[test]
    fn test_distance_tie_goes_to_lowest_index() {
        // Arrange: three idle cars, all at floor 0
        let dispatcher = setup_fleet(3);

        // Act
        let assigned = dispatcher.request_elevator(&hall_request("req-1", 4, Direction::Up));

        // Assert
        assert_eq!(assigned, Some("car-0".to_string()));
    }

    #[test]
    fn test_invalid_requests_rejected() {
        // Arrange
        let dispatcher = setup_fleet(1);

        // Act
        let idle_direction =
            dispatcher.request_elevator(&hall_request("req-1", 3, Direction::Idle));
        let out_of_bounds =
            dispatcher.request_elevator(&hall_request("req-2", MAX_FLOOR + 1, Direction::Up));

        // Assert: no assignment, no queue mutation
        assert_eq!(idle_direction, None);
        assert_eq!(out_of_bounds, None);
        assert_eq!(dispatcher.assignment("req-1"), None);
        assert_eq!(dispatcher.assignment("req-2"), None);
        let snapshot = dispatcher.snapshot()[0].clone();
        assert!(snapshot.up_stops.is_empty());
        assert!(snapshot.down_stops.is_empty());
    }

    #[test]
    fn test_empty_fleet_rejects_requests() {
        // Arrange
        let dispatcher = Dispatcher::with_cars(Vec::new(), MIN_FLOOR, MAX_FLOOR);

        // Act / Assert
        let assigned = dispatcher.request_elevator(&hall_request("req-1", 3, Direction::Up));
        assert_eq!(assigned, None);
        assert!(dispatcher.snapshot().is_empty());
    }

    #[test]
    fn test_select_destination() {
        // Arrange
        let dispatcher = setup_fleet(2);

        // Act / Assert
        assert!(dispatcher.select_destination("car-1", 7));
        assert_eq!(dispatcher.snapshot()[1].up_stops, vec![7]);

        // Unknown car and out-of-bounds floor are sentinel rejections
        assert!(!dispatcher.select_destination("car-9", 3));
        assert!(!dispatcher.select_destination("car-0", MAX_FLOOR + 1));
    }

    #[test]
    fn test_destination_at_current_floor_is_a_no_op() {
        // Purpose: scenario D — a destination at the car's floor is served
        // instantly and the next tick does not move the car

        // Arrange
        let dispatcher = setup_fleet(1);

        // Act
        let accepted = dispatcher.select_destination("car-0", MIN_FLOOR);
        dispatcher.step();

        // Assert
        assert!(accepted);
        let snapshot = dispatcher.snapshot()[0].clone();
        assert_eq!(snapshot.floor, MIN_FLOOR);
        assert_eq!(snapshot.direction, Direction::Idle);
        assert!(snapshot.up_stops.is_empty());
    }

    #[test]
    fn test_assignment_map_records_and_overwrites() {
        // Arrange
        let dispatcher = setup_fleet(2);

        // Act
        let first = dispatcher.request_elevator(&hall_request("req-1", 5, Direction::Up));
        assert_eq!(dispatcher.assignment("req-1"), first);

        // Reusing a request id overwrites the old entry silently
        let second = dispatcher.request_elevator(&hall_request("req-1", 2, Direction::Down));

        // Assert
        assert_eq!(dispatcher.assignment("req-1"), second);
    }

    #[test]
    fn test_step_advances_fleet_in_lockstep() {
        // Arrange
        let dispatcher = setup_fleet(2);
        assert!(dispatcher.select_destination("car-0", 4));
        assert!(dispatcher.select_destination("car-1", 6));

        // Act
        dispatcher.step();

        // Assert: each car moved exactly one floor on the same tick
        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot[0].floor, 1);
        assert_eq!(snapshot[1].floor, 1);
    }

    #[test]
    fn test_concurrent_requests_and_ticks() {
        // Purpose: hall calls, destination picks and ticks from different
        // threads never corrupt queue ordering or floor bounds

        // Arrange
        let dispatcher = Arc::new(setup_fleet(3));

        // Act
        let mut handles = Vec::new();
        for t in 0..4 {
            let dispatcher = Arc::clone(&dispatcher);
            handles.push(spawn(move || {
                for i in 0..20u8 {
                    let floor = (t * 20 + i) % (MAX_FLOOR + 1);
                    let direction = if floor < MAX_FLOOR {
                        Direction::Up
                    } else {
                        Direction::Down
                    };
                    let request =
                        hall_request(&format!("req-{}-{}", t, i), floor, direction);
                    dispatcher.request_elevator(&request);
                    dispatcher.select_destination("car-1", floor);
                }
            }));
        }
        let ticker = {
            let dispatcher = Arc::clone(&dispatcher);
            spawn(move || {
                for _ in 0..50 {
                    dispatcher.step();
                    dispatcher.snapshot();
                }
            })
        };
        for handle in handles {
            handle.join().unwrap();
        }
        ticker.join().unwrap();

        // Assert: per-car invariants hold once the dust settles
        for snapshot in dispatcher.snapshot() {
            assert!(snapshot.floor <= MAX_FLOOR);
            assert!(snapshot.up_stops.windows(2).all(|w| w[0] < w[1]));
            assert!(snapshot.down_stops.windows(2).all(|w| w[0] > w[1]));
            for floor in &snapshot.up_stops {
                assert!(!snapshot.down_stops.contains(floor));
            }
        }
    }
}
