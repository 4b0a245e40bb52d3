/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

/**
 * A pickup request made from a floor landing.
 *
 * # Fields
 * - `id`:          Caller-supplied identifier, kept for assignment auditing.
 * - `floor`:       Floor the caller is waiting on.
 * - `direction`:   Direction the caller wants to travel (never `Idle`).
 *
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HallRequest {
    pub id: String,
    pub floor: u8,
    pub direction: Direction,
}

impl HallRequest {
    pub fn new(id: String, floor: u8, direction: Direction) -> HallRequest {
        HallRequest {
            id,
            floor,
            direction,
        }
    }

    pub fn is_valid(&self, min_floor: u8, max_floor: u8) -> bool {
        if self.floor < min_floor || self.floor > max_floor {
            return false;
        }
        self.direction != Direction::Idle
    }
}

/// Read-only projection of one car's state, safe to hand to front ends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarSnapshot {
    pub id: String,
    pub floor: u8,
    pub direction: Direction,
    #[serde(rename = "upStops")]
    pub up_stops: Vec<u8>,
    #[serde(rename = "downStops")]
    pub down_stops: Vec<u8>,
}
