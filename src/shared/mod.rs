pub mod macros;
pub mod structs;

pub use structs::CarSnapshot;
pub use structs::Direction;
pub use structs::HallRequest;
