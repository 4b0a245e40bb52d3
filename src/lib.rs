/* Modules */
pub mod car;
pub mod config;
pub mod dispatch;
pub mod shared;

pub use car::Car;
pub use dispatch::Dispatcher;
pub use shared::CarSnapshot;
pub use shared::Direction;
pub use shared::HallRequest;
