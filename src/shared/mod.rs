pub mod error;
pub mod macros;
pub mod structs;
pub mod structs_tests;
pub mod time;

pub use error::ConfigError;
pub use error::RuntimeError;
pub use error::ValidationError;
pub use structs::Car;
pub use structs::CarReport;
pub use structs::CarStatus;
pub use structs::Direction;
pub use structs::Request;
pub use structs::StatusSnapshot;
pub use time::Tick;
