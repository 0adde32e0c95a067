pub mod broadcast;
pub mod dispatcher;
pub mod generator;
pub mod movement;
pub mod runtime;
pub mod timers;

pub mod broadcast_tests;

pub use dispatcher::Dispatcher;
pub use runtime::{DispatcherHandle, DispatcherRuntime};
