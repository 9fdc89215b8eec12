// Domain layer: view state models and ports (interfaces) for providers and timers.

pub mod model;
pub mod ports;
