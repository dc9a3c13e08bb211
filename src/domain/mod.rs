// Domain layer: experiment and result value types plus the ports the engine depends on.

pub mod model;
pub mod ports;
