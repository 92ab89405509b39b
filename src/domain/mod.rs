// Domain layer: feed and catalog models plus the ports adapters implement.

pub mod model;
pub mod ports;
