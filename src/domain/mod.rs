// Domain layer: catalog and quote models plus the ports the core depends on.

pub mod model;
pub mod ports;
