// Domain layer: search inputs, provider records and the fetch port.

pub mod model;
pub mod ports;
