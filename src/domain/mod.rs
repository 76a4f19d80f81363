// Domain layer: option structs, date range model and the clock port.

pub mod model;
pub mod ports;
