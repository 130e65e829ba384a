// Domain layer: tower models and the ports the core talks to collaborators through.

pub mod model;
pub mod ports;
