//! Module providing the strongly typed metabolic model produced by a conversion.

pub mod biomass;
pub mod compartment;
pub mod compound;
pub mod gpr;
pub mod model;
pub mod reaction;
