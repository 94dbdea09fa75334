//! Thermodynamics of a single grid cell in a one-dimensional tube of
//! calorically perfect gas.

pub mod euler;
