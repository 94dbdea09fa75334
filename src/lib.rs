//! Shocktube is the groundwork for a one-dimensional simulation of the Euler
//! equations in a shock tube: a closed duct split by a diaphragm into a
//! high-pressure driver section and a low-pressure driven section. It
//! provides the thermodynamic state of a single grid cell for a calorically
//! perfect gas, and a one-dimensional mesh whose points can be redistributed
//! to concentrate resolution where a flow variable varies rapidly
//! (equidistribution). The `setup` module ties the two together to build the
//! initial condition of a run on a refined mesh.

pub mod error;
pub mod hydro;
pub mod meshing;
pub mod setup;

pub use error::Error;
