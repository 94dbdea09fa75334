use std::fmt;
use std::str::FromStr;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::error::Error;
use crate::hydro::euler::State;
use crate::meshing::Mesh;




#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]

/**
 * Gas on one side of the diaphragm, initially at rest
 */
pub struct Side {
    pub mass_density: f64,
    pub pressure: f64,
}




#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]

/**
 * The flow variable whose variation drives mesh redistribution
 */
pub enum RefinementField {
    Density,
    Pressure,
}




#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]

/**
 * Parameters of a shock tube run. The diaphragm sits at `x = driver_length`;
 * the driver gas fills `[0, driver_length)` and the driven gas fills the
 * remaining unit length of the tube.
 */
pub struct ShockTubeConfig {
    pub num_points: usize,
    pub driver_length: f64,
    pub gamma_law_index: f64,
    pub driver: Side,
    pub driven: Side,
    pub refinement_passes: usize,
    pub refinement_field: RefinementField,
}




#[derive(Debug, Serialize, Deserialize)]

/**
 * Everything a run produces, in a form suitable for writing to disk
 */
pub struct Report {
    pub config: ShockTubeConfig,
    pub uniform_grid: Vec<f64>,
    pub active_grid: Vec<f64>,
    pub states: Vec<State>,
    pub pressure: Vec<f64>,
}




// ============================================================================
impl Default for ShockTubeConfig {
    fn default() -> Self {
        Self {
            num_points: 100,
            driver_length: 1.0,
            gamma_law_index: 1.4,
            driver: Side { mass_density: 1.0, pressure: 1.0 },
            driven: Side { mass_density: 0.125, pressure: 0.1 },
            refinement_passes: 1,
            refinement_field: RefinementField::Density,
        }
    }
}

impl ShockTubeConfig {

    pub fn validate(&self) -> Result<(), Error> {
        if self.num_points < 2 {
            return Err(Error::TooFewPoints(self.num_points))
        }
        if !(self.driver_length > 0.0 && self.driver_length.is_finite()) {
            return Err(Error::NonPositiveLength(self.driver_length))
        }
        if !(self.gamma_law_index > 1.0) {
            return Err(Error::Domain(self.gamma_law_index))
        }
        for side in &[self.driver, self.driven] {
            if !(side.mass_density > 0.0) {
                return Err(Error::Domain(side.mass_density))
            }
            if !(side.pressure > 0.0) {
                return Err(Error::Domain(side.pressure))
            }
        }
        Ok(())
    }

    pub fn state_at(&self, x: f64) -> Result<State, Error> {
        let side = if x < self.driver_length { self.driver } else { self.driven };
        State::from_pressure(side.mass_density, 0.0, side.pressure, self.gamma_law_index)
    }

    pub fn initial_condition(&self, grid: &[f64]) -> Result<Vec<State>, Error> {
        grid.iter().map(|&x| self.state_at(x)).collect()
    }
}




// ============================================================================
impl FromStr for RefinementField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "density" => Ok(RefinementField::Density),
            "pressure" => Ok(RefinementField::Pressure),
            _ => Err(format!("unknown refinement field '{}' (expected density or pressure)", s)),
        }
    }
}

impl fmt::Display for RefinementField {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            RefinementField::Density => write!(fmt, "density"),
            RefinementField::Pressure => write!(fmt, "pressure"),
        }
    }
}




// ============================================================================
impl Report {

    pub fn new(config: ShockTubeConfig, mesh: &Mesh, states: Vec<State>) -> Result<Self, Error> {
        let pressure = field_of(&states, RefinementField::Pressure)?;

        Ok(Self {
            config,
            uniform_grid: mesh.uniform_grid().to_vec(),
            active_grid: mesh.active_grid().to_vec(),
            states,
            pressure,
        })
    }
}




/**
 * Extract the scalar field used to drive redistribution from a sequence of
 * cell states.
 */
pub fn field_of(states: &[State], field: RefinementField) -> Result<Vec<f64>, Error> {
    match field {
        RefinementField::Density => Ok(states.iter().map(State::mass_density).collect()),
        RefinementField::Pressure => states.iter().map(State::pressure).collect(),
    }
}




/**
 * Build the mesh for a run, and apply the configured number of
 * redistribution passes. Each pass samples the initial condition on the
 * active grid, redistributes on the chosen field, and commits the result.
 * Returns the final mesh together with the initial condition sampled on its
 * active grid.
 */
pub fn refine(config: &ShockTubeConfig) -> Result<(Mesh, Vec<State>), Error> {
    config.validate()?;

    let mut mesh = Mesh::new(config.num_points, config.driver_length)?;

    for pass in 0..config.refinement_passes {
        let states = config.initial_condition(mesh.active_grid())?;
        let field = field_of(&states, config.refinement_field)?;
        let grid = mesh.redistribute(&field)?;
        mesh.set_active_grid(grid)?;

        let smallest = mesh.cell_spacing().into_iter().fold(f64::INFINITY, f64::min);
        debug!("pass {}: smallest cell {:.6e}", pass, smallest);
    }
    info!(
        "refined {} times on {}",
        config.refinement_passes, config.refinement_field
    );

    let states = config.initial_condition(mesh.active_grid())?;
    Ok((mesh, states))
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn default_config_is_a_valid_sod_problem() {
        let config = ShockTubeConfig::default();
        assert!(config.validate().is_ok());

        let left = config.state_at(0.0).unwrap();
        let right = config.state_at(2.0).unwrap();
        assert!((left.pressure().unwrap() - 1.0).abs() < 1e-12);
        assert!((right.pressure().unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(right.mass_density(), 0.125);
        assert_eq!(config.state_at(1.0).unwrap(), right);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let config = ShockTubeConfig { num_points: 1, ..Default::default() };
        assert_eq!(config.validate(), Err(Error::TooFewPoints(1)));

        let config = ShockTubeConfig { gamma_law_index: 1.0, ..Default::default() };
        assert_eq!(config.validate(), Err(Error::Domain(1.0)));

        let config = ShockTubeConfig {
            driven: Side { mass_density: 0.0, pressure: 0.1 },
            ..Default::default()
        };
        assert!(refine(&config).is_err());
    }

    #[test]
    fn pressure_field_has_a_single_jump_at_the_diaphragm() {
        let config = ShockTubeConfig::default();
        let mesh = Mesh::new(config.num_points, config.driver_length).unwrap();
        let states = config.initial_condition(mesh.active_grid()).unwrap();
        let pressure = field_of(&states, RefinementField::Pressure).unwrap();
        let jumps = pressure.windows(2).filter(|w| (w[1] - w[0]).abs() > 1e-12).count();
        assert_eq!(pressure.len(), 100);
        assert_eq!(jumps, 1);
    }

    #[test]
    fn refinement_concentrates_points_at_the_diaphragm() {
        for &field in &[RefinementField::Density, RefinementField::Pressure] {
            let config = ShockTubeConfig {
                refinement_passes: 2,
                refinement_field: field,
                ..Default::default()
            };
            let (mesh, states) = refine(&config).unwrap();
            let grid = mesh.active_grid();
            let spacing = mesh.cell_spacing();
            let (smallest, _) = spacing
                .iter()
                .enumerate()
                .fold((0, f64::INFINITY), |(k, m), (i, &dx)| if dx < m { (i, dx) } else { (k, m) });

            assert_eq!(states.len(), grid.len());
            assert!(grid[smallest] < config.driver_length);
            assert!(grid[smallest + 1] >= config.driver_length);
            assert!(spacing[smallest] < 0.5 * spacing[0]);
        }
    }

    #[test]
    fn zero_passes_keeps_the_uniform_grid() {
        let config = ShockTubeConfig { refinement_passes: 0, ..Default::default() };
        let (mesh, _) = refine(&config).unwrap();
        assert_eq!(mesh.active_grid(), mesh.uniform_grid());
    }

    #[test]
    fn refinement_field_parses_from_text() {
        assert_eq!("Density".parse::<RefinementField>(), Ok(RefinementField::Density));
        assert_eq!("pressure".parse::<RefinementField>(), Ok(RefinementField::Pressure));
        assert!("velocity".parse::<RefinementField>().is_err());
        assert_eq!(RefinementField::Pressure.to_string(), "pressure");
    }

    #[test]
    fn report_survives_cbor_encoding() {
        let config = ShockTubeConfig { num_points: 20, ..Default::default() };
        let (mesh, states) = refine(&config).unwrap();
        let report = Report::new(config.clone(), &mesh, states).unwrap();

        let mut buffer = Vec::new();
        ciborium::ser::into_writer(&report, &mut buffer).unwrap();
        let back: Report = ciborium::de::from_reader(&buffer[..]).unwrap();

        assert_eq!(back.config, config);
        assert_eq!(back.active_grid, mesh.active_grid());
        assert_eq!(back.pressure.len(), 20);
    }
}
