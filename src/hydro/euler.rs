use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};
use crate::error::Error;




#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]

/**
 * The gas state in a single grid cell of a one-dimensional tube, for a
 * calorically perfect gas. The total energy is per unit volume, so that the
 * specific total energy is `total_energy / mass_density`. Derived
 * quantities are computed on demand and never stored.
 */
pub struct State {
    mass_density: f64,
    velocity: f64,
    total_energy: f64,
    gamma_law_index: f64,
}




#[derive(Clone, Copy, Debug, PartialEq)]

/**
 * Conserved densities (mass, momentum, total energy) of a 1D gas state
 */
pub struct Conserved(f64, f64, f64);




// ============================================================================
impl State {

    pub fn new(mass_density: f64, velocity: f64, total_energy: f64, gamma_law_index: f64) -> Self {
        Self { mass_density, velocity, total_energy, gamma_law_index }
    }

    /**
     * Build the state with the given gas pressure, by solving
     * p = (gamma - 1) (E - rho u^2 / 2) for the total energy E.
     */
    pub fn from_pressure(mass_density: f64, velocity: f64, gas_pressure: f64, gamma_law_index: f64) -> Result<Self, Error> {
        if mass_density == 0.0 {
            return Err(Error::DivisionByZero("mass density"))
        }
        if !(gamma_law_index > 1.0) {
            return Err(Error::Domain(gamma_law_index))
        }
        let ek = 0.5 * mass_density * velocity * velocity;
        let et = gas_pressure / (gamma_law_index - 1.0) + ek;
        Ok(Self::new(mass_density, velocity, et, gamma_law_index))
    }

    pub fn mass_density(&self) -> f64 {
        self.mass_density
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    pub fn gamma_law_index(&self) -> f64 {
        self.gamma_law_index
    }

    pub fn specific_kinetic_energy(&self) -> f64 {
        0.5 * self.velocity * self.velocity
    }

    pub fn specific_internal_energy(&self) -> Result<f64, Error> {
        if self.mass_density == 0.0 {
            Err(Error::DivisionByZero("mass density"))
        } else {
            Ok(self.total_energy / self.mass_density - self.specific_kinetic_energy())
        }
    }

    /**
     * The radicand of the sound speed. It is returned as-is, so it may be
     * negative for a thermodynamically inconsistent state.
     */
    pub fn sound_speed_squared(&self) -> Result<f64, Error> {
        let g = self.gamma_law_index;
        Ok(g * (g - 1.0) * self.specific_internal_energy()?)
    }

    pub fn speed_of_sound(&self) -> Result<f64, Error> {
        let cs2 = self.sound_speed_squared()?;

        if cs2 >= 0.0 {
            Ok(cs2.sqrt())
        } else {
            Err(Error::Domain(cs2))
        }
    }

    pub fn pressure(&self) -> Result<f64, Error> {
        let cs = self.speed_of_sound()?;

        if self.gamma_law_index == 0.0 {
            Err(Error::DivisionByZero("gamma law index"))
        } else {
            Ok(self.mass_density * cs * cs / self.gamma_law_index)
        }
    }

    pub fn mach_number(&self) -> Result<f64, Error> {
        let cs = self.speed_of_sound()?;

        if cs > 0.0 {
            Ok(self.velocity.abs() / cs)
        } else if self.velocity == 0.0 {
            Ok(0.0)
        } else {
            Err(Error::Domain(cs))
        }
    }

    pub fn outer_wavespeeds(&self) -> Result<(f64, f64), Error> {
        let cs = self.speed_of_sound()?;
        let vn = self.velocity;
        Ok((vn - cs, vn + cs))
    }

    pub fn max_signal_speed(&self) -> Result<f64, Error> {
        Ok(self.velocity.abs() + self.speed_of_sound()?)
    }

    pub fn to_conserved(&self) -> Conserved {
        Conserved(
            self.mass_density,
            self.mass_density * self.velocity,
            self.total_energy,
        )
    }
}




// ============================================================================
impl Conserved {

    pub fn new(mass_density: f64, momentum: f64, energy_density: f64) -> Self {
        Self(mass_density, momentum, energy_density)
    }

    pub fn mass_density(&self) -> f64 {
        self.0
    }

    pub fn momentum(&self) -> f64 {
        self.1
    }

    pub fn energy_density(&self) -> f64 {
        self.2
    }

    pub fn to_state(&self, gamma_law_index: f64) -> Result<State, Error> {
        if self.mass_density() == 0.0 {
            Err(Error::DivisionByZero("mass density"))
        } else if self.mass_density() < 0.0 {
            Err(Error::Domain(self.mass_density()))
        } else {
            let v = self.momentum() / self.mass_density();
            Ok(State::new(self.mass_density(), v, self.energy_density(), gamma_law_index))
        }
    }
}




// ============================================================================
impl Add<Conserved> for Conserved {
    type Output = Conserved;
    fn add(self, u: Self) -> Conserved {
        Conserved(self.0 + u.0, self.1 + u.1, self.2 + u.2)
    }
}

impl Sub<Conserved> for Conserved {
    type Output = Self;
    fn sub(self, u: Self) -> Self {
        Self(self.0 - u.0, self.1 - u.1, self.2 - u.2)
    }
}

impl Mul<f64> for Conserved {
    type Output = Self;
    fn mul(self, a: f64) -> Self {
        Self(self.0 * a, self.1 * a, self.2 * a)
    }
}

impl Div<f64> for Conserved {
    type Output = Self;
    fn div(self, a: f64) -> Self {
        Self(self.0 / a, self.1 / a, self.2 / a)
    }
}
