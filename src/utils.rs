//! Utils

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::Vec3;

/// A vector as it appears in scene files: `[x, y, z]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerdeVector(pub [f64; 3]);
impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.0[0], v.0[1], v.0[2])
    }
}
impl From<Vec3> for SerdeVector {
    fn from(v: Vec3) -> Self {
        Self([v[0], v[1], v[2]])
    }
}

/// Compute a random unit vector, uniform over the sphere
///
/// Randomly generate vectors in the cube until one lands inside the unit ball, then project
/// it out to the surface. Points too close to the origin are rejected since they would
/// not survive normalization.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = gen_random(rng, -1.0, 1.0);
        let len_sq = p.norm_squared();

        if 1e-160 < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Generate a random vector inside a unit disk on the XY plane
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate a random vector with every component in [min, max)
pub fn gen_random(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        rng.gen_range(min..max),
        rng.gen_range(min..max),
        rng.gen_range(min..max),
    )
}

/// Whether every component is close enough to zero to make the vector useless as a direction
pub fn near_zero(v: &Vec3) -> bool {
    const S: f64 = 1e-8;
    v.iter().all(|c| c.abs() < S)
}

/// Mirror `v` about the plane with normal `n`
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit vector `uv` through a surface with normal `n` according to Snell's law
///
/// `etai_over_etat` is the ratio of the refractive index being left over the one being
/// entered.
pub fn refract(uv: &Vec3, n: &Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.norm_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
