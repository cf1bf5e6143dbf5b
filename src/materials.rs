//! Implementation of materials

use std::sync::Arc;

use crate::{
    objects::HitRecord,
    utils::{self, SerdeVector},
    Color, Material, Ray,
};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Material
pub trait Scatterable {
    /// Continue `ray_in` from the hit, or `None` if the surface absorbs it
    fn try_scatter(
        &self,
        ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// Scatter Result
#[derive(Debug)]
pub struct ScatterResult {
    /// Attenuation Color
    pub attenuation: Color,
    /// Resulting Scattered Ray
    pub scattered: Ray,
}

/// Config for materials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialConfig {
    Lambertian(LambertianConfig),
    Metal(MetalConfig),
    Dielectric(DielectricConfig),
}

/// How a sphere names its material in a scene file: by reference to the scene's material
/// table, or spelled out in place
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    Named {
        #[serde(rename = "ref")]
        name: String,
    },
    Inline(MaterialConfig),
}

/// Generator from config
pub struct Generator;
impl Generator {
    pub fn from_config(config: MaterialConfig) -> Material {
        match config {
            MaterialConfig::Lambertian(c) => Arc::new(Lambertian::from_config(c)),
            MaterialConfig::Metal(c) => Arc::new(Metal::from_config(c)),
            MaterialConfig::Dielectric(c) => Arc::new(Dielectric::from_config(c)),
        }
    }
}

/// Lambertian Scatterer
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}
impl Lambertian {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_config(config: LambertianConfig) -> Self {
        Self::new(config.albedo.into())
    }
}
impl Scatterable for Lambertian {
    fn try_scatter(
        &self,
        _ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = hit_record.normal + utils::random_unit_vector(rng);

        // Protect against hit_record.normal and the random vector being exact opposites
        if utils::near_zero(&scatter_direction) {
            scatter_direction = hit_record.normal;
        }
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(hit_record.p, scatter_direction),
        })
    }
}

/// Lambertian Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LambertianConfig {
    pub albedo: SerdeVector,
}

/// Metal Scatterer
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}
impl Metal {
    /// `fuzz` is clamped to [0, 1]
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn from_config(config: MetalConfig) -> Self {
        Self::new(config.albedo.into(), config.fuzz)
    }
}
impl Scatterable for Metal {
    fn try_scatter(
        &self,
        ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = utils::reflect(&ray_in.dir, &hit_record.normal).normalize();
        let scattered = Ray::new(
            hit_record.p,
            reflected + self.fuzz * utils::random_unit_vector(rng),
        );
        // Fuzz may push the ray below the surface, which counts as absorbed
        if scattered.dir.dot(&hit_record.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.albedo,
                scattered,
            })
        } else {
            None
        }
    }
}

/// Metal Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetalConfig {
    pub albedo: SerdeVector,
    #[serde(default)]
    pub fuzz: f64,
}

/// A Dielectric is a refractive material, such as glass
#[derive(Debug, Clone)]
pub struct Dielectric {
    ir: f64,
    fresnel: bool,
}
impl Dielectric {
    /// Glass-like material that picks reflection over refraction with Schlick's probability
    pub fn new(ir: f64) -> Self {
        Self { ir, fresnel: true }
    }

    /// Only reflects on total internal reflection; refracts whenever Snell's law allows
    pub fn without_fresnel(ir: f64) -> Self {
        Self { ir, fresnel: false }
    }

    pub fn from_config(config: DielectricConfig) -> Self {
        Self {
            ir: config.ir,
            fresnel: config.fresnel,
        }
    }

    fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
        // Use Schlick's approximation for reflectance
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}
impl Scatterable for Dielectric {
    fn try_scatter(
        &self,
        ray_in: &Ray,
        hit_record: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let attenuation = Color::new(1.0, 1.0, 1.0);
        let refraction_ratio = if hit_record.front_face {
            1.0 / self.ir
        } else {
            self.ir
        };

        let unit_direction = ray_in.dir.normalize();
        let cos_theta = (-unit_direction).dot(&hit_record.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta.powi(2)).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || (self.fresnel && Self::reflectance(cos_theta, refraction_ratio) > rng.gen::<f64>())
        {
            utils::reflect(&unit_direction, &hit_record.normal)
        } else {
            utils::refract(&unit_direction, &hit_record.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation,
            scattered: Ray::new(hit_record.p, direction),
        })
    }
}

fn default_fresnel() -> bool {
    true
}

/// Dielectric Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DielectricConfig {
    pub ir: f64,
    #[serde(default = "default_fresnel")]
    pub fresnel: bool,
}
