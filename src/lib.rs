//! Ray Tracing Library
//!
//! A recursive Monte Carlo path tracer over spheres, with diffuse, fuzzy metal and glass
//! materials and a thin-lens camera.

use std::sync::Arc;

use nalgebra::Vector3;
use rand::RngCore;

pub mod cameras;
pub mod error;
pub mod interval;
pub mod materials;
pub mod objects;
pub mod output;
pub mod scene;
pub mod utils;

use interval::Interval;
use materials::Scatterable;
use objects::Hittable;

pub use error::{Error, Result};

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;
pub type Color = Vec3;
/// Materials are shared between every sphere that uses them
pub type Material = Arc<dyn Scatterable + Send + Sync>;

/// Nearest accepted hit distance. Keeps a bounced ray from re-hitting its own origin.
pub const T_MIN: f64 = 0.001;

/// Prelude
pub mod prelude {
    pub use crate::cameras::{Camera, CameraConfig};
    pub use crate::interval::Interval;
    pub use crate::materials::{Dielectric, Lambertian, Metal, Scatterable};
    pub use crate::objects::{Hittable, HittableList, HittableObj, Sphere};
    pub use crate::output::Frame;
    pub use crate::scene::{Scene, SceneConfig};
    pub use crate::{Color, Material, Point, Ray, Vec3};
}

/// The ray in ray tracing
#[derive(Debug, Clone)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    pub fn get(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }

    /// Resolve the light arriving along this ray
    ///
    /// Bounces off whatever `world` returns as the nearest hit until the material absorbs the
    /// ray, the ray escapes to the sky, or `depth` bounces are used up.
    pub fn get_color(&self, world: &impl Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
        // If we have exceeded the ray bounce limit, no more light is gathered
        if depth == 0 {
            return Color::zeros();
        }

        if let Some(hr) = world.try_hit(self, Interval::new(T_MIN, f64::INFINITY)) {
            if let Some(sr) = hr.material.try_scatter(self, &hr, rng) {
                return sr
                    .attenuation
                    .component_mul(&sr.scattered.get_color(world, depth - 1, rng));
            }
            return Color::zeros();
        }
        sky_color(&self.dir)
    }
}

/// Linearly blends white and blue depending on the height of `dir`
pub fn sky_color(dir: &Vec3) -> Color {
    let unit_direction = dir.normalize();
    let a = 0.5 * (unit_direction[1] + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::ScatterResult;
    use crate::objects::{HitRecord, HittableList, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Sends every ray straight up with a fixed tint
    struct Skyward(Color);
    impl Scatterable for Skyward {
        fn try_scatter(
            &self,
            _ray_in: &Ray,
            hit_record: &HitRecord,
            _rng: &mut dyn RngCore,
        ) -> Option<ScatterResult> {
            Some(ScatterResult {
                attenuation: self.0,
                scattered: Ray::new(hit_record.p, Vec3::new(0.0, 1.0, 0.0)),
            })
        }
    }

    struct Absorber;
    impl Scatterable for Absorber {
        fn try_scatter(&self, _: &Ray, _: &HitRecord, _: &mut dyn RngCore) -> Option<ScatterResult> {
            None
        }
    }

    fn one_sphere(material: Material) -> HittableList {
        let mut world = HittableList::default();
        world.add(Box::new(Sphere::new(Point::new(0.0, 0.0, -1.0), 0.5, material)));
        world
    }

    fn assert_color_eq(a: Color, b: Color) {
        assert!((a - b).norm() < 1e-12, "{a:?} != {b:?}");
    }

    #[test]
    fn test_sky_gradient_endpoints() {
        let world = HittableList::default();
        let mut rng = StdRng::seed_from_u64(1);

        let up = Ray::new(Point::zeros(), Vec3::new(0.0, 1.0, 0.0));
        assert_color_eq(up.get_color(&world, 5, &mut rng), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(Point::zeros(), Vec3::new(0.0, -3.0, 0.0));
        assert_color_eq(down.get_color(&world, 5, &mut rng), Color::new(1.0, 1.0, 1.0));

        let horizon = Ray::new(Point::zeros(), Vec3::new(2.0, 0.0, 0.0));
        assert_color_eq(
            horizon.get_color(&world, 5, &mut rng),
            Color::new(0.75, 0.85, 1.0),
        );
    }

    #[test]
    fn test_depth_zero_is_black() {
        let mut rng = StdRng::seed_from_u64(2);
        let ray = Ray::new(Point::zeros(), Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(ray.get_color(&HittableList::default(), 0, &mut rng), Color::zeros());
        let world = one_sphere(Arc::new(Skyward(Color::new(1.0, 1.0, 1.0))));
        assert_eq!(ray.get_color(&world, 0, &mut rng), Color::zeros());
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        let mut rng = StdRng::seed_from_u64(3);
        let world = one_sphere(Arc::new(Absorber));
        let ray = Ray::new(Point::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray.get_color(&world, 10, &mut rng), Color::zeros());
    }

    #[test]
    fn test_attenuation_multiplies_bounce() {
        let mut rng = StdRng::seed_from_u64(4);
        let world = one_sphere(Arc::new(Skyward(Color::new(0.5, 0.25, 1.0))));
        let ray = Ray::new(Point::zeros(), Vec3::new(0.0, 0.0, -1.0));

        // The bounce leaves the sphere tangentially at its front pole and escapes upwards
        assert_color_eq(
            ray.get_color(&world, 2, &mut rng),
            Color::new(0.25, 0.175, 1.0),
        );
        // One bounce allowed, so the escaped ray gathers nothing
        assert_eq!(ray.get_color(&world, 1, &mut rng), Color::zeros());
    }
}
