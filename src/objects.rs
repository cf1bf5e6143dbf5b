//! Objects
use std::collections::HashMap;

use crate::{
    interval::Interval,
    materials::{self, MaterialEntry},
    utils::SerdeVector,
    Error, Material, Point, Ray, Result, Vec3,
};
use serde::{Deserialize, Serialize};

pub type HittableObj = Box<dyn Hittable + Send + Sync>;

pub trait Hittable {
    /// The hit with the smallest distance strictly inside `ray_t`, if any
    fn try_hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

#[derive(Default)]
pub struct HittableList(pub Vec<HittableObj>);
impl HittableList {
    pub fn add(&mut self, boxed_obj: HittableObj) {
        self.0.push(boxed_obj)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Hittable for HittableList {
    fn try_hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Shrink the far end as hits come in so nothing behind the current best can win
        self.0.iter().fold(None, |closest: Option<HitRecord>, obj| {
            let max = closest.as_ref().map_or(ray_t.max, |hr| hr.t);
            obj.try_hit(ray, ray_t.with_max(max)).or(closest)
        })
    }
}

/// Represents a hit
pub struct HitRecord {
    /// Point of intersection
    pub p: Point,
    /// Unit normal, always facing against the incoming ray
    pub normal: Vec3,
    /// Ray distance to the intersection
    pub t: f64,
    /// Whether the ray arrived from the side the outward normal points to
    pub front_face: bool,
    /// Material
    pub material: Material,
}
impl HitRecord {
    /// `outward_normal` must have unit length
    pub fn new(p: Point, t: f64, ray: &Ray, outward_normal: &Vec3, material: Material) -> Self {
        let front_face = ray.dir.dot(outward_normal) < 0.0;
        let normal = if front_face {
            *outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

pub struct Sphere {
    pub center: Point,
    pub radius: f64,
    pub material: Material,
}
impl Sphere {
    /// Negative radii are clamped to zero, which makes a sphere nothing can hit
    pub fn new(center: Point, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Build a sphere, looking up named materials in `named`
    pub fn from_config(config: SphereConfig, named: &HashMap<String, Material>) -> Result<Self> {
        let material = match config.material {
            MaterialEntry::Named { name } => named
                .get(&name)
                .cloned()
                .ok_or(Error::UnknownMaterial(name))?,
            MaterialEntry::Inline(c) => materials::Generator::from_config(c),
        };
        Ok(Self::new(config.center.into(), config.radius, material))
    }
}
impl Hittable for Sphere {
    fn try_hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let a = ray.dir.norm_squared();
        if self.radius <= 0.0 || a < f64::EPSILON {
            return None;
        }
        let oc = self.center - ray.orig;
        let h = ray.dir.dot(&oc);
        let c = oc.norm_squared() - self.radius.powi(2);
        let discriminant = h.powi(2) - a * c;
        if discriminant < 0.0 {
            return None;
        }

        // Find the nearest root that lies in the acceptable range
        let sqrtd = discriminant.sqrt();
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }
        let p = ray.get(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(
            p,
            root,
            ray,
            &outward_normal,
            self.material.clone(),
        ))
    }
}

/// Sphere config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    pub center: SerdeVector,
    pub radius: f64,
    pub material: MaterialEntry,
}
