//! Scene files
//!
//! A scene is a YAML document with a `camera` section, an optional table of named
//! `materials`, and a list of sphere `objects`. Spheres that refer to the same named
//! material share a single instance of it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cameras::{Camera, CameraConfig};
use crate::materials::{Generator, MaterialConfig};
use crate::objects::{HittableList, Sphere, SphereConfig};
use crate::{Material, Result};

const DEFAULT_SCENE: &str = include_str!("../scenes/default.yaml");

/// Scene Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialConfig>,
    pub objects: Vec<SphereConfig>,
}

/// Everything needed to render
pub struct Scene {
    pub camera: Camera,
    pub world: HittableList,
}

impl SceneConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading scene {}", path.display());
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The scene rendered when no file is given
    pub fn default_scene() -> Result<Self> {
        Self::from_yaml_str(DEFAULT_SCENE)
    }

    /// Instantiate the materials and spheres
    pub fn spheres(&self) -> Result<Vec<Sphere>> {
        let named: HashMap<String, Material> = self
            .materials
            .iter()
            .map(|(name, config)| (name.clone(), Generator::from_config(config.clone())))
            .collect();

        self.objects
            .iter()
            .map(|config| Sphere::from_config(config.clone(), &named))
            .collect()
    }

    pub fn build(&self) -> Result<Scene> {
        let mut world = HittableList::default();
        for sphere in self.spheres()? {
            world.add(Box::new(sphere));
        }
        debug!(
            "scene has {} spheres and {} named materials",
            world.len(),
            self.materials.len()
        );

        Ok(Scene {
            camera: Camera::initialize(&self.camera),
            world,
        })
    }
}
