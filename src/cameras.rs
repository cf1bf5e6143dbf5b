//! Cameras and configs for cameras
use crate::objects::Hittable;
use crate::output::Frame;
use crate::utils::{self, SerdeVector};
use crate::{Color, Point, Ray, Vec3};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Camera Config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples averaged into every pixel
    pub samples_per_pixel: u32,
    /// Bounces allowed per sample
    pub max_depth: u32,
    pub vertical_fov_deg: f64,
    pub look_from: SerdeVector,
    pub look_at: SerdeVector,
    pub v_up: SerdeVector,
    /// Cone angle of the rays through each pixel; zero disables depth of field
    pub defocus_angle_deg: f64,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_distance: f64,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 100,
            max_depth: 10,
            vertical_fov_deg: 90.0,
            look_from: SerdeVector([0.0, 0.0, 0.0]),
            look_at: SerdeVector([0.0, 0.0, -1.0]),
            v_up: SerdeVector([0.0, 1.0, 0.0]),
            defocus_angle_deg: 0.0,
            focus_distance: 10.0,
        }
    }
}

/// Camera and related tasks
///
/// Only obtainable through [`Camera::initialize`], so every derived field is in place before
/// the first ray is generated and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    pixel_samples_scale: f64,
    center: Point,
    /// Location of pixel (0, 0)
    pixel00_loc: Point,
    /// Offset to the pixel on the right
    pixel_delta_u: Vec3,
    /// Offset to the pixel below
    pixel_delta_v: Vec3,
    defocus_angle_deg: f64,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}
impl Camera {
    /// Derive the viewport geometry from `config`
    pub fn initialize(config: &CameraConfig) -> Self {
        let image_width = config.image_width;
        let image_height = ((image_width as f64 / config.aspect_ratio) as u32).max(1);

        let center: Point = config.look_from.into();
        let look_at: Point = config.look_at.into();
        let v_up: Vec3 = config.v_up.into();

        // Establish the viewport, using the ratio the integer image size actually ended up with
        let theta = config.vertical_fov_deg.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_distance;
        let viewport_width = viewport_height * (image_width as f64 / image_height as f64);

        // Calculate the viewing vectors
        let w = (center - look_at).normalize();
        let u = v_up.cross(&w).normalize();
        let v = w.cross(&u);

        // Image rows run top to bottom, so the vertical edge points down
        let viewport_u = viewport_width * u;
        let viewport_v = viewport_height * -v;

        let pixel_delta_u = viewport_u / image_width as f64;
        let pixel_delta_v = viewport_v / image_height as f64;

        let viewport_upper_left =
            center - config.focus_distance * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius =
            config.focus_distance * (config.defocus_angle_deg / 2.0).to_radians().tan();

        debug!(
            "camera {}x{} at {:?}, viewport {:.4}x{:.4}, defocus radius {:.4}",
            image_width,
            image_height,
            center.as_slice(),
            viewport_width,
            viewport_height,
            defocus_radius
        );

        Self {
            image_width,
            image_height,
            samples_per_pixel: config.samples_per_pixel,
            max_depth: config.max_depth,
            pixel_samples_scale: 1.0 / config.samples_per_pixel as f64,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_angle_deg: config.defocus_angle_deg,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// A ray through a random spot of pixel (`x`, `y`), leaving from a random spot of the lens
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = Self::sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + (x as f64 + offset[0]) * self.pixel_delta_u
            + (y as f64 + offset[1]) * self.pixel_delta_v;

        let origin = if self.defocus_angle_deg <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        Ray::new(origin, pixel_sample - origin)
    }

    /// Average of `samples_per_pixel` independent samples of pixel (`x`, `y`)
    pub fn render_pixel(
        &self,
        world: &impl Hittable,
        x: u32,
        y: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        let mut pixel_color = Color::zeros();
        for _ in 0..self.samples_per_pixel {
            let ray = self.get_ray(x, y, rng);
            pixel_color += ray.get_color(world, self.max_depth, rng);
        }
        self.pixel_samples_scale * pixel_color
    }

    /// Render every pixel, row by row from the top
    pub fn render(
        &self,
        world: &impl Hittable,
        rng: &mut dyn RngCore,
        show_progress: bool,
    ) -> Frame {
        info!(
            "Rendering {}x{} at {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let bar = if show_progress {
            ProgressBar::new(self.image_height as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} scanlines [{elapsed}]")
        {
            bar.set_style(style);
        }

        let start = Instant::now();
        let mut frame = Frame::new(self.image_width, self.image_height);
        for y in 0..self.image_height {
            for x in 0..self.image_width {
                frame.set(x, y, self.render_pixel(world, x, y, rng));
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
        info!("Done in {:.2?}", start.elapsed());
        frame
    }

    /// Offset within [-0.5, 0.5) on both axes, in pixel units
    fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
        Vec3::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5, 0.0)
    }

    /// Generate a point on the lens
    /// This simulates defocus blur
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point {
        let p = utils::random_in_unit_disk(rng);
        self.center + p[0] * self.defocus_disk_u + p[1] * self.defocus_disk_v
    }
}
