use std::sync::Arc;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use weekend_tracer::cameras::{Camera, CameraConfig};
use weekend_tracer::interval::Interval;
use weekend_tracer::materials::Lambertian;
use weekend_tracer::objects::{Hittable, HittableList, Sphere};
use weekend_tracer::scene::SceneConfig;
use weekend_tracer::{sky_color, Color, Point, T_MIN};

fn one_sphere_world() -> HittableList {
    let mut world = HittableList::default();
    world.add(Box::new(Sphere::new(
        Point::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));
    world
}

fn straight_on(samples_per_pixel: u32, max_depth: u32) -> Camera {
    Camera::initialize(&CameraConfig {
        image_width: 11,
        samples_per_pixel,
        max_depth,
        focus_distance: 1.0,
        ..Default::default()
    })
}

/// Every draw is 0.5, which puts each sample on its pixel center
fn centered_rng() -> StepRng {
    StepRng::new(1 << 63, 0)
}

#[test]
fn center_pixel_hits_sphere_at_expected_distance() {
    let world = one_sphere_world();
    let camera = straight_on(1, 1);

    let ray = camera.get_ray(5, 5, &mut centered_rng());
    let hr = world
        .try_hit(&ray, Interval::new(T_MIN, f64::INFINITY))
        .expect("center ray hits the sphere");
    // Camera at the origin, sphere front at z = -0.5
    assert!((hr.t - 0.5).abs() < 1e-9);
    assert!(hr.front_face);
}

#[test]
fn one_bounce_renders_dark_disk_on_sky() {
    let world = one_sphere_world();
    let camera = straight_on(1, 1);
    let mut rng = StdRng::seed_from_u64(99);
    let frame = camera.render(&world, &mut rng, false);
    assert_eq!((frame.width, frame.height), (11, 11));

    // The only bounce a depth of 1 allows gathers no light
    assert_eq!(frame.get(5, 5), Color::zeros());

    // The corner sees past the sphere; with centered samples it is exactly the sky there
    let corner = camera.render_pixel(&world, 0, 0, &mut centered_rng());
    let ray = camera.get_ray(0, 0, &mut centered_rng());
    assert!(world.try_hit(&ray, Interval::new(T_MIN, f64::INFINITY)).is_none());
    assert_eq!(corner, sky_color(&ray.dir));
}

#[test]
fn more_bounces_light_the_sphere() {
    let world = one_sphere_world();
    let camera = straight_on(64, 10);
    let mut rng = StdRng::seed_from_u64(5);

    let center = camera.render_pixel(&world, 5, 5, &mut rng);
    let corner = camera.render_pixel(&world, 0, 0, &mut rng);
    assert!(center.norm() > 0.0);
    // Gray albedo means the sphere is darker than the sky behind it
    assert!(center.sum() < corner.sum());
}

#[test]
fn zero_depth_renders_black() {
    let world = one_sphere_world();
    let camera = straight_on(2, 0);
    let frame = camera.render(&world, &mut StdRng::seed_from_u64(1), false);
    assert!(frame.pixels.iter().all(|c| *c == Color::zeros()));
}

#[test]
fn seeded_renders_repeat() {
    let scene = SceneConfig::default_scene().unwrap();
    let mut config = scene.clone();
    config.camera.image_width = 16;
    config.camera.samples_per_pixel = 2;
    config.camera.max_depth = 4;

    let built = config.build().unwrap();
    let a = built
        .camera
        .render(&built.world, &mut StdRng::seed_from_u64(7), false);
    let b = built
        .camera
        .render(&built.world, &mut StdRng::seed_from_u64(7), false);
    assert_eq!(a.pixels, b.pixels);
    assert_eq!(a.height, 9);
}

#[test]
fn frame_writes_ppm_file() {
    let world = one_sphere_world();
    let camera = straight_on(1, 2);
    let frame = camera.render(&world, &mut StdRng::seed_from_u64(3), false);

    let path = std::env::temp_dir().join(format!("weekend-tracer-{}.ppm", std::process::id()));
    frame.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(text.starts_with("P3\n11 11\n255\n"));
    assert_eq!(text.lines().count(), 3 + 121);
}
