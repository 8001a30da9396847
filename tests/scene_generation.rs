//! End-to-end generation against the recording host.

use shapegen::catalog::Catalog;
use shapegen::core::types::Vec3;
use shapegen::generation::{
    GenerationConfig, PlacementContext, RestartPolicy, SceneGenerator, compute_relationships,
};
use shapegen::host::RecordingHost;
use shapegen::scene::{Direction, Scene, SceneCollection, SceneRecord, SceneSetup};
use tempfile::TempDir;

const THREE_SIZES: &str = r#"{
    "colors": { "gray": [87, 87, 87], "red": [173, 35, 35], "cyan": [41, 208, 208] },
    "materials": { "Rubber": "rubber", "MyMetal": "metal" },
    "shapes": { "Cube": "cube", "Sphere": "sphere", "SmoothCylinder": "cylinder" },
    "sizes": { "small": 0.3, "medium": 0.5, "large": 0.7 }
}"#;

fn generate(catalog: &Catalog, seed: u64, images: usize, num_objects: usize) -> (SceneCollection, RecordingHost) {
    let setup = SceneSetup::default();
    let camera = setup.camera();
    let ctx = PlacementContext { catalog, camera: &camera, resolution: setup.resolution() };
    let mut scene = Scene::new(setup.direction_frame().unwrap(), "val");
    let mut host = RecordingHost::for_catalog(catalog);
    let mut generator = SceneGenerator::new(GenerationConfig {
        seed,
        num_objects,
        restart: RestartPolicy::unbounded().with_max_restarts(1000),
        ..Default::default()
    });

    let mut collection = SceneCollection::new("val", seed, setup.clone());
    for index in 0..images {
        let record = generator.generate_image(&mut scene, index, &ctx, &mut host, None).unwrap();
        collection.push(record);
    }
    (collection, host)
}

#[test]
fn three_size_catalog_meets_constraints() {
    let catalog = Catalog::from_json_str(THREE_SIZES).unwrap();
    let (collection, host) = generate(&catalog, 42, 10, 5);

    assert_eq!(collection.scenes.len(), 10);
    // Only the last scene's objects remain in the host
    assert_eq!(host.len(), 5);

    for record in &collection.scenes {
        assert_eq!(record.objects.len(), 5);
        for (i, a) in record.objects.iter().enumerate() {
            assert!(["small", "medium", "large"].contains(&a.size.as_str()));
            assert_eq!(a.coords[2], a.radius);

            for b in record.objects.iter().skip(i + 1) {
                let dx = a.position[0] - b.position[0];
                let dy = a.position[1] - b.position[1];
                let distance = (dx * dx + dy * dy).sqrt();
                assert!(distance - a.radius - b.radius >= 0.25 - 1e-5);

                for direction in Direction::PLANAR {
                    let axis = record.directions[&direction];
                    let margin = dx * axis[0] + dy * axis[1];
                    assert!(!(margin > 0.0 && margin < 0.4), "margin {} along {}", margin, direction);
                }
            }
        }
    }
}

#[test]
fn relationships_are_antisymmetric_under_opposite_directions() {
    let catalog = Catalog::builtin().unwrap();
    let (collection, _) = generate(&catalog, 7, 5, 6);

    for record in &collection.scenes {
        let table = &record.relationships;
        for direction in Direction::PLANAR {
            for i in 0..record.objects.len() {
                for j in 0..record.objects.len() {
                    assert_eq!(
                        table.contains(direction, i, j),
                        table.contains(direction.opposite(), j, i),
                        "{} {} {}", direction, i, j,
                    );
                    if table.contains(direction, i, j) {
                        assert!(!table.contains(direction, j, i));
                    }
                }
            }
        }
    }
}

#[test]
fn default_frame_is_planar_and_camera_relative() {
    let setup = SceneSetup::default();
    let frame = setup.direction_frame().unwrap();

    for direction in Direction::PLANAR {
        let v = frame.get(direction);
        assert!(v.z.abs() < 1e-6);
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!((frame.get(direction.opposite()) + v).length() < 1e-6);
    }
    assert!(frame.get(Direction::Above).dot(Vec3::Z) > 0.99);

    // The default camera sits at negative y looking toward the origin, so
    // "behind" points away from it
    let camera = setup.camera();
    let to_origin = (-camera.position).truncate().normalize();
    let behind = frame.get(Direction::Behind).truncate();
    assert!(behind.dot(to_origin) > 0.5);
}

#[test]
fn same_seed_reproduces_collection() {
    let catalog = Catalog::builtin().unwrap();
    let (first, _) = generate(&catalog, 2024, 3, 4);
    let (second, _) = generate(&catalog, 2024, 3, 4);
    assert_eq!(first, second);

    let (other, _) = generate(&catalog, 2025, 3, 4);
    assert_ne!(first, other);
}

#[test]
fn collection_round_trips_through_disk() {
    let catalog = Catalog::builtin().unwrap();
    let (collection, _) = generate(&catalog, 99, 2, 3);
    let temp_dir = TempDir::new().expect("failed to create temp dir");

    let path = temp_dir.path().join("scenes.json");
    collection.save(&path).unwrap();
    let loaded = SceneCollection::load(&path).unwrap();

    assert_eq!(loaded.info.seed, 99);
    assert_eq!(loaded.info.version, collection.info.version);
    assert_eq!(loaded.info.setup.resolution(), collection.info.setup.resolution());
    assert_eq!(loaded.scenes.len(), 2);
    for (a, b) in loaded.scenes.iter().zip(&collection.scenes) {
        assert_eq!(a.image_filename, b.image_filename);
        assert_eq!(a.relationships, b.relationships);
        for (oa, ob) in a.objects.iter().zip(&b.objects) {
            assert_eq!(oa.shape, ob.shape);
            assert_eq!(oa.pixel_coords.0, ob.pixel_coords.0);
            assert!((oa.coords[0] - ob.coords[0]).abs() < 1e-5);
        }
    }

    let record_path = temp_dir.path().join("scenes").join("00000.json");
    collection.scenes[0].save(&record_path).unwrap();
    let json = std::fs::read_to_string(&record_path).unwrap();
    assert!(json.contains("\"3d_coords\""));
    assert!(json.contains("\"00000.render.png\""));
    assert_eq!(SceneRecord::load(&record_path).unwrap().objects.len(), 3);
}

#[test]
fn relationships_recomputed_from_scene_match_record() {
    let catalog = Catalog::builtin().unwrap();
    let setup = SceneSetup::default();
    let camera = setup.camera();
    let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
    let mut scene = Scene::new(setup.direction_frame().unwrap(), "test");
    let mut host = RecordingHost::for_catalog(&catalog);
    let mut generator = SceneGenerator::new(GenerationConfig::default());

    let record = generator.generate_image(&mut scene, 3, &ctx, &mut host, None).unwrap();
    assert_eq!(record.relationships, compute_relationships(&scene, 0.2));
    assert_eq!(record.image_filename.as_deref(), Some("00003.render.png"));
}
