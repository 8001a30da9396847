//! Per-image scene state

use crate::core::types::Result;
use crate::host::SceneHost;
use super::directions::DirectionFrame;
use super::object::PlacedObject;

/// Direction frame, placed objects, and image metadata of one scene.
#[derive(Clone, Debug)]
pub struct Scene {
    pub directions: DirectionFrame,
    objects: Vec<PlacedObject>,
    pub split: String,
    pub image_index: usize,
    pub image_filename: Option<String>,
}

impl Scene {
    pub fn new(directions: DirectionFrame, split: impl Into<String>) -> Self {
        Self {
            directions,
            objects: Vec::new(),
            split: split.into(),
            image_index: 0,
            image_filename: None,
        }
    }

    /// Point the scene at a new image index and its render file name.
    pub fn set_image(&mut self, index: usize) {
        self.image_index = index;
        self.image_filename = Some(image_filename(index));
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub(crate) fn push_object(&mut self, object: PlacedObject) {
        self.objects.push(object);
    }

    /// Remove every placed object from the host and from the scene.
    ///
    /// Objects leave the scene only once the host has deleted them, so on
    /// error the scene still lists every object the host holds.
    pub fn clear_objects<H: SceneHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        while let Some(object) = self.objects.last() {
            host.delete_object(object.handle)?;
            self.objects.pop();
        }
        Ok(())
    }
}

/// Render file name for an image index.
pub fn image_filename(index: usize) -> String {
    format!("{:05}.render.png", index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    #[test]
    fn test_image_filename() {
        assert_eq!(image_filename(7), "00007.render.png");
        assert_eq!(image_filename(123456), "123456.render.png");
    }

    #[test]
    fn test_set_image() {
        let frame = DirectionFrame::from_axes(Vec3::Y, Vec3::NEG_X, Vec3::Z, Vec3::Z);
        let mut scene = Scene::new(frame, "train");
        scene.set_image(3);
        assert_eq!(scene.image_index, 3);
        assert_eq!(scene.image_filename.as_deref(), Some("00003.render.png"));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_failed_delete_keeps_remaining_objects() {
        use crate::catalog::Catalog;
        use crate::generation::{PlacementConfig, PlacementContext, PlacementEngine, RestartPolicy};
        use crate::host::RecordingHost;
        use crate::scene::SceneSetup;

        let catalog = Catalog::builtin().unwrap();
        let setup = SceneSetup::default();
        let camera = setup.camera();
        let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
        let mut scene = Scene::new(setup.direction_frame().unwrap(), "test");
        let mut host = RecordingHost::for_catalog(&catalog);
        let mut engine = PlacementEngine::new(PlacementConfig::default(), RestartPolicy::unbounded(), 4);
        engine.place_objects(&mut scene, 3, &ctx, &mut host).unwrap();

        // The host loses the first object behind the scene's back
        let first = scene.objects()[0].handle;
        host.delete_object(first).unwrap();

        assert!(scene.clear_objects(&mut host).is_err());
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.objects()[0].handle, first);
        assert!(host.is_empty());
    }

    #[test]
    fn test_failed_first_delete_keeps_every_object() {
        use crate::catalog::Catalog;
        use crate::generation::{PlacementConfig, PlacementContext, PlacementEngine, RestartPolicy};
        use crate::host::RecordingHost;
        use crate::scene::SceneSetup;

        let catalog = Catalog::builtin().unwrap();
        let setup = SceneSetup::default();
        let camera = setup.camera();
        let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
        let mut scene = Scene::new(setup.direction_frame().unwrap(), "test");
        let mut host = RecordingHost::for_catalog(&catalog);
        let mut engine = PlacementEngine::new(PlacementConfig::default(), RestartPolicy::unbounded(), 4);
        engine.place_objects(&mut scene, 3, &ctx, &mut host).unwrap();

        let last = scene.objects()[2].handle;
        host.delete_object(last).unwrap();

        assert!(scene.clear_objects(&mut host).is_err());
        assert_eq!(scene.len(), 3);
        for object in &scene.objects()[..2] {
            assert!(host.get(object.handle).is_some());
        }
    }
}
