//! Scene - one parsed scene file

use crate::error::{SceneError, SceneResult};
use crate::hierarchy::Hierarchy;
use crate::object::{ClassId, ObjectId, SceneObject};
use crate::parser::RecordParser;
use crate::registry::ObjectRegistry;
use std::path::{Path, PathBuf};

/// A scene file and the objects parsed from it
///
/// Built once by a single parse pass and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Scene {
    path: PathBuf,
    objects: ObjectRegistry,
}

impl Scene {
    /// Parse scene text that was read from `path`
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            objects: RecordParser::new().parse(text),
        }
    }

    /// Read and parse a scene file
    ///
    /// # Errors
    /// - `SceneError::Read` if the file cannot be read
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = read_source(path)?;
        Ok(Self::from_text(path, &text))
    }

    /// Source path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Object registry
    #[inline]
    #[must_use]
    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    /// Object by identity
    #[inline]
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// All objects of a classifier, or `None` when there are none
    #[must_use]
    pub fn objects_of_class(&self, class: ClassId) -> Option<Vec<&SceneObject>> {
        let found: Vec<_> = self.objects.of_class(class).collect();
        (!found.is_empty()).then_some(found)
    }

    /// Transform forest of this scene
    #[must_use]
    pub fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy::build(&self.objects)
    }

    /// Indented hierarchy dump
    #[must_use]
    pub fn render_hierarchy(&self) -> String {
        self.hierarchy().render()
    }
}

/// Read a scene file as text
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD` rather than failing
/// the whole scene.
///
/// # Errors
/// - `SceneError::Read` if the file cannot be read
pub fn read_source(path: impl AsRef<Path>) -> SceneResult<String> {
    let path = path.as_ref();
    std::fs::read(path)
        .map(decode_lossy)
        .map_err(|e| SceneError::read_error(path, e))
}

/// Read a scene file as text without blocking the runtime
///
/// Decodes like [`read_source`].
///
/// # Errors
/// - `SceneError::Read` if the file cannot be read
pub async fn read_source_async(path: impl AsRef<Path>) -> SceneResult<String> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map(decode_lossy)
        .map_err(|e| SceneError::read_error(path, e))
}

fn decode_lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::debug!("scene text is not valid UTF-8 at byte {}", e.utf8_error().valid_up_to());
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use usa_test_utils::{player_scene, write_scene, SceneTextBuilder};

    #[test]
    fn player_scene_dump() {
        let scene = Scene::from_text("Player.unity", &player_scene());
        assert_eq!(scene.render_hierarchy(), "(unnamed)\n--Player\n");
    }

    #[test]
    fn lookup_by_id() {
        let scene = Scene::from_text("Player.unity", &player_scene());

        let go = scene.object(ObjectId(300)).unwrap();
        assert_eq!(go.class(), ClassId::GameObject);
        assert_eq!(go.properties().text("m_Name"), Some("Player"));
        assert!(scene.object(ObjectId(999)).is_none());
        assert_eq!(scene.path(), Path::new("Player.unity"));
    }

    #[test]
    fn objects_of_class_empty_is_none() {
        let scene = Scene::from_text("Player.unity", &player_scene());

        assert_eq!(scene.objects_of_class(ClassId::Transform).map(|v| v.len()), Some(2));
        assert!(scene.objects_of_class(ClassId::Camera).is_none());
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let text = SceneTextBuilder::new()
            .game_object(1, "Root")
            .transform(2, Some(1), &[])
            .build();
        let path = write_scene(dir.path(), "Root.unity", &text);

        let scene = Scene::load(&path).unwrap();
        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.render_hierarchy(), "Root\n");
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scene::load(dir.path().join("missing.unity")).unwrap_err();
        assert!(matches!(err, SceneError::Read { .. }));
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let scene = Scene::from_text("Bom.unity", &format!("\u{FEFF}{}", player_scene()));
        assert_eq!(scene.render_hierarchy(), "(unnamed)\n--Player\n");

        let bare = "\u{FEFF}--- !u!1 &300\nGameObject:\n  m_Name: Player\n--- !u!4 &200\nTransform:\n  m_GameObject: {fileID: 300}\n  m_Children: []\n";
        assert_eq!(Scene::from_text("Bare.unity", bare).render_hierarchy(), "Player\n");
    }

    #[tokio::test]
    async fn invalid_utf8_degrades_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Latin1.unity");
        let mut bytes = b"--- !u!1 &1\nGameObject:\n  m_Name: Caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"\n--- !u!4 &2\nTransform:\n  m_GameObject: {fileID: 1}\n  m_Children: []\n");
        std::fs::write(&path, &bytes).unwrap();

        let scene = Scene::load(&path).unwrap();
        assert_eq!(scene.objects().len(), 2);
        assert_eq!(scene.render_hierarchy(), "Caf\u{FFFD}\n");

        let async_text = read_source_async(&path).await.unwrap();
        assert_eq!(async_text, read_source(&path).unwrap());
    }

    #[tokio::test]
    async fn async_read_matches_sync() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path(), "Player.unity", &player_scene());

        let sync_text = read_source(&path).unwrap();
        let async_text = read_source_async(&path).await.unwrap();
        assert_eq!(sync_text, async_text);
    }
}
