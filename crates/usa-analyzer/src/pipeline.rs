//! Per-scene pipeline: read → parse → render → write
//!
//! Each step is strictly ordered within a scene. Scenes share nothing, so
//! the steps can run on any thread in any interleaving across scenes.

use crate::error::AnalyzerResult;
use std::path::{Path, PathBuf};
use usa_scene::{read_source, read_source_async, Scene, SceneError, SceneResult};

/// Dump file name for a scene: its file name plus `suffix`
///
/// `Assets/Main.unity` with `.dump` becomes `Main.unity.dump`.
#[must_use]
pub fn dump_file_name(scene_path: &Path, suffix: &str) -> String {
    let mut name = scene_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(suffix);
    name
}

/// Parse scene text and render its hierarchy
#[must_use]
pub fn render_dump(scene_path: &Path, text: &str) -> String {
    let scene = Scene::from_text(scene_path, text);
    tracing::debug!(
        scene = %scene_path.display(),
        objects = scene.objects().len(),
        "parsed scene"
    );
    scene.render_hierarchy()
}

/// Write a dump as UTF-8 without BOM
///
/// # Errors
/// - `SceneError::Write` if the file cannot be written
pub fn write_dump(path: &Path, dump: &str) -> SceneResult<()> {
    std::fs::write(path, dump).map_err(|e| SceneError::write_error(path, e))
}

/// Async variant of [`write_dump`]
///
/// # Errors
/// - `SceneError::Write` if the file cannot be written
pub async fn write_dump_async(path: &Path, dump: &str) -> SceneResult<()> {
    tokio::fs::write(path, dump)
        .await
        .map_err(|e| SceneError::write_error(path, e))
}

/// Run the whole pipeline for one scene on the current thread
///
/// Returns the written dump path.
///
/// # Errors
/// - `AnalyzerError::Scene` if the read or the write fails
pub fn process_scene(scene_path: &Path, dump_path: &Path) -> AnalyzerResult<PathBuf> {
    let text = read_source(scene_path)?;
    let dump = render_dump(scene_path, &text);
    write_dump(dump_path, &dump)?;
    Ok(dump_path.to_path_buf())
}

/// Read a scene without blocking the runtime
///
/// # Errors
/// - `AnalyzerError::Scene` if the read fails
pub async fn read_scene(scene_path: &Path) -> AnalyzerResult<String> {
    Ok(read_source_async(scene_path).await?)
}

/// Parse and render on the blocking pool, then write asynchronously
///
/// # Errors
/// - `AnalyzerError::Task` if the parse/render task panics
/// - `AnalyzerError::Scene` if the write fails
pub async fn dump_scene(scene_path: PathBuf, text: String, dump_path: PathBuf) -> AnalyzerResult<PathBuf> {
    let dump = tokio::task::spawn_blocking(move || render_dump(&scene_path, &text)).await?;
    write_dump_async(&dump_path, &dump).await?;
    Ok(dump_path)
}
