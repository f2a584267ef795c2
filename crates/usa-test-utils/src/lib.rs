//! Testing utilities for USA workspace
//!
//! Shared scene fixtures: a builder that writes Unity-style record text and
//! helpers that lay scene files out on disk.

#![allow(missing_docs)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PREAMBLE: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n";

/// Builds scene text record by record
#[derive(Debug, Clone)]
pub struct SceneTextBuilder {
    text: String,
}

impl Default for SceneTextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTextBuilder {
    pub fn new() -> Self {
        Self {
            text: PREAMBLE.to_string(),
        }
    }

    pub fn game_object(mut self, id: i64, name: &str) -> Self {
        let _ = write!(
            self.text,
            "--- !u!1 &{id}\nGameObject:\n  m_ObjectHideFlags: 0\n  serializedVersion: 6\n  m_Name: {name}\n  m_IsActive: 1\n"
        );
        self
    }

    /// GameObject record with no `m_Name`
    pub fn unnamed_game_object(mut self, id: i64) -> Self {
        let _ = write!(
            self.text,
            "--- !u!1 &{id}\nGameObject:\n  m_ObjectHideFlags: 0\n  m_IsActive: 1\n"
        );
        self
    }

    /// Transform record; `None` owner is written as `{fileID: 0}`
    pub fn transform(mut self, id: i64, owner: Option<i64>, children: &[i64]) -> Self {
        let owner = owner.unwrap_or(0);
        let _ = write!(
            self.text,
            "--- !u!4 &{id}\nTransform:\n  m_ObjectHideFlags: 0\n  m_GameObject: {{fileID: {owner}}}\n  m_LocalRotation: {{x: 0, y: 0, z: 0, w: 1}}\n  m_LocalPosition: {{x: 0, y: 0, z: 0}}\n"
        );
        if children.is_empty() {
            self.text.push_str("  m_Children: []\n");
        } else {
            self.text.push_str("  m_Children:\n");
            for child in children {
                let _ = writeln!(self.text, "  - {{fileID: {child}}}");
            }
        }
        self.text.push_str("  m_Father: {fileID: 0}\n");
        self
    }

    /// Append record text verbatim
    pub fn raw(mut self, record: &str) -> Self {
        self.text.push_str(record);
        if !record.ends_with('\n') {
            self.text.push('\n');
        }
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Root Transform 100 without owner, child Transform 200 owned by
/// GameObject 300 named "Player"
pub fn player_scene() -> String {
    SceneTextBuilder::new()
        .transform(100, None, &[200])
        .game_object(300, "Player")
        .transform(200, Some(300), &[])
        .build()
}

/// A slightly larger scene with a camera and a renderer
pub fn level_scene() -> String {
    SceneTextBuilder::new()
        .game_object(1, "Main Camera")
        .game_object(2, "Environment")
        .game_object(3, "Ground")
        .game_object(4, "Props")
        .game_object(5, "Crate")
        .raw("--- !u!20 &6\nCamera:\n  m_GameObject: {fileID: 1}\n  m_Enabled: 1\n")
        .raw("--- !u!23 &7\nMeshRenderer:\n  m_GameObject: {fileID: 5}\n  m_Enabled: 1\n")
        .transform(10, Some(1), &[])
        .transform(20, Some(2), &[30, 40])
        .transform(30, Some(3), &[])
        .transform(40, Some(4), &[50])
        .transform(50, Some(5), &[])
        .build()
}

/// Expected dump of [`level_scene`]
pub const LEVEL_DUMP: &str = "Main Camera\nEnvironment\n--Ground\n--Props\n----Crate\n";

/// Write a scene file under `dir`, creating parent directories
pub fn write_scene(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

/// Scratch input and output directories
pub struct Workspace {
    pub input: TempDir,
    pub output: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            input: tempfile::tempdir().unwrap(),
            output: tempfile::tempdir().unwrap(),
        }
    }

    pub fn add_scene(&self, relative: &str, text: &str) -> PathBuf {
        write_scene(self.input.path(), relative, text)
    }

    pub fn dump(&self, file_name: &str) -> String {
        fs::read_to_string(self.output.path().join(file_name)).unwrap()
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
