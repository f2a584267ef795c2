//! Scene collection analyzer
//!
//! Discovers scene files under the input directory and dumps each one's
//! hierarchy into the output directory, either one scene at a time or with
//! all reads in flight together.

use crate::config::{AnalyzerConfig, ExecutionMode};
use crate::error::{AnalyzerError, ConfigError};
use crate::pipeline::{dump_file_name, dump_scene, process_scene, read_scene};
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// Process-local index of a discovered scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(pub usize);

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A scene whose pipeline did not complete
#[derive(Debug)]
pub struct SceneFailure {
    /// Scene index
    pub id: SceneId,
    /// Scene file
    pub path: PathBuf,
    /// What went wrong
    pub error: AnalyzerError,
}

/// Outcome of one analyzer run
#[derive(Debug)]
pub struct RunReport {
    /// Mode the run used
    pub mode: ExecutionMode,
    /// Written dump files, sorted
    pub dumped: Vec<PathBuf>,
    /// Scenes that failed, sorted by id
    pub failures: Vec<SceneFailure>,
    /// Wall time of the run
    pub elapsed: Duration,
}

impl RunReport {
    fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            dumped: Vec::new(),
            failures: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    fn record_failure(&mut self, id: SceneId, path: PathBuf, error: AnalyzerError) {
        tracing::error!(scene = %path.display(), "scene {} failed: {}", id, error);
        self.failures.push(SceneFailure { id, path, error });
    }

    fn finish(mut self, started: Instant) -> Self {
        self.elapsed = started.elapsed();
        self.dumped.sort();
        self.failures.sort_by_key(|failure| failure.id);
        self
    }

    /// Check that every scene was dumped
    #[inline]
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Elapsed wall time in milliseconds
    #[inline]
    #[must_use]
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Scene collection analyzer
///
/// Owns the table of discovered scenes and the dump path assigned to each.
/// Each run parses every scene afresh; parsed registries live only for the
/// duration of their scene's pipeline.
#[derive(Debug, Clone)]
pub struct SceneCollectionAnalyzer {
    config: AnalyzerConfig,
    scenes: BTreeMap<SceneId, PathBuf>,
    dumps: BTreeMap<SceneId, PathBuf>,
}

impl SceneCollectionAnalyzer {
    /// Validate configuration and discover scenes
    ///
    /// # Errors
    /// - `ConfigError::MissingInputDir` / `MissingOutputDir` for blank paths
    /// - `ConfigError::DirectoryNotFound` if either directory does not exist
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let scenes: BTreeMap<_, _> = discover_scenes(&config.input_dir, &config.extension)
            .into_iter()
            .enumerate()
            .map(|(index, path)| (SceneId(index), path))
            .collect();

        tracing::info!(
            "discovered {} scene(s) under {}",
            scenes.len(),
            config.input_dir.display()
        );

        let dumps = assign_dump_paths(&config, &scenes);

        Ok(Self {
            config,
            scenes,
            dumps,
        })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Discovered scenes by index
    #[inline]
    #[must_use]
    pub fn scenes(&self) -> &BTreeMap<SceneId, PathBuf> {
        &self.scenes
    }

    /// Output path assigned to a scene's dump
    ///
    /// Paths are distinct across scenes; see [`assign_dump_paths`].
    #[inline]
    #[must_use]
    pub fn dump_path(&self, id: SceneId) -> Option<&Path> {
        self.dumps.get(&id).map(PathBuf::as_path)
    }

    /// Run in the configured mode
    ///
    /// Sequential mode does its blocking file I/O on the calling task and
    /// never yields; callers that share the runtime should run it on a
    /// blocking thread.
    pub async fn run(&self) -> RunReport {
        match self.config.mode {
            ExecutionMode::Sequential => self.run_sequential(),
            ExecutionMode::Concurrent => self.run_concurrent().await,
        }
    }

    /// Process scenes one at a time, ordered by file stem
    pub fn run_sequential(&self) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport::new(ExecutionMode::Sequential);

        let mut ordered: Vec<_> = self.scenes.iter().collect();
        ordered.sort_by(|(_, a), (_, b)| file_stem(a).cmp(file_stem(b)).then_with(|| a.cmp(b)));

        for (&id, path) in ordered {
            let Some(dump_path) = self.dump_path(id) else {
                continue;
            };
            match process_scene(path, dump_path) {
                Ok(dump) => {
                    tracing::info!("[SYNC] dumped: {}", display_name(&dump));
                    report.dumped.push(dump);
                }
                Err(e) => report.record_failure(id, path.clone(), e),
            }
        }

        let report = report.finish(started);
        tracing::info!("[SYNC] total: {} ms", report.elapsed_ms());
        report
    }

    /// Start every read at once; spawn parse+render+write per completed read
    pub async fn run_concurrent(&self) -> RunReport {
        let started = Instant::now();
        let mut report = RunReport::new(ExecutionMode::Concurrent);

        let mut reads: FuturesUnordered<_> = self
            .scenes
            .iter()
            .map(|(&id, path)| async move { (id, path, read_scene(path).await) })
            .collect();

        let mut tasks = JoinSet::new();
        let mut pending = BTreeMap::new();

        while let Some((id, path, text)) = reads.next().await {
            let Some(dump_path) = self.dump_path(id).map(Path::to_path_buf) else {
                continue;
            };
            match text {
                Ok(text) => {
                    let scene_path = path.clone();
                    pending.insert(id, path.clone());
                    tasks.spawn(async move {
                        let result = dump_scene(scene_path, text, dump_path).await;
                        if let Ok(dump) = &result {
                            tracing::info!("[DUMPED] {}", display_name(dump));
                        }
                        (id, result)
                    });
                }
                Err(e) => report.record_failure(id, path.clone(), e),
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, result)) => {
                    let Some(path) = pending.remove(&id) else {
                        continue;
                    };
                    match result {
                        Ok(dump) => report.dumped.push(dump),
                        Err(e) => report.record_failure(id, path, e),
                    }
                }
                Err(e) => tracing::error!("scene task failed to join: {}", e),
            }
        }

        for (id, path) in pending {
            report.record_failure(id, path, AnalyzerError::Aborted);
        }

        let report = report.finish(started);
        tracing::info!("[ASYNC] total: {} ms", report.elapsed_ms());
        report
    }
}

/// Map every scene to a distinct dump path in the output directory
///
/// A scene normally dumps to `<file name><suffix>`. When several scenes share
/// a file name, each of them is qualified with its directory relative to the
/// input root (`a/b/Main.unity` becomes `a_b_Main.unity.dump`). A qualified
/// name that is still taken gets the scene id in front. Assignment follows
/// scene id order, so it is the same for every run and mode.
#[must_use]
pub fn assign_dump_paths(
    config: &AnalyzerConfig,
    scenes: &BTreeMap<SceneId, PathBuf>,
) -> BTreeMap<SceneId, PathBuf> {
    let suffix = config.dump_suffix.as_str();
    let mut claims: HashMap<String, usize> = HashMap::with_capacity(scenes.len());
    for path in scenes.values() {
        *claims.entry(dump_file_name(path, suffix)).or_default() += 1;
    }

    let mut taken = HashSet::with_capacity(scenes.len());
    scenes
        .iter()
        .map(|(&id, path)| {
            let plain = dump_file_name(path, suffix);
            let mut name = if claims.get(&plain).is_some_and(|&count| count > 1) {
                qualified_name(&config.input_dir, path, &plain)
            } else {
                plain.clone()
            };
            if taken.contains(&name) {
                name = format!("{}_{}", id.0, name);
            }
            if name != plain {
                tracing::warn!(
                    scene = %path.display(),
                    "dump name {} is shared, writing {} instead",
                    plain,
                    name
                );
            }
            taken.insert(name.clone());
            (id, config.output_dir.join(name))
        })
        .collect()
}

fn qualified_name(input_dir: &Path, scene_path: &Path, plain: &str) -> String {
    let prefix = scene_path
        .strip_prefix(input_dir)
        .ok()
        .and_then(Path::parent)
        .map(|dir| {
            dir.components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("_")
        })
        .unwrap_or_default();

    if prefix.is_empty() {
        plain.to_string()
    } else {
        format!("{prefix}_{plain}")
    }
}

/// Find scene files under `root`, sorted by path
///
/// Unreadable directory entries are logged and skipped.
#[must_use]
pub fn discover_scenes(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| has_extension(path, extension))
        .collect()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

fn file_stem(path: &Path) -> &OsStr {
    path.file_stem().unwrap_or_default()
}

fn display_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name().unwrap_or_default().to_string_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usa_test_utils::{player_scene, Workspace};

    #[test]
    fn discovery_is_recursive_and_filtered() {
        let ws = Workspace::new();
        ws.add_scene("b.unity", &player_scene());
        ws.add_scene("nested/deeper/a.unity", &player_scene());
        ws.add_scene("Upper.UNITY", &player_scene());
        ws.add_scene("notes.txt", "not a scene");
        ws.add_scene("prefab.unity.meta", "meta");

        let found = discover_scenes(ws.input.path(), "unity");
        let names: Vec<_> = found.iter().map(|p| display_name(p).into_owned()).collect();

        assert_eq!(names.len(), 3);
        assert!(names.contains(&"a.unity".to_string()));
        assert!(names.contains(&"b.unity".to_string()));
        assert!(names.contains(&"Upper.UNITY".to_string()));
    }

    #[test]
    fn discovery_of_empty_dir() {
        let ws = Workspace::new();
        assert!(discover_scenes(ws.input.path(), "unity").is_empty());
    }

    #[test]
    fn scene_ids_are_sequential() {
        let ws = Workspace::new();
        ws.add_scene("one.unity", &player_scene());
        ws.add_scene("two.unity", &player_scene());
        ws.add_scene("sub/three.unity", &player_scene());

        let analyzer =
            SceneCollectionAnalyzer::new(AnalyzerConfig::new(ws.input.path(), ws.output.path())).unwrap();
        let ids: Vec<_> = analyzer.scenes().keys().copied().collect();
        assert_eq!(ids, vec![SceneId(0), SceneId(1), SceneId(2)]);
    }

    #[test]
    fn constructor_rejects_blank_dirs() {
        let ws = Workspace::new();
        let err = SceneCollectionAnalyzer::new(AnalyzerConfig::new("", ws.output.path())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingInputDir));

        let err = SceneCollectionAnalyzer::new(AnalyzerConfig::new(ws.input.path(), "")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOutputDir));
    }

    #[test]
    fn dump_path_uses_output_dir() {
        let ws = Workspace::new();
        ws.add_scene("x/y/Main.unity", &player_scene());
        let analyzer =
            SceneCollectionAnalyzer::new(AnalyzerConfig::new(ws.input.path(), ws.output.path())).unwrap();

        assert_eq!(
            analyzer.dump_path(SceneId(0)),
            Some(ws.output.path().join("Main.unity.dump").as_path())
        );
        assert_eq!(analyzer.dump_path(SceneId(1)), None);
    }

    #[test]
    fn shared_file_names_get_directory_prefix() {
        let ws = Workspace::new();
        ws.add_scene("Main.unity", &player_scene());
        ws.add_scene("a/Main.unity", &player_scene());
        ws.add_scene("b/c/Main.unity", &player_scene());
        ws.add_scene("b/Other.unity", &player_scene());

        let analyzer =
            SceneCollectionAnalyzer::new(AnalyzerConfig::new(ws.input.path(), ws.output.path())).unwrap();
        let mut names: Vec<_> = analyzer
            .scenes()
            .keys()
            .filter_map(|&id| analyzer.dump_path(id))
            .map(|path| display_name(path).into_owned())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec!["Main.unity.dump", "Other.unity.dump", "a_Main.unity.dump", "b_c_Main.unity.dump"]
        );
    }

    #[test]
    fn qualified_name_clash_falls_back_to_scene_id() {
        let ws = Workspace::new();
        ws.add_scene("a/b/Main.unity", &player_scene());
        ws.add_scene("a_b/Main.unity", &player_scene());

        let analyzer =
            SceneCollectionAnalyzer::new(AnalyzerConfig::new(ws.input.path(), ws.output.path())).unwrap();
        let mut paths: Vec<_> = analyzer
            .scenes()
            .keys()
            .filter_map(|&id| analyzer.dump_path(id))
            .collect();
        paths.sort();
        paths.dedup();

        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn report_helpers() {
        let mut report = RunReport::new(ExecutionMode::Sequential);
        assert!(report.succeeded());

        report.record_failure(SceneId(3), PathBuf::from("c.unity"), AnalyzerError::Aborted);
        report.record_failure(SceneId(1), PathBuf::from("a.unity"), AnalyzerError::Aborted);
        let report = report.finish(Instant::now());

        assert!(!report.succeeded());
        let ids: Vec<_> = report.failures.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![SceneId(1), SceneId(3)]);
    }
}
