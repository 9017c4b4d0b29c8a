use std::path::{Path, PathBuf};

use crate::core::interfaces::ports::EngineProbe;

/// Checks the real filesystem and the `PATH` environment variable.
pub struct FilesystemEngineProbe;

impl FilesystemEngineProbe {
    pub fn initialize() -> Self {
        Self
    }

    fn executable_names(program: &str) -> Vec<String> {
        if cfg!(target_os = "windows") && !program.to_ascii_lowercase().ends_with(".exe") {
            vec![format!("{}.exe", program), program.to_string()]
        } else {
            vec![program.to_string()]
        }
    }

    fn search_directories(
        search_path: Option<std::ffi::OsString>,
        program: &str,
    ) -> impl Iterator<Item = PathBuf> {
        let names = Self::executable_names(program);
        search_path
            .map(|value| std::env::split_paths(&value).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
            .flat_map(move |directory| {
                names
                    .iter()
                    .map(|name| directory.join(name))
                    .collect::<Vec<_>>()
            })
    }
}

impl EngineProbe for FilesystemEngineProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn find_on_search_path(&self, program: &str) -> Option<PathBuf> {
        Self::search_directories(std::env::var_os("PATH"), program).find(|candidate| self.exists(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_only_for_regular_files() {
        let directory = tempfile::tempdir().unwrap();
        let executable = directory.path().join("tesseract");
        std::fs::write(&executable, b"#!/bin/sh\n").unwrap();
        let probe = FilesystemEngineProbe::initialize();

        assert!(probe.exists(&executable));
        assert!(!probe.exists(directory.path()));
        assert!(!probe.exists(&directory.path().join("missing")));
    }

    #[test]
    fn test_search_directories_follow_path_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let joined = std::env::join_paths([first.path(), second.path()]).unwrap();

        let candidates: Vec<PathBuf> =
            FilesystemEngineProbe::search_directories(Some(joined), "tesseract").collect();

        assert!(candidates[0].starts_with(first.path()));
        assert!(candidates.last().unwrap().starts_with(second.path()));
    }

    #[test]
    fn test_search_directories_without_path_is_empty() {
        assert_eq!(FilesystemEngineProbe::search_directories(None, "tesseract").count(), 0);
    }
}
