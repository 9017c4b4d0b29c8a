use std::path::{Path, PathBuf};

pub trait EngineProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn find_on_search_path(&self, program: &str) -> Option<PathBuf>;
}
