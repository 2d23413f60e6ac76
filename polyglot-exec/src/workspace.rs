use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{error::Error, languages::RunnerSpec, template::TemplateContext, Result};

const DIR_PREFIX: &str = "polyglot-exec-";

/// Filesystem reservation for a single execution request.
///
/// Every path lives under a freshly created, randomly named directory, so two
/// requests never share a file even when they run the same language at the
/// same time. The directory is removed by [`Workspace::release`], and again by
/// `Drop` if the owning task never got that far.
#[derive(Debug)]
pub struct Workspace {
    id: String,
    root: PathBuf,
    source_path: PathBuf,
    support_paths: Vec<PathBuf>,
    artifact_paths: Vec<PathBuf>,
    released: bool,
}

impl Workspace {
    /// Create the request directory under `temp_root` and derive all paths from `spec`.
    ///
    /// A relative `temp_root` is resolved against the current directory: the
    /// child runs inside the request directory, so every path handed to it
    /// must be absolute.
    pub async fn allocate(spec: &RunnerSpec, temp_root: &Path) -> Result<Self> {
        let temp_root = std::path::absolute(temp_root).map_err(|source| Error::Workspace {
            path: temp_root.to_path_buf(),
            source,
        })?;
        let id = Uuid::new_v4().simple().to_string();
        let root = temp_root.join(format!("{}{}", DIR_PREFIX, id));

        fs::create_dir_all(&temp_root)
            .await
            .map_err(|source| Error::Workspace {
                path: temp_root.clone(),
                source,
            })?;
        // create_dir rather than create_dir_all: an existing directory is a collision
        fs::create_dir(&root)
            .await
            .map_err(|source| Error::Workspace {
                path: root.clone(),
                source,
            })?;

        debug!("Allocated workspace {} for {}", root.display(), spec.id);

        Ok(Self {
            source_path: root.join(spec.source_file),
            support_paths: spec.support_files.iter().map(|f| root.join(f.name)).collect(),
            artifact_paths: spec.artifacts.iter().map(|a| root.join(a)).collect(),
            id,
            root,
            released: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn artifact_paths(&self) -> &[PathBuf] {
        &self.artifact_paths
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn template_context(&self) -> TemplateContext<'_> {
        TemplateContext {
            source: &self.source_path,
            workdir: &self.root,
        }
    }

    /// Materialize the source file, support files and scratch directories.
    pub async fn write_source(&self, spec: &RunnerSpec, source: &str) -> Result<()> {
        let contents = match spec.source_prelude {
            Some(prelude) => format!("{}{}", prelude, source),
            None => source.to_string(),
        };
        write_file(&self.source_path, contents.as_bytes()).await?;

        for (file, path) in spec.support_files.iter().zip(&self.support_paths) {
            write_file(path, file.contents.as_bytes()).await?;
        }

        for dir in spec.scratch_dirs {
            let path = self.root.join(dir);
            fs::create_dir_all(&path)
                .await
                .map_err(|source| Error::Workspace { path, source })?;
        }

        Ok(())
    }

    /// Remove everything this request created. Safe to call more than once;
    /// paths that were never created are skipped. Failures are logged only.
    pub async fn release(&mut self) {
        if self.released {
            return;
        }
        for path in self.owned_paths() {
            remove_path(path).await;
        }
        remove_path(&self.root).await;
        // set last: if this future is dropped midway, Drop finishes the job
        self.released = true;

        debug!("Released workspace {}", self.root.display());
    }

    fn release_blocking(&mut self) {
        for path in self.owned_paths() {
            remove_path_blocking(path);
        }
        remove_path_blocking(&self.root);
        self.released = true;
    }

    fn owned_paths(&self) -> impl Iterator<Item = &PathBuf> {
        std::iter::once(&self.source_path)
            .chain(&self.support_paths)
            .chain(&self.artifact_paths)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.released {
            warn!("Workspace {} dropped before release", self.root.display());
            self.release_blocking();
        }
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .await
        .map_err(|source| Error::Workspace {
            path: path.to_path_buf(),
            source,
        })
}

// symlink_metadata so a link planted by user code is removed, not followed
async fn remove_path(path: &Path) {
    let result = match fs::symlink_metadata(path).await {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path).await,
        Ok(_) => fs::remove_file(path).await,
        Err(e) => Err(e),
    };
    log_cleanup(path, result);
}

fn remove_path_blocking(path: &Path) {
    let result = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) => Err(e),
    };
    log_cleanup(path, result);
}

fn log_cleanup(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to clean up {}: {}", path.display(), e),
    }
}
