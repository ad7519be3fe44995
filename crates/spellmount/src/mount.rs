// Ref-counted virtual-filesystem mount bookkeeping.
//
// A directory on disk is mounted into the engine at most once, no matter how
// many dictionary files inside it are in use. Each mounted file holds one
// reference on its directory; the physical mount is released when the last
// reference goes away. Buffer mounts are never shared between dictionaries
// and are released unconditionally.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use log::{debug, warn};
use spellmount_core::{EngineError, EngineModule};

/// What was mounted for one dictionary and how to release it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountLease {
    /// File-backed dictionary: each path holds a reference on its directory.
    Files { dic: PathBuf, aff: PathBuf },
    /// Buffer-backed dictionary: both virtual paths are unmounted directly.
    Buffers { dic: String, aff: String },
}

/// One mounted physical directory.
#[derive(Debug)]
struct DirMount {
    /// Virtual path the engine returned for this directory.
    target: String,
    /// Number of mounted files currently resolving into the directory.
    refs: u32,
}

/// Ref-count table over mounted directories.
///
/// Directories are keyed by the parent path exactly as supplied by the
/// caller; no canonicalization is applied, so two spellings of the same
/// physical directory are tracked as distinct mounts.
#[derive(Debug, Default)]
pub struct MountManager {
    dirs: HashMap<PathBuf, DirMount>,
}

impl MountManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a dictionary/affix file pair, returning their virtual paths
    /// (dictionary first). The containing directory is mounted on first use
    /// and gains one reference per file, so a directory holding both files
    /// ends up with two references from this call.
    pub fn mount_files(
        &mut self,
        module: &mut dyn EngineModule,
        dic: &Path,
        aff: &Path,
    ) -> Result<(String, String), EngineError> {
        let dic_virtual = self.mount_file(module, dic)?;
        let aff_virtual = match self.mount_file(module, aff) {
            Ok(path) => path,
            Err(e) => {
                // keep ref counts balanced when the second mount fails
                self.release_file(module, dic);
                return Err(e);
            }
        };
        Ok((dic_virtual, aff_virtual))
    }

    /// Mount a dictionary/affix buffer pair, tagged by the locale key so the
    /// virtual paths are stable and unique per dictionary.
    pub fn mount_buffers(
        &mut self,
        module: &mut dyn EngineModule,
        key: &str,
        dic: &[u8],
        aff: &[u8],
    ) -> Result<(String, String), EngineError> {
        let dic_virtual = module.mount_buffer(&format!("{key}.dic"), dic)?;
        let aff_virtual = match module.mount_buffer(&format!("{key}.aff"), aff) {
            Ok(path) => path,
            Err(e) => {
                if let Err(unmount_err) = module.unmount(&dic_virtual) {
                    warn!("failed to unmount buffer {dic_virtual}: {unmount_err}");
                }
                return Err(e);
            }
        };
        Ok((dic_virtual, aff_virtual))
    }

    /// Release everything a dictionary mounted.
    pub fn release(&mut self, module: &mut dyn EngineModule, lease: MountLease) {
        match lease {
            MountLease::Files { dic, aff } => {
                self.release_file(module, &dic);
                self.release_file(module, &aff);
            }
            MountLease::Buffers { dic, aff } => {
                for path in [dic, aff] {
                    if let Err(e) = module.unmount(&path) {
                        warn!("failed to unmount buffer {path}: {e}");
                    }
                }
            }
        }
    }

    /// Current reference count for a directory (zero when not mounted).
    pub fn directory_refs(&self, dir: &Path) -> u32 {
        self.dirs.get(dir).map_or(0, |mount| mount.refs)
    }

    /// Number of distinct mounted directories.
    pub fn mounted_directories(&self) -> usize {
        self.dirs.len()
    }

    /// Mount one file: mount its directory on first use, bump the ref count,
    /// and return the file's virtual path.
    fn mount_file(
        &mut self,
        module: &mut dyn EngineModule,
        file: &Path,
    ) -> Result<String, EngineError> {
        let Some(file_name) = file.file_name() else {
            return Err(EngineError::Mount {
                path: file.display().to_string(),
                reason: "path has no file name".to_string(),
            });
        };
        let dir = parent_dir(file);

        let (target, refs) = match self.dirs.get_mut(&dir) {
            Some(mount) => {
                mount.refs += 1;
                (mount.target.clone(), mount.refs)
            }
            None => {
                let target = module.mount_directory(&dir)?;
                self.dirs.insert(
                    dir.clone(),
                    DirMount {
                        target: target.clone(),
                        refs: 1,
                    },
                );
                (target, 1)
            }
        };
        debug!(
            "mounted {} ({refs} refs on {})",
            file.display(),
            dir.display()
        );
        Ok(format!("{target}/{}", file_name.to_string_lossy()))
    }

    /// Drop one file's reference on its directory; unmount the directory
    /// when the count reaches zero.
    fn release_file(&mut self, module: &mut dyn EngineModule, file: &Path) {
        let dir = parent_dir(file);
        let Some(mount) = self.dirs.get_mut(&dir) else {
            warn!(
                "release of {} ignored: {} is not mounted",
                file.display(),
                dir.display()
            );
            return;
        };
        mount.refs -= 1;
        if mount.refs > 0 {
            debug!(
                "released {} ({} refs left on {})",
                file.display(),
                mount.refs,
                dir.display()
            );
            return;
        }
        let target = mount.target.clone();
        self.dirs.remove(&dir);
        if let Err(e) = module.unmount(&target) {
            warn!("failed to unmount {}: {e}", dir.display());
        } else {
            debug!("unmounted {}", dir.display());
        }
    }
}

/// Directory a file resolves into; `.` for bare file names.
fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
