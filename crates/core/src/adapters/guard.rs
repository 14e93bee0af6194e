use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{ReadError, Result};

/// Subdirectories of the root that raw reads may reach.
pub const ALLOWED_DIRS: [&str; 3] = ["queue", "projects", "config"];

/// Confines caller-supplied relative paths to the allow-listed subdirectories
/// of a root.
#[derive(Debug, Clone)]
pub struct PathGuard {
  root: PathBuf,
  allowed_roots: Vec<PathBuf>,
}

impl PathGuard {
  pub fn new(root: &Path) -> io::Result<Self> {
    let root = resolve_lenient(&std::path::absolute(root)?)?;
    let allowed_roots = ALLOWED_DIRS
      .iter()
      .map(|dir| resolve_lenient(&root.join(dir)))
      .collect::<io::Result<Vec<_>>>()?;
    Ok(Self {
      root,
      allowed_roots,
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn allowed_roots(&self) -> &[PathBuf] {
    &self.allowed_roots
  }

  /// Resolve `relative` against the root, following symlinks and `..`, and
  /// return the absolute path if it lies inside an allowed root.
  pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
    let joined = self.root.join(relative);
    let resolved = resolve_lenient(&joined).map_err(|source| ReadError::FileRead {
      path: joined.clone(),
      source,
    })?;
    if self.is_allowed(&resolved) {
      Ok(resolved)
    } else {
      debug!(
        event = "path_rejected",
        requested = relative,
        resolved = %resolved.display(),
        "path outside allowed roots"
      );
      Err(ReadError::PathNotAllowed {
        path: relative.to_string(),
      })
    }
  }

  pub fn is_allowed(&self, resolved: &Path) -> bool {
    self
      .allowed_roots
      .iter()
      .any(|root| resolved.starts_with(root))
  }
}

/// Symlinks followed while resolving a path whose tail does not exist.
const MAX_SYMLINK_HOPS: usize = 40;

/// Canonicalize `path`; when a trailing part does not exist yet, canonicalize
/// the deepest existing ancestor and re-attach the missing components.
/// Dangling symlinks along the way are followed to their targets.
fn resolve_lenient(path: &Path) -> io::Result<PathBuf> {
  resolve_hops(path, 0)
}

fn resolve_hops(path: &Path, hops: usize) -> io::Result<PathBuf> {
  match path.canonicalize() {
    Ok(resolved) => Ok(resolved),
    Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
    Err(err) => {
      let Some(parent) = path.parent() else {
        return Err(err);
      };
      let base = resolve_hops(parent, hops)?;
      match path.components().next_back() {
        Some(Component::Normal(name)) => follow_dangling(&base, name.as_ref(), hops),
        Some(Component::ParentDir) => Ok(base.parent().map(Path::to_path_buf).unwrap_or(base)),
        Some(Component::CurDir) => Ok(base),
        _ => Err(err),
      }
    }
  }
}

/// `base.join(name)`, unless that entry is a symlink whose target is missing;
/// then resolve the target instead.
fn follow_dangling(base: &Path, name: &Path, hops: usize) -> io::Result<PathBuf> {
  let joined = base.join(name);
  let is_link = fs::symlink_metadata(&joined).is_ok_and(|meta| meta.file_type().is_symlink());
  if !is_link {
    return Ok(joined);
  }
  if hops >= MAX_SYMLINK_HOPS {
    return Err(io::Error::other(format!(
      "too many levels of symbolic links: {}",
      joined.display()
    )));
  }
  // An absolute target replaces `base` on join.
  let target = fs::read_link(&joined)?;
  resolve_hops(&base.join(target), hops + 1)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn guarded_root() -> (tempfile::TempDir, PathGuard) {
    let td = tempfile::tempdir().unwrap();
    for dir in ALLOWED_DIRS {
      fs::create_dir_all(td.path().join(dir)).unwrap();
    }
    let guard = PathGuard::new(td.path()).unwrap();
    (td, guard)
  }

  #[test]
  fn accepts_existing_file_in_queue() {
    let (td, guard) = guarded_root();
    fs::write(td.path().join("queue/inbox.yaml"), "a: 1\n").unwrap();
    let resolved = guard.resolve("queue/inbox.yaml").unwrap();
    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("queue/inbox.yaml"));
  }

  #[test]
  fn accepts_not_yet_created_file() {
    let (_td, guard) = guarded_root();
    let resolved = guard.resolve("config/settings.yaml").unwrap();
    assert!(resolved.ends_with("config/settings.yaml"));
  }

  #[test]
  fn accepts_missing_nested_directories() {
    let (_td, guard) = guarded_root();
    let resolved = guard.resolve("projects/new/deep/plan.yaml").unwrap();
    assert!(resolved.ends_with("projects/new/deep/plan.yaml"));
  }

  #[test]
  fn rejects_dot_dot_traversal() {
    let (_td, guard) = guarded_root();
    let err = guard.resolve("queue/../secrets.yaml").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[test]
  fn rejects_traversal_through_missing_directory() {
    let (_td, guard) = guarded_root();
    let err = guard.resolve("queue/missing/../../../etc/passwd").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[test]
  fn rejects_sibling_with_shared_prefix() {
    let (td, guard) = guarded_root();
    fs::create_dir_all(td.path().join("queue_backup")).unwrap();
    let err = guard.resolve("queue_backup/a.yaml").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[test]
  fn rejects_absolute_path_outside_root() {
    let (_td, guard) = guarded_root();
    let err = guard.resolve("/etc/hosts").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[test]
  fn rejects_root_level_files() {
    let (td, guard) = guarded_root();
    fs::write(td.path().join("dashboard.md"), "# hi\n").unwrap();
    let err = guard.resolve("dashboard.md").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[cfg(unix)]
  #[test]
  fn rejects_symlink_escape() {
    let (td, guard) = guarded_root();
    let outside = tempfile::tempdir().unwrap();
    fs::write(outside.path().join("secret.yaml"), "k: v\n").unwrap();
    std::os::unix::fs::symlink(outside.path(), td.path().join("queue/link")).unwrap();
    let err = guard.resolve("queue/link/secret.yaml").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[cfg(unix)]
  #[test]
  fn accepts_symlink_into_allowed_root() {
    let (td, guard) = guarded_root();
    fs::write(td.path().join("config/real.yaml"), "k: v\n").unwrap();
    std::os::unix::fs::symlink(
      td.path().join("config/real.yaml"),
      td.path().join("queue/alias.yaml"),
    )
    .unwrap();
    let resolved = guard.resolve("queue/alias.yaml").unwrap();
    assert!(resolved.ends_with("config/real.yaml"));
  }

  #[cfg(unix)]
  #[test]
  fn rejects_dangling_symlink_pointing_outside() {
    let (td, guard) = guarded_root();
    let outside = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(
      outside.path().join("not_yet.yaml"),
      td.path().join("queue/link.yaml"),
    )
    .unwrap();
    let err = guard.resolve("queue/link.yaml").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[cfg(unix)]
  #[test]
  fn rejects_dangling_directory_symlink_pointing_outside() {
    let (td, guard) = guarded_root();
    let outside = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path().join("gone"), td.path().join("queue/dir")).unwrap();
    let err = guard.resolve("queue/dir/a.yaml").unwrap_err();
    assert!(matches!(err, ReadError::PathNotAllowed { .. }));
  }

  #[cfg(unix)]
  #[test]
  fn follows_dangling_relative_symlink_inside_root() {
    let (td, guard) = guarded_root();
    std::os::unix::fs::symlink("../config/later.yaml", td.path().join("queue/later.yaml")).unwrap();
    let resolved = guard.resolve("queue/later.yaml").unwrap();
    assert!(resolved.ends_with("config/later.yaml"));
  }

  #[cfg(unix)]
  #[test]
  fn symlink_loop_is_a_read_error() {
    let (td, guard) = guarded_root();
    let a = td.path().join("queue/a.yaml");
    let b = td.path().join("queue/b.yaml");
    std::os::unix::fs::symlink(&b, &a).unwrap();
    std::os::unix::fs::symlink(&a, &b).unwrap();
    let err = guard.resolve("queue/a.yaml").unwrap_err();
    assert!(matches!(err, ReadError::FileRead { .. }));
  }
}
