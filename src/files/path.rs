use crate::err::StartupError;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Resolve the directory to serve to an absolute path, checking that it is one.
pub async fn canonical_root(dir: &Path) -> Result<PathBuf, StartupError> {
    let root = fs::canonicalize(dir)
        .await
        .map_err(|source| StartupError::Root {
            path: dir.to_owned(),
            source,
        })?;
    let metadata = fs::metadata(&root)
        .await
        .map_err(|source| StartupError::Root {
            path: root.clone(),
            source,
        })?;
    if !metadata.is_dir() {
        return Err(StartupError::NotADirectory(root));
    }
    Ok(root)
}

/// Map the path of a request URI onto the filesystem under `root`.
///
/// `.` and `..` are resolved the way a URL normalizer would, except that `..`
/// at the top is ignored. Anything else that isn't a plain file name (drive
/// prefixes, root markers) is dropped, so the result never leaves `root`.
pub fn translate(root: &Path, uri_path: &str) -> PathBuf {
    let decoded = percent_decode_str(uri_path).decode_utf8_lossy();

    let mut path = root.to_owned();
    let mut depth = 0usize;
    for segment in decoded.split('/') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => {
                path.push(name);
                depth += 1;
            }
            (Some(Component::ParentDir), None) => {
                if depth > 0 {
                    path.pop();
                    depth -= 1;
                }
            }
            (None, _) | (Some(Component::CurDir), None) => {}
            _ => log::debug!("{} -> [dropped segment {:?}]", uri_path, segment),
        }
    }
    path
}

/// The decoded form of a request path, for display.
pub fn decode(uri_path: &str) -> String {
    percent_decode_str(uri_path).decode_utf8_lossy().into_owned()
}
