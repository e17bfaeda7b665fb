use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine the user home directory")]
    NoHome,

    #[error("failed to create home directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn platform_home() -> Result<PathBuf, HomeDirError> {
    dirs::home_dir().ok_or(HomeDirError::NoHome)
}

/// Expand a leading `~` and make the path absolute against the current dir.
fn expand(raw: &str) -> Result<PathBuf, HomeDirError> {
    let expanded = if raw == "~" {
        platform_home()?
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        platform_home()?.join(rest)
    } else {
        PathBuf::from(raw)
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }
    let cwd = std::env::current_dir().map_err(|source| HomeDirError::Create {
        path: expanded.clone(),
        source,
    })?;
    Ok(cwd.join(expanded))
}

/// Resolve the application home directory.
///
/// `None` selects `<platform home>/<default_subdir>`. When `create` is set the
/// directory (and its parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let dir = match configured {
        Some(raw) => expand(raw.trim())?,
        None => platform_home()?.join(default_subdir),
    };

    if create {
        ensure_dir(&dir)?;
    }
    Ok(dir)
}

fn ensure_dir(dir: &Path) -> Result<(), HomeDirError> {
    std::fs::create_dir_all(dir).map_err(|source| HomeDirError::Create {
        path: dir.to_path_buf(),
        source,
    })
}
