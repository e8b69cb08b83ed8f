use std::path::{Component, Path, PathBuf};

/// System trees that are refused along with everything beneath them.
#[cfg(not(windows))]
const PROTECTED_TREES: &[&str] = &[
    "/bin", "/boot", "/dev", "/etc", "/lib", "/lib64", "/proc", "/sbin", "/sys", "/usr", "/System",
];

/// Refused only as the exact directory; their subdirectories hold user data
/// (macOS keeps per-user temp directories under `/var/folders`).
#[cfg(not(windows))]
const PROTECTED_EXACT: &[&str] = &["/var", "/Library"];

#[cfg(windows)]
const PROTECTED_ENV_VARS: &[&str] = &[
    "SystemRoot",
    "windir",
    "ProgramFiles",
    "ProgramFiles(x86)",
    "ProgramData",
];

/// Whether renaming inside `dir` must be refused.
///
/// Blank paths, bare drives, filesystem roots, operating system and program
/// directories, the home directory and the directory that contains it are
/// all dangerous. Relative paths are resolved against the current directory.
pub fn is_dangerous(dir: &Path) -> bool {
    let raw = dir.to_string_lossy();
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_bare_drive(trimmed) {
        return true;
    }

    let Some(full) = absolute(Path::new(trimmed)) else {
        return true;
    };

    if full.parent().is_none() {
        return true;
    }

    if protected_roots().iter().any(|root| is_within(&full, root)) || is_protected_exact(&full) {
        return true;
    }

    if let Some(home) = dirs::home_dir().and_then(|h| absolute(&h)) {
        if same_path(&full, &home) {
            return true;
        }
        if home.parent().is_some_and(|users| same_path(&full, users)) {
            return true;
        }
    }

    false
}

fn is_bare_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(not(windows))]
fn protected_roots() -> Vec<PathBuf> {
    PROTECTED_TREES.iter().map(PathBuf::from).collect()
}

#[cfg(not(windows))]
fn is_protected_exact(path: &Path) -> bool {
    PROTECTED_EXACT.iter().any(|p| same_path(path, Path::new(p)))
}

#[cfg(windows)]
fn is_protected_exact(_path: &Path) -> bool {
    false
}

#[cfg(windows)]
fn protected_roots() -> Vec<PathBuf> {
    PROTECTED_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .filter(|value| !value.is_empty())
        .filter_map(|value| absolute(Path::new(&value)))
        .collect()
}

/// Absolute, lexically normalized form of `path`. Symlinks are not followed.
pub(crate) fn absolute(path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                normalized.pop();
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    Some(normalized)
}

fn is_within(path: &Path, root: &Path) -> bool {
    let path_components: Vec<String> = path.components().map(comparable).collect();
    let root_components: Vec<String> = root.components().map(comparable).collect();
    path_components.starts_with(&root_components)
}

fn same_path(a: &Path, b: &Path) -> bool {
    a.components().map(comparable).eq(b.components().map(comparable))
}

#[cfg(windows)]
fn comparable(component: Component<'_>) -> String {
    component.as_os_str().to_string_lossy().to_lowercase()
}

#[cfg(not(windows))]
fn comparable(component: Component<'_>) -> String {
    component.as_os_str().to_string_lossy().into_owned()
}
