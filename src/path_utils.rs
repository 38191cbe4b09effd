use std::path::{Component, Path};

/// Render `path` relative to `root` with `/` separators.
///
/// This is the form glob patterns are matched against and the form reported
/// in scan results. Paths outside `root` are rendered whole.
///
/// # Examples
///
/// - root `"project"`, path `"project/src/lib.rs"` gives `"src/lib.rs"`
/// - root `"."`, path `"./main.go"` gives `"main.go"`
#[must_use]
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);

    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            Component::ParentDir => Some("..".into()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
