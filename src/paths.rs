//! Lexical path helpers. Nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Lexically normalise `path`: drop `.` components, fold `name/..` pairs and
/// `..` directly under the root. Leading `..` of a relative path is kept.
/// An empty result becomes `.`.
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Replace the leading `from` of `path` with `to`.
///
/// Works component-wise, so `/a/bc` is not rewritten by `from = /a/b`.
/// Paths outside `from` are returned unchanged.
pub(crate) fn redirect(path: &Path, from: &Path, to: &Path) -> PathBuf {
    match path.strip_prefix(from) {
        Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
        Ok(rest) => to.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(p: &str) -> PathBuf {
        clean(Path::new(p))
    }

    #[test]
    fn clean_folds_dots() {
        assert_eq!(c("a/./b"), PathBuf::from("a/b"));
        assert_eq!(c("a/b/../c"), PathBuf::from("a/c"));
        assert_eq!(c("a//b/"), PathBuf::from("a/b"));
        assert_eq!(c("./a"), PathBuf::from("a"));
    }

    #[test]
    fn clean_edges() {
        assert_eq!(c(""), PathBuf::from("."));
        assert_eq!(c("."), PathBuf::from("."));
        assert_eq!(c("a/.."), PathBuf::from("."));
        assert_eq!(c("../a"), PathBuf::from("../a"));
        assert_eq!(c("../../a"), PathBuf::from("../../a"));
        assert_eq!(c("/.."), PathBuf::from("/"));
        assert_eq!(c("/../a"), PathBuf::from("/a"));
    }

    #[test]
    fn redirect_swaps_prefix() {
        let from = Path::new("/real/target");
        let to = Path::new("parent/link");
        assert_eq!(
            redirect(Path::new("/real/target/f.txt"), from, to),
            PathBuf::from("parent/link/f.txt")
        );
        assert_eq!(redirect(from, from, to), PathBuf::from("parent/link"));
    }

    #[test]
    fn redirect_is_component_wise() {
        let p = Path::new("/real/targets/f.txt");
        assert_eq!(
            redirect(p, Path::new("/real/target"), Path::new("link")),
            p.to_path_buf()
        );
    }
}
