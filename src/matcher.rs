//! Built-in [`FileMatcher`] policies.

use ignore::overrides::{Override, OverrideBuilder};

use crate::error::FfindError;
use crate::traits::FileMatcher;

/// Version-control metadata directories skipped by [`BasicMatcherBuilder::skip_vcs`].
pub const VCS_DIRS: &[&str] = &[".git", ".svn", ".hg"];

/// Reports everything and prunes nothing. Used when no matcher is specified.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl FileMatcher for PassThrough {}

/// The usual find-tool policy: hidden entries, VCS directories, named
/// directories, extensions, result kinds, and a glob on file names.
///
/// ```rust
/// use ffind::{BasicMatcher, FileMatcher};
///
/// let m = BasicMatcher::builder()
///     .skip_hidden(true)
///     .skip_vcs(true)
///     .skip_extension("log")
///     .pattern("*.RS")
///     .build()
///     .unwrap();
///
/// assert!(m.skip_directory_name(".git"));
/// assert!(m.skip_file_name("debug.LOG"));
/// assert!(m.match_file_name("main.rs"));
/// assert!(!m.match_file_name("main.c"));
/// ```
#[derive(Debug, Clone)]
pub struct BasicMatcher {
    skip_hidden: bool,
    skip_vcs: bool,
    skip_dir_names: Vec<String>,
    skip_extensions: Vec<String>,
    skip_dir_results: bool,
    skip_file_results: bool,
    pattern: Option<Override>,
}

impl BasicMatcher {
    pub fn builder() -> BasicMatcherBuilder {
        BasicMatcherBuilder::default()
    }

    fn is_hidden(&self, name: &str) -> bool {
        self.skip_hidden && name.starts_with('.') && name != "." && name != ".."
    }

    fn has_skipped_extension(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self
                .skip_extensions
                .iter()
                .any(|skip| skip.eq_ignore_ascii_case(ext)),
            _ => false,
        }
    }
}

impl FileMatcher for BasicMatcher {
    fn skip_directory_name(&self, name: &str) -> bool {
        self.is_hidden(name)
            || (self.skip_vcs && VCS_DIRS.contains(&name))
            || self.skip_dir_names.iter().any(|d| d == name)
    }

    fn skip_directory_results(&self) -> bool {
        self.skip_dir_results
    }

    fn skip_file_results(&self) -> bool {
        self.skip_file_results
    }

    fn skip_file_name(&self, name: &str) -> bool {
        self.is_hidden(name) || self.has_skipped_extension(name)
    }

    fn match_file_name(&self, name: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.matched(name, false).is_whitelist(),
            None => true,
        }
    }
}

/// Configures a [`BasicMatcher`]. Everything is off by default; the name
/// pattern is case-insensitive unless [`case_sensitive`](Self::case_sensitive)
/// is set.
#[derive(Debug, Clone, Default)]
pub struct BasicMatcherBuilder {
    skip_hidden: bool,
    skip_vcs: bool,
    skip_dir_names: Vec<String>,
    skip_extensions: Vec<String>,
    skip_dir_results: bool,
    skip_file_results: bool,
    patterns: Vec<String>,
    case_sensitive: bool,
}

impl BasicMatcherBuilder {
    /// Skip names starting with `.`, both files and directories.
    pub fn skip_hidden(mut self, yes: bool) -> Self {
        self.skip_hidden = yes;
        self
    }

    /// Skip `.git`, `.svn` and `.hg` directories.
    pub fn skip_vcs(mut self, yes: bool) -> Self {
        self.skip_vcs = yes;
        self
    }

    /// Prune every directory with exactly this name.
    pub fn skip_dir_name(mut self, name: impl Into<String>) -> Self {
        self.skip_dir_names.push(name.into());
        self
    }

    /// Skip files with this extension. The leading dot is optional and the
    /// comparison ignores ASCII case.
    pub fn skip_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.skip_extensions
            .push(ext.as_ref().trim_start_matches('.').to_string());
        self
    }

    /// Report files only.
    pub fn skip_dir_results(mut self, yes: bool) -> Self {
        self.skip_dir_results = yes;
        self
    }

    /// Report directories only.
    pub fn skip_file_results(mut self, yes: bool) -> Self {
        self.skip_file_results = yes;
        self
    }

    /// Add a glob that file names must match. Several globs are alternatives;
    /// a glob starting with `!` excludes names an earlier glob admitted.
    pub fn pattern(mut self, glob: impl Into<String>) -> Self {
        self.patterns.push(glob.into());
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// # Errors
    ///
    /// [`FfindError::InvalidPattern`] if a glob does not compile.
    pub fn build(self) -> Result<BasicMatcher, FfindError> {
        let pattern = if self.patterns.is_empty() {
            None
        } else {
            let mut builder = OverrideBuilder::new("");
            builder
                .case_insensitive(!self.case_sensitive)
                .map_err(|e| FfindError::InvalidPattern(e.to_string()))?;
            for glob in &self.patterns {
                builder
                    .add(glob)
                    .map_err(|e| FfindError::InvalidPattern(format!("{glob}: {e}")))?;
            }
            Some(
                builder
                    .build()
                    .map_err(|e| FfindError::InvalidPattern(e.to_string()))?,
            )
        };

        Ok(BasicMatcher {
            skip_hidden: self.skip_hidden,
            skip_vcs: self.skip_vcs,
            skip_dir_names: self.skip_dir_names,
            skip_extensions: self.skip_extensions,
            skip_dir_results: self.skip_dir_results,
            skip_file_results: self.skip_file_results,
            pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_through_reports_everything() {
        let m = PassThrough;
        assert!(!m.skip_directory_name(".git"));
        assert!(!m.skip_directory_results());
        assert!(!m.skip_file_results());
        assert!(!m.skip_file_name(".hidden"));
        assert!(m.match_file_name("anything"));
    }

    #[test]
    fn hidden_applies_to_files_and_dirs() {
        let m = BasicMatcher::builder().skip_hidden(true).build().unwrap();
        assert!(m.skip_directory_name(".cache"));
        assert!(m.skip_file_name(".bashrc"));
        assert!(!m.skip_file_name("visible"));
    }

    #[test]
    fn vcs_dirs_only_when_enabled() {
        let off = BasicMatcher::builder().build().unwrap();
        let on = BasicMatcher::builder().skip_vcs(true).build().unwrap();
        for d in VCS_DIRS {
            assert!(!off.skip_directory_name(d));
            assert!(on.skip_directory_name(d));
        }
        assert!(!on.skip_directory_name("src"));
    }

    #[test]
    fn extensions_ignore_case_and_dot() {
        let m = BasicMatcher::builder()
            .skip_extension(".Log")
            .skip_extension("tmp")
            .build()
            .unwrap();
        assert!(m.skip_file_name("a.log"));
        assert!(m.skip_file_name("a.TMP"));
        assert!(!m.skip_file_name("a.logs"));
        // a dotfile has no extension
        assert!(!m.skip_file_name(".log"));
    }

    #[test]
    fn pattern_case_sensitivity() {
        let insensitive = BasicMatcher::builder().pattern("readme*").build().unwrap();
        assert!(insensitive.match_file_name("README.md"));

        let sensitive = BasicMatcher::builder()
            .pattern("readme*")
            .case_sensitive(true)
            .build()
            .unwrap();
        assert!(!sensitive.match_file_name("README.md"));
        assert!(sensitive.match_file_name("readme.txt"));
    }

    #[test]
    fn patterns_are_alternatives() {
        let m = BasicMatcher::builder()
            .pattern("*.rs")
            .pattern("*.toml")
            .build()
            .unwrap();
        assert!(m.match_file_name("lib.rs"));
        assert!(m.match_file_name("Cargo.toml"));
        assert!(!m.match_file_name("notes.md"));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let err = BasicMatcher::builder().pattern("a[").build().unwrap_err();
        assert!(matches!(err, FfindError::InvalidPattern(_)));
        assert!(!err.is_recoverable());
    }
}
