//! Run-level options builder.

use std::path::{Path, PathBuf};

/// Search roots used when none are configured
pub const DEFAULT_SEARCH_ROOTS: [&str; 2] = ["refs", "libs"];

/// Output directory used when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Options of a pruning run that are not part of the policy document.
///
/// Input assemblies and the assemblies they reference are looked up in the search roots, in
/// order. Pruned modules are written into the output directory, which is created when
/// missing.
///
/// # Usage Examples
///
/// ```rust
/// use dotprune::project::RunOptions;
///
/// let options = RunOptions::new()
///     .search_roots(vec!["input".into()])
///     .add_search_root("third-party")
///     .output_dir("pruned")
///     .parallel(true);
///
/// assert_eq!(options.search_roots_list().len(), 2);
/// assert!(options.is_parallel());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Directories searched for input and referenced model documents
    search_roots: Vec<PathBuf>,
    /// Directory receiving the pruned modules
    output_dir: PathBuf,
    /// Installation searched for shared frameworks; `None` uses the environment
    dotnet_root: Option<PathBuf>,
    /// Whether assemblies are processed in parallel
    parallel: bool,
}

impl RunOptions {
    /// Create options with the default search roots and output directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            search_roots: DEFAULT_SEARCH_ROOTS.iter().map(PathBuf::from).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dotnet_root: None,
            parallel: false,
        }
    }

    /// Replace the search roots.
    ///
    /// # Arguments
    /// * `roots` - Directories searched in order; earlier roots win
    #[must_use]
    pub fn search_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.search_roots = roots;
        self
    }

    /// Append a search root after the current ones.
    #[must_use]
    pub fn add_search_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the dotnet installation searched for shared frameworks.
    ///
    /// Without it `DOTNET_ROOT` or the platform default location is used.
    #[must_use]
    pub fn dotnet_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.dotnet_root = Some(root.into());
        self
    }

    /// Enable or disable parallel processing of assemblies.
    #[must_use]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// The configured search roots
    #[must_use]
    pub fn search_roots_list(&self) -> &[PathBuf] {
        &self.search_roots
    }

    /// The output directory
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output_dir
    }

    /// The configured dotnet root, if any
    #[must_use]
    pub fn dotnet_root_path(&self) -> Option<&Path> {
        self.dotnet_root.as_deref()
    }

    /// Whether assemblies are processed in parallel
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::new()
    }
}
