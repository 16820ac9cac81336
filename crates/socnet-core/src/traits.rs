//! Core traits for socnet configuration.
//!
//! [`ConfigProvider`] abstracts where a graph file lives and how it is
//! delimited, so graph loaders never consult process-wide constants.

use std::path::PathBuf;

use crate::Result;

/// Trait for graph-loading configuration.
///
/// Hosts (GUI shells, command-line front ends, tests) implement this to tell
/// the graph loader which flat file to read or create.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use socnet_core::traits::ConfigProvider;
/// use socnet_core::Result;
///
/// #[derive(Clone)]
/// struct ClassroomConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for ClassroomConfig {
///     fn project_name(&self) -> &str {
///         "classroom"
///     }
///
///     fn graph_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.join("students.csv"))
///     }
/// }
///
/// let config = ClassroomConfig { data_dir: PathBuf::from("/data") };
/// assert_eq!(config.delimiter(), b',');
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Path of the flat graph file.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined (e.g. no working
    /// directory to resolve a relative default against).
    fn graph_path(&self) -> Result<PathBuf>;

    /// Field delimiter of the flat graph file.
    fn delimiter(&self) -> u8 {
        b','
    }
}
