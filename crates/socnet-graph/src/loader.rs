//! Config-driven graph loading.
//!
//! [`GraphLoader`] binds a file path, delimiter, and weight function
//! together. Hosts build one from a [`ConfigProvider`] and either load an
//! existing file or initialise it from a default-graph generator.

use log::info;
use socnet_core::traits::ConfigProvider;
use socnet_core::{Error, Result};
use std::path::{Path, PathBuf};

use crate::Graph;
use crate::persistence::{self, CsvOptions, ExportOptions};
use crate::weight::WeightFunction;

/// Loads and saves one graph file.
#[derive(Clone, Debug)]
pub struct GraphLoader<W> {
    path: PathBuf,
    weight_fn: W,
    options: CsvOptions,
    export: ExportOptions,
}

impl<W: WeightFunction> GraphLoader<W> {
    /// Create a loader for `path` with the default delimiter.
    pub fn new(path: impl Into<PathBuf>, weight_fn: W) -> Self {
        Self {
            path: path.into(),
            weight_fn,
            options: CsvOptions::default(),
            export: ExportOptions::default(),
        }
    }

    /// Create a loader from a configuration provider.
    pub fn from_config<C: ConfigProvider>(config: &C, weight_fn: W) -> Result<Self> {
        let loader = Self::new(config.graph_path()?, weight_fn).with_delimiter(config.delimiter());
        Ok(loader)
    }

    /// Use a different field delimiter for both reading and writing.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.options.delimiter = delimiter;
        self.export.csv.delimiter = delimiter;
        self
    }

    /// Choose whether saved files carry the trailing weight column.
    pub fn with_weightless_export(mut self, weightless: bool) -> Self {
        self.export.weightless = weightless;
        self
    }

    /// The configured file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The weight function used on import.
    pub fn weight_fn(&self) -> &W {
        &self.weight_fn
    }

    /// Whether the configured file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Import the configured file.
    pub fn load(&self) -> Result<Graph> {
        persistence::import_csv(&self.path, &self.weight_fn, self.options)
    }

    /// Import the configured file, or create it from `default_graph`.
    ///
    /// When the file does not exist the generated graph is written to the
    /// configured path (parent directories included) before being returned.
    pub fn load_or_init<F>(&self, default_graph: F) -> Result<Graph>
    where
        F: FnOnce() -> Result<Graph>,
    {
        if self.exists() {
            return self.load();
        }

        info!(
            "{} not found; initialising from default graph",
            self.path.display()
        );
        let graph = default_graph()?;
        self.save(&graph)?;
        Ok(graph)
    }

    /// Export `graph` to the configured path.
    pub fn save(&self, graph: &Graph) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
        }
        persistence::export_csv(graph, &self.path, self.export)
    }
}

// ============================================================================
// Tests
// ============================================================================
