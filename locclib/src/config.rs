//! `locc.toml` configuration.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [project]
//! name = "demo"
//! version = "1.2.0"
//!
//! [count]
//! doc_strings = true
//! include_tests = true
//! include = ["src/**"]
//! exclude = ["**/generated/**"]
//!
//! [reports]
//! dir = "build/reports/locc"
//! formats = ["xml", "html"]
//! relative_paths = true
//!
//! [languages]
//! extensions = { kts = "Kotlin" }
//! remove_extensions = ["h"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{CountOptions, Language, LanguageRegistry};
use crate::error::LoccError;
use crate::output::ReportFormat;
use crate::source::FilterConfig;
use crate::Result;

/// Name of the configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "locc.toml";

/// Version reported when none is configured.
pub const UNSPECIFIED_VERSION: &str = "unspecified";

/// Globs excluded when test sources are not counted.
pub const TEST_SOURCE_GLOBS: &[&str] = &["**/test/**", "**/tests/**"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoccConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub count: CountConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub languages: LanguagesConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Defaults to the root directory name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountConfig {
    #[serde(default = "default_true")]
    pub doc_strings: bool,
    /// Count files under `test` and `tests` directories
    #[serde(default = "default_true")]
    pub include_tests: bool,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            doc_strings: true,
            include_tests: true,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportsConfig {
    /// Output directory, relative to the project root
    #[serde(default = "default_reports_dir")]
    pub dir: PathBuf,
    #[serde(default = "ReportFormat::defaults")]
    pub formats: Vec<ReportFormat>,
    #[serde(default = "default_true")]
    pub relative_paths: bool,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            dir: default_reports_dir(),
            formats: ReportFormat::defaults(),
            relative_paths: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguagesConfig {
    /// Extension to language name or identifier
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
    #[serde(default)]
    pub remove_extensions: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("build/reports/locc")
}

impl LoccConfig {
    /// Parse configuration text. `origin` names the source in errors.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| LoccError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoccError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Self::parse(&content, path)
    }

    /// Load `locc.toml` from `root` if present, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn project_name(&self, root: &Path) -> String {
        self.project.name.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.to_string_lossy().into_owned())
        })
    }

    pub fn project_version(&self) -> String {
        self.project
            .version
            .clone()
            .unwrap_or_else(|| UNSPECIFIED_VERSION.to_string())
    }

    pub fn count_options(&self) -> CountOptions {
        CountOptions::new().count_doc_strings(self.count.doc_strings)
    }

    pub fn filter(&self) -> Result<FilterConfig> {
        let mut exclude = self.count.exclude.clone();
        if !self.count.include_tests {
            exclude.extend(TEST_SOURCE_GLOBS.iter().map(|g| g.to_string()));
        }
        FilterConfig::from_globs(&self.count.include, &exclude)
    }

    /// The report directory, resolved against `root` when relative.
    pub fn reports_dir(&self, root: &Path) -> PathBuf {
        if self.reports.dir.is_absolute() {
            self.reports.dir.clone()
        } else {
            root.join(&self.reports.dir)
        }
    }

    /// Build the language registry: defaults, minus removed extensions, plus
    /// added ones.
    pub fn registry(&self) -> Result<LanguageRegistry> {
        let mut registry = LanguageRegistry::new();
        self.languages.apply_to(&mut registry)?;
        Ok(registry)
    }
}

impl LanguagesConfig {
    pub fn apply_to(&self, registry: &mut LanguageRegistry) -> Result<()> {
        for extension in &self.remove_extensions {
            registry.remove_extension(extension);
        }
        for (extension, language) in &self.extensions {
            let language: Language = language.parse()?;
            registry.add_extension(extension, language);
        }
        Ok(())
    }
}
