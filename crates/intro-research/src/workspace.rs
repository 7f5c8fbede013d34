//! Workspace paths and research discovery
//!
//! All paths hang off an explicit [`WorkspaceConfig`] handed to whichever
//! component needs them:
//!
//! ```text
//! <root>/<client_root>/<company>/**/research_output_*.json   newest first
//! <root>/<client_root>/<company>/1. Model/*.xlsx
//! <root>/<data_dir>/research_output_<slug>.json               legacy
//! ```

use crate::document::ResearchDocument;
use crate::error::ResearchError;
use intro_resolve::slugify;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Folder holding a client's model workbooks
pub const MODEL_FOLDER: &str = "1. Model";
/// File name of the optional workspace override file inside `data_dir`
pub const WORKSPACE_CONFIG_FILE: &str = "workspace_config.json";

/// Root directories of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace root; relative entries below resolve against it
    pub root: PathBuf,
    /// Folder holding one sub-folder per client
    pub client_root: PathBuf,
    /// Folder holding legacy research files and the override file
    pub data_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            client_root: PathBuf::from("Clients"),
            data_dir: PathBuf::from(".claude/data"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WorkspaceOverrides {
    client_root: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Workspace at `root` with default folder names
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// With client root folder
    #[must_use]
    pub fn with_client_root(mut self, client_root: impl Into<PathBuf>) -> Self {
        self.client_root = client_root.into();
        self
    }

    /// With data folder
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Workspace at `root`, applying `<data_dir>/workspace_config.json` when present.
    ///
    /// An unreadable override file is logged and ignored.
    #[must_use]
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(root);
        let path = config.data_path().join(WORKSPACE_CONFIG_FILE);
        if !path.is_file() {
            return config;
        }

        let overrides = std::fs::read_to_string(&path)
            .map_err(|e| ResearchError::io(&path, e))
            .and_then(|text| {
                serde_json::from_str::<WorkspaceOverrides>(&text).map_err(|e| ResearchError::json(&path, e))
            });

        match overrides {
            Ok(WorkspaceOverrides {
                client_root: Some(client_root),
            }) => config.client_root = client_root,
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "ignoring workspace config"),
        }
        config
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Absolute or root-relative client root
    #[must_use]
    pub fn client_root_path(&self) -> PathBuf {
        self.resolve(&self.client_root)
    }

    /// Absolute or root-relative data folder
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.resolve(&self.data_dir)
    }

    /// Client folder, `folder_override` replacing the company name
    #[must_use]
    pub fn client_dir(&self, company: &str, folder_override: Option<&str>) -> PathBuf {
        self.client_root_path().join(folder_override.unwrap_or(company))
    }

    /// Model workbook folder of a client
    #[must_use]
    pub fn model_dir(&self, company: &str) -> PathBuf {
        self.client_dir(company, None).join(MODEL_FOLDER)
    }

    /// Legacy research file locations, in lookup order
    #[must_use]
    pub fn legacy_research_paths(&self, company: &str) -> Vec<PathBuf> {
        let data = self.data_path();
        let dashed = company.to_lowercase().replace(' ', "-");
        vec![
            data.join(format!("research_output_{}.json", slugify(company))),
            data.join(format!("research_output_{dashed}.json")),
        ]
    }

    /// Research files under the client folder, newest first
    pub fn research_candidates(&self, company: &str) -> Result<Vec<PathBuf>, ResearchError> {
        let dir = self.client_dir(company, None);
        let pattern = format!(
            "{}/**/research_output_*.json",
            glob::Pattern::escape(&dir.to_string_lossy())
        );

        let mut found: Vec<(SystemTime, PathBuf)> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter_map(|path| {
                let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((modified, path))
            })
            .collect();

        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        Ok(found.into_iter().map(|(_, path)| path).collect())
    }

    /// Find and load the newest readable research document of a company.
    ///
    /// Client-folder files that fail to load are skipped; legacy files are
    /// tried after them and must load.
    pub fn find_research(&self, company: &str) -> Result<(PathBuf, ResearchDocument), ResearchError> {
        for path in self.research_candidates(company)? {
            match load_research(&path) {
                Ok(doc) => {
                    tracing::info!(path = %path.display(), "research JSON");
                    return Ok((path, doc));
                }
                Err(e) => tracing::debug!(error = %e, "skipping research candidate"),
            }
        }

        for path in self.legacy_research_paths(company) {
            if path.is_file() {
                tracing::info!(path = %path.display(), "research JSON (legacy)");
                let doc = load_research(&path)?;
                return Ok((path, doc));
            }
        }

        Err(ResearchError::NotFound {
            company: company.to_string(),
        })
    }

    /// Path of the research document [`find_research`](Self::find_research) would load
    pub fn find_research_json(&self, company: &str) -> Result<PathBuf, ResearchError> {
        self.find_research(company).map(|(path, _)| path)
    }

    /// Last model workbook (by name) in the client's model folder
    pub fn find_model(&self, company: &str) -> Result<PathBuf, ResearchError> {
        let dir = self.model_dir(company);
        let pattern = format!("{}/*.xlsx", glob::Pattern::escape(&dir.to_string_lossy()));

        glob::glob(&pattern)?
            .filter_map(Result::ok)
            .max()
            .ok_or(ResearchError::NoModel { dir })
    }
}

/// Load a research document from a file.
pub fn load_research(path: impl AsRef<Path>) -> Result<ResearchDocument, ResearchError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ResearchError::io(path, e))?;
    ResearchDocument::from_json_str(&text).map_err(|e| ResearchError::json(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_root() {
        let ws = WorkspaceConfig::new("/work");
        assert_eq!(ws.client_dir("Acme Foods", None), PathBuf::from("/work/Clients/Acme Foods"));
        assert_eq!(ws.client_dir("Acme Foods", Some("Acme")), PathBuf::from("/work/Clients/Acme"));
        assert_eq!(ws.model_dir("Acme Foods"), PathBuf::from("/work/Clients/Acme Foods/1. Model"));
    }

    #[test]
    fn legacy_paths_use_slug_then_dashes() {
        let ws = WorkspaceConfig::new("/work");
        assert_eq!(
            ws.legacy_research_paths("Acme Foods"),
            vec![
                PathBuf::from("/work/.claude/data/research_output_acme_foods.json"),
                PathBuf::from("/work/.claude/data/research_output_acme-foods.json"),
            ]
        );
    }

    #[test]
    fn absolute_client_root_wins() {
        let ws = WorkspaceConfig::new("/work").with_client_root("/shared/Clients");
        assert_eq!(ws.client_dir("Acme", None), PathBuf::from("/shared/Clients/Acme"));
    }
}
