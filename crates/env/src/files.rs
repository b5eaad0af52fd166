//! Layout of the base and per-environment `.env` files under the workspace root

use crate::source_parser::parse_env_content;
use env_run_core::{
    EnvironmentVariables, Error, Result, BASE_ENV_FILENAME, GENERATED_FILE_HEADER,
    GENERATED_FILE_NOTICE,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// The `.env` and `.env.<name>` files for one resolution
#[derive(Debug, Clone)]
pub struct EnvFiles {
    root: PathBuf,
    env_name: Option<String>,
}

impl EnvFiles {
    /// Describe the files for an optional environment name.
    ///
    /// Names that would escape the workspace root are rejected.
    pub fn new(root: impl Into<PathBuf>, env_name: Option<&str>) -> Result<Self> {
        if let Some(name) = env_name {
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(Error::configuration(format!(
                    "invalid environment name '{name}'"
                )));
            }
        }
        Ok(Self {
            root: root.into(),
            env_name: env_name.map(str::to_string),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn env_name(&self) -> Option<&str> {
        self.env_name.as_deref()
    }

    /// `<root>/.env`
    pub fn base_env_file(&self) -> PathBuf {
        self.root.join(BASE_ENV_FILENAME)
    }

    /// `<root>/.env.<name>`, only when an environment name is set
    pub fn override_env_file(&self) -> Option<PathBuf> {
        self.env_name
            .as_ref()
            .map(|name| self.root.join(format!("{BASE_ENV_FILENAME}.{name}")))
    }

    pub fn override_exists(&self) -> bool {
        self.override_env_file().is_some_and(|path| path.is_file())
    }

    /// Whether the remote store has to be consulted.
    ///
    /// Never without an environment name; otherwise when the override file is
    /// missing or a refresh is forced.
    pub fn should_use_remote(&self, force_refresh: bool) -> bool {
        self.env_name.is_some() && (force_refresh || !self.override_exists())
    }

    /// Write freshly fetched secrets to the override file, replacing its content
    pub fn write_environment_file(&self, secrets: &EnvironmentVariables) -> Result<PathBuf> {
        let path = self.override_env_file().ok_or_else(|| {
            Error::configuration("cannot write an environment file without an environment name")
        })?;
        replace_cache_file(&path, &render_environment_file(secrets))?;
        debug!("Wrote {} variables to {}", secrets.len(), path.display());
        Ok(path)
    }
}

/// Read and parse an env file; `None` when it does not exist
pub fn read_env_file(path: &Path) -> Result<Option<EnvironmentVariables>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(path).map_err(|e| Error::file_system(path, "read env file", e))?;
    Ok(Some(parse_env_content(&content)))
}

/// Replace the cache file in one rename so readers never see a partial file.
///
/// The temporary file lives next to the target and is removed on any failure.
fn replace_cache_file(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir)
        .map_err(|e| Error::file_system(dir, "stage environment file", e))?;
    staged
        .write_all(content.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::file_system(path, "write environment file", e))?;

    staged
        .persist(path)
        .map_err(|e| Error::file_system(path, "replace environment file", e.error))?;
    Ok(())
}

/// Render secrets in the generated override file format
pub fn render_environment_file(secrets: &EnvironmentVariables) -> String {
    let mut content = format!("{GENERATED_FILE_HEADER}\n{GENERATED_FILE_NOTICE}\n");
    for (key, value) in secrets {
        content.push_str(key);
        content.push('=');
        content.push_str(value);
        content.push('\n');
    }
    content
}
