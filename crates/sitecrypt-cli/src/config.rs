use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{ArtifactArgs, Cli};
use crate::constants::{
    DEFAULT_CIPHERTEXT_PATH, DEFAULT_CONFIG_FILE, DEFAULT_INPUT_PATH, DEFAULT_RECORD_PATH,
};
use crate::errors::CliError;

#[derive(Debug, Default, Deserialize)]
pub struct SiteCryptConfig {
    #[serde(default)]
    pub paths: PathsSection,

    /// Directory relative config paths are resolved against.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathsSection {
    pub input: Option<String>,
    pub ciphertext: Option<String>,
    pub record: Option<String>,
}

/// Final file locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub input: PathBuf,
    pub ciphertext: PathBuf,
    pub record: PathBuf,
}

impl SiteCryptConfig {
    /// Resolve paths: CLI flag, then config file, then built-in default.
    pub fn resolve(&self, input: Option<&Path>, artifacts: &ArtifactArgs) -> ResolvedPaths {
        ResolvedPaths {
            input: self.pick(input, self.paths.input.as_deref(), DEFAULT_INPUT_PATH),
            ciphertext: self.pick(
                artifacts.ciphertext.as_deref(),
                self.paths.ciphertext.as_deref(),
                DEFAULT_CIPHERTEXT_PATH,
            ),
            record: self.pick(
                artifacts.record.as_deref(),
                self.paths.record.as_deref(),
                DEFAULT_RECORD_PATH,
            ),
        }
    }

    fn pick(&self, flag: Option<&Path>, configured: Option<&str>, default: &str) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        match (configured, self.base_dir.as_ref()) {
            (Some(value), Some(base)) if Path::new(value).is_relative() => base.join(value),
            (Some(value), _) => PathBuf::from(value),
            (None, _) => PathBuf::from(default),
        }
    }
}

/// Load the config named by `--config`, else `./sitecrypt.toml`, else defaults.
pub fn load_config(cli: &Cli) -> anyhow::Result<SiteCryptConfig> {
    if let Some(path) = cli.config.as_ref() {
        if !path.exists() {
            return Err(CliError::not_found(
                format!("Config file not found: {}", path.display()),
                "Hint: check --config or SITECRYPT_CONFIG.",
            )
            .into());
        }
        return read_config(path);
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return read_config(local);
    }

    tracing::debug!("no config file, using default paths");
    Ok(SiteCryptConfig::default())
}

pub fn read_config(path: &Path) -> anyhow::Result<SiteCryptConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let mut config: SiteCryptConfig = toml::from_str(&contents).map_err(|e| {
        CliError::invalid_input(format!("Failed to parse config {}: {}", path.display(), e))
    })?;
    config.base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    tracing::info!(config = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_flags() -> ArtifactArgs {
        ArtifactArgs {
            ciphertext: None,
            record: None,
        }
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let paths = SiteCryptConfig::default().resolve(None, &no_flags());
        assert_eq!(paths.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(paths.ciphertext, PathBuf::from(DEFAULT_CIPHERTEXT_PATH));
        assert_eq!(paths.record, PathBuf::from(DEFAULT_RECORD_PATH));
    }

    #[test]
    fn test_config_paths_are_relative_to_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sitecrypt.toml");
        std::fs::write(
            &path,
            "[paths]\ninput = \"data/me.yaml\"\nrecord = \"/abs/record.json\"\n",
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        let paths = config.resolve(None, &no_flags());

        assert_eq!(paths.input, dir.path().join("data/me.yaml"));
        assert_eq!(paths.record, PathBuf::from("/abs/record.json"));
        assert_eq!(paths.ciphertext, PathBuf::from(DEFAULT_CIPHERTEXT_PATH));
    }

    #[test]
    fn test_flags_override_config() {
        let config: SiteCryptConfig =
            toml::from_str("[paths]\nciphertext = \"from-config.ctx\"\n").unwrap();
        let flags = ArtifactArgs {
            ciphertext: Some(PathBuf::from("from-flag.ctx")),
            record: None,
        };

        let paths = config.resolve(Some(Path::new("flag.yaml")), &flags);
        assert_eq!(paths.input, PathBuf::from("flag.yaml"));
        assert_eq!(paths.ciphertext, PathBuf::from("from-flag.ctx"));
    }

    #[test]
    fn test_invalid_toml_is_invalid_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sitecrypt.toml");
        std::fs::write(&path, "[paths\n").unwrap();

        let err = read_config(&path).unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().expect("CliError");
        assert!(matches!(cli_err, CliError::InvalidInput(_)));
    }
}
