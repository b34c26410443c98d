use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Get the cast home directory
///
/// Returns `$XDG_CONFIG_HOME/cast` or `~/.config/cast` if not set. The
/// default `cast.json` and the preset template files live here.
pub fn config_dir() -> Result<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => directories::BaseDirs::new()
            .context("Failed to get home directory")?
            .home_dir()
            .join(".config"),
    };

    Ok(base.join("cast"))
}

/// Expand `~` and environment variables in a user-supplied path.
pub fn expand_path(path: &std::path::Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .map_err(|err| anyhow::anyhow!("Failed to expand path '{}': {}", raw, err))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_config_dir_from_env() {
        let temp = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp.path());

        let dir = config_dir().unwrap();
        assert_eq!(dir, temp.path().join("cast"));
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_env() {
        env::set_var("XDG_CONFIG_HOME", "");

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/cast"));
    }

    #[test]
    #[serial]
    fn test_expand_path_env_var() {
        env::set_var("CAST_TEST_DIR", "/srv/presets");
        let expanded = expand_path(Path::new("$CAST_TEST_DIR/cast.json")).unwrap();
        assert_eq!(expanded, PathBuf::from("/srv/presets/cast.json"));
    }

    #[test]
    fn test_expand_path_plain() {
        let expanded = expand_path(Path::new("presets/cast.json")).unwrap();
        assert_eq!(expanded, PathBuf::from("presets/cast.json"));
    }

    #[test]
    fn test_expand_path_unknown_var() {
        assert!(expand_path(Path::new("$CAST_SURELY_UNSET_VAR/x")).is_err());
    }
}
