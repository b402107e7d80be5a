//! Fixed locations searched for config and token files.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::config::Environment;

const APP_DIR: &str = "fondu";
const USER_DIR: &str = ".fondu";
const PROJECT_DIR: &str = ".fondu";
const CONFIG_FILE: &str = "config.yaml";
const TOKEN_FILE: &str = "token";

/// Ordered config file and token file locations.
///
/// Both lists follow the same directory order: user-scoped, XDG config,
/// project-local.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialPaths {
    pub config_files: Vec<PathBuf>,
    pub token_files: Vec<PathBuf>,
}

impl CredentialPaths {
    /// Standard locations for the current user and working directory.
    ///
    /// User and XDG locations are omitted when no home directory can be
    /// determined and `XDG_CONFIG_HOME` is unset.
    pub fn discover(env: &dyn Environment) -> Self {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self::for_home(home.as_deref(), env)
    }

    /// Standard locations relative to an explicit home directory.
    pub fn for_home(home: Option<&Path>, env: &dyn Environment) -> Self {
        let mut dirs = Vec::with_capacity(3);

        if let Some(home) = home {
            dirs.push(home.join(USER_DIR));
        }

        let xdg = env
            .var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| home.map(|h| h.join(".config")));
        if let Some(xdg) = xdg {
            dirs.push(xdg.join(APP_DIR));
        }

        dirs.push(PathBuf::from(PROJECT_DIR));

        Self::from_dirs(dirs)
    }

    /// `config.yaml` and `token` under each directory, in order.
    pub fn from_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let (config_files, token_files) = dirs
            .into_iter()
            .map(|dir| (dir.join(CONFIG_FILE), dir.join(TOKEN_FILE)))
            .unzip();
        Self {
            config_files,
            token_files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryEnvironment;

    #[test]
    fn test_paths_default_xdg() {
        let paths = CredentialPaths::for_home(Some(Path::new("/home/u")), &MemoryEnvironment::new());
        assert_eq!(
            paths.config_files,
            vec![
                PathBuf::from("/home/u/.fondu/config.yaml"),
                PathBuf::from("/home/u/.config/fondu/config.yaml"),
                PathBuf::from(".fondu/config.yaml"),
            ]
        );
        assert_eq!(
            paths.token_files,
            vec![
                PathBuf::from("/home/u/.fondu/token"),
                PathBuf::from("/home/u/.config/fondu/token"),
                PathBuf::from(".fondu/token"),
            ]
        );
    }

    #[test]
    fn test_paths_xdg_override() {
        let env = MemoryEnvironment::new().with_var("XDG_CONFIG_HOME", "/xdg");
        let paths = CredentialPaths::for_home(Some(Path::new("/home/u")), &env);
        assert_eq!(paths.config_files[1], PathBuf::from("/xdg/fondu/config.yaml"));

        // relative values are ignored per the XDG base directory spec
        let env = MemoryEnvironment::new().with_var("XDG_CONFIG_HOME", "rel");
        let paths = CredentialPaths::for_home(Some(Path::new("/home/u")), &env);
        assert_eq!(paths.config_files[1], PathBuf::from("/home/u/.config/fondu/config.yaml"));
    }

    #[test]
    fn test_paths_without_home() {
        let paths = CredentialPaths::for_home(None, &MemoryEnvironment::new());
        assert_eq!(paths.config_files, vec![PathBuf::from(".fondu/config.yaml")]);
        assert_eq!(paths.token_files, vec![PathBuf::from(".fondu/token")]);
    }
}
