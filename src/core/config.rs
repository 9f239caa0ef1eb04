//! Runtime settings. Each value comes from its CLI flag, then its
//! `TAPTERM_*` environment variable, then a default under the user's local
//! data directory.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;

const APP_DIR: &str = "tapterm";

#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Where the game snapshot is kept between sessions
    #[arg(long, env = "TAPTERM_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Where logs are written
    #[arg(long, env = "TAPTERM_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Fixed seed for target draws
    #[arg(long, env = "TAPTERM_SEED", global = true)]
    pub seed: Option<u64>,

    /// Ignore any saved snapshot and start a new game
    #[arg(long, global = true)]
    pub fresh: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub state_file: PathBuf,
    pub log_file: PathBuf,
    pub seed: Option<u64>,
    pub fresh: bool,
}

impl Settings {
    pub fn resolve(args: &SettingsArgs) -> Result<Self> {
        let data_dir = || -> Result<PathBuf> {
            dirs::data_local_dir()
                .map(|d| d.join(APP_DIR))
                .ok_or_else(|| anyhow!("no local data directory; pass --state-file and --log-file"))
        };

        let state_file = match &args.state_file {
            Some(path) => path.clone(),
            None => data_dir()?.join("state.json"),
        };
        let log_file = match &args.log_file {
            Some(path) => path.clone(),
            None => data_dir()?.join("tapterm.log"),
        };

        Ok(Self {
            state_file,
            log_file,
            seed: args.seed,
            fresh: args.fresh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths_win() {
        let args = SettingsArgs {
            state_file: Some(PathBuf::from("/tmp/a.json")),
            log_file: Some(PathBuf::from("/tmp/a.log")),
            seed: Some(3),
            fresh: true,
        };
        let settings = Settings::resolve(&args).unwrap();
        assert_eq!(settings.state_file, PathBuf::from("/tmp/a.json"));
        assert_eq!(settings.log_file, PathBuf::from("/tmp/a.log"));
        assert_eq!(settings.seed, Some(3));
        assert!(settings.fresh);
    }

    #[test]
    fn test_defaults_live_under_app_dir() {
        // Only meaningful where the platform reports a data directory
        if dirs::data_local_dir().is_none() {
            return;
        }
        let settings = Settings::resolve(&SettingsArgs::default()).unwrap();
        assert!(settings.state_file.ends_with("tapterm/state.json"));
        assert!(settings.log_file.ends_with("tapterm/tapterm.log"));
        assert_eq!(settings.seed, None);
    }
}
