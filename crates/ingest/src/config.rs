use crate::session::SESSION_FILE_NAME;
use std::path::PathBuf;

pub const TEMP_DIR_ENV: &str = "DROPCAT_TEMP_DIR";
pub const STATE_PATH_ENV: &str = "DROPCAT_STATE_PATH";
pub const PASTE_MAX_AGE_ENV: &str = "DROPCAT_PASTE_MAX_AGE_HOURS";

pub const DEFAULT_PASTE_MAX_AGE_HOURS: u64 = 24;

/// Where ingestion keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Directory for paste files.
    pub temp_dir: PathBuf,
    /// Session record location.
    pub state_file: PathBuf,
    pub paste_max_age_hours: u64,
}

impl IngestConfig {
    /// Defaults rooted at `temp_dir`.
    pub fn in_dir(temp_dir: impl Into<PathBuf>) -> Self {
        let temp_dir = temp_dir.into();
        Self {
            state_file: temp_dir.join(SESSION_FILE_NAME),
            temp_dir,
            paste_max_age_hours: DEFAULT_PASTE_MAX_AGE_HOURS,
        }
    }

    /// System temp dir, overridable through `DROPCAT_*` variables. Blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let temp_dir = value(TEMP_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        let mut config = Self::in_dir(temp_dir);

        if let Some(state) = value(STATE_PATH_ENV) {
            config.state_file = PathBuf::from(state);
        }
        if let Some(raw) = value(PASTE_MAX_AGE_ENV) {
            match raw.parse::<u64>() {
                Ok(hours) => config.paste_max_age_hours = hours,
                Err(err) => log::warn!("Ignoring {PASTE_MAX_AGE_ENV}={raw}: {err}"),
            }
        }
        config
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::in_dir(std::env::temp_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_use_system_temp_dir() {
        let config = IngestConfig::from_lookup(lookup(&[]));
        assert_eq!(config.temp_dir, std::env::temp_dir());
        assert_eq!(
            config.state_file,
            std::env::temp_dir().join(SESSION_FILE_NAME)
        );
        assert_eq!(config.paste_max_age_hours, DEFAULT_PASTE_MAX_AGE_HOURS);
    }

    #[test]
    fn env_overrides_apply_and_blanks_are_ignored() {
        let config = IngestConfig::from_lookup(lookup(&[
            (TEMP_DIR_ENV, "/work/tmp"),
            (STATE_PATH_ENV, "  "),
            (PASTE_MAX_AGE_ENV, "6"),
        ]));
        assert_eq!(config.temp_dir, PathBuf::from("/work/tmp"));
        assert_eq!(config.state_file, PathBuf::from("/work/tmp").join(SESSION_FILE_NAME));
        assert_eq!(config.paste_max_age_hours, 6);
    }

    #[test]
    fn explicit_state_path_and_bad_age() {
        let config = IngestConfig::from_lookup(lookup(&[
            (STATE_PATH_ENV, "/var/lib/dropcat/state.json"),
            (PASTE_MAX_AGE_ENV, "soon"),
        ]));
        assert_eq!(
            config.state_file,
            PathBuf::from("/var/lib/dropcat/state.json")
        );
        assert_eq!(config.paste_max_age_hours, DEFAULT_PASTE_MAX_AGE_HOURS);
    }
}
