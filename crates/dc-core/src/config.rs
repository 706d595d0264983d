use serde::{Deserialize, Serialize};

/// Which emptiness predicate a compaction applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Drop only absent values.
    #[default]
    Absent,
    /// Drop absent values, blank scalars and empty containers.
    Blank,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Blank => "blank",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactConfig {
    pub mode: Mode,
    /// Deepest container nesting accepted, the root container being level 1.
    /// `None` accepts any depth.
    pub max_depth: Option<usize>,
}

impl CompactConfig {
    pub fn new(mode: Mode) -> Self {
        Self { mode, max_depth: None }
    }

    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompactConfig::default();
        assert_eq!(config.mode, Mode::Absent);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_config_from_json() {
        let config: CompactConfig =
            serde_json::from_str(r#"{"mode":"blank","max_depth":32}"#).unwrap();
        assert_eq!(config, CompactConfig::new(Mode::Blank).with_max_depth(32));
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: CompactConfig = serde_json::from_str(r#"{"mode":"blank"}"#).unwrap();
        assert_eq!(config.mode, Mode::Blank);
        assert_eq!(config.max_depth, None);

        let config: CompactConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CompactConfig::default());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(serde_json::from_str::<CompactConfig>(r#"{"mode":"empty"}"#).is_err());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::Absent.as_str(), "absent");
        assert_eq!(Mode::Blank.as_str(), "blank");
        assert_eq!(serde_json::to_string(&Mode::Blank).unwrap(), "\"blank\"");
    }
}
