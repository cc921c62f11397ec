//! `[output]` section: report format and terminal colors

use council_domain::OutputFormat;
use serde::{Deserialize, Serialize};

fn color_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutputConfig {
    /// Report format used when `--output` is not given
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default = "color_default")]
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: color_default(),
        }
    }
}

impl FileOutputConfig {
    /// Format for this run: the command-line choice wins over the file.
    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_consensus_format_from_file() {
        let config: FileConfig = toml::from_str("[output]\nformat = \"consensus\"\n").unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Consensus));
        assert!(config.output.color);
        assert_eq!(config.output.resolve_format(None), OutputFormat::Consensus);
    }

    #[test]
    fn test_flag_overrides_file_format() {
        let output = FileOutputConfig {
            format: Some(OutputFormat::Json),
            color: false,
        };
        assert_eq!(output.resolve_format(Some(OutputFormat::Full)), OutputFormat::Full);
        assert_eq!(FileOutputConfig::default().resolve_format(None), OutputFormat::default());
    }
}
