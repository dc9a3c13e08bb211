use crate::domain::model::{PrimersConfig, QpcrConfig, Recipe, Samples};
use crate::utils::error::{QpcrError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

const DEFAULT_EXPERIMENT_NAME: &str = "qpcr-experiment";

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("static env var pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` 以外的副檔名一律視為 TOML
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub operator: Option<String>,
}

/// 實驗設定檔：`[experiment]` 描述 + `[samples]`、`[recipe]`、`[primers]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentFile {
    #[serde(default)]
    pub experiment: ExperimentInfo,
    #[serde(flatten)]
    pub config: QpcrConfig,
}

impl ExperimentFile {
    pub fn new(config: QpcrConfig) -> Self {
        Self {
            experiment: ExperimentInfo::default(),
            config,
        }
    }

    /// 從檔案載入設定，依副檔名決定格式
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QpcrError::IoError)?;
        Self::from_str_with_format(&content, ConfigFormat::from_path(&path))
    }

    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml_str(content),
            ConfigFormat::Json => Self::from_json_str(content),
        }
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| QpcrError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從 JSON 字串解析設定
    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        serde_json::from_str(&processed).map_err(|e| QpcrError::ConfigValidationError {
            field: "json_parsing".to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PRIMER_LOT})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn name(&self) -> &str {
        self.experiment
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_EXPERIMENT_NAME)
    }

    pub fn config(&self) -> &QpcrConfig {
        &self.config
    }

    pub fn samples(&self) -> &Samples {
        &self.config.samples
    }

    pub fn recipe(&self) -> &Recipe {
        &self.config.recipe
    }

    pub fn primers(&self) -> &PrimersConfig {
        &self.config.primers
    }

    pub fn into_config(self) -> QpcrConfig {
        self.config
    }
}

impl Validate for ExperimentFile {
    fn validate(&self) -> Result<()> {
        self.config.validate()
    }
}
