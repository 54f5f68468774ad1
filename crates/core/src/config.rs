use serde::Deserialize;

use crate::error::CampaignResult;

const ENV_PREFIX: &str = "CAMPAIGN_BUILDER";

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_BUILDER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub funnel: FunnelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Refuse `next` while the current step has unresolved issues.
    #[serde(default = "default_strict_step_gate")]
    pub strict_step_gate: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FunnelConfig {
    /// Decimal places kept on conversion and drop-off percentages.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_strict_step_gate() -> bool {
    false
}
fn default_precision() -> u32 {
    1
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            strict_step_gate: default_strict_step_gate(),
        }
    }
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wizard: WizardConfig::default(),
            funnel: FunnelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> CampaignResult<Self> {
        Self::load_from(Self::environment())
    }

    /// Variables named `CAMPAIGN_BUILDER__<SECTION>__<KEY>`.
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    pub fn load_from(source: config::Environment) -> CampaignResult<Self> {
        let config = config::Config::builder().add_source(source).build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampaignError;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::environment().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.wizard.strict_step_gate);
        assert_eq!(config.funnel.precision, 1);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"wizard": {"strict_step_gate": true}}"#).unwrap();
        assert!(config.wizard.strict_step_gate);
        assert_eq!(config.funnel.precision, 1);
    }

    #[test]
    fn test_load_reads_prefixed_variables() {
        let config = AppConfig::load_from(env(&[
            ("CAMPAIGN_BUILDER__WIZARD__STRICT_STEP_GATE", "true"),
            ("CAMPAIGN_BUILDER__FUNNEL__PRECISION", "3"),
            ("OTHER_APP__FUNNEL__PRECISION", "9"),
        ]))
        .unwrap();
        assert!(config.wizard.strict_step_gate);
        assert_eq!(config.funnel.precision, 3);
    }

    #[test]
    fn test_load_without_variables_uses_defaults() {
        let config = AppConfig::load_from(env(&[])).unwrap();
        assert!(!config.wizard.strict_step_gate);
        assert_eq!(config.funnel.precision, 1);
    }

    #[test]
    fn test_load_rejects_malformed_value() {
        let err =
            AppConfig::load_from(env(&[("CAMPAIGN_BUILDER__FUNNEL__PRECISION", "lots")]))
                .unwrap_err();
        assert!(matches!(err, CampaignError::Config(_)));
    }
}
