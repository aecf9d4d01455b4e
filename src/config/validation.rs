//! Configuration validation

use super::Config;

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate configuration and return warnings/errors
pub fn validate(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    validate_nat(config, &mut result);
    validate_log(config, &mut result);

    result
}

fn validate_nat(config: &Config, result: &mut ValidationResult) {
    match config.nat.port_range {
        None => {
            result.warn("nat.port_range not specified, using the host's local port range");
        }
        Some((start, end)) => {
            if start == 0 || start > end {
                result.error(format!("nat.port_range: invalid range {start}..={end}"));
            } else if start < 1024 {
                result.warn(format!(
                    "nat.port_range: range {start}..={end} overlaps well-known ports"
                ));
            }
        }
    }

    if config.nat.reclaim_idle_secs == Some(0) {
        result.warn("nat.reclaim_idle_secs is 0, pressure sweeps will reclaim every binding");
    }
}

fn validate_log(config: &Config, result: &mut ValidationResult) {
    match config.log.level.to_lowercase().as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => {}
        other => result.error(format!("log.level: unknown level '{other}'")),
    }

    match config.log.format.as_str() {
        "pretty" | "compact" | "json" => {}
        other => result.error(format!("log.format: unknown format '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        let config = parse(
            r#"
            [nat]
            port_range = [40000, 49999]
            "#,
        );

        let result = validate(&config);
        assert!(!result.has_errors());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_range_warns() {
        let result = validate(&parse(""));
        assert!(!result.has_errors());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_inverted_range_errors() {
        let config = parse(
            r#"
            [nat]
            port_range = [49999, 40000]
            "#,
        );

        assert!(validate(&config).has_errors());
    }

    #[test]
    fn test_privileged_range_warns() {
        let config = parse(
            r#"
            [nat]
            port_range = [80, 2000]
            "#,
        );

        let result = validate(&config);
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_zero_reclaim_idle_warns() {
        let config = parse(
            r#"
            [nat]
            port_range = [40000, 49999]
            reclaim_idle_secs = 0
            "#,
        );

        let result = validate(&config);
        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_log_settings_error() {
        let config = parse(
            r#"
            [nat]
            port_range = [40000, 49999]

            [log]
            level = "verbose"
            format = "xml"
            "#,
        );

        let result = validate(&config);
        assert_eq!(result.errors.len(), 2);
    }
}
