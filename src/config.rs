use log::LevelFilter;


pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;
pub const DEFAULT_PREVIEW_LIMIT: usize = 16;

/// The report collects its subnet preview eagerly; more than this is capped.
pub const MAX_PREVIEW_LIMIT: usize = 4096;


/// Runtime settings, read from the environment once at startup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub color: bool,
    pub preview_limit: usize,

    /// Complaints about unusable values, to be logged once logging is up.
    pub warnings: Vec<String>,
}
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: DEFAULT_LOG_LEVEL,
            color: true,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            warnings: Vec::new(),
        }
    }
}
impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup function.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Config {
        let mut config = Config::default();

        if let Some(level) = lookup("SUBCALC_LOG") {
            match level.trim().parse::<LevelFilter>() {
                Ok(l) => config.log_level = l,
                Err(_) => config.warnings.push(format!(
                    "unknown log level {:?} in SUBCALC_LOG; using {}", level, DEFAULT_LOG_LEVEL,
                )),
            };
        }

        // https://no-color.org/
        if lookup("NO_COLOR").map(|v| !v.is_empty()).unwrap_or(false) {
            config.color = false;
        }

        if let Some(preview) = lookup("SUBCALC_PREVIEW") {
            match preview.trim().parse::<usize>() {
                Ok(p) if p > MAX_PREVIEW_LIMIT => {
                    config.preview_limit = MAX_PREVIEW_LIMIT;
                    config.warnings.push(format!(
                        "SUBCALC_PREVIEW {} exceeds the maximum; using {}", p, MAX_PREVIEW_LIMIT,
                    ));
                },
                Ok(p) => config.preview_limit = p,
                Err(_) => config.warnings.push(format!(
                    "unparsable SUBCALC_PREVIEW {:?}; using {}", preview, DEFAULT_PREVIEW_LIMIT,
                )),
            };
        }

        config
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config_of(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_of(&[]);
        assert_eq!(Config::default(), config);
        assert_eq!(LevelFilter::Warn, config.log_level);
        assert!(config.color);
        assert_eq!(16, config.preview_limit);
    }

    #[test]
    fn test_overrides() {
        let config = config_of(&[
            ("SUBCALC_LOG", "debug"),
            ("NO_COLOR", "1"),
            ("SUBCALC_PREVIEW", " 4 "),
        ]);
        assert_eq!(LevelFilter::Debug, config.log_level);
        assert!(!config.color);
        assert_eq!(4, config.preview_limit);
        assert!(config.warnings.is_empty());

        let config = config_of(&[("SUBCALC_LOG", "OFF"), ("NO_COLOR", "")]);
        assert_eq!(LevelFilter::Off, config.log_level);
        assert!(config.color);
    }

    #[test]
    fn test_preview_capped() {
        let config = config_of(&[("SUBCALC_PREVIEW", "18446744073709551615")]);
        assert_eq!(MAX_PREVIEW_LIMIT, config.preview_limit);
        assert_eq!(1, config.warnings.len());

        let config = config_of(&[("SUBCALC_PREVIEW", "4097")]);
        assert_eq!(MAX_PREVIEW_LIMIT, config.preview_limit);

        let config = config_of(&[("SUBCALC_PREVIEW", "4096")]);
        assert_eq!(4096, config.preview_limit);
        assert!(config.warnings.is_empty());

        let config = config_of(&[("SUBCALC_PREVIEW", "0")]);
        assert_eq!(0, config.preview_limit);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = config_of(&[("SUBCALC_LOG", "loud"), ("SUBCALC_PREVIEW", "-3")]);
        assert_eq!(DEFAULT_LOG_LEVEL, config.log_level);
        assert_eq!(DEFAULT_PREVIEW_LIMIT, config.preview_limit);
        assert_eq!(2, config.warnings.len());
    }
}
