use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://lcd.explorebitsong.com";
const DEFAULT_DENOM: &str = "ubtsg";
const DEFAULT_PAGE_LIMIT: u32 = 2000;

// team, reserve, btsg-delegations, delegation dao
const DEFAULT_TRACKED_ADDRESSES: [&str; 4] = [
    "bitsong166d42nyufxrh3jps5wx3egdkmvvg7jl6k33yut",
    "bitsong1n4akqrmpd29stwvh6dklzecplfha2asdtce9nn",
    "bitsong1nphhydjshzjevd03afzlce0xnlrnsm27hy9hgd",
    "bitsong1tgzday8yewn8n5j0prgsc9t5r3gg2cwnyf9jlv",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Missing { name: &'static str },
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub lcd_endpoint: String,
    pub tracked_addresses: Vec<String>,
    pub staking_denom: String,
    pub page_limit: u32,
    pub report_output: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup, falling back to
    /// the BitSong defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lcd_endpoint = lookup("LCD_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if lcd_endpoint.is_empty() {
            return Err(ConfigError::Missing {
                name: "LCD_ENDPOINT",
            });
        }

        let tracked_addresses = match lookup("TRACKED_ADDRESSES") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(String::from)
                .collect::<Vec<_>>(),
            None => DEFAULT_TRACKED_ADDRESSES
                .iter()
                .map(|address| address.to_string())
                .collect(),
        };
        if tracked_addresses.is_empty() {
            return Err(ConfigError::Missing {
                name: "TRACKED_ADDRESSES",
            });
        }

        let staking_denom = lookup("STAKING_DENOM")
            .unwrap_or_else(|| DEFAULT_DENOM.to_string())
            .trim()
            .to_string();
        if staking_denom.is_empty() {
            return Err(ConfigError::Missing {
                name: "STAKING_DENOM",
            });
        }

        let page_limit = match lookup("PAGE_LIMIT") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "PAGE_LIMIT",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_PAGE_LIMIT,
        };

        let report_output = lookup("REPORT_OUTPUT")
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            lcd_endpoint,
            tracked_addresses,
            staking_denom,
            page_limit,
            report_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_cover_bitsong_dao() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.lcd_endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.staking_denom, "ubtsg");
        assert_eq!(config.page_limit, 2000);
        assert_eq!(config.tracked_addresses.len(), 4);
        assert!(config.report_output.is_none());
    }

    #[test]
    fn overrides_are_trimmed() {
        let config = config_from(&[
            ("LCD_ENDPOINT", "http://localhost:1317/"),
            ("TRACKED_ADDRESSES", " addr1, ,addr2 "),
            ("PAGE_LIMIT", "50"),
            ("REPORT_OUTPUT", "report.json"),
        ])
        .unwrap();
        assert_eq!(config.lcd_endpoint, "http://localhost:1317");
        assert_eq!(config.tracked_addresses, vec!["addr1", "addr2"]);
        assert_eq!(config.page_limit, 50);
        assert_eq!(config.report_output, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn rejects_empty_address_list() {
        let err = config_from(&[("TRACKED_ADDRESSES", " , ")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                name: "TRACKED_ADDRESSES"
            }
        );
    }

    #[test]
    fn rejects_bad_page_limit() {
        for raw in ["0", "-1", "lots"] {
            let err = config_from(&[("PAGE_LIMIT", raw)]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: "PAGE_LIMIT",
                    value: raw.to_string()
                }
            );
        }
    }
}
