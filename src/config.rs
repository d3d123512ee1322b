use std::{env, net::SocketAddr};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed_sample_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("PORT").ok(), env::var("DASHBOARD_SEED").ok())
    }

    fn from_vars(port: Option<String>, seed: Option<String>) -> Self {
        let port = port
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let seed_sample_data = seed
            .map(|value| {
                let value = value.trim().to_ascii_lowercase();
                !matches!(value.as_str(), "0" | "false" | "off" | "no")
            })
            .unwrap_or(true);

        Self {
            port,
            seed_sample_data,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_vars(None, None), Config::default());
    }

    #[test]
    fn reads_port_and_seed_flag() {
        let config = Config::from_vars(Some("9100".into()), Some("off".into()));
        assert_eq!(config.port, 9100);
        assert!(!config.seed_sample_data);
        assert_eq!(config.addr().port(), 9100);
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = Config::from_vars(Some("not-a-port".into()), Some("1".into()));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed_sample_data);
    }
}
