use bevy::prelude::*;
use shared::{SettingChange, SettingField, SimulationSettings};

/// Startup configuration assembled from CLI arguments and the environment.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct LaunchConfig {
    pub settings: SimulationSettings,
    /// RNG seed for flips; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Reads overrides from CLI args or environment if present.
///
/// Supported, for every setting key (`gravity`, `density`, `restitution`,
/// `ground-curvature`, `box-size`, `damping`) and `seed`:
///   --<key> <value>
///   --<key>=<value>
///   COINFLIP_<KEY> environment variables (dashes become underscores)
///
/// CLI wins over the environment. Bad values are logged and ignored.
pub fn read_config_from_cli_env() -> LaunchConfig {
    parse_config(std::env::args().skip(1), |key| std::env::var(key).ok())
}

fn env_key(key: &str) -> String {
    format!("COINFLIP_{}", key.to_uppercase().replace('-', "_"))
}

pub(crate) fn parse_config(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> LaunchConfig {
    let mut cli: Vec<(String, String)> = Vec::new();
    let mut pending_key: Option<String> = None;

    for arg in args {
        if let Some(key) = pending_key.take() {
            cli.push((key, arg));
        } else if let Some(flag) = arg.strip_prefix("--") {
            match flag.split_once('=') {
                Some((key, value)) => cli.push((key.to_string(), value.to_string())),
                None => pending_key = Some(flag.to_string()),
            }
        }
    }

    let lookup = |key: &str| -> Option<String> {
        cli.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .or_else(|| env(&env_key(key)))
    };

    let mut config = LaunchConfig::default();

    for field in SettingField::ALL {
        let Some(raw) = lookup(field.key()) else {
            continue;
        };
        let parsed = raw
            .trim()
            .parse::<f32>()
            .map_err(|_| "Setting value is not a number")
            .and_then(|value| config.settings.set(SettingChange::new(field, value)));
        match parsed {
            Ok(value) => info!("Setting {} = {value} from CLI/ENV.", field.key()),
            Err(err) => warn!("Ignoring {}={raw:?}: {err}", field.key()),
        }
    }

    if let Some(raw) = lookup("seed") {
        match raw.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => warn!("Ignoring seed={raw:?}: not an unsigned integer"),
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_overrides_gives_defaults() {
        let config = parse_config(args(&[]), |_| None);
        assert_eq!(config, LaunchConfig::default());
    }

    #[test]
    fn both_flag_forms_are_accepted() {
        let config = parse_config(args(&["--gravity=3.5", "--box-size", "8", "--seed", "9"]), |_| {
            None
        });
        assert_eq!(config.settings.gravity, 3.5);
        assert_eq!(config.settings.box_size, 8.0);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn cli_wins_over_env() {
        let env = |key: &str| match key {
            "COINFLIP_DAMPING" => Some("0.4".to_string()),
            "COINFLIP_GROUND_CURVATURE" => Some("20".to_string()),
            _ => None,
        };
        let config = parse_config(args(&["--damping=0.2"]), env);
        assert_eq!(config.settings.damping, 0.2);
        assert_eq!(config.settings.ground_curvature, 20.0);
    }

    #[test]
    fn bad_values_are_ignored_and_out_of_range_clamped() {
        let config = parse_config(
            args(&["--gravity=lots", "--box-size=99", "--seed=-1"]),
            |_| None,
        );
        assert_eq!(config.settings.gravity, SimulationSettings::default().gravity);
        assert_eq!(config.settings.box_size, 15.0);
        assert_eq!(config.seed, None);
    }
}
