//! Binary configuration storage
//!
//! Configurations are stored as a version byte followed by the postcard
//! encoding of [`ChargerConfig`].

use super::ChargerConfig;

/// Current binary layout version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on an encoded configuration
pub const MAX_CONFIG_SIZE: usize = 128;

/// Configuration storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Buffer too small for the encoded configuration
    Serialize,
    /// Malformed or truncated data
    Deserialize,
    /// Stored layout version differs from [`CONFIG_VERSION`]
    VersionMismatch,
}

/// Encode a configuration into `buf`, returning the used prefix
pub fn to_bytes<'a>(config: &ChargerConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
    postcard::to_slice(&(CONFIG_VERSION, config), buf).map_err(|_| ConfigError::Serialize)
}

/// Decode a configuration previously written by [`to_bytes`]
pub fn from_bytes(bytes: &[u8]) -> Result<ChargerConfig, ConfigError> {
    let (&version, _) = bytes.split_first().ok_or(ConfigError::Deserialize)?;
    if version != CONFIG_VERSION {
        return Err(ConfigError::VersionMismatch);
    }

    let (_, config): (u8, ChargerConfig) =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChargeTimer, WatchdogTimer};

    #[test]
    fn test_roundtrip() {
        let config = ChargerConfig {
            charge_voltage_mv: Some(4208),
            charge_current_ma: Some(2048),
            watchdog: Some(WatchdogTimer::Disabled),
            charge_timer: Some(ChargeTimer::Hours8),
            ico: Some(true),
            ..Default::default()
        };

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = to_bytes(&config, &mut buf).unwrap().len();
        assert_eq!(buf[0], CONFIG_VERSION);
        assert_eq!(from_bytes(&buf[..used]), Ok(config));
    }

    #[test]
    fn test_version_mismatch() {
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let used = to_bytes(&ChargerConfig::default(), &mut buf).unwrap().len();
        buf[0] = CONFIG_VERSION + 1;
        assert_eq!(from_bytes(&buf[..used]), Err(ConfigError::VersionMismatch));
    }

    #[test]
    fn test_truncated() {
        assert_eq!(from_bytes(&[]), Err(ConfigError::Deserialize));

        let mut buf = [0u8; MAX_CONFIG_SIZE];
        let config = ChargerConfig {
            charge_voltage_mv: Some(4208),
            ..Default::default()
        };
        let used = to_bytes(&config, &mut buf).unwrap().len();
        assert_eq!(from_bytes(&buf[..used - 1]), Err(ConfigError::Deserialize));
    }

    #[test]
    fn test_small_buffer() {
        let mut buf = [0u8; 4];
        assert_eq!(
            to_bytes(&ChargerConfig::default(), &mut buf).map(|b| b.len()),
            Err(ConfigError::Serialize)
        );
    }

    #[test]
    fn test_full_config_fits() {
        let config = ChargerConfig {
            input_current_limit_ma: Some(u16::MAX),
            charge_current_ma: Some(u16::MAX),
            charge_voltage_mv: Some(u16::MAX),
            vindpm_mv: Some(u16::MAX),
            ..Default::default()
        };
        let mut buf = [0u8; MAX_CONFIG_SIZE];
        assert!(to_bytes(&config, &mut buf).is_ok());
    }

    #[test]
    fn test_load_toml() {
        let config: ChargerConfig = toml::from_str(
            r#"
            charge_voltage_mv = 4208
            charge_current_ma = 2048
            watchdog = "disabled"
            charge_timer = "hours12"
            ico = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            ChargerConfig {
                charge_voltage_mv: Some(4208),
                charge_current_ma: Some(2048),
                watchdog: Some(WatchdogTimer::Disabled),
                charge_timer: Some(ChargeTimer::Hours12),
                ico: Some(true),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_toml_rejects_unknown_variant() {
        let result: Result<ChargerConfig, _> = toml::from_str(r#"watchdog = "seconds20""#);
        assert!(result.is_err());
    }
}
