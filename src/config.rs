use crate::conversion::SpeedUnit;
use crate::display::{DEFAULT_COMMAND_PATH, DEFAULT_IMAGE_PATH};
use crate::error::{Result, ShowktsError};
use crate::parser::VariationHemisphere;
use crate::serial::{DEFAULT_BAUD_RATE, DEFAULT_SERIAL_DEVICE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime settings, loadable from a TOML file
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub serial_device: PathBuf,
    pub baud_rate: u32,
    pub command_channel: PathBuf,
    pub image_channel: PathBuf,
    pub poll_interval_secs: u64,
    pub label: String,
    pub speed_unit: SpeedUnit,
    pub variation_hemisphere: VariationHemisphere,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_device: PathBuf::from(DEFAULT_SERIAL_DEVICE),
            baud_rate: DEFAULT_BAUD_RATE,
            command_channel: PathBuf::from(DEFAULT_COMMAND_PATH),
            image_channel: PathBuf::from(DEFAULT_IMAGE_PATH),
            poll_interval_secs: 60,
            label: "Speed".to_string(),
            speed_unit: SpeedUnit::default(),
            variation_hemisphere: VariationHemisphere::default(),
        }
    }
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
        let p = p.as_ref();
        let text = fs::read_to_string(p)?;
        Self::from_toml(&text)
            .map_err(|err| ShowktsError::Config(format!("{}: {}", p.display(), err)))
    }

    pub fn from_toml(text: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(text).map_err(|err| ShowktsError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            return Err(ShowktsError::Config(
                "poll_interval_secs must be at least 1".to_string(),
            ));
        }
        crate::serial::baud_rate(self.baud_rate)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let c = Config::from_toml("").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.serial_device, PathBuf::from("/dev/ttyUSB0"));
        assert_eq!(c.baud_rate, 4800);
        assert_eq!(c.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_file() {
        let c = Config::from_toml(
            r#"
            serial_device = "/dev/ttyACM0"
            speed_unit = "kmh"
            variation_hemisphere = "legacy"
            "#,
        )
        .unwrap();
        assert_eq!(c.serial_device, PathBuf::from("/dev/ttyACM0"));
        assert_eq!(c.speed_unit, SpeedUnit::Kmh);
        assert_eq!(c.variation_hemisphere, VariationHemisphere::Legacy);
        assert_eq!(c.label, "Speed");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(matches!(
            Config::from_toml("baud = 4800"),
            Err(ShowktsError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml("poll_interval_secs = 0").is_err());
        assert!(matches!(
            Config::from_toml("baud_rate = 1234"),
            Err(ShowktsError::UnsupportedBaudRate(1234))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label = \"SOG\"").unwrap();
        writeln!(file, "poll_interval_secs = 5").unwrap();

        let c = Config::from_path(file.path()).unwrap();
        assert_eq!(c.label, "SOG");
        assert_eq!(c.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string(&Config::default()).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }
}
