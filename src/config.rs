use calibration::{Capabilities, DayTime, PolarReference, Site};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub mount: MountConfig,
    pub hardware: HardwareConfig,
    pub site: SiteConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountConfig {
    pub northern_hemisphere: bool,
    pub polaris_ra: RaConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaConfig {
    pub hours: i32,
    pub minutes: i32,
    pub seconds: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareConfig {
    pub azimuth_altitude_motors: bool,
    pub gyro_level: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub speed_factor: f32,
    pub ra_steps_per_degree: i32,
    pub dec_steps_per_degree: i32,
    pub backlash_steps: i32,
    pub roll_angle: f32,
    pub pitch_angle: f32,
    pub tick_ms: u64,
    pub script: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        // Try external file first
        if Path::new("config.toml").exists() {
            let config_content = fs::read_to_string("config.toml")?;
            let config: Config = toml::from_str(&config_content)?;
            log::info!("Loaded configuration from file");
            Ok(config)
        } else {
            // Fallback to embedded defaults
            let config_content = include_str!("../config.toml.example");
            let config: Config = toml::from_str(config_content)?;
            log::warn!("Using embedded default configuration");
            Ok(config)
        }
    }
}

// Helper functions for easy access
impl Config {
    pub fn get_latitude(&self) -> f64 {
        self.site.latitude
    }

    pub fn get_longitude(&self) -> f64 {
        self.site.longitude
    }

    pub fn get_log_level(&self) -> &str {
        &self.logging.level
    }

    pub fn get_tick_ms(&self) -> u64 {
        self.simulation.tick_ms
    }

    pub fn get_script(&self) -> Option<&str> {
        self.simulation.script.as_deref()
    }

    pub fn site(&self) -> Site {
        Site {
            latitude: self.get_latitude(),
            longitude: self.get_longitude(),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            azimuth_altitude_motors: self.hardware.azimuth_altitude_motors,
            gyro_level: self.hardware.gyro_level,
        }
    }

    pub fn polar_reference(&self) -> PolarReference {
        let ra = self.mount.polaris_ra;
        PolarReference {
            polaris_ra: DayTime::new(ra.hours, ra.minutes, ra.seconds),
            northern_hemisphere: self.mount.northern_hemisphere,
        }
    }
}
