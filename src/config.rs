use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::input::RoiInput;
use crate::units::{TemperatureUnit, VolumeUnit};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 화면 표시용 단위 시스템. 계산은 항상 Imperial(°F, gal) 기준이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    Imperial,
    /// 온도 °C 입력, 온수량 L 표시
    Metric,
}

impl UnitSystem {
    pub fn temperature_unit(self) -> TemperatureUnit {
        match self {
            UnitSystem::Imperial => TemperatureUnit::Fahrenheit,
            UnitSystem::Metric => TemperatureUnit::Celsius,
        }
    }

    pub fn volume_unit(self) -> VolumeUnit {
        match self {
            UnitSystem::Imperial => VolumeUnit::UsGallon,
            UnitSystem::Metric => VolumeUnit::Liter,
        }
    }
}

/// 보고서 출력 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    /// 면책 문구의 문의처
    pub operator: String,
    pub file_name: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "ICARUS PV/T ROI Report".to_string(),
            operator: "Icarus RT".to_string(),
            file_name: "pvt_roi_report.pdf".to_string(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// auto / en / ko
    pub language: String,
    pub unit_system: UnitSystem,
    /// tracing 레벨 (error, warn, info, debug, trace)
    pub log_level: String,
    pub report: ReportSettings,
    /// CLI/GUI 입력란의 초기값
    pub defaults: RoiInput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            unit_system: UnitSystem::default(),
            log_level: "warn".to_string(),
            report: ReportSettings::default(),
            defaults: RoiInput::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(DEFAULT_CONFIG_PATH)
}

/// 경로의 설정을 로드한다. 파일이 없으면 기본 설정을 저장하고 돌려준다.
pub fn load_or_create(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "created default configuration");
        Ok(cfg)
    }
}

/// 지정한 TOML 파일을 읽는다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    if let Err(e) = cfg.defaults.validate() {
        warn!("configured default inputs are invalid: {e}");
    }
    Ok(cfg)
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(DEFAULT_CONFIG_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
