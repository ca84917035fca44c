use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 지역을 선택하지 않았거나 Custom 값이 비어 있을 때 쓰는 일사량 [kWh/m²/year].
pub const DEFAULT_IRRADIANCE_KWH_PER_M2: f64 = 1700.0;

/// 일사량 프리셋을 가진 설치 지역.
///
/// 프리셋 값은 연간 전일사량(kWh/m²/year) 기준이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    LosAngeles,
    NewYork,
    Chicago,
    Houston,
    Phoenix,
    /// 사용자가 직접 입력한 일사량을 쓴다.
    Custom,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::LosAngeles,
        Location::NewYork,
        Location::Chicago,
        Location::Houston,
        Location::Phoenix,
        Location::Custom,
    ];

    /// 프리셋 일사량 [kWh/m²/year]. Custom은 None.
    pub fn preset_irradiance(self) -> Option<f64> {
        match self {
            Location::LosAngeles => Some(1750.0),
            Location::NewYork => Some(1500.0),
            Location::Chicago => Some(1400.0),
            Location::Houston => Some(1600.0),
            Location::Phoenix => Some(1800.0),
            Location::Custom => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Location::LosAngeles => "Los Angeles, CA",
            Location::NewYork => "New York, NY",
            Location::Chicago => "Chicago, IL",
            Location::Houston => "Houston, TX",
            Location::Phoenix => "Phoenix, AZ",
            Location::Custom => "Custom",
        }
    }

    /// CLI 문자열을 지역으로 해석한다. 표시명과 약어(la, ny, ...)를 모두 허용한다.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "la" | "losangeles" | "losangelesca" => Some(Location::LosAngeles),
            "ny" | "newyork" | "newyorkny" => Some(Location::NewYork),
            "chicago" | "chicagoil" => Some(Location::Chicago),
            "houston" | "houstontx" => Some(Location::Houston),
            "phoenix" | "phoenixaz" => Some(Location::Phoenix),
            "custom" => Some(Location::Custom),
            _ => None,
        }
    }
}

/// 천연가스 대체 절감액을 환산할 가스 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GasUnit {
    Mmbtu,
    Therm,
}

impl GasUnit {
    /// 열 출력[kWh]을 가스 단위 수량으로 바꿀 때 나누는 값.
    pub fn kwh_divisor(self) -> f64 {
        match self {
            GasUnit::Mmbtu => 3412.0,
            GasUnit::Therm => 29.3,
        }
    }

    /// 가스 연소 회피에 따른 CO₂ 배출계수 [kg/단위]. therm 기준은 크레딧을 두지 않는다.
    pub fn co2_kg_per_unit(self) -> Option<f64> {
        match self {
            GasUnit::Mmbtu => Some(53.0),
            GasUnit::Therm => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GasUnit::Mmbtu => "MMBTU",
            GasUnit::Therm => "therm",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mmbtu" => Some(GasUnit::Mmbtu),
            "therm" | "therms" => Some(GasUnit::Therm),
            _ => None,
        }
    }
}

/// CO₂ 절감량의 기준 에너지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmissionBaseline {
    /// 전력(PV) 출력만 계통 배출계수로 환산한다.
    PvOnly,
    /// PV + 열 출력 전체를 계통 배출계수로 환산한다.
    #[default]
    PvAndThermal,
}

impl EmissionBaseline {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pv-only" | "pv" => Some(EmissionBaseline::PvOnly),
            "pv-and-thermal" | "pv+thermal" | "total" => Some(EmissionBaseline::PvAndThermal),
            _ => None,
        }
    }
}

/// 급수 입/출구 온도 [°F].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterTemperatures {
    pub inlet_f: f64,
    pub outlet_f: f64,
}

impl Default for WaterTemperatures {
    fn default() -> Self {
        Self {
            inlet_f: 60.0,
            outlet_f: 120.0,
        }
    }
}

/// 천연가스 대체 조건.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasReplacement {
    /// 가스 단가 [$ / 가스단위]
    pub rate_usd_per_unit: f64,
    /// 열 출력 중 가스 부하를 대체하는 비율 [%] (0~100)
    pub thermal_offset_pct: f64,
    pub unit: GasUnit,
}

impl Default for GasReplacement {
    fn default() -> Self {
        Self {
            rate_usd_per_unit: 8.0,
            thermal_offset_pct: 70.0,
            unit: GasUnit::Mmbtu,
        }
    }
}

/// 한 번의 ROI 계산에 쓰는 입력 묶음. 계산 중에는 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiInput {
    pub location: Location,
    /// 사용자 지정 일사량 [kWh/m²/year]. 있으면 지역 프리셋보다 우선한다.
    pub irradiance_override: Option<f64>,
    pub system_size_kw: f64,
    pub pv_boost_pct: f64,
    pub thermal_efficiency_pct: f64,
    pub system_cost_per_watt: f64,
    pub incentive_pct: f64,
    pub electricity_rate_usd_per_kwh: f64,
    pub grid_emission_factor_kg_per_kwh: f64,
    pub emission_baseline: EmissionBaseline,
    /// None이면 온수량을 계산하지 않는다(0 gal). 시나리오 파일에서 `[water]`를
    /// 생략하면 None이다.
    #[serde(default)]
    pub water: Option<WaterTemperatures>,
    /// None이면 가스 대체를 고려하지 않는다.
    pub gas: Option<GasReplacement>,
}

impl Default for RoiInput {
    fn default() -> Self {
        Self {
            location: Location::LosAngeles,
            irradiance_override: None,
            system_size_kw: 5.0,
            pv_boost_pct: 0.0,
            thermal_efficiency_pct: 50.0,
            system_cost_per_watt: 2.5,
            incentive_pct: 30.0,
            electricity_rate_usd_per_kwh: 0.15,
            grid_emission_factor_kg_per_kwh: 0.4,
            emission_baseline: EmissionBaseline::default(),
            water: Some(WaterTemperatures::default()),
            gas: None,
        }
    }
}

/// 입력 검증 실패 사유.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be between 0 and 100 % (got {value})")]
    PercentOutOfRange { field: &'static str, value: f64 },
    #[error("{quantity} is out of numeric range (got {value})")]
    Overflow { quantity: &'static str, value: f64 },
}

impl RoiInput {
    /// 계산에 사용할 일사량. override → 지역 프리셋 → 기본값 순서로 결정한다.
    pub fn resolved_irradiance(&self) -> f64 {
        self.irradiance_override
            .or_else(|| self.location.preset_irradiance())
            .unwrap_or(DEFAULT_IRRADIANCE_KWH_PER_M2)
    }

    /// 화면/CLI에서 넘어온 값이 계산 가능한지 확인한다.
    ///
    /// 0 이하의 시스템 용량 같은 값은 거부하지 않는다. 그런 값은 계산에서 그대로
    /// 0 또는 퇴화된 결과로 이어진다.
    pub fn validate(&self) -> Result<(), InputError> {
        let mut finite = vec![
            ("system_size_kw", self.system_size_kw),
            ("annual_irradiance", self.resolved_irradiance()),
            ("pv_boost_pct", self.pv_boost_pct),
            ("thermal_efficiency_pct", self.thermal_efficiency_pct),
            ("system_cost_per_watt", self.system_cost_per_watt),
            ("incentive_pct", self.incentive_pct),
            ("electricity_rate", self.electricity_rate_usd_per_kwh),
            ("grid_emission_factor", self.grid_emission_factor_kg_per_kwh),
        ];
        if let Some(w) = self.water {
            finite.push(("water_temp_in_f", w.inlet_f));
            finite.push(("water_temp_out_f", w.outlet_f));
        }
        if let Some(g) = self.gas {
            finite.push(("gas_rate", g.rate_usd_per_unit));
            finite.push(("thermal_offset_pct", g.thermal_offset_pct));
        }
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field, value });
            }
        }

        check_percent("incentive_pct", self.incentive_pct)?;
        if let Some(g) = self.gas {
            check_percent("thermal_offset_pct", g.thermal_offset_pct)?;
        }

        // 유한한 입력끼리 곱해도 무한대가 될 수 있고, inf/inf는 NaN 회수기간이 된다
        let r = crate::roi::calculate(self);
        for (quantity, value) in [
            ("pv_output_kwh", r.pv_output_kwh),
            ("thermal_output_kwh", r.thermal_output_kwh),
            ("hot_water_gallons", r.hot_water_gallons),
            ("installation_cost_usd", r.installation_cost_usd),
            ("net_system_cost_usd", r.net_system_cost_usd),
            ("total_annual_savings_usd", r.total_annual_savings_usd),
            ("co2_savings_kg", r.co2_savings_kg),
        ] {
            if !value.is_finite() {
                return Err(InputError::Overflow { quantity, value });
            }
        }
        Ok(())
    }
}

fn check_percent(field: &'static str, value: f64) -> Result<(), InputError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(InputError::PercentOutOfRange { field, value })
    }
}
