use crate::input::{EmissionBaseline, GasReplacement};

/// CO₂ 절감량 계산 입력.
#[derive(Debug, Clone, Copy)]
pub struct EmissionsInput {
    /// PV 전력 출력 [kWh/year]
    pub pv_output_kwh: f64,
    /// 열 출력 [kWh/year]
    pub thermal_output_kwh: f64,
    /// 계통 배출계수 [kg CO₂/kWh]
    pub grid_emission_factor: f64,
    pub baseline: EmissionBaseline,
    pub gas: Option<GasReplacement>,
    /// 대체된 가스 수량 [가스단위/year]
    pub fuel_units_saved: f64,
}

/// CO₂ 절감 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionsResult {
    /// [kg/year]
    pub co2_savings_kg: f64,
    /// [t/year]
    pub co2_savings_ton: f64,
}

/// 계통 전력 대체분과 가스 연소 회피분을 합해 연간 CO₂ 절감량을 계산한다.
pub fn compute_emissions(input: EmissionsInput) -> EmissionsResult {
    let displaced_kwh = match input.baseline {
        EmissionBaseline::PvOnly => input.pv_output_kwh,
        EmissionBaseline::PvAndThermal => input.pv_output_kwh + input.thermal_output_kwh,
    };
    let mut co2_savings_kg = displaced_kwh * input.grid_emission_factor;

    // therm 기준은 가스 크레딧이 없다
    if let Some(factor) = input.gas.and_then(|g| g.unit.co2_kg_per_unit()) {
        co2_savings_kg += input.fuel_units_saved * factor;
    }

    EmissionsResult {
        co2_savings_kg,
        co2_savings_ton: co2_savings_kg / 1000.0,
    }
}
