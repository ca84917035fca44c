//! 입력 묶음 하나를 받아 ROI 결과 전체를 한 번에 계산한다.
//!
//! 에너지 → {온수, 경제성, 배출} 순서로만 값을 읽으므로, 결과는 입력에 대한
//! 순수 함수이며 같은 입력이면 비트 단위로 같은 결과가 나온다.

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::input::{GasUnit, RoiInput};
use crate::model::{
    compute_emissions, compute_energy, compute_financials, compute_hot_water, EmissionsInput,
    EnergyInput, FinancialInput,
};

pub use crate::model::financial::{CashFlowPoint, CASH_FLOW_YEARS};

/// 계산 결과. 매 계산마다 새로 만들어지며 수정하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiResult {
    pub annual_irradiance_kwh_per_m2: f64,
    pub pv_output_kwh: f64,
    pub thermal_output_kwh: f64,
    pub hot_water_gallons: f64,
    pub installation_cost_usd: f64,
    pub net_system_cost_usd: f64,
    pub electricity_savings_usd: f64,
    pub gas_savings_usd: f64,
    pub total_annual_savings_usd: f64,
    /// 절감액이 0이면 무한대. JSON으로는 null이 된다.
    #[serde(serialize_with = "serialize_payback")]
    pub payback_period_years: f64,
    pub co2_savings_kg: f64,
    pub co2_savings_ton: f64,
    /// 가스 대체가 꺼져 있으면 None
    pub gas_unit: Option<GasUnit>,
    pub fuel_units_saved: f64,
    pub cumulative_cash_flow: Vec<CashFlowPoint>,
}

fn serialize_payback<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        s.serialize_some(value)
    } else {
        s.serialize_none()
    }
}

impl RoiResult {
    /// 회수기간이 유한하고 `0..=years` 안에 들어오는지 여부.
    pub fn payback_reached_within(&self, years: f64) -> bool {
        self.payback_period_years.is_finite()
            && (0.0..=years).contains(&self.payback_period_years)
    }

    /// 현금흐름 차트에 표시할 회수 시점. 25년 안에 회수되지 않으면 None.
    pub fn payback_marker(&self) -> Option<f64> {
        self.payback_reached_within(CASH_FLOW_YEARS as f64)
            .then_some(self.payback_period_years)
    }

    pub fn gas_enabled(&self) -> bool {
        self.gas_unit.is_some()
    }
}

/// 입력으로부터 모든 지표를 계산한다. 실패하지 않는다.
pub fn calculate(input: &RoiInput) -> RoiResult {
    let irradiance = input.resolved_irradiance();
    let energy = compute_energy(EnergyInput {
        system_size_kw: input.system_size_kw,
        irradiance_kwh_per_m2: irradiance,
        pv_boost_pct: input.pv_boost_pct,
        thermal_efficiency_pct: input.thermal_efficiency_pct,
    });
    debug!(
        irradiance,
        pv_kwh = energy.pv_output_kwh,
        thermal_kwh = energy.thermal_output_kwh,
        "energy model"
    );

    let hot_water_gallons = input
        .water
        .map(|w| compute_hot_water(energy.thermal_output_kwh, w.inlet_f, w.outlet_f))
        .unwrap_or(0.0);

    let fin = compute_financials(FinancialInput {
        system_size_kw: input.system_size_kw,
        cost_per_watt: input.system_cost_per_watt,
        incentive_pct: input.incentive_pct,
        pv_output_kwh: energy.pv_output_kwh,
        thermal_output_kwh: energy.thermal_output_kwh,
        electricity_rate: input.electricity_rate_usd_per_kwh,
        gas: input.gas,
    });
    debug!(
        net_cost = fin.net_system_cost_usd,
        savings = fin.total_annual_savings_usd,
        payback = fin.payback_period_years,
        "financial model"
    );

    let emissions = compute_emissions(EmissionsInput {
        pv_output_kwh: energy.pv_output_kwh,
        thermal_output_kwh: energy.thermal_output_kwh,
        grid_emission_factor: input.grid_emission_factor_kg_per_kwh,
        baseline: input.emission_baseline,
        gas: input.gas,
        fuel_units_saved: fin.fuel_units_saved,
    });
    debug!(co2_kg = emissions.co2_savings_kg, "emissions model");

    RoiResult {
        annual_irradiance_kwh_per_m2: irradiance,
        pv_output_kwh: energy.pv_output_kwh,
        thermal_output_kwh: energy.thermal_output_kwh,
        hot_water_gallons,
        installation_cost_usd: fin.installation_cost_usd,
        net_system_cost_usd: fin.net_system_cost_usd,
        electricity_savings_usd: fin.electricity_savings_usd,
        gas_savings_usd: fin.gas_savings_usd,
        total_annual_savings_usd: fin.total_annual_savings_usd,
        payback_period_years: fin.payback_period_years,
        co2_savings_kg: emissions.co2_savings_kg,
        co2_savings_ton: emissions.co2_savings_ton,
        gas_unit: input.gas.map(|g| g.unit),
        fuel_units_saved: fin.fuel_units_saved,
        cumulative_cash_flow: fin.cumulative_cash_flow,
    }
}
