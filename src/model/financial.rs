use serde::Serialize;

use crate::input::GasReplacement;

/// 누적 현금흐름을 전개하는 기간 [년].
pub const CASH_FLOW_YEARS: u32 = 25;

/// 설치비·절감액 계산 입력.
#[derive(Debug, Clone, Copy)]
pub struct FinancialInput {
    /// 시스템 용량 [kW]
    pub system_size_kw: f64,
    /// 설치 단가 [$/W]
    pub cost_per_watt: f64,
    /// 보조금/세액공제 [%]
    pub incentive_pct: f64,
    /// PV 전력 출력 [kWh/year]
    pub pv_output_kwh: f64,
    /// 열 출력 [kWh/year]
    pub thermal_output_kwh: f64,
    /// 전기 요금 [$/kWh]
    pub electricity_rate: f64,
    /// 가스 대체 조건. None이면 가스 절감은 0이다.
    pub gas: Option<GasReplacement>,
}

/// 연차별 누적 현금흐름.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CashFlowPoint {
    pub year: u32,
    pub cumulative_usd: f64,
}

/// 경제성 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialResult {
    /// 설치비 [$]
    pub installation_cost_usd: f64,
    /// 보조금 차감 후 순 설치비 [$]
    pub net_system_cost_usd: f64,
    /// 연간 전기요금 절감 [$/year]
    pub electricity_savings_usd: f64,
    /// 대체된 가스 수량 [가스단위/year]
    pub fuel_units_saved: f64,
    /// 연간 가스요금 절감 [$/year]
    pub gas_savings_usd: f64,
    /// 연간 총 절감 [$/year]
    pub total_annual_savings_usd: f64,
    /// 단순 회수기간 [년]. 절감액이 0이면 무한대.
    pub payback_period_years: f64,
    /// 1~25년차 누적 현금흐름 (할인·요금상승 없음)
    pub cumulative_cash_flow: Vec<CashFlowPoint>,
}

/// 설치비, 연간 절감액, 단순 회수기간과 누적 현금흐름을 계산한다.
pub fn compute_financials(input: FinancialInput) -> FinancialResult {
    let installation_cost_usd = input.system_size_kw * 1000.0 * input.cost_per_watt;
    let net_system_cost_usd = installation_cost_usd * (1.0 - input.incentive_pct / 100.0);

    let electricity_savings_usd = input.pv_output_kwh * input.electricity_rate;
    let fuel_units_saved = input
        .gas
        .map(|g| fuel_units_saved(input.thermal_output_kwh, &g))
        .unwrap_or(0.0);
    let gas_savings_usd = input
        .gas
        .map(|g| fuel_units_saved * g.rate_usd_per_unit)
        .unwrap_or(0.0);

    let total_annual_savings_usd = electricity_savings_usd + gas_savings_usd;
    let payback_period_years = payback_period(net_system_cost_usd, total_annual_savings_usd);
    let cumulative_cash_flow =
        cumulative_cash_flow(total_annual_savings_usd, net_system_cost_usd, CASH_FLOW_YEARS);

    FinancialResult {
        installation_cost_usd,
        net_system_cost_usd,
        electricity_savings_usd,
        fuel_units_saved,
        gas_savings_usd,
        total_annual_savings_usd,
        payback_period_years,
        cumulative_cash_flow,
    }
}

/// 열 출력 중 가스 부하를 대체한 양을 가스 단위로 환산한다.
pub fn fuel_units_saved(thermal_output_kwh: f64, gas: &GasReplacement) -> f64 {
    thermal_output_kwh * (gas.thermal_offset_pct / 100.0) / gas.unit.kwh_divisor()
}

/// 단순 회수기간. 연간 절감액이 0이면 나누지 않고 무한대를 돌려준다.
pub fn payback_period(net_system_cost_usd: f64, total_annual_savings_usd: f64) -> f64 {
    if total_annual_savings_usd != 0.0 {
        net_system_cost_usd / total_annual_savings_usd
    } else {
        f64::INFINITY
    }
}

/// `year * 절감액 - 순 설치비`를 1년차부터 `years`년차까지 전개한다.
pub fn cumulative_cash_flow(
    total_annual_savings_usd: f64,
    net_system_cost_usd: f64,
    years: u32,
) -> Vec<CashFlowPoint> {
    (1..=years)
        .map(|year| CashFlowPoint {
            year,
            cumulative_usd: total_annual_savings_usd * year as f64 - net_system_cost_usd,
        })
        .collect()
}
