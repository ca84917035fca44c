/// 연간 발전/열 출력 계산 입력.
#[derive(Debug, Clone, Copy)]
pub struct EnergyInput {
    /// 시스템 용량 [kW]
    pub system_size_kw: f64,
    /// 연간 일사량 [kWh/m²/year]
    pub irradiance_kwh_per_m2: f64,
    /// PV 출력 상승률 [%]
    pub pv_boost_pct: f64,
    /// PV 출력 대비 이용 가능한 열 비율 [%]
    pub thermal_efficiency_pct: f64,
}

/// 연간 에너지 출력 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyResult {
    /// PV 전력 출력 [kWh/year]
    pub pv_output_kwh: f64,
    /// 열 출력 [kWh/year]
    pub thermal_output_kwh: f64,
}

/// 용량과 일사량으로 연간 PV 전력 및 열 출력을 계산한다.
///
/// 음수나 0 입력도 그대로 산술 전파한다.
pub fn compute_energy(input: EnergyInput) -> EnergyResult {
    let pv_output_kwh = input.system_size_kw
        * input.irradiance_kwh_per_m2
        * (1.0 + input.pv_boost_pct / 100.0);
    let thermal_output_kwh = pv_output_kwh * (input.thermal_efficiency_pct / 100.0);
    EnergyResult {
        pv_output_kwh,
        thermal_output_kwh,
    }
}
