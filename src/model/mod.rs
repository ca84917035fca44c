//! PV/T 시스템의 에너지·온수·경제성·배출 계산 모듈 모음.
//! 각 모듈은 입력 구조체를 받아 결과 구조체를 돌려주는 순수 함수로 구성한다.

pub mod emissions;
pub mod energy;
pub mod financial;
pub mod hot_water;

pub use emissions::{compute_emissions, EmissionsInput, EmissionsResult};
pub use energy::{compute_energy, EnergyInput, EnergyResult};
pub use financial::{
    compute_financials, cumulative_cash_flow, fuel_units_saved, payback_period, CashFlowPoint,
    FinancialInput, FinancialResult, CASH_FLOW_YEARS,
};
pub use hot_water::{compute_hot_water, BTU_PER_KWH, LB_PER_GALLON};
