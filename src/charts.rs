//! GUI와 보고서가 공통으로 그리는 세 가지 차트의 데이터 모델.

use crate::i18n::{keys, Translator};
use crate::roi::RoiResult;

/// RGB 색상.
pub type Rgb = [u8; 3];

pub const PV_COLOR: Rgb = [0x1f, 0x77, 0xb4];
pub const THERMAL_COLOR: Rgb = [0xff, 0x7f, 0x0e];
pub const WATER_COLOR: Rgb = [0x2c, 0xa0, 0x2c];
pub const CO2_COLOR: Rgb = [0xd6, 0x27, 0x28];
pub const ELECTRICITY_COLOR: Rgb = [0x4d, 0xaf, 0x4a];
pub const GAS_COLOR: Rgb = [0x98, 0x4e, 0xa3];
pub const CASH_FLOW_COLOR: Rgb = [0x1f, 0x77, 0xb4];
pub const PAYBACK_COLOR: Rgb = [0xdc, 0x14, 0x3c];

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

/// 누적 현금흐름 선 그래프. 회수 시점 표시는 0~25년 안에서만 둔다.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// (연차, 누적 $)
    pub points: Vec<[f64; 2]>,
    pub payback_marker: Option<f64>,
    /// 범례 문구. 표시가 없으면 "회수되지 않음" 문구가 들어간다.
    pub marker_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub energy: BarChart,
    pub savings: BarChart,
    pub cash_flow: CashFlowChart,
}

/// 에너지·온수·탄소 막대. 온수량은 다른 막대와 눈금을 맞추려고 천 gal 단위로 둔다.
pub fn energy_chart(result: &RoiResult, tr: &Translator) -> BarChart {
    let bar = |key: &str, value: f64, color: Rgb| Bar {
        label: tr.t(key).to_string(),
        value,
        color,
    };
    BarChart {
        title: tr.t(keys::CHART_ENERGY_TITLE).to_string(),
        y_label: tr.t(keys::CHART_ENERGY_Y).to_string(),
        bars: vec![
            bar(keys::CHART_ENERGY_PV, result.pv_output_kwh, PV_COLOR),
            bar(keys::CHART_ENERGY_THERMAL, result.thermal_output_kwh, THERMAL_COLOR),
            bar(
                keys::CHART_ENERGY_WATER,
                result.hot_water_gallons / 1000.0,
                WATER_COLOR,
            ),
            bar(keys::CHART_ENERGY_CO2, result.co2_savings_ton, CO2_COLOR),
        ],
    }
}

pub fn savings_chart(result: &RoiResult, tr: &Translator) -> BarChart {
    BarChart {
        title: tr.t(keys::CHART_SAVINGS_TITLE).to_string(),
        y_label: tr.t(keys::CHART_SAVINGS_Y).to_string(),
        bars: vec![
            Bar {
                label: tr.t(keys::CHART_SAVINGS_ELECTRICITY).to_string(),
                value: result.electricity_savings_usd,
                color: ELECTRICITY_COLOR,
            },
            Bar {
                label: tr.t(keys::CHART_SAVINGS_GAS).to_string(),
                value: result.gas_savings_usd,
                color: GAS_COLOR,
            },
        ],
    }
}

pub fn cash_flow_chart(result: &RoiResult, tr: &Translator) -> CashFlowChart {
    let payback_marker = result.payback_marker();
    let marker_label = match payback_marker {
        Some(years) => tr.fill(keys::CHART_PAYBACK_MARKER, &[("years", format!("{years:.1}"))]),
        None => tr.t(keys::CHART_PAYBACK_NONE).to_string(),
    };
    CashFlowChart {
        title: tr.t(keys::CHART_CASH_TITLE).to_string(),
        x_label: tr.t(keys::CHART_CASH_X).to_string(),
        y_label: tr.t(keys::CHART_CASH_Y).to_string(),
        points: result
            .cumulative_cash_flow
            .iter()
            .map(|p| [p.year as f64, p.cumulative_usd])
            .collect(),
        payback_marker,
        marker_label,
    }
}

pub fn build_charts(result: &RoiResult, tr: &Translator) -> ChartSet {
    ChartSet {
        energy: energy_chart(result, tr),
        savings: savings_chart(result, tr),
        cash_flow: cash_flow_chart(result, tr),
    }
}

/// 축 범위. 0을 항상 포함하고, 모든 값이 같으면 폭 1을 준다.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0_f64, 0.0_f64);
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if (hi - lo).abs() < f64::EPSILON {
        hi = lo + 1.0;
    }
    (lo, hi)
}

/// 축 범위를 `count`개 구간의 보기 좋은 눈금으로 나눈다.
pub fn axis_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let span = hi - lo;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return vec![lo];
    }
    let raw_step = span / count as f64;
    let magnitude = 10f64.powi(raw_step.log10().floor() as i32);
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);
    let start = (lo / step).floor() * step;
    let steps = ((hi - start) / step).ceil().max(1.0) as usize;
    (0..=steps).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_range_always_contains_zero() {
        assert_eq!(axis_range([5.0, 10.0]), (0.0, 10.0));
        assert_eq!(axis_range([-8750.0, 23125.0]), (-8750.0, 23125.0));
        assert_eq!(axis_range([0.0, 0.0]), (0.0, 1.0));
        assert_eq!(axis_range([f64::INFINITY, 3.0]), (0.0, 3.0));
    }

    #[test]
    fn ticks_cover_range() {
        let ticks = axis_ticks(-8750.0, 23125.0, 5);
        assert!(ticks.first().copied().unwrap() <= -8750.0);
        assert!(ticks.last().copied().unwrap() >= 23125.0 - 1e-9);
        assert_eq!(ticks, vec![-10000.0, 0.0, 10000.0, 20000.0, 30000.0]);
    }
}
