//! 결과를 사람이 읽는 요약 문자열로 만든다. CLI, GUI, 보고서가 같은 문구를 쓴다.

use crate::config::UnitSystem;
use crate::i18n::{keys, Translator};
use crate::input::RoiInput;
use crate::roi::RoiResult;
use crate::units::{convert_volume, TemperatureUnit, VolumeUnit};

/// 요약 한 줄 (라벨, 값).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl SummaryLine {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// 천 단위 구분 기호(,)를 넣어 소수 `decimals`자리로 표시한다.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 같은 표시는 피한다
    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_usd(value: f64) -> String {
    if value.is_sign_negative() && value != 0.0 {
        format!("-${}", format_number(-value, 2))
    } else {
        format!("${}", format_number(value, 2))
    }
}

/// 회수기간 문구. 무한대는 숫자 대신 "회수 불가" 문구로 표시한다.
pub fn format_payback(years: f64, tr: &Translator) -> String {
    if years.is_finite() {
        format!("{years:.1} {}", tr.t(keys::UNIT_YEARS))
    } else {
        tr.t(keys::PAYBACK_NOT_REACHED).to_string()
    }
}

/// 온도 입력 라벨. 번역문은 °F 기준이라 설정 단위 기호로 바꿔 쓴다.
pub fn temperature_label(tr: &Translator, key: &str, unit: TemperatureUnit) -> String {
    match unit {
        TemperatureUnit::Fahrenheit => tr.t(key).to_string(),
        other => tr
            .t(key)
            .replace("°F", other.symbol())
            .replace("(F)", &format!("({})", other.symbol())),
    }
}

/// 보고서 첫머리에 쓰는 입력 요약(지역, 용량).
pub fn header_lines(input: &RoiInput, tr: &Translator) -> Vec<SummaryLine> {
    vec![
        SummaryLine::new(
            tr.t(keys::SUMMARY_LOCATION),
            input.location.display_name().to_string(),
        ),
        SummaryLine::new(
            tr.t(keys::SUMMARY_SYSTEM_SIZE),
            format!("{} kW", input.system_size_kw),
        ),
    ]
}

/// 계산 결과 요약. 가스 절감은 가스 대체가 켜져 있을 때만 포함한다.
pub fn summary_lines(result: &RoiResult, tr: &Translator, units: UnitSystem) -> Vec<SummaryLine> {
    let water = match units.volume_unit() {
        VolumeUnit::Liter => format!(
            "{} {}",
            format_number(
                convert_volume(result.hot_water_gallons, VolumeUnit::UsGallon, VolumeUnit::Liter),
                0
            ),
            tr.t(keys::UNIT_LITERS)
        ),
        _ => format!(
            "{} {}",
            format_number(result.hot_water_gallons, 0),
            tr.t(keys::UNIT_GALLONS)
        ),
    };

    let mut lines = vec![
        SummaryLine::new(
            tr.t(keys::SUMMARY_PV_OUTPUT),
            format!("{} kWh", format_number(result.pv_output_kwh, 0)),
        ),
        SummaryLine::new(
            tr.t(keys::SUMMARY_THERMAL_OUTPUT),
            format!("{} kWh", format_number(result.thermal_output_kwh, 0)),
        ),
        SummaryLine::new(tr.t(keys::SUMMARY_HOT_WATER), water),
        SummaryLine::new(
            tr.t(keys::SUMMARY_INSTALLATION_COST),
            format_usd(result.installation_cost_usd),
        ),
        SummaryLine::new(
            tr.t(keys::SUMMARY_NET_COST),
            format_usd(result.net_system_cost_usd),
        ),
        SummaryLine::new(
            tr.t(keys::SUMMARY_ELECTRICITY_SAVINGS),
            format_usd(result.electricity_savings_usd),
        ),
    ];
    if result.gas_enabled() {
        lines.push(SummaryLine::new(
            tr.t(keys::SUMMARY_GAS_SAVINGS),
            format_usd(result.gas_savings_usd),
        ));
    }
    lines.push(SummaryLine::new(
        tr.t(keys::SUMMARY_TOTAL_SAVINGS),
        format_usd(result.total_annual_savings_usd),
    ));
    lines.push(SummaryLine::new(
        tr.t(keys::SUMMARY_PAYBACK),
        format_payback(result.payback_period_years, tr),
    ));
    lines.push(SummaryLine::new(
        tr.t(keys::SUMMARY_CO2),
        format!(
            "{} {}",
            format_number(result.co2_savings_ton, 2),
            tr.t(keys::UNIT_METRIC_TONS)
        ),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(28998.08, 0), "28,998");
        assert_eq!(format_number(1275.0, 2), "1,275.00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1_234_567.891, 1), "1,234,567.9");
        assert_eq!(format_number(-8750.0, 0), "-8,750");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn negative_currency_puts_sign_before_dollar() {
        assert_eq!(format_usd(-7475.0), "-$7,475.00");
        assert_eq!(format_usd(0.0), "$0.00");
    }
}
