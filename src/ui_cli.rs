use std::io::{self, Write};

use crate::app::AppError;
use crate::config::UnitSystem;
use crate::i18n::{keys, Translator};
use crate::input::{GasReplacement, GasUnit, Location, RoiInput, WaterTemperatures};
use crate::summary::temperature_label;
use crate::units::{convert_temperature, TemperatureUnit};

/// 터미널에서 입력 묶음을 대화식으로 받는다. 엔터만 누르면 기본값을 쓴다.
pub fn collect_input(
    tr: &Translator,
    defaults: &RoiInput,
    units: UnitSystem,
) -> Result<RoiInput, AppError> {
    let mut input = defaults.clone();

    println!("\n{}", tr.t(keys::FIELD_LOCATION));
    println!("{}", tr.t(keys::PROMPT_LOCATION_OPTIONS));
    input.location = read_location(tr, defaults.location)?;
    input.irradiance_override = match input.location.preset_irradiance() {
        Some(_) => None,
        None => Some(read_f64_or(
            tr,
            tr.t(keys::FIELD_IRRADIANCE),
            defaults.resolved_irradiance(),
        )?),
    };

    input.system_size_kw =
        read_f64_or(tr, tr.t(keys::FIELD_SYSTEM_SIZE), defaults.system_size_kw)?;
    input.pv_boost_pct = read_f64_or(tr, tr.t(keys::FIELD_PV_BOOST), defaults.pv_boost_pct)?;
    input.thermal_efficiency_pct = read_f64_or(
        tr,
        tr.t(keys::FIELD_THERMAL_EFFICIENCY),
        defaults.thermal_efficiency_pct,
    )?;
    input.system_cost_per_watt =
        read_f64_or(tr, tr.t(keys::FIELD_COST_PER_WATT), defaults.system_cost_per_watt)?;
    input.incentive_pct = read_f64_or(tr, tr.t(keys::FIELD_INCENTIVE), defaults.incentive_pct)?;

    input.water = if read_yes_no(tr, tr.t(keys::FIELD_INCLUDE_WATER), defaults.water.is_some())? {
        let base = defaults.water.unwrap_or_default();
        let unit = units.temperature_unit();
        let inlet = read_temperature(tr, keys::FIELD_WATER_IN, base.inlet_f, unit)?;
        let outlet = read_temperature(tr, keys::FIELD_WATER_OUT, base.outlet_f, unit)?;
        Some(WaterTemperatures {
            inlet_f: inlet,
            outlet_f: outlet,
        })
    } else {
        None
    };

    input.electricity_rate_usd_per_kwh = read_f64_or(
        tr,
        tr.t(keys::FIELD_ELECTRICITY_RATE),
        defaults.electricity_rate_usd_per_kwh,
    )?;
    input.grid_emission_factor_kg_per_kwh = read_f64_or(
        tr,
        tr.t(keys::FIELD_GRID_FACTOR),
        defaults.grid_emission_factor_kg_per_kwh,
    )?;

    input.gas = if read_yes_no(tr, tr.t(keys::FIELD_INCLUDE_GAS), defaults.gas.is_some())? {
        let base = defaults.gas.unwrap_or_default();
        println!("{}: {}", tr.t(keys::FIELD_GAS_UNIT), tr.t(keys::PROMPT_GAS_UNIT_OPTIONS));
        let unit = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
            "1" => GasUnit::Mmbtu,
            "2" => GasUnit::Therm,
            _ => base.unit,
        };
        Some(GasReplacement {
            rate_usd_per_unit: read_f64_or(
                tr,
                tr.t(keys::FIELD_GAS_RATE),
                base.rate_usd_per_unit,
            )?,
            thermal_offset_pct: read_f64_or(
                tr,
                tr.t(keys::FIELD_THERMAL_OFFSET),
                base.thermal_offset_pct,
            )?,
            unit,
        })
    } else {
        None
    };

    Ok(input)
}

fn read_location(tr: &Translator, default: Location) -> Result<Location, AppError> {
    loop {
        let prompt = format!(
            "{} [{}]: ",
            tr.t(keys::PROMPT_SELECT).trim_end(),
            default.display_name()
        );
        let sel = read_line(&prompt)?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(default);
        }
        let picked = sel
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Location::ALL.get(i).copied())
            .or_else(|| Location::parse(sel));
        match picked {
            Some(loc) => return Ok(loc),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 설정 단위로 온도를 받아 °F로 돌려준다.
fn read_temperature(
    tr: &Translator,
    label_key: &str,
    default_f: f64,
    unit: TemperatureUnit,
) -> Result<f64, AppError> {
    let shown_default = convert_temperature(default_f, TemperatureUnit::Fahrenheit, unit);
    let label = temperature_label(tr, label_key, unit);
    let v = read_f64_or(tr, &label, shown_default)?;
    Ok(convert_temperature(v, unit, TemperatureUnit::Fahrenheit))
}

fn read_yes_no(tr: &Translator, label: &str, default: bool) -> Result<bool, AppError> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        let s = read_line(&format!("{label} [{hint}]: "))?;
        match s.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" | "예" => return Ok(true),
            "n" | "no" | "아니오" => return Ok(false),
            _ => println!(
                "{} {}",
                tr.t(keys::INVALID_SELECTION_RETRY),
                tr.t(keys::PROMPT_YES_NO)
            ),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64_or(tr: &Translator, label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        match parse_f64_or(&s, default) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력은 기본값, 숫자가 아니면 None.
fn parse_f64_or(s: &str, default: f64) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(default);
    }
    s.replace(',', "").parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answer_keeps_default() {
        assert_eq!(parse_f64_or("  \n", 5.0), Some(5.0));
        assert_eq!(parse_f64_or("1,700\n", 0.0), Some(1700.0));
        assert_eq!(parse_f64_or("abc", 1.0), None);
        assert_eq!(parse_f64_or("inf", 1.0), None);
    }
}
