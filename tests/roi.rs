use approx::assert_relative_eq;
use pvt_roi_calculator::{
    calculate,
    input::{
        EmissionBaseline, GasReplacement, GasUnit, InputError, Location, RoiInput,
        WaterTemperatures,
    },
    model::{compute_hot_water, cumulative_cash_flow, payback_period},
    roi::CASH_FLOW_YEARS,
};
use rstest::rstest;

/// 5 kW, 1700 kWh/m², 50 % 열효율, $2.5/W, 30 % 보조금, $0.15/kWh, 가스 없음.
fn base_input() -> RoiInput {
    RoiInput {
        location: Location::Custom,
        irradiance_override: Some(1700.0),
        water: None,
        gas: None,
        ..RoiInput::default()
    }
}

#[test]
fn reference_system_without_gas() {
    let res = calculate(&base_input());
    assert_relative_eq!(res.pv_output_kwh, 8500.0, epsilon = 1e-9);
    assert_relative_eq!(res.thermal_output_kwh, 4250.0, epsilon = 1e-9);
    assert_relative_eq!(res.installation_cost_usd, 12500.0, epsilon = 1e-9);
    assert_relative_eq!(res.net_system_cost_usd, 8750.0, epsilon = 1e-9);
    assert_relative_eq!(res.electricity_savings_usd, 1275.0, epsilon = 1e-9);
    assert_relative_eq!(res.gas_savings_usd, 0.0);
    assert_relative_eq!(res.total_annual_savings_usd, 1275.0, epsilon = 1e-9);
    assert_relative_eq!(res.payback_period_years, 8750.0 / 1275.0, epsilon = 1e-12);
    assert!((res.payback_period_years - 6.86).abs() < 0.01);
    assert_eq!(res.hot_water_gallons, 0.0);
    assert!(!res.gas_enabled());
}

#[test]
fn reference_system_with_hot_water() {
    let input = RoiInput {
        water: Some(WaterTemperatures {
            inlet_f: 60.0,
            outlet_f: 120.0,
        }),
        ..base_input()
    };
    let res = calculate(&input);
    assert_relative_eq!(
        res.hot_water_gallons,
        4250.0 * 3412.0 / (8.34 * 60.0),
        epsilon = 1e-9
    );
    // 4250 * 3412 / 500.4
    assert!((res.hot_water_gallons - 28_978.8).abs() < 0.1);
}

#[test]
fn zero_savings_never_pays_back() {
    let input = RoiInput {
        electricity_rate_usd_per_kwh: 0.0,
        ..base_input()
    };
    let res = calculate(&input);
    assert_eq!(res.total_annual_savings_usd, 0.0);
    assert!(res.payback_period_years.is_infinite());
    assert_eq!(res.payback_marker(), None);
    assert!(res.co2_savings_kg.is_finite());
}

#[test]
fn payback_json_is_null_when_infinite() {
    let input = RoiInput {
        electricity_rate_usd_per_kwh: 0.0,
        ..base_input()
    };
    let json = serde_json::to_value(calculate(&input)).expect("serialize");
    assert!(json["payback_period_years"].is_null());

    let json = serde_json::to_value(calculate(&base_input())).expect("serialize");
    assert!(json["payback_period_years"].as_f64().is_some());
    assert_eq!(json["cumulative_cash_flow"].as_array().map(Vec::len), Some(25));
}

#[test]
fn mmbtu_gas_adds_savings_and_carbon_credit() {
    let input = RoiInput {
        gas: Some(GasReplacement {
            rate_usd_per_unit: 8.0,
            thermal_offset_pct: 70.0,
            unit: GasUnit::Mmbtu,
        }),
        ..base_input()
    };
    let res = calculate(&input);
    let units = 4250.0 * 0.7 / 3412.0;
    assert_relative_eq!(res.fuel_units_saved, units, epsilon = 1e-12);
    assert_relative_eq!(res.gas_savings_usd, units * 8.0, epsilon = 1e-9);
    assert_relative_eq!(res.total_annual_savings_usd, 1275.0 + units * 8.0, epsilon = 1e-9);
    assert_relative_eq!(
        res.co2_savings_kg,
        (8500.0 + 4250.0) * 0.4 + units * 53.0,
        epsilon = 1e-9
    );
    assert_eq!(res.gas_unit, Some(GasUnit::Mmbtu));
}

#[test]
fn therm_gas_has_no_carbon_credit() {
    let input = RoiInput {
        gas: Some(GasReplacement {
            rate_usd_per_unit: 1.2,
            thermal_offset_pct: 70.0,
            unit: GasUnit::Therm,
        }),
        ..base_input()
    };
    let res = calculate(&input);
    let therms = 4250.0 * 0.7 / 29.3;
    assert_relative_eq!(res.fuel_units_saved, therms, epsilon = 1e-9);
    assert_relative_eq!(res.gas_savings_usd, therms * 1.2, epsilon = 1e-9);
    assert_relative_eq!(res.co2_savings_kg, (8500.0 + 4250.0) * 0.4, epsilon = 1e-9);
}

#[rstest]
#[case(EmissionBaseline::PvOnly, 3400.0)]
#[case(EmissionBaseline::PvAndThermal, 5100.0)]
fn emission_baseline_selects_displaced_energy(
    #[case] baseline: EmissionBaseline,
    #[case] expected_kg: f64,
) {
    let input = RoiInput {
        emission_baseline: baseline,
        ..base_input()
    };
    let res = calculate(&input);
    assert_relative_eq!(res.co2_savings_kg, expected_kg, epsilon = 1e-9);
    assert_relative_eq!(res.co2_savings_ton, expected_kg / 1000.0, epsilon = 1e-12);
}

#[rstest]
#[case(Location::LosAngeles, 1750.0)]
#[case(Location::NewYork, 1500.0)]
#[case(Location::Chicago, 1400.0)]
#[case(Location::Houston, 1600.0)]
#[case(Location::Phoenix, 1800.0)]
#[case(Location::Custom, 1700.0)]
fn location_presets(#[case] location: Location, #[case] irradiance: f64) {
    let input = RoiInput {
        location,
        irradiance_override: None,
        ..RoiInput::default()
    };
    let res = calculate(&input);
    assert_eq!(res.annual_irradiance_kwh_per_m2, irradiance);
    assert_relative_eq!(res.pv_output_kwh, 5.0 * irradiance, epsilon = 1e-9);
}

#[test]
fn override_beats_preset() {
    let input = RoiInput {
        location: Location::Phoenix,
        irradiance_override: Some(1000.0),
        ..RoiInput::default()
    };
    assert_eq!(calculate(&input).annual_irradiance_kwh_per_m2, 1000.0);
}

#[test]
fn pv_boost_scales_both_outputs() {
    let input = RoiInput {
        pv_boost_pct: 10.0,
        ..base_input()
    };
    let res = calculate(&input);
    assert_relative_eq!(res.pv_output_kwh, 9350.0, epsilon = 1e-9);
    assert_relative_eq!(res.thermal_output_kwh, 4675.0, epsilon = 1e-9);
}

#[rstest]
#[case(0.0)]
#[case(35.0)]
#[case(50.0)]
#[case(100.0)]
fn thermal_never_exceeds_pv(#[case] efficiency: f64) {
    let input = RoiInput {
        thermal_efficiency_pct: efficiency,
        ..base_input()
    };
    let res = calculate(&input);
    assert!(res.thermal_output_kwh <= res.pv_output_kwh);
}

#[rstest]
#[case(120.0, 120.0)]
#[case(120.0, 60.0)]
fn no_hot_water_without_temperature_rise(#[case] inlet: f64, #[case] outlet: f64) {
    assert_eq!(compute_hot_water(4250.0, inlet, outlet), 0.0);
    assert_eq!(compute_hot_water(1.0e9, inlet, outlet), 0.0);
}

#[test]
fn cash_flow_matches_closed_form() {
    let res = calculate(&base_input());
    assert_eq!(res.cumulative_cash_flow.len(), CASH_FLOW_YEARS as usize);
    let first = res.cumulative_cash_flow[0];
    assert_eq!(first.year, 1);
    assert_relative_eq!(first.cumulative_usd, 1275.0 - 8750.0, epsilon = 1e-9);
    let last = res.cumulative_cash_flow[24];
    assert_eq!(last.year, 25);
    assert_relative_eq!(
        last.cumulative_usd,
        res.total_annual_savings_usd * 25.0 - res.net_system_cost_usd,
        epsilon = 1e-9
    );
    assert!(cumulative_cash_flow(100.0, 50.0, 0).is_empty());
}

#[test]
fn payback_period_rule() {
    assert!(payback_period(8750.0, 0.0).is_infinite());
    assert_relative_eq!(payback_period(8750.0, 1275.0), 8750.0 / 1275.0, epsilon = 1e-9);
    // 음수 절감도 나눗셈 결과를 그대로 쓴다
    assert_relative_eq!(payback_period(1000.0, -100.0), -10.0);
}

#[test]
fn payback_marker_only_inside_horizon() {
    let res = calculate(&base_input());
    assert_eq!(res.payback_marker(), Some(res.payback_period_years));

    let slow = RoiInput {
        electricity_rate_usd_per_kwh: 0.01,
        ..base_input()
    };
    let res = calculate(&slow);
    assert!(res.payback_period_years > 25.0);
    assert_eq!(res.payback_marker(), None);

    let free = RoiInput {
        incentive_pct: 100.0,
        ..base_input()
    };
    let res = calculate(&free);
    assert_eq!(res.payback_marker(), Some(0.0));
}

#[test]
fn calculation_is_idempotent() {
    let input = RoiInput {
        water: Some(WaterTemperatures::default()),
        gas: Some(GasReplacement::default()),
        ..base_input()
    };
    let a = calculate(&input);
    let b = calculate(&input);
    assert_eq!(a, b);
    assert_eq!(a.payback_period_years.to_bits(), b.payback_period_years.to_bits());
}

#[test]
fn validation_rejects_nan_and_bad_percentages() {
    let nan = RoiInput {
        system_size_kw: f64::NAN,
        ..base_input()
    };
    assert!(matches!(
        nan.validate(),
        Err(InputError::NotFinite {
            field: "system_size_kw",
            ..
        })
    ));

    let incentive = RoiInput {
        incentive_pct: 120.0,
        ..base_input()
    };
    assert!(matches!(
        incentive.validate(),
        Err(InputError::PercentOutOfRange {
            field: "incentive_pct",
            ..
        })
    ));

    let offset = RoiInput {
        gas: Some(GasReplacement {
            thermal_offset_pct: -5.0,
            ..GasReplacement::default()
        }),
        ..base_input()
    };
    assert!(offset.validate().is_err());

    assert!(RoiInput::default().validate().is_ok());
    // 0 kW는 거부하지 않고 퇴화된 결과로 이어진다
    let zero = RoiInput {
        system_size_kw: 0.0,
        ..base_input()
    };
    assert!(zero.validate().is_ok());
    assert!(calculate(&zero).payback_period_years.is_infinite());
}

#[test]
fn scenario_file_fills_missing_fields_with_defaults() {
    let input: RoiInput = toml::from_str(
        r#"
location = "Houston"
system_size_kw = 8.0

[gas]
rate_usd_per_unit = 1.5
thermal_offset_pct = 60.0
unit = "Therm"
"#,
    )
    .expect("parse scenario");
    assert_eq!(input.location, Location::Houston);
    assert_eq!(input.system_size_kw, 8.0);
    assert_eq!(input.incentive_pct, 30.0);
    assert_eq!(input.gas.map(|g| g.unit), Some(GasUnit::Therm));
    // [water]가 없으면 온수 계산을 하지 않는다
    assert_eq!(input.water, None);
    assert_eq!(calculate(&input).hot_water_gallons, 0.0);
}

#[test]
fn scenario_file_water_table_enables_hot_water() {
    let input: RoiInput = toml::from_str(
        r#"
[water]
inlet_f = 55.0
outlet_f = 140.0
"#,
    )
    .expect("parse scenario");
    assert_eq!(
        input.water,
        Some(WaterTemperatures {
            inlet_f: 55.0,
            outlet_f: 140.0,
        })
    );
    assert!(calculate(&input).hot_water_gallons > 0.0);
}

#[test]
fn validation_rejects_overflowing_products() {
    let huge = RoiInput {
        system_size_kw: 1e306,
        system_cost_per_watt: 1e10,
        irradiance_override: Some(1e10),
        ..base_input()
    };
    // 입력 하나하나는 유한하지만 설치비와 절감액이 무한대가 된다
    let res = calculate(&huge);
    assert!(res.installation_cost_usd.is_infinite());
    assert!(res.payback_period_years.is_nan());
    assert!(matches!(huge.validate(), Err(InputError::Overflow { .. })));
}
