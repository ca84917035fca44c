use pretty_assertions::assert_eq;
use pvt_roi_calculator::{
    calculate, charts,
    config::{self, Config, ReportSettings, UnitSystem},
    i18n::Translator,
    input::{GasReplacement, Location, RoiInput},
    report::{self, ReportContext, ReportPage},
    summary,
};
use std::fs;

fn reference_input() -> RoiInput {
    RoiInput {
        location: Location::Custom,
        irradiance_override: Some(1700.0),
        ..RoiInput::default()
    }
}

fn zero_savings_input() -> RoiInput {
    RoiInput {
        electricity_rate_usd_per_kwh: 0.0,
        ..reference_input()
    }
}

fn rendered(lines: Vec<summary::SummaryLine>) -> Vec<String> {
    lines.iter().map(ToString::to_string).collect()
}

#[test]
fn english_summary_text() {
    let tr = Translator::new("en");
    let input = reference_input();
    let res = calculate(&input);
    let mut lines = rendered(summary::header_lines(&input, &tr));
    lines.extend(rendered(summary::summary_lines(&res, &tr, UnitSystem::Imperial)));
    assert_eq!(
        lines,
        vec![
            "Location: Custom",
            "System Size: 5 kW",
            "Annual PV Output: 8,500 kWh",
            "Annual Thermal Output: 4,250 kWh",
            "Hot Water Generated: 28,979 gallons",
            "Installation Cost: $12,500.00",
            "Net System Cost: $8,750.00",
            "Electricity Savings: $1,275.00",
            "Total Annual Savings: $1,275.00",
            "Payback Period: 6.9 years",
            "Annual CO2 Saved: 5.10 metric tons",
        ]
    );
}

#[test]
fn metric_summary_shows_liters() {
    let tr = Translator::new("en");
    let res = calculate(&reference_input());
    let lines = rendered(summary::summary_lines(&res, &tr, UnitSystem::Metric));
    assert!(lines.contains(&"Hot Water Generated: 109,697 liters".to_string()));
}

#[test]
fn gas_line_appears_only_when_enabled() {
    let tr = Translator::new("en");
    let without = rendered(summary::summary_lines(
        &calculate(&reference_input()),
        &tr,
        UnitSystem::Imperial,
    ));
    assert!(!without.iter().any(|l| l.starts_with("Natural Gas Savings")));

    let input = RoiInput {
        gas: Some(GasReplacement::default()),
        ..reference_input()
    };
    let with = rendered(summary::summary_lines(
        &calculate(&input),
        &tr,
        UnitSystem::Imperial,
    ));
    assert!(with.contains(&"Natural Gas Savings: $6.98".to_string()));
}

#[test]
fn infinite_payback_is_text_not_number() {
    let tr = Translator::new("en");
    let res = calculate(&zero_savings_input());
    let lines = rendered(summary::summary_lines(&res, &tr, UnitSystem::Imperial));
    assert!(lines.contains(&"Payback Period: Payback not reached (no annual savings)".to_string()));
    assert!(!lines.iter().any(|l| l.contains("inf")));
}

#[test]
fn chart_models_follow_result() {
    let tr = Translator::new("en");
    let res = calculate(&reference_input());
    let set = charts::build_charts(&res, &tr);

    let values: Vec<f64> = set.energy.bars.iter().map(|b| b.value).collect();
    assert_eq!(values.len(), 4);
    assert_eq!(values[0], res.pv_output_kwh);
    assert_eq!(values[2], res.hot_water_gallons / 1000.0);
    assert_eq!(values[3], res.co2_savings_ton);

    assert_eq!(set.savings.bars.len(), 2);
    assert_eq!(set.savings.bars[1].value, 0.0);

    assert_eq!(set.cash_flow.points.len(), 25);
    assert_eq!(set.cash_flow.points[0][0], 1.0);
    assert_eq!(set.cash_flow.payback_marker, Some(res.payback_period_years));
    assert_eq!(set.cash_flow.marker_label, "Payback: 6.9 yrs");
}

#[test]
fn cash_flow_chart_without_payback_has_no_marker() {
    let tr = Translator::new("en");
    let chart = charts::cash_flow_chart(&calculate(&zero_savings_input()), &tr);
    assert_eq!(chart.payback_marker, None);
    assert_eq!(chart.marker_label, "Payback not reached within 25 years");
}

#[test]
fn report_has_summary_and_three_charts() {
    let settings = ReportSettings::default();
    let input = reference_input();
    let result = calculate(&input);
    let ctx = ReportContext {
        settings: &settings,
        input: &input,
        result: &result,
    };
    let pages = report::report_pages(&ctx);
    assert_eq!(pages.len(), 4);
    match &pages[0] {
        ReportPage::Summary { title, lines } => {
            assert_eq!(title, "ICARUS PV/T ROI Report");
            assert_eq!(lines[0].to_string(), "Location: Custom");
        }
        other => panic!("unexpected first page: {other:?}"),
    }
    assert!(matches!(pages[3], ReportPage::CashFlow(_)));
}

#[test]
fn report_renders_pdf_even_without_payback() {
    let settings = ReportSettings::default();
    let input = zero_savings_input();
    let result = calculate(&input);
    let ctx = ReportContext {
        settings: &settings,
        input: &input,
        result: &result,
    };
    let bytes = report::render_pdf(&ctx).expect("render pdf");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn write_report_leaves_only_destination_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roi.pdf");
    let settings = ReportSettings::default();
    let input = reference_input();
    let result = calculate(&input);
    let ctx = ReportContext {
        settings: &settings,
        input: &input,
        result: &result,
    };

    report::write_report(&path, &ctx).expect("write report");

    let bytes = fs::read(&path).expect("read report");
    assert!(bytes.starts_with(b"%PDF"));
    let entries: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("roi.pdf")]);
}

#[test]
fn write_report_into_missing_directory_fails_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope");
    let path = missing.join("roi.pdf");
    let settings = ReportSettings::default();
    let input = reference_input();
    let result = calculate(&input);
    let ctx = ReportContext {
        settings: &settings,
        input: &input,
        result: &result,
    };

    assert!(report::write_report(&path, &ctx).is_err());
    assert!(!path.exists());
    assert!(!missing.exists());
}

#[test]
fn config_round_trips_through_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");

    let created = config::load_or_create(&path).expect("create config");
    assert_eq!(created, Config::default());
    assert!(path.exists());

    let mut cfg = created;
    cfg.language = "ko".to_string();
    cfg.unit_system = UnitSystem::Metric;
    cfg.report.operator = "Acme Solar".to_string();
    cfg.defaults.location = Location::Phoenix;
    cfg.defaults.gas = Some(GasReplacement::default());
    cfg.save_to(&path).expect("save config");

    let loaded = config::load_from(&path).expect("load config");
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_config_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "language = \"en\"\n\n[report]\noperator = \"Acme\"\n").expect("write");

    let cfg = config::load_from(&path).expect("load config");
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.report.operator, "Acme");
    assert_eq!(cfg.report.file_name, "pvt_roi_report.pdf");
    assert_eq!(cfg.defaults, RoiInput::default());
}
