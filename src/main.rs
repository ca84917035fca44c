use std::path::PathBuf;

use clap::{ArgAction, Parser};
use pvt_roi_calculator::{
    app::{self, RunOptions},
    config,
    i18n::{self, keys, Translator},
    input::{EmissionBaseline, GasUnit, Location, RoiInput},
    ui_cli,
};
use tracing::warn;

/// PV/T(태양광·태양열 복합) 시스템의 ROI를 계산한다.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// TOML 시나리오 파일. 없으면 설정의 defaults를 쓴다.
    #[arg(long)]
    input: Option<PathBuf>,
    /// la, ny, chicago, houston, phoenix, custom
    #[arg(long, value_parser = parse_location)]
    location: Option<Location>,
    /// 연간 일사량 [kWh/m²/year]
    #[arg(long)]
    irradiance: Option<f64>,
    #[arg(long)]
    size_kw: Option<f64>,
    #[arg(long)]
    pv_boost: Option<f64>,
    #[arg(long)]
    thermal_efficiency: Option<f64>,
    #[arg(long)]
    cost_per_watt: Option<f64>,
    #[arg(long)]
    incentive: Option<f64>,
    /// 급수 입구 온도 [°F]
    #[arg(long)]
    water_in: Option<f64>,
    /// 급수 출구 온도 [°F]
    #[arg(long)]
    water_out: Option<f64>,
    #[arg(long, conflicts_with_all = ["water_in", "water_out"])]
    no_hot_water: bool,
    #[arg(long)]
    electricity_rate: Option<f64>,
    #[arg(long)]
    grid_factor: Option<f64>,
    /// 천연가스 대체 절감 포함
    #[arg(long)]
    gas: bool,
    #[arg(long)]
    gas_rate: Option<f64>,
    #[arg(long)]
    thermal_offset: Option<f64>,
    /// mmbtu 또는 therm
    #[arg(long, value_parser = parse_gas_unit)]
    gas_unit: Option<GasUnit>,
    /// pv-only 또는 pv-and-thermal
    #[arg(long, value_parser = parse_baseline)]
    emission_baseline: Option<EmissionBaseline>,
    /// 터미널에서 입력값을 하나씩 묻는다
    #[arg(short, long)]
    interactive: bool,
    /// 결과를 JSON으로 출력
    #[arg(long)]
    json: bool,
    /// PDF 보고서 저장 경로
    #[arg(long)]
    report: Option<PathBuf>,
    /// auto, en, ko
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 계산식·FAQ·용어 설명 출력
    #[arg(long)]
    help_formulas: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_location(s: &str) -> Result<Location, String> {
    Location::parse(s).ok_or_else(|| format!("unknown location '{s}'"))
}

fn parse_gas_unit(s: &str) -> Result<GasUnit, String> {
    GasUnit::parse(s).ok_or_else(|| format!("unknown gas unit '{s}' (mmbtu, therm)"))
}

fn parse_baseline(s: &str) -> Result<EmissionBaseline, String> {
    EmissionBaseline::parse(s)
        .ok_or_else(|| format!("unknown emission baseline '{s}' (pv-only, pv-and-thermal)"))
}

impl Cli {
    /// 명령행 값으로 입력 묶음을 덮어쓴다.
    fn apply_overrides(&self, input: &mut RoiInput) {
        if let Some(loc) = self.location {
            input.location = loc;
            if loc.preset_irradiance().is_some() {
                input.irradiance_override = None;
            }
        }
        if let Some(v) = self.irradiance {
            input.irradiance_override = Some(v);
        }
        set(&mut input.system_size_kw, self.size_kw);
        set(&mut input.pv_boost_pct, self.pv_boost);
        set(&mut input.thermal_efficiency_pct, self.thermal_efficiency);
        set(&mut input.system_cost_per_watt, self.cost_per_watt);
        set(&mut input.incentive_pct, self.incentive);
        set(&mut input.electricity_rate_usd_per_kwh, self.electricity_rate);
        set(&mut input.grid_emission_factor_kg_per_kwh, self.grid_factor);
        if let Some(b) = self.emission_baseline {
            input.emission_baseline = b;
        }

        if self.no_hot_water {
            input.water = None;
        } else if self.water_in.is_some() || self.water_out.is_some() {
            let water = input.water.get_or_insert_with(Default::default);
            set(&mut water.inlet_f, self.water_in);
            set(&mut water.outlet_f, self.water_out);
        }

        let gas_requested = self.gas
            || self.gas_rate.is_some()
            || self.thermal_offset.is_some()
            || self.gas_unit.is_some();
        if gas_requested {
            let gas = input.gas.get_or_insert_with(Default::default);
            set(&mut gas.rate_usd_per_unit, self.gas_rate);
            set(&mut gas.thermal_offset_pct, self.thermal_offset);
            if let Some(unit) = self.gas_unit {
                gas.unit = unit;
            }
        }
    }
}

fn set(target: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *target = v;
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 계산을 실행한다.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (cfg, cfg_err) = match config::load_or_create(&cli.config) {
        Ok(cfg) => (cfg, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    app::init_logging(cli.verbose, &cfg.log_level);
    if let Some(e) = cfg_err {
        warn!("using default configuration: {e}");
    }

    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, None);

    if cli.help_formulas {
        app::print_help_topics(&tr);
        return Ok(());
    }

    let mut input = match &cli.input {
        Some(path) => app::load_input_file(path)?,
        None => cfg.defaults.clone(),
    };
    if cli.interactive {
        input = ui_cli::collect_input(&tr, &input, cfg.unit_system)?;
    }
    cli.apply_overrides(&mut input);

    let opts = RunOptions {
        input,
        json: cli.json,
        report_path: cli.report.clone(),
    };
    if let Err(err) = app::run(&cfg, &tr, opts) {
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_flags_enable_gas_with_defaults() {
        let cli = Cli::parse_from(["cli", "--gas-unit", "therm", "--gas-rate", "1.2"]);
        let mut input = RoiInput::default();
        cli.apply_overrides(&mut input);
        let gas = input.gas.expect("gas enabled");
        assert_eq!(gas.unit, GasUnit::Therm);
        assert_eq!(gas.rate_usd_per_unit, 1.2);
        assert_eq!(gas.thermal_offset_pct, 70.0);
    }

    #[test]
    fn preset_location_clears_custom_irradiance() {
        let cli = Cli::parse_from(["cli", "--location", "phoenix"]);
        let mut input = RoiInput {
            location: Location::Custom,
            irradiance_override: Some(900.0),
            ..RoiInput::default()
        };
        cli.apply_overrides(&mut input);
        assert_eq!(input.resolved_irradiance(), 1800.0);
    }

    #[test]
    fn no_hot_water_conflicts_with_temperatures() {
        assert!(Cli::try_parse_from(["cli", "--no-hot-water", "--water-in", "50"]).is_err());
    }
}
