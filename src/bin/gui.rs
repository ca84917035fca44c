#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui_plot::{Bar, BarChart, HLine, Legend, Line, LineStyle, Plot, PlotPoints, Points, VLine};
use image::GenericImageView;
use pvt_roi_calculator::{
    app, charts,
    config::{self, UnitSystem},
    i18n::{self, keys},
    input::{
        EmissionBaseline, GasReplacement, GasUnit, Location, RoiInput, WaterTemperatures,
    },
    report::{self, ReportContext},
    roi::{self, RoiResult},
    summary,
    units::{convert_temperature, TemperatureUnit},
};
use rfd::FileDialog;
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{error, info, warn};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let mut verbosity = 0u8;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        } else if a == "-v" || a == "--verbose" {
            verbosity = verbosity.saturating_add(1);
        }
        i += 1;
    }

    let (mut app_cfg, cfg_err) = match config::load_or_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    app::init_logging(verbosity, &app_cfg.log_level);
    if let Some(e) = cfg_err {
        warn!("using default configuration: {e}");
    }
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1200.0, 820.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "PV/T ROI Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                info!("CJK font not loaded: {e}");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["pvt_roi.png", "icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록. 기본 폰트 뒤에 폴백으로 붙인다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 시스템 폰트를 찾아 등록한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![PathBuf::from("assets/fonts/korean.ttf")];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        ]
        .iter()
        .map(PathBuf::from),
    );

    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "no Korean font found".to_string())?;
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}

fn color32(rgb: charts::Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// 마지막 "ROI 계산" 시점의 입력과 결과. 다음 계산 전까지 바뀌지 않는다.
struct Computed {
    input: RoiInput,
    result: RoiResult,
    charts: charts::ChartSet,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    // 입력 폼
    location: Location,
    irradiance: f64,
    system_size_kw: f64,
    pv_boost_pct: f64,
    thermal_efficiency_pct: f64,
    system_cost_per_watt: f64,
    incentive_pct: f64,
    include_water: bool,
    water: WaterTemperatures,
    electricity_rate: f64,
    grid_factor: f64,
    include_gas: bool,
    gas: GasReplacement,
    emission_baseline: EmissionBaseline,
    // 결과
    computed: Option<Computed>,
    input_error: Option<String>,
    report_status: Option<Result<PathBuf, String>>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, None);
        let d = config.defaults.clone();
        Self {
            lang_input: config.language.clone(),
            tr,
            location: d.location,
            irradiance: d.resolved_irradiance(),
            system_size_kw: d.system_size_kw,
            pv_boost_pct: d.pv_boost_pct,
            thermal_efficiency_pct: d.thermal_efficiency_pct,
            system_cost_per_watt: d.system_cost_per_watt,
            incentive_pct: d.incentive_pct,
            include_water: d.water.is_some(),
            water: d.water.unwrap_or_default(),
            electricity_rate: d.electricity_rate_usd_per_kwh,
            grid_factor: d.grid_emission_factor_kg_per_kwh,
            include_gas: d.gas.is_some(),
            gas: d.gas.unwrap_or_default(),
            emission_baseline: d.emission_baseline,
            computed: None,
            input_error: None,
            report_status: None,
            config,
        }
    }

    /// 현재 폼 값을 입력 묶음으로 만든다.
    fn form_input(&self) -> RoiInput {
        let irradiance_override = match self.location.preset_irradiance() {
            Some(preset) if preset == self.irradiance => None,
            _ => Some(self.irradiance),
        };
        RoiInput {
            location: self.location,
            irradiance_override,
            system_size_kw: self.system_size_kw,
            pv_boost_pct: self.pv_boost_pct,
            thermal_efficiency_pct: self.thermal_efficiency_pct,
            system_cost_per_watt: self.system_cost_per_watt,
            incentive_pct: self.incentive_pct,
            electricity_rate_usd_per_kwh: self.electricity_rate,
            grid_emission_factor_kg_per_kwh: self.grid_factor,
            emission_baseline: self.emission_baseline,
            water: self.include_water.then_some(self.water),
            gas: self.include_gas.then_some(self.gas),
        }
    }

    fn calculate(&mut self) {
        let input = self.form_input();
        match input.validate() {
            Ok(()) => {
                let result = roi::calculate(&input);
                let charts = charts::build_charts(&result, &self.tr);
                self.computed = Some(Computed {
                    input,
                    result,
                    charts,
                });
                self.input_error = None;
                self.report_status = None;
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
            }
        }
    }

    fn set_language(&mut self, code: &str) {
        self.lang_input = code.to_string();
        self.config.language = code.to_string();
        let resolved = i18n::resolve_language(code, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, None);
        if let Some(c) = &mut self.computed {
            c.charts = charts::build_charts(&c.result, &self.tr);
        }
        if let Err(e) = self.config.save() {
            warn!("failed to save configuration: {e}");
        }
    }

    fn save_report(&mut self) {
        let Some(c) = &self.computed else {
            return;
        };
        let Some(path) = FileDialog::new()
            .set_file_name(&self.config.report.file_name)
            .add_filter("PDF", &["pdf"])
            .save_file()
        else {
            return;
        };
        let ctx = ReportContext {
            settings: &self.config.report,
            input: &c.input,
            result: &c.result,
        };
        self.report_status = Some(match report::write_report(&path, &ctx) {
            Ok(()) => Ok(path),
            Err(e) => {
                error!("report generation failed: {e}");
                Err(e.to_string())
            }
        });
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_CONFIG_HEADING));

        ui.label(tr.t(keys::FIELD_LOCATION));
        let before = self.location;
        egui::ComboBox::from_id_source("location")
            .selected_text(self.location.display_name())
            .show_ui(ui, |ui| {
                for loc in Location::ALL {
                    ui.selectable_value(&mut self.location, loc, loc.display_name());
                }
            });
        if before != self.location {
            self.irradiance = self
                .location
                .preset_irradiance()
                .unwrap_or(pvt_roi_calculator::input::DEFAULT_IRRADIANCE_KWH_PER_M2);
        }

        number(ui, tr.t(keys::FIELD_IRRADIANCE), &mut self.irradiance, 10.0);
        number(ui, tr.t(keys::FIELD_SYSTEM_SIZE), &mut self.system_size_kw, 0.1);
        number(ui, tr.t(keys::FIELD_PV_BOOST), &mut self.pv_boost_pct, 0.5);
        number(
            ui,
            tr.t(keys::FIELD_THERMAL_EFFICIENCY),
            &mut self.thermal_efficiency_pct,
            0.5,
        );
        number(
            ui,
            tr.t(keys::FIELD_COST_PER_WATT),
            &mut self.system_cost_per_watt,
            0.05,
        );
        ui.label(tr.t(keys::FIELD_INCENTIVE));
        ui.add(egui::Slider::new(&mut self.incentive_pct, 0.0..=100.0).step_by(1.0));

        ui.separator();
        ui.checkbox(&mut self.include_water, tr.t(keys::FIELD_INCLUDE_WATER));
        if self.include_water {
            let unit = self.config.unit_system.temperature_unit();
            temperature(ui, &tr, keys::FIELD_WATER_IN, &mut self.water.inlet_f, unit);
            temperature(ui, &tr, keys::FIELD_WATER_OUT, &mut self.water.outlet_f, unit);
        }

        number(
            ui,
            tr.t(keys::FIELD_ELECTRICITY_RATE),
            &mut self.electricity_rate,
            0.01,
        );
        number(ui, tr.t(keys::FIELD_GRID_FACTOR), &mut self.grid_factor, 0.01);

        ui.label(tr.t(keys::FIELD_EMISSION_BASELINE));
        egui::ComboBox::from_id_source("baseline")
            .selected_text(baseline_label(&tr, self.emission_baseline))
            .show_ui(ui, |ui| {
                for b in [EmissionBaseline::PvAndThermal, EmissionBaseline::PvOnly] {
                    ui.selectable_value(&mut self.emission_baseline, b, baseline_label(&tr, b));
                }
            });

        ui.separator();
        ui.heading(tr.t(keys::GUI_GAS_HEADING));
        ui.checkbox(&mut self.include_gas, tr.t(keys::FIELD_INCLUDE_GAS));
        if self.include_gas {
            ui.label(tr.t(keys::FIELD_GAS_UNIT));
            egui::ComboBox::from_id_source("gas_unit")
                .selected_text(self.gas.unit.label())
                .show_ui(ui, |ui| {
                    for u in [GasUnit::Mmbtu, GasUnit::Therm] {
                        ui.selectable_value(&mut self.gas.unit, u, u.label());
                    }
                });
            number(
                ui,
                &format!(
                    "{} [$/{}]",
                    tr.t(keys::FIELD_GAS_RATE),
                    self.gas.unit.label()
                ),
                &mut self.gas.rate_usd_per_unit,
                0.1,
            );
            ui.label(tr.t(keys::FIELD_THERMAL_OFFSET));
            ui.add(
                egui::Slider::new(&mut self.gas.thermal_offset_pct, 0.0..=100.0).step_by(1.0),
            );
        }

        ui.separator();
        if ui.button(tr.t(keys::GUI_CALCULATE)).clicked() {
            self.calculate();
        }
        if let Some(err) = &self.input_error {
            ui.colored_label(
                egui::Color32::RED,
                format!("{} {err}", tr.t(keys::INVALID_INPUT)),
            );
        }

        ui.separator();
        self.ui_settings(ui);
        ui.separator();
        for (title, body) in [
            (keys::HELP_FAQ_TITLE, keys::HELP_FAQ_BODY),
            (keys::HELP_GLOSSARY_TITLE, keys::HELP_GLOSSARY_BODY),
        ] {
            ui.collapsing(tr.t(title), |ui| {
                ui.label(egui::RichText::new(tr.t(body)).small());
            });
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::FIELD_LANGUAGE));
            let mut lang = self.lang_input.clone();
            egui::ComboBox::from_id_source("language")
                .selected_text(lang.clone())
                .show_ui(ui, |ui| {
                    for code in ["auto", "en", "ko"] {
                        ui.selectable_value(&mut lang, code.to_string(), code);
                    }
                });
            if lang != self.lang_input {
                self.set_language(&lang);
            }
        });
        ui.horizontal(|ui| {
            let before = self.config.unit_system;
            ui.radio_value(&mut self.config.unit_system, UnitSystem::Imperial, "°F / gal");
            ui.radio_value(&mut self.config.unit_system, UnitSystem::Metric, "°C / L");
            if before != self.config.unit_system {
                if let Err(e) = self.config.save() {
                    warn!("failed to save configuration: {e}");
                }
            }
        });
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_RESULTS_HEADING));
        let Some(c) = &self.computed else {
            ui.label(tr.t(keys::GUI_NO_RESULT));
            return;
        };
        if c.input != self.form_input() {
            ui.colored_label(egui::Color32::YELLOW, tr.t(keys::GUI_INPUTS_CHANGED));
        }

        egui::Grid::new("summary")
            .num_columns(2)
            .spacing([24.0, 4.0])
            .show(ui, |ui| {
                for line in summary::header_lines(&c.input, &tr)
                    .into_iter()
                    .chain(summary::summary_lines(&c.result, &tr, self.config.unit_system))
                {
                    ui.strong(line.label);
                    ui.label(line.value);
                    ui.end_row();
                }
            });

        ui.separator();
        ui.columns(2, |cols| {
            bar_plot(&mut cols[0], "energy_chart", &c.charts.energy);
            bar_plot(&mut cols[1], "savings_chart", &c.charts.savings);
        });
        cash_flow_plot(ui, &c.charts.cash_flow);

        ui.separator();
        let mut download = false;
        ui.horizontal(|ui| {
            download = ui.button(tr.t(keys::GUI_DOWNLOAD_REPORT)).clicked();
            match &self.report_status {
                Some(Ok(path)) => {
                    ui.label(format!("{} {}", tr.t(keys::REPORT_WRITTEN), path.display()));
                }
                Some(Err(e)) => {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("{} {e}", tr.t(keys::REPORT_FAILED)),
                    );
                }
                None => {}
            }
        });
        if download {
            self.save_report();
        }

        ui.collapsing(tr.t(keys::HELP_FORMULAS_TITLE), |ui| {
            ui.label(egui::RichText::new(tr.t(keys::HELP_FORMULAS_BODY)).monospace());
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("inputs")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.ui_inputs(ui));
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| self.ui_results(ui));
        });
    }
}

fn number(ui: &mut egui::Ui, label: &str, value: &mut f64, speed: f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(value).speed(speed));
    });
}

/// 내부 값은 °F로 두고 설정 단위로 보여준다.
fn temperature(
    ui: &mut egui::Ui,
    tr: &i18n::Translator,
    key: &str,
    value_f: &mut f64,
    unit: TemperatureUnit,
) {
    let mut shown = convert_temperature(*value_f, TemperatureUnit::Fahrenheit, unit);
    ui.horizontal(|ui| {
        ui.label(summary::temperature_label(tr, key, unit));
        let resp = ui.add(egui::DragValue::new(&mut shown).speed(0.5));
        if resp.changed() {
            *value_f = convert_temperature(shown, unit, TemperatureUnit::Fahrenheit);
        }
    });
}

fn baseline_label(tr: &i18n::Translator, b: EmissionBaseline) -> String {
    match b {
        EmissionBaseline::PvOnly => tr.t(keys::BASELINE_PV_ONLY).to_string(),
        EmissionBaseline::PvAndThermal => tr.t(keys::BASELINE_PV_AND_THERMAL).to_string(),
    }
}

fn bar_plot(ui: &mut egui::Ui, id: &str, chart: &charts::BarChart) {
    ui.strong(&chart.title);
    Plot::new(id)
        .height(260.0)
        .legend(Legend::default())
        .y_axis_label(chart.y_label.clone())
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, bar) in chart.bars.iter().enumerate() {
                let b = Bar::new(i as f64, bar.value)
                    .width(0.6)
                    .fill(color32(bar.color))
                    .name(&bar.label);
                plot_ui.bar_chart(
                    BarChart::new(vec![b])
                        .color(color32(bar.color))
                        .name(&bar.label),
                );
            }
        });
}

fn cash_flow_plot(ui: &mut egui::Ui, chart: &charts::CashFlowChart) {
    ui.strong(&chart.title);
    Plot::new("cash_flow_chart")
        .height(300.0)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let color = color32(charts::CASH_FLOW_COLOR);
            plot_ui.hline(
                HLine::new(0.0)
                    .color(egui::Color32::GRAY)
                    .style(LineStyle::dashed_dense()),
            );
            plot_ui.line(Line::new(PlotPoints::from(chart.points.clone())).color(color));
            plot_ui.points(
                Points::new(PlotPoints::from(chart.points.clone()))
                    .radius(3.0)
                    .color(color),
            );
            if let Some(years) = chart.payback_marker {
                plot_ui.vline(
                    VLine::new(years)
                        .color(color32(charts::PAYBACK_COLOR))
                        .style(LineStyle::dotted_dense())
                        .name(&chart.marker_label),
                );
            }
        });
    if chart.payback_marker.is_none() {
        ui.label(&chart.marker_label);
    }
}
