use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_TITLE: &str = "general.app_title";
    pub const INVALID_INPUT: &str = "general.invalid_input";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const REPORT_WRITTEN: &str = "general.report_written";
    pub const REPORT_FAILED: &str = "general.report_failed";

    pub const FIELD_LOCATION: &str = "field.location";
    pub const FIELD_IRRADIANCE: &str = "field.irradiance";
    pub const FIELD_SYSTEM_SIZE: &str = "field.system_size";
    pub const FIELD_PV_BOOST: &str = "field.pv_boost";
    pub const FIELD_THERMAL_EFFICIENCY: &str = "field.thermal_efficiency";
    pub const FIELD_COST_PER_WATT: &str = "field.cost_per_watt";
    pub const FIELD_INCENTIVE: &str = "field.incentive";
    pub const FIELD_WATER_IN: &str = "field.water_in";
    pub const FIELD_WATER_OUT: &str = "field.water_out";
    pub const FIELD_ELECTRICITY_RATE: &str = "field.electricity_rate";
    pub const FIELD_GRID_FACTOR: &str = "field.grid_factor";
    pub const FIELD_INCLUDE_WATER: &str = "field.include_water";
    pub const FIELD_INCLUDE_GAS: &str = "field.include_gas";
    pub const FIELD_GAS_UNIT: &str = "field.gas_unit";
    pub const FIELD_GAS_RATE: &str = "field.gas_rate";
    pub const FIELD_THERMAL_OFFSET: &str = "field.thermal_offset";
    pub const FIELD_EMISSION_BASELINE: &str = "field.emission_baseline";
    pub const FIELD_LANGUAGE: &str = "field.language";
    pub const BASELINE_PV_ONLY: &str = "field.baseline_pv_only";
    pub const BASELINE_PV_AND_THERMAL: &str = "field.baseline_pv_and_thermal";

    pub const PROMPT_LOCATION_OPTIONS: &str = "prompt.location_options";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_YES_NO: &str = "prompt.yes_no";
    pub const PROMPT_GAS_UNIT_OPTIONS: &str = "prompt.gas_unit_options";

    pub const SUMMARY_HEADING: &str = "summary.heading";
    pub const SUMMARY_LOCATION: &str = "summary.location";
    pub const SUMMARY_SYSTEM_SIZE: &str = "summary.system_size";
    pub const SUMMARY_PV_OUTPUT: &str = "summary.pv_output";
    pub const SUMMARY_THERMAL_OUTPUT: &str = "summary.thermal_output";
    pub const SUMMARY_HOT_WATER: &str = "summary.hot_water";
    pub const SUMMARY_INSTALLATION_COST: &str = "summary.installation_cost";
    pub const SUMMARY_NET_COST: &str = "summary.net_cost";
    pub const SUMMARY_ELECTRICITY_SAVINGS: &str = "summary.electricity_savings";
    pub const SUMMARY_GAS_SAVINGS: &str = "summary.gas_savings";
    pub const SUMMARY_TOTAL_SAVINGS: &str = "summary.total_savings";
    pub const SUMMARY_PAYBACK: &str = "summary.payback";
    pub const SUMMARY_CO2: &str = "summary.co2";
    pub const UNIT_YEARS: &str = "unit.years";
    pub const UNIT_GALLONS: &str = "unit.gallons";
    pub const UNIT_LITERS: &str = "unit.liters";
    pub const UNIT_METRIC_TONS: &str = "unit.metric_tons";
    pub const PAYBACK_NOT_REACHED: &str = "summary.payback_not_reached";

    pub const CHART_ENERGY_TITLE: &str = "chart.energy_title";
    pub const CHART_ENERGY_PV: &str = "chart.energy_pv";
    pub const CHART_ENERGY_THERMAL: &str = "chart.energy_thermal";
    pub const CHART_ENERGY_WATER: &str = "chart.energy_water";
    pub const CHART_ENERGY_CO2: &str = "chart.energy_co2";
    pub const CHART_ENERGY_Y: &str = "chart.energy_y";
    pub const CHART_SAVINGS_TITLE: &str = "chart.savings_title";
    pub const CHART_SAVINGS_ELECTRICITY: &str = "chart.savings_electricity";
    pub const CHART_SAVINGS_GAS: &str = "chart.savings_gas";
    pub const CHART_SAVINGS_Y: &str = "chart.savings_y";
    pub const CHART_CASH_TITLE: &str = "chart.cash_title";
    pub const CHART_CASH_X: &str = "chart.cash_x";
    pub const CHART_CASH_Y: &str = "chart.cash_y";
    pub const CHART_PAYBACK_MARKER: &str = "chart.payback_marker";
    pub const CHART_PAYBACK_NONE: &str = "chart.payback_none";

    pub const GUI_CONFIG_HEADING: &str = "gui.config_heading";
    pub const GUI_GAS_HEADING: &str = "gui.gas_heading";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_RESULTS_HEADING: &str = "gui.results_heading";
    pub const GUI_NO_RESULT: &str = "gui.no_result";
    pub const GUI_DOWNLOAD_REPORT: &str = "gui.download_report";
    pub const GUI_INPUTS_CHANGED: &str = "gui.inputs_changed";

    pub const HELP_FAQ_TITLE: &str = "help.faq_title";
    pub const HELP_FAQ_BODY: &str = "help.faq_body";
    pub const HELP_GLOSSARY_TITLE: &str = "help.glossary_title";
    pub const HELP_GLOSSARY_BODY: &str = "help.glossary_body";
    pub const HELP_FORMULAS_TITLE: &str = "help.formulas_title";
    pub const HELP_FORMULAS_BODY: &str = "help.formulas_body";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열을 폴백한다.
    /// 모르는 키는 키 자체를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key)
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key).to_string();
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_TITLE => "PV/T ROI 계산기",
        INVALID_INPUT => "입력값 오류:",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        REPORT_WRITTEN => "보고서를 저장했습니다:",
        REPORT_FAILED => "보고서 생성 실패:",
        FIELD_LOCATION => "설치 지역",
        FIELD_IRRADIANCE => "연간 일사량 (kWh/m²/년)",
        FIELD_SYSTEM_SIZE => "시스템 용량 (kW)",
        FIELD_PV_BOOST => "PV 출력 향상 (%)",
        FIELD_THERMAL_EFFICIENCY => "열 효율 (%)",
        FIELD_COST_PER_WATT => "설치 단가 ($/W)",
        FIELD_INCENTIVE => "보조금/세액공제 (%)",
        FIELD_WATER_IN => "급수 입구 온도 (°F)",
        FIELD_WATER_OUT => "급수 출구 온도 (°F)",
        FIELD_ELECTRICITY_RATE => "전기 요금 ($/kWh)",
        FIELD_GRID_FACTOR => "계통 CO₂ 배출계수 (kg/kWh)",
        FIELD_INCLUDE_WATER => "온수 생산량 계산",
        FIELD_INCLUDE_GAS => "천연가스 대체 절감 포함",
        FIELD_GAS_UNIT => "가스 단위",
        FIELD_GAS_RATE => "가스 요금 ($/단위)",
        FIELD_THERMAL_OFFSET => "PV/T 열 부하 대체율 (%)",
        FIELD_EMISSION_BASELINE => "CO₂ 산정 기준",
        FIELD_LANGUAGE => "언어",
        BASELINE_PV_ONLY => "PV 전력만",
        BASELINE_PV_AND_THERMAL => "PV + 열 출력",
        PROMPT_LOCATION_OPTIONS => {
            "1) Los Angeles  2) New York  3) Chicago  4) Houston  5) Phoenix  6) 직접 입력"
        }
        PROMPT_SELECT => "선택: ",
        PROMPT_YES_NO => "(y/n)",
        PROMPT_GAS_UNIT_OPTIONS => "1) MMBTU  2) therm",
        SUMMARY_HEADING => "계산 결과",
        SUMMARY_LOCATION => "설치 지역",
        SUMMARY_SYSTEM_SIZE => "시스템 용량",
        SUMMARY_PV_OUTPUT => "연간 PV 발전량",
        SUMMARY_THERMAL_OUTPUT => "연간 열 출력",
        SUMMARY_HOT_WATER => "온수 생산량",
        SUMMARY_INSTALLATION_COST => "설치비",
        SUMMARY_NET_COST => "순 설치비",
        SUMMARY_ELECTRICITY_SAVINGS => "전기요금 절감",
        SUMMARY_GAS_SAVINGS => "가스요금 절감",
        SUMMARY_TOTAL_SAVINGS => "연간 총 절감액",
        SUMMARY_PAYBACK => "회수기간",
        SUMMARY_CO2 => "연간 CO₂ 절감",
        UNIT_YEARS => "년",
        UNIT_GALLONS => "gal",
        UNIT_LITERS => "L",
        UNIT_METRIC_TONS => "톤",
        PAYBACK_NOT_REACHED => "회수 불가 (절감액 없음)",
        CHART_ENERGY_TITLE => "에너지·온수·탄소",
        CHART_ENERGY_PV => "PV 전력 (kWh)",
        CHART_ENERGY_THERMAL => "열 에너지 (kWh)",
        CHART_ENERGY_WATER => "온수 (천 gal)",
        CHART_ENERGY_CO2 => "CO₂ 절감 (톤)",
        CHART_ENERGY_Y => "값",
        CHART_SAVINGS_TITLE => "연간 절감액 구성",
        CHART_SAVINGS_ELECTRICITY => "전기 절감 ($)",
        CHART_SAVINGS_GAS => "가스 절감 ($)",
        CHART_SAVINGS_Y => "절감액 ($)",
        CHART_CASH_TITLE => "25년 누적 현금흐름",
        CHART_CASH_X => "연차",
        CHART_CASH_Y => "누적 현금흐름 ($)",
        CHART_PAYBACK_MARKER => "회수: {years}년",
        CHART_PAYBACK_NONE => "25년 안에 회수되지 않음",
        GUI_CONFIG_HEADING => "시스템 구성",
        GUI_GAS_HEADING => "선택: 천연가스 대체",
        GUI_CALCULATE => "ROI 계산",
        GUI_RESULTS_HEADING => "계산 결과",
        GUI_NO_RESULT => "입력값을 정한 뒤 'ROI 계산'을 누르세요.",
        GUI_DOWNLOAD_REPORT => "PDF 보고서 저장",
        GUI_INPUTS_CHANGED => "입력이 바뀌었습니다. 다시 계산하면 결과가 갱신됩니다.",
        HELP_FAQ_TITLE => "자주 묻는 질문",
        HELP_FAQ_BODY => {
            "PV/T 시스템이란? 전기와 열을 함께 생산하는 하이브리드 태양광 시스템입니다.\n\
             열 부하 대체율이란? 난방 수요 중 시스템의 열 출력으로 대체되는 비율입니다.\n\
             therm / MMBTU란? 1 therm = 100,000 BTU, 1 MMBTU = 1,000,000 BTU. 가스 에너지 단위입니다.\n\
             CO₂ 절감이 왜 중요한가? 화석연료 사용 감소에 따른 환경 편익을 수치로 보여줍니다."
        }
        HELP_GLOSSARY_TITLE => "용어",
        HELP_GLOSSARY_BODY => {
            "시스템 용량(kW): PV 부분의 정격 출력.\n\
             일사량(kWh/m²/년): 설치 지점의 연간 태양 에너지.\n\
             PV 출력 향상(%): 일반 PV 대비 PV/T의 효율 이득.\n\
             열 효율(%): 이용 가능한 열로 바뀌는 비율.\n\
             급수 입/출구 온도: 온수 생산량 추정에 사용.\n\
             계통 CO₂ 계수: 계통 전력 1 kWh당 배출되는 CO₂."
        }
        HELP_FORMULAS_TITLE => "계산식",
        HELP_FORMULAS_BODY => {
            "PV 발전량 = 용량 × 일사량 × (1 + PV 향상%)\n\
             열 출력 = PV 발전량 × 열 효율\n\
             온수(gal) = 열 출력 × 3412 ÷ (8.34 × ΔT)\n\
             CO₂ 절감 = (PV + 열 출력) × 계통 계수 [+ MMBTU × 53]\n\
             가스 절감 = 열 출력 × 대체율 ÷ 단위 환산값 × 가스 요금\n\
             회수기간 = 순 설치비 ÷ 연간 총 절감액"
        }
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_TITLE => "PV/T ROI Calculator",
        INVALID_INPUT => "Invalid input:",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        REPORT_WRITTEN => "Report written to",
        REPORT_FAILED => "Report generation failed:",
        FIELD_LOCATION => "Location",
        FIELD_IRRADIANCE => "Annual Solar Irradiance (kWh/m2/year)",
        FIELD_SYSTEM_SIZE => "System Size (kW)",
        FIELD_PV_BOOST => "PV Boost (%)",
        FIELD_THERMAL_EFFICIENCY => "Thermal Efficiency (%)",
        FIELD_COST_PER_WATT => "System Cost ($/W)",
        FIELD_INCENTIVE => "Incentive / Tax Credit (%)",
        FIELD_WATER_IN => "Water In Temperature (F)",
        FIELD_WATER_OUT => "Water Out Temperature (F)",
        FIELD_ELECTRICITY_RATE => "Electricity Rate ($/kWh)",
        FIELD_GRID_FACTOR => "Grid CO2 Emission Factor (kg/kWh)",
        FIELD_INCLUDE_WATER => "Estimate hot water production",
        FIELD_INCLUDE_GAS => "Include Natural Gas Replacement Savings?",
        FIELD_GAS_UNIT => "Gas unit",
        FIELD_GAS_RATE => "Natural Gas Rate ($/unit)",
        FIELD_THERMAL_OFFSET => "Thermal Load Offset by PV/T (%)",
        FIELD_EMISSION_BASELINE => "CO2 baseline",
        FIELD_LANGUAGE => "Language",
        BASELINE_PV_ONLY => "PV electricity only",
        BASELINE_PV_AND_THERMAL => "PV + thermal output",
        PROMPT_LOCATION_OPTIONS => {
            "1) Los Angeles  2) New York  3) Chicago  4) Houston  5) Phoenix  6) Custom"
        }
        PROMPT_SELECT => "Select: ",
        PROMPT_YES_NO => "(y/n)",
        PROMPT_GAS_UNIT_OPTIONS => "1) MMBTU  2) therm",
        SUMMARY_HEADING => "Calculation Results",
        SUMMARY_LOCATION => "Location",
        SUMMARY_SYSTEM_SIZE => "System Size",
        SUMMARY_PV_OUTPUT => "Annual PV Output",
        SUMMARY_THERMAL_OUTPUT => "Annual Thermal Output",
        SUMMARY_HOT_WATER => "Hot Water Generated",
        SUMMARY_INSTALLATION_COST => "Installation Cost",
        SUMMARY_NET_COST => "Net System Cost",
        SUMMARY_ELECTRICITY_SAVINGS => "Electricity Savings",
        SUMMARY_GAS_SAVINGS => "Natural Gas Savings",
        SUMMARY_TOTAL_SAVINGS => "Total Annual Savings",
        SUMMARY_PAYBACK => "Payback Period",
        SUMMARY_CO2 => "Annual CO2 Saved",
        UNIT_YEARS => "years",
        UNIT_GALLONS => "gallons",
        UNIT_LITERS => "liters",
        UNIT_METRIC_TONS => "metric tons",
        PAYBACK_NOT_REACHED => "Payback not reached (no annual savings)",
        CHART_ENERGY_TITLE => "Energy, Water & Carbon Breakdown",
        CHART_ENERGY_PV => "PV Energy (kWh)",
        CHART_ENERGY_THERMAL => "Thermal Energy (kWh)",
        CHART_ENERGY_WATER => "Hot Water (thousands gal)",
        CHART_ENERGY_CO2 => "CO2 Savings (tons)",
        CHART_ENERGY_Y => "Amount",
        CHART_SAVINGS_TITLE => "Annual Savings Breakdown",
        CHART_SAVINGS_ELECTRICITY => "Electricity Savings ($)",
        CHART_SAVINGS_GAS => "Gas Savings ($)",
        CHART_SAVINGS_Y => "Savings ($)",
        CHART_CASH_TITLE => "Cumulative Cash Flow Over 25 Years",
        CHART_CASH_X => "Year",
        CHART_CASH_Y => "Cumulative Cash Flow ($)",
        CHART_PAYBACK_MARKER => "Payback: {years} yrs",
        CHART_PAYBACK_NONE => "Payback not reached within 25 years",
        GUI_CONFIG_HEADING => "System Configuration",
        GUI_GAS_HEADING => "Optional: Natural Gas Replacement",
        GUI_CALCULATE => "Calculate ROI",
        GUI_RESULTS_HEADING => "Calculation Results",
        GUI_NO_RESULT => "Set the inputs and press 'Calculate ROI'.",
        GUI_DOWNLOAD_REPORT => "Download PDF Report",
        GUI_INPUTS_CHANGED => "Inputs changed. Recalculate to refresh the results.",
        HELP_FAQ_TITLE => "FAQ",
        HELP_FAQ_BODY => {
            "What is a PV/T system? A hybrid solar system that produces both electricity and heat.\n\
             What is thermal offset? The percentage of heating demand offset by thermal energy from the system.\n\
             What is a therm or MMBTU? 1 therm = 100,000 BTU; 1 MMBTU = 1,000,000 BTU. Used to measure gas energy.\n\
             Why does CO2 savings matter? It quantifies the environmental benefit of reducing fossil fuel use."
        }
        HELP_GLOSSARY_TITLE => "Glossary",
        HELP_GLOSSARY_BODY => {
            "System Size (kW): Peak capacity of the PV portion of the system.\n\
             Irradiance (kWh/m2/year): Solar energy received at the site.\n\
             PV Boost (%): Efficiency gain of PV/T over conventional PV.\n\
             Thermal Efficiency (%): Percent of PV output converted into usable heat.\n\
             Water In/Out Temp: Used to estimate hot water generation.\n\
             Grid CO2 Factor: CO2 emitted per kWh of grid power."
        }
        HELP_FORMULAS_TITLE => "How It Works",
        HELP_FORMULAS_BODY => {
            "PV Output (kWh) = System Size x Irradiance x (1 + PV Boost %)\n\
             Thermal Output = PV Output x Thermal Efficiency\n\
             Hot Water (gallons) = Thermal Energy x 3412 / (8.34 x dT)\n\
             CO2 Savings = (PV + Thermal Output) x CO2 Factor [+ MMBTU saved x 53]\n\
             Gas Savings = Thermal x Offset % / unit divisor x gas rate\n\
             Payback = Net Cost / Total Annual Savings"
        }
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_falls_back_to_english_for_missing_key() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::SUMMARY_PAYBACK), "회수기간");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-US")), "en");
    }

    #[test]
    fn nested_toml_pack_flattens_keys() {
        let map = parse_toml_to_map("[summary]\npayback = \"Amortisation\"\n").unwrap();
        assert_eq!(map.get("summary.payback").map(String::as_str), Some("Amortisation"));
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(keys::CHART_PAYBACK_MARKER, &[("years", "6.9".into())]);
        assert_eq!(s, "Payback: 6.9 yrs");
    }
}
