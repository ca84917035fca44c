use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::Level;

use crate::config::{Config, ConfigError};
use crate::i18n::{keys, Translator};
use crate::input::{InputError, RoiInput};
use crate::report::{self, ReportContext, ReportError};
use crate::roi::{self, RoiResult};
use crate::summary::{self, format_number};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("입력 파일 파싱 오류: {0}")]
    InputFile(#[from] toml::de::Error),
    #[error("입력값 오류: {0}")]
    Input(#[from] InputError),
    #[error("보고서 오류: {0}")]
    Report(#[from] ReportError),
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 한 번의 CLI 실행 조건.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: RoiInput,
    pub json: bool,
    pub report_path: Option<PathBuf>,
}

/// stderr로 tracing 로그를 내보낸다. `-v` 횟수가 설정 레벨보다 우선한다.
pub fn init_logging(verbosity: u8, configured: &str) {
    let level = match verbosity {
        0 => configured.parse::<Level>().unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("logging already initialised: {e}");
    }
}

/// TOML 시나리오 파일에서 입력 묶음을 읽는다. 빠진 항목은 기본값을 쓴다.
pub fn load_input_file(path: impl AsRef<Path>) -> Result<RoiInput, AppError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 입력 검증 → 계산 → 출력 → (선택) 보고서 순서로 실행한다.
///
/// 결과는 보고서 생성 전에 출력되므로 보고서가 실패해도 계산 결과는 남는다.
pub fn run(config: &Config, tr: &Translator, opts: RunOptions) -> Result<RoiResult, AppError> {
    opts.input.validate()?;
    let result = roi::calculate(&opts.input);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(config, tr, &opts.input, &result);
    }

    if let Some(path) = &opts.report_path {
        let ctx = ReportContext {
            settings: &config.report,
            input: &opts.input,
            result: &result,
        };
        report::write_report(path, &ctx)?;
        println!("{} {}", tr.t(keys::REPORT_WRITTEN), path.display());
    }
    Ok(result)
}

/// 요약과 25년 누적 현금흐름 표를 출력한다.
pub fn print_summary(config: &Config, tr: &Translator, input: &RoiInput, result: &RoiResult) {
    println!("\n=== {} ===", tr.t(keys::SUMMARY_HEADING));
    for line in summary::header_lines(input, tr) {
        println!("{line}");
    }
    for line in summary::summary_lines(result, tr, config.unit_system) {
        println!("{line}");
    }

    println!("\n-- {} --", tr.t(keys::CHART_CASH_TITLE));
    println!("{:>6}  {:>16}", tr.t(keys::CHART_CASH_X), "$");
    for p in &result.cumulative_cash_flow {
        println!("{:>6}  {:>16}", p.year, format_number(p.cumulative_usd, 2));
    }
    match result.payback_marker() {
        Some(years) => println!(
            "{}",
            tr.fill(keys::CHART_PAYBACK_MARKER, &[("years", format!("{years:.1}"))])
        ),
        None => println!("{}", tr.t(keys::CHART_PAYBACK_NONE)),
    }
}

/// 도움말(FAQ, 용어, 계산식)을 출력한다.
pub fn print_help_topics(tr: &Translator) {
    for (title, body) in [
        (keys::HELP_FORMULAS_TITLE, keys::HELP_FORMULAS_BODY),
        (keys::HELP_FAQ_TITLE, keys::HELP_FAQ_BODY),
        (keys::HELP_GLOSSARY_TITLE, keys::HELP_GLOSSARY_BODY),
    ] {
        println!("\n-- {} --\n{}", tr.t(title), tr.t(body));
    }
}
