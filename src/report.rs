//! 계산 결과를 A4 PDF 보고서로 만든다.
//!
//! 첫 장은 요약 문구, 이후 차트마다 한 장씩 벡터로 그린다. 모든 장 하단에
//! 면책 문구를 넣는다. 파일은 같은 디렉터리의 임시 파일에 먼저 쓰고, 완성된
//! 뒤에만 목적지 이름으로 옮긴다.

use std::io::Write;
use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Rgb as PdfRgb,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::charts::{self, BarChart, CashFlowChart, Rgb};
use crate::config::{ReportSettings, UnitSystem};
use crate::i18n::Translator;
use crate::input::RoiInput;
use crate::roi::{RoiResult, CASH_FLOW_YEARS};
use crate::summary::{self, format_number, SummaryLine};

const PAGE_W: f64 = 210.0;
const PAGE_H: f64 = 297.0;
const PT_TO_MM: f64 = 0.3528;
const GREY: Rgb = [128, 128, 128];
const BLACK: Rgb = [0, 0, 0];

/// 보고서 생성 오류. 계산 결과 자체에는 영향을 주지 않는다.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("보고서 파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF 생성 오류: {0}")]
    Pdf(String),
    #[error("보고서를 {path}에 저장하지 못함: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 보고서 한 장의 내용.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPage {
    Summary {
        title: String,
        lines: Vec<SummaryLine>,
    },
    Bars(BarChart),
    CashFlow(CashFlowChart),
}

/// 보고서에 필요한 입력. 보고서는 항상 영어 내장 폰트로 쓴다.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub settings: &'a ReportSettings,
    pub input: &'a RoiInput,
    pub result: &'a RoiResult,
}

/// 모든 장 하단의 면책 문구.
pub fn disclaimer(operator: &str) -> String {
    format!(
        "Disclaimer: This ROI Calculator is for estimation purposes only. \
         Please contact {operator} for more details."
    )
}

/// 보고서 장 구성: 요약 1장 + 차트 3장.
pub fn report_pages(ctx: &ReportContext<'_>) -> Vec<ReportPage> {
    let tr = Translator::new("en");
    let mut lines = summary::header_lines(ctx.input, &tr);
    lines.extend(summary::summary_lines(ctx.result, &tr, UnitSystem::Imperial));
    let set = charts::build_charts(ctx.result, &tr);
    vec![
        ReportPage::Summary {
            title: ctx.settings.title.clone(),
            lines,
        },
        ReportPage::Bars(set.energy),
        ReportPage::Bars(set.savings),
        ReportPage::CashFlow(set.cash_flow),
    ]
}

/// PDF 바이트를 만든다.
pub fn render_pdf(ctx: &ReportContext<'_>) -> Result<Vec<u8>, ReportError> {
    let pages = report_pages(ctx);
    let (doc, first_page, first_layer) =
        PdfDocument::new(&ctx.settings.title, Mm(PAGE_W as f32), Mm(PAGE_H as f32), "Layer 1");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(pdf_err)?,
    };
    let footer = disclaimer(&ctx.settings.operator);

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(Mm(PAGE_W as f32), Mm(PAGE_H as f32), "Layer 1");
            doc.get_page(p).get_layer(l)
        };
        match page {
            ReportPage::Summary { title, lines } => draw_summary(&layer, &fonts, title, lines),
            ReportPage::Bars(chart) => draw_bar_chart(&layer, &fonts, chart),
            ReportPage::CashFlow(chart) => draw_cash_flow(&layer, &fonts, chart),
        }
        draw_footer(&layer, &fonts, &footer);
    }

    doc.save_to_bytes().map_err(pdf_err)
}

/// 보고서를 `path`에 쓴다. 실패하면 임시 파일은 지워지고 목적지는 건드리지 않는다.
pub fn write_report(path: impl AsRef<Path>, ctx: &ReportContext<'_>) -> Result<(), ReportError> {
    let path = path.as_ref();
    let result = render_pdf(ctx).and_then(|bytes| persist_atomically(path, &bytes));
    match &result {
        Ok(()) => info!(path = %path.display(), "report written"),
        Err(e) => warn!(path = %path.display(), "report generation failed: {e}"),
    }
    result
}

fn persist_atomically(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".pvt_roi_")
        .suffix(".pdf.tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ReportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

fn pdf_err<E: std::fmt::Debug>(e: E) -> ReportError {
    ReportError::Pdf(format!("{e:?}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// 내장 폰트는 WinAnsi 범위만 그릴 수 있어 나머지 문자는 치환한다.
fn pdf_text(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '₂' => '2',
            '²' => '2',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

/// Helvetica 평균 글자폭으로 어림한 문자열 폭 [mm].
fn text_width_mm(s: &str, size_pt: f64) -> f64 {
    s.chars().count() as f64 * size_pt * 0.5 * PT_TO_MM
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        None,
    ))
}

fn pt(x: f64, y: f64) -> (Point, bool) {
    (Point::new(Mm(x as f32), Mm(y as f32)), false)
}

fn text(layer: &PdfLayerReference, font: &IndirectFontRef, s: &str, size: f64, x: f64, y: f64) {
    layer.use_text(pdf_text(s), size as f32, Mm(x as f32), Mm(y as f32), font);
}

fn text_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    s: &str,
    size: f64,
    cx: f64,
    y: f64,
) {
    let x = cx - text_width_mm(s, size) / 2.0;
    text(layer, font, s, size, x, y);
}

fn line(layer: &PdfLayerReference, points: &[(f64, f64)], rgb: Rgb, width: f64) {
    layer.set_outline_color(color(rgb));
    layer.set_outline_thickness(width as f32);
    layer.add_line(Line {
        points: points.iter().map(|&(x, y)| pt(x, y)).collect(),
        is_closed: false,
    });
}

fn dashed_line(layer: &PdfLayerReference, points: &[(f64, f64)], rgb: Rgb, dash: i64) {
    layer.set_line_dash_pattern(LineDashPattern {
        dash_1: Some(dash),
        gap_1: Some(dash),
        ..Default::default()
    });
    line(layer, points, rgb, 0.8);
    layer.set_line_dash_pattern(LineDashPattern::default());
}

fn filled_rect(layer: &PdfLayerReference, x0: f64, y0: f64, x1: f64, y1: f64, rgb: Rgb) {
    layer.set_fill_color(color(rgb));
    layer.add_polygon(Polygon {
        rings: vec![vec![pt(x0, y0), pt(x1, y0), pt(x1, y1), pt(x0, y1)]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    layer.set_fill_color(color(BLACK));
}

fn draw_footer(layer: &PdfLayerReference, fonts: &Fonts, footer: &str) {
    layer.set_fill_color(color(GREY));
    text_centered(layer, &fonts.italic, footer, 8.0, PAGE_W / 2.0, 10.0);
    layer.set_fill_color(color(BLACK));
}

fn draw_summary(layer: &PdfLayerReference, fonts: &Fonts, title: &str, lines: &[SummaryLine]) {
    text_centered(layer, &fonts.bold, title, 16.0, PAGE_W / 2.0, PAGE_H - 20.0);
    let mut y = PAGE_H - 38.0;
    for l in lines {
        text(layer, &fonts.regular, &l.to_string(), 12.0, 20.0, y);
        y -= 9.0;
    }
}

/// 차트 영역 [mm]: 좌하단 (x0, y0) ~ 우상단 (x1, y1)
struct Plot {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    lo: f64,
    hi: f64,
}

impl Plot {
    fn new(lo: f64, hi: f64) -> Self {
        Self {
            x0: 35.0,
            y0: 70.0,
            x1: PAGE_W - 20.0,
            y1: PAGE_H - 50.0,
            lo,
            hi,
        }
    }

    fn y(&self, v: f64) -> f64 {
        self.y0 + (v - self.lo) / (self.hi - self.lo) * (self.y1 - self.y0)
    }

    fn draw_frame(
        &self,
        layer: &PdfLayerReference,
        fonts: &Fonts,
        title: &str,
        y_label: &str,
        ticks: &[f64],
    ) {
        text_centered(layer, &fonts.bold, title, 14.0, PAGE_W / 2.0, PAGE_H - 30.0);
        text(layer, &fonts.regular, y_label, 9.0, self.x0 - 20.0, self.y1 + 6.0);
        for &t in ticks {
            let y = self.y(t);
            line(layer, &[(self.x0, y), (self.x1, y)], [220, 220, 220], 0.3);
            let label = format_number(t, 0);
            let w = text_width_mm(&label, 8.0);
            text(layer, &fonts.regular, &label, 8.0, self.x0 - 2.0 - w, y - 1.0);
        }
        line(
            layer,
            &[(self.x0, self.y1), (self.x0, self.y0), (self.x1, self.y0)],
            BLACK,
            0.6,
        );
    }
}

fn draw_bar_chart(layer: &PdfLayerReference, fonts: &Fonts, chart: &BarChart) {
    let (lo, hi) = charts::axis_range(chart.bars.iter().map(|b| b.value));
    let ticks = charts::axis_ticks(lo, hi, 5);
    let plot = Plot::new(
        ticks.first().copied().unwrap_or(lo),
        ticks.last().copied().unwrap_or(hi),
    );
    plot.draw_frame(layer, fonts, &chart.title, &chart.y_label, &ticks);

    let n = chart.bars.len().max(1) as f64;
    let slot = (plot.x1 - plot.x0) / n;
    for (i, bar) in chart.bars.iter().enumerate() {
        let cx = plot.x0 + slot * (i as f64 + 0.5);
        let half = slot * 0.3;
        let (ya, yb) = (plot.y(0.0), plot.y(bar.value));
        filled_rect(layer, cx - half, ya.min(yb), cx + half, ya.max(yb), bar.color);
        text_centered(
            layer,
            &fonts.regular,
            &format_number(bar.value, 2),
            8.0,
            cx,
            ya.max(yb) + 2.0,
        );
        text_centered(layer, &fonts.regular, &bar.label, 8.0, cx, plot.y0 - 6.0);
    }
}

fn draw_cash_flow(layer: &PdfLayerReference, fonts: &Fonts, chart: &CashFlowChart) {
    let (lo, hi) = charts::axis_range(chart.points.iter().map(|p| p[1]));
    let ticks = charts::axis_ticks(lo, hi, 6);
    let plot = Plot::new(
        ticks.first().copied().unwrap_or(lo),
        ticks.last().copied().unwrap_or(hi),
    );
    plot.draw_frame(layer, fonts, &chart.title, &chart.y_label, &ticks);

    let years = CASH_FLOW_YEARS as f64;
    let x = |year: f64| plot.x0 + year / years * (plot.x1 - plot.x0);
    for year in (0..=CASH_FLOW_YEARS).step_by(5) {
        let label = year.to_string();
        text_centered(layer, &fonts.regular, &label, 8.0, x(year as f64), plot.y0 - 5.0);
    }
    text_centered(
        layer,
        &fonts.regular,
        &chart.x_label,
        9.0,
        (plot.x0 + plot.x1) / 2.0,
        plot.y0 - 12.0,
    );

    let zero = plot.y(0.0);
    dashed_line(layer, &[(plot.x0, zero), (plot.x1, zero)], GREY, 3);

    let path: Vec<(f64, f64)> = chart.points.iter().map(|p| (x(p[0]), plot.y(p[1]))).collect();
    if path.len() > 1 {
        line(layer, &path, charts::CASH_FLOW_COLOR, 1.0);
    }
    for &(px, py) in &path {
        filled_rect(layer, px - 0.8, py - 0.8, px + 0.8, py + 0.8, charts::CASH_FLOW_COLOR);
    }

    if let Some(payback) = chart.payback_marker {
        dashed_line(
            layer,
            &[(x(payback), plot.y0), (x(payback), plot.y1)],
            charts::PAYBACK_COLOR,
            1,
        );
    }
    layer.set_fill_color(color(if chart.payback_marker.is_some() {
        charts::PAYBACK_COLOR
    } else {
        GREY
    }));
    text(layer, &fonts.regular, &chart.marker_label, 9.0, plot.x1 - 60.0, plot.y1 + 6.0);
    layer.set_fill_color(color(BLACK));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(pdf_text("CO₂ kWh/m²"), "CO2 kWh/m2");
        assert_eq!(pdf_text("회수"), "??");
    }

    #[test]
    fn disclaimer_names_operator() {
        assert_eq!(
            disclaimer("Acme Solar"),
            "Disclaimer: This ROI Calculator is for estimation purposes only. \
             Please contact Acme Solar for more details."
        );
    }
}
