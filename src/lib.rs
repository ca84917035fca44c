//! PV/T 시스템 ROI 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 계산을 공유한다.

pub mod app;
pub mod charts;
pub mod config;
pub mod i18n;
pub mod input;
pub mod model;
pub mod report;
pub mod roi;
pub mod summary;
pub mod ui_cli;
pub mod units;

pub use input::RoiInput;
pub use roi::{calculate, RoiResult};
