//! 화면 표시용 단위 변환. 계산 모듈은 항상 °F, gal 기준으로 동작한다.

pub mod temperature;
pub mod volume;

pub use temperature::{convert_temperature, TemperatureUnit};
pub use volume::{convert_volume, VolumeUnit};
