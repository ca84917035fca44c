use serde::{Deserialize, Serialize};

/// 화면에 쓰는 온도 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// 온도를 서로 다른 단위로 변환한다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    match (from, to) {
        (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn water_temperatures_convert_both_ways() {
        use TemperatureUnit::*;
        assert_relative_eq!(
            convert_temperature(60.0, Fahrenheit, Celsius),
            15.555_555_555,
            epsilon = 1e-6
        );
        assert_relative_eq!(convert_temperature(100.0, Celsius, Fahrenheit), 212.0);
        assert_eq!(convert_temperature(120.0, Fahrenheit, Fahrenheit), 120.0);
        let c = convert_temperature(120.0, Fahrenheit, Celsius);
        let back = convert_temperature(c, Celsius, Fahrenheit);
        assert_relative_eq!(back, 120.0, epsilon = 1e-9);
    }
}
