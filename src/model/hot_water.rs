/// 1 kWh에 해당하는 BTU.
pub const BTU_PER_KWH: f64 = 3412.0;
/// 물 1 gal의 질량 [lb]. 비열은 1 BTU/lb·°F로 둔다.
pub const LB_PER_GALLON: f64 = 8.34;

/// 열 출력으로 데울 수 있는 연간 온수량 [gal]을 계산한다.
///
/// 출구 온도가 입구 온도보다 높지 않으면 0을 돌려준다.
pub fn compute_hot_water(thermal_output_kwh: f64, temp_in_f: f64, temp_out_f: f64) -> f64 {
    if temp_out_f > temp_in_f {
        thermal_output_kwh * BTU_PER_KWH / (LB_PER_GALLON * (temp_out_f - temp_in_f))
    } else {
        0.0
    }
}
