//! Rasmussen(1997) 습공기 물성 상관식.
//! 입력: 온도 t(°C) 또는 절대온도 T(K), 압력 p(Pa), 몰분율 xw/xc(무차원)
//! 출력: 각 식의 SI 단위 결과
//!
//! Rasmussen, K. (1997), "Calculation method for the physical properties of air
//! used in the calibration of microphones", Report PL-11b, DTU.

/// 섭씨 → 켈빈 오프셋.
pub const KELVIN_OFFSET: f64 = 273.15;

/// 실험실 권장 CO2 몰분율. 상태로부터 유도하지 않는 고정값이다.
pub const MOLE_FRACTION_CO2: f64 = 0.0004;

// ---------------- 포화 수증기압 ----------------
const PSV: [f64; 4] = [1.237_884_7e-5, -1.912_131_6e-2, 33.937_110_47, -6.343_164_5e3];

// ---------------- 증강 계수 ----------------
const ENHANCEMENT: [f64; 3] = [1.000_62, 3.14e-5, 5.6e-7];

// ---------------- 압축 계수 ----------------
const COMPRESSIBILITY: [f64; 9] = [
    1.581_23e-6,
    -2.933_1e-8,
    1.104_3e-10,
    5.707e-6,
    -2.051e-8,
    1.989_8e-4,
    -2.376e-6,
    1.83e-11,
    -0.765e-8,
];

// ---------------- 음속 ----------------
// CELERITY[2] 는 표에만 존재하고 식에서는 쓰이지 않는다.
const CELERITY: [f64; 16] = [
    331.502_4,
    0.603_055,
    -0.000_528,
    51.471_935,
    0.149_587_4,
    -0.000_782,
    -1.82e-7,
    3.73e-8,
    -2.93e-10,
    -85.209_31,
    -0.228_525,
    5.91e-5,
    -2.835_149,
    -2.15e-13,
    29.179_762,
    0.000_486,
];

// ---------------- 비열비 ----------------
const KAPPA: [f64; 16] = [
    1.400_822,
    -1.75e-5,
    -1.73e-7,
    -0.087_362_9,
    -0.000_166_5,
    -3.26e-6,
    2.047e-8,
    -1.26e-10,
    5.939e-14,
    -0.119_971_7,
    -0.000_869_3,
    1.979e-6,
    -0.011_04,
    -3.478e-16,
    0.045_061_6,
    1.82e-6,
];

// ---------------- 점성계수 ----------------
const VISCOSITY: [f64; 6] = [84.986, 7.0, 113.157, -1.0, -3.750_1e-3, -100.015];

// ---------------- 열전도율 ----------------
const CONDUCTIVITY: [f64; 5] = [60.054, 1.846, 2.0e-6, 40.0, -1.775e-4];
const CAL_TO_J_CONDUCTIVITY: f64 = 4.186e-5;

// ---------------- 정압비열 ----------------
const HEAT_CAPACITY: [f64; 10] = [
    0.251_625,
    -9.252_5e-5,
    2.133_4e-7,
    -1.004_3e-10,
    0.124_77,
    -2.283e-5,
    1.267e-7,
    0.011_6,
    4.61e-6,
    1.74e-8,
];
const KCAL_TO_J: f64 = 4_186.8;

/// 포화 수증기압 [Pa]. 입력은 절대온도 T[K].
pub fn saturation_vapor_pressure(t_k: f64) -> f64 {
    (PSV[0] * t_k * t_k + PSV[1] * t_k + PSV[2] + PSV[3] / t_k).exp()
}

/// 증강 계수 [-]. 입력은 p[Pa], t[°C].
pub fn enhancement_factor(p_pa: f64, t_c: f64) -> f64 {
    ENHANCEMENT[0] + ENHANCEMENT[1] * p_pa + ENHANCEMENT[2] * t_c
}

/// 수증기 몰분율 [-]. 상대습도는 % 단위.
pub fn mole_fraction_vapor(humidity_pct: f64, psv_pa: f64, p_pa: f64, ef: f64) -> f64 {
    humidity_pct / 100.0 * psv_pa / p_pa * ef
}

/// 압축 계수 [-].
pub fn compressibility_factor(p_pa: f64, t_k: f64, t_c: f64, xw: f64) -> f64 {
    let a = &COMPRESSIBILITY;
    let p_over_t = p_pa / t_k;
    1.0 - p_over_t
        * (a[0]
            + a[1] * t_c
            + a[2] * t_c * t_c
            + (a[3] + a[4] * t_c) * xw
            + (a[5] + a[6] * t_c) * xw * xw)
        + p_over_t * p_over_t * (a[7] + a[8] * xw * xw)
}

/// 밀도 [kg/m³].
pub fn density(p_pa: f64, t_k: f64, cf: f64, xw: f64, xc: f64) -> f64 {
    (3.483_49 + 1.44 * (xc - MOLE_FRACTION_CO2)) * 1e-3 * p_pa / (cf * t_k)
        * (1.0 - 0.378_0 * xw)
}

/// 영주파수 음속 [m/s].
///
/// 계수표의 `t²` 항(`CELERITY[2]`)은 사용하지 않고, CO2 항은 1차(`xc`)로 둔다.
pub fn celerity(t_c: f64, p_pa: f64, xw: f64, xc: f64) -> f64 {
    let a = &CELERITY;
    let t2 = t_c * t_c;
    a[0] + a[1] * t_c
        + (a[3] + a[4] * t_c + a[5] * t2) * xw
        + (a[6] + a[7] * t_c + a[8] * t2) * p_pa
        + (a[9] + a[10] * t_c + a[11] * t2) * xc
        + a[12] * xw * xw
        + a[13] * p_pa * p_pa
        + a[14] * xc
        + a[15] * xw * p_pa * xc
}

/// 영주파수 비열비 κ [-].
pub fn ratio_of_specific_heats(t_c: f64, p_pa: f64, xw: f64, xc: f64) -> f64 {
    let a = &KAPPA;
    let t2 = t_c * t_c;
    a[0] + a[1] * t_c
        + a[2] * t2
        + (a[3] + a[4] * t_c + a[5] * t2) * xw
        + (a[6] + a[7] * t_c + a[8] * t2) * p_pa
        + (a[9] + a[10] * t_c + a[11] * t2) * xc
        + a[12] * xw * xw
        + a[13] * p_pa * p_pa
        + a[14] * xc * xc
        + a[15] * xw * p_pa * xc
}

/// 점성계수 [Pa·s].
pub fn viscosity(t_k: f64, xw: f64) -> f64 {
    let a = &VISCOSITY;
    (a[0] + a[1] * t_k + (a[2] + a[3] * t_k) * xw + a[4] * t_k * t_k + a[5] * xw * xw) * 1e-8
}

/// 열전도율 [W/(m·K)].
pub fn thermal_conductivity(t_k: f64, xw: f64) -> f64 {
    let a = &CONDUCTIVITY;
    (a[0] + a[1] * t_k + a[2] * t_k * t_k + (a[3] + a[4] * t_k) * xw) * CAL_TO_J_CONDUCTIVITY
}

/// 정압비열 [J/(kg·K)].
pub fn specific_heat_capacity(t_k: f64, xw: f64) -> f64 {
    let a = &HEAT_CAPACITY;
    let t2 = t_k * t_k;
    (a[0] + a[1] * t_k
        + a[2] * t2
        + a[3] * t2 * t_k
        + (a[4] + a[5] * t_k + a[6] * t2) * xw
        + (a[7] + a[8] * t_k + a[9] * t2) * xw * xw)
        * KCAL_TO_J
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unused_celerity_coefficient_does_not_enter_formula() {
        // t² 항이 들어갔다면 20°C 에서 약 -0.21 m/s 차이가 난다.
        let c = celerity(20.0, 101_325.0, 0.0, MOLE_FRACTION_CO2);
        assert!((c - 343.582_334_094_340_64).abs() < 1e-9, "c={c}");
    }

    #[test]
    fn saturation_vapor_pressure_at_triple_point_region() {
        let psv = saturation_vapor_pressure(KELVIN_OFFSET);
        assert!((psv - 611.212_624_036_057_4).abs() < 1e-6, "psv={psv}");
    }
}
