//! 온도·압력·상대습도로 정의되는 습공기 상태.
//!
//! 중간 물성(포화 수증기압, 증강 계수, 몰분율, 압축 계수)은 독립 변수가 바뀔 때마다
//! 즉시 다시 계산하고, 밀도·음속 등 출력 물성은 처음 읽을 때 계산해 캐시한다.
//! 독립 변수를 쓰면 캐시는 모두 비워진다.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::rasmussen::{self, KELVIN_OFFSET, MOLE_FRACTION_CO2};

/// 기본 온도 [°C]
pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;
/// 기본 압력 [Pa]
pub const DEFAULT_PRESSURE_PA: f64 = 101_325.0;
/// 기본 상대습도 [%]
pub const DEFAULT_HUMIDITY_PCT: f64 = 0.0;

/// 독립 변수 세 개를 묶은 값. 설정 파일과 CLI 입력에 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    /// 온도 [°C]
    pub temperature_c: f64,
    /// 대기압 [Pa]
    pub pressure_pa: f64,
    /// 상대습도 [%]
    pub humidity_pct: f64,
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            temperature_c: DEFAULT_TEMPERATURE_C,
            pressure_pa: DEFAULT_PRESSURE_PA,
            humidity_pct: DEFAULT_HUMIDITY_PCT,
        }
    }
}

impl Conditions {
    /// 물리적으로 타당한 범위인지 확인한다. 계산 자체는 이 검사 없이도 수행된다.
    pub fn check_physical(&self) -> Result<(), AirStateError> {
        let fields = [
            ("temperature", self.temperature_c),
            ("pressure", self.pressure_pa),
            ("humidity", self.humidity_pct),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AirStateError::NonFinite(*name));
        }
        if self.temperature_c + KELVIN_OFFSET <= 0.0 {
            return Err(AirStateError::BelowAbsoluteZero(self.temperature_c));
        }
        if self.pressure_pa <= 0.0 {
            return Err(AirStateError::NonPositivePressure(self.pressure_pa));
        }
        if !(0.0..=100.0).contains(&self.humidity_pct) {
            return Err(AirStateError::HumidityOutOfRange(self.humidity_pct));
        }
        Ok(())
    }
}

/// 선택적 물리 범위 검사에서 발생하는 오류.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirStateError {
    /// 상대습도가 0~100% 범위를 벗어남
    HumidityOutOfRange(f64),
    /// 압력이 0 이하
    NonPositivePressure(f64),
    /// 온도가 절대영도 이하
    BelowAbsoluteZero(f64),
    /// NaN 또는 무한대 입력
    NonFinite(&'static str),
}

impl std::fmt::Display for AirStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AirStateError::HumidityOutOfRange(v) => {
                write!(f, "상대습도는 0~100% 범위여야 합니다: {v}%")
            }
            AirStateError::NonPositivePressure(v) => write!(f, "압력은 양수여야 합니다: {v} Pa"),
            AirStateError::BelowAbsoluteZero(v) => {
                write!(f, "온도가 절대영도 이하입니다: {v} °C")
            }
            AirStateError::NonFinite(name) => write!(f, "{name} 값이 유한한 수가 아닙니다."),
        }
    }
}

impl std::error::Error for AirStateError {}

/// 독립 변수에서 바로 유도되는 중간 물성.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Intermediates {
    saturation_vapor_pressure: f64,
    enhancement_factor: f64,
    mole_fraction_vapor: f64,
    compressibility_factor: f64,
    mole_fraction_co2: f64,
}

impl Intermediates {
    fn compute(t_c: f64, p_pa: f64, humidity_pct: f64) -> Self {
        let t_k = t_c + KELVIN_OFFSET;
        let psv = rasmussen::saturation_vapor_pressure(t_k);
        let ef = rasmussen::enhancement_factor(p_pa, t_c);
        let xw = rasmussen::mole_fraction_vapor(humidity_pct, psv, p_pa, ef);
        let cf = rasmussen::compressibility_factor(p_pa, t_k, t_c, xw);
        Self {
            saturation_vapor_pressure: psv,
            enhancement_factor: ef,
            mole_fraction_vapor: xw,
            compressibility_factor: cf,
            mole_fraction_co2: MOLE_FRACTION_CO2,
        }
    }
}

/// 지연 계산되는 출력 물성 캐시. `None` 이면 아직 계산되지 않은 상태.
#[derive(Debug, Clone, Default)]
struct DerivedCache {
    density: Cell<Option<f64>>,
    celerity: Cell<Option<f64>>,
    ratio_of_specific_heats: Cell<Option<f64>>,
    viscosity: Cell<Option<f64>>,
    thermal_conductivity: Cell<Option<f64>>,
    specific_heat_capacity: Cell<Option<f64>>,
}

impl DerivedCache {
    fn clear(&self) {
        self.density.set(None);
        self.celerity.set(None);
        self.ratio_of_specific_heats.set(None);
        self.viscosity.set(None);
        self.thermal_conductivity.set(None);
        self.specific_heat_capacity.set(None);
    }
}

fn cached(slot: &Cell<Option<f64>>, name: &'static str, compute: impl FnOnce() -> f64) -> f64 {
    if let Some(value) = slot.get() {
        trace!(property = name, value, "cache hit");
        return value;
    }
    let value = compute();
    debug!(property = name, value, "derived");
    slot.set(Some(value));
    value
}

/// 하나의 공기 상태.
///
/// 조회 메서드는 `&self` 로 캐시를 채우므로 `AirState` 는 `Sync` 가 아니다.
/// 여러 스레드에서 공유하려면 객체 전체를 하나의 `Mutex` 로 감싼다.
///
/// ```
/// use humid_air_toolbox::air::AirState;
///
/// let mut air = AirState::default();
/// let c20 = air.celerity();
/// air.set_temperature(10.0);
/// assert!(air.celerity() < c20);
/// ```
#[derive(Debug, Clone)]
pub struct AirState {
    temperature: f64,
    pressure: f64,
    humidity: f64,
    intermediates: Intermediates,
    cache: DerivedCache,
}

impl Default for AirState {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPERATURE_C, DEFAULT_PRESSURE_PA, DEFAULT_HUMIDITY_PCT)
    }
}

impl AirState {
    /// 온도[°C], 압력[Pa], 상대습도[%] 로 상태를 만든다. 입력 검사는 하지 않는다.
    pub fn new(temperature: f64, pressure: f64, humidity: f64) -> Self {
        Self {
            temperature,
            pressure,
            humidity,
            intermediates: Intermediates::compute(temperature, pressure, humidity),
            cache: DerivedCache::default(),
        }
    }

    pub fn from_conditions(conditions: Conditions) -> Self {
        Self::new(
            conditions.temperature_c,
            conditions.pressure_pa,
            conditions.humidity_pct,
        )
    }

    pub fn conditions(&self) -> Conditions {
        Conditions {
            temperature_c: self.temperature,
            pressure_pa: self.pressure,
            humidity_pct: self.humidity,
        }
    }

    /// 현재 독립 변수가 물리적으로 타당한지 확인한다.
    pub fn check_physical(&self) -> Result<(), AirStateError> {
        self.conditions().check_physical()
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// 온도[°C]를 바꾸고 중간 물성을 다시 계산한다.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
        self.refresh();
    }

    /// 압력[Pa]을 바꾸고 중간 물성을 다시 계산한다.
    pub fn set_pressure(&mut self, pressure: f64) {
        self.pressure = pressure;
        self.refresh();
    }

    /// 상대습도[%]를 바꾸고 중간 물성을 다시 계산한다.
    pub fn set_humidity(&mut self, humidity: f64) {
        self.humidity = humidity;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.recompute_intermediates();
        self.cache.clear();
    }

    fn recompute_intermediates(&mut self) {
        self.intermediates = Intermediates::compute(self.temperature, self.pressure, self.humidity);
        debug!(
            temperature = self.temperature,
            pressure = self.pressure,
            humidity = self.humidity,
            xw = self.intermediates.mole_fraction_vapor,
            cf = self.intermediates.compressibility_factor,
            "intermediates recomputed"
        );
    }

    fn temperature_k(&self) -> f64 {
        self.temperature + KELVIN_OFFSET
    }

    /// 포화 수증기압 [Pa]
    pub fn saturation_vapor_pressure(&self) -> f64 {
        self.intermediates.saturation_vapor_pressure
    }

    /// 증강 계수 [-]
    pub fn enhancement_factor(&self) -> f64 {
        self.intermediates.enhancement_factor
    }

    /// 수증기 몰분율 [-]
    pub fn mole_fraction_vapor(&self) -> f64 {
        self.intermediates.mole_fraction_vapor
    }

    /// 압축 계수 [-]
    pub fn compressibility_factor(&self) -> f64 {
        self.intermediates.compressibility_factor
    }

    /// CO2 몰분율 [-]. 항상 0.0004.
    pub fn mole_fraction_co2(&self) -> f64 {
        self.intermediates.mole_fraction_co2
    }

    /// 밀도 [kg/m³]
    pub fn density(&self) -> f64 {
        let i = self.intermediates;
        cached(&self.cache.density, "density", || {
            rasmussen::density(
                self.pressure,
                self.temperature_k(),
                i.compressibility_factor,
                i.mole_fraction_vapor,
                i.mole_fraction_co2,
            )
        })
    }

    /// 음속 [m/s]
    pub fn celerity(&self) -> f64 {
        let i = self.intermediates;
        cached(&self.cache.celerity, "celerity", || {
            rasmussen::celerity(
                self.temperature,
                self.pressure,
                i.mole_fraction_vapor,
                i.mole_fraction_co2,
            )
        })
    }

    /// 비열비 κ [-]
    pub fn ratio_of_specific_heats(&self) -> f64 {
        let i = self.intermediates;
        cached(
            &self.cache.ratio_of_specific_heats,
            "ratio_of_specific_heats",
            || {
                rasmussen::ratio_of_specific_heats(
                    self.temperature,
                    self.pressure,
                    i.mole_fraction_vapor,
                    i.mole_fraction_co2,
                )
            },
        )
    }

    /// 점성계수 [Pa·s]
    pub fn viscosity(&self) -> f64 {
        let xw = self.intermediates.mole_fraction_vapor;
        cached(&self.cache.viscosity, "viscosity", || {
            rasmussen::viscosity(self.temperature_k(), xw)
        })
    }

    /// 열전도율 [W/(m·K)]
    pub fn thermal_conductivity(&self) -> f64 {
        let xw = self.intermediates.mole_fraction_vapor;
        cached(&self.cache.thermal_conductivity, "thermal_conductivity", || {
            rasmussen::thermal_conductivity(self.temperature_k(), xw)
        })
    }

    /// 정압비열 [J/(kg·K)]
    pub fn specific_heat_capacity(&self) -> f64 {
        let xw = self.intermediates.mole_fraction_vapor;
        cached(
            &self.cache.specific_heat_capacity,
            "specific_heat_capacity",
            || rasmussen::specific_heat_capacity(self.temperature_k(), xw),
        )
    }

    /// 캐시된 밀도. 아직 계산되지 않았으면 `None`.
    pub fn cached_density(&self) -> Option<f64> {
        self.cache.density.get()
    }

    /// 캐시된 음속. 아직 계산되지 않았으면 `None`.
    pub fn cached_celerity(&self) -> Option<f64> {
        self.cache.celerity.get()
    }

    /// 입력·중간 물성·출력 물성을 한 번에 모은다. 출력은 캐시를 거친다.
    pub fn properties(&self) -> AirProperties {
        AirProperties {
            saturation_vapor_pressure_pa: self.saturation_vapor_pressure(),
            enhancement_factor: self.enhancement_factor(),
            mole_fraction_vapor: self.mole_fraction_vapor(),
            compressibility_factor: self.compressibility_factor(),
            mole_fraction_co2: self.mole_fraction_co2(),
            density_kg_per_m3: self.density(),
            celerity_m_per_s: self.celerity(),
            ratio_of_specific_heats: self.ratio_of_specific_heats(),
            viscosity_pa_s: self.viscosity(),
            thermal_conductivity_w_per_m_k: self.thermal_conductivity(),
            specific_heat_capacity_j_per_kg_k: self.specific_heat_capacity(),
            conditions: self.conditions(),
        }
    }
}

/// 한 상태의 물성 스냅샷.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirProperties {
    pub saturation_vapor_pressure_pa: f64,
    pub enhancement_factor: f64,
    pub mole_fraction_vapor: f64,
    pub compressibility_factor: f64,
    pub mole_fraction_co2: f64,
    pub density_kg_per_m3: f64,
    pub celerity_m_per_s: f64,
    pub ratio_of_specific_heats: f64,
    pub viscosity_pa_s: f64,
    pub thermal_conductivity_w_per_m_k: f64,
    pub specific_heat_capacity_j_per_kg_k: f64,
    pub conditions: Conditions,
}
