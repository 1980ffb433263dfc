//! 중간 물성 재계산과 출력 캐시 무효화 동작을 검증한다.
use approx::assert_relative_eq;
use humid_air_toolbox::air::{AirState, AirStateError, Conditions, MOLE_FRACTION_CO2};

#[test]
fn defaults_match_reference_condition() {
    let air = AirState::default();
    assert_eq!(air.temperature(), 20.0);
    assert_eq!(air.pressure(), 101_325.0);
    assert_eq!(air.humidity(), 0.0);
    assert_eq!(air.mole_fraction_vapor(), 0.0);
    assert_eq!(air.mole_fraction_co2(), 0.0004);
    assert_relative_eq!(air.celerity(), 343.2, epsilon = 0.5);
    assert_relative_eq!(air.density(), 1.204, epsilon = 0.01);
}

#[test]
fn outputs_start_unset_and_are_cached_after_first_read() {
    let air = AirState::default();
    assert_eq!(air.cached_density(), None);
    assert_eq!(air.cached_celerity(), None);

    let rho = air.density();
    assert_eq!(air.cached_density(), Some(rho));
    assert_eq!(air.cached_celerity(), None);

    let c = air.celerity();
    assert_eq!(air.density().to_bits(), rho.to_bits());
    assert_eq!(air.celerity().to_bits(), c.to_bits());
}

#[test]
fn every_setter_invalidates_cached_outputs() {
    let mut air = AirState::new(20.0, 101_325.0, 40.0);
    let setters: [fn(&mut AirState); 3] = [
        |a: &mut AirState| a.set_temperature(25.0),
        |a: &mut AirState| a.set_pressure(95_000.0),
        |a: &mut AirState| a.set_humidity(80.0),
    ];
    for set in setters {
        let rho_before = air.density();
        let c_before = air.celerity();
        set(&mut air);
        assert_eq!(air.cached_density(), None);
        assert_eq!(air.cached_celerity(), None);
        assert_ne!(air.density(), rho_before);
        assert_ne!(air.celerity(), c_before);
    }
}

#[test]
fn cooling_to_10c_lowers_celerity_like_a_fresh_state() {
    let mut air = AirState::new(20.0, 101_325.0, 0.0);
    let c20 = air.celerity();
    air.set_temperature(10.0);
    let c10 = air.celerity();

    assert!(c10 < c20, "c10={c10} c20={c20}");
    assert_eq!(c10, AirState::new(10.0, 101_325.0, 0.0).celerity());
    assert_relative_eq!(c10, 337.523_803_344_840_64, max_relative = 1e-12);
}

#[test]
fn intermediates_follow_the_latest_inputs() {
    let mut air = AirState::new(15.0, 100_000.0, 30.0);
    air.set_humidity(60.0);
    air.set_pressure(98_000.0);
    air.set_temperature(22.0);
    let fresh = AirState::new(22.0, 98_000.0, 60.0);

    assert_eq!(air.saturation_vapor_pressure(), fresh.saturation_vapor_pressure());
    assert_eq!(air.enhancement_factor(), fresh.enhancement_factor());
    assert_eq!(air.mole_fraction_vapor(), fresh.mole_fraction_vapor());
    assert_eq!(air.compressibility_factor(), fresh.compressibility_factor());
    assert_eq!(air.properties(), fresh.properties());
}

#[test]
fn co2_fraction_never_changes() {
    let mut air = AirState::default();
    for (t, p, h) in [(-30.0, 80_000.0, 10.0), (45.0, 110_000.0, 95.0), (0.0, 1.0, 0.0)] {
        air.set_temperature(t);
        air.set_pressure(p);
        air.set_humidity(h);
        assert_eq!(air.mole_fraction_co2(), MOLE_FRACTION_CO2);
    }
}

#[test]
fn humidity_raises_celerity_and_lowers_density() {
    let dry = AirState::new(23.0, 101_325.0, 0.0);
    let humid = AirState::new(23.0, 101_325.0, 50.0);
    assert!(humid.celerity() > dry.celerity());
    assert!(humid.density() < dry.density());
}

#[test]
fn degenerate_inputs_propagate_without_error() {
    let vacuum = AirState::new(20.0, 0.0, 50.0);
    assert!(!vacuum.mole_fraction_vapor().is_finite());
    assert!(vacuum.density().is_nan());

    let absolute_zero = AirState::new(-273.15, 101_325.0, 0.0);
    assert!(!absolute_zero.density().is_finite());
    assert!(absolute_zero.check_physical().is_err());
}

#[test]
fn physical_check_is_opt_in_and_specific() {
    let ok = Conditions::default();
    assert_eq!(ok.check_physical(), Ok(()));

    let wet = Conditions {
        humidity_pct: 101.0,
        ..ok
    };
    assert_eq!(
        wet.check_physical(),
        Err(AirStateError::HumidityOutOfRange(101.0))
    );

    let cold = Conditions {
        temperature_c: -300.0,
        ..ok
    };
    assert_eq!(
        cold.check_physical(),
        Err(AirStateError::BelowAbsoluteZero(-300.0))
    );

    let nan = Conditions {
        pressure_pa: f64::NAN,
        ..ok
    };
    assert_eq!(nan.check_physical(), Err(AirStateError::NonFinite("pressure")));

    // 검사에 실패해도 계산은 그대로 수행된다.
    let air = AirState::from_conditions(wet);
    assert!(air.density().is_finite());
    assert_eq!(air.conditions(), wet);
}

#[test]
fn properties_snapshot_goes_through_cache() {
    let air = AirState::new(18.0, 101_000.0, 35.0);
    let props = air.properties();
    assert_eq!(air.cached_density(), Some(props.density_kg_per_m3));
    assert_eq!(air.cached_celerity(), Some(props.celerity_m_per_s));
    assert_relative_eq!(
        props.specific_heat_capacity_j_per_kg_k / props.ratio_of_specific_heats,
        air.specific_heat_capacity() / air.ratio_of_specific_heats()
    );
}
