use crate::air::{AirState, AirStateError, Conditions};
use crate::config::{Config, ConfigError, OutputFormat};
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 엄격 모드에서 물리 범위 검사 실패
    Validation(AirStateError),
    /// 결과 직렬화 오류
    Render(toml::ser::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Validation(e) => write!(f, "입력 검사 오류: {e}"),
            AppError::Render(e) => write!(f, "출력 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<AirStateError> for AppError {
    fn from(value: AirStateError) -> Self {
        AppError::Validation(value)
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(value: toml::ser::Error) -> Self {
        AppError::Render(value)
    }
}

/// 한 번의 실행에 적용되는 옵션. 설정 파일 값에 CLI 인자를 덮어쓴 결과다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    pub conditions: Conditions,
    pub format: OutputFormat,
    pub strict: bool,
    pub interactive: bool,
}

impl Session {
    /// 설정값을 그대로 사용하는 세션.
    pub fn from_config(config: &Config) -> Self {
        Self {
            conditions: config.reference,
            format: config.output,
            strict: config.strict,
            interactive: false,
        }
    }
}

/// 세션 조건으로 물성을 계산해 문자열로 만든다.
pub fn report(tr: &Translator, session: &Session) -> Result<String, AppError> {
    admit(tr, &session.conditions, session.strict)?;
    let air = AirState::from_conditions(session.conditions);
    ui_cli::render(tr, &air.properties(), session.format)
}

/// CLI 애플리케이션을 실행한다.
pub fn run(config: &mut Config, tr: &Translator, session: Session) -> Result<(), AppError> {
    if !session.interactive {
        println!("{}", report(tr, &session)?);
        return Ok(());
    }

    admit(tr, &session.conditions, session.strict)?;
    let mut air = AirState::from_conditions(session.conditions);
    loop {
        let choice = ui_cli::main_menu(tr)?;
        let mut candidate = air.conditions();
        match choice {
            MenuChoice::SetTemperature => {
                candidate.temperature_c = ui_cli::read_f64(tr, keys::PROMPT_TEMPERATURE)?;
            }
            MenuChoice::SetPressure => {
                candidate.pressure_pa = ui_cli::read_f64(tr, keys::PROMPT_PRESSURE)?;
            }
            MenuChoice::SetHumidity => {
                candidate.humidity_pct = ui_cli::read_f64(tr, keys::PROMPT_HUMIDITY)?;
            }
            MenuChoice::Show => {
                println!("{}", ui_cli::render(tr, &air.properties(), session.format)?);
                continue;
            }
            MenuChoice::SaveReference => {
                config.reference = air.conditions();
                config.save()?;
                println!("{}", tr.t(keys::REFERENCE_SAVED));
                continue;
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }

        if let Err(err) = admit(tr, &candidate, session.strict) {
            println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            continue;
        }
        apply(&mut air, choice, &candidate);
    }
    Ok(())
}

/// 메뉴 선택에 해당하는 독립 변수 하나만 상태에 반영한다.
fn apply(air: &mut AirState, choice: MenuChoice, candidate: &Conditions) {
    match choice {
        MenuChoice::SetTemperature => air.set_temperature(candidate.temperature_c),
        MenuChoice::SetPressure => air.set_pressure(candidate.pressure_pa),
        MenuChoice::SetHumidity => air.set_humidity(candidate.humidity_pct),
        MenuChoice::Show | MenuChoice::SaveReference | MenuChoice::Exit => {}
    }
}

/// 엄격 모드면 범위 밖 입력을 거부하고, 아니면 경고만 남긴다.
fn admit(tr: &Translator, conditions: &Conditions, strict: bool) -> Result<(), AppError> {
    match conditions.check_physical() {
        Ok(()) => Ok(()),
        Err(err) if strict => Err(err.into()),
        Err(err) => {
            tracing::warn!(%err, "computing with out-of-range input");
            eprintln!("{}: {err}", tr.t(keys::WARN_OUT_OF_RANGE));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(conditions: Conditions, strict: bool) -> Session {
        Session {
            conditions,
            format: OutputFormat::Toml,
            strict,
            interactive: false,
        }
    }

    #[test]
    fn strict_session_rejects_negative_pressure() {
        let tr = Translator::new("en");
        let bad = Conditions {
            pressure_pa: -1.0,
            ..Conditions::default()
        };
        let err = report(&tr, &session(bad, true)).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(AirStateError::NonPositivePressure(_))
        ));
    }

    #[test]
    fn lenient_session_still_reports_out_of_range_input() {
        let tr = Translator::new("en");
        let wet = Conditions {
            humidity_pct: 120.0,
            ..Conditions::default()
        };
        let out = report(&tr, &session(wet, false)).expect("report");
        assert!(out.contains("humidity_pct = 120.0"));
    }

    #[test]
    fn apply_touches_only_selected_variable() {
        let mut air = AirState::default();
        let candidate = Conditions {
            temperature_c: 5.0,
            pressure_pa: 90_000.0,
            humidity_pct: 50.0,
        };
        apply(&mut air, MenuChoice::SetPressure, &candidate);
        assert_eq!(air.pressure(), 90_000.0);
        assert_eq!(air.temperature(), 20.0);
        assert_eq!(air.humidity(), 0.0);
    }
}
