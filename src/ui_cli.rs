use std::fmt::Write as _;
use std::io::{self, Write};

use crate::air::AirProperties;
use crate::app::AppError;
use crate::config::OutputFormat;
use crate::i18n::{keys, Translator};

/// 대화형 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SetTemperature,
    SetPressure,
    SetHumidity,
    Show,
    SaveReference,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_SET_TEMPERATURE,
        keys::MAIN_MENU_SET_PRESSURE,
        keys::MAIN_MENU_SET_HUMIDITY,
        keys::MAIN_MENU_SHOW,
        keys::MAIN_MENU_SAVE_REFERENCE,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::SetTemperature),
        "2" => Some(MenuChoice::SetPressure),
        "3" => Some(MenuChoice::SetHumidity),
        "4" => Some(MenuChoice::Show),
        "5" => Some(MenuChoice::SaveReference),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 숫자를 입력받는다. 숫자가 아니면 다시 묻는다.
pub fn read_f64(tr: &Translator, prompt_key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(tr.t(prompt_key))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
    }
    Ok(buf)
}

/// 물성 스냅샷을 지정한 형식의 문자열로 만든다.
pub fn render(
    tr: &Translator,
    props: &AirProperties,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Text => Ok(render_text(tr, props)),
        OutputFormat::Toml => Ok(toml::to_string_pretty(props)?),
    }
}

/// 사람이 읽는 표 형식 보고서.
pub fn render_text(tr: &Translator, props: &AirProperties) -> String {
    let c = &props.conditions;
    let inputs = [
        (tr.t(keys::LABEL_TEMPERATURE), format!("{:.2}", c.temperature_c), "°C"),
        (tr.t(keys::LABEL_PRESSURE), format!("{:.1}", c.pressure_pa), "Pa"),
        (tr.t(keys::LABEL_HUMIDITY), format!("{:.1}", c.humidity_pct), "%"),
    ];
    let intermediates = [
        (
            tr.t(keys::LABEL_SATURATION_VAPOR_PRESSURE),
            format!("{:.3}", props.saturation_vapor_pressure_pa),
            "Pa",
        ),
        (
            tr.t(keys::LABEL_ENHANCEMENT_FACTOR),
            format!("{:.6}", props.enhancement_factor),
            "",
        ),
        (
            tr.t(keys::LABEL_MOLE_FRACTION_VAPOR),
            format!("{:.6}", props.mole_fraction_vapor),
            "",
        ),
        (
            tr.t(keys::LABEL_COMPRESSIBILITY_FACTOR),
            format!("{:.8}", props.compressibility_factor),
            "",
        ),
        (
            tr.t(keys::LABEL_MOLE_FRACTION_CO2),
            format!("{:.4}", props.mole_fraction_co2),
            "",
        ),
    ];
    let outputs = [
        (
            tr.t(keys::LABEL_DENSITY),
            format!("{:.5}", props.density_kg_per_m3),
            "kg/m3",
        ),
        (
            tr.t(keys::LABEL_CELERITY),
            format!("{:.3}", props.celerity_m_per_s),
            "m/s",
        ),
        (
            tr.t(keys::LABEL_RATIO_OF_SPECIFIC_HEATS),
            format!("{:.5}", props.ratio_of_specific_heats),
            "",
        ),
        (
            tr.t(keys::LABEL_VISCOSITY),
            format!("{:.4e}", props.viscosity_pa_s),
            "Pa·s",
        ),
        (
            tr.t(keys::LABEL_THERMAL_CONDUCTIVITY),
            format!("{:.5}", props.thermal_conductivity_w_per_m_k),
            "W/(m·K)",
        ),
        (
            tr.t(keys::LABEL_SPECIFIC_HEAT_CAPACITY),
            format!("{:.2}", props.specific_heat_capacity_j_per_kg_k),
            "J/(kg·K)",
        ),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::REPORT_HEADING));
    push_section(&mut out, tr.t(keys::REPORT_INPUTS), &inputs);
    push_section(&mut out, tr.t(keys::REPORT_INTERMEDIATES), &intermediates);
    push_section(&mut out, tr.t(keys::REPORT_OUTPUTS), &outputs);
    out
}

fn push_section(out: &mut String, heading: &str, rows: &[(&str, String, &str)]) {
    let _ = writeln!(out, "{heading}");
    for (label, value, unit) in rows {
        let _ = writeln!(out, "  {label:<28} {value:>14} {unit}");
    }
}
