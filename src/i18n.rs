use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SET_TEMPERATURE: &str = "main_menu.set_temperature";
    pub const MAIN_MENU_SET_PRESSURE: &str = "main_menu.set_pressure";
    pub const MAIN_MENU_SET_HUMIDITY: &str = "main_menu.set_humidity";
    pub const MAIN_MENU_SHOW: &str = "main_menu.show";
    pub const MAIN_MENU_SAVE_REFERENCE: &str = "main_menu.save_reference";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_HUMIDITY: &str = "prompt.humidity";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const REFERENCE_SAVED: &str = "settings.reference_saved";
    pub const WARN_OUT_OF_RANGE: &str = "warning.out_of_range";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const REPORT_INPUTS: &str = "report.inputs";
    pub const REPORT_INTERMEDIATES: &str = "report.intermediates";
    pub const REPORT_OUTPUTS: &str = "report.outputs";

    pub const LABEL_TEMPERATURE: &str = "label.temperature";
    pub const LABEL_PRESSURE: &str = "label.pressure";
    pub const LABEL_HUMIDITY: &str = "label.humidity";
    pub const LABEL_SATURATION_VAPOR_PRESSURE: &str = "label.saturation_vapor_pressure";
    pub const LABEL_ENHANCEMENT_FACTOR: &str = "label.enhancement_factor";
    pub const LABEL_MOLE_FRACTION_VAPOR: &str = "label.mole_fraction_vapor";
    pub const LABEL_COMPRESSIBILITY_FACTOR: &str = "label.compressibility_factor";
    pub const LABEL_MOLE_FRACTION_CO2: &str = "label.mole_fraction_co2";
    pub const LABEL_DENSITY: &str = "label.density";
    pub const LABEL_CELERITY: &str = "label.celerity";
    pub const LABEL_RATIO_OF_SPECIFIC_HEATS: &str = "label.ratio_of_specific_heats";
    pub const LABEL_VISCOSITY: &str = "label.viscosity";
    pub const LABEL_THERMAL_CONDUCTIVITY: &str = "label.thermal_conductivity";
    pub const LABEL_SPECIFIC_HEAT_CAPACITY: &str = "label.specific_heat_capacity";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 항목이 내장 문자열보다 우선한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 아래 key = "value".
/// 중첩 테이블은 점으로 이은 키(`label.density`)로 펼친다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let table: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "language pack ignored");
            return None;
        }
    };

    let mut map = HashMap::new();
    let mut pending: Vec<(String, toml::Value)> = table.into_iter().collect();
    while let Some((key, value)) = pending.pop() {
        match value {
            toml::Value::String(s) => {
                map.insert(key, s);
            }
            toml::Value::Table(t) => {
                pending.extend(t.into_iter().map(|(k, v)| (format!("{key}.{k}"), v)));
            }
            _ => {}
        }
    }
    (!map.is_empty()).then_some(map)
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Humid Air Toolbox ===",
        MAIN_MENU_SET_TEMPERATURE => "1) 온도 변경",
        MAIN_MENU_SET_PRESSURE => "2) 압력 변경",
        MAIN_MENU_SET_HUMIDITY => "3) 상대습도 변경",
        MAIN_MENU_SHOW => "4) 물성 보기",
        MAIN_MENU_SAVE_REFERENCE => "5) 현재 상태를 기준 조건으로 저장",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PROMPT_TEMPERATURE => "온도 [°C]: ",
        PROMPT_PRESSURE => "압력 [Pa]: ",
        PROMPT_HUMIDITY => "상대습도 [%]: ",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        REFERENCE_SAVED => "기준 조건을 저장했습니다.",
        WARN_OUT_OF_RANGE => "경고: 물리 범위를 벗어난 입력입니다",
        REPORT_HEADING => "\n-- 습공기 물성 (Rasmussen 1997) --",
        REPORT_INPUTS => "[입력]",
        REPORT_INTERMEDIATES => "[중간 물성]",
        REPORT_OUTPUTS => "[출력 물성]",
        LABEL_TEMPERATURE => "온도",
        LABEL_PRESSURE => "압력",
        LABEL_HUMIDITY => "상대습도",
        LABEL_SATURATION_VAPOR_PRESSURE => "포화 수증기압",
        LABEL_ENHANCEMENT_FACTOR => "증강 계수",
        LABEL_MOLE_FRACTION_VAPOR => "수증기 몰분율",
        LABEL_COMPRESSIBILITY_FACTOR => "압축 계수",
        LABEL_MOLE_FRACTION_CO2 => "CO2 몰분율",
        LABEL_DENSITY => "밀도",
        LABEL_CELERITY => "음속",
        LABEL_RATIO_OF_SPECIFIC_HEATS => "비열비",
        LABEL_VISCOSITY => "점성계수",
        LABEL_THERMAL_CONDUCTIVITY => "열전도율",
        LABEL_SPECIFIC_HEAT_CAPACITY => "정압비열",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Humid Air Toolbox ===",
        MAIN_MENU_SET_TEMPERATURE => "1) Set temperature",
        MAIN_MENU_SET_PRESSURE => "2) Set pressure",
        MAIN_MENU_SET_HUMIDITY => "3) Set relative humidity",
        MAIN_MENU_SHOW => "4) Show properties",
        MAIN_MENU_SAVE_REFERENCE => "5) Save current state as reference",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        PROMPT_TEMPERATURE => "Temperature [°C]: ",
        PROMPT_PRESSURE => "Pressure [Pa]: ",
        PROMPT_HUMIDITY => "Relative humidity [%]: ",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        REFERENCE_SAVED => "Reference conditions saved.",
        WARN_OUT_OF_RANGE => "Warning: input outside physical range",
        REPORT_HEADING => "\n-- Humid air properties (Rasmussen 1997) --",
        REPORT_INPUTS => "[Inputs]",
        REPORT_INTERMEDIATES => "[Intermediates]",
        REPORT_OUTPUTS => "[Outputs]",
        LABEL_TEMPERATURE => "Temperature",
        LABEL_PRESSURE => "Pressure",
        LABEL_HUMIDITY => "Relative humidity",
        LABEL_SATURATION_VAPOR_PRESSURE => "Saturation vapor pressure",
        LABEL_ENHANCEMENT_FACTOR => "Enhancement factor",
        LABEL_MOLE_FRACTION_VAPOR => "Water vapor mole fraction",
        LABEL_COMPRESSIBILITY_FACTOR => "Compressibility factor",
        LABEL_MOLE_FRACTION_CO2 => "CO2 mole fraction",
        LABEL_DENSITY => "Density",
        LABEL_CELERITY => "Speed of sound",
        LABEL_RATIO_OF_SPECIFIC_HEATS => "Ratio of specific heats",
        LABEL_VISCOSITY => "Viscosity",
        LABEL_THERMAL_CONDUCTIVITY => "Thermal conductivity",
        LABEL_SPECIFIC_HEAT_CAPACITY => "Specific heat capacity",
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-us")), "en");
    }

    #[test]
    fn locale_strings_are_reduced_to_base_language() {
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko"));
        assert_eq!(normalize_locale_string("en-GB").as_deref(), Some("en"));
        assert_eq!(normalize_locale_string("fr_FR"), None);
    }

    #[test]
    fn language_pack_from_flag_directory_overrides_built_in_text() {
        let dir = std::env::temp_dir().join(format!("humid_air_locales_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        fs::write(
            dir.join("en.toml"),
            "[label]\ndensity = \"Air density\"\n[report]\nheading = 7\n",
        )
        .expect("write pack");

        let tr = Translator::new_with_pack("en", Some(&dir));
        assert_eq!(tr.t(keys::LABEL_DENSITY), "Air density");
        // 문자열이 아닌 값과 팩에 없는 키는 내장 문자열을 쓴다.
        assert_eq!(tr.t(keys::REPORT_HEADING), en(keys::REPORT_HEADING));
        assert_eq!(tr.t(keys::LABEL_CELERITY), "Speed of sound");

        let missing = Translator::new_with_pack("ko", Some(&dir));
        assert_eq!(missing.t(keys::LABEL_DENSITY), "밀도");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn english_strings_cover_report_and_menu() {
        let tr = Translator::new("en");
        for key in [keys::LABEL_CELERITY, keys::REPORT_HEADING, keys::MAIN_MENU_EXIT] {
            assert_ne!(tr.t(key), "???");
        }
    }
}
