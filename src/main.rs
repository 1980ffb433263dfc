use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use humid_air_toolbox::app::{self, Session};
use humid_air_toolbox::config::{self, OutputFormat};
use humid_air_toolbox::i18n::{self, keys, Translator};
use tracing_subscriber::EnvFilter;

/// Rasmussen(1997) 모델로 습공기의 밀도와 음속을 계산한다.
#[derive(Debug, Parser)]
#[command(name = "humid_air_toolbox", version, about)]
struct Cli {
    /// 온도 [°C]
    #[arg(short = 't', long, allow_negative_numbers = true)]
    temperature: Option<f64>,
    /// 대기압 [Pa]
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pressure: Option<f64>,
    /// 상대습도 [%]
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    humidity: Option<f64>,
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 출력 언어 (ko, en, auto)
    #[arg(long)]
    lang: Option<String>,
    /// 언어팩 디렉터리 (<dir>/<언어>.toml). 없으면 ./locales 를 찾는다.
    #[arg(long)]
    locales: Option<PathBuf>,
    /// 출력 형식
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// 물리 범위를 벗어난 입력을 오류로 처리
    #[arg(long)]
    strict: bool,
    /// 대화형 메뉴 실행
    #[arg(short = 'i', long)]
    interactive: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Toml,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Toml => OutputFormat::Toml,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{}: {err}", Translator::new("en").t(keys::ERROR_PREFIX));
            std::process::exit(1);
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), cfg.language.as_deref());
    let tr = Translator::new_with_pack(&lang, cli.locales.as_deref());
    tracing::debug!(language = tr.language().as_code(), "translator ready");

    let session = session_from(&cli, &cfg);
    if let Err(err) = app::run(&mut cfg, &tr, session) {
        eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        std::process::exit(1);
    }
}

fn session_from(cli: &Cli, cfg: &config::Config) -> Session {
    let mut session = Session::from_config(cfg);
    if let Some(t) = cli.temperature {
        session.conditions.temperature_c = t;
    }
    if let Some(p) = cli.pressure {
        session.conditions.pressure_pa = p;
    }
    if let Some(h) = cli.humidity {
        session.conditions.humidity_pct = h;
    }
    if let Some(format) = cli.format {
        session.format = format.into();
    }
    session.strict |= cli.strict;
    session.interactive = cli.interactive;
    session
}
