use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

use services::{
    AppServices, Clock, GatewayConfig, SessionStoreService, SurveyGateway,
};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://survey.sqlite3";
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";
const DEFAULT_LANG: &str = "ko";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn store(&self) -> Arc<SessionStoreService> {
        Arc::clone(self.services.store())
    }

    fn gateway(&self) -> Arc<SurveyGateway> {
        Arc::clone(self.services.gateway())
    }

    fn clock(&self) -> Clock {
        self.services.clock()
    }
}

struct Args {
    db_url: String,
    base_url: String,
    lang: String,
    use_mock: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--db <sqlite_url>] [--base-url <url>] [--lang <code>] [--mock]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --base-url {DEFAULT_BASE_URL}");
    eprintln!("  --lang {DEFAULT_LANG}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SURVEY_DB_URL, SURVEY_API_BASE_URL, SURVEY_LANG, SURVEY_USE_MOCK");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("SURVEY_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut base_url =
            std::env::var("SURVEY_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mut lang = std::env::var("SURVEY_LANG").unwrap_or_else(|_| DEFAULT_LANG.into());
        let mut use_mock = std::env::var("SURVEY_USE_MOCK")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--base-url" => {
                    base_url = require_value(args, "--base-url")?;
                }
                "--lang" => {
                    lang = require_value(args, "--lang")?;
                }
                "--mock" => {
                    use_mock = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            base_url,
            lang,
            use_mock,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let gateway = if args.use_mock {
        info!(lang = %args.lang, "starting with the mock gateway");
        SurveyGateway::mock_with_lang(&args.lang)
    } else {
        info!(base_url = %args.base_url, lang = %args.lang, "starting with the live gateway");
        SurveyGateway::live(GatewayConfig::new(&args.base_url).with_lang(&args.lang))?
    };

    // Open + migrate SQLite at startup so the UI never sees a missing table.
    prepare_sqlite_file(&args.db_url)?;
    let services =
        AppServices::new_sqlite(&args.db_url, gateway, Clock::default_clock()).await?;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Survey")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
