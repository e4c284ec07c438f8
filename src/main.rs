use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use chrono::Local;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use classcal::{
    app::App,
    app_dirs::AppDirs,
    calendar::YearMonth,
    config::{Config, ConfigStore, FileConfigStore, Overrides},
    loader, logging,
    runtime::{self, CrosstermEventSource, Runner},
    source::{FileSource, HttpSource, TextSource},
};

const POLL_INTERVAL_MS: u64 = 250;

/// calendar, comments and reschedules for one student's classes
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Shows one student's classes from a published schedule sheet as a month calendar and a list of teacher comments, with a detail view per class."
)]
pub struct Cli {
    /// student whose classes to show
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// URL of the published CSV export
    #[clap(short = 'u', long)]
    url: Option<String>,

    /// read the CSV export from a local file instead of the URL
    #[clap(short = 'f', long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// month to open the calendar on, as YYYY-MM (default: current month)
    #[clap(short = 'm', long)]
    month: Option<YearMonth>,

    /// numeric dates in the sheet are day/month/year rather than month/day/year
    #[clap(long)]
    day_first: bool,

    /// seconds to wait for the download
    #[clap(long)]
    timeout: Option<u64>,

    /// store the effective url, name, date order and timeout as defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            source_url: self.url.clone(),
            student: self.name.clone(),
            day_first: self.day_first,
            fetch_timeout_secs: self.timeout,
        }
    }

    fn source(&self, config: &Config) -> Box<dyn TextSource> {
        match &self.file {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(HttpSource::new(
                config.source_url.clone(),
                Duration::from_secs(config.fetch_timeout_secs),
            )),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        // logging is best effort; the viewer works without it
        let _ = logging::init_file_logging(&path);
    }

    let store = FileConfigStore::new();
    let config = store.load().merged(&cli.overrides());
    if cli.save_config {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    let source = cli.source(&config);
    let state = loader::load(config.student.as_deref(), source.as_ref(), config.date_order);

    let today = Local::now().date_naive();
    let month = cli.month.unwrap_or_else(|| YearMonth::of(today));
    let mut app = App::new(state, month, today);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(POLL_INTERVAL_MS),
    );
    let result = runtime::run(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classcal::dates::DateOrder;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["classcal"]);

        assert_eq!(cli.name, None);
        assert_eq!(cli.url, None);
        assert_eq!(cli.file, None);
        assert_eq!(cli.month, None);
        assert!(!cli.day_first);
        assert_eq!(cli.timeout, None);
        assert!(!cli.save_config);
        assert_eq!(cli.overrides(), Overrides::default());
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::parse_from(["classcal", "-n", "Ann"]);
        assert_eq!(cli.name.as_deref(), Some("Ann"));

        let cli = Cli::parse_from(["classcal", "--name", "Bob"]);
        assert_eq!(cli.name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_cli_month() {
        let cli = Cli::parse_from(["classcal", "-m", "2024-05"]);
        assert_eq!(cli.month, YearMonth::new(2024, 5));

        let err = Cli::try_parse_from(["classcal", "--month", "2024-13"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_file_conflicts_with_url() {
        let err = Cli::try_parse_from([
            "classcal",
            "--file",
            "sheet.csv",
            "--url",
            "https://example.test",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_overrides_merge_into_config() {
        let cli = Cli::parse_from([
            "classcal",
            "-n",
            "Ann",
            "-u",
            "https://example.test/x.csv",
            "--day-first",
            "--timeout",
            "4",
        ]);
        let config = Config::default().merged(&cli.overrides());

        assert_eq!(config.student.as_deref(), Some("Ann"));
        assert_eq!(config.source_url, "https://example.test/x.csv");
        assert_eq!(config.date_order, DateOrder::DayFirst);
        assert_eq!(config.fetch_timeout_secs, 4);
    }

    #[test]
    fn test_cli_file_source() {
        let cli = Cli::parse_from(["classcal", "-f", "/tmp/sheet.csv"]);
        let source = cli.source(&Config::default());
        assert_eq!(source.describe(), "/tmp/sheet.csv");

        let cli = Cli::parse_from(["classcal"]);
        let source = cli.source(&Config::default());
        assert_eq!(source.describe(), classcal::source::DEFAULT_SHEET_URL);
    }
}
