//! slotwatch - check a booking calendar for open slots and push a
//! notification for every date that has some.
//!
//! Meant to be run periodically by an external scheduler (cron, systemd
//! timer). All settings come from the environment (or a `.env` file) and can
//! be overridden with flags.

mod notify;
mod scan;
mod source;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use clap::builder::BoolishValueParser;
use reqwest::Url;
use slotwatch_core::{DEFAULT_MIN_SEATS, PageExtractor, ParseFailurePolicy, YearMonth};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use notify::{ConsoleNotifier, Notifier, Pushover};
use scan::ScanSession;
use source::{BookingCalendar, BookingQuery};

#[derive(Parser, Debug)]
#[command(name = "slotwatch")]
#[command(about = "Check a booking calendar for open slots and send a push notification per date")]
struct Cli {
    /// Booking calendar endpoint
    #[arg(long, env = "VISA_URL")]
    url: Url,

    /// Months to check, comma separated (e.g. "2025-04,2025-05"). Defaults to the current month
    #[arg(long, env = "SCAN_MONTHS", value_delimiter = ',')]
    months: Vec<YearMonth>,

    /// Ignore offerings with fewer seats left than this
    #[arg(long, env = "MIN_SEATS", default_value_t = DEFAULT_MIN_SEATS)]
    min_seats: u32,

    /// Booking id sent to the calendar
    #[arg(long, env = "BOOKING_ID", default_value_t = 65)]
    booking_id: u32,

    #[arg(long, env = "ADULTS", default_value_t = 2)]
    adults: u32,

    #[arg(long, env = "CHILDREN", default_value_t = 0)]
    children: u32,

    #[arg(
        long,
        env = "PUSHOVER_API_KEY",
        hide_env_values = true,
        required_unless_present = "dry_run"
    )]
    pushover_api_key: Option<String>,

    #[arg(
        long,
        env = "PUSHOVER_USER_KEY",
        hide_env_values = true,
        required_unless_present = "dry_run"
    )]
    pushover_user_key: Option<String>,

    /// Stop the whole scan on an unreadable seat count instead of skipping the offering
    #[arg(long, env = "STRICT_PARSING", value_parser = boolish())]
    strict: bool,

    /// Print notifications instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, print one JSON object per notification
    #[arg(long, requires = "dry_run")]
    json: bool,
}

impl Cli {
    fn months(&self) -> Vec<YearMonth> {
        if self.months.is_empty() {
            vec![YearMonth::containing(Local::now().date_naive())]
        } else {
            self.months.clone()
        }
    }

    fn extractor(&self) -> PageExtractor {
        let policy = if self.strict {
            ParseFailurePolicy::Abort
        } else {
            ParseFailurePolicy::Skip
        };
        PageExtractor::new(self.min_seats, policy)
    }

    fn query(&self) -> BookingQuery {
        BookingQuery {
            booking_id: self.booking_id,
            adults: self.adults,
            children: self.children,
            ..BookingQuery::default()
        }
    }
}

/// Accepts `1`/`0`, `yes`/`no`, `on`/`off` as well as `true`/`false`.
fn boolish() -> BoolishValueParser {
    BoolishValueParser::new()
}

const DEFAULT_LOG_FILTER: &str = "slotwatch=info,slotwatch_core=info";

/// `RUST_LOG` when set, otherwise info for our own crates.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let months = cli.months();
    let source = BookingCalendar::new(cli.url.clone(), cli.query())?;

    if cli.dry_run {
        let notifier = ConsoleNotifier { json: cli.json };
        return scan(&cli, source, notifier, &months).await;
    }

    let (Some(api_key), Some(user_key)) =
        (cli.pushover_api_key.clone(), cli.pushover_user_key.clone())
    else {
        anyhow::bail!("PUSHOVER_API_KEY and PUSHOVER_USER_KEY are required unless --dry-run is set");
    };
    let notifier = Pushover::new(api_key, user_key)?;

    scan(&cli, source, notifier, &months).await
}

async fn scan(
    cli: &Cli,
    source: BookingCalendar,
    notifier: impl Notifier,
    months: &[YearMonth],
) -> Result<()> {
    let session = ScanSession::new(source, notifier, cli.extractor());
    let report = session.run(months).await?;

    tracing::info!(
        months_scanned = report.months_scanned,
        months_failed = report.months_failed,
        dates = report.dates_found,
        sent = report.notifications_sent,
        failed = report.notifications_failed,
        "Scan finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from([
            "slotwatch",
            "--url",
            "https://booking.example.com/calendar",
            "--months",
            "2025-04,2025-05",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(
            cli.months(),
            vec![YearMonth::new(2025, 4).unwrap(), YearMonth::new(2025, 5).unwrap()]
        );
        let extractor = cli.extractor();
        assert_eq!(extractor.min_seats, DEFAULT_MIN_SEATS);
        assert_eq!(extractor.policy, ParseFailurePolicy::Skip);
        assert_eq!(cli.query().booking_id, 65);
    }

    #[test]
    fn test_cli_rejects_bad_month() {
        let result = Cli::try_parse_from([
            "slotwatch",
            "--url",
            "https://booking.example.com/calendar",
            "--months",
            "2025-13",
            "--dry-run",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_strict_selects_abort() {
        let cli = Cli::try_parse_from([
            "slotwatch",
            "--url",
            "https://booking.example.com/calendar",
            "--months",
            "2025-04",
            "--min-seats",
            "4",
            "--strict",
            "--dry-run",
        ])
        .unwrap();

        let extractor = cli.extractor();
        assert_eq!(extractor.min_seats, 4);
        assert_eq!(extractor.policy, ParseFailurePolicy::Abort);
    }

    #[test]
    fn test_strict_env_values() {
        use clap::CommandFactory;
        use clap::builder::TypedValueParser;
        use std::ffi::OsStr;

        let cmd = Cli::command();
        for value in ["1", "true", "yes", "on"] {
            assert!(boolish().parse_ref(&cmd, None, OsStr::new(value)).unwrap(), "{value}");
        }
        for value in ["0", "false", "no", "off"] {
            assert!(!boolish().parse_ref(&cmd, None, OsStr::new(value)).unwrap(), "{value}");
        }
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        let filter = log_filter(Some("slotwatch=debug,slotwatch_core=trace")).to_string();
        assert!(filter.contains("slotwatch=debug"), "{filter}");
        assert!(filter.contains("slotwatch_core=trace"), "{filter}");
        assert!(!filter.contains("=info"), "{filter}");
    }

    #[test]
    fn test_log_filter_default() {
        for rust_log in [None, Some(""), Some("  ")] {
            let filter = log_filter(rust_log).to_string();
            assert!(filter.contains("slotwatch=info"), "{filter}");
            assert!(filter.contains("slotwatch_core=info"), "{filter}");
        }
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
