//! CLI entry point for the course-mapping hours tool.
//!
//! Provides subcommands for summarising mappings fetched from the admin API
//! or loaded from JSON exports, and for listing the available filter values.

mod infra;
mod services;

use crate::infra::api::client::RestApiClient;
use crate::infra::config::ApiConfig;
use crate::services::mapping_api::MappingApi;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mapping_hours::mapping::{
    CourseMappingRecord, CourseMetadata, MappingFilters, MappingGroup, aggregate,
    course_hours_index, filter_options,
};
use mapping_hours::output::{append_summaries, gzip_file, print_json, print_pretty, summary_rows};
use mapping_hours::parser::{parse_courses, parse_mappings};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "mapping_hours")]
#[command(about = "Summarise lecturer course mappings into hours assigned vs needed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch mappings and courses from the admin API and summarise them
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Summarise mappings and courses from local JSON exports
    Local {
        /// JSON file with course mappings (array or `data` envelope)
        #[arg(value_name = "MAPPINGS_JSON")]
        mappings: PathBuf,

        /// JSON file with courses (array or `data` envelope)
        #[arg(value_name = "COURSES_JSON")]
        courses: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List academic years, terms and statuses present in the API data
    Options,
}

#[derive(Args)]
struct FilterArgs {
    /// Academic year, e.g. "2024-2025", or ALL
    #[arg(short = 'y', long, default_value = "ALL")]
    academic_year: String,

    /// Term label, e.g. "1", or ALL
    #[arg(short, long, default_value = "ALL")]
    term: String,

    /// Pending, Contacting, Accepted, Rejected, or ALL
    #[arg(short, long, default_value = "ALL")]
    status: String,
}

impl FilterArgs {
    fn to_filters(&self) -> MappingFilters {
        MappingFilters::new(&self.academic_year, &self.term, &self.status)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// CSV file to append one row per group to (JSON to stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write a gzip-compressed copy of the CSV file
    #[arg(long, default_value_t = false, requires = "output")]
    gzip: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mapping_hours.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mapping_hours.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { filters, output } => {
            let client = RestApiClient::new(ApiConfig::from_env()?)?;
            let (records, courses) =
                tokio::try_join!(client.list_course_mappings(), client.list_courses())?;

            summarise(&records, &courses, &filters.to_filters(), &output)?;
        }
        Commands::Local {
            mappings,
            courses,
            filters,
            output,
        } => {
            let (records, courses) = load_snapshot(&mappings, &courses)?;

            summarise(&records, &courses, &filters.to_filters(), &output)?;
        }
        Commands::Options => {
            let client = RestApiClient::new(ApiConfig::from_env()?)?;
            let records = client.list_course_mappings().await?;
            let options = filter_options(&records);

            info!(
                academic_years = options.academic_years.len(),
                terms = options.terms.len(),
                statuses = options.statuses.len(),
                "Filter options"
            );
            print_json(&options)?;
        }
    }

    Ok(())
}

/// Reads mapping and course exports from disk.
#[tracing::instrument(skip_all, fields(mappings = %mappings.display(), courses = %courses.display()))]
fn load_snapshot(
    mappings: &Path,
    courses: &Path,
) -> Result<(Vec<CourseMappingRecord>, Vec<CourseMetadata>)> {
    let mapping_bytes =
        std::fs::read(mappings).with_context(|| format!("cannot read {}", mappings.display()))?;
    let course_bytes =
        std::fs::read(courses).with_context(|| format!("cannot read {}", courses.display()))?;

    Ok((parse_mappings(&mapping_bytes)?, parse_courses(&course_bytes)?))
}

/// Aggregates a snapshot and emits it as JSON on stdout or CSV rows on disk.
#[tracing::instrument(skip_all, fields(records = records.len(), courses = courses.len()))]
fn summarise(
    records: &[CourseMappingRecord],
    courses: &[CourseMetadata],
    filters: &MappingFilters,
    output: &OutputArgs,
) -> Result<()> {
    let course_hours = course_hours_index(courses);
    let groups = aggregate(records, &course_hours, filters);

    let entries: usize = groups.iter().map(|g| g.stats.total).sum();
    let (hours_assigned, hours_needed) = hours_totals(&groups);
    info!(
        groups = groups.len(),
        entries,
        hours_assigned,
        hours_needed,
        "Mappings aggregated"
    );
    if groups.is_empty() {
        warn!(?filters, "No mappings match the filters");
    }
    print_pretty(&groups);

    match &output.output {
        Some(path) => {
            append_summaries(path, &summary_rows(&groups))?;
            info!(path = %path.display(), rows = groups.len(), "Summary rows written");
            if output.gzip {
                let gz_path = gzip_file(path)?;
                info!(path = %gz_path.display(), "Gzip copy written");
            }
        }
        None => print_json(&groups)?,
    }

    Ok(())
}

/// Hours assigned and needed across all groups, saturating like [`GroupStats`].
///
/// [`GroupStats`]: mapping_hours::stats::GroupStats
fn hours_totals(groups: &[MappingGroup]) -> (u32, u32) {
    groups.iter().fold((0u32, 0u32), |(assigned, needed), g| {
        (
            assigned.saturating_add(g.stats.hours_assigned),
            needed.saturating_add(g.stats.hours_needed),
        )
    })
}
