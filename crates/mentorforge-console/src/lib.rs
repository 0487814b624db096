//! Colorful console output for matching runs.
//!
//! Provides a custom `tracing` layer that formats MentorForge events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (model built, solve start/end)
//! - **DEBUG**: Files read and written, backend statistics
//! - **WARN**: Runs that end without a matching

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Events from targets with this prefix are formatted.
const TARGET_PREFIX: &str = "mentorforge";

/// Initializes console output at INFO.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_level(LevelFilter::INFO);
}

/// Initializes console output, showing MentorForge events at `level` and above.
///
/// `RUST_LOG` overrides `level` when set. Safe to call multiple times - only
/// the first call has effect.
pub fn init_with_level(level: LevelFilter) {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{TARGET_PREFIX}={level}")));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(MatchConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 __  __            _             _____
|  \/  | ___ _ __ | |_ ___  _ __|  ___|__  _ __ __ _  ___
| |\/| |/ _ \ '_ \| __/ _ \| '__| |_ / _ \| '__/ _` |/ _ \
| |  | |  __/ | | | || (_) | |  |  _| (_) | | | (_| |  __/
|_|  |_|\___|_| |_|\__\___/|_|  |_|  \___/|_|  \__, |\___|
                                               |___/
"#;

    let version_line = format!("                   v{} - Mentor/Team Matching\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats MentorForge events with colors.
pub struct MatchConsoleLayer;

impl<S: Subscriber> Layer<S> for MatchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(TARGET_PREFIX) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    status: Option<String>,
    path: Option<String>,
    mentors: Option<u64>,
    teams: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    count: Option<u64>,
    rows: Option<u64>,
    nodes: Option<u64>,
    elapsed_ms: Option<u64>,
    objective: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "backend" => self.backend = Some(s),
            "status" => self.status = Some(s),
            "path" => self.path = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "mentors" => self.mentors = Some(value),
            "teams" => self.teams = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "count" => self.count = Some(value),
            "rows" => self.rows = Some(value),
            "nodes" => self.nodes = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "objective" {
            self.objective = Some(value as f64);
        } else {
            self.record_u64(field, value.max(0) as u64);
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "objective" {
            self.objective = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "model_built" => format_model_built(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "mentors_read" => format_read(v, "mentors"),
        "teams_read" => format_read(v, "teams"),
        "matching_written" => format_written(v, "matching"),
        "matrix_written" => format_written(v, "compatibility matrix"),
        "branch_and_bound_end" => format_backend_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(value: Option<u64>) -> String {
    value
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_yellow()
        .to_string()
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model built │ {} mentors │ {} teams │ {} variables │ {} constraints",
        format_elapsed(),
        "●".bright_blue(),
        count(v.mentors),
        count(v.teams),
        count(v.variables),
        count(v.constraints),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let backend = v.backend.as_deref().unwrap_or("unknown");
    format!(
        "{} {} Solving │ backend {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        backend.bright_magenta()
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("unknown");
    let matched = v.objective.is_some();
    let objective = v
        .objective
        .map_or_else(|| "N/A".to_string(), |o| format!("{o:.0}"));

    let status_colored = match (matched, status) {
        (true, "optimal") => "OPTIMAL".bright_green().bold().to_string(),
        (true, _) => "FEASIBLE".bright_yellow().bold().to_string(),
        (false, _) => "INFEASIBLE".bright_red().bold().to_string(),
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_objective(&objective),
        status_colored,
        format_duration_ms(v.elapsed_ms.unwrap_or(0)).yellow(),
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let status_text = match (matched, status) {
        (true, "optimal") => "OPTIMAL MATCHING FOUND".to_string(),
        (true, limit) => format!("MATCHING FOUND ({limit})"),
        (false, reason) => format!("NO MATCHING ({reason})"),
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.chars().count());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_text = if matched {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_text,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Objective:",
        objective,
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_read(v: &EventVisitor, what: &str) -> String {
    format!(
        "{} {} Read {} {} from {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.count),
        what,
        v.path.as_deref().unwrap_or("?").white().bold()
    )
}

fn format_written(v: &EventVisitor, what: &str) -> String {
    format!(
        "{} {} Wrote {} ({} rows) to {}",
        format_elapsed(),
        "✎".bright_blue(),
        what,
        count(v.rows),
        v.path.as_deref().unwrap_or("?").white().bold()
    )
}

fn format_backend_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Branch and bound │ {} nodes │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        count(v.nodes),
        v.status.as_deref().unwrap_or("unknown").white()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_objective(objective: &str) -> String {
    match objective.parse::<f64>() {
        Ok(n) if n < 0.0 => objective.bright_red().to_string(),
        Ok(n) if n > 0.0 => objective.bright_green().to_string(),
        _ => objective.white().to_string(),
    }
}
