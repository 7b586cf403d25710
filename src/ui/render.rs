//! Plain-text rendering of the result and dashboard views. Everything here
//! is presentational; all numbers come from the model/geometry/stats layers.

use chrono::{DateTime, Local};

use crate::archive::stats::{ArchiveStats, local_hour, todays_entries};
use crate::geometry::{self, Point};
use crate::model::{AgencyResult, Domain};
use crate::ui::style;

const TRIANGLE_COLS: usize = 41;
const TRIANGLE_ROWS: usize = 13;
const BALANCE_BAR_WIDTH: usize = 30;

/// The full result view.
pub fn result_view(result: &AgencyResult, review_mode: bool) -> String {
    let scores = &result.classification;
    let accent = result.dominant_domain.accent();
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}  {}\n\n",
        style::dim("ANALYSIS"),
        style::brand(result.achievement().label())
    ));

    out.push_str(&triangle(geometry::placement(scores)));

    out.push_str(&format!(
        "\n  {}\n  {}\n\n",
        style::domain_accent(result.dominant_domain, accent),
        style::dim(result.dominant_domain.subtitle())
    ));

    out.push_str(&format!(
        "  {:>3}%  {}\n  {:>3}%  {}\n\n",
        scores.unnecessary_load(),
        style::dim("Unnecessary Load Detected"),
        scores.actionable_agency(),
        style::dim("Actionable Agency"),
    ));

    out.push_str(&format!(
        "  {}\n  {}\n\n",
        style::accent("LOGIC CHECK"),
        result.one_sentence_reason
    ));

    let action_title = if result.dominant_domain == Domain::Mine {
        "STRATEGIC ACTION"
    } else {
        "RELEASE PROTOCOL"
    };
    out.push_str(&format!(
        "  {}\n  {}\n\n",
        style::domain_accent(action_title, accent),
        result.recommended_action
    ));

    out.push_str(&format!(
        "  {}\n  \"{}\"\n\n",
        style::dim("COMFORT REFRAME"),
        result.optional_reframe
    ));

    let commit_hint = if review_mode {
        "Back to Archive"
    } else {
        "Log Achievement"
    };
    out.push_str(&format!("  {}\n", style::success(commit_hint)));

    out
}

/// The dashboard view over the whole archive.
pub fn dashboard_view(entries: &[AgencyResult], now: DateTime<Local>) -> String {
    let stats = ArchiveStats::compute(entries);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n\n", style::header("My Archive")));

    // Today's Pulse
    out.push_str(&format!("{}\n", style::dim("TODAY'S PULSE")));
    let today = todays_entries(entries, now.date_naive());
    if today.is_empty() {
        out.push_str(&format!("  {}\n\n", style::dim("No activity yet today.")));
    } else {
        for entry in today {
            let hour = local_hour(entry).unwrap_or(0);
            out.push_str(&format!(
                "  {:>2}:00  {}\n",
                hour,
                style::domain_accent(entry.dominant_domain, entry.dominant_domain.accent())
            ));
        }
        out.push('\n');
    }

    // Load Reduced
    out.push_str(&format!(
        "{}\n  {}\n\n",
        style::dim("LOAD REDUCED"),
        style::brand(format!("{}%", stats.energy_reclaimed))
    ));

    // Clarity Balance
    out.push_str(&format!("{}\n", style::dim("CLARITY BALANCE")));
    out.push_str(&format!("  {}\n", balance_bar(&stats)));
    out.push_str(&format!(
        "  {}\n\n",
        style::dim(format!(
            "me {}  ·  theirs {}  ·  life {}",
            stats.mine, stats.others, stats.life
        ))
    ));

    // Recent Logs
    out.push_str(&format!("{}\n", style::dim("RECENT LOGS")));
    if entries.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            style::dim("No logs yet! Start by adding one.")
        ));
    } else {
        for (idx, entry) in entries.iter().enumerate().take(10) {
            out.push_str(&log_line(idx, entry));
        }
    }

    out
}

fn log_line(idx: usize, entry: &AgencyResult) -> String {
    let date = entry
        .timestamp
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map_or_else(
            || "N/A".to_string(),
            |dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        );
    let input = entry.original_input.as_deref().unwrap_or("");
    format!(
        "  {:>2}. {} {}  \"{}\"\n      {}\n",
        idx + 1,
        style::domain_accent(entry.dominant_domain, entry.dominant_domain.accent()),
        style::dim(date),
        truncate(input, 40),
        style::dim(&entry.recommended_action),
    )
}

/// The score triangle: three labeled anchors and the result dot, drawn on a
/// character grid. The dot is clamped to the grid for display only; the
/// underlying point is not.
fn triangle(dot: Point) -> String {
    let mut grid = vec![vec![' '; TRIANGLE_COLS]; TRIANGLE_ROWS];

    plot(&mut grid, geometry::ANCHOR_LIFE, '^');
    plot(&mut grid, geometry::ANCHOR_MINE, '+');
    plot(&mut grid, geometry::ANCHOR_OTHERS, '+');
    plot(&mut grid, dot, '#');

    let mut out = String::new();
    out.push_str(&format!("{:^41}\n", "天的事 (Life)"));
    for row in grid {
        out.push_str("  ");
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&format!(
        "  {:<20}{:>21}\n",
        "我的事 (Me)", "別人的事 (Theirs)"
    ));
    out.push_str(&style::dim(format!(
        "{:^45}\n",
        format!("position ({:.1}, {:.1})", dot.x, dot.y)
    )));
    out
}

fn plot(grid: &mut [Vec<char>], point: Point, marker: char) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let col = ((point.x / 100.0 * (TRIANGLE_COLS - 1) as f64).round())
        .clamp(0.0, (TRIANGLE_COLS - 1) as f64) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let row = ((point.y / 100.0 * (TRIANGLE_ROWS - 1) as f64).round())
        .clamp(0.0, (TRIANGLE_ROWS - 1) as f64) as usize;
    grid[row][col] = marker;
}

/// Three-segment bar; zero-width segments on an empty archive, never a
/// division result.
fn balance_bar(stats: &ArchiveStats) -> String {
    let Some([mine, others, _]) = stats.balance() else {
        return style::dim("·".repeat(BALANCE_BAR_WIDTH));
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mine_w = (mine * BALANCE_BAR_WIDTH as f64).round() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let others_w = (others * BALANCE_BAR_WIDTH as f64).round() as usize;
    let life_w = BALANCE_BAR_WIDTH.saturating_sub(mine_w + others_w);

    format!(
        "{}{}{}",
        style::brand("█".repeat(mine_w)),
        style::warn("█".repeat(others_w)),
        style::accent("█".repeat(life_w)),
    )
}

fn truncate(input: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in input.chars().enumerate() {
        if idx >= max_chars {
            out.push('…');
            break;
        }
        out.push(ch);
    }
    out
}
