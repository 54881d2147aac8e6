use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::fetch::{ceil_secs, FetchResult};
use crate::ui::components::utils::{clamp_scroll, split_vertical};
use crate::ui::styles::{secondary_line, ACCENT, WARNING_COLOR};
use crate::utils::current_human_timestamp;

/// Where the API section stands for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiStatus {
    Idle,
    Loading { ticker: String },
    Done {
        ticker: String,
        result: FetchResult,
        received_at: String,
    },
}

/// Rows and columns available inside the API body once borders and the
/// status line are taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelViewport {
    pub rows: usize,
    pub width: usize,
}

impl PanelViewport {
    pub fn for_area(area: Rect) -> Self {
        Self {
            rows: usize::from(area.height.saturating_sub(3)).max(1),
            width: usize::from(area.width.saturating_sub(2)).max(1),
        }
    }
}

/// Display state for the raw API response section.
#[derive(Debug, Clone)]
pub struct ApiPanelState {
    status: ApiStatus,
    lines: Vec<String>,
    scroll: usize,
    note: Option<String>,
}

impl Default for ApiPanelState {
    fn default() -> Self {
        Self {
            status: ApiStatus::Idle,
            lines: Vec::new(),
            scroll: 0,
            note: None,
        }
    }
}

impl ApiPanelState {
    pub fn status(&self) -> &ApiStatus {
        &self.status
    }

    pub fn set_loading(&mut self, ticker: &str) {
        self.status = ApiStatus::Loading {
            ticker: ticker.to_string(),
        };
        self.lines.clear();
        self.scroll = 0;
        self.note = None;
    }

    pub fn set_result(&mut self, ticker: &str, result: FetchResult) {
        self.lines = body_lines(&result);
        self.scroll = 0;
        self.note = None;
        self.status = ApiStatus::Done {
            ticker: ticker.to_string(),
            result,
            received_at: current_human_timestamp(),
        };
    }

    /// Drop back to idle, keeping `note` as the explanation.
    pub fn reset(&mut self, note: impl Into<String>) {
        *self = Self {
            note: Some(note.into()),
            ..Self::default()
        };
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Body lines cut to `width` columns, one entry per screen row.
    pub fn wrapped_rows(&self, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut rows = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                rows.push(String::new());
                continue;
            }
            rows.extend(chars.chunks(width).map(|chunk| chunk.iter().collect::<String>()));
        }
        rows
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: isize, viewport: PanelViewport) {
        let next = if delta.is_negative() {
            self.scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll.saturating_add(delta.unsigned_abs())
        };
        let total = self.wrapped_rows(viewport.width).len();
        self.scroll = clamp_scroll(next, total, viewport.rows);
    }
}

/// Pretty-printed JSON for successes, the summary text otherwise.
fn body_lines(result: &FetchResult) -> Vec<String> {
    match result {
        FetchResult::Success(value) => serde_json::to_string_pretty(value)
            .unwrap_or_else(|_| value.to_string())
            .lines()
            .map(str::to_string)
            .collect(),
        other => vec![other.summary()],
    }
}

/// Render the API section. `cooldown` is the live time left on the shared limiter.
/// Returns the body viewport so callers can page through the payload.
pub fn render_api_panel(
    f: &mut Frame<'_>,
    area: Rect,
    state: &ApiPanelState,
    cooldown: Option<Duration>,
) -> PanelViewport {
    let segments = split_vertical(area, &[Constraint::Min(3), Constraint::Length(1)]);
    let body_area = segments[0];
    let status_area = segments[1];
    let viewport = PanelViewport::for_area(area);

    let (title, body, status): (String, Vec<Line<'_>>, Line<'_>) = match &state.status {
        ApiStatus::Idle => (
            "Massive API".to_string(),
            vec![secondary_line(
                "Select a ticker to request its daily aggregates for the last two years.",
            )],
            secondary_line("No request made yet"),
        ),
        ApiStatus::Loading { ticker } => (
            format!("Massive API — {ticker}"),
            vec![Line::from("Requesting daily aggregates…")],
            secondary_line("Waiting for response (10s timeout)"),
        ),
        ApiStatus::Done {
            ticker,
            result,
            received_at,
        } => {
            let title = format!("Massive API — {ticker} (raw response)");
            let body = match result {
                FetchResult::Success(_) => state
                    .wrapped_rows(viewport.width)
                    .into_iter()
                    .map(Line::from)
                    .collect(),
                FetchResult::RateLimited(_) | FetchResult::ConfigError => {
                    vec![Line::styled(result.summary(), Style::default().fg(WARNING_COLOR))]
                }
                FetchResult::NetworkError(_) => {
                    vec![Line::styled(result.summary(), Style::default().fg(Color::Red))]
                }
                FetchResult::Empty => vec![Line::from(result.summary())],
            };
            let status = match result {
                FetchResult::Success(_) => secondary_line(format!(
                    "Received {received_at} • {} lines • PgUp/PgDn scroll",
                    state.lines.len()
                )),
                _ => secondary_line(format!("Last attempt {received_at}")),
            };
            (title, body, status)
        }
    };

    // Payload rows are already cut to width; wrapping only applies to summaries.
    let mut paragraph = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((u16::try_from(state.scroll).unwrap_or(u16::MAX), 0));
    if !matches!(
        state.status,
        ApiStatus::Done {
            result: FetchResult::Success(_),
            ..
        }
    ) {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, body_area);

    let status = match &state.note {
        Some(note) => {
            let mut spans = status.spans;
            spans.push(Span::raw(" • "));
            spans.push(Span::styled(note.clone(), Style::default().fg(WARNING_COLOR)));
            Line::from(spans)
        }
        None => status,
    };

    let status = match cooldown {
        Some(remaining) => {
            let mut spans = vec![
                Span::styled(
                    format!("Cooldown {}s", ceil_secs(remaining)),
                    Style::default().fg(ACCENT),
                ),
                Span::raw(" • "),
            ];
            spans.extend(status.spans);
            Line::from(spans)
        }
        None => status,
    };
    f.render_widget(Paragraph::new(status), status_area);
    viewport
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::NetworkErrorKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(state: &ApiPanelState, cooldown: Option<Duration>) -> String {
        rendered_in(state, cooldown, 80, 12)
    }

    fn rendered_in(
        state: &ApiPanelState,
        cooldown: Option<Duration>,
        width: u16,
        height: u16,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_api_panel(f, area, state, cooldown);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn success_is_pretty_printed() {
        let mut state = ApiPanelState::default();
        state.set_result(
            "AAPL",
            FetchResult::Success(serde_json::json!({"ticker": "AAPL", "resultsCount": 2})),
        );

        assert!(state.lines().len() > 1);
        assert!(state.lines().iter().any(|l| l.contains("\"ticker\": \"AAPL\"")));
        assert!(rendered(&state, None).contains("resultsCount"));
    }

    #[test]
    fn failures_show_their_summary() {
        let mut state = ApiPanelState::default();
        state.set_result("AAPL", FetchResult::NetworkError(NetworkErrorKind::Timeout));
        assert!(rendered(&state, None).contains("request timed out"));

        state.set_result("AAPL", FetchResult::ConfigError);
        assert!(rendered(&state, None).contains("MASSIVE_API_KEY"));
    }

    #[test]
    fn cooldown_is_shown_in_the_status_line() {
        let state = ApiPanelState::default();
        let text = rendered(&state, Some(Duration::from_millis(7_300)));
        assert!(text.contains("Cooldown 8s"), "{text}");
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut state = ApiPanelState::default();
        let payload: Vec<u32> = (0..40).collect();
        state.set_result("AAPL", FetchResult::Success(serde_json::json!(payload)));
        let total = state.lines().len();
        let viewport = PanelViewport { rows: 10, width: 80 };

        state.scroll_by(1_000, viewport);
        assert_eq!(state.scroll(), total - 10);
        state.scroll_by(-5, viewport);
        assert_eq!(state.scroll(), total - 15);
        state.scroll_by(-1_000, viewport);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn long_lines_count_as_several_rows() {
        let mut state = ApiPanelState::default();
        state.set_result(
            "AAPL",
            FetchResult::Success(serde_json::json!({ "next_url": "x".repeat(150) })),
        );

        let rows = state.wrapped_rows(58);
        assert!(rows.len() > state.lines().len());
        assert!(rows.iter().all(|row| row.chars().count() <= 58));
        assert_eq!(rows.concat(), state.lines().concat());
    }

    #[test]
    fn payload_tail_is_reachable_past_wrapped_lines() {
        let mut state = ApiPanelState::default();
        let items: Vec<u32> = (0..20).collect();
        state.set_result(
            "AAPL",
            FetchResult::Success(serde_json::json!({
                "a_next_url": "x".repeat(150),
                "items": items,
                "zz_tail": "END_MARKER",
            })),
        );

        let area = Rect::new(0, 0, 60, 12);
        let viewport = PanelViewport::for_area(area);
        assert_eq!(viewport, PanelViewport { rows: 9, width: 58 });

        state.scroll_by(10_000, viewport);
        let text = rendered_in(&state, None, 60, 12);
        assert!(text.contains("END_MARKER"), "{text}");
    }

    #[test]
    fn note_is_appended_to_the_status_line() {
        let mut state = ApiPanelState::default();
        state.set_result("AAPL", FetchResult::Empty);
        state.set_note("MSFT not requested yet");
        assert!(rendered(&state, None).contains("MSFT not requested yet"));

        state.reset("worker stopped");
        assert_eq!(state.status(), &ApiStatus::Idle);
        assert_eq!(state.note(), Some("worker stopped"));
    }

    #[test]
    fn loading_resets_previous_body() {
        let mut state = ApiPanelState::default();
        state.set_result("AAPL", FetchResult::Success(serde_json::json!({"a": 1})));
        state.set_loading("MSFT");
        assert!(state.lines().is_empty());
        assert_eq!(
            state.status(),
            &ApiStatus::Loading {
                ticker: "MSFT".to_string()
            }
        );
    }
}
