use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*};
use std::time::Duration;

use crate::app::ExplorerState;
use crate::config::{CredentialStatus, API_KEY_ENV};
use crate::ui::components::utils::{split_horizontal, split_vertical};
use crate::ui::components::{
    render_api_panel, render_series_charts, PanelViewport, TerminalGuard,
};
use crate::ui::styles::{header_style, secondary_span, selection_style, ACCENT, WARNING_COLOR};

const TICK: Duration = Duration::from_millis(150);
const TICKER_COLUMN_WIDTH: u16 = 18;
const HELP_TEXT: &str = "↑/↓ or j/k move • Enter select • r re-fetch • PgUp/PgDn scroll • q quit";

/// Interactive ticker browser. Returns when the user quits.
pub fn run_explorer(state: &mut ExplorerState) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let mut viewport = PanelViewport { rows: 1, width: 1 };

    loop {
        state.poll_fetch();

        guard.draw(|f| {
            viewport = draw_explorer(f, state);
        })?;

        if !event::poll(TICK)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => state.move_up(),
            KeyCode::Down | KeyCode::Char('j') => state.move_down(),
            KeyCode::Enter => state.select_current(),
            KeyCode::Char('r') => state.refetch(),
            KeyCode::PageUp => {
                let page = isize::try_from(viewport.rows).unwrap_or(isize::MAX);
                state.api_mut().scroll_by(-page, viewport);
            }
            KeyCode::PageDown => {
                let page = isize::try_from(viewport.rows).unwrap_or(isize::MAX);
                state.api_mut().scroll_by(page, viewport);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
            KeyCode::Char('q') | KeyCode::Esc => break,
            _ => {}
        }
    }

    guard.restore()?;
    Ok(())
}

/// Draw one frame. Returns the API body viewport used for paging.
pub fn draw_explorer(f: &mut Frame<'_>, state: &ExplorerState) -> PanelViewport {
    let rows = split_vertical(
        f.size(),
        &[
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ],
    );

    render_header(f, rows[0], state);

    let columns = split_horizontal(
        rows[1],
        &[Constraint::Length(TICKER_COLUMN_WIDTH), Constraint::Min(20)],
    );
    render_ticker_list(f, columns[0], state);

    let right = split_vertical(
        columns[1],
        &[Constraint::Percentage(55), Constraint::Min(6)],
    );
    render_series_charts(f, right[0], state.series());
    let viewport = render_api_panel(f, right[1], state.api(), state.cooldown_remaining());

    let help = Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::Gray));
    f.render_widget(help, rows[2]);

    viewport
}

fn render_header(f: &mut Frame<'_>, area: Rect, state: &ExplorerState) {
    let credential = match state.credential_status() {
        CredentialStatus::Configured => {
            Span::styled("API key configured", Style::default().fg(Color::Green))
        }
        CredentialStatus::Placeholder => Span::styled(
            format!("{API_KEY_ENV} still holds the placeholder value"),
            Style::default().fg(WARNING_COLOR),
        ),
        CredentialStatus::Missing => Span::styled(
            format!("{API_KEY_ENV} not set; plots only"),
            Style::default().fg(WARNING_COLOR),
        ),
    };

    let mut spans = vec![
        Span::styled(" Stock Explorer ", header_style()),
        Span::raw("  "),
        credential,
    ];
    if state.is_loading() {
        spans.push(Span::raw("  "));
        spans.push(secondary_span("fetching…"));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_ticker_list(f: &mut Frame<'_>, area: Rect, state: &ExplorerState) {
    let items: Vec<ListItem> = state
        .tickers()
        .iter()
        .map(|ticker| {
            let marker = if state.selected() == Some(ticker.as_str()) {
                Span::styled("● ", Style::default().fg(ACCENT))
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![marker, Span::raw(ticker.as_str())]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Tickers"))
        .highlight_style(selection_style().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor()));
    f.render_stateful_widget(list, area, &mut list_state);
}
