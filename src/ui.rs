//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, Pane, PromptKind, StatusTone};

const CONTROLS_TEXT: &str = "[j/k] up/down | [tab/h/l] switch pane | [space] mark | \
     [m/enter] move marked | [a] add game | [o] open folder | [d] cycle left volume | [q] quit";

fn tone_style(tone: StatusTone) -> Style {
    match tone {
        StatusTone::Info => Style::default(),
        StatusTone::Warning => Style::default().fg(Color::Yellow),
        StatusTone::Error => Style::default().fg(Color::Red),
        StatusTone::Busy => Style::default().fg(Color::Cyan),
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// One list row: name, base folder name, full current path, mark state.
fn record_line(app: &App, pane: Pane, index: usize) -> String {
    let record = &app.pane_records(pane)[index];
    let mark = if app.is_marked(pane, index) { "*" } else { " " };
    format!(
        "{mark} {} ({}) [{}]",
        record.name,
        record.base_name(),
        record.path.display()
    )
}

fn draw_pane(frame: &mut Frame, app: &App, pane: Pane, area: Rect) {
    let volume = app.pane_volume(pane);
    let records = app.pane_records(pane);
    let focused = app.focus == pane;

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let items: Vec<ListItem> = (0..records.len())
        .map(|i| ListItem::new(record_line(app, pane, i)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ({} games) ", volume.id, records.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ratatui::widgets::ListState::default();
    if !records.is_empty() && focused {
        state.select(Some(app.cursor(pane)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(frame: &mut Frame, app: &App, header_text: &str) {
    let moving = app.progress.is_some();
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ];
    if moving {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(3));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    // Header
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" gamehaul ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let (status_text, status_style) = match &app.status {
        Some(status) => (status.text.clone(), tone_style(status.tone)),
        None => (
            "Mark games with space, then press m to move them to the other pane".to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
    };
    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Two record lists, side by side.
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    draw_pane(frame, app, Pane::Left, panes[0]);
    draw_pane(frame, app, Pane::Right, panes[1]);

    // Progress gauge, only while a batch runs.
    if let Some(percent) = app.progress {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" moving "))
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(u16::from(percent));
        frame.render_widget(gauge, chunks[3]);
    }

    // Footer
    let footer_index = chunks.len() - 1;
    let footer = Paragraph::new(CONTROLS_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[footer_index]);

    // Registration prompt overlay.
    if let Some(prompt) = &app.prompt {
        let title = match prompt.kind {
            PromptKind::GamePath => " game folder or file (enter confirms, esc cancels) ",
            PromptKind::GameName { .. } => " game name (enter confirms, esc cancels) ",
        };
        let popup_area = centered_rect_sized(72, 3, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let input = Paragraph::new(format!("{}_", prompt.buffer)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        );
        frame.render_widget(input, popup_area);
    }
}
