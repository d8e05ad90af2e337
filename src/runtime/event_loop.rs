use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, StatusTone};
use crate::config::Settings;
use crate::mover::MoveEvent;
use crate::ui;

/// The interactive loop: drain worker events, redraw, handle one key.
///
/// The move worker never blocks this thread; its events arrive over the
/// batch's channel and are consumed here between redraws. Catalog
/// reconciliation happens here too, once the worker's final event lands.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &Settings,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Drain pending events from the in-flight batch, if any. Progress for
        // record i always arrives before i+1; Finished is strictly last.
        let mut finished = None;
        if let Some(batch) = app.batch.as_mut() {
            while let Some(event) = batch.try_event() {
                match event {
                    MoveEvent::Progress { percent } => app.progress = Some(percent),
                    MoveEvent::Finished(outcome) => finished = Some(outcome),
                }
            }
        }
        if let Some(outcome) = finished {
            app.finish_batch(outcome);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui.header_text))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if app.prompt.is_some() {
                    match key.code {
                        KeyCode::Esc => app.cancel_prompt(),
                        KeyCode::Backspace => app.pop_prompt_char(),
                        KeyCode::Enter => app.submit_prompt(),
                        KeyCode::Char(c) => {
                            if !c.is_control() {
                                app.push_prompt_char(c);
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') => {
                        if app.is_moving() {
                            // Shutdown is refused, not queued, while a batch runs.
                            app.set_status(
                                "Cannot quit while a move is in progress",
                                StatusTone::Warning,
                            );
                        } else {
                            break;
                        }
                    }
                    KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
                    KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
                    KeyCode::Tab
                    | KeyCode::Char('h')
                    | KeyCode::Char('l')
                    | KeyCode::Left
                    | KeyCode::Right => app.focus_other(),
                    KeyCode::Char(' ') => app.toggle_mark(),
                    KeyCode::Char('m') | KeyCode::Enter => app.start_move(),
                    KeyCode::Char('a') => app.begin_add_game(),
                    KeyCode::Char('o') => app.open_selected(),
                    KeyCode::Char('d') => app.cycle_secondary(),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
