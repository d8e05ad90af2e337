use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::catalog::CatalogStore;
use crate::volumes;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    logging::init(&settings.log);

    let volumes = volumes::detect(&settings.volumes);
    if volumes.len() < 2 {
        return Err(
            "gamehaul needs at least two volumes; list their roots under [volumes] in config.toml"
                .into(),
        );
    }
    let primary = volumes::primary_index(&volumes, &settings.volumes);

    let ids: Vec<String> = volumes.iter().map(|v| v.id.clone()).collect();
    let catalog = CatalogStore::load(PathBuf::from(&settings.catalog.path), &ids);
    let mut app = App::new(catalog, volumes, primary);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
