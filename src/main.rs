mod app;
mod catalog;
mod config;
mod mover;
mod runtime;
mod ui;
mod volumes;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
