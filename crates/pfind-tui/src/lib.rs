//! pfind TUI: ratatui application shell.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use pfind_core::{config::Config, Datastore};

/// Start the TUI over `store`, with the theme named in `config`.
pub fn run(config: Config, store: Datastore) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(store, config, theme)?.run()
}
