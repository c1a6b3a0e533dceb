//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        header::Header,
        help::HelpPopup,
        product_table::{ProductTable, ProductTableState},
        selector::{Selector, SelectorState},
        value_input::{ValueInput, ValueInputState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pfind_core::{
    builder::parse_value_input, catalog::valid_operators, config::Config, filter_products,
    Datastore, FilterBuilder, FilterValue, Operator, Product, Property, PropertyType,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, time::Duration};

const TITLE: &str = "Product Finder";

// ---------------------------------------------------------------------------
// Focus + status types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Property,
    Operator,
    /// Value selector or text input; only reachable while the selected
    /// operator takes a value.
    Value,
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub properties: Vec<Property>,
    pub operators: Vec<Operator>,
    /// Every normalized product; the table shows the filtered subset.
    pub products: Vec<Product>,
    pub builder: FilterBuilder,
    pub property_sel: SelectorState,
    pub operator_sel: SelectorState,
    /// Operators currently offered by `operator_sel`, index-aligned.
    pub valid_ops: Vec<Operator>,
    pub value_sel: SelectorState,
    pub value_input: ValueInputState,
    pub table: ProductTableState,
    pub focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub status: Status,
    pub quit: bool,
}

impl AppState {
    /// `true` when the value pane is a list of allowed values rather than a
    /// free-text input.
    fn value_is_enumerated(&self) -> bool {
        !self.builder.possible_values().is_empty()
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(store: Datastore, config: Config, theme: Theme) -> anyhow::Result<Self> {
        let products = store.normalized()?;
        tracing::info!(
            products = products.len(),
            properties = store.properties().len(),
            "datastore normalized"
        );

        let properties = store.properties().to_vec();
        let operators = store.operators().to_vec();
        let valid_ops = valid_operators(&operators, None);

        let mut table = ProductTableState::new(products.clone());
        table.show_ids = config.ui.show_ids;

        let state = AppState {
            property_sel: SelectorState::new(properties.iter().map(|p| p.name.clone()).collect()),
            operator_sel: SelectorState::new(labels(&valid_ops)),
            valid_ops,
            value_sel: SelectorState::default(),
            value_input: ValueInputState::default(),
            status: Status::Info(format!("{} products", products.len())),
            properties,
            operators,
            products,
            builder: FilterBuilder::new(),
            table,
            focus: Focus::Property,
            theme,
            config,
            show_help: false,
            quit: false,
        };

        Ok(App { state })
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when the text input is focused
                        let app_event = if is_insert_mode(&self.state) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Help | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match event {
            AppEvent::Help => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::ClearFilter => clear_filter(s),

            // Leave the value input
            AppEvent::Escape => {
                if s.focus == Focus::Value {
                    tracing::debug!("focus: Value -> Table");
                    s.focus = Focus::Table;
                }
            }

            AppEvent::FocusNext | AppEvent::FocusPrev => {
                let next = cycle_focus(s.focus, s.builder.needs_value(), event == AppEvent::FocusNext);
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the free-text value input is focused, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(s: &AppState) -> bool {
    s.focus == Focus::Value && s.builder.needs_value() && !s.value_is_enumerated()
}

/// Property → Operator → Value → Table, skipping Value when the selected
/// operator takes none.
fn cycle_focus(focus: Focus, needs_value: bool, forward: bool) -> Focus {
    let order: &[Focus] = if needs_value {
        &[Focus::Property, Focus::Operator, Focus::Value, Focus::Table]
    } else {
        &[Focus::Property, Focus::Operator, Focus::Table]
    };
    let pos = order.iter().position(|f| *f == focus).unwrap_or(0);
    let next = if forward {
        (pos + 1) % order.len()
    } else {
        (pos + order.len() - 1) % order.len()
    };
    order[next]
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Property => {
            if let Some(i) = s.property_sel.handle(&event) {
                commit_property(s, i);
            }
        }
        Focus::Operator => {
            if let Some(i) = s.operator_sel.handle(&event) {
                commit_operator(s, i);
            }
        }
        Focus::Value if s.value_is_enumerated() => {
            if let Some(i) = s.value_sel.handle(&event) {
                let value = s.value_sel.options[i].clone();
                s.builder.set_value(FilterValue::Text(value));
                refresh(s);
            }
        }
        Focus::Value => {
            if s.value_input.handle(&event) {
                commit_input(s);
            }
        }
        Focus::Table => s.table.handle(&event),
    }
}

fn commit_property(s: &mut AppState, index: usize) {
    let Some(property) = s.properties.get(index).cloned() else {
        return;
    };
    s.builder.select_property(property);
    s.valid_ops = s.builder.valid_operators(&s.operators);
    s.operator_sel.reset(labels(&s.valid_ops));
    reset_value(s);
    refresh(s);
    s.focus = Focus::Operator;
}

fn commit_operator(s: &mut AppState, index: usize) {
    let Some(operator) = s.valid_ops.get(index).cloned() else {
        return;
    };
    s.builder.select_operator(operator);
    reset_value(s);
    refresh(s);
    if s.builder.needs_value() {
        s.focus = Focus::Value;
    }
}

/// Push the current text input into the builder. An empty input shows every
/// product rather than filtering on `0`.
fn commit_input(s: &mut AppState) {
    let Some(property) = s.builder.property() else {
        return;
    };
    let value = if s.value_input.input.trim().is_empty() {
        FilterValue::Text(String::new())
    } else {
        parse_value_input(property, &s.value_input.input)
    };
    s.builder.set_value(value);
    refresh(s);
}

fn reset_value(s: &mut AppState) {
    s.value_sel.reset(s.builder.possible_values().to_vec());
    s.value_input.clear();
}

fn clear_filter(s: &mut AppState) {
    s.builder.clear();
    s.property_sel.reset(s.properties.iter().map(|p| p.name.clone()).collect());
    s.valid_ops = valid_operators(&s.operators, None);
    s.operator_sel.reset(labels(&s.valid_ops));
    reset_value(s);
    refresh(s);
    if s.focus == Focus::Value {
        s.focus = Focus::Property;
    }
}

/// Re-evaluate the active filter. Errors keep the previous rows on screen.
fn refresh(s: &mut AppState) {
    match filter_products(&s.products, s.builder.active()) {
        Ok(rows) => {
            s.status = match s.builder.active() {
                Some(_) => Status::Info(format!("{} of {} products", rows.len(), s.products.len())),
                None => Status::Info(format!("{} products", s.products.len())),
            };
            s.table.set_rows(rows);
        }
        Err(err) => {
            tracing::warn!(error = %err, "filter evaluation failed");
            s.status = Status::Error(err.to_string());
        }
    }
}

fn labels(operators: &[Operator]) -> Vec<String> {
    operators.iter().map(|op| op.text.clone()).collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line header | 3-line filter bar | table | 1-line status
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let bar = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(vert[1]);

    let theme = &state.theme;
    frame.render_widget(Header::new(TITLE, theme), vert[0]);
    frame.render_widget(
        Selector::new("Property", &state.property_sel, state.focus == Focus::Property, theme),
        bar[0],
    );
    frame.render_widget(
        Selector::new("Operator", &state.operator_sel, state.focus == Focus::Operator, theme),
        bar[1],
    );

    let value_focused = state.focus == Focus::Value;
    let text_input = !state.value_is_enumerated();
    if text_input {
        let placeholder = value_placeholder(state);
        frame.render_widget(
            ValueInput::new(&state.value_input, placeholder, value_focused, theme),
            bar[2],
        );
    } else {
        frame.render_widget(Selector::new("Value", &state.value_sel, value_focused, theme), bar[2]);
    }

    frame.render_widget(
        ProductTable::new(&state.table, state.focus == Focus::Table, theme),
        vert[2],
    );

    let status = match &state.status {
        Status::Info(msg) => Span::styled(format!(" {msg}"), theme.status_info),
        Status::Error(msg) => Span::styled(format!(" {msg}"), theme.status_error),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
        return;
    }

    // Position the terminal cursor when typing a value
    if value_focused && text_input {
        let input = ValueInput::new(&state.value_input, "", true, theme);
        frame.set_cursor_position(input.cursor_position(bar[2]));
    }
}

fn value_placeholder(state: &AppState) -> &'static str {
    if !state.builder.needs_value() {
        return "—";
    }
    match state.builder.property().map(|p| p.kind) {
        Some(PropertyType::Number) => "Enter a number",
        Some(_) if state.builder.operator().is_some_and(|op| op.id == pfind_core::OperatorKind::In) => {
            "Comma-separated values"
        }
        _ => "Enter a value",
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
