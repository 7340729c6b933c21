//! TUI UI Rendering
//!
//! Report list on the left, the selected report on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use viewer::loader::{INDEX_ERROR_PREFIX, NO_REPORTS_MESSAGE, REPORT_ERROR_PREFIX};

use crate::tui::app::App;

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, app, main_layout[0]);
    render_main_content(frame, app, main_layout[1]);
    render_footer(frame, app, main_layout[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Pod Reports ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", app.source_label),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let header = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_main_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    render_report_list(frame, app, layout[0]);
    render_output(frame, app, layout[1]);
}

/// Renders the selection control
fn render_report_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .options
        .iter()
        .map(|option| ListItem::new(option.label.clone()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Reports ({}) ", app.options.len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.options.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Renders the output area
fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let title = output_title(app);
    let output = Paragraph::new(app.output.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(output_color(&app.output))),
        )
        .scroll((app.scroll, 0));
    frame.render_widget(output, area);
}

/// Renders the footer with help text
fn render_footer(frame: &mut Frame, _app: &App, area: Rect) {
    let help_text = "↑↓:Select | PgUp/PgDn:Scroll | r:Reload | R:Reload list | Q:Quit";
    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

/// Names the shown report only when the pane actually holds it.
fn output_title(app: &App) -> String {
    let index_message =
        app.output.starts_with(INDEX_ERROR_PREFIX) || app.output == NO_REPORTS_MESSAGE;
    match app.selected_option() {
        Some(option) if !app.loading && !index_message => format!(" {} ", option.value),
        _ => " Output ".to_string(),
    }
}

fn output_color(text: &str) -> Color {
    if text.starts_with(INDEX_ERROR_PREFIX) || text.starts_with(REPORT_ERROR_PREFIX) {
        Color::Red
    } else {
        Color::Blue
    }
}
