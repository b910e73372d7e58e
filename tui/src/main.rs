//! Triage Desk — case browser TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  title (localized)                                   [en|hi|kn]     │
//!   ├─── left panel ──────────────────┬─── right panel ───────────────────┤
//!   │  Case History                   │  Decision + replayed report       │
//!   ├─────────────────────────────────┴───────────────────────────────────┤
//!   │  status / disclaimer                                                │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! Usage: `triage-desk-tui [config.toml]`

use std::{io, path::Path, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use triage_client::ClientConfig;
use triage_contracts::{language::Language, view::HistoryRow};
use triage_history::{ClientState, FileStateStore};
use triage_render::{label, render_decision_text, render_report_text, UiLabel};
use triage_report::build_decision;

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    state: ClientState,
    rows: Vec<HistoryRow>,
    selected: usize,
    /// Rendered text of the replayed case, if any.
    detail: Option<String>,
    scroll: u16,
    status: String,
}

impl App {
    fn new(state: ClientState) -> Self {
        let rows = state.history().rows();
        Self {
            state,
            rows,
            selected: 0,
            detail: None,
            scroll: 0,
            status: String::new(),
        }
    }

    fn language(&self) -> Language {
        self.state.language()
    }

    fn select_next(&mut self) {
        if !self.rows.is_empty() {
            self.selected = (self.selected + 1).min(self.rows.len() - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replay the selected case into the detail pane. A miss is a no-op.
    fn replay_selected(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        let history = self.state.history();
        let (Some(report), Some(record)) = (history.replay(&row.key), history.get(&row.key)) else {
            return;
        };
        let decision = build_decision(&record.to_decision());
        self.detail = Some(format!(
            "{}\n{}",
            render_decision_text(&decision, self.language()),
            render_report_text(&report)
        ));
        self.scroll = 0;
        self.status = format!("Replayed case {}", row.case_id.to_plain());
    }

    fn cycle_language(&mut self) {
        let next = self.language().next();
        self.status = match self.state.set_language(next) {
            Ok(()) => format!("Language: {next}"),
            Err(e) => e.status_message().to_string(),
        };
        // The decision panel carries localized labels.
        if self.detail.is_some() {
            self.replay_selected();
        }
    }

    fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(5);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(5);
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // history + detail
            Constraint::Length(3), // status
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer_chunks[1]);

    render_history(f, mid_chunks[0], app);
    render_detail(f, mid_chunks[1], app);
    render_status(f, outer_chunks[2], app);
    render_footer(f, outer_chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(
        format!("{}    ", label(app.language(), UiLabel::Title)),
        title_style,
    )];
    for language in Language::ALL {
        let style = if language == app.language() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", language.code()), style));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = Vec::new();

    if app.rows.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No previous cases.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, row) in app.rows.iter().enumerate() {
        let severity = row.severity.to_plain();
        let marker = if i == app.selected { "▸ " } else { "  " };
        let base = if i == app.selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(truncate(&row.patient.to_plain(), 18), base),
            Span::raw("  "),
            Span::styled(
                format!("{:<9}", severity),
                Style::default().fg(severity_color(&severity)),
            ),
            Span::raw(format!(" {:<4}", row.priority.to_plain())),
            Span::styled(
                format!(" {}", row.date.to_plain()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        items.push(ListItem::new(line));
    }

    let block = Block::default()
        .title(format!(" {} ", label(app.language(), UiLabel::History)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(List::new(items).block(block), area);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", label(app.language(), UiLabel::Report)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = app
        .detail
        .clone()
        .unwrap_or_else(|| "Select a case and press Enter to replay it.".to_string());
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let text = if app.status.is_empty() {
        label(app.language(), UiLabel::Disclaimer).to_string()
    } else {
        app.status.clone()
    };
    let status = Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray)))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(status, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let spans = vec![
        Span::styled(" [↑/↓] ", key),
        Span::raw("Select  "),
        Span::styled("[Enter] ", key),
        Span::raw("Replay  "),
        Span::styled("[PgUp/PgDn] ", key),
        Span::raw("Scroll  "),
        Span::styled("[l] ", key),
        Span::raw("Language  "),
        Span::styled("[q] ", key),
        Span::raw("Quit"),
    ];
    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

fn severity_color(severity: &str) -> Color {
    match severity {
        "CRITICAL" => Color::Red,
        "HIGH" => Color::LightRed,
        "MODERATE" => Color::Yellow,
        "LOW" => Color::Green,
        _ => Color::Gray,
    }
}

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        format!("{:<width$}", s, width = max)
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn load_state() -> io::Result<ClientState> {
    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::from_file(Path::new(&path)),
        None => Ok(ClientConfig::default()),
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    Ok(ClientState::load(Box::new(FileStateStore::new(&config.data_dir))))
}

fn main() -> io::Result<()> {
    // Config errors are reported before the terminal switches modes.
    let state = load_state()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(state);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,

                    KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                    KeyCode::Enter => app.replay_selected(),
                    KeyCode::PageDown => app.scroll_down(),
                    KeyCode::PageUp => app.scroll_up(),
                    KeyCode::Char('l') | KeyCode::Char('L') => app.cycle_language(),

                    _ => {}
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
