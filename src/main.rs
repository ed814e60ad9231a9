use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use nba_scout_terminal::artifacts::{self, ModelContext};
use nba_scout_terminal::state::{AppState, FormField};

struct App {
    state: AppState,
    ctx: ModelContext,
    should_quit: bool,
}

impl App {
    fn new(ctx: ModelContext) -> Self {
        Self {
            state: AppState::new(),
            ctx,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('h') => self.state.adjust(-1, false),
            KeyCode::Char('l') => self.state.adjust(1, false),
            KeyCode::Char('H') => self.state.adjust(-1, true),
            KeyCode::Char('L') => self.state.adjust(1, true),
            KeyCode::Left => self.state.adjust(-1, key.modifiers.contains(KeyModifiers::SHIFT)),
            KeyCode::Right => self.state.adjust(1, key.modifiers.contains(KeyModifiers::SHIFT)),
            KeyCode::Enter => self.state.submit(&self.ctx),
            KeyCode::Char('r') => self.state.reset(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    // Artifacts are loaded before the terminal is touched: a missing or
    // inconsistent model is fatal, never a degraded session.
    let ctx = artifacts::load_context().context("load scoring artifacts")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(ctx);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], app);

    let footer = Paragraph::new(
        "j/k/↑/↓ Move | h/l/←/→ Adjust | H/L Coarse | Enter Submit | r Reset | ? Help | q Quit",
    )
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let line1 = format!(
        "  .-.  NBA SCOUT | Level: {}",
        state.form.competition_level.label()
    );
    let line2 = " (   )  What is your NBA projection?".to_string();
    let line3 = "  `-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(44), Constraint::Length(42)])
        .split(area);

    render_form(frame, columns[0], &app.state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(columns[1]);

    render_result(frame, right[0], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, right[1]);
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Scouting Form")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    for (idx, field) in FormField::ALL.iter().enumerate() {
        if idx as u16 >= inner.height {
            break;
        }
        let row_area = Rect {
            x: inner.x,
            y: inner.y + idx as u16,
            width: inner.width,
            height: 1,
        };

        let selected = idx == state.focus;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(row_area);

        let marker = if selected { "> " } else { "  " };
        let label = Paragraph::new(format!("{marker}{}", field.label())).style(row_style);
        frame.render_widget(label, cols[0]);

        let value_style = if selected {
            row_style.add_modifier(Modifier::BOLD)
        } else {
            row_style
        };
        let value = Paragraph::new(state.value_text(*field)).style(value_style);
        frame.render_widget(value, cols[1]);
    }
}

fn render_result(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = match &state.projection {
        Some(projection) => format!(
            "{:.2} pts / game (NBA projection)\n\nVerdict: {}",
            projection.score,
            projection.tier.message()
        ),
        None => "No projection yet\n\nPress Enter to submit the form".to_string(),
    };
    let result = Paragraph::new(text)
        .block(Block::default().title("NBA Projection").borders(Borders::ALL));
    frame.render_widget(result, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No activity yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(4)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "NBA Scout Terminal - Help",
        "",
        "Enter your current stats, pick the level you",
        "play at, and submit to see your NBA projection.",
        "",
        "  j/k or ↑/↓   Move between fields",
        "  h/l or ←/→   Adjust the focused field",
        "  H/L          Coarse adjust",
        "  Enter        Submit",
        "  r            Reset to defaults",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
