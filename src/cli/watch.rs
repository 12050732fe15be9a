//! Watch command implementation - Interactive TUI viewer.

// CLI watch uses intentional casts for display and timing
#![allow(clippy::needless_pass_by_value, clippy::cast_possible_truncation)]

use super::CliError;
use cadence::game::{GameEvent, GameIntent, GameState, PlannedProgram, RoundStatus};
use cadence::{Reducer, Scenario};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Events kept in the feed panel.
const EVENT_FEED_LEN: usize = 64;

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the scenario is invalid or the TUI fails.
pub(crate) fn execute(scenario_path: PathBuf, speed: u64) -> Result<(), CliError> {
    let scenario = Scenario::load(&scenario_path)?;
    let reducer = Reducer::new().with_config(scenario.config);

    // Validates every program before the terminal is taken over.
    let planned = scenario.planned(&reducer)?;
    let programs: Vec<PlannedProgram> = planned.state.programs_by_player.values().cloned().collect();

    let mut app = App::new(scenario, reducer, programs, speed);
    app.restart();

    run_tui(app)
}

/// App state for the TUI.
struct App {
    scenario: Scenario,
    reducer: Reducer,
    programs: Vec<PlannedProgram>,
    state: GameState,
    events: Vec<GameEvent>,
    auto: bool,
    speed_ms: u64,
    last_step: Instant,
}

impl App {
    fn new(scenario: Scenario, reducer: Reducer, programs: Vec<PlannedProgram>, speed_ms: u64) -> Self {
        let state = scenario.initial_state();
        Self {
            scenario,
            reducer,
            programs,
            state,
            events: Vec::new(),
            auto: false, // Start in manual mode
            speed_ms,
            last_step: Instant::now(),
        }
    }

    fn dispatch(&mut self, intent: &GameIntent) {
        let transition = self.reducer.apply(&self.state, intent);
        self.state = transition.state;
        self.events.extend(transition.events);
        if self.events.len() > EVENT_FEED_LEN {
            let excess = self.events.len() - EVENT_FEED_LEN;
            self.events.drain(..excess);
        }
        self.last_step = Instant::now();
    }

    fn step_forward(&mut self) {
        self.dispatch(&GameIntent::ContinueResolution);
    }

    fn end_round(&mut self) {
        self.auto = false;
        self.dispatch(&GameIntent::EndRound);
    }

    /// Reset the round, resubmit every program and start again.
    fn restart(&mut self) {
        self.dispatch(&GameIntent::ResetRound);
        for program in self.programs.clone() {
            self.dispatch(&GameIntent::SubmitProgram {
                player_id: program.player_id.clone(),
                program,
            });
        }
        self.dispatch(&GameIntent::StartRound);
    }

    fn toggle_auto(&mut self) {
        self.auto = !self.auto;
    }

    fn increase_speed(&mut self) {
        self.speed_ms = self.speed_ms.saturating_sub(100).max(50);
    }

    fn decrease_speed(&mut self) {
        self.speed_ms = (self.speed_ms + 100).min(2000);
    }

    fn should_auto_step(&self) -> bool {
        self.auto
            && self.state.round.is_resolving()
            && self.last_step.elapsed() >= Duration::from_millis(self.speed_ms)
    }

    fn player_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.state.player(id).map_or(id, |p| p.label())
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    loop {
        terminal.draw(|f| ui(f, &app)).map_err(|e| CliError::new(e.to_string()))?;

        if app.should_auto_step() {
            app.step_forward();
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char(' ') | KeyCode::Right => {
                    app.auto = false;
                    app.step_forward();
                }
                KeyCode::Char('a') => app.toggle_auto(),
                KeyCode::Char('e') => app.end_round(),
                KeyCode::Char('r') => {
                    app.auto = false;
                    app.restart();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[0]);

    render_frame(f, left[0], app);
    render_log(f, left[1], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(app.state.players.len() as u16 + 2), Constraint::Min(4)])
        .split(main_chunks[1]);

    render_order(f, right[0], app);
    render_events(f, right[1], app);

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let round = &app.state.round;
    let status = match round.status {
        RoundStatus::Planning => "PLANNING",
        RoundStatus::Resolving if app.auto => "AUTO",
        RoundStatus::Resolving => "RESOLVING",
        RoundStatus::Ended => "ENDED",
    };

    let title = format!(
        " Cadence | {} | Frame {} | Step {}/{} | {} | Speed: {}ms ",
        app.scenario.id,
        round.frame_index,
        (round.step_cursor + 1).min(round.resolved_steps.len()),
        round.resolved_steps.len(),
        status,
        app.speed_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_frame(f: &mut Frame, area: Rect, app: &App) {
    let round = &app.state.round;
    let active = round.pending_index();

    let lines: Vec<Line> = round
        .resolved_steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let marker = if Some(i) == active { "▶ " } else { "  " };
            let style = if Some(i) == active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let symbols: Vec<String> = step.symbols.iter().map(|s| s.describe()).collect();
            Line::from(vec![
                Span::styled(format!("{marker}{:<10} ", app.player_name(&step.player_id)), style),
                Span::raw(symbols.join(", ")),
            ])
        })
        .collect();

    let title = format!(" Frame {} ", round.frame_index);
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(widget, area);
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let visible = (area.height as usize).saturating_sub(2);
    let skip = app.state.log.len().saturating_sub(visible);

    let lines: Vec<Line> = app
        .state
        .log
        .iter()
        .skip(skip)
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("f{:<3} ", entry.frame_index), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<10} ", app.player_name(&entry.player_id)),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(entry.symbol_ids.join(" ")),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Log ({}) ", app.state.log.len())),
    );

    f.render_widget(widget, area);
}

fn render_order(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .state
        .round
        .order
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let score = cadence::engine::initiative_score(app.state.program(id));
            Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<10}", app.player_name(id)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" initiative {score}")),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Initiative "));
    f.render_widget(widget, area);
}

fn render_events(f: &mut Frame, area: Rect, app: &App) {
    let visible = (area.height as usize).saturating_sub(2);
    let skip = app.events.len().saturating_sub(visible);

    let lines: Vec<Line> = app
        .events
        .iter()
        .skip(skip)
        .map(|event| Line::from(event.to_string()))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Events "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.state.round.is_resolving() {
        " [q] Quit  [Space/→] Continue  [a] Auto  [+/-] Speed  [e] End round  [r] Restart "
    } else {
        " [q] Quit  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
