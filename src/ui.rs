use anyhow::Result;
use civic_trust::{dashboard_router, Dashboard, Ring, Session, StatusDot, StepState, ViewRouter};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Credit,
}

impl InputField {
    pub fn toggle(&self) -> Self {
        match self {
            InputField::Name => InputField::Credit,
            InputField::Credit => InputField::Name,
        }
    }
}

pub struct App {
    pub session: Arc<Session<Dashboard>>,
    pub router: ViewRouter,
    pub editing: Option<InputField>,
    runtime: Handle,
}

impl App {
    pub fn new(session: Session<Dashboard>, runtime: Handle) -> Self {
        Self {
            session: Arc::new(session),
            router: dashboard_router(),
            editing: None,
            runtime,
        }
    }

    /// Fire-and-forget run; a second press while running is absorbed by the session
    pub fn trigger_run(&mut self) {
        let session = Arc::clone(&self.session);
        self.runtime.spawn(async move {
            session.run_demo().await;
        });
    }

    pub fn start_editing(&mut self) {
        self.editing = Some(InputField::Name);
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    pub fn switch_field(&mut self) {
        self.editing = self.editing.map(|f| f.toggle());
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.editing {
            self.session.with_surface(|d| match field {
                InputField::Name => d.name_input.push(c),
                InputField::Credit => d.credit_input.push(c),
            });
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.editing {
            self.session.with_surface(|d| match field {
                InputField::Name => d.name_input.pop(),
                InputField::Credit => d.credit_input.pop(),
            });
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Runs advance in the background, so redraw on a short tick
        let dashboard = app.session.snapshot();
        terminal.draw(|f| ui(f, app, &dashboard))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        if app.editing.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => app.stop_editing(),
                KeyCode::Up | KeyCode::Down | KeyCode::Tab => app.switch_field(),
                KeyCode::Backspace => app.pop_char(),
                KeyCode::Char(c) => app.push_char(c),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    app.router.previous();
                } else {
                    app.router.next();
                }
            }
            KeyCode::BackTab => app.router.previous(),
            KeyCode::Char(c @ '1'..='4') => app.router.activate(c as usize - '1' as usize),
            KeyCode::Char('e') => app.start_editing(),
            KeyCode::Char('r') | KeyCode::Enter => {
                if dashboard.trigger.enabled {
                    app.trigger_run();
                }
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &App, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Length(5), // Inputs and trigger
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_inputs(f, chunks[1], app, dashboard);

    // Only the active panel is drawn; an unmatched target draws nothing
    match app.router.visible_panels().first().copied() {
        Some("overview") => render_overview(f, chunks[2], dashboard),
        Some("sources") => render_sources(f, chunks[2], dashboard),
        Some("breakdown") => render_breakdown(f, chunks[2], dashboard),
        Some("benefits") => render_benefits(f, chunks[2], dashboard),
        _ => {}
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, entry) in app.router.entries().iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if entry.active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(format!("{} {}", i + 1, entry.label), style));
    }

    if let Some(breadcrumb) = app.router.breadcrumb() {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            format!("Dashboard › {}", breadcrumb),
            Style::default().fg(Color::White),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Civic Trust Score "),
    );

    f.render_widget(header, area);
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App, dashboard: &Dashboard) {
    let field_style = |field: InputField| {
        if app.editing == Some(field) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let trigger_style = if dashboard.trigger.enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = vec![
        Line::from(vec![
            Span::styled("  Citizen Name: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{:<24}", dashboard.name_input), field_style(InputField::Name)),
            Span::raw("   "),
            Span::styled("Credit Score: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{:<6}", dashboard.credit_input), field_style(InputField::Credit)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("[ {} ]", dashboard.trigger.label), trigger_style),
        ]),
    ];

    let inputs = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(inputs, area);
}

fn gauge(title: &str, percent: f64, label: String, color: Color) -> Gauge<'static> {
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(label)
}

fn ring_label(dashboard: &Dashboard, ring: Ring) -> String {
    match dashboard.ring(ring).value {
        Some(value) => value.to_string(),
        None => "--".to_string(),
    }
}

fn render_overview(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let rings = [
        (Ring::Civic, Color::Cyan),
        (Ring::Credit, Color::Magenta),
        (Ring::Combined, Color::Green),
    ];
    for (i, (ring, color)) in rings.iter().enumerate() {
        let display = dashboard.ring(*ring);
        f.render_widget(
            gauge(ring.title(), display.percentage, ring_label(dashboard, *ring), *color),
            rows[i],
        );
    }

    let tier = dashboard.tier.as_deref().unwrap_or("--");
    let band = dashboard.benefit_band.as_deref().unwrap_or("--");
    let insights = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Citizen Tier: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(tier, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("  Benefit Band: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(band, Style::default().fg(Color::Yellow)),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Insights "));

    f.render_widget(insights, rows[3]);
}

fn render_sources(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        gauge(
            "Fetch Progress",
            dashboard.progress_percent,
            format!("{:.0}%", dashboard.progress_percent),
            Color::Cyan,
        ),
        rows[0],
    );

    let mut content = vec![Line::from("")];
    for source in &dashboard.sources {
        let (dot, dot_color) = match source.dot {
            StatusDot::Idle => ("○", Color::DarkGray),
            StatusDot::Active => ("◉", Color::Yellow),
            StatusDot::Done => ("●", Color::Green),
        };
        let status = match source.state {
            StepState::Pending => "Pending",
            StepState::InProgress => "Fetching...",
            StepState::Done => "Verified",
        };

        content.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(dot, Style::default().fg(dot_color)),
            Span::raw(" "),
            Span::styled(format!("{:<36}", source.label), Style::default().fg(Color::White)),
            Span::styled(status, Style::default().fg(dot_color)),
        ]));
    }

    let list = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Data Sources "),
    );

    f.render_widget(list, rows[1]);
}

fn render_breakdown(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let constraints: Vec<Constraint> = dashboard
        .fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, row) in dashboard.fields.iter().enumerate() {
        f.render_widget(gauge(&row.label, row.bar_percent, row.text.clone(), Color::Blue), rows[i]);
    }
}

fn render_benefits(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let band = dashboard.benefit_band.as_deref().unwrap_or("Run a calculation to see your band");
    let tier = dashboard.tier.as_deref().unwrap_or("--");

    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Benefits & Incentives",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Current band: "),
            Span::styled(band, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw("  Current tier: "),
            Span::styled(tier, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from("  High Incentives     combined score above 800"),
        Line::from("  Standard Benefits   everyone else"),
        Line::from(""),
        Line::from("  Elite Citizen       civic score above 850"),
        Line::from("  Active Contributor  civic score above 700"),
        Line::from("  Building Trust      civic score 700 or below"),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Benefits "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if app.session.is_running() {
        status_spans.push(Span::styled(" Processing ", Style::default().fg(Color::Black).bg(Color::Yellow)));
        status_spans.push(Span::raw(" | "));
    }

    if app.editing.is_some() {
        status_spans.push(Span::styled("Type", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Edit | "));
        status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Field | "));
        status_spans.push(Span::styled("Enter/Esc", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Done"));
    } else {
        status_spans.push(Span::styled("r", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Calculate | "));
        status_spans.push(Span::styled("e", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Edit | "));
        status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Page | "));
        status_spans.push(Span::styled("1-4", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Jump | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_trust::SimulationConfig;

    fn app(runtime: &tokio::runtime::Runtime) -> App {
        App::new(
            Session::new(Dashboard::new(), SimulationConfig::default()),
            runtime.handle().clone(),
        )
    }

    #[test]
    fn test_editing_writes_into_input_slots() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&runtime);

        app.start_editing();
        for c in "Alice".chars() {
            app.push_char(c);
        }
        app.switch_field();
        for c in "7420".chars() {
            app.push_char(c);
        }
        app.pop_char();
        app.stop_editing();
        app.push_char('x');

        let dashboard = app.session.snapshot();
        assert_eq!(dashboard.name_input, "Alice");
        assert_eq!(dashboard.credit_input, "742");
    }

    #[test]
    fn test_input_field_toggle() {
        assert_eq!(InputField::Name.toggle(), InputField::Credit);
        assert_eq!(InputField::Credit.toggle(), InputField::Name);
    }
}
