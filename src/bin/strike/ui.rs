//! Control surface: every tunable of the trigger path and the modulation
//! matrix as a keyboard-driven TUI, plus an onset telemetry readout.

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use strike_dsp::config::TRIGGER_THRESHOLD_MAX;
use strike_dsp::mapping::{ParamId, ParamSpec};
use strike_dsp::{ControlFrame, Telemetry};

/// Rows: listen toggle, trigger threshold, then one per parameter.
const NUM_ROWS: usize = 2 + ParamId::ALL.len();

/// How long the trigger indicator stays lit after an onset.
const TRIGGER_FLASH: Duration = Duration::from_millis(150);

pub struct UiApp {
    control: Arc<Mutex<ControlFrame>>,
    telemetry_rx: Consumer<Telemetry>,
    sample_rate: f32,
    row: usize,
    column: usize, // 0 = base, 1 = energy mod, 2 = spectral mod
    last_onset: Telemetry,
    onset_count: u64,
    last_trigger_at: Option<Instant>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        control: Arc<Mutex<ControlFrame>>,
        telemetry_rx: Consumer<Telemetry>,
        sample_rate: f32,
    ) -> Self {
        Self {
            control,
            telemetry_rx,
            sample_rate,
            row: 0,
            column: 0,
            last_onset: Telemetry::default(),
            onset_count: 0,
            last_trigger_at: None,
            should_quit: false,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_telemetry();

            terminal.draw(|frame| self.render(frame))?;

            // Non-blocking keyboard poll, ~60fps.
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn poll_telemetry(&mut self) {
        while let Ok(telemetry) = self.telemetry_rx.pop() {
            self.last_onset = telemetry;
            self.onset_count += 1;
            self.last_trigger_at = Some(Instant::now());
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => self.row = self.row.saturating_sub(1),
            KeyCode::Down => self.row = (self.row + 1).min(NUM_ROWS - 1),
            KeyCode::Tab => self.column = (self.column + 1) % 3,
            KeyCode::Left => self.adjust(-1.0),
            KeyCode::Right => self.adjust(1.0),
            KeyCode::Char(' ') => {
                let mut frame = self.control.lock().unwrap();
                frame.listen = !frame.listen;
            }
            _ => {}
        }
    }

    fn adjust(&mut self, direction: f32) {
        let mut frame = self.control.lock().unwrap();
        match self.row {
            0 => frame.listen = direction > 0.0,
            1 => {
                frame.trigger_threshold = (frame.trigger_threshold + direction * 0.5)
                    .clamp(0.0, TRIGGER_THRESHOLD_MAX);
            }
            row => {
                let id = ParamId::ALL[row - 2];
                let mut spec = frame.mapping.get(id);
                let step = direction * 0.02;
                match self.column {
                    0 => spec.base = (spec.base + step).clamp(0.0, 1.0),
                    1 => spec.energy_mod = (spec.energy_mod + step).clamp(-1.0, 1.0),
                    _ => spec.spectral_mod = (spec.spectral_mod + step).clamp(-1.0, 1.0),
                }
                frame.mapping.set(id, spec);
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                  // Header
                Constraint::Length(NUM_ROWS as u16 + 2), // Control rows
                Constraint::Length(4),                  // Telemetry
                Constraint::Length(1),                  // Help bar
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_controls(frame, chunks[1]);
        self.render_telemetry(frame, chunks[2]);

        let help = Paragraph::new(
            " [↑↓] Row  [Tab] Base/Energy/Spectral  [←→] Adjust  [Space] Listen  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let listening = self.control.lock().unwrap().listen;
        let mode = if listening {
            Span::styled(" LISTEN ", Style::default().fg(Color::Black).bg(Color::Yellow))
        } else {
            Span::styled(" LIVE ", Style::default().fg(Color::Black).bg(Color::Green))
        };
        let title = Paragraph::new(Line::from(vec![
            Span::raw(format!(" strike @ {} Hz  ", self.sample_rate)),
            mode,
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn render_controls(&self, frame: &mut Frame, area: Rect) {
        let snapshot = *self.control.lock().unwrap();
        let mut lines = Vec::with_capacity(NUM_ROWS);

        lines.push(self.control_line(
            0,
            "Listen",
            if snapshot.listen { "on".into() } else { "off".into() },
        ));
        lines.push(self.control_line(
            1,
            "Trigger Threshold",
            format!("{:5.1} / {:.0}", snapshot.trigger_threshold, TRIGGER_THRESHOLD_MAX),
        ));

        for (i, id) in ParamId::ALL.iter().enumerate() {
            let spec = snapshot.mapping.get(*id);
            lines.push(self.param_line(i + 2, id.label(), spec));
        }

        let block = Block::default().title(" Drum Control ").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn control_line(&self, row: usize, label: &str, value: String) -> Line<'static> {
        let style = self.row_style(row);
        Line::from(vec![
            Span::styled(format!(" {label:<18}"), style),
            Span::styled(value, style),
        ])
    }

    fn param_line(&self, row: usize, label: &str, spec: ParamSpec) -> Line<'static> {
        let selected = row == self.row;
        let base_style = self.field_style(selected, 0);
        let energy_style = self.field_style(selected, 1);
        let spectral_style = self.field_style(selected, 2);

        Line::from(vec![
            Span::styled(format!(" {label:<18}"), self.row_style(row)),
            Span::styled(format!("base {:4.2}  ", spec.base), base_style),
            Span::styled(format!("energy {:+5.2}  ", spec.energy_mod), energy_style),
            Span::styled(format!("spectral {:+5.2}", spec.spectral_mod), spectral_style),
        ])
    }

    fn row_style(&self, row: usize) -> Style {
        if row == self.row {
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn field_style(&self, row_selected: bool, column: usize) -> Style {
        if row_selected && column == self.column {
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(Color::Cyan)
        } else if row_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn render_telemetry(&self, frame: &mut Frame, area: Rect) {
        let flash = self
            .last_trigger_at
            .map(|t| t.elapsed() < TRIGGER_FLASH)
            .unwrap_or(false);

        let title = if flash {
            Span::styled(" Onsets ● ", Style::default().fg(Color::Red))
        } else {
            Span::raw(" Onsets ")
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let energy = Gauge::default()
            .label(format!("energy {:.2} ({})", self.last_onset.energy, self.onset_count))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(self.last_onset.energy.clamp(0.0, 1.0) as f64);
        frame.render_widget(energy, rows[0]);

        let centroid = Gauge::default()
            .label(format!("centroid {:.2}", self.last_onset.centroid))
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(self.last_onset.centroid.clamp(0.0, 1.0) as f64);
        frame.render_widget(centroid, rows[1]);
    }
}
