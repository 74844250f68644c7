use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use frontdesk_core::{AppConfig, FrontDesk, LoyaltyLedger, RoomCatalog, RoomStore};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{
    banner,
    form::{Command, Form},
    report::{self, Report},
};

const TICK_RATE: Duration = Duration::from_millis(250);

const MENU_ITEMS: [&str; 9] = [
    "Add Room",
    "Search Room",
    "Show Available Rooms",
    "Check-in",
    "Check-out",
    "Search Customer",
    "Show Guest Summary",
    "Save Rooms",
    "Exit",
];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Report,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Interactive front-desk terminal application.
pub struct FrontDeskApp {
    desk: FrontDesk,
    store: RoomStore,
    autosave: bool,
    theme: Theme,
    screen: Screen,
    menu_cursor: usize,
    form: Option<Form>,
    report: Option<Report>,
    report_scroll: u16,
    status: String,
    status_is_error: bool,
    unsaved: bool,
    exit_armed: bool,
    should_quit: bool,
}

impl FrontDeskApp {
    /// Load the room file named by `config` and build the application.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let store = config.room_store();
        let loaded = store.load()?;
        let status = report::load_summary(&loaded);
        let status_is_error = loaded.stopped_at.is_some();
        info!(rooms = loaded.rooms.len(), "Front desk ready");
        let desk = FrontDesk::new(RoomCatalog::from_rooms(loaded.rooms), LoyaltyLedger::new());

        Ok(Self {
            desk,
            store,
            autosave: config.autosave,
            theme: Theme::default(),
            screen: Screen::Menu,
            menu_cursor: 0,
            form: None,
            report: None,
            report_scroll: 0,
            status,
            status_is_error,
            unsaved: false,
            exit_armed: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => self.handle_input(event),
                Some(AppEvent::Tick) => {}
                None => break,
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = true;
    }

    fn show_report(&mut self, report: Report) {
        self.report = Some(report);
        self.report_scroll = 0;
        self.screen = Screen::Report;
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.exit_with_save();
            return;
        }
        if self.form.is_some() {
            self.handle_form_key(key);
            return;
        }
        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Report => self.handle_report_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.exit_with_save(),
            KeyCode::Char('j') | KeyCode::Down => self.move_menu_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_menu_cursor(-1),
            KeyCode::Tab if self.report.is_some() => self.screen = Screen::Report,
            KeyCode::Enter => self.activate_menu_item(self.menu_cursor),
            KeyCode::Char(ch) => {
                if let Some(index) = ch
                    .to_digit(10)
                    .and_then(|digit| (digit as usize).checked_sub(1))
                    .filter(|index| *index < MENU_ITEMS.len())
                {
                    self.menu_cursor = index;
                    self.activate_menu_item(index);
                }
            }
            _ => {}
        }
    }

    fn handle_report_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Tab | KeyCode::Enter | KeyCode::Char('q') => {
                self.screen = Screen::Menu;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.report_scroll = self.report_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.report_scroll = self.report_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => self.report_scroll = self.report_scroll.saturating_add(10),
            KeyCode::PageUp => self.report_scroll = self.report_scroll.saturating_sub(10),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let mut submitted: Option<Command> = None;
        let mut cancel = false;
        if let Some(form) = self.form.as_mut() {
            match key.code {
                KeyCode::Esc => cancel = true,
                KeyCode::Tab | KeyCode::Down => form.move_focus(1),
                KeyCode::BackTab | KeyCode::Up => form.move_focus(-1),
                KeyCode::Enter => {
                    if form.is_last_field() || form.error.is_some() {
                        submitted = form.submit();
                    } else {
                        form.move_focus(1);
                    }
                }
                _ => {
                    if let Some(input) = form.focused_mut() {
                        match key.code {
                            KeyCode::Left => input.move_cursor(-1),
                            KeyCode::Right => input.move_cursor(1),
                            KeyCode::Home => input.move_home(),
                            KeyCode::End => input.move_end(),
                            KeyCode::Backspace => input.backspace(),
                            KeyCode::Delete => input.delete(),
                            KeyCode::Char(ch)
                                if key.modifiers.is_empty()
                                    || key.modifiers == KeyModifiers::SHIFT =>
                            {
                                input.insert(ch)
                            }
                            _ => {}
                        }
                    }
                }
            }
        }

        if cancel {
            if let Some(form) = self.form.take() {
                self.set_status(format!("{} cancelled", form.kind.title()));
            }
            return;
        }
        if let Some(command) = submitted {
            self.form = None;
            self.execute(command);
        }
    }

    fn move_menu_cursor(&mut self, delta: isize) {
        let len = MENU_ITEMS.len() as isize;
        self.menu_cursor = (self.menu_cursor as isize + delta).rem_euclid(len) as usize;
    }

    fn activate_menu_item(&mut self, index: usize) {
        if index != MENU_ITEMS.len() - 1 {
            self.exit_armed = false;
        }
        match index {
            0 => self.form = Some(Form::add_room()),
            1 => self.form = Some(Form::search_room()),
            2 => {
                let report = report::available_rooms(&self.desk.catalog().list_available());
                self.show_report(report);
            }
            3 => self.form = Some(Form::check_in(Local::now().date_naive())),
            4 => self.form = Some(Form::check_out()),
            5 => self.form = Some(Form::search_guest()),
            6 => {
                let report = report::guest_summary(&self.desk.catalog().guest_summary());
                self.show_report(report);
            }
            7 => {
                self.save_rooms();
            }
            8 => self.exit_with_save(),
            _ => {}
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::AddRoom {
                number,
                tier,
                ac,
                rent,
            } => {
                self.desk.add_room(number, tier, ac, rent);
                self.unsaved = true;
                self.set_status(format!("Room {number} Added Successfully!"));
                if self.autosave {
                    self.save_rooms();
                }
            }
            Command::SearchRoom(number) => {
                let found = self
                    .desk
                    .catalog()
                    .find_by_number(number)
                    .map(report::room_details);
                match found {
                    Ok(report) => self.show_report(report),
                    Err(err) => self.set_error(format!("Error: {err}")),
                }
            }
            Command::CheckIn {
                room_number,
                details,
            } => match self.desk.check_in(room_number, details) {
                Ok(receipt) => {
                    self.set_status(format!("Room {room_number} checked in"));
                    self.show_report(report::check_in_receipt(&receipt));
                }
                Err(err) => self.set_error(format!("Error: {err}")),
            },
            Command::CheckOut(room_number) => match self.desk.check_out(room_number) {
                Ok(statement) => {
                    self.set_status(format!("Room {room_number} checked out"));
                    self.show_report(report::check_out_statement(&statement));
                }
                Err(err) => self.set_error(format!("Error: {err}")),
            },
            Command::SearchGuest(name) => {
                let report =
                    report::guest_search(&name, &self.desk.catalog().find_by_guest_name(&name));
                self.show_report(report);
            }
        }
    }

    fn save_rooms(&mut self) -> bool {
        match self.store.save(self.desk.catalog().rooms()) {
            Ok(()) => {
                self.unsaved = false;
                self.set_status(format!("Rooms saved to {}", self.store.path().display()));
                true
            }
            Err(err) => {
                error!(?err, "Saving rooms failed");
                self.set_error(format!("Save failed: {err:#}"));
                false
            }
        }
    }

    fn exit_with_save(&mut self) {
        if self.save_rooms() || self.exit_armed {
            self.should_quit = true;
            return;
        }
        self.exit_armed = true;
        self.set_error(format!(
            "{} • choose Exit again to quit without saving",
            self.status
        ));
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let banner_lines = banner::render("Front Desk");
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((banner_lines.len() as u16 + 2).min(area.height)),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_banner(frame, layout[0], &banner_lines);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(layout[1]);
        self.render_menu(frame, body[0]);
        self.render_report(frame, body[1]);
        self.render_status(frame, layout[2]);

        if let Some(form) = &self.form {
            self.render_form(frame, form);
        }
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect, lines: &[String]) {
        let content: Vec<Line> = lines
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    line.clone(),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        let paragraph = Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL).title("Hotel Management System"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let focused = self.screen == Screen::Menu && self.form.is_none();
        let lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let label = format!("{}. {item}", idx + 1);
                if idx == self.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {label}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();
        let border_style = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let menu = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Menu"),
        );
        frame.render_widget(menu, area);
    }

    fn render_report(&self, frame: &mut Frame, area: Rect) {
        let focused = self.screen == Screen::Report && self.form.is_none();
        let border_style = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let (title, lines) = match &self.report {
            Some(report) => (
                report.title.clone(),
                report
                    .lines
                    .iter()
                    .map(|line| Line::from(line.clone()))
                    .collect::<Vec<_>>(),
            ),
            None => (
                "Welcome".to_string(),
                vec![
                    Line::from("Pick an operation from the menu."),
                    Line::from(""),
                    Line::from(Span::styled(
                        "j/k or arrows move • Enter select • 1-9 shortcut • q save & exit",
                        Style::default().fg(self.theme.muted),
                    )),
                ],
            ),
        };
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.report_scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let stats = self.desk.catalog().stats();
        let status_style = if self.status_is_error {
            Style::default().fg(self.theme.danger)
        } else {
            Style::default().fg(self.theme.success)
        };
        let mut secondary = format!(
            "Rooms: {}  Available: {}  Occupied: {}  •  {}",
            stats.total,
            stats.available,
            stats.occupied,
            self.store.path().display()
        );
        if self.unsaved {
            secondary.push_str("  (unsaved changes)");
        }
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(self.status.clone(), status_style)),
            Line::from(Span::styled(secondary, Style::default().fg(self.theme.muted))),
        ])
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_form(&self, frame: &mut Frame, form: &Form) {
        let frame_area = frame.size();
        let height = (form.fields.len() as u16 * 2 + 5).min(frame_area.height);
        let width = 64_u16.min(frame_area.width.saturating_sub(4)).max(24);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();
        let mut cursor = None;
        for (idx, field) in form.fields.iter().enumerate() {
            let label_style = if idx == form.focus {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            lines.push(Line::from(Span::styled(field.label, label_style)));
            if idx == form.focus {
                cursor = Some((field.input.cursor() as u16, lines.len() as u16));
            }
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(self.theme.accent)),
                Span::raw(field.input.value().to_string()),
            ]));
        }
        lines.push(Line::from(""));
        match &form.error {
            Some(message) => lines.push(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(self.theme.danger),
            ))),
            None => lines.push(Line::from(vec![
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" next/submit  "),
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" move  "),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" cancel"),
            ])),
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(form.kind.title()),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);

        if let Some((column, row)) = cursor {
            let x = (area.x + 3 + column).min(area.x + area.width.saturating_sub(2));
            let y = (area.y + 1 + row).min(area.y + area.height.saturating_sub(2));
            frame.set_cursor(x, y);
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
