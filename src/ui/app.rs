use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::error::{LookupError, LookupPhase};
use crate::gemini::CompletionService;
use crate::lookup::{fetch_chords, resolve_song, Resolution};
use crate::models::{SongData, SongSuggestion};
use crate::pipeline::{Command, Pipeline, PipelineState, Ticket};

use super::forms::QueryInput;
use super::helpers::{centered_rect, chord_sheet_lines, spinner_frame, widest_line};
use super::screens::{SheetScroll, SuggestionCursor};

/// Height of the query bar including borders.
const SEARCH_BAR_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the title/artist header above the chord sheet.
const SHEET_HEADER_HEIGHT: u16 = 4;
/// Rows moved per PageUp/PageDown.
const PAGE_ROWS: isize = 10;
/// Columns moved per Left/Right.
const PAGE_COLUMNS: isize = 4;

/// Completed lookup delivered back to the draw loop.
pub(crate) enum LookupOutcome {
    Resolution(Result<Resolution, LookupError>),
    Chords(Result<Option<SongData>, LookupError>),
}

pub(crate) struct LookupEvent {
    pub(crate) ticket: Ticket,
    pub(crate) outcome: LookupOutcome,
}

/// Where keystrokes go.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Focus {
    Query,
    Content,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    service: Arc<dyn CompletionService>,
    runtime: Handle,
    events_tx: UnboundedSender<LookupEvent>,
    events_rx: UnboundedReceiver<LookupEvent>,
    pipeline: Pipeline,
    input: QueryInput,
    focus: Focus,
    cursor: SuggestionCursor,
    scroll: SheetScroll,
    status: Option<StatusMessage>,
    tick: usize,
}

impl App {
    /// Build the app around an injected completion service. Lookups are
    /// spawned onto `runtime` and report back through an internal channel.
    pub fn new(service: Arc<dyn CompletionService>, runtime: Handle) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            runtime,
            events_tx,
            events_rx,
            pipeline: Pipeline::new(),
            input: QueryInput::default(),
            focus: Focus::Query,
            cursor: SuggestionCursor::default(),
            scroll: SheetScroll::default(),
            status: None,
            tick: 0,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Handle a single key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        match self.focus {
            Focus::Query => self.handle_query_key(code, &mut exit),
            Focus::Content => self.handle_content_key(code, &mut exit),
        }
        Ok(exit)
    }

    fn handle_query_key(&mut self, code: KeyCode, exit: &mut bool) {
        if self.pipeline.is_loading() {
            // The field is disabled while a request is outstanding.
            if code == KeyCode::Esc && self.has_content() {
                self.focus = Focus::Content;
            }
            return;
        }

        match code {
            KeyCode::Enter => self.start_search(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Esc => {
                if self.has_content() {
                    self.focus = Focus::Content;
                } else if !self.input.is_empty() {
                    self.input.clear();
                } else if self.is_dismissable() {
                    self.pipeline.reset();
                    self.clear_status();
                } else {
                    *exit = true;
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                if self.has_content() {
                    self.focus = Focus::Content;
                }
            }
            KeyCode::Char(ch) => {
                self.input.push_char(ch);
            }
            _ => {}
        }
    }

    fn handle_content_key(&mut self, code: KeyCode, exit: &mut bool) {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
                return;
            }
            KeyCode::Char('/') | KeyCode::Tab | KeyCode::Esc => {
                self.focus = Focus::Query;
                return;
            }
            _ => {}
        }

        let loading = self.pipeline.is_loading();
        match self.pipeline.state() {
            PipelineState::AwaitingSelection { suggestions, .. } if !loading => {
                let len = suggestions.len();
                match code {
                    KeyCode::Up => self.cursor.move_selection(-1, len),
                    KeyCode::Down => self.cursor.move_selection(1, len),
                    KeyCode::Home => self.cursor.select_first(),
                    KeyCode::End => self.cursor.select_last(len),
                    KeyCode::Enter => self.select_suggestion(self.cursor.selected),
                    KeyCode::Char(ch) => {
                        if let Some(digit) = ch.to_digit(10) {
                            if digit >= 1 && (digit as usize) <= len {
                                self.cursor.selected = digit as usize - 1;
                                self.select_suggestion(self.cursor.selected);
                            }
                        }
                    }
                    _ => {}
                }
            }
            PipelineState::Displaying(song) => {
                let rows = chord_sheet_lines(song).len();
                let widest = widest_line(song);
                match code {
                    KeyCode::Up => self.scroll.scroll_rows(-1, rows),
                    KeyCode::Down => self.scroll.scroll_rows(1, rows),
                    KeyCode::PageUp => self.scroll.scroll_rows(-PAGE_ROWS, rows),
                    KeyCode::PageDown => self.scroll.scroll_rows(PAGE_ROWS, rows),
                    KeyCode::Home => self.scroll.to_top(),
                    KeyCode::End => self.scroll.to_bottom(rows),
                    KeyCode::Left => self.scroll.scroll_columns(-PAGE_COLUMNS, widest),
                    KeyCode::Right => self.scroll.scroll_columns(PAGE_COLUMNS, widest),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn has_content(&self) -> bool {
        matches!(
            self.pipeline.state(),
            PipelineState::AwaitingSelection { .. }
                | PipelineState::FetchingChords {
                    suggestions: Some(_),
                    ..
                }
                | PipelineState::Displaying(_)
        )
    }

    /// Message screens that Esc clears back to the idle view.
    fn is_dismissable(&self) -> bool {
        matches!(
            self.pipeline.state(),
            PipelineState::NoResults { .. } | PipelineState::Error(_)
        )
    }

    /// Submit the current query verbatim, discarding whatever is on screen.
    fn start_search(&mut self) {
        let query = self.input.value().to_string();
        let ticket = self.pipeline.submit_query(query.clone());
        self.cursor.reset();
        self.scroll.reset();
        self.set_status(format!("Searching for \"{query}\"..."), StatusKind::Info);

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = resolve_song(service.as_ref(), &query).await;
            let event = LookupEvent {
                ticket,
                outcome: LookupOutcome::Resolution(outcome),
            };
            if tx.send(event).is_err() {
                debug!(ticket = ticket.value(), "UI closed before resolution finished");
            }
        });
    }

    fn select_suggestion(&mut self, index: usize) {
        if let Some(command) = self.pipeline.select_suggestion(index) {
            self.run_command(command);
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::FetchChords { ticket, song } => self.spawn_fetch(ticket, song),
        }
    }

    fn spawn_fetch(&mut self, ticket: Ticket, song: SongSuggestion) {
        self.set_status(
            format!("Fetching chords for {}...", song.display_title()),
            StatusKind::Info,
        );

        let service = Arc::clone(&self.service);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let outcome = fetch_chords(service.as_ref(), &song).await;
            let event = LookupEvent {
                ticket,
                outcome: LookupOutcome::Chords(outcome),
            };
            if tx.send(event).is_err() {
                debug!(ticket = ticket.value(), "UI closed before retrieval finished");
            }
        });
    }

    /// Apply every lookup result that has arrived since the last frame.
    pub(crate) fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Wait for the next lookup result and apply it.
    pub async fn process_next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    pub(crate) fn apply_event(&mut self, event: LookupEvent) {
        if event.ticket != self.pipeline.current_ticket() {
            debug!(
                ticket = event.ticket.value(),
                latest = self.pipeline.current_ticket().value(),
                "Ignoring superseded lookup result"
            );
            return;
        }

        match event.outcome {
            LookupOutcome::Resolution(outcome) => {
                if let Some(command) = self.pipeline.apply_resolution(event.ticket, outcome) {
                    self.run_command(command);
                    return;
                }
            }
            LookupOutcome::Chords(outcome) => {
                if !self.pipeline.apply_chords(event.ticket, outcome) {
                    return;
                }
            }
        }
        self.after_transition();
    }

    /// Move focus and footer status to match the new pipeline state.
    fn after_transition(&mut self) {
        match self.pipeline.state() {
            PipelineState::AwaitingSelection { suggestions, .. } => {
                let count = suggestions.len();
                self.cursor.reset();
                self.focus = Focus::Content;
                self.set_status(
                    format!("{count} possible matches. Pick one to load its chords."),
                    StatusKind::Info,
                );
            }
            PipelineState::Displaying(song) => {
                let text = format!("Loaded {} lines.", song.lines.len());
                self.scroll.reset();
                self.focus = Focus::Content;
                self.set_status(text, StatusKind::Info);
            }
            PipelineState::NoResults { .. } => {
                self.focus = Focus::Query;
                self.clear_status();
            }
            PipelineState::Error(err) => {
                let text = err.user_message();
                self.focus = Focus::Query;
                self.set_status(text, StatusKind::Error);
            }
            _ => {}
        }
    }

    /// Advance the loading spinner.
    pub(crate) fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_BAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_search_bar(frame, chunks[0]);

        match self.pipeline.state() {
            PipelineState::Idle => self.draw_message(
                frame,
                chunks[1],
                "Type a song name and press Enter to find its chords.",
                Style::default(),
            ),
            PipelineState::Searching { query } => self.draw_message(
                frame,
                chunks[1],
                &format!("{} Searching for \"{query}\"...", spinner_frame(self.tick)),
                Style::default().fg(Color::Cyan),
            ),
            PipelineState::AwaitingSelection { suggestions, .. } => {
                self.draw_suggestions(frame, chunks[1], suggestions, true)
            }
            PipelineState::FetchingChords {
                suggestions: Some(suggestions),
                ..
            } => self.draw_suggestions(frame, chunks[1], suggestions, false),
            PipelineState::FetchingChords { song, .. } => self.draw_message(
                frame,
                chunks[1],
                &format!(
                    "{} Fetching chords for {}...",
                    spinner_frame(self.tick),
                    song.display_title()
                ),
                Style::default().fg(Color::Cyan),
            ),
            PipelineState::Displaying(song) => self.draw_chord_sheet(frame, chunks[1], song),
            PipelineState::NoResults { subject } => self.draw_message(
                frame,
                chunks[1],
                &format!("No results found for \"{subject}\". Try another search."),
                Style::default().fg(Color::Gray),
            ),
            PipelineState::Error(err) => self.draw_error(frame, chunks[1], err),
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let enabled = !self.pipeline.is_loading();
        let focused = self.focus == Focus::Query;
        let border_style = if focused && enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = if enabled {
            "Chord Finder".to_string()
        } else {
            format!("Chord Finder {}", spinner_frame(self.tick))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let paragraph = Paragraph::new(self.input.build_line(enabled)).block(block.clone());
        frame.render_widget(paragraph, area);

        if focused && enabled {
            let inner = block.inner(area);
            let cursor_x = inner.x + self.input.cursor_offset().min(inner.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    fn draw_message(&self, frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let message_area = centered_rect(80, 40, area);
        let paragraph = Paragraph::new(Span::styled(text.to_string(), style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, message_area);
    }

    fn draw_error(&self, frame: &mut Frame, area: Rect, err: &LookupError) {
        let hint = match err.phase() {
            LookupPhase::Resolution => "Check the query and press Enter to search again.",
            LookupPhase::Retrieval => "Press Enter to search again, or try another song.",
        };
        let message_area = centered_rect(80, 40, area);
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                err.user_message(),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, message_area);
    }

    fn draw_suggestions(
        &self,
        frame: &mut Frame,
        area: Rect,
        suggestions: &[SongSuggestion],
        enabled: bool,
    ) {
        let title_style = if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let artist_style = Style::default().fg(Color::Gray);

        let items: Vec<ListItem> = suggestions
            .iter()
            .enumerate()
            .map(|(idx, song)| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{}. ", idx + 1), title_style),
                        Span::styled(song.song_title.clone(), title_style),
                    ]),
                    Line::from(Span::styled(format!("   {}", song.artist), artist_style)),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                "Did you mean...?",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        let highlight = if enabled && self.focus == Focus::Content {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor.selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_chord_sheet(&self, frame: &mut Frame, area: Rect, song: &SongData) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(SHEET_HEADER_HEIGHT), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                song.song_title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::raw(song.artist.clone())),
        ])
        .block(Block::default().borders(Borders::ALL).title("Song"));
        frame.render_widget(header, chunks[0]);

        // No wrapping: the chord row only lines up if spacing is untouched.
        let sheet = Paragraph::new(chord_sheet_lines(song))
            .block(Block::default().borders(Borders::ALL).title("Chords"))
            .scroll(self.scroll.offsets());
        frame.render_widget(sheet, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        if self.focus == Focus::Query {
            if self.pipeline.is_loading() {
                return Line::from(vec![
                    Span::raw("Working...   "),
                    Span::styled("[Ctrl+C]", key_style),
                    Span::raw(" Quit"),
                ]);
            }
            return Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Search   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Results   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Back/Quit"),
            ]);
        }

        match self.pipeline.state() {
            PipelineState::AwaitingSelection { .. } => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[Enter/1-5]", key_style),
                Span::raw(" Select   "),
                Span::styled("[/]", key_style),
                Span::raw(" New search   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            PipelineState::Displaying(_) => Line::from(vec![
                Span::styled("[↑↓/PgUp/PgDn]", key_style),
                Span::raw(" Scroll   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Pan   "),
                Span::styled("[/]", key_style),
                Span::raw(" New search   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("[/]", key_style),
                Span::raw(" New search   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }
}
