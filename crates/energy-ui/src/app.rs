//! Main application state and TUI event loop for the energy dashboard.
//!
//! [`App`] owns the theme, view mode, the signed-in home's records, and the
//! chat history. One event loop drives both views; `Tab` switches between
//! them.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;

use energy_assistant::engine::AssistantReply;
use energy_core::models::EnergyRecord;

use crate::chat_view::{self, ChatMessage};
use crate::dashboard_view::{self, DashboardSummary};
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Aggregate dashboard for the signed-in home.
    Dashboard,
    /// Assistant chat.
    Assistant,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the energy dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Signed-in home id.
    pub home_id: String,
    /// The home's records, already filtered by login.
    pub records: Vec<EnergyRecord>,
    /// Aggregates computed once from `records`.
    pub summary: DashboardSummary,
    /// Conversation history, seeded with the assistant's greeting.
    pub messages: Vec<ChatMessage>,
    /// `true` while a question is in flight.
    pub typing: bool,
    /// The in-progress question being typed.
    pub input: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application for one signed-in home.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        home_id: String,
        records: Vec<EnergyRecord>,
        household_size: u32,
        rate_per_kwh: f64,
        greeting: String,
    ) -> Self {
        let summary = DashboardSummary::compute(&records, household_size, rate_per_kwh);
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            home_id,
            records,
            summary,
            messages: vec![ChatMessage::assistant(greeting)],
            typing: false,
            input: String::new(),
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI, submitting questions to `question_tx` and receiving
    /// replies from `reply_rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while replies
    /// arrive on the async channel via `try_recv`.
    ///
    /// The loop exits on `Ctrl+C`, or `q` while the dashboard view is shown.
    pub async fn run(
        mut self,
        question_tx: mpsc::Sender<String>,
        mut reply_rx: mpsc::Receiver<AssistantReply>,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(&key, &question_tx);
                }
            }

            // Drain any pending replies (non-blocking).
            loop {
                match reply_rx.try_recv() {
                    Ok(reply) => self.apply_reply(reply),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key event to the application state.
    ///
    /// In the assistant view, printable keys go to the input line, so only
    /// `Ctrl+C` and `Esc` leave it; `q` quits from the dashboard.
    pub fn handle_key(&mut self, key: &KeyEvent, question_tx: &mpsc::Sender<String>) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.view_mode = match self.view_mode {
                ViewMode::Dashboard => ViewMode::Assistant,
                ViewMode::Assistant => ViewMode::Dashboard,
            };
            return;
        }

        match self.view_mode {
            ViewMode::Dashboard => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            },
            ViewMode::Assistant => match key.code {
                KeyCode::Esc => self.view_mode = ViewMode::Dashboard,
                KeyCode::Enter => self.submit_input(question_tx),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            },
        }
    }

    /// Submit the current input as a question. Empty input is ignored.
    fn submit_input(&mut self, question_tx: &mpsc::Sender<String>) {
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return;
        }
        self.input.clear();
        self.messages.push(ChatMessage::user(question.clone()));
        self.typing = true;

        if question_tx.try_send(question).is_err() {
            tracing::warn!("assistant question channel full or closed; dropping question");
            self.typing = false;
        }
    }

    /// Append a completed reply to the history and clear the typing flag.
    pub fn apply_reply(&mut self, reply: AssistantReply) {
        self.messages.push(ChatMessage::assistant(reply.answer));
        self.typing = false;
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.view_mode {
            ViewMode::Dashboard => dashboard_view::render_dashboard(
                frame,
                area,
                &self.home_id,
                &self.summary,
                &self.records,
                &self.theme,
            ),
            ViewMode::Assistant => chat_view::render_chat(
                frame,
                area,
                &self.home_id,
                &self.messages,
                self.typing,
                &self.input,
                &self.theme,
            ),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_records() -> Vec<EnergyRecord> {
        vec![EnergyRecord {
            home_id: "112".to_string(),
            appliance: "Dishwasher".to_string(),
            energy_kwh: 4.06,
            time: "16:10".to_string(),
            date: "2023-04-28".to_string(),
            outdoor_temp_c: 21.6,
            season: "Summer".to_string(),
            household_size: 1,
        }]
    }

    fn make_app(view_mode: ViewMode) -> App {
        App::new(
            "dark",
            view_mode,
            "112".to_string(),
            make_records(),
            1,
            0.15,
            "Hello! I'm your Energy Assistant for Home 112.".to_string(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = make_app(ViewMode::Dashboard);
        assert_eq!(app.home_id, "112");
        assert_eq!(app.view_mode, ViewMode::Dashboard);
        assert!(!app.should_quit);
        assert!(!app.typing);
        assert!(app.input.is_empty());
        // Greeting seeds the history.
        assert_eq!(app.messages.len(), 1);
        assert!((app.summary.total_kwh - 4.06).abs() < 1e-9);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        let app = App::new(
            "neon",
            ViewMode::Assistant,
            "18".to_string(),
            Vec::new(),
            1,
            0.15,
            "hi".to_string(),
        );
        assert_eq!(app.view_mode, ViewMode::Assistant);
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_ctrl_c_quits_from_both_views() {
        let (tx, _rx) = mpsc::channel(4);
        for view in [ViewMode::Dashboard, ViewMode::Assistant] {
            let mut app = make_app(view);
            app.handle_key(
                &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &tx,
            );
            assert!(app.should_quit);
        }
    }

    #[test]
    fn test_tab_toggles_view() {
        let (tx, _rx) = mpsc::channel(4);
        let mut app = make_app(ViewMode::Dashboard);
        app.handle_key(&key(KeyCode::Tab), &tx);
        assert_eq!(app.view_mode, ViewMode::Assistant);
        app.handle_key(&key(KeyCode::Tab), &tx);
        assert_eq!(app.view_mode, ViewMode::Dashboard);
    }

    #[test]
    fn test_q_quits_from_dashboard_only() {
        let (tx, _rx) = mpsc::channel(4);

        let mut dashboard = make_app(ViewMode::Dashboard);
        dashboard.handle_key(&key(KeyCode::Char('q')), &tx);
        assert!(dashboard.should_quit);

        // In the assistant view 'q' is just a letter being typed.
        let mut assistant = make_app(ViewMode::Assistant);
        assistant.handle_key(&key(KeyCode::Char('q')), &tx);
        assert!(!assistant.should_quit);
        assert_eq!(assistant.input, "q");
    }

    #[test]
    fn test_esc_returns_to_dashboard() {
        let (tx, _rx) = mpsc::channel(4);
        let mut app = make_app(ViewMode::Assistant);
        app.handle_key(&key(KeyCode::Esc), &tx);
        assert_eq!(app.view_mode, ViewMode::Dashboard);
    }

    #[test]
    fn test_typing_and_backspace_edit_input() {
        let (tx, _rx) = mpsc::channel(4);
        let mut app = make_app(ViewMode::Assistant);
        for c in "total?".chars() {
            app.handle_key(&key(KeyCode::Char(c)), &tx);
        }
        assert_eq!(app.input, "total?");
        app.handle_key(&key(KeyCode::Backspace), &tx);
        assert_eq!(app.input, "total");
    }

    #[test]
    fn test_enter_submits_question() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = make_app(ViewMode::Assistant);
        for c in "when is peak?".chars() {
            app.handle_key(&key(KeyCode::Char(c)), &tx);
        }
        app.handle_key(&key(KeyCode::Enter), &tx);

        assert!(app.input.is_empty());
        assert!(app.typing);
        assert_eq!(app.messages.len(), 2, "greeting + user question");
        assert_eq!(rx.try_recv().unwrap(), "when is peak?");
    }

    #[test]
    fn test_enter_with_empty_input_is_ignored() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut app = make_app(ViewMode::Assistant);
        app.handle_key(&key(KeyCode::Enter), &tx);

        assert!(!app.typing);
        assert_eq!(app.messages.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    // ── apply_reply ───────────────────────────────────────────────────────────

    #[test]
    fn test_apply_reply_appends_and_clears_typing() {
        let mut app = make_app(ViewMode::Assistant);
        app.typing = true;
        app.apply_reply(AssistantReply {
            question: "total?".to_string(),
            answer: "Your total energy consumption is 4.06 kWh.".to_string(),
        });

        assert!(!app.typing);
        let last = app.messages.last().unwrap();
        assert!(last.text.contains("4.06 kWh"));
    }
}
