//! Assistant chat view: message history, typing indicator, suggested
//! questions, and the input line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use energy_assistant::responder::SUGGESTED_QUESTIONS;

use crate::themes::Theme;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One entry in the conversation history.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Render the chat view into `area`.
///
/// `typing` adds an animated-looking indicator row below the history while a
/// reply is pending; `input` is the user's in-progress question.
pub fn render_chat(
    frame: &mut Frame,
    area: Rect,
    home_id: &str,
    messages: &[ChatMessage],
    typing: bool,
    input: &str,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(area);

    render_history(frame, chunks[0], home_id, messages, typing, theme);
    render_suggestions(frame, chunks[1], theme);
    render_input(frame, chunks[2], input, theme);
}

fn render_history(
    frame: &mut Frame,
    area: Rect,
    home_id: &str,
    messages: &[ChatMessage],
    typing: bool,
    theme: &Theme,
) {
    let wrap_width = area.width.saturating_sub(4).max(20) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for message in messages {
        let (prefix, style) = match message.sender {
            Sender::User => ("You: ", theme.chat_user),
            Sender::Assistant => ("Assistant: ", theme.chat_assistant),
        };
        for (i, wrapped) in wrap_text(&message.text, wrap_width.saturating_sub(prefix.len()))
            .into_iter()
            .enumerate()
        {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(wrapped, theme.text),
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::raw(" ".repeat(prefix.len())),
                    Span::styled(wrapped, theme.text),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    if typing {
        lines.push(Line::from(Span::styled(
            "Assistant is typing...",
            theme.chat_typing,
        )));
    }

    // Keep the newest lines visible in a fixed-height area.
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(
                    format!(" Energy Assistant · Home {} ", home_id),
                    theme.header,
                )),
        ),
        area,
    );
}

fn render_suggestions(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = SUGGESTED_QUESTIONS
        .chunks(3)
        .map(|chunk| {
            let mut spans: Vec<Span> = Vec::new();
            for (i, question) in chunk.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("  ·  ", theme.dim));
                }
                spans.push(Span::styled(*question, theme.chat_suggestion));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(" Quick questions ", theme.header)),
        ),
        area,
    );
}

fn render_input(frame: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let content = if input.is_empty() {
        Line::from(Span::styled(
            "Ask about your energy consumption... (Enter to send)",
            theme.dim,
        ))
    } else {
        Line::from(vec![
            Span::styled(input.to_string(), theme.chat_input),
            Span::styled("\u{2588}", theme.chat_input),
        ])
    };

    frame.render_widget(
        Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(Span::styled(" Your question ", theme.header)),
        ),
        area,
    );
}

/// Greedy word wrap by display width. Paragraph breaks in the source text
/// are preserved; overlong words are placed on their own line rather than
/// split mid-word.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.width() + 1 + word.width() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                out.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
    }

    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    // ── wrap_text ────────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_text_short_line_unchanged() {
        assert_eq!(wrap_text("hello world", 40), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_breaks_at_width() {
        let wrapped = wrap_text("one two three four", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_text_preserves_paragraph_breaks() {
        let wrapped = wrap_text("first\n\nsecond", 40);
        assert_eq!(wrapped, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_text_overlong_word_kept_whole() {
        let wrapped = wrap_text("a supercalifragilistic b", 5);
        assert_eq!(wrapped, vec!["a", "supercalifragilistic", "b"]);
    }

    // ── ChatMessage ──────────────────────────────────────────────────────────

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::user("hi").sender, Sender::User);
        assert_eq!(ChatMessage::assistant("hello").sender, Sender::Assistant);
    }

    // ── Render (does not panic) ──────────────────────────────────────────────

    #[test]
    fn test_render_chat_does_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let messages = vec![
            ChatMessage::assistant("Hello! I'm your Energy Assistant for Home 112."),
            ChatMessage::user("What's my total energy consumption?"),
            ChatMessage::assistant("Your total energy consumption is 7.81 kWh."),
        ];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chat(frame, area, "112", &messages, false, "next question", &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_chat_typing_indicator_does_not_panic() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let messages = vec![ChatMessage::user("when is my peak usage?")];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chat(frame, area, "112", &messages, true, "", &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_chat_small_area_does_not_panic() {
        let backend = TestBackend::new(30, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let messages = vec![ChatMessage::assistant(
            "A long answer that will certainly need to wrap across several \
             lines at this terminal width.",
        )];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chat(frame, area, "18", &messages, false, "", &theme);
            })
            .unwrap();
    }
}
