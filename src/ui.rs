use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::{App, Focus};
use crate::state::ChatRole;

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }

            let mut bold_text = String::new();
            let mut found_close = false;
            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    Line::from(spans)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, selectors_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);
    render_selectors(app, frame, selectors_area);
    render_transcript(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" Fast Agent Desktop ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::Black));
    frame.render_widget(header, area);
}

/// One line of options with the selected one highlighted.
fn option_line<'a>(options: &[&'a str], selected: Option<usize>, focused: bool) -> Line<'a> {
    let highlight = if focused {
        Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let mut spans = Vec::with_capacity(options.len() * 2);
    for (i, option) in options.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if selected == Some(i) { highlight } else { Style::default().fg(Color::Gray) };
        spans.push(Span::styled(format!(" {} ", option), style));
    }
    Line::from(spans)
}

fn selector_block(title: &'static str, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
}

fn render_selectors(app: &App, frame: &mut Frame, area: Rect) {
    let [agent_area, model_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    // Until the list loads, the current selection is all there is to show
    let agent_focused = app.focus == Focus::Agent;
    let agent_line = if app.agents.is_empty() {
        option_line(&[app.selected_agent.as_str()], Some(0), agent_focused)
    } else {
        let agents: Vec<&str> = app.agents.iter().map(String::as_str).collect();
        option_line(&agents, app.agent_index(), agent_focused)
    };
    frame.render_widget(
        Paragraph::new(agent_line).block(selector_block(" Agent ", agent_focused)),
        agent_area,
    );

    let model_focused = app.focus == Focus::Model;
    let model_line = option_line(&app.model_options(), Some(app.model_index()), model_focused);
    frame.render_widget(
        Paragraph::new(model_line).block(selector_block(" Model ", model_focused)),
        model_area,
    );
}

fn transcript_text(app: &App) -> Text<'static> {
    if app.transcript.is_empty() && !app.loading {
        return Text::from(Span::styled(
            "Start a conversation with the agent",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut lines: Vec<Line<'static>> = Vec::new();

    for msg in &app.transcript {
        let label_style = match msg.role {
            ChatRole::User => Style::default().fg(Color::Cyan),
            ChatRole::Assistant => Style::default().fg(Color::Yellow),
            ChatRole::System => Style::default().fg(Color::Red),
        };
        lines.push(Line::from(Span::styled(
            msg.role.label(),
            label_style.add_modifier(Modifier::BOLD),
        )));

        let body = msg.content.lines();
        match msg.role {
            ChatRole::Assistant => lines.extend(body.map(parse_markdown_line)),
            ChatRole::User => lines.extend(body.map(|l| Line::from(l.to_string()))),
            ChatRole::System => lines.extend(body.map(|l| {
                Line::from(Span::styled(l.to_string(), Style::default().fg(Color::DarkGray)))
            })),
        }
        lines.push(Line::default());
    }

    if app.loading {
        lines.push(Line::from(Span::styled(
            ChatRole::Assistant.label(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    Text::from(lines)
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    // Raw user drafts keep their leading whitespace
    let chat = Paragraph::new(transcript_text(app)).wrap(Wrap { trim: false });

    // Scroll against the wrapped height ratatui will actually draw
    app.set_rendered_lines(chat.line_count(app.chat_width));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", app.selected_agent));

    frame.render_widget(chat.block(block).scroll((app.chat_scroll, 0)), area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border_color = if app.loading {
        Color::DarkGray
    } else if focused {
        Color::Yellow
    } else {
        Color::Gray
    };
    let title = if app.loading { " Message (waiting for agent) " } else { " Message " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    // Horizontal scrolling keeps the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width > 0 && app.cursor >= inner_width {
        app.cursor - inner_width + 1
    } else {
        0
    };

    let input = if app.draft.is_empty() {
        Paragraph::new(Span::styled(
            "Type your message...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let visible_text: String =
            app.draft.chars().skip(scroll_offset).take(inner_width).collect();
        let style = if app.loading {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Paragraph::new(visible_text).style(style)
    };

    frame.render_widget(input.block(block), area);

    if focused && !app.loading {
        let cursor_x = (app.cursor - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let disabled_style = Style::default().bg(Color::Black).fg(Color::DarkGray);

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" Send ", if app.can_submit() { label_style } else { disabled_style }),
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", label_style),
    ];
    if app.focus != Focus::Input {
        hints.extend([
            Span::styled(" j/k ", key_style),
            Span::styled(" select ", label_style),
        ]);
    }
    hints.extend([
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
