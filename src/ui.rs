use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::catalog;
use crate::transcript::ChatRole;

const ACCENT: Color = Color::Indexed(62); // indigo

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        if end == 0 {
            // "****" carries no text, keep it literal
            spans.push(Span::raw(rest[..start + 4].to_string()));
            rest = &after[2..];
            continue;
        }

        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        spans.push(Span::styled(
            after[..end].to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    Line::from(spans)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);
    render_site(app, frame, body_area);
    render_footer(app, frame, footer_area);

    if app.chat_open {
        render_chat(app, frame, body_area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" E4All ", Style::default().fg(Color::White).bold()),
        Span::styled("Academy ", Style::default().fg(ACCENT).bold()),
    ];
    for link in catalog::NAV_LINKS {
        spans.push(Span::styled(format!(" {link} "), Style::default().fg(Color::Gray)));
    }
    spans.push(Span::styled(
        format!(" {} ", catalog::CALL_TO_ACTION),
        Style::default().bg(ACCENT).fg(Color::White).bold(),
    ));

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(header, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn bullet(text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ✓ ", Style::default().fg(Color::Green)),
        Span::raw(text.to_string()),
    ])
}

/// Promotional sections, top to bottom
fn site_lines() -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    // Hero
    lines.push(Line::from(Span::styled(
        catalog::HERO_TITLE,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(catalog::HERO_TAGLINE));
    lines.push(Line::from(Span::styled(catalog::HERO_SOCIAL_PROOF, dim)));
    lines.push(bullet(catalog::ACCREDITATION));
    lines.push(Line::default());

    // Courses
    lines.push(heading(catalog::COURSES_HEADING));
    lines.push(Line::from(Span::styled(catalog::COURSES_SUBHEADING, dim)));
    for course in &catalog::COURSES {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            course.title,
            Style::default().fg(Color::White).bold(),
        )));
        lines.push(Line::from(course.description));
        lines.extend(course.features.iter().map(|f| bullet(f)));
    }
    lines.push(Line::default());

    // Learning formats
    lines.push(heading(catalog::FORMATS_HEADING));
    for format in &catalog::FORMATS {
        lines.push(Line::from(vec![
            Span::styled(format.title, Style::default().bold()),
            Span::styled(format!(" ({})", format.kind.as_str()), dim),
        ]));
        lines.push(Line::from(format.description));
    }
    lines.push(Line::default());

    // Stats
    let mut stats = Vec::new();
    for stat in &catalog::STATS {
        stats.push(Span::styled(
            format!(" {} ", stat.value),
            Style::default().fg(ACCENT).bold(),
        ));
        stats.push(Span::raw(format!("{}   ", stat.label)));
    }
    lines.push(Line::from(stats));
    lines.push(Line::default());

    // Contact
    lines.push(heading(catalog::NAV_LINKS[3]));
    lines.push(Line::from(catalog::ABOUT));
    lines.push(Line::from(format!("☎ {}", catalog::PHONE)));
    lines.push(Line::from(format!("✉ {}", catalog::EMAIL)));
    lines.push(Line::from(format!("⌂ {}", catalog::ADDRESS)));
    for hours in catalog::HOURS {
        lines.push(Line::from(Span::styled(format!("⏱ {hours}"), dim)));
    }
    lines.push(Line::from(Span::styled(catalog::SOCIAL.join("  "), dim)));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(format!("© {}", catalog::FOOTER), dim)));

    lines
}

fn render_site(app: &mut App, frame: &mut Frame, area: Rect) {
    let lines = site_lines();

    let wrap_width = area.width.max(1) as usize;
    let total: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(wrap_width).max(1))
        .sum();
    app.site_line_count = total.min(u16::MAX as usize) as u16;
    app.site_height = area.height;
    app.site_scroll = app
        .site_scroll
        .min(app.site_line_count.saturating_sub(app.site_height));

    let site = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true })
        .scroll((app.site_scroll, 0));

    frame.render_widget(site, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = if app.chat_open {
        let enter_label = if app.is_pending() {
            " waiting "
        } else if app.can_submit() {
            " send "
        } else {
            " type a question "
        };
        vec![
            Span::styled(" Enter ", key_style),
            Span::styled(enter_label, label_style),
            Span::styled(" ↑/↓ ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" close ", label_style),
        ]
    } else {
        vec![
            Span::styled(" c ", key_style),
            Span::styled(format!(" {} ", catalog::ADVISOR_LAUNCHER), label_style),
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Area of the chat panel: anchored bottom-left, full screen when narrow
fn chat_panel_area(area: Rect) -> Rect {
    if area.width < 60 {
        return area;
    }
    let width = 48.min(area.width);
    let height = area.height.min(30);
    Rect::new(area.x, area.y + area.height - height, width, height)
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let panel = chat_panel_area(area);
    frame.render_widget(Clear, panel);

    let [title_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(panel);

    // Store area for mouse hit-testing and sizes for scroll calculations
    app.chat_area = Some(chat_area);
    app.query_chat_height = chat_area.height.saturating_sub(2);
    app.query_chat_width = chat_area.width.saturating_sub(2);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", catalog::ADVISOR_TITLE),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!(
                " {} · {} {}",
                catalog::ADVISOR_SUBTITLE,
                app.provider.display_name(),
                app.model
            ),
            Style::default().fg(Color::Gray),
        )),
    ])
    .style(Style::default().bg(ACCENT));
    frame.render_widget(title, title_area);

    let mut lines: Vec<Line> = Vec::new();
    for turn in app.session.transcript() {
        match turn.role() {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "أنت:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    turn.text().to_string(),
                    Style::default().fg(Color::Cyan),
                )));
            }
            ChatRole::Model => {
                lines.push(Line::from(Span::styled(
                    "المستشار:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                lines.extend(turn.text().lines().map(parse_markdown_line));
            }
        }
        lines.push(Line::default());
    }

    if app.is_pending() {
        lines.push(Line::from(Span::styled(
            "المستشار:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated typing indicator: ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            dots,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.query_scroll, 0));
    frame.render_widget(chat, chat_area);

    render_input(app, frame, input_area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let border_color = if app.is_pending() {
        Color::DarkGray
    } else {
        Color::Yellow
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    // Horizontal scrolling keeps the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.query_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.query_input.is_empty() {
        Paragraph::new(Span::styled(
            catalog::INPUT_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let visible_text: String = app
            .query_input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };
    frame.render_widget(input.block(input_block), area);

    let cursor_x = (cursor_pos - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}
