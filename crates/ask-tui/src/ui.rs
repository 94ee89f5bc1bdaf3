use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::App;
use crate::panel::Panel;

const TITLE: &str = "Startel Telecom Analytics Assistant";
const TAGLINE: &str = "Ask questions about revenue, cities, and customer behavior.";
const PLACEHOLDER: &str = "Explain city-wise revenue distribution";
const BUTTON_LABEL: &str = "[ Ask ]";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    // One consistent view of the panel per frame
    let panel = app.panel.snapshot();

    let [header_area, input_row, loader_area, answer_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let [input_area, button_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(BUTTON_LABEL.len() as u16 + 2),
    ])
    .areas(input_row);

    render_header(frame, header_area);
    render_input(frame, input_area, &panel);
    render_button(frame, button_area, &panel);
    render_loader(frame, loader_area, &panel, app.animation_frame);

    // Store answer height for page scrolling (inner size minus borders)
    app.answer_height = answer_area.height.saturating_sub(2);
    render_answer(frame, answer_area, &panel, app.answer_scroll);

    render_footer(frame, footer_area, &app.endpoint);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(TITLE.bold().fg(Color::Cyan)),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(header, area);
}

fn render_input(frame: &mut Frame, area: Rect, panel: &Panel) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Ask a question ");

    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let window = InputWindow::fit(&panel.input, panel.cursor, inner_width);

    let input = if panel.input.is_empty() {
        Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Paragraph::new(window.text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    if inner_width > 0 {
        let x = area.x + 1 + window.cursor_column as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Display width of one char in terminal columns
fn char_width(c: char) -> usize {
    let mut buf = [0; 4];
    Span::raw(&*c.encode_utf8(&mut buf)).width()
}

/// Visible slice of the input, measured in columns so wide glyphs keep the
/// cursor on the text.
#[derive(Debug, PartialEq, Eq)]
struct InputWindow {
    text: String,
    cursor_column: usize,
}

impl InputWindow {
    fn fit(input: &str, cursor: usize, width: usize) -> Self {
        let widths: Vec<(char, usize)> = input.chars().map(|c| (c, char_width(c))).collect();
        let cursor = cursor.min(widths.len());
        let columns = |from: usize, to: usize| widths[from..to].iter().map(|(_, w)| w).sum::<usize>();

        // Leave one column for the cursor cell itself
        let mut start = 0;
        while start < cursor && columns(start, cursor) + 1 > width {
            start += 1;
        }

        let mut used = 0;
        let text = widths[start..]
            .iter()
            .take_while(|(_, w)| {
                used += w;
                used <= width
            })
            .map(|(c, _)| *c)
            .collect();

        Self {
            text,
            cursor_column: columns(start, cursor),
        }
    }
}

fn render_button(frame: &mut Frame, area: Rect, panel: &Panel) {
    let style = if panel.submit_disabled {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    };

    let button = Paragraph::new(Span::styled(BUTTON_LABEL, style))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(button, area);
}

fn render_loader(frame: &mut Frame, area: Rect, panel: &Panel, animation_frame: u8) {
    if !panel.loading {
        return;
    }

    // Animated ellipsis: cycles through ".", "..", "..."
    let dots = ".".repeat(animation_frame as usize + 1);
    let loader = Paragraph::new(Span::styled(
        format!(" Analyzing{}", dots),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(loader, area);
}

fn render_answer(frame: &mut Frame, area: Rect, panel: &Panel, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Answer ");

    let text: Text = panel.answer.lines().map(Line::from).collect::<Vec<_>>().into();

    let answer = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(answer, area);
}

fn render_footer(frame: &mut Frame, area: Rect, endpoint: &str) {
    let footer = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" ask  "),
        Span::styled("↑↓/PgUp/PgDn", Style::default().fg(Color::Cyan)),
        Span::raw(" scroll  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" quit  "),
        Span::styled(endpoint.to_string(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}
