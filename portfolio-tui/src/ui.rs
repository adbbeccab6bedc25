use crate::{
    app::{App, InputForm},
    logo,
    palette::parse_css_color,
};
use portfolio::render::{Block as Item, Element, NoticeKind, Region, StyleProperty};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

/// Theme colors resolved from the style properties the page currently has.
struct Palette {
    primary: Color,
    heading_bg: Color,
    highlight_bg: Color,
    button_bg: Color,
}

impl Palette {
    fn from_app(app: &App) -> Self {
        let doc = app.document();
        let color = |property, fallback| doc.style(property).and_then(parse_css_color).unwrap_or(fallback);
        Self {
            primary: color(StyleProperty::PrimaryColor, Color::White),
            heading_bg: color(StyleProperty::HeadingBackgroundColor, Color::Reset),
            highlight_bg: color(StyleProperty::HighlightBackgroundColor, Color::Blue),
            button_bg: color(StyleProperty::ButtonBackgroundColor, Color::DarkGray),
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::from_app(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.size());

    f.render_widget(logo::banner(palette.primary, palette.heading_bg), chunks[0]);
    render_fact(f, app, &palette, chunks[1]);
    render_comments(f, app, &palette, chunks[2]);
    render_auth(f, app, &palette, chunks[3]);
    render_notice(f, app, chunks[4]);
    render_status(f, app, &palette, chunks[5]);

    if let Some(form) = &app.form {
        render_form(f, form, &palette);
    }
}

fn panel_block<'a>(title: String, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .title_style(Style::default().fg(palette.primary).bg(palette.heading_bg).add_modifier(Modifier::BOLD))
}

fn item_lines(item: &Item) -> Vec<Line<'static>> {
    match item {
        Item::Comment { date, author, text } => vec![
            Line::from(vec![
                Span::styled(author.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(date.clone(), Style::default().fg(Color::Gray)),
            ]),
            Line::raw(text.clone()),
        ],
        Item::Placeholder(s) => vec![Line::styled(s.clone(), Style::default().add_modifier(Modifier::ITALIC))],
        Item::Text(s) => vec![Line::raw(s.clone())],
        Item::Link { label, url } => vec![Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(url.clone(), Style::default().add_modifier(Modifier::UNDERLINED)),
        ])],
        Item::Notice { message, .. } => vec![Line::raw(message.clone())],
    }
}

fn render_fact(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let lines: Vec<Line> = app.document().blocks(Region::Fact).iter().flat_map(item_lines).collect();
    let block = panel_block(format!("Fun fact · {}", app.theme().image_name), palette);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_comments(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let query = app.query();
    let sort = query.sort.map(|s| s.to_string()).unwrap_or_else(|| "default".into());
    let max = query.max_count.map(|m| m.to_string()).unwrap_or_else(|| "all".into());
    let block = panel_block(format!("Comments · sort {sort} · max {max}"), palette);
    let items: Vec<ListItem> = app
        .document()
        .blocks(Region::Comments)
        .iter()
        .map(|item| ListItem::new(item_lines(item)))
        .collect();
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.scroll.min(items.len() - 1)));
    }
    let list = List::new(items).block(block).highlight_style(Style::default().bg(palette.highlight_bg));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_auth(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let doc = app.document();
    let mut lines: Vec<Line> = doc.blocks(Region::Auth).iter().flat_map(item_lines).collect();
    if lines.is_empty() {
        lines.push(Line::raw("Login status not loaded (press r)"));
    }
    let forms = if doc.is_visible(Element::CommentForm) && doc.is_visible(Element::NameForm) {
        "n: comment  u: rename"
    } else {
        "log in to comment"
    };
    lines.push(Line::styled(forms, Style::default().fg(Color::Gray)));
    let block = panel_block("Account".into(), palette);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn render_notice(f: &mut Frame, app: &App, area: Rect) {
    let Some((kind, message)) = app.document().notice() else {
        return;
    };
    let color = match kind {
        NoticeKind::TransientFetch => Color::Yellow,
        NoticeKind::MalformedResponse => Color::Red,
    };
    f.render_widget(Paragraph::new(message.to_string()).style(Style::default().fg(color)), area);
}

fn render_status(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let (text, style) = match &app.status {
        Some(status) => (status.msg.clone(), Style::default().fg(status.color)),
        None => (
            format!("{} · ←/→ background  f fact  r refresh  s sort  m max  D delete all  q quit", app.base_url()),
            Style::default().fg(Color::White).bg(palette.button_bg),
        ),
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn render_form(f: &mut Frame, form: &InputForm, palette: &Palette) {
    let area = centered_rect(60, 30, f.size());
    f.render_widget(Clear, area);
    let block = panel_block(form.kind.title().to_string(), palette);
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == form.focus { Style::default().fg(Color::Yellow) } else { Style::default() };
            Line::styled(format!("{label}: {value}"), style)
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled("[Enter] submit  [Tab] next field  [Esc] cancel", Style::default().bg(palette.button_bg)));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
