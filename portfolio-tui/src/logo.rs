use ratatui::{prelude::*, widgets::Paragraph};

/// Page banner drawn in the theme's primary color on its heading background.
pub fn banner(fg: Color, bg: Color) -> Paragraph<'static> {
    const WORD: [&str; 5] = [
        "████   ███  ████  █████ █████  ███  █     █  ███ ",
        "█   █ █   █ █   █   █   █     █   █ █     █ █   █",
        "████  █   █ ████    █   ████  █   █ █     █ █   █",
        "█     █   █ █  █    █   █     █   █ █     █ █   █",
        "█      ███  █   █   █   █      ███  █████ █  ███ ",
    ];

    let lines: Vec<Line> = WORD
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    Paragraph::new(lines).alignment(Alignment::Center)
}
