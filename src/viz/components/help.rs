use ratatui::{prelude::*, widgets::*};

pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let lines = vec![
        vec![
            Span::from("  q  ").light_cyan().bold(),
            Span::raw(" : Quit"),
        ],
        vec![
            Span::from("  h  ").light_cyan().bold(),
            Span::raw(" : Toggle help popup"),
        ],
        vec![
            Span::from(" Tab ").light_cyan().bold(),
            Span::raw(" : Switch tabs"),
        ],
        vec![
            Span::from("Enter").light_cyan().bold(),
            Span::raw(" : Start a training run on the painted maze"),
        ],
    ];

    let additional_lines = match selected_tab {
        0 => vec![vec![
            Span::from("Click").light_cyan().bold(),
            Span::raw(" : Toggle a wall (except on start/goal, frozen while training)"),
        ]],
        1 => vec![vec![
            Span::from("⬅ / ➡").light_cyan().bold(),
            Span::raw(" : Switch plots"),
        ]],
        2 => vec![
            vec![
                Span::from("⬆ / ⬇").light_cyan().bold(),
                Span::raw(" : Scroll log history"),
            ],
            vec![
                Span::from("PgUp ").light_cyan().bold(),
                Span::raw(" : Enter page mode and scroll approx. half page up"),
            ],
            vec![
                Span::from("PgDn ").light_cyan().bold(),
                Span::raw(" : Only in page mode, scroll down in log history"),
            ],
            vec![
                Span::from(" Esc ").light_cyan().bold(),
                Span::raw(" : Exit page mode and go back to scrolling mode"),
            ],
        ],
        _ => vec![],
    };

    let lines = [lines, additional_lines]
        .concat()
        .into_iter()
        .map(Line::from)
        .collect::<Vec<_>>();

    let [_, center_vert, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length((lines.len() + 4) as u16),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(100),
        Constraint::Fill(1),
    ])
    .areas(center_vert);

    Clear.render(center, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::proportional(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(center, buf);
}
