use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use rand::Rng;

use crate::dialog::{ButtonStyle, DialogPrompt};
use crate::game::{GameEnd, GameSession, Phase};
use crate::metrics::SessionStats;
use crate::modes::MenuState;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_game<R: Rng>(
        &self,
        frame: &mut Frame,
        session: &GameSession<R>,
        stats: &SessionStats,
        dialog_cursor: usize,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_header(session, stats);
        frame.render_widget(header, chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let board = self.render_board(session);
        frame.render_widget(board, board_area);

        let controls = self.render_controls(session);
        frame.render_widget(controls, chunks[2]);

        // The prompt overlays everything else while it is open.
        if let Some(prompt) = session.dialog() {
            self.render_dialog(frame, prompt, dialog_cursor);
        }
    }

    pub fn render_menu(&self, frame: &mut Frame, menu: &MenuState, stats: &SessionStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Min(11),
                Constraint::Percentage(30),
            ])
            .split(frame.area());

        let marker = |selected: bool| {
            if selected {
                Span::styled("▸ ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                Span::raw("  ")
            }
        };
        let field_label = |text: &'static str, selected: bool| {
            let style = if selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(text, style)
        };

        let mut lines = vec![
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                marker(menu.is_width_selected()),
                field_label("Board width  ", menu.is_width_selected()),
                Span::styled(
                    format!("◄ {:2} ►", menu.width),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(vec![
                marker(!menu.is_width_selected()),
                field_label("Speed        ", !menu.is_width_selected()),
                Span::styled(
                    format!("◄ {} ►", menu.speed.as_str()),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("↑↓", Style::default().fg(Color::Cyan)),
                Span::raw(" field | "),
                Span::styled("◄►", Style::default().fg(Color::Cyan)),
                Span::raw(" adjust | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
        ];

        if stats.games_played > 0 {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(stats.games_played.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("High: ", Style::default().fg(Color::Yellow)),
                Span::styled(stats.high_score.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Longest: ", Style::default().fg(Color::Yellow)),
                Span::styled(stats.longest_snake.to_string(), Style::default().fg(Color::White)),
            ]));
        }

        let menu_widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Main menu "),
        );
        frame.render_widget(menu_widget, chunks[1]);
    }

    fn render_board<R: Rng>(&self, session: &GameSession<R>) -> Paragraph<'_> {
        let grid = session.grid();
        let snake = session.snake();
        let mut lines = Vec::new();

        for row in 0..grid.width() {
            let mut spans = Vec::new();

            for col in 0..grid.width() {
                let cell = grid.cell_at(row, col);

                let glyph = if cell == snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snake.contains(cell) {
                    // Snake body
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if session.apple() == Some(cell) {
                    // Apple
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(glyph);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_header<R: Rng>(
        &self,
        session: &GameSession<R>,
        stats: &SessionStats,
    ) -> Paragraph<'_> {
        let counters = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.snake().len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ]);

        let banner = match (session.phase(), session.dialog().is_some()) {
            (Phase::Paused, false) => Line::from(Span::styled(
                "P A U S E D",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            (Phase::Finished, false) => match session.end() {
                Some(GameEnd::BoardFull) => Line::from(Span::styled(
                    "Y O U   W O N",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                _ => Line::from(Span::styled(
                    "G A M E   O V E R",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
            },
            _ => Line::from(""),
        };

        Paragraph::new(vec![counters, banner]).alignment(Alignment::Center)
    }

    fn render_controls<R: Rng>(&self, session: &GameSession<R>) -> Paragraph<'_> {
        let text = if session.dialog().is_some() {
            vec![Line::from(vec![
                Span::styled("←→", Style::default().fg(Color::Cyan)),
                Span::raw(" select | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" confirm | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" dismiss"),
            ])]
        } else {
            match session.phase() {
                Phase::Running => vec![Line::from(vec![
                    Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                    Span::raw(" or "),
                    Span::styled("WASD", Style::default().fg(Color::Cyan)),
                    Span::raw(" to move | "),
                    Span::styled("Space", Style::default().fg(Color::Cyan)),
                    Span::raw(" pause | "),
                    Span::styled("R", Style::default().fg(Color::Green)),
                    Span::raw(" restart | "),
                    Span::styled("Q", Style::default().fg(Color::Red)),
                    Span::raw(" menu"),
                ])],
                Phase::Paused => vec![Line::from(vec![
                    Span::styled("Space", Style::default().fg(Color::Cyan)),
                    Span::raw(" resume | "),
                    Span::styled("R", Style::default().fg(Color::Green)),
                    Span::raw(" restart | "),
                    Span::styled("Q", Style::default().fg(Color::Red)),
                    Span::raw(" menu"),
                ])],
                Phase::Finished => vec![Line::from(vec![
                    Span::styled("R", Style::default().fg(Color::Green)),
                    Span::raw(" play again | "),
                    Span::styled("Q", Style::default().fg(Color::Red)),
                    Span::raw(" menu"),
                ])],
            }
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_dialog(&self, frame: &mut Frame, prompt: &DialogPrompt, cursor: usize) {
        let mut button_row = Vec::new();
        let mut button_width = 0;
        for (index, button) in prompt.buttons.iter().enumerate() {
            if index > 0 {
                button_row.push(Span::raw("  "));
                button_width += 2;
            }

            let color = match button.style {
                ButtonStyle::Plain => Color::White,
                ButtonStyle::Primary => Color::Green,
                ButtonStyle::Warn => Color::Red,
            };
            let mut style = Style::default().fg(color);
            if index == cursor {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }

            let label = format!("[ {} ]", button.label);
            button_width += label.len();
            button_row.push(Span::styled(label, style));
        }

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt.message.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(button_row),
            Line::from(""),
        ];

        let inner_width = prompt.message.chars().count().max(button_width) + 4;
        let area = popup_area(frame.area(), inner_width as u16 + 2, 7);

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Yellow)),
            ),
            area,
        );
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_area_is_centered_and_clamped() {
        let screen = Rect::new(0, 0, 80, 24);

        let popup = popup_area(screen, 40, 7);
        assert_eq!(popup, Rect::new(20, 8, 40, 7));

        let oversized = popup_area(screen, 200, 50);
        assert_eq!(oversized, screen);
    }
}
