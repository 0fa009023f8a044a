use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Difficulty, GameConfig, Position, Snapshot};
use crate::metrics::GameMetrics;
use crate::modes::screen::{
    ConfirmCancel, DifficultyMenu, GameOverMenu, NamePrompt, RunChoice, Screen,
};

const BACKGROUND: Color = Color::Rgb(30, 30, 30);

/// Everything one frame needs
pub struct View<'a> {
    pub screen: &'a Screen,
    pub snapshot: &'a Snapshot,
    pub config: &'a GameConfig,
    pub metrics: &'a GameMetrics,
    pub difficulty: Difficulty,
    pub player: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Apple,
    Body,
    Head,
}

impl Tile {
    fn color(self) -> Color {
        match self {
            Tile::Empty => BACKGROUND,
            Tile::Apple => Color::Red,
            Tile::Body => Color::Yellow,
            Tile::Head => Color::Green,
        }
    }
}

/// Board as a grid of tiles, row-major
struct TileGrid {
    columns: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    fn from_snapshot(snapshot: &Snapshot, config: &GameConfig) -> Self {
        let columns = config.columns().max(0) as usize;
        let rows = config.rows().max(0) as usize;
        let mut grid = Self {
            columns,
            rows,
            tiles: vec![Tile::Empty; columns * rows],
        };

        // Later writes win: the snake covers an apple underneath it
        grid.set(snapshot.apple, config.cell_size, Tile::Apple);
        for pos in snapshot.segments.iter().skip(1) {
            grid.set(*pos, config.cell_size, Tile::Body);
        }
        if let Some(head) = snapshot.segments.first() {
            grid.set(*head, config.cell_size, Tile::Head);
        }
        grid
    }

    fn set(&mut self, pos: Position, cell_size: i32, tile: Tile) {
        if pos.x < 0 || pos.y < 0 || cell_size <= 0 {
            return;
        }
        let (col, row) = ((pos.x / cell_size) as usize, (pos.y / cell_size) as usize);
        if col < self.columns && row < self.rows {
            self.tiles[row * self.columns + col] = tile;
        }
    }

    fn get(&self, col: usize, row: usize) -> Tile {
        if col < self.columns && row < self.rows {
            self.tiles[row * self.columns + col]
        } else {
            Tile::Empty
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let board_area = self.board_area(chunks[1], view.config);
        frame.render_widget(self.render_board(view), board_area);

        match view.screen {
            Screen::NamePrompt(prompt) => self.render_popup(frame, board_area, name_prompt(prompt)),
            Screen::ConfirmCancel(confirm) => {
                self.render_popup(frame, board_area, confirm_cancel(confirm))
            }
            Screen::DifficultyMenu(menu) => {
                self.render_popup(frame, board_area, difficulty_menu(menu))
            }
            Screen::GameOver(menu) => self.render_popup(frame, board_area, game_over(menu)),
            Screen::Playing => {}
        }

        frame.render_widget(self.render_controls(view.screen), chunks[2]);
    }

    /// Board rectangle centered in `area`: one column per cell, two cells
    /// per terminal row, plus the border.
    fn board_area(&self, area: Rect, config: &GameConfig) -> Rect {
        let width = (config.columns().max(0) as u16).saturating_add(2);
        let height = ((config.rows().max(0) as u16).div_ceil(2)).saturating_add(2);
        centered(area, width, height)
    }

    fn render_board(&self, view: &View<'_>) -> Paragraph<'_> {
        let grid = TileGrid::from_snapshot(view.snapshot, view.config);
        let mut lines = Vec::with_capacity(grid.rows.div_ceil(2));

        for row in (0..grid.rows).step_by(2) {
            let spans: Vec<Span> = (0..grid.columns)
                .map(|col| {
                    let upper = grid.get(col, row);
                    let lower = grid.get(col, row + 1);
                    Span::styled("▀", Style::default().fg(upper.color()).bg(lower.color()))
                })
                .collect();
            lines.push(Line::from(spans));
        }

        let border = if view.snapshot.running {
            Color::White
        } else {
            Color::Red
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, view: &View<'_>) -> Paragraph<'_> {
        let snapshot = view.snapshot;
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(
                format!("{} ({})", snapshot.best_score, snapshot.best_player),
                value,
            ),
            Span::raw("    "),
            Span::styled("Player: ", label),
            Span::styled(view.player.to_string(), value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(view.difficulty.as_str(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.metrics.format_time(), value),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_popup(&self, frame: &mut Frame, area: Rect, popup: Popup) {
        let height = popup.lines.len() as u16 + 2;
        let width = popup
            .lines
            .iter()
            .map(|line| line.width() as u16)
            .max()
            .unwrap_or(0)
            .max(popup.title.len() as u16)
            + 4;
        let rect = centered(area, width, height);

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(popup.lines).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(popup.accent))
                    .title(popup.title),
            ),
            rect,
        );
    }

    fn render_controls(&self, screen: &Screen) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = match screen {
            Screen::Playing => Line::from(vec![
                Span::styled("↑↓←→", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move | "),
                Span::styled("Ctrl+C", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Screen::NamePrompt(_) => Line::from(vec![
                Span::styled("Enter", key),
                Span::raw(" to confirm | "),
                Span::styled("Esc", key),
                Span::raw(" to cancel"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓", key),
                Span::raw(" to choose | "),
                Span::styled("Enter", key),
                Span::raw(" to confirm"),
            ]),
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

struct Popup {
    title: &'static str,
    accent: Color,
    lines: Vec<Line<'static>>,
}

fn name_prompt(prompt: &NamePrompt) -> Popup {
    let mut lines = vec![
        Line::from("Enter your name:"),
        Line::from(vec![
            Span::styled(
                prompt.input.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(Color::Gray)),
        ]),
    ];
    if let Some(warning) = prompt.warning {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            warning,
            Style::default().fg(Color::Yellow),
        )));
    }

    Popup {
        title: " Player Name ",
        accent: Color::Cyan,
        lines,
    }
}

fn confirm_cancel(confirm: &ConfirmCancel) -> Popup {
    let mut lines = vec![Line::from("Are you sure you want to cancel?"), Line::from("")];
    lines.push(options_line(&ConfirmCancel::OPTIONS, confirm.cursor.selected));

    Popup {
        title: " Confirmation ",
        accent: Color::Yellow,
        lines,
    }
}

fn difficulty_menu(menu: &DifficultyMenu) -> Popup {
    let mut lines = vec![Line::from("Choose the difficulty level"), Line::from("")];
    let labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();
    lines.push(options_line(&labels, menu.cursor.selected));

    Popup {
        title: " Game Mode ",
        accent: Color::Cyan,
        lines,
    }
}

fn game_over(menu: &GameOverMenu) -> Popup {
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                menu.final_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if menu.new_best {
        lines.push(Line::from(Span::styled(
            "New best score!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Play again?"));
    let labels: Vec<&str> = RunChoice::ALL.iter().map(|c| c.label()).collect();
    lines.push(options_line(&labels, menu.cursor.selected));

    Popup {
        title: " Game Over ",
        accent: Color::Red,
        lines,
    }
}

/// Options on one line, the selected one highlighted
fn options_line(labels: &[&str], selected: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if i == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }
    Line::from(spans)
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn snapshot() -> Snapshot {
        Snapshot {
            segments: vec![
                Position::new(50, 50),
                Position::new(40, 50),
                Position::new(30, 50),
            ],
            apple: Position::new(40, 50),
            score: 3,
            best_score: 9,
            best_player: "Ada".to_string(),
            running: true,
        }
    }

    #[test]
    fn test_tile_grid_layers_snake_over_apple() {
        let config = GameConfig::default();
        let grid = TileGrid::from_snapshot(&snapshot(), &config);

        assert_eq!(grid.columns, 60);
        assert_eq!(grid.rows, 60);
        assert_eq!(grid.get(5, 5), Tile::Head);
        assert_eq!(grid.get(4, 5), Tile::Body);
        assert_eq!(grid.get(3, 5), Tile::Body);
        assert_eq!(grid.get(0, 0), Tile::Empty);
        assert_eq!(grid.get(99, 99), Tile::Empty);
    }

    #[test]
    fn test_tile_grid_skips_off_board_positions() {
        let config = GameConfig::default();
        let mut snap = snapshot();
        snap.segments[0] = Position::new(600, 50);
        snap.apple = Position::new(0, 0);
        let grid = TileGrid::from_snapshot(&snap, &config);

        assert_eq!(grid.get(0, 0), Tile::Apple);
        assert!(!grid.tiles.contains(&Tile::Head));
    }

    #[test]
    fn test_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered(area, 20, 10);
        assert_eq!(rect, Rect::new(40, 15, 20, 10));

        let clipped = centered(area, 200, 80);
        assert_eq!(clipped, area);
    }

    #[test]
    fn test_renders_every_screen() {
        let config = GameConfig::default();
        let snapshot = snapshot();
        let metrics = GameMetrics::new();
        let renderer = Renderer::new();
        let screens = [
            Screen::NamePrompt(NamePrompt::new()),
            Screen::ConfirmCancel(ConfirmCancel::new(NamePrompt::new())),
            Screen::DifficultyMenu(DifficultyMenu::new()),
            Screen::Playing,
            Screen::GameOver(GameOverMenu::new(3, true)),
        ];

        for screen in &screens {
            let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
            let view = View {
                screen,
                snapshot: &snapshot,
                config: &config,
                metrics: &metrics,
                difficulty: Difficulty::Medium,
                player: "Ada",
            };
            terminal
                .draw(|frame| renderer.render(frame, &view))
                .unwrap();

            let buffer = terminal.backend().buffer();
            let header: String = (0..80u16).map(|x| buffer[(x, 0)].symbol()).collect();
            assert!(header.contains("Best: 9 (Ada)"), "{header}");
        }
    }
}
