use crate::collision::Aabb;
use crate::difficulty::Difficulty;
use crate::entities::RoundOutcome;
use crate::menu::{MENU_ENTRIES, Screen};
use crate::particle::Particle;
use crate::snapshot::Snapshot;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// View struct that holds everything needed to draw one frame
pub struct RenderView<'a> {
    pub screen: Screen,
    pub difficulty: Difficulty,
    /// Latest simulation snapshot, absent until the first round starts
    pub snapshot: Option<&'a Snapshot>,
    pub particles: &'a [Particle],
    pub area: Rect,
    pub fps: u32,
}

/// Maps arena units (origin bottom-left, y up) onto terminal cells (origin top-left, y down).
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    area: Rect,
    arena_width: f32,
    arena_height: f32,
}

impl Viewport {
    pub fn new(area: Rect, arena_width: f32, arena_height: f32) -> Self {
        Self {
            area,
            arena_width,
            arena_height,
        }
    }

    fn column(&self, x: f32) -> i32 {
        (x / self.arena_width * f32::from(self.area.width)).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        ((self.arena_height - y) / self.arena_height * f32::from(self.area.height)).floor() as i32
    }

    /// Cells covered by a box, at least one, clipped to the viewport.
    pub fn cells(&self, bounds: &Aabb) -> Option<Rect> {
        let left = self.column(bounds.left());
        let right = self.column(bounds.right()).max(left + 1);
        let top = self.row(bounds.top());
        let bottom = self.row(bounds.bottom()).max(top + 1);

        let left = left.max(0);
        let right = right.min(i32::from(self.area.width));
        let top = top.max(0);
        let bottom = bottom.min(i32::from(self.area.height));
        if left >= right || top >= bottom {
            return None;
        }

        Some(Rect {
            x: self.area.x + left as u16,
            y: self.area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }

    /// Cell under a single point, if it is inside the viewport.
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = self.column(x);
        let row = self.row(y);
        if col < 0 || row < 0 || col >= i32::from(self.area.width) || row >= i32::from(self.area.height)
        {
            return None;
        }
        Some((self.area.x + col as u16, self.area.y + row as u16))
    }
}

fn fill(buffer: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn enemy_color(row: usize) -> Color {
    match row % 4 {
        0 => Color::Magenta,
        1 => Color::Cyan,
        2 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to screen-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.screen {
            Screen::Menu { selected } => self.render_menu(frame, view, selected),
            Screen::DifficultySelect { selected } => {
                self.render_difficulty_select(frame, view, selected)
            }
            Screen::Playing => match view.snapshot {
                Some(snapshot) => self.render_game(frame, view, snapshot),
                None => self.render_menu(frame, view, 0),
            },
        }
    }

    fn option_line(label: &str, highlighted: bool) -> Line<'static> {
        let style = if highlighted {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if highlighted { "> " } else { "  " };
        Line::from(Span::styled(format!("{marker}{label}"), style)).centered()
    }

    fn render_menu(&self, frame: &mut Frame, view: &RenderView, selected: usize) {
        let mut text = vec![
            Line::from(""),
            Line::from("SPACE INVADERS").centered().bold().green(),
            Line::from(""),
        ];
        for (i, entry) in MENU_ENTRIES.iter().enumerate() {
            text.push(Self::option_line(entry, i == selected));
        }
        text.push(Line::from(""));
        text.push(
            Line::from(format!("Current: {}", view.difficulty))
                .centered()
                .cyan(),
        );
        text.push(Line::from(""));
        text.push(
            Line::from("[Up/Down: Select] [Enter: Confirm] [Q: Quit]")
                .centered()
                .dark_gray(),
        );

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            centered(view.area, 50, 12),
        );
    }

    fn render_difficulty_select(&self, frame: &mut Frame, view: &RenderView, selected: usize) {
        let mut text = vec![
            Line::from(""),
            Line::from("Select Difficulty").centered().bold().yellow(),
            Line::from(""),
        ];
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            text.push(Self::option_line(difficulty.get_name(), i == selected));
        }
        text.push(Line::from(""));
        text.push(
            Line::from("[Up/Down: Select] [Enter: Confirm]")
                .centered()
                .dark_gray(),
        );

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            centered(view.area, 50, 10),
        );
    }

    /// Renders the arena, the HUD line and, once the round is over, the result banner
    fn render_game(&self, frame: &mut Frame, view: &RenderView, snapshot: &Snapshot) {
        let area = view.area;
        let arena_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(arena_area);
        frame.render_widget(block, arena_area);

        let viewport = Viewport::new(inner, snapshot.arena_width, snapshot.arena_height);
        let buffer = frame.buffer_mut();

        for (bounds, row) in &snapshot.enemies {
            if let Some(cells) = viewport.cells(bounds) {
                fill(
                    buffer,
                    cells,
                    "▓",
                    Style::default()
                        .fg(enemy_color(*row))
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        if let Some(cells) = viewport.cells(&snapshot.player) {
            fill(
                buffer,
                cells,
                "█",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );
        }

        for bounds in &snapshot.player_projectiles {
            if let Some(cells) = viewport.cells(bounds) {
                fill(buffer, cells, "|", Style::default().fg(Color::Yellow));
            }
        }
        for bounds in &snapshot.enemy_projectiles {
            if let Some(cells) = viewport.cells(bounds) {
                fill(buffer, cells, "!", Style::default().fg(Color::Magenta));
            }
        }

        for particle in view.particles {
            if let Some((x, y)) = viewport.cell(particle.x, particle.y) {
                // Color particles based on their lifetime (fade effect)
                let color = if particle.lifetime > 8 {
                    Color::Red
                } else if particle.lifetime > 4 {
                    Color::LightRed
                } else {
                    Color::Yellow
                };
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_char(particle.char)
                        .set_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
                }
            }
        }

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                snapshot.difficulty.get_name(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}/{}", snapshot.enemies_left(), snapshot.enemies_total),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Kills: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", snapshot.enemies_destroyed()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Shots: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", snapshot.player_projectiles.len()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(stats),
            Rect {
                x: area.x + 1,
                y: area.y,
                width: area.width.saturating_sub(2),
                height: 1.min(area.height),
            },
        );

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [Space: Fire] [R: Restart] [M: Menu] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        if area.height > 1 {
            frame.render_widget(
                Paragraph::new(controls).centered(),
                Rect {
                    x: area.x + 1,
                    y: area.y + area.height - 1,
                    width: area.width.saturating_sub(2),
                    height: 1,
                },
            );
        }

        if let Some(banner) = snapshot.outcome.banner() {
            self.render_outcome(frame, area, banner, snapshot);
        }
    }

    fn render_outcome(&self, frame: &mut Frame, area: Rect, banner: &str, snapshot: &Snapshot) {
        let color = if snapshot.outcome == RoundOutcome::Win {
            Color::Green
        } else {
            Color::Red
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                banner.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(""),
            Line::from(format!(
                "Enemies destroyed: {}/{}",
                snapshot.enemies_destroyed(),
                snapshot.enemies_total
            ))
            .centered()
            .yellow(),
            Line::from(""),
            Line::from("Press R to play again").centered().white(),
            Line::from("Press M for the menu, Q to quit")
                .centered()
                .white(),
        ];

        let banner_area = centered(area, 40, 9);
        frame.render_widget(Clear, banner_area);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            banner_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::simulation::{Intent, Simulation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(view_screen: Screen, snapshot: Option<&Snapshot>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("test terminal");
        let renderer = GameRenderer::new();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    screen: view_screen,
                    difficulty: Difficulty::Hard,
                    snapshot,
                    particles: &[],
                    area: frame.area(),
                    fps: 60,
                };
                renderer.render(frame, &view);
            })
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_viewport_flips_y_axis() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 60), 800.0, 600.0);
        // Top-left of the arena is the first cell
        assert_eq!(viewport.cell(0.0, 599.0), Some((0, 0)));
        // Bottom-right of the arena is the last cell
        assert_eq!(viewport.cell(799.0, 1.0), Some((79, 59)));
        assert_eq!(viewport.cell(800.0, 10.0), None);
    }

    #[test]
    fn test_viewport_box_cells() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 60), 800.0, 600.0);
        let player = Aabb::new(375.0, 50.0, 50.0, 30.0);
        assert_eq!(viewport.cells(&player), Some(Rect::new(37, 52, 5, 3)));
    }

    #[test]
    fn test_viewport_small_box_gets_one_cell() {
        let viewport = Viewport::new(Rect::new(0, 0, 10, 10), 800.0, 600.0);
        let shot = Aabb::new(397.5, 80.0, 5.0, 10.0);
        let cells = viewport.cells(&shot).expect("visible");
        assert_eq!((cells.width, cells.height), (1, 1));
    }

    #[test]
    fn test_viewport_clips_boxes_outside() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 60), 800.0, 600.0);
        assert_eq!(viewport.cells(&Aabb::new(900.0, 50.0, 10.0, 10.0)), None);
        assert_eq!(viewport.cells(&Aabb::new(10.0, -50.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_menu_shows_entries_and_difficulty() {
        let text = draw(Screen::Menu { selected: 0 }, None);
        assert!(text.contains("SPACE INVADERS"));
        assert!(text.contains("> Start Game"));
        assert!(text.contains("Set Difficulty"));
        assert!(text.contains("Current: Hard"));
    }

    #[test]
    fn test_difficulty_screen_highlights_selection() {
        let text = draw(Screen::DifficultySelect { selected: 2 }, None);
        assert!(text.contains("Select Difficulty"));
        assert!(text.contains("> Hard"));
        assert!(text.contains("Easy"));
    }

    #[test]
    fn test_game_screen_draws_hud_and_entities() {
        let sim = Simulation::new(
            GameConfig::default(),
            Difficulty::Normal,
            StdRng::seed_from_u64(1),
        );
        let snapshot = sim.snapshot();
        let text = draw(Screen::Playing, Some(&snapshot));
        assert!(text.contains("Enemies: 28/28"));
        assert!(text.contains("█"));
        assert!(text.contains("▓"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut sim = Simulation::new(
            GameConfig::default(),
            Difficulty::Normal,
            StdRng::seed_from_u64(1),
        );
        sim.step(Intent::idle());
        let mut snapshot = sim.snapshot();
        snapshot.outcome = RoundOutcome::Loss;
        let text = draw(Screen::Playing, Some(&snapshot));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Press R to play again"));
    }
}
