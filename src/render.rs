//! Terminal presentation: maze canvas, agents, HUD and win banner.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::agent::Sprite;
use crate::dir::{Dir, Pos};
use crate::game::Game;
use crate::maze::Phase;

/// Screen columns of a cell interior. Wall posts take one column.
pub const CELL_W: usize = 2;
pub const WIN_TEXT: &str = "You Win!";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Post,
    Wall,
    Open,
    Floor,
    Agent(Sprite),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub glyph: Glyph,
    pub color: Color,
    pub background: Color,
}

impl Tile {
    const BLANK: Tile = Tile {
        glyph: Glyph::Open,
        color: Color::Reset,
        background: Color::Reset,
    };
}

/// Canvas of `(2 * rows + 1) x (2 * cols + 1)` units: odd/odd units are
/// cell interiors, even/even are wall posts, the rest are walls.
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

impl Canvas {
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles[y * self.width + x]
    }
}

pub fn canvas(game: &Game) -> Canvas {
    let grid = game.grid();
    let width = grid.cols() * 2 + 1;
    let height = grid.rows() * 2 + 1;
    let wall = |glyph| Tile {
        glyph,
        color: Color::Blue,
        background: Color::Reset,
    };
    let mut tiles = vec![Tile::BLANK; width * height];

    for y in 0..height {
        for x in 0..width {
            let tile = match (y % 2, x % 2) {
                (0, 0) => wall(Glyph::Post),
                (1, 1) => floor_tile(game, Pos::new(y / 2, x / 2)),
                (0, _) => {
                    // Horizontal wall: the top of the cell below, or the
                    // bottom of the last row.
                    let col = x / 2;
                    let closed = if y / 2 < grid.rows() {
                        !grid.is_open(Pos::new(y / 2, col), Dir::Up)
                    } else {
                        !grid.is_open(Pos::new(y / 2 - 1, col), Dir::Down)
                    };
                    if closed {
                        wall(Glyph::Wall)
                    } else {
                        open_tile(game, Pos::new(y / 2, col))
                    }
                }
                _ => {
                    let row = y / 2;
                    let closed = if x / 2 < grid.cols() {
                        !grid.is_open(Pos::new(row, x / 2), Dir::Left)
                    } else {
                        !grid.is_open(Pos::new(row, x / 2 - 1), Dir::Right)
                    };
                    if closed {
                        wall(Glyph::Wall)
                    } else {
                        open_tile(game, Pos::new(row, x / 2))
                    }
                }
            };
            tiles[y * width + x] = tile;
        }
    }
    Canvas {
        width,
        height,
        tiles,
    }
}

// A carved gap takes the background of the cell it opens into.
fn open_tile(game: &Game, pos: Pos) -> Tile {
    let visited = game.grid().contains(pos) && game.grid().cell_at(pos).visited;
    Tile {
        glyph: Glyph::Open,
        color: Color::Reset,
        background: if visited { Color::DarkGrey } else { Color::Reset },
    }
}

fn floor_tile(game: &Game, pos: Pos) -> Tile {
    let background = if game.grid().cell_at(pos).visited {
        Color::DarkGrey
    } else {
        Color::Reset
    };
    let sprite = if game.player().pos() == pos {
        Some(Sprite::Player)
    } else if game.enemies().iter().any(|e| e.pos() == pos) {
        Some(Sprite::Enemy)
    } else if game.goal().pos() == pos {
        Some(Sprite::Goal)
    } else {
        None
    };
    match sprite {
        Some(sprite) => Tile {
            glyph: Glyph::Agent(sprite),
            color: sprite_color(sprite),
            background,
        },
        None => Tile {
            glyph: Glyph::Floor,
            color: Color::Reset,
            background,
        },
    }
}

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Player => Color::Yellow,
        Sprite::Enemy => Color::Red,
        Sprite::Goal => Color::Magenta,
    }
}

pub fn hud_text(game: &Game) -> String {
    if game.phase() == Phase::Generating {
        return format!(
            "Carving maze... {} steps  (q to quit)",
            game.carver().steps()
        );
    }
    let music = match game.penalty().remaining() {
        Some(secs) => format!("paused {:.1}s", secs.max(0.0)),
        None => "playing".to_string(),
    };
    let status = if game.won() { "Found her!" } else { "Find Hermione" };
    format!(
        "{}  Hits: {}  Music: {}  (arrows/wasd/hjkl, q to quit)",
        status,
        game.collisions(),
        music
    )
}

/// Screen column of canvas unit `x`, relative to the maze origin.
pub fn screen_col(x: usize) -> usize {
    (x / 2) * (CELL_W + 1) + (x % 2)
}

pub fn screen_size(game: &Game) -> (u16, u16) {
    let w = game.grid().cols() * (CELL_W + 1) + 1;
    let h = game.grid().rows() * 2 + 1 + 1;
    (w as u16, h as u16)
}

pub struct Renderer {
    last: Vec<Tile>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(game: &Game) -> Self {
        let width = game.grid().cols() * 2 + 1;
        let height = game.grid().rows() * 2 + 1;
        Self {
            last: vec![Tile::BLANK; width * height],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

pub fn render(out: &mut impl Write, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let (needed_w, needed_h) = screen_size(game);

    out.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        out.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        out.queue(Print(msg))?;
        out.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        out.queue(Clear(ClearType::All))?;
    }

    let hud = hud_text(game);
    if renderer.needs_full || hud != renderer.last_hud {
        out.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        out.queue(SetForegroundColor(Color::White))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        out.queue(Print(&hud))?;
        out.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    let canvas = canvas(game);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let tile = canvas.tile(x, y);
            let idx = y * canvas.width + x;
            if renderer.needs_full || tile != renderer.last[idx] {
                renderer.last[idx] = tile;
                draw_tile(out, renderer, x, y, tile)?;
            }
        }
    }
    renderer.needs_full = false;

    if game.won() {
        draw_banner(out, renderer, needed_w, canvas.height as u16)?;
    }

    out.flush()?;
    Ok(())
}

fn draw_tile(
    out: &mut impl Write,
    renderer: &Renderer,
    x: usize,
    y: usize,
    tile: Tile,
) -> io::Result<()> {
    let text = match tile.glyph {
        Glyph::Post => "█",
        Glyph::Wall if x % 2 == 1 => "██",
        Glyph::Wall => "█",
        Glyph::Open | Glyph::Floor if x % 2 == 1 => "  ",
        Glyph::Open | Glyph::Floor => " ",
        Glyph::Agent(Sprite::Player) => "🧙",
        Glyph::Agent(Sprite::Enemy) => "👻",
        Glyph::Agent(Sprite::Goal) => "👧",
    };
    let span = if x % 2 == 1 { CELL_W } else { 1 };
    let x_pos = renderer.origin_x + screen_col(x) as u16;
    let y_pos = renderer.origin_y + y as u16;
    out.queue(MoveTo(x_pos, y_pos))?;
    out.queue(SetForegroundColor(tile.color))?;
    out.queue(SetBackgroundColor(tile.background))?;
    out.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < span {
        for _ in 0..(span - w) {
            out.queue(Print(' '))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}

fn draw_banner(
    out: &mut impl Write,
    renderer: &mut Renderer,
    maze_w: u16,
    maze_h: u16,
) -> io::Result<()> {
    let text_w = UnicodeWidthStr::width(WIN_TEXT) as u16;
    let x = renderer.origin_x + maze_w.saturating_sub(text_w) / 2;
    let y = renderer.origin_y + maze_h / 2;
    out.queue(MoveTo(x, y))?;
    out.queue(SetForegroundColor(Color::Green))?;
    out.queue(SetBackgroundColor(Color::Black))?;
    out.queue(Print(WIN_TEXT))?;
    out.queue(ResetColor)?;
    // The banner covers tiles the diff cache still believes are on screen.
    let row = (maze_h / 2) as usize;
    let width = renderer.last.len() / maze_h as usize;
    for x in 0..width {
        renderer.last[row * width + x] = Tile::BLANK;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::input::DirectionInput;
    use crate::random::ScriptedSource;

    fn carved_corridor() -> Game {
        // 1x2 grid, no enemies; the carver opens the single passage.
        let config = Config {
            rows: 1,
            cols: 2,
            enemies: 0,
            ..Config::default()
        };
        let mut rng = ScriptedSource::default();
        let mut game = Game::new(&config, &mut rng).unwrap();
        while game.phase() == Phase::Generating {
            game.tick(0.016, DirectionInput::NONE, &mut rng);
        }
        game
    }

    #[test]
    fn canvas_shows_walls_and_passages() {
        let game = carved_corridor();
        let canvas = canvas(&game);
        assert_eq!((canvas.width, canvas.height), (5, 3));
        assert_eq!(canvas.tile(0, 0).glyph, Glyph::Post);
        assert_eq!(canvas.tile(1, 0).glyph, Glyph::Wall);
        assert_eq!(canvas.tile(0, 1).glyph, Glyph::Wall);
        assert_eq!(canvas.tile(4, 1).glyph, Glyph::Wall);
        assert_eq!(canvas.tile(2, 1).glyph, Glyph::Open);
        assert_eq!(canvas.tile(2, 1).background, Color::DarkGrey);
        assert_eq!(canvas.tile(1, 2).glyph, Glyph::Wall);
    }

    #[test]
    fn canvas_places_agents() {
        let game = carved_corridor();
        let canvas = canvas(&game);
        assert_eq!(canvas.tile(1, 1).glyph, Glyph::Agent(Sprite::Player));
        assert_eq!(canvas.tile(3, 1).glyph, Glyph::Agent(Sprite::Goal));
        assert_eq!(canvas.tile(3, 1).color, Color::Magenta);
    }

    #[test]
    fn unvisited_cells_have_no_background() {
        let config = Config {
            rows: 2,
            cols: 2,
            enemies: 0,
            ..Config::default()
        };
        let mut rng = ScriptedSource::default();
        let game = Game::new(&config, &mut rng).unwrap();
        let canvas = canvas(&game);
        assert_eq!(canvas.tile(1, 1).background, Color::Reset);
        assert_eq!(canvas.tile(2, 1).glyph, Glyph::Wall);
    }

    #[test]
    fn screen_columns_interleave_posts_and_cells() {
        assert_eq!(screen_col(0), 0);
        assert_eq!(screen_col(1), 1);
        assert_eq!(screen_col(2), 3);
        assert_eq!(screen_col(3), 4);
        assert_eq!(screen_col(4), 6);
    }

    #[test]
    fn hud_follows_phase_and_penalty() {
        let config = Config {
            rows: 2,
            cols: 2,
            enemies: 0,
            ..Config::default()
        };
        let mut rng = ScriptedSource::default();
        let game = Game::new(&config, &mut rng).unwrap();
        assert!(hud_text(&game).starts_with("Carving maze... 0 steps"));

        let game = carved_corridor();
        let hud = hud_text(&game);
        assert!(hud.contains("Hits: 0"));
        assert!(hud.contains("Music: playing"));
    }
}
