use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use maze_chase::audio::{self, Audio};
use maze_chase::input::HeldKeys;
use maze_chase::render::{self, Renderer};
use maze_chase::{logging, Config, Dir, Game, GameResult, RngSource};

fn main() -> GameResult<()> {
    logging::init_from_env()?;
    let config = Config::from_env();
    config.validate()?;

    // Audio comes up before the terminal so its warnings stay readable.
    let mut sound = audio::open();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &config, sound.as_mut());

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, config: &Config, sound: &mut dyn Audio) -> GameResult<()> {
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    info!(seed, "starting level");
    let mut rng = RngSource(StdRng::seed_from_u64(seed));

    let mut game = Game::new(config, &mut rng)?;
    let mut renderer = Renderer::new(&game);
    let mut keys = HeldKeys::new(Duration::from_millis(config.hold_ms));
    let frame_time = Duration::from_micros(1_000_000 / config.fps.max(1));

    sound.start_music();
    let mut last_frame = Instant::now();
    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        code => {
                            if let Some(dir) = dir_for_key(code) {
                                keys.press(dir, frame_start);
                            }
                        }
                    },
                    KeyEventKind::Release => {
                        if let Some(dir) = dir_for_key(key.code) {
                            keys.release(dir);
                        }
                    }
                },
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;

        let events = game.tick(dt, keys.snapshot(frame_start), &mut rng);
        audio::dispatch(sound, &events);
        render::render(stdout, &game, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Dir::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Dir::Left),
        _ => None,
    }
}
