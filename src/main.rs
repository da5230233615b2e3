use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dino_dash::build_info;
use dino_dash::core::constants::*;
use dino_dash::core::{
    compute_scale_ratio, FrameTimer, GameConfig, MonotonicClock, Simulation, TickEvent,
};
use dino_dash::input::{map_key, FrontendAction};
use dino_dash::logging;
use dino_dash::storage::{self, HighScoreStore, JsonHighScoreStore};
use dino_dash::ui::{play_field_pixels, render_runner_scene, PixelCanvas};
use dino_dash::utils::persistence;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};

struct Args {
    seed: Option<u64>,
    reset_high_score: bool,
}

fn print_usage() {
    println!(
        "Dino Dash - terminal endless runner\n\
         \n\
         Usage: dino-dash [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --seed N             Fixed RNG seed for obstacle placement\n\
         \x20 --reset-high-score   Forget the stored best score and exit\n\
         \x20 --version, -v        Show version information\n\
         \x20 --help, -h           Show this help"
    );
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        seed: None,
        reset_high_score: false,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(seed) => parsed.seed = Some(seed),
                    None => {
                        eprintln!("--seed requires a number");
                        std::process::exit(1);
                    }
                }
            }
            "--reset-high-score" => parsed.reset_high_score = true,
            "--version" | "-v" => {
                println!("{}", build_info::version_line("dino-dash"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'dino-dash --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn scale_for(area: Rect, config: &GameConfig) -> f64 {
    let (width, height) = play_field_pixels(area);
    compute_scale_ratio(width, height, config.game_width, config.game_height)
}

fn ring_bell() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(b"\x07")?;
    stdout.flush()
}

fn main() -> io::Result<()> {
    let args = parse_args();

    if args.reset_high_score {
        let mut store = JsonHighScoreStore::default_location()?;
        store.save(0)?;
        println!("High score reset ({}).", store.path().display());
        return Ok(());
    }

    // Without a data directory the game still runs, unlogged and unsaved
    match persistence::data_path(LOG_FILE) {
        Ok(path) => {
            if let Err(e) = logging::init_file_logger(&path, "info") {
                eprintln!("Warning: could not open log file: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }

    let store = storage::json_or_memory(JsonHighScoreStore::default_location());
    let config = match persistence::data_path(CONFIG_FILE) {
        Ok(path) => GameConfig::load_or_default(&path),
        Err(e) => {
            log::warn!("using default config: {}", e);
            GameConfig::default()
        }
    };
    let (cols, rows) = crossterm::terminal::size()?;
    let ratio = scale_for(Rect::new(0, 0, cols, rows), &config);
    let mut sim = Simulation::new(config, ratio, store)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut canvas = PixelCanvas::for_surface(sim.surface_size());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("starting {}", build_info::version_line("dino-dash"));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let clock = MonotonicClock::new();
    let mut timer = FrameTimer::new(sim.config().max_frame_delta_ms);
    let mut pending_resize: Option<(Instant, Rect)> = None;

    'game: loop {
        let delta = timer.tick(&clock).unwrap_or(0.0);
        for tick_event in sim.update(delta, &mut rng) {
            if let TickEvent::GameOver { .. } = tick_event {
                ring_bell()?;
            }
        }

        sim.draw(&mut canvas);
        terminal.draw(|frame| {
            let area = frame.size();
            render_runner_scene(frame, area, &sim, &canvas);
        })?;

        if event::poll(Duration::from_millis(FRAME_BUDGET_MS))? {
            loop {
                match event::read()? {
                    Event::Key(key) => match map_key(key, sim.state()) {
                        Some(FrontendAction::Quit) => break 'game,
                        Some(FrontendAction::Sim(input)) => sim.handle_input(input),
                        None => {}
                    },
                    Event::Resize(cols, rows) => {
                        pending_resize = Some((Instant::now(), Rect::new(0, 0, cols, rows)));
                    }
                    _ => {}
                }
                if !event::poll(Duration::from_millis(0))? {
                    break;
                }
            }
        }

        // Rescale once the terminal has stopped changing size
        if let Some((since, area)) = pending_resize {
            if since.elapsed() >= Duration::from_millis(RESIZE_DEBOUNCE_MS) {
                pending_resize = None;
                if sim.rescale(scale_for(area, sim.config())).is_ok() {
                    canvas = PixelCanvas::for_surface(sim.surface_size());
                }
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Best score: {}", sim.high_score());

    Ok(())
}
