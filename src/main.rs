//! NoteRunner entry point
//!
//! Sets up logging, settings, audio and the terminal shell, then runs the
//! fixed-step game loop.
//!
//! Usage: `note-runner [settings.json] [--demo]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::File;
    use std::io;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use note_runner::assets::Assets;
    use note_runner::audio::{AudioBackend, AudioManager, RodioBackend};
    use note_runner::consts::*;
    use note_runner::platform::terminal::TerminalShell;
    use note_runner::{Game, Settings};

    /// Longest frame fed to the simulation, to survive stalls
    const MAX_FRAME_DT: f32 = 0.1;
    /// Render pacing
    const FRAME_TIME: Duration = Duration::from_millis(16);
    const LOG_FILE: &str = "note_runner.log";

    struct Args {
        settings: PathBuf,
        demo: bool,
    }

    fn parse_args() -> Args {
        let mut settings = std::env::var_os("NOTE_RUNNER_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
        let mut demo = false;
        for arg in std::env::args().skip(1) {
            if arg == "--demo" {
                demo = true;
            } else {
                settings = PathBuf::from(arg);
            }
        }
        Args { settings, demo }
    }

    /// The terminal owns stdout/stderr, so logs go to a file
    fn init_logging() {
        let mut builder = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        );
        if let Ok(file) = File::create(LOG_FILE) {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        builder.init();
    }

    /// Game instance plus frame timing
    struct Runner {
        game: Game,
        accumulator: f32,
        last_time: Instant,
    }

    impl Runner {
        fn new(game: Game) -> Self {
            Self {
                game,
                accumulator: 0.0,
                last_time: Instant::now(),
            }
        }

        /// Run simulation ticks for the time since the last call
        fn update(&mut self) {
            let now = Instant::now();
            let dt = (now - self.last_time).as_secs_f32().min(MAX_FRAME_DT);
            self.last_time = now;
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.game.update(SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }
        }
    }

    pub fn run() -> io::Result<()> {
        init_logging();
        log::info!("{} starting...", SCREEN_TITLE);

        let args = parse_args();
        let mut settings = Settings::load(&args.settings);
        settings.demo |= args.demo;

        let assets = Assets::discover(&settings.assets_dir);
        let backend: Option<Box<dyn AudioBackend>> = match RodioBackend::new() {
            Ok(backend) => Some(Box::new(backend)),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        };
        let audio = AudioManager::new(backend, assets.clone(), &settings);
        let game = Game::new(&settings, assets, audio);

        let mut shell = TerminalShell::new()?;
        let mut runner = Runner::new(game);

        loop {
            let frame_start = Instant::now();

            let polled = shell.poll()?;
            if polled.quit {
                break;
            }
            for event in polled.events {
                runner.game.handle_input(event);
            }

            runner.update();
            runner.game.draw(&mut shell);
            shell.flush()?;

            if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        log::info!("Bye");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web shell; the library still builds for wasm32
}
