//! Skirmish -- a single-player territory conquest game.
//!
//! Plays one game on the standard board with a randomly dealt mission and
//! writes the turn-by-turn report to stdout. Takes no arguments.

use std::io;
use std::process;

use log::error;

use skirmish::game::{Game, GameConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::default();
    let mut rng = config.rng();

    let mut game = match Game::new(config, &mut rng) {
        Ok(g) => g,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(e) = game.run(&mut out, &mut rng) {
        error!("{}", e);
        process::exit(1);
    }
}
