//! # Delve Main Entry Point
//!
//! Parses command line options, generates the dungeon, then runs the
//! macroquad frame loop: render, decode one keypress for the current
//! input mode, apply it as a mode transition or a game turn.

use clap::Parser;
use delve::game::log::colors;
use delve::{
    generation, ui, Action, Command, DelveResult, Display, Entity, GameState, GenerationConfig,
    InputHandler, InputMode,
};
use log::info;
use macroquad::prelude::next_frame;

/// Command line arguments for the Delve dungeon crawler.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in tiles
    #[arg(long, default_value_t = delve::config::DEFAULT_MAP_WIDTH)]
    map_width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = delve::config::DEFAULT_MAP_HEIGHT)]
    map_height: i32,

    /// Maximum number of room placement attempts
    #[arg(long, default_value_t = delve::config::DEFAULT_MAX_ROOMS)]
    max_rooms: u32,

    /// Maximum monsters seeded per room
    #[arg(long, default_value_t = delve::config::DEFAULT_MAX_MONSTERS_PER_ROOM)]
    max_monsters: u32,

    /// Maximum items seeded per room
    #[arg(long, default_value_t = delve::config::DEFAULT_MAX_ITEMS_PER_ROOM)]
    max_items: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Delve")]
async fn main() -> DelveResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.as_str()),
    )
    .init();

    info!("Starting Delve v{}", delve::VERSION);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = GenerationConfig::new(seed);
    config.map_width = args.map_width;
    config.map_height = args.map_height;
    config.max_rooms = args.max_rooms;
    config.max_monsters_per_room = args.max_monsters;
    config.max_items_per_room = args.max_items;

    info!("Generating dungeon with seed {}", seed);
    let mut rng = config.create_rng();
    let player = Entity::player();
    let player_id = player.id;
    let map = generation::generate_dungeon(&config, &mut rng, player);

    let mut state = GameState::new(map, player_id);
    state.log.add(
        "Hello and welcome, adventurer, to yet another dungeon!",
        colors::WELCOME_TEXT,
    );

    let display = Display::new();
    let input_handler = InputHandler::new();

    loop {
        display.render(&state);

        if let Some(command) = input_handler.poll(state.mode) {
            if !handle_command(&mut state, &display, command)? {
                break;
            }
        }

        next_frame().await;
    }

    info!("Session ended after {} turns", state.turn_number);
    Ok(())
}

/// Applies one decoded command. Returns `Ok(false)` when the session
/// should end.
fn handle_command(state: &mut GameState, display: &Display, command: Command) -> DelveResult<bool> {
    match command {
        Command::Quit => return Ok(false),

        Command::Bump { dx, dy } => {
            state.process_turn(Action::Bump { dx, dy })?;
        }
        Command::Wait => {
            state.process_turn(Action::Wait)?;
        }
        Command::PickUp => {
            state.process_turn(Action::PickUp)?;
        }

        Command::OpenInventoryUse => state.mode = InputMode::InventoryUse,
        Command::OpenInventoryDrop => state.mode = InputMode::InventoryDrop,
        Command::OpenHistory => state.mode = InputMode::History { offset: 0 },

        Command::SelectSlot(slot) => {
            let item_id = state.player_items().get(slot).map(|item| item.id);
            match item_id {
                Some(item_id) => {
                    let action = match state.mode {
                        InputMode::InventoryDrop => Action::Drop { item_id },
                        _ => Action::UseItem { item_id },
                    };
                    // Leave the menu first; a fatal turn may flip the mode
                    // to GameOver and that must stick.
                    state.mode = InputMode::MainGame;
                    state.process_turn(action)?;
                }
                None => {
                    state.log.add("Invalid entry.", colors::IMPOSSIBLE);
                }
            }
        }

        Command::ScrollHistory(delta) => {
            if let InputMode::History { offset } = state.mode {
                let lines = display.history_lines();
                let clamped = ui::scroll_offset(state.log.messages.len(), lines, offset, delta);
                state.mode = InputMode::History { offset: clamped };
            }
        }
        Command::HistoryOldest => {
            let lines = display.history_lines();
            let offset = state.log.messages.len().saturating_sub(lines);
            state.mode = InputMode::History { offset };
        }
        Command::HistoryNewest => state.mode = InputMode::History { offset: 0 },

        Command::Dismiss => {
            // The history view is reachable from the death screen too.
            let player_alive = state.player().map(Entity::is_alive).unwrap_or(false);
            state.mode = if player_alive {
                InputMode::MainGame
            } else {
                InputMode::GameOver
            };
        }
    }
    Ok(true)
}
