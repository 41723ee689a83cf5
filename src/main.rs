use docopt::Docopt;
use log::{error, info, trace, warn};
use maze_game::{
    codec::FileMazeStore,
    renderers::{self, DEFAULT_IMAGE_PATH},
    session::{frame_moves, GameSession, SessionConfig},
    settings::{Settings, SETTINGS_FILE},
    viewing::ViewingGeometry,
};
use sdl2::{
    event::Event,
    keyboard::{Keycode, Scancode},
    pixels::{Color, PixelFormatEnum},
    rect::Rect,
};
use serde_derive::Deserialize;
use std::{thread, time::Duration};

mod sdl;

const USAGE: &str = "Maze game

Usage:
    maze_game_driver -h | --help
    maze_game_driver [--settings=<path>]

Options:
    -h --help            Show this screen.
    --settings=<path>    CSV file of KEY,VALUE game settings [default: settings.csv].

Arrow keys move the player, Escape or Q quits.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_settings: String,
}

const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);
const PLAYER_PIXELS: u32 = 5;

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_game::errors::Error, ::maze_game::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let settings_path = if args.flag_settings.is_empty() {
        SETTINGS_FILE
    } else {
        args.flag_settings.as_str()
    };

    let settings = Settings::load(settings_path)?;
    info!("Settings: {:?}", settings);

    let mut store = FileMazeStore::default();
    let mut session = GameSession::start(&SessionConfig::from_settings(&settings), &mut store)?;

    // A loaded maze decides the surface size, not the settings.
    let (world_width, world_height) = session.world_size();
    let viewing = ViewingGeometry::for_surface(world_width, world_height, &settings);
    if viewing.is_none() {
        warn!("No viewing plane measurements, viewing angles are not traced");
    }

    let maze_image = renderers::render_maze_image(session.grid(), settings.cell_size)?;
    if let Err(e) = session.export_maze_image(&maze_image, DEFAULT_IMAGE_PATH) {
        error!("Failed to export maze image: {}", e);
    }

    let (window_width, window_height) = maze_image.dimensions();
    let sdl_setup = sdl::init()?;
    let window = sdl_setup.video_subsystem
                          .window("Maze", window_width, window_height)
                          .position_centered()
                          .build()
                          .chain_err(|| "Failed to create the window")?;
    let mut canvas = window.into_canvas()
                           .build()
                           .chain_err(|| "Failed to create the window canvas")?;

    // The maze never changes once the session starts, so its texture is uploaded once.
    let texture_creator = canvas.texture_creator();
    let mut maze_texture = texture_creator.create_texture_static(PixelFormatEnum::ABGR8888, window_width, window_height)
                                          .chain_err(|| "Failed to create the maze texture")?;
    maze_texture.update(None, maze_image.as_raw(), window_width as usize * 4)
                .chain_err(|| "Failed to upload the maze texture")?;

    let mut event_pump = sdl_setup.sdl_context
                                  .event_pump()
                                  .map_err(|e| format!("Failed to get the SDL event pump: {}", e))?;
    let speed = settings.player_speed;

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } |
                Event::KeyDown { keycode: Some(Keycode::Escape), .. } |
                Event::KeyDown { keycode: Some(Keycode::Q), .. } => break 'running,
                _ => {}
            }
        }

        let keys = event_pump.keyboard_state();
        let moves = frame_moves(keys.is_scancode_pressed(Scancode::Up),
                                keys.is_scancode_pressed(Scancode::Down),
                                keys.is_scancode_pressed(Scancode::Left),
                                keys.is_scancode_pressed(Scancode::Right),
                                speed);
        for (dx, dy) in moves {
            session.move_player(dx, dy);
            let player = session.player();
            trace!("Player at ({:.1}, {:.1}) in cell ({}, {})",
                   player.x,
                   player.y,
                   player.cell_x,
                   player.cell_y);
            if let Some(ref viewing) = viewing {
                let (horizontal, vertical) = viewing.ray_angles(player.x, player.y);
                trace!("Viewing angles {:.2} {:.2}", horizontal, vertical);
            }
        }

        canvas.set_draw_color(Color::RGB(0xff, 0xff, 0xff));
        canvas.clear();
        canvas.copy(&maze_texture, None, None)?;

        let player = session.player();
        let half = (PLAYER_PIXELS / 2) as i32;
        canvas.set_draw_color(Color::RGB(0xff, 0, 0));
        canvas.fill_rect(Rect::new(player.x as i32 - half, player.y as i32 - half, PLAYER_PIXELS, PLAYER_PIXELS))?;
        canvas.present();

        thread::sleep(FRAME_TIME);
    }

    Ok(())
}
