use anyhow::Context;
use log::{error, info};
use macroquad::prelude::*;
use nap_editor::{TileGrid, TileNum};

const DEFAULT_MAP: &str = "map.json";

fn window_conf() -> Conf {
    Conf {
        window_title: "Nap".into(),
        window_width: 500,
        window_height: 500,
        ..Default::default()
    }
}

/// What the frame loop should do next.
enum Flow {
    Continue,
    Exit,
}

struct MapView {
    grid: TileGrid<Texture2D>,
    selected: TileNum,
}

impl MapView {
    fn setup(path: &str) -> anyhow::Result<Self> {
        let grid = TileGrid::<Texture2D>::load(path)
            .with_context(|| format!("Loading map {}", path))?;
        request_new_screen_size(grid.w(), grid.h());
        Ok(MapView { grid, selected: 0 })
    }

    fn on_draw(&self) {
        clear_background(BLACK);
        self.grid.draw();
    }

    fn on_input(&mut self) -> Flow {
        if is_key_pressed(KeyCode::Escape) {
            return Flow::Exit;
        }

        if is_key_pressed(KeyCode::S) {
            match self.grid.save() {
                Ok(()) => info!("saved {}", self.grid.document().path().display()),
                Err(e) => error!("{}", e),
            }
        }

        let mouse = Vec2::from(mouse_position());
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(tile) = self.grid.toolbar_tile_at(mouse) {
                self.selected = tile;
            } else if let Some(pos) = self.grid.cell_at(mouse) {
                if let Err(e) = self.grid.set(pos, Some(self.selected)) {
                    error!("{}", e);
                }
            }
        } else if is_mouse_button_pressed(MouseButton::Right) {
            if let Some(pos) = self.grid.cell_at(mouse) {
                if let Err(e) = self.grid.set(pos, None) {
                    error!("{}", e);
                }
            }
        }

        Flow::Continue
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_MAP.to_string());
    let mut view = match MapView::setup(&path) {
        Ok(v) => v,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    loop {
        if let Flow::Exit = view.on_input() {
            break;
        }
        view.on_draw();
        next_frame().await;
    }
}
