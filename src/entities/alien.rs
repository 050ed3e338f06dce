use crate::geometry::Rect;
use crate::settings::Settings;

pub const ALIEN_WIDTH: f32 = 8.0;
pub const ALIEN_HEIGHT: f32 = 6.0;

#[derive(Clone, Debug)]
pub struct Alien {
    pub rect: Rect,
}

impl Alien {
    pub fn new(x: f32, y: f32) -> Self {
        Alien { rect: Rect::new(x, y, ALIEN_WIDTH, ALIEN_HEIGHT) }
    }

    /// True if the alien touches either side of the screen.
    pub fn check_edges(&self, settings: &Settings) -> bool {
        self.rect.left() <= 0.0 || self.rect.right() >= settings.screen_width as f32
    }

    pub fn update(&mut self, settings: &Settings) {
        self.rect.x += settings.alien_speed * settings.fleet_direction.sign();
    }

    pub fn drop_by(&mut self, distance: u32) {
        self.rect.y += distance as f32;
    }
}

/// Lay out a full fleet: as many columns as fit with one alien-width gaps,
/// as many rows as leave room above the ship. Always at least one alien.
pub fn build_fleet(settings: &Settings, ship_height: f32) -> Vec<Alien> {
    let width = settings.screen_width as f32;
    let height = settings.screen_height as f32;

    let available_x = width - 2.0 * ALIEN_WIDTH;
    let columns = ((available_x / (2.0 * ALIEN_WIDTH)).floor() as i64).max(1) as usize;
    let available_y = height - 3.0 * ALIEN_HEIGHT - ship_height;
    let rows = ((available_y / (2.0 * ALIEN_HEIGHT)).floor() as i64).max(1) as usize;

    let mut fleet = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            fleet.push(Alien::new(
                ALIEN_WIDTH + 2.0 * ALIEN_WIDTH * col as f32,
                ALIEN_HEIGHT + 2.0 * ALIEN_HEIGHT * row as f32,
            ));
        }
    }
    fleet
}
