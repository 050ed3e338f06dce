use crate::geometry::Rect;
use crate::settings::Settings;

pub const SHIP_WIDTH: f32 = 9.0;
pub const SHIP_HEIGHT: f32 = 6.0;

#[derive(Clone, Debug)]
pub struct Ship {
    pub rect: Rect,
    pub moving_right: bool,
    pub moving_left: bool,
}

impl Ship {
    /// A ship centred on the bottom edge of the screen.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            rect: Rect::new(0.0, 0.0, SHIP_WIDTH, SHIP_HEIGHT),
            moving_right: false,
            moving_left: false,
        };
        ship.center_ship(settings);
        ship
    }

    pub fn update(&mut self, settings: &Settings) {
        if self.moving_right {
            self.rect.x += settings.ship_speed;
        }
        if self.moving_left {
            self.rect.x -= settings.ship_speed;
        }
        self.clamp(settings);
    }

    pub fn center_ship(&mut self, settings: &Settings) {
        self.rect.x = ((settings.screen_width as f32 - SHIP_WIDTH) / 2.0).floor().max(0.0);
        self.rect.y = (settings.screen_height as f32 - SHIP_HEIGHT).max(0.0);
    }

    /// Keep the ship inside the field; also re-seats it on the bottom edge
    /// after the field is resized.
    pub fn clamp(&mut self, settings: &Settings) {
        let max_x = (settings.screen_width as f32 - SHIP_WIDTH).max(0.0);
        self.rect.x = self.rect.x.clamp(0.0, max_x);
        self.rect.y = (settings.screen_height as f32 - SHIP_HEIGHT).max(0.0);
    }

    pub fn stop(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
    }
}
