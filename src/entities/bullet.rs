use crate::entities::Ship;
use crate::geometry::Rect;
use crate::settings::Settings;

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    /// A bullet leaving the middle of the ship's top edge.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let x = (ship.rect.center_x() - settings.bullet_width / 2.0).floor();
        let y = ship.rect.top() - settings.bullet_height;
        Bullet {
            rect: Rect::new(x, y, settings.bullet_width, settings.bullet_height),
        }
    }

    pub fn update(&mut self, settings: &Settings) {
        self.rect.y -= settings.bullet_speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.bottom() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn spawns_above_ship_midline() {
        let settings = Settings::default();
        let ship = Ship::new(&settings);
        let bullet = Bullet::new(&settings, &ship);
        assert_relative_eq!(bullet.rect.bottom(), ship.rect.top());
        assert!(bullet.rect.left() >= ship.rect.left());
        assert!(bullet.rect.right() <= ship.rect.right());
    }

    #[test]
    fn travels_up_until_off_screen() {
        let settings = Settings::default();
        let ship = Ship::new(&settings);
        let mut bullet = Bullet::new(&settings, &ship);
        let start = bullet.rect.y;
        bullet.update(&settings);
        assert_relative_eq!(bullet.rect.y, start - settings.bullet_speed);

        bullet.rect.y = -settings.bullet_height;
        assert!(!bullet.is_off_screen());
        bullet.update(&settings);
        assert!(bullet.is_off_screen());
    }
}
