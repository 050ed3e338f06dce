use std::thread;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::button::{self, Button};
use crate::entities::alien::build_fleet;
use crate::entities::ship::SHIP_HEIGHT;
use crate::entities::{Alien, Bullet, Ship};
use crate::geometry::first_overlap;
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::starfield::Starfield;
use crate::stats::GameStats;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameState {
    /// Title screen or game over; the Play button is shown.
    Inactive,
    Active,
}

/// Owns every piece of game state and advances it one tick at a time.
pub struct AlienInvasion {
    pub settings: Settings,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub play_button: Button,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub starfield: Starfield,
    pub should_quit: bool,
    state: GameState,
    pointer_visible: bool,
    rng: StdRng,
    tick: u64,
}

impl AlienInvasion {
    pub fn new(settings: Settings, high_score: u32, mut rng: StdRng) -> Self {
        let stats = GameStats::new(&settings, high_score);
        let scoreboard = Scoreboard::new(&stats);
        let ship = Ship::new(&settings);
        let aliens = build_fleet(&settings, SHIP_HEIGHT);
        let play_button = Button::new("Play", settings.screen_width, settings.screen_height);
        let starfield = Starfield::new(settings.screen_width, settings.screen_height, &mut rng);
        Self {
            settings,
            stats,
            scoreboard,
            play_button,
            ship,
            bullets: Vec::new(),
            aliens,
            starfield,
            should_quit: false,
            state: GameState::Inactive,
            pointer_visible: true,
            rng,
            tick: 0,
        }
    }

    pub fn state(&self) -> GameState { self.state }
    pub fn is_active(&self) -> bool { self.state == GameState::Active }
    pub fn pointer_visible(&self) -> bool { self.pointer_visible }
    pub fn tick(&self) -> u64 { self.tick }

    // ── Input ──────────────────────────────────────────────────────────

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match key.kind {
            KeyEventKind::Press => self.check_keydown(key.code),
            // Held keys only keep their movement flag alive.
            KeyEventKind::Repeat => match key.code {
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.ship.moving_right = true;
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.ship.moving_left = true;
                }
                _ => {}
            },
            KeyEventKind::Release => self.check_keyup(key.code),
        }
    }

    fn check_keydown(&mut self, code: KeyCode) {
        match code {
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.ship.moving_right = true;
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.ship.moving_left = true;
            }
            KeyCode::Char(' ') => self.fire_bullet(),
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
                if !self.is_active() {
                    self.start_game();
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn check_keyup(&mut self, code: KeyCode) {
        match code {
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.ship.moving_right = false;
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.ship.moving_left = false;
            }
            _ => {}
        }
    }

    /// `field` is the terminal area the play field was last drawn into.
    pub fn on_mouse(&mut self, mouse: MouseEvent, field: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some((x, y)) = button::cell_to_dot(field, mouse.column, mouse.row) {
            self.check_play_button(x, y);
        }
    }

    fn check_play_button(&mut self, x: f32, y: f32) {
        if self.play_button.contains(x, y) && !self.is_active() {
            self.start_game();
        }
    }

    /// The terminal changed size; `width` x `height` is the new field in dots.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.settings.screen_width && height == self.settings.screen_height {
            return;
        }
        debug!("Field resized to {}x{} dots", width, height);
        self.settings.set_screen_size(width, height);
        self.ship.clamp(&self.settings);
        self.fit_fleet();
        self.play_button.center_in(width, height);
        self.starfield = Starfield::new(width, height, &mut self.rng);
    }

    /// Bring the fleet back inside a resized field. The formation slides
    /// left if it still fits; otherwise a fleet sized for the new field
    /// replaces it.
    fn fit_fleet(&mut self) {
        let Some(left) = self.aliens.iter().map(|a| a.rect.left()).reduce(f32::min) else {
            return;
        };
        let right = self.aliens.iter().map(|a| a.rect.right()).fold(left, f32::max);
        let bottom = self.aliens.iter().map(|a| a.rect.bottom()).fold(f32::MIN, f32::max);
        let width = self.settings.screen_width as f32;

        if right - left >= width - 2.0 || bottom >= self.ship.rect.top() {
            debug!("Fleet no longer fits, rebuilding");
            self.create_fleet();
        } else if right >= width {
            let shift = right - width + 1.0;
            for alien in &mut self.aliens {
                alien.rect.x -= shift;
            }
        }
    }

    // ── State transitions ──────────────────────────────────────────────

    pub fn start_game(&mut self) {
        self.settings.initialize_dynamic_settings();
        self.stats.reset_stats(&self.settings);
        self.state = GameState::Active;
        self.scoreboard.prep_images(&self.stats);

        self.aliens.clear();
        self.bullets.clear();
        self.create_fleet();
        self.ship.center_ship(&self.settings);
        self.ship.stop();

        self.pointer_visible = false;
        info!(high_score = self.stats.high_score, "New game started");
    }

    fn fire_bullet(&mut self) {
        if !self.is_active() {
            return;
        }
        if self.bullets.len() < self.settings.bullets_allowed {
            self.bullets.push(Bullet::new(&self.settings, &self.ship));
        }
    }

    fn create_fleet(&mut self) {
        self.aliens = build_fleet(&self.settings, SHIP_HEIGHT);
    }

    fn ship_hit(&mut self) {
        self.stats.lose_ship();
        self.scoreboard.prep_ships(&self.stats);
        info!(ships_left = self.stats.ships_left, "Ship lost");

        // Let the player notice what happened.
        let pause = self.settings.ship_hit_pause();
        if !pause.is_zero() {
            thread::sleep(pause);
        }

        if self.stats.ships_left > 0 {
            self.aliens.clear();
            self.bullets.clear();
            self.create_fleet();
            self.ship.center_ship(&self.settings);
        } else {
            self.state = GameState::Inactive;
            self.pointer_visible = true;
            self.ship.stop();
            info!(score = self.stats.score, level = self.stats.level, "Game over");
        }
    }

    fn start_new_level(&mut self) {
        self.bullets.clear();
        self.create_fleet();
        self.settings.increase_speed();
        self.stats.level += 1;
        self.scoreboard.prep_level(&self.stats);
        info!(level = self.stats.level, "Fleet destroyed, next level");
    }

    // ── Per-tick update ────────────────────────────────────────────────

    pub fn on_tick(&mut self) {
        self.tick += 1;
        if !self.is_active() {
            return;
        }
        self.ship.update(&self.settings);
        self.update_bullets();
        self.update_aliens();
        if self.is_active() {
            self.check_bullet_alien_collisions();
        }
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
        self.bullets.retain(|b| !b.is_off_screen());
    }

    fn update_aliens(&mut self) {
        self.check_fleet_edges();
        for alien in &mut self.aliens {
            alien.update(&self.settings);
        }

        if let Some(i) = first_overlap(&self.ship.rect, self.aliens.iter().map(|a| &a.rect)) {
            debug!(alien = i, "Alien rammed the ship");
            self.ship_hit();
            return;
        }
        self.check_aliens_bottom();
    }

    fn check_fleet_edges(&mut self) {
        if self.aliens.iter().any(|a| a.check_edges(&self.settings)) {
            self.change_fleet_direction();
        }
    }

    fn change_fleet_direction(&mut self) {
        for alien in &mut self.aliens {
            alien.drop_by(self.settings.fleet_drop_speed);
        }
        self.settings.fleet_direction = self.settings.fleet_direction.reversed();
    }

    fn check_aliens_bottom(&mut self) {
        let bottom = self.settings.screen_height as f32;
        if self.aliens.iter().any(|a| a.rect.bottom() >= bottom) {
            debug!("Alien reached the bottom");
            self.ship_hit();
        }
    }

    fn check_bullet_alien_collisions(&mut self) {
        let mut alien_hit = vec![false; self.aliens.len()];
        let mut bullet_hit = vec![false; self.bullets.len()];

        for (bi, bullet) in self.bullets.iter().enumerate() {
            let target = self
                .aliens
                .iter()
                .enumerate()
                .find(|(ai, alien)| !alien_hit[*ai] && bullet.rect.intersects(&alien.rect))
                .map(|(ai, _)| ai);
            if let Some(ai) = target {
                alien_hit[ai] = true;
                bullet_hit[bi] = true;
            }
        }

        let destroyed = alien_hit.iter().filter(|&&hit| hit).count() as u32;
        if destroyed == 0 {
            return;
        }

        self.aliens = std::mem::take(&mut self.aliens)
            .into_iter()
            .zip(alien_hit)
            .filter(|(_, hit)| !hit)
            .map(|(alien, _)| alien)
            .collect();
        self.bullets = std::mem::take(&mut self.bullets)
            .into_iter()
            .zip(bullet_hit)
            .filter(|(_, hit)| !hit)
            .map(|(bullet, _)| bullet)
            .collect();

        self.stats.add_points(self.settings.alien_points.saturating_mul(destroyed));
        self.scoreboard.prep_score(&self.stats);
        if self.stats.check_high_score() {
            self.scoreboard.prep_high_score(&self.stats);
        }

        if self.aliens.is_empty() {
            self.start_new_level();
        }
    }
}
