//! Braille rendering of the play field. Each terminal cell holds a 2x4 grid
//! of dots, and field coordinates are measured directly in those dots.

use std::collections::HashMap;

use ratatui::prelude::*;

use crate::entities::alien::{ALIEN_HEIGHT, ALIEN_WIDTH};
use crate::entities::ship::{SHIP_HEIGHT, SHIP_WIDTH};
use crate::game::AlienInvasion;

type DotMap = HashMap<(usize, usize), u8>;

// Sprites are offsets from the centre of the entity's rect.
const ALIEN_FRAME_A: &[(i32, i32)] = &[
    (-1, -2), (1, -2),
    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
    (-3, 2), (-2, 2), (2, 2), (3, 2),
];
const ALIEN_FRAME_B: &[(i32, i32)] = &[
    (-1, -2), (1, -2),
    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-3, 1), (-1, 1), (0, 1), (1, 1), (3, 1),
    (-2, 2), (-1, 2), (1, 2), (2, 2),
];
const SHIP_SPRITE: &[(i32, i32)] = &[
    (0, -3),
    (-1, -2), (0, -2), (1, -2),
    (-1, -1), (0, -1), (1, -1),
    (-3, 0), (-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0), (3, 0),
    (-4, 1), (-3, 1), (-2, 1), (-1, 1), (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
    (-4, 2), (-3, 2), (-2, 2), (-1, 2), (0, 2), (1, 2), (2, 2), (3, 2), (4, 2),
];

fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
    match (sub_x, sub_y) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

fn set_dot(map: &mut DotMap, bx: i32, by: i32, bw: i32, bh: i32) {
    if bx < 0 || by < 0 || bx >= bw || by >= bh {
        return;
    }
    let cx = bx as usize / 2;
    let cy = by as usize / 4;
    *map.entry((cx, cy)).or_insert(0) |= braille_bit(bx as usize % 2, by as usize % 4);
}

fn write_layer(grid: &mut [Vec<(char, Style)>], map: &DotMap, color: Color, bg: Color, bold: bool) {
    for (&(cx, cy), &bits) in map {
        if cy < grid.len() && cx < grid[cy].len() && bits != 0 {
            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
            let mut style = Style::default().fg(color).bg(bg);
            if bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            grid[cy][cx] = (ch, style);
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Build the field as `height` lines of `width` braille cells.
pub fn render_field(game: &AlienInvasion, width: usize, height: usize) -> Vec<Line<'static>> {
    let bw = (width * 2) as i32;
    let bh = (height * 4) as i32;
    let settings = &game.settings;
    let bg = rgb(settings.bg_color);
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default().bg(bg)); width]; height];

    let mut stars = DotMap::new();
    for &(x, y) in &game.starfield.stars {
        set_dot(&mut stars, x as i32, y as i32, bw, bh);
    }
    write_layer(&mut grid, &stars, Color::Rgb(70, 70, 90), bg, false);

    let sprite = if (game.tick() / 15) % 2 == 0 { ALIEN_FRAME_A } else { ALIEN_FRAME_B };
    let mut aliens = DotMap::new();
    for alien in &game.aliens {
        let cx = (alien.rect.x + ALIEN_WIDTH / 2.0).floor() as i32;
        let cy = (alien.rect.y + ALIEN_HEIGHT / 2.0).floor() as i32;
        for &(dx, dy) in sprite {
            set_dot(&mut aliens, cx + dx, cy + dy, bw, bh);
        }
    }
    write_layer(&mut grid, &aliens, rgb(settings.alien_color), bg, false);

    let mut bullets = DotMap::new();
    for bullet in &game.bullets {
        let x0 = bullet.rect.x.floor() as i32;
        let y0 = bullet.rect.y.floor() as i32;
        for dy in 0..bullet.rect.height.ceil() as i32 {
            for dx in 0..bullet.rect.width.ceil() as i32 {
                set_dot(&mut bullets, x0 + dx, y0 + dy, bw, bh);
            }
        }
    }
    write_layer(&mut grid, &bullets, rgb(settings.bullet_color), bg, true);

    let mut ship = DotMap::new();
    let cx = (game.ship.rect.x + SHIP_WIDTH / 2.0).floor() as i32;
    let cy = (game.ship.rect.y + SHIP_HEIGHT / 2.0).floor() as i32;
    for &(dx, dy) in SHIP_SPRITE {
        set_dot(&mut ship, cx + dx, cy + dy, bw, bh);
    }
    write_layer(&mut grid, &ship, rgb(settings.ship_color), bg, true);

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_map_to_braille_bits() {
        let mut map = DotMap::new();
        set_dot(&mut map, 0, 0, 4, 8);
        set_dot(&mut map, 1, 3, 4, 8);
        set_dot(&mut map, 3, 4, 4, 8);
        set_dot(&mut map, 9, 9, 4, 8);
        assert_eq!(map.get(&(0, 0)), Some(&(0x01 | 0x80)));
        assert_eq!(map.get(&(1, 1)), Some(&0x08));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn sprites_fit_their_rects() {
        let fits = |sprite: &[(i32, i32)], w: f32, h: f32| {
            sprite.iter().all(|&(dx, dy)| {
                let x = (w / 2.0).floor() as i32 + dx;
                let y = (h / 2.0).floor() as i32 + dy;
                x >= 0 && (x as f32) < w && y >= 0 && (y as f32) < h
            })
        };
        assert!(fits(ALIEN_FRAME_A, ALIEN_WIDTH, ALIEN_HEIGHT));
        assert!(fits(ALIEN_FRAME_B, ALIEN_WIDTH, ALIEN_HEIGHT));
        assert!(fits(SHIP_SPRITE, SHIP_WIDTH, SHIP_HEIGHT));
    }
}
