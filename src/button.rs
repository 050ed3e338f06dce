use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::geometry;

// Multiples of the braille cell size so the button lands on whole cells.
const BUTTON_WIDTH: f32 = 20.0;
const BUTTON_HEIGHT: f32 = 12.0;

#[derive(Clone, Debug)]
pub struct Button {
    pub rect: geometry::Rect,
    pub label: String,
    button_color: Color,
    text_color: Color,
}

impl Button {
    /// A button centred on a `width` x `height` dot field.
    pub fn new(label: &str, width: u32, height: u32) -> Self {
        let mut button = Button {
            rect: geometry::Rect::new(0.0, 0.0, BUTTON_WIDTH, BUTTON_HEIGHT),
            label: label.to_string(),
            button_color: Color::Rgb(0, 135, 0),
            text_color: Color::Rgb(255, 255, 255),
        };
        button.center_in(width, height);
        button
    }

    pub fn center_in(&mut self, width: u32, height: u32) {
        let x = (width as f32 - BUTTON_WIDTH).max(0.0) / 2.0;
        let y = (height as f32 - BUTTON_HEIGHT).max(0.0) / 2.0;
        self.rect.x = (x / 2.0).floor() * 2.0;
        self.rect.y = (y / 4.0).floor() * 4.0;
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    /// Draw onto `field`, the terminal area whose dots the rect is measured in.
    pub fn render(&self, frame: &mut Frame, field: Rect) {
        let x = field.x + (self.rect.x / 2.0) as u16;
        let y = field.y + (self.rect.y / 4.0) as u16;
        let w = ((self.rect.width / 2.0) as u16).min(field.right().saturating_sub(x));
        let h = ((self.rect.height / 4.0) as u16).min(field.bottom().saturating_sub(y));
        if w == 0 || h == 0 {
            return;
        }
        let area = Rect::new(x, y, w, h);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(self.text_color))
            .style(Style::default().bg(self.button_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = Paragraph::new(Line::from(Span::styled(
            self.label.as_str(),
            Style::default().fg(self.text_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(label, inner);
    }
}

/// Map a terminal cell to the dot at its centre, if it lies inside `field`.
pub fn cell_to_dot(field: Rect, column: u16, row: u16) -> Option<(f32, f32)> {
    if column < field.x || row < field.y || column >= field.right() || row >= field.bottom() {
        return None;
    }
    let dx = (column - field.x) as f32 * 2.0 + 1.0;
    let dy = (row - field.y) as f32 * 4.0 + 2.0;
    Some((dx, dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_on_whole_cells() {
        let button = Button::new("Play", 160, 96);
        assert_eq!(button.rect.x, 70.0);
        assert_eq!(button.rect.y, 40.0);
    }

    #[test]
    fn click_on_button_cells_hits() {
        let field = Rect::new(1, 2, 80, 24);
        let button = Button::new("Play", 160, 96);
        // Button covers cells 35..45 x 10..13 of the field.
        let (x, y) = cell_to_dot(field, field.x + 35, field.y + 10).unwrap();
        assert!(button.contains(x, y));
        let (x, y) = cell_to_dot(field, field.x + 44, field.y + 12).unwrap();
        assert!(button.contains(x, y));
        let (x, y) = cell_to_dot(field, field.x + 45, field.y + 12).unwrap();
        assert!(!button.contains(x, y));
        let (x, y) = cell_to_dot(field, field.x + 40, field.y + 13).unwrap();
        assert!(!button.contains(x, y));
    }

    #[test]
    fn clicks_outside_field_are_ignored() {
        let field = Rect::new(1, 2, 80, 24);
        assert_eq!(cell_to_dot(field, 0, 5), None);
        assert_eq!(cell_to_dot(field, 81, 5), None);
        assert_eq!(cell_to_dot(field, 5, 26), None);
    }
}
