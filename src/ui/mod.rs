pub mod field;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::{AlienInvasion, GameState};

fn panel() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" \u{1f47e} Alien Invasion ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD))
}

/// Split the panel interior into scoreboard, field and help line.
fn layout(area: Rect) -> [Rect; 3] {
    let inner = panel().inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);
    [chunks[0], chunks[1], chunks[2]]
}

/// The terminal area the play field occupies for a screen of `area`.
pub fn field_area(area: Rect) -> Rect {
    layout(area)[1]
}

/// Field size in dots for a given terminal area.
pub fn field_dots(area: Rect) -> (u32, u32) {
    let field = field_area(area);
    (field.width as u32 * 2, field.height as u32 * 4)
}

pub fn render(frame: &mut Frame, game: &AlienInvasion) {
    let area = frame.area();
    frame.render_widget(panel(), area);
    let [score_area, field_area, help_area] = layout(area);

    game.scoreboard.render(frame, score_area, &game.settings);

    let fw = field_area.width as usize;
    let fh = field_area.height as usize;
    if fw > 0 && fh > 0 {
        let lines = field::render_field(game, fw, fh);
        frame.render_widget(Paragraph::new(lines), field_area);
    }

    if !game.is_active() {
        game.play_button.render(frame, field_area);
    }

    render_help(frame, game, help_area);
}

fn render_help(frame: &mut Frame, game: &AlienInvasion, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let sep = Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));

    let line = match game.state() {
        GameState::Active => Line::from(vec![
            Span::styled(" \u{2190}\u{2192} Move ", dim),
            sep.clone(),
            Span::styled("Space Shoot ", key),
            sep,
            Span::styled("Q Quit", dim),
        ]),
        GameState::Inactive if game.stats.ships_left == 0 => Line::from(vec![
            Span::styled(" GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Press P or click Play to try again, Q to quit", Style::default().fg(Color::Gray)),
        ]),
        GameState::Inactive => Line::from(vec![
            Span::styled(" Press P or click Play to start ", key),
            sep,
            Span::styled("Q Quit", dim),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn game_for(area: Rect) -> AlienInvasion {
        let mut settings = Settings::default();
        let (w, h) = field_dots(area);
        settings.set_screen_size(w, h);
        AlienInvasion::new(settings, 1500, StdRng::seed_from_u64(9))
    }

    #[test]
    fn field_sits_inside_the_panel() {
        let area = Rect::new(0, 0, 82, 28);
        assert_eq!(field_area(area), Rect::new(1, 2, 80, 24));
        assert_eq!(field_dots(area), (160, 96));
    }

    #[test]
    fn title_screen_shows_play_button_and_high_score() {
        let area = Rect::new(0, 0, 82, 28);
        let game = game_for(area);
        let mut terminal = Terminal::new(TestBackend::new(82, 28)).unwrap();
        terminal.draw(|f| render(f, &game)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Play"));
        assert!(text.contains("1,500"));
        assert!(text.contains("Press P"));
    }

    #[test]
    fn active_game_hides_play_button() {
        let area = Rect::new(0, 0, 82, 28);
        let mut game = game_for(area);
        game.on_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));
        let mut terminal = Terminal::new(TestBackend::new(82, 28)).unwrap();
        terminal.draw(|f| render(f, &game)).unwrap();
        let text = buffer_text(&terminal);
        assert!(!text.contains("Play"));
        assert!(text.contains("Space Shoot"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let area = Rect::new(0, 0, 6, 4);
        let game = game_for(area);
        let mut terminal = Terminal::new(TestBackend::new(6, 4)).unwrap();
        terminal.draw(|f| render(f, &game)).unwrap();
    }
}
