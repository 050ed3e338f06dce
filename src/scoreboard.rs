use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::settings::Settings;
use crate::stats::GameStats;

const SHIP_ICON: &str = "\u{25b2} ";

/// Cached status-line text. Only rebuilt by the `prep_*` methods, which the
/// controller calls when the matching stat changes.
#[derive(Clone, Debug, Default)]
pub struct Scoreboard {
    score_text: String,
    high_score_text: String,
    level_text: String,
    ships: u32,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut sb = Scoreboard::default();
        sb.prep_images(stats);
        sb
    }

    pub fn prep_images(&mut self, stats: &GameStats) {
        self.prep_score(stats);
        self.prep_high_score(stats);
        self.prep_level(stats);
        self.prep_ships(stats);
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = stats.level.to_string();
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = stats.ships_left;
    }

    pub fn score_text(&self) -> &str { &self.score_text }
    pub fn high_score_text(&self) -> &str { &self.high_score_text }
    pub fn level_text(&self) -> &str { &self.level_text }
    pub fn ships(&self) -> u32 { self.ships }

    pub fn render(&self, frame: &mut Frame, area: Rect, settings: &Settings) {
        let (r, g, b) = settings.ship_color;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(area);

        let ships = Paragraph::new(Line::from(vec![Span::styled(
            format!(" {}", SHIP_ICON.repeat(self.ships() as usize)),
            Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD),
        )]));
        frame.render_widget(ships, chunks[0]);

        let high = Paragraph::new(Line::from(vec![
            Span::styled("High: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.high_score_text(), Style::default().fg(Color::Cyan)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(high, chunks[1]);

        let score = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Score: {} ", self.score_text()),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Level: {} ", self.level_text()),
                Style::default().fg(Color::Green),
            ),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(score, chunks[2]);
    }
}

/// Round to the nearest ten and group thousands with commas.
pub fn format_score(score: u32) -> String {
    let rounded = ((score as f64 / 10.0).round() as u64) * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn score_is_rounded_and_grouped() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(75), "80");
        assert_eq!(format_score(112), "110");
        assert_eq!(format_score(1_234_567), "1,234,570");
        assert_eq!(format_score(999), "1,000");
    }

    #[test]
    fn text_only_changes_on_prep() {
        let settings = Settings::default();
        let mut stats = GameStats::new(&settings, 2000);
        let mut sb = Scoreboard::new(&stats);
        assert_eq!(sb.score_text(), "0");
        assert_eq!(sb.high_score_text(), "2,000");
        assert_eq!(sb.level_text(), "1");
        assert_eq!(sb.ships(), 3);

        stats.add_points(50);
        stats.level = 2;
        assert_eq!(sb.score_text(), "0");

        sb.prep_score(&stats);
        assert_eq!(sb.score_text(), "50");
        assert_eq!(sb.level_text(), "1");
        sb.prep_level(&stats);
        assert_eq!(sb.level_text(), "2");
    }

    #[test]
    fn ship_icons_use_the_ship_color() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let mut settings = Settings::default();
        settings.ship_color = (10, 20, 30);
        let stats = GameStats::new(&settings, 0);
        let sb = Scoreboard::new(&stats);
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                sb.render(f, area, &settings);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let icon = buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == "\u{25b2}")
            .unwrap();
        assert_eq!(icon.fg, Color::Rgb(10, 20, 30));
    }
}
