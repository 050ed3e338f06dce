use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use tracing::{debug, trace};

/// Once the terminal's auto-repeat has started, a key stays held while its
/// last repeat is younger than this.
const REPEAT_WINDOW: Duration = Duration::from_millis(180);

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tick_pending: Arc<AtomicBool>,
}

impl EventHandler {
    /// Spawn the input thread. `Tick` arrives every `tick_rate_ms` whether or
    /// not the user is typing, and never more than one is queued. With
    /// `release_after` set, key releases are synthesised for keys held
    /// longer than that without a repeat.
    pub fn new(tick_rate_ms: u64, release_after: Option<Duration>) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let tick_pending = Arc::new(AtomicBool::new(false));
        let pending = Arc::clone(&tick_pending);

        thread::spawn(move || {
            let mut held = release_after.map(|hold| HeldKeys::new(hold, REPEAT_WINDOW));
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(event::Event::Key(key)) => {
                            if let Some(held) = held.as_mut() {
                                held.observe(&key, Instant::now());
                            }
                            Some(Event::Key(key))
                        }
                        Ok(event::Event::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(event::Event::Resize(w, h)) => Some(Event::Resize(w, h)),
                        Ok(_) => None,
                        Err(e) => {
                            debug!("Input thread stopping: {}", e);
                            return;
                        }
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    // The handler is gone.
                    if Arc::strong_count(&pending) == 1 {
                        return;
                    }
                    if let Some(held) = held.as_mut() {
                        for key in held.expire(Instant::now()) {
                            trace!(code = ?key.code, "Synthesised key release");
                            if tx.send(Event::Key(key)).is_err() {
                                return;
                            }
                        }
                    }
                    // A busy game thread skips frames instead of replaying them.
                    if !pending.swap(true, Ordering::AcqRel) && tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx, tick_pending }
    }

    pub fn next(&self) -> io::Result<Event> {
        let event = self
            .rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        if matches!(event, Event::Tick) {
            self.tick_pending.store(false, Ordering::Release);
        }
        Ok(event)
    }
}

/// Tracks how long each key counts as held so a release can be faked once
/// the terminal's auto-repeat stops refreshing it. A first press gets the
/// longer `hold` window to cover the auto-repeat delay.
pub struct HeldKeys {
    hold: Duration,
    repeat: Duration,
    deadlines: HashMap<KeyCode, (KeyEvent, Instant)>,
}

impl HeldKeys {
    pub fn new(hold: Duration, repeat: Duration) -> Self {
        Self { hold, repeat, deadlines: HashMap::new() }
    }

    pub fn observe(&mut self, key: &KeyEvent, now: Instant) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let window = if self.deadlines.contains_key(&key.code) {
                    self.repeat
                } else {
                    self.hold
                };
                self.deadlines.insert(key.code, (*key, now + window));
            }
            KeyEventKind::Release => {
                self.deadlines.remove(&key.code);
            }
        }
    }

    /// Drop keys whose window has passed and return release events for them.
    pub fn expire(&mut self, now: Instant) -> Vec<KeyEvent> {
        let mut released = Vec::new();
        self.deadlines.retain(|_, (key, deadline)| {
            if now > *deadline {
                released.push(KeyEvent::new_with_kind(key.code, key.modifiers, KeyEventKind::Release));
                false
            } else {
                true
            }
        });
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn release_only_after_window() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(100), ms(40));
        held.observe(&press(KeyCode::Left), start);

        assert!(held.expire(start + ms(50)).is_empty());
        let released = held.expire(start + ms(150));
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].code, KeyCode::Left);
        assert_eq!(released[0].kind, KeyEventKind::Release);

        assert!(held.expire(start + ms(300)).is_empty());
    }

    #[test]
    fn first_press_outlasts_the_repeat_delay() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(700), ms(180));
        held.observe(&press(KeyCode::Right), start);
        // Typical auto-repeat delay before the first repeat arrives.
        assert!(held.expire(start + ms(500)).is_empty());
        held.observe(&press(KeyCode::Right), start + ms(500));
        assert!(held.expire(start + ms(650)).is_empty());
    }

    #[test]
    fn repeats_use_the_short_window() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(700), ms(100));
        held.observe(&press(KeyCode::Right), start);
        held.observe(&press(KeyCode::Right), start + ms(30));
        assert!(held.expire(start + ms(120)).is_empty());
        assert_eq!(held.expire(start + ms(140)).len(), 1);
    }

    #[test]
    fn real_release_forgets_the_key() {
        let start = Instant::now();
        let mut held = HeldKeys::new(ms(100), ms(40));
        held.observe(&press(KeyCode::Right), start);
        let release = KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Release);
        held.observe(&release, start + ms(10));
        assert!(held.expire(start + ms(500)).is_empty());
    }

    #[test]
    fn stalled_reader_finds_at_most_one_tick() {
        let events = EventHandler::new(16, None);
        thread::sleep(ms(500));

        let mut ticks = 0;
        while let Ok(event) = events.rx.try_recv() {
            if matches!(event, Event::Tick) {
                ticks += 1;
            }
        }
        assert!(ticks <= 1, "{} ticks queued", ticks);
    }

    #[test]
    fn ticks_resume_after_one_is_consumed() {
        let events = EventHandler::new(5, None);
        for _ in 0..3 {
            loop {
                if let Event::Tick = events.next().unwrap() {
                    break;
                }
            }
        }
    }
}
