//! Terminal input plus timer events, merged onto one channel.
//!
//! A background task owns crossterm's `EventStream` and two intervals: a
//! slow tick for housekeeping (toast expiry, throbber frames) and a fast
//! render tick. The app loop only ever awaits [`EventReader::next`].

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    Tick,
    Render,
}

impl Event {
    /// Keep key presses and resizes; drop releases, repeats, mouse and focus.
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Start the reader task. Must be called inside a tokio runtime.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(
            tx,
            cancel.clone(),
            skipping_interval(tick_rate),
            skipping_interval(render_rate),
        ));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn skipping_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn pump(
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    mut tick: Interval,
    mut render: Interval,
) {
    let mut terminal = EventStream::new();
    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => return,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(raw)) = terminal.next() => match Event::from_terminal(raw) {
                Some(event) => event,
                None => continue,
            },
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn only_key_presses_pass() {
        let press = key(KeyEventKind::Press);
        assert_eq!(
            Event::from_terminal(CrosstermEvent::Key(press)),
            Some(Event::Key(press))
        );
        assert_eq!(
            Event::from_terminal(CrosstermEvent::Key(key(KeyEventKind::Release))),
            None
        );
        assert_eq!(Event::from_terminal(CrosstermEvent::FocusGained), None);
    }

    #[test]
    fn resize_is_forwarded() {
        assert_eq!(
            Event::from_terminal(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        );
    }
}
