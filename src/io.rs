use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;

use crate::events::Event;

/// Converts a crossterm event into a simulation event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    let CrossTermEvent::Key(key_event) = event else {
        return None;
    };

    // some platforms report key releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::Quit),
        KeyEvent {
            code: KeyCode::Char(c),
            ..
        } => match c.to_ascii_lowercase() {
            'q' => Some(Event::Quit),
            'p' => Some(Event::TogglePause),
            's' => Some(Event::Step),
            'r' => Some(Event::CycleRule),
            '[' => Some(Event::Slower),
            ']' => Some(Event::Faster),
            _ => None,
        },
        KeyEvent {
            code: KeyCode::Esc, ..
        } => Some(Event::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::Event as CrossTermEvent;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyEventKind;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyModifiers;

    use super::convert_event;
    use crate::events::Event;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrossTermEvent {
        CrossTermEvent::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn keybinds() {
        let cases = [
            ('q', Event::Quit),
            ('Q', Event::Quit),
            ('p', Event::TogglePause),
            ('s', Event::Step),
            ('r', Event::CycleRule),
            ('[', Event::Slower),
            (']', Event::Faster),
        ];

        for (c, event) in cases {
            assert_eq!(
                convert_event(key(KeyCode::Char(c), KeyModifiers::NONE)),
                Some(event),
                "key {c:?}"
            );
        }
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            convert_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Event::Quit)
        );
        assert_eq!(convert_event(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn releases_and_resizes_are_ignored() {
        let release = CrossTermEvent::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(convert_event(release), None);
        assert_eq!(convert_event(CrossTermEvent::Resize(80, 24)), None);
    }
}
