pub mod keys {
    /// One reading of the five-key pad. `None` means nothing is held.
    #[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
    pub enum Key {
        #[default]
        None,
        Up,
        Down,
        Left,
        Right,
        Select,
    }

    impl Key {
        /// +1 for UP, -1 for DOWN, nothing for the other keys.
        pub fn vertical_step(&self) -> Option<i32> {
            match self {
                Key::Up => Some(1),
                Key::Down => Some(-1),
                _ => None,
            }
        }

        pub fn name(&self) -> &'static str {
            match self {
                Key::None => "none",
                Key::Up => "up",
                Key::Down => "down",
                Key::Left => "left",
                Key::Right => "right",
                Key::Select => "select",
            }
        }

        pub fn from_name(name: &str) -> Option<Key> {
            match name.to_ascii_lowercase().as_str() {
                "none" => Some(Key::None),
                "up" => Some(Key::Up),
                "down" => Some(Key::Down),
                "left" => Some(Key::Left),
                "right" => Some(Key::Right),
                "select" => Some(Key::Select),
                _ => None,
            }
        }
    }

    impl std::fmt::Display for Key {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.name())
        }
    }

    /// Anything the menu can read keys from.
    pub trait Keypad {
        /// Sample the hardware. Called once per scheduler tick, before any query.
        fn tick(&mut self) {}

        /// The key held down right now.
        fn current_state(&mut self) -> Key;

        /// A newly pressed key, reported once per physical press.
        fn key_changed(&mut self) -> Option<Key>;
    }
}

pub mod buttons {
    use crate::keys::{Key, Keypad};
    use button_driver::{Button, ButtonConfig, PinWrapper};
    use std::time::{Duration, Instant};

    /// Five discrete push buttons, wired active-low with pull-ups.
    ///
    /// The edge is taken from the level sampled in [`Keypad::tick`], so a press
    /// is reported on the tick it goes down rather than after release.
    pub struct Buttons<P> {
        up: Button<P, Instant, Duration>,
        down: Button<P, Instant, Duration>,
        left: Button<P, Instant, Duration>,
        right: Button<P, Instant, Duration>,
        select: Button<P, Instant, Duration>,
        level: Key,
        pressed: Option<Key>,
    }

    impl<P: PinWrapper> Buttons<P> {
        pub fn new(up: P, down: P, left: P, right: P, select: P) -> Buttons<P> {
            Buttons {
                up: Button::<_, Instant>::new(up, ButtonConfig::default()),
                down: Button::<_, Instant>::new(down, ButtonConfig::default()),
                left: Button::<_, Instant>::new(left, ButtonConfig::default()),
                right: Button::<_, Instant>::new(right, ButtonConfig::default()),
                select: Button::<_, Instant>::new(select, ButtonConfig::default()),
                level: Key::None,
                pressed: None,
            }
        }

        // SELECT wins over the arrows when several are down at once
        fn all_mut(&mut self) -> [(Key, &mut Button<P, Instant, Duration>); 5] {
            [
                (Key::Select, &mut self.select),
                (Key::Up, &mut self.up),
                (Key::Down, &mut self.down),
                (Key::Left, &mut self.left),
                (Key::Right, &mut self.right),
            ]
        }
    }

    impl<P: PinWrapper> Buttons<P> {
        fn sample_level(&mut self) -> Key {
            for (key, button) in self.all_mut() {
                if !<P as PinWrapper>::is_high(&mut button.pin) {
                    return key;
                }
            }
            Key::None
        }
    }

    impl<P: PinWrapper> Keypad for Buttons<P> {
        fn tick(&mut self) {
            for (_, button) in self.all_mut() {
                button.tick();
            }

            let level = self.sample_level();
            if level != self.level {
                if level != Key::None {
                    log::debug!("Key pressed: {:?}", level);
                    self.pressed = Some(level);
                }
                // Click history is not used, keep it from piling up
                for (_, button) in self.all_mut() {
                    button.reset();
                }
                self.level = level;
            }
        }

        fn current_state(&mut self) -> Key {
            self.level
        }

        fn key_changed(&mut self) -> Option<Key> {
            self.pressed.take()
        }
    }

}

pub mod script {
    use crate::keys::{Key, Keypad};
    use anyhow::{anyhow, bail, Context};
    use std::collections::VecDeque;

    /// Replays a fixed sequence of key levels, one entry per tick.
    ///
    /// Edges are derived the way the LCD keypad shield reports them: a key is
    /// reported once when the level changes to it, and never while it stays held.
    #[derive(Debug, Default, Clone)]
    pub struct ScriptedKeypad {
        frames: VecDeque<Key>,
        current: Key,
        last_reported: Key,
    }

    impl ScriptedKeypad {
        pub fn new(frames: impl IntoIterator<Item = Key>) -> Self {
            ScriptedKeypad {
                frames: frames.into_iter().collect(),
                ..Default::default()
            }
        }

        /// Parse a key script.
        ///
        /// One command per line, `#` starts a comment:
        /// - `<key>`: press and release (one tick held, one tick released)
        /// - `hold <key> <ticks>`: keep the key down for that many ticks
        /// - `wait <ticks>`: nothing pressed for that many ticks
        pub fn parse(script: &str) -> anyhow::Result<Self> {
            let mut frames = Vec::new();

            for (index, raw) in script.lines().enumerate() {
                let line_no = index + 1;
                let line = raw.split('#').next().unwrap_or_default().trim();
                if line.is_empty() {
                    continue;
                }

                let words: Vec<&str> = line.split_whitespace().collect();
                match words.as_slice() {
                    ["wait", ticks] => {
                        let ticks = parse_ticks(ticks, line_no)?;
                        frames.extend(std::iter::repeat(Key::None).take(ticks));
                    }
                    ["hold", key, ticks] => {
                        let key = parse_key(key, line_no)?;
                        let ticks = parse_ticks(ticks, line_no)?;
                        frames.extend(std::iter::repeat(key).take(ticks));
                    }
                    [key] => {
                        let key = parse_key(key, line_no)?;
                        frames.push(key);
                        frames.push(Key::None);
                    }
                    _ => bail!("line {}: cannot understand {:?}", line_no, line),
                }
            }

            Ok(ScriptedKeypad::new(frames))
        }

        pub fn is_finished(&self) -> bool {
            self.frames.is_empty()
        }

        pub fn remaining(&self) -> usize {
            self.frames.len()
        }
    }

    fn parse_key(word: &str, line_no: usize) -> anyhow::Result<Key> {
        Key::from_name(word).ok_or_else(|| anyhow!("line {}: unknown key {:?}", line_no, word))
    }

    fn parse_ticks(word: &str, line_no: usize) -> anyhow::Result<usize> {
        word.parse::<usize>()
            .with_context(|| format!("line {}: bad tick count {:?}", line_no, word))
    }

    impl Keypad for ScriptedKeypad {
        fn tick(&mut self) {
            self.current = self.frames.pop_front().unwrap_or_default();
        }

        fn current_state(&mut self) -> Key {
            self.current
        }

        fn key_changed(&mut self) -> Option<Key> {
            if self.current == self.last_reported {
                return None;
            }
            self.last_reported = self.current;
            match self.current {
                Key::None => None,
                key => Some(key),
            }
        }
    }

}

pub use buttons::Buttons;
pub use keys::{Key, Keypad};
pub use script::ScriptedKeypad;
