use lumen_engine::{rgb_from_hex, Ambient};

use crate::presenter::Presenter;

const DEFAULT_AMBIENT_HEX: u32 = 0xffffff;
const DEFAULT_AMBIENT_INTENSITY: f32 = 0.5;
const HINT_AMBIENT_HEX: u32 = 0x4400ff;
const HINT_AMBIENT_INTENSITY: f32 = 2.0;

/// Blacklight mode: tints the room and reveals the hidden clue.
/// Independent of puzzle progress; usable at any time, including after a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintMode {
    enabled: bool,
}

impl HintMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the mode and push the matching presentation. Returns the new state.
    pub fn toggle(&mut self, presenter: &mut impl Presenter) -> bool {
        self.enabled = !self.enabled;
        log::debug!("hint mode {}", if self.enabled { "on" } else { "off" });
        self.publish(presenter);
        self.enabled
    }

    pub fn ambient(&self) -> Ambient {
        if self.enabled {
            Ambient {
                color: rgb_from_hex(HINT_AMBIENT_HEX),
                intensity: HINT_AMBIENT_INTENSITY,
            }
        } else {
            Ambient {
                color: rgb_from_hex(DEFAULT_AMBIENT_HEX),
                intensity: DEFAULT_AMBIENT_INTENSITY,
            }
        }
    }

    /// Send ambient light and overlay visibility for the current state.
    pub fn publish(&self, presenter: &mut impl Presenter) {
        presenter.set_ambient(self.ambient());
        presenter.set_hint_overlay_visible(self.enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::recording::{Call, Recorder};

    #[test]
    fn starts_off_with_default_ambient() {
        let hint = HintMode::new();
        assert!(!hint.enabled());
        assert_eq!(hint.ambient(), Ambient { color: [1.0; 3], intensity: 0.5 });
    }

    #[test]
    fn toggle_swaps_ambient_and_overlay() {
        let mut hint = HintMode::new();
        let mut rec = Recorder::default();

        assert!(hint.toggle(&mut rec));
        assert_eq!(
            rec.take(),
            vec![Call::Ambient(hint.ambient()), Call::Overlay(true)]
        );
        assert_eq!(hint.ambient().intensity, 2.0);
        assert_eq!(hint.ambient().color, rgb_from_hex(0x4400ff));

        assert!(!hint.toggle(&mut rec));
        assert_eq!(
            rec.take(),
            vec![
                Call::Ambient(Ambient { color: [1.0; 3], intensity: 0.5 }),
                Call::Overlay(false),
            ]
        );
    }
}
