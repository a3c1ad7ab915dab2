//! Directional intent to Windows Virtual Key code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h). The six navigation
//! targets plus the Ctrl modifier are the only keys this bridge ever
//! synthesizes; CAM/jog applications commonly bind Ctrl+arrows and
//! Ctrl+PageUp/PageDown to jog moves.

use crate::domain::motion::DirectionalIntent;

/// VK_CONTROL, the modifier wrapped around every synthesized key press.
pub const VK_CONTROL: u16 = 0x11;

/// VK_PRIOR (Page Up).
pub const VK_PAGE_UP: u16 = 0x21;
/// VK_NEXT (Page Down).
pub const VK_PAGE_DOWN: u16 = 0x22;
/// VK_LEFT.
pub const VK_LEFT: u16 = 0x25;
/// VK_UP.
pub const VK_UP: u16 = 0x26;
/// VK_RIGHT.
pub const VK_RIGHT: u16 = 0x27;
/// VK_DOWN.
pub const VK_DOWN: u16 = 0x28;

/// Translates a [`DirectionalIntent`] to its Windows Virtual Key code.
///
/// The match is total over the intent enum, so the lookup cannot fail:
/// adding an intent variant without a key code is a compile error.
pub fn intent_to_vk(intent: DirectionalIntent) -> u16 {
    match intent {
        DirectionalIntent::Left => VK_LEFT,
        DirectionalIntent::Right => VK_RIGHT,
        DirectionalIntent::Up => VK_UP,
        DirectionalIntent::Down => VK_DOWN,
        DirectionalIntent::PageUp => VK_PAGE_UP,
        DirectionalIntent::PageDown => VK_PAGE_DOWN,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_to_vk_matches_winuser_values() {
        assert_eq!(intent_to_vk(DirectionalIntent::Left), 0x25);
        assert_eq!(intent_to_vk(DirectionalIntent::Up), 0x26);
        assert_eq!(intent_to_vk(DirectionalIntent::Right), 0x27);
        assert_eq!(intent_to_vk(DirectionalIntent::Down), 0x28);
        assert_eq!(intent_to_vk(DirectionalIntent::PageUp), 0x21);
        assert_eq!(intent_to_vk(DirectionalIntent::PageDown), 0x22);
    }

    #[test]
    fn test_all_intents_map_to_distinct_codes() {
        let intents = [
            DirectionalIntent::Left,
            DirectionalIntent::Right,
            DirectionalIntent::Up,
            DirectionalIntent::Down,
            DirectionalIntent::PageUp,
            DirectionalIntent::PageDown,
        ];
        let mut codes: Vec<u16> = intents.iter().map(|&i| intent_to_vk(i)).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), intents.len());
    }
}
