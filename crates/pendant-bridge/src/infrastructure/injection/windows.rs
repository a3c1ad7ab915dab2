//! Windows key injection via the SendInput API.
//!
//! Each `key_down`/`key_up` call queues exactly one KEYBDINPUT event. The
//! six navigation targets (arrows, PageUp, PageDown) are extended keys
//! and need `KEYEVENTF_EXTENDEDKEY`, otherwise some applications resolve
//! them to the numpad equivalents.

#![cfg(target_os = "windows")]

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY,
};

use crate::application::translate_line::{InjectionError, KeyInjector};

/// Windows implementation of [`KeyInjector`] using SendInput.
pub struct WindowsKeyInjector;

impl WindowsKeyInjector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsKeyInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyInjector for WindowsKeyInjector {
    fn key_down(&self, vk: u16) -> Result<(), InjectionError> {
        send_key(vk, false)
    }

    fn key_up(&self, vk: u16) -> Result<(), InjectionError> {
        send_key(vk, true)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The VK 0x21–0x28 navigation block (PageUp through the arrow keys) is
/// all extended keys; every target this bridge injects falls inside it.
fn is_extended(vk: u16) -> bool {
    (0x21..=0x28).contains(&vk)
}

fn send_key(vk: u16, key_up: bool) -> Result<(), InjectionError> {
    let mut flags = KEYBD_EVENT_FLAGS(0);
    if key_up {
        flags |= KEYEVENTF_KEYUP;
    }
    if is_extended(vk) {
        flags |= KEYEVENTF_EXTENDEDKEY;
    }

    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    // SAFETY: input is a valid INPUT structure on the stack.
    let inserted =
        unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };

    // SendInput returns the number of events it queued; zero means the
    // call was blocked (e.g. by UIPI) or failed outright.
    if inserted == 1 {
        Ok(())
    } else {
        Err(InjectionError::Platform(format!(
            "SendInput queued {inserted} of 1 events for vk 0x{vk:02X}: {}",
            std::io::Error::last_os_error()
        )))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
