//! Mock key injector for tests and dry-runs.
//!
//! # Why a mock injector?
//!
//! The real injector calls `SendInput`, which:
//!
//! - Requires a Windows desktop session to run.
//! - Actually presses keys on the machine running the tests.
//! - Cannot be observed from Rust test code.
//!
//! The `MockKeyInjector` records every call into a `Mutex<Vec<KeyCall>>`
//! so tests can assert exactly which key transitions were requested and
//! in what order. The emission-order guarantee is the whole point of
//! the emitter, so order is what the assertions check.
//!
//! # Simulating sink failures
//!
//! `fail_on` selects one call index (0-based, counted across downs and
//! ups) that returns an error instead of recording. This exercises the
//! emitter's best-effort modifier cleanup without needing a broken OS.

use std::sync::Mutex;

use crate::application::translate_line::{InjectionError, KeyInjector};

/// One recorded key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCall {
    /// `key_down` with the given virtual-key code.
    Down(u16),
    /// `key_up` with the given virtual-key code.
    Up(u16),
}

/// A key injector that records calls instead of synthesizing OS input.
#[derive(Default)]
pub struct MockKeyInjector {
    /// Every successfully "injected" transition, in call order.
    pub calls: Mutex<Vec<KeyCall>>,
    /// Total calls attempted, including the failed one.
    attempts: Mutex<usize>,
    /// Index of the one call that fails, if any.
    fail_on: Option<usize>,
}

impl MockKeyInjector {
    /// Creates an injector that records everything and never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an injector whose `index`-th call (0-based) fails.
    pub fn failing_on(index: usize) -> Self {
        Self {
            fail_on: Some(index),
            ..Self::default()
        }
    }

    /// Returns a snapshot of the recorded calls.
    pub fn recorded(&self) -> Vec<KeyCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: KeyCall) -> Result<(), InjectionError> {
        let mut attempts = self.attempts.lock().unwrap();
        let index = *attempts;
        *attempts += 1;
        if self.fail_on == Some(index) {
            return Err(InjectionError::Platform("mock failure".to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl KeyInjector for MockKeyInjector {
    /// Records the press, or fails if this call index was marked to fail.
    fn key_down(&self, vk: u16) -> Result<(), InjectionError> {
        self.record(KeyCall::Down(vk))
    }

    /// Records the release, or fails if this call index was marked to fail.
    fn key_up(&self, vk: u16) -> Result<(), InjectionError> {
        self.record(KeyCall::Up(vk))
    }
}
