//! Errors crossing the UI boundary are plain strings: they end up in a log
//! line or a label, never in a `match`.

use std::fmt::Debug;

pub trait ErrorStringExt<T> {
    /// Replace the error with `msg`, followed by the debug representation
    /// of the original error.
    fn err_to_string(self, msg: &str) -> Result<T, String>;
}

impl<T, E: Debug> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, msg: &str) -> Result<T, String> {
        self.map_err(|err| format!("{msg}: {err:?}"))
    }
}

impl<T> ErrorStringExt<T> for Option<T> {
    fn err_to_string(self, msg: &str) -> Result<T, String> {
        self.ok_or_else(|| msg.to_string())
    }
}
