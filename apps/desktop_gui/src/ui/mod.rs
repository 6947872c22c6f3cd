//! UI layer for the desktop app: shell, form, and outcome panels.

pub mod app;

pub use app::VerifierApp;
