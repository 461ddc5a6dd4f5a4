//! UI components.

pub mod bubbles;
