//! Adapter implementations for the text-generation port.

pub mod gemini;
