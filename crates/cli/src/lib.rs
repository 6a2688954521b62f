//! CLI utilities for VatavaranTrack tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Zone and distance formatting for terminal output

#![warn(missing_docs)]

pub mod output;
