//! Presentation layer
//!
//! The controllers in [`crate::app`] drive the screen exclusively through
//! the [`Presenter`] trait. The terminal browser in [`ratatui_adapter`] is
//! the production implementation; tests use a recording presenter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Controllers                        │
//! │   (AppController, ViewController)       │
//! └────────────────┬────────────────────────┘
//!                  │ Uses trait
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      Presenter                          │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!         ┌────────┴────────┐
//!         ▼                 ▼
//! ┌───────────────┐  ┌───────────────────┐
//! │ Recorder      │  │ BrowserState      │
//! │ (tests)       │  │ (browse command)  │
//! └───────────────┘  └───────────────────┘
//! ```
//!
//! Command-line subcommands do not use the presenter; they report through
//! [`OutputWriter`].

mod error;
mod traits;
mod types;

pub mod output;
pub mod ratatui_adapter;

#[cfg(test)]
pub mod mock;

pub use error::{Result, UiError};
pub use output::{MessageLevel, OutputWriter, StdoutWriter};
pub use traits::Presenter;
pub use types::{CardAction, CloseTrigger, ModalContent};
