//! The document event protocol.
//!
//! Producers (the BRF and PEF readers) emit [`DocumentEvent`]s, transforms
//! rewrite them lazily, and handlers consume them. Every consumer tracks the
//! nesting with a [`StateMachine`] and resolves options through an
//! [`OptionStack`].

mod event;
mod handler;
mod options;
mod state;

pub use event::{single_page_document, DocumentEvent};
pub use handler::DocumentHandler;
pub use options::{GraphicOptions, LayoutOptions, OptionStack, RowOptions, ScopeOptions};
pub use state::{validate, HandlerState, StateMachine, Transition};
