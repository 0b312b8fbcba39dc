//! The nesting grammar of document events as an explicit state stack.

use super::event::DocumentEvent;
use crate::error::{Error, Result};
use std::fmt;

/// State at the top of a handler's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerState {
    /// Waiting for a document
    Ready,
    /// Inside a document
    Document,
    /// Inside a volume
    Volume,
    /// Inside a section
    Section,
    /// Inside a page
    Page,
    /// Inside a graphic
    Graphic,
    /// Inside a line
    Line,
}

impl fmt::Display for HandlerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandlerState::Ready => "Ready",
            HandlerState::Document => "Document",
            HandlerState::Volume => "Volume",
            HandlerState::Section => "Section",
            HandlerState::Page => "Page",
            HandlerState::Graphic => "Graphic",
            HandlerState::Line => "Line",
        };
        f.write_str(name)
    }
}

/// What an accepted event did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new scope was opened
    Push(HandlerState),
    /// The innermost scope was closed
    Pop(HandlerState),
    /// Content inside the current scope
    Stay,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    state: HandlerState,
    children: usize,
}

/// Validating state machine shared by every event consumer.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    stack: Vec<Frame>,
}

impl StateMachine {
    /// Create a machine in the ready state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> HandlerState {
        self.stack
            .last()
            .map(|f| f.state)
            .unwrap_or(HandlerState::Ready)
    }

    /// Nesting depth; 0 when ready.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// True when no document is open.
    pub fn is_ready(&self) -> bool {
        self.stack.is_empty()
    }

    /// True when any open scope is a graphic.
    pub fn in_graphic(&self) -> bool {
        self.stack.iter().any(|f| f.state == HandlerState::Graphic)
    }

    /// Forget any open scopes.
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    /// Apply an event, or report it as a protocol violation.
    ///
    /// A rejected event leaves the machine unchanged.
    pub fn advance(&mut self, event: &DocumentEvent) -> Result<Transition> {
        use DocumentEvent as E;
        use HandlerState as S;

        let state = self.state();
        let children = self.stack.last().map(|f| f.children).unwrap_or(0);

        let transition = match (state, event) {
            (S::Ready, E::StartDocument(_)) => Transition::Push(S::Document),
            (S::Document, E::StartVolume(_)) => Transition::Push(S::Volume),
            (S::Document, E::EndDocument) if children > 0 => Transition::Pop(S::Document),
            (S::Volume, E::StartSection(_)) => Transition::Push(S::Section),
            (S::Volume, E::EndVolume) if children > 0 => Transition::Pop(S::Volume),
            (S::Section, E::StartPage(_)) => Transition::Push(S::Page),
            (S::Section, E::EndSection) => Transition::Pop(S::Section),
            (S::Page, E::StartLine(_)) => Transition::Push(S::Line),
            (S::Page, E::StartGraphic(_)) => Transition::Push(S::Graphic),
            (S::Page, E::EndPage) => Transition::Pop(S::Page),
            (S::Graphic, E::StartLine(_)) => Transition::Push(S::Line),
            (S::Graphic, E::EndGraphic) => Transition::Pop(S::Graphic),
            (S::Line, E::Braille(_)) if children == 0 => Transition::Stay,
            (S::Line, E::EndLine) => Transition::Pop(S::Line),
            _ => {
                return Err(Error::ProtocolViolation {
                    event: event.name().to_string(),
                    state: state.to_string(),
                })
            }
        };

        match transition {
            Transition::Push(next) => {
                if let Some(parent) = self.stack.last_mut() {
                    parent.children += 1;
                }
                self.stack.push(Frame {
                    state: next,
                    children: 0,
                });
            }
            Transition::Pop(_) => {
                self.stack.pop();
            }
            Transition::Stay => {
                if let Some(frame) = self.stack.last_mut() {
                    frame.children += 1;
                }
            }
        }
        Ok(transition)
    }

    /// Apply an event, panicking on a protocol violation.
    ///
    /// Delivering an out-of-order event is a programming error in the
    /// producer, so handlers fail immediately instead of continuing.
    pub fn accept(&mut self, event: &DocumentEvent) -> Transition {
        match self.advance(event) {
            Ok(transition) => transition,
            Err(err) => panic!("{}", err),
        }
    }
}

/// Check that a whole event stream follows the document grammar.
pub fn validate<'a, I>(events: I) -> Result<()>
where
    I: IntoIterator<Item = &'a DocumentEvent>,
{
    let mut machine = StateMachine::new();
    let mut documents = 0usize;
    for event in events {
        if let Transition::Pop(HandlerState::Document) = machine.advance(event)? {
            documents += 1;
        }
    }
    if machine.is_ready() && documents > 0 {
        Ok(())
    } else {
        Err(Error::ProtocolViolation {
            event: "end of stream".to_string(),
            state: machine.state().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::event::single_page_document;
    use crate::document::options::GraphicOptions;

    #[test]
    fn test_valid_stream() {
        let events = single_page_document(["AB"]);
        assert!(validate(&events).is_ok());
    }

    #[test]
    fn test_empty_stream_is_invalid() {
        let events: Vec<DocumentEvent> = Vec::new();
        assert!(validate(&events).is_err());
    }

    #[test]
    fn test_truncated_stream_is_invalid() {
        let mut events = single_page_document(["AB"]);
        events.pop();
        let err = validate(&events).unwrap_err();
        assert_eq!(err.to_string(), "invalid event end of stream for state Document");
    }

    #[test]
    fn test_rejected_event_leaves_state() {
        let mut machine = StateMachine::new();
        machine.advance(&DocumentEvent::start_document()).unwrap();
        let err = machine.advance(&DocumentEvent::EndLine).unwrap_err();
        assert!(matches!(err, Error::ProtocolViolation { .. }));
        assert_eq!(machine.state(), HandlerState::Document);
    }

    #[test]
    fn test_empty_volume_rejected() {
        let mut machine = StateMachine::new();
        machine.advance(&DocumentEvent::start_document()).unwrap();
        machine.advance(&DocumentEvent::start_volume()).unwrap();
        assert!(machine.advance(&DocumentEvent::EndVolume).is_err());
    }

    #[test]
    fn test_section_without_pages_accepted() {
        let mut machine = StateMachine::new();
        machine.advance(&DocumentEvent::start_document()).unwrap();
        machine.advance(&DocumentEvent::start_volume()).unwrap();
        machine.advance(&DocumentEvent::start_section()).unwrap();
        assert_eq!(
            machine.advance(&DocumentEvent::EndSection).unwrap(),
            Transition::Pop(HandlerState::Section)
        );
        assert!(machine.advance(&DocumentEvent::EndVolume).is_ok());
    }

    #[test]
    fn test_second_braille_in_line_rejected() {
        let mut machine = StateMachine::new();
        for event in &single_page_document(Vec::<String>::new())[..4] {
            machine.advance(event).unwrap();
        }
        machine.advance(&DocumentEvent::start_line()).unwrap();
        machine.advance(&DocumentEvent::braille("A")).unwrap();
        assert!(machine.advance(&DocumentEvent::braille("B")).is_err());
        assert_eq!(machine.advance(&DocumentEvent::EndLine).unwrap(), Transition::Pop(HandlerState::Line));
    }

    #[test]
    fn test_lines_inside_graphic() {
        let mut machine = StateMachine::new();
        for event in &single_page_document(Vec::<String>::new())[..4] {
            machine.advance(event).unwrap();
        }
        machine
            .advance(&DocumentEvent::StartGraphic(GraphicOptions::new()))
            .unwrap();
        assert!(machine.in_graphic());
        machine.advance(&DocumentEvent::start_line()).unwrap();
        assert_eq!(machine.state(), HandlerState::Line);
        machine.advance(&DocumentEvent::EndLine).unwrap();
        machine.advance(&DocumentEvent::EndGraphic).unwrap();
        assert_eq!(machine.state(), HandlerState::Page);
        assert!(!machine.in_graphic());
    }

    #[test]
    #[should_panic(expected = "invalid event StartPage for state Ready")]
    fn test_accept_panics() {
        let mut machine = StateMachine::new();
        machine.accept(&DocumentEvent::start_page());
    }
}
