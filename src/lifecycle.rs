//! Per-document transition phases.
//!
//! ```text
//! PrePaint --DomContentLoaded--> CheckingFlag --FlagFound--> FadingIn --FadeInSettled--> Idle
//!                                             --FlagAbsent--> RevealedImmediately --Revealed--> Idle
//!                                             --WrapperMissing--> Idle
//! Idle | FadingIn | PrePaint --LinkIntercepted--> FadingOut --DurationElapsed--> Navigating
//! Idle | FadingIn | PrePaint | FadingOut --FallbackNavigation--> Navigating
//! ```
//!
//! `Navigating` is terminal: the document is about to unload.

use crate::machine::{PhaseMachine, Transition};

crate::state_enum! {
    #[derive(Copy, Eq, Hash)]
    pub enum PagePhase {
        PrePaint,
        CheckingFlag,
        FadingIn,
        RevealedImmediately,
        Idle,
        FadingOut,
        Navigating,
    }
    final: [Navigating]
}

/// Events that move a document between phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageEvent {
    DomContentLoaded,
    WrapperMissing,
    FlagFound,
    FlagAbsent,
    FadeInSettled,
    Revealed,
    LinkIntercepted,
    DurationElapsed,
    FallbackNavigation,
}

/// Build the machine for a freshly loaded document.
pub fn page_machine() -> PhaseMachine<PagePhase, PageEvent> {
    use PageEvent::*;
    use PagePhase::*;

    let mut edges = vec![
        Transition::new(PrePaint, DomContentLoaded, CheckingFlag),
        Transition::new(CheckingFlag, WrapperMissing, Idle),
        Transition::new(CheckingFlag, FlagFound, FadingIn),
        Transition::new(CheckingFlag, FlagAbsent, RevealedImmediately),
        Transition::new(FadingIn, FadeInSettled, Idle),
        Transition::new(RevealedImmediately, Revealed, Idle),
        Transition::new(FadingOut, DurationElapsed, Navigating),
        Transition::new(FadingOut, FallbackNavigation, Navigating),
    ];
    for from in [Idle, FadingIn, PrePaint] {
        edges.push(Transition::new(from, LinkIntercepted, FadingOut));
        edges.push(Transition::new(from, FallbackNavigation, Navigating));
    }

    PhaseMachine::new(PrePaint).with_transitions(edges)
}
