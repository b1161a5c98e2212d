//! Event sourcing: every board mutation is an invertible `Event`.
//!
//! ## Structure
//!
//! - `Event`: one atomic mutation with `perform` and `undo`.
//! - `DrawEvent`: the ordered events of one draw (a turn, including every
//!   chained follow-on effect).
//! - `MatchHistory`: the stack of draws. Undo pops the newest draw and
//!   inverts its events newest first; events within a draw do not commute.

pub mod draw_event;
pub mod event;
pub mod history;

pub use draw_event::DrawEvent;
pub use event::Event;
pub use history::MatchHistory;
