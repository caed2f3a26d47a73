//! Domain layer: value types and injectable collaborators, free of storage.

pub mod clock;
pub mod drawing;
pub mod game;
pub mod inbox;
pub mod player_order;
pub mod turn;

pub use clock::{Clock, ManualClock, SystemClock};
pub use drawing::{Color, Drawing, Line, Point};
pub use game::{GameRecord, PlayedTurn};
pub use inbox::InboxEntry;
pub use player_order::{GivenOrder, PlayerOrder, RandomOrder, SeededOrder};
pub use turn::{Turn, TurnPayload};
