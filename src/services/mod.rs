pub mod clock;
pub mod dialogue;
pub mod messaging;
pub mod nlu;
pub mod slots;
