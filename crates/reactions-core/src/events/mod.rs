mod reaction_event;

pub use reaction_event::ReactionEvent;
