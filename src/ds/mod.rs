pub mod node_list;
pub mod slot_arena;

pub use node_list::{ListTag, NodePool, OrderedList};
pub use slot_arena::{SlotArena, SlotId};
