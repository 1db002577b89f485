mod change;
mod manager;
mod persistence;
mod session;

pub use change::Change;
pub use manager::{DefaultAmountPolicy, SelectionManager};
pub use persistence::{load_snapshot, save_snapshot, JsonFileStore, KeyValueStore, MemoryStore};
pub use session::{IntakeSummary, Session, SessionOptions};
