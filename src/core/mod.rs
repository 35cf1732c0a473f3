pub mod filter;
pub mod images;
pub mod log;
pub mod persistence;
pub mod store;
pub mod tracker;

pub use filter::{DateRange, FilterSpec, ValueRange};
pub use images::{ImageDraft, ImageSource, PendingImages};
pub use persistence::{MemorySlots, Persistence, PersistenceWarning, SlotBackend};
pub use store::RecordStore;
pub use tracker::Tracker;
