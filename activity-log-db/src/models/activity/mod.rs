pub mod activity_column;
pub mod activity_record;
pub mod activity_type;
pub mod feed_entry;
pub mod item_ids;
pub mod item_metadata;
pub mod last_updated;

pub use activity_column::*;
pub use activity_record::*;
pub use activity_type::*;
pub use feed_entry::*;
pub use item_ids::*;
pub use item_metadata::*;
pub use last_updated::*;
