pub mod ids;
pub mod properties;

pub use ids::{AbstractListId, ListInstanceId, StyleId};
pub use properties::{LIST_INSTANCE_KEY, LIST_LEVEL_KEY, PropertyError, PropertyMap};
