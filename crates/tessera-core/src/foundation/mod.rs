//! Foundation layer: host contracts and the types that cross them.

pub mod handle;
pub mod snapshot;
pub mod subject;

pub use handle::{FieldSlot, FieldValue, HandleShape, HiddenHandle};
pub use snapshot::{FieldHandle, SubjectSnapshot};
pub use subject::{
    Enchantment, Host, Inventory, ItemView, Location, Property, Slot, Subject, Value,
    is_empty_item, render_float,
};
