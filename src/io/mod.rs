//! I/O layer: decoding source images (`reader`), encoders for every output
//! format (`writers`) and the folder `inventory` report.
pub mod inventory;
pub use inventory::{
    InventoryEntry, build_inventory, write_inventory, write_inventory_report,
};

pub mod reader;
pub use reader::{has_image_extension, open_image};

pub mod writers;
