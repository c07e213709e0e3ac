pub mod flatten;
pub mod locate;
pub mod padding;
pub mod pipeline;
pub mod resize;
pub mod save;
pub mod smart_scale;
