#![doc = r#"
framefit — pad product photos to a target aspect ratio.

This crate turns arbitrary product images into images of a fixed width:height
ratio without cropping: the short side is padded with a solid background
color and the original pixels stay centered and untouched. Optionally, a
small object photographed on a white background is located and the whole
image enlarged first, so the object fills more of the final frame. It powers
the `framefit` CLI and can be embedded in your own Rust applications.

Add dependency
--------------
```toml
[dependencies]
framefit = "0.1"
```

Quick start: fit one file
-------------------------
```rust,no_run
use std::path::Path;
use framefit::{normalize_file, AspectRatio, BackgroundColor, FitParams};

fn main() -> framefit::Result<()> {
    let params = FitParams::new(AspectRatio::LANDSCAPE_4_3, BackgroundColor::WHITE, true);
    let summary = normalize_file(
        Path::new("/data/in/A-100.png"),
        Path::new("/data/out/A-100.jpg"),
        &params,
    )?;
    println!("{}x{}", summary.output_cols, summary.output_rows);
    Ok(())
}
```

The boolean form logs failures instead of returning them:

```rust,no_run
use std::path::Path;
use framefit::{fit, AspectRatio, BackgroundColor};

let ok = fit(
    Path::new("in.png"),
    Path::new("out.jpg"),
    "16:9".parse::<AspectRatio>().unwrap(),
    BackgroundColor::WHITE,
    false,
);
```

In-memory processing
--------------------
```rust
use image::{DynamicImage, Rgb, RgbImage};
use framefit::{fit_image, locate, AspectRatio, BackgroundColor, FitParams};

let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
for y in 40..60 {
    for x in 40..60 {
        img.put_pixel(x, y, Rgb([0, 0, 0]));
    }
}
let img = DynamicImage::ImageRgb8(img);

let bbox = locate(&img);
assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (40, 40, 20, 20));

let params = FitParams::new(AspectRatio::LANDSCAPE_4_3, BackgroundColor::WHITE, true);
let fitted = fit_image(img, &params).unwrap();
assert_eq!(fitted.dimensions(), (400, 300));
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use framefit::{process_directory_to_path, FitParams};

fn main() -> framefit::Result<()> {
    let report = process_directory_to_path(
        Path::new("input"),
        Path::new("output"),
        &FitParams::default(),
        None,
    )?;
    println!("processed={} failed={}", report.processed, report.failed);
    Ok(())
}
```

Error handling
--------------
All fallible functions return `framefit::Result<T>`; match on `framefit::Error`
to tell input problems (missing or undecodable source) from output problems
(unsupported extension, encoder failure).

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — locator, flattening, smart scale, padding and save primitives.
- [`types`] — `AspectRatio`, `BackgroundColor`, `BoundingBox`, `OutputFormat`.
- [`io`] — decoding, encoders and the folder inventory.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{FitParams, SmartScaleConfig};
pub use crate::core::processing::padding::Padding;
pub use crate::core::processing::pipeline::FitSummary;
pub use error::{Error, Result};
pub use types::{AspectRatio, BackgroundColor, BoundingBox, OutputFormat, ScaleDecision};

// Processing primitives
pub use crate::core::processing::locate::{locate, try_locate};
pub use crate::core::processing::padding::letterbox;
pub use crate::core::processing::pipeline::fit_image;
pub use crate::core::processing::smart_scale::decide_scale;

// Inventory
pub use io::inventory::{
    InventoryEntry, build_inventory, write_inventory, write_inventory_report,
};

// High-level API re-exports
pub use api::{
    BatchEvent, BatchReport, discover_images, fit, normalize_file, process_directory_to_path,
};
