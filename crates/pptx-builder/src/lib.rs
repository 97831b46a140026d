pub mod collect;
pub mod constants;
pub mod deck;
mod guard;
mod io;
mod job;
mod options;
mod placement;
pub mod raster;
mod types;

pub use collect::{
    FolderPlan, FolderWalk, detect_kind, list_documents, list_images, plan_folder, subfolders,
    walk_folders,
};
pub use deck::{PptxDeck, SlideSink, assemble, build};
pub use guard::{ConfirmOverwrite, OverwritePolicy, is_affirmative, may_write};
pub use io::{
    build_deck_async, convert_document_async, convert_files_async, convert_image_folder_async,
};
pub use job::{
    DEFAULT_OUTPUT_NAME, convert_document, convert_files, convert_image_folder,
    output_file_name, with_deck_extension,
};
pub use options::*;
pub use placement::compute_placement;
pub use raster::{RasterizedPages, Rasterizer, first_page_size_inches};
#[cfg(feature = "pdfium")]
pub use raster::PdfiumRasterizer;
pub use types::*;
