pub mod image;
pub mod progress;
pub mod summary;
pub mod upcoming;

pub use self::image::render_image_widget;
pub use self::progress::create_progress_gauge;
pub use self::summary::create_summary_widget;
pub use self::upcoming::create_upcoming_widget;
