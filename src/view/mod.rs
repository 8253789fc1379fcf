pub mod keys;
pub mod notice;
pub mod render;
pub mod state;

pub use keys::KeyEvent;
pub use notice::{Notice, Notifier};
pub use render::{RenderModel, ResultCard};
pub use state::{ClassifierView, Pending};
