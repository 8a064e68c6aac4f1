//! Listable CMS resources

pub mod category;
pub mod post;
pub mod tag;

pub use category::{Category, TYPE_PAGE, TYPE_POST};
pub use post::Post;
pub use tag::Tag;
