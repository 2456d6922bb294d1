pub mod posts;

pub use posts::posts_suite;
