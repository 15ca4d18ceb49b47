pub mod resume;
pub mod stored;
