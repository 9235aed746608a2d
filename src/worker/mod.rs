mod refresher;

pub use refresher::Refresher;
