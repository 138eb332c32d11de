pub mod app;
pub mod spin_badge;

pub use app::App;
