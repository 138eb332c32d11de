pub mod binding;
pub mod spin;

pub use binding::SpinBinding;
pub use spin::SpinController;
