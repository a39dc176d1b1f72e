//! Browser implementations.

mod headless;

pub use headless::HeadlessBrowser;
