//! Bundled font assets

mod mini5;

pub use mini5::MINI5;
