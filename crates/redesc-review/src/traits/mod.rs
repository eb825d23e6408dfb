//! Seams to the remote service

mod updater;

pub use updater::VideoUpdater;
