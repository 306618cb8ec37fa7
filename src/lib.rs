pub mod archive;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod screen;
pub mod store;
pub mod tasks {
    pub mod auto_advance;
    pub mod decoder;
    pub mod dispatcher;
    pub mod navigation;
}
