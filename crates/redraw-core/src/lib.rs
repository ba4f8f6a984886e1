pub mod consts;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod inpaint;
pub mod io;
pub mod overlay;
pub mod page;
pub mod params;
pub mod polygon;
pub mod raster;
pub mod script;
pub mod session;
pub mod settings;
pub mod viewport;
