//! `repeaterview` - Render a repeater directory into HTML pages
//!
//! The repeater list lives in a single JSON document. This library loads it
//! once, derives display strings for each record, and fills the named
//! containers of the site's pages: compact lists on the index page, and a
//! quick reference table plus detailed lists on the repeaters page.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod logging;
pub mod render;
pub mod repeater;
pub mod sink;

pub use config::Config;
pub use error::{Error, Result};
pub use loader::{load_repeater_data, FileSource, RepeaterSource, StaticSource};
pub use logging::init_logging;
pub use render::{render_page, Page};
pub use repeater::{LinkType, Repeater, RepeaterData};
pub use sink::{Container, FragmentSink, HtmlDocumentSink, ViewSink};
