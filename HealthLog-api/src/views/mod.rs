//! HTML rendering for the measurement page
//!
//! Templates are compiled into the binary and registered with Tera under
//! an `.html` name, which turns on Tera's HTML autoescaping for every value
//! rendered into them.

use tera::{Context, Tera};

use crate::entities::MeasurementView;

const INDEX_TEMPLATE: &str = "index.html";

/// Client script for the flag buttons, served at `/static/main.js`
pub const MAIN_SCRIPT: &str = include_str!("../../static/main.js");

/// Compiled page templates
#[derive(Debug)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Parse all bundled templates
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Self { tera })
    }

    /// Render the measurement page
    ///
    /// `notice` is shown above the form when present.
    pub fn render_index(
        &self,
        measurements: &[MeasurementView],
        notice: Option<&str>,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("measurements", measurements);
        context.insert("notice", &notice);
        self.tera.render(INDEX_TEMPLATE, &context)
    }
}
