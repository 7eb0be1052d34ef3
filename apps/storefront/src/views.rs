//! # Views
//!
//! Server-rendered pages. Templates are compiled into the binary and
//! registered once at startup; autoescaping is on for every `.html` template.
//!
//! | Template          | Page                         |
//! |-------------------|------------------------------|
//! | `index.html`      | horse list                   |
//! | `add_horse.html`  | create form                  |
//! | `edit_horse.html` | edit form, pre-filled        |
//! | `cart.html`       | cart lines                   |
//!
//! Every page extends `base.html`, which renders the flash messages and the
//! navigation links.
//!
//! Prices go through the `price` filter: Tera prints a whole `f64` without its
//! fraction, the listing shows `1200.0`.

use std::collections::HashMap;

use tera::{Context, Tera, Value};

use paddock_core::{CartLine, Horse};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("add_horse.html", include_str!("../templates/add_horse.html")),
    ("edit_horse.html", include_str!("../templates/edit_horse.html")),
    ("cart.html", include_str!("../templates/cart.html")),
];

/// Template registry.
#[derive(Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parses every embedded template.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        tera.autoescape_on(vec![".html"]);
        tera.register_filter("price", price_filter);
        Ok(Views { tera })
    }

    fn base_context(messages: &[String]) -> Context {
        let mut context = Context::new();
        context.insert("messages", messages);
        context
    }

    /// Horse list.
    pub fn index(&self, horses: &[Horse], messages: &[String]) -> Result<String, tera::Error> {
        let mut context = Self::base_context(messages);
        context.insert("horses", horses);
        self.tera.render("index.html", &context)
    }

    /// Empty create form.
    pub fn add_horse(&self, messages: &[String]) -> Result<String, tera::Error> {
        let context = Self::base_context(messages);
        self.tera.render("add_horse.html", &context)
    }

    /// Edit form for `horse`.
    pub fn edit_horse(&self, horse: &Horse, messages: &[String]) -> Result<String, tera::Error> {
        let mut context = Self::base_context(messages);
        context.insert("horse", horse);
        self.tera.render("edit_horse.html", &context)
    }

    /// Cart contents.
    pub fn cart(&self, lines: &[CartLine], messages: &[String]) -> Result<String, tera::Error> {
        let mut context = Self::base_context(messages);
        context.insert("lines", lines);
        self.tera.render("cart.html", &context)
    }
}

/// Formats a price the way the listing shows it (`1200.0`, `1200.5`).
pub fn format_price(price: f64) -> String {
    format!("{price:?}")
}

fn price_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let price = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg(format!("price filter expects a number, got {value}")))?;
    Ok(Value::String(format_price(price)))
}
