//! Page rendering.

use minijinja::Environment;

use super::views::{ChatPage, LoginPage};

/// Compiled page templates. Names ending in `.html` are auto-escaped.
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../../templates/base.html"))?;
        env.add_template("login.html", include_str!("../../templates/login.html"))?;
        env.add_template("chat.html", include_str!("../../templates/chat.html"))?;
        Ok(Self { env })
    }

    pub fn login(&self, page: &LoginPage) -> Result<String, minijinja::Error> {
        self.env.get_template("login.html")?.render(page)
    }

    pub fn chat(&self, page: &ChatPage) -> Result<String, minijinja::Error> {
        self.env.get_template("chat.html")?.render(page)
    }
}
