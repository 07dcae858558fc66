use super::{Config, Registry};

/// Configures a [`Registry`] before any model is defined in it.
#[derive(Debug)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Attribute that stores the type discriminator. Defaults to `type`.
    pub fn model_type_key(&mut self, key: &str) -> &mut Self {
        self.config.model_type_key = key.to_string();
        self
    }

    /// Keep undeclared attributes on mass assignment. Off by default.
    pub fn mass_assign_any_attribute(&mut self, enabled: bool) -> &mut Self {
        self.config.mass_assign_any_attribute = enabled;
        self
    }

    pub fn build(&self) -> Registry {
        Registry::from_config(self.config.clone())
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            config: Config::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model_type_key: "type".to_string(),
            mass_assign_any_attribute: false,
        }
    }
}
