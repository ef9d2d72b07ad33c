/// External scripts a page needs, each listed once in first-requested order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptRegistry {
    scripts: Vec<&'static str>,
}

impl ScriptRegistry {
    /// Returns `true` the first time a script is requested.
    pub fn require(&mut self, src: &'static str) -> bool {
        if self.is_loaded(src) {
            return false;
        }
        self.scripts.push(src);
        true
    }

    pub fn is_loaded(&self, src: &str) -> bool {
        self.scripts.contains(&src)
    }

    pub fn into_scripts(self) -> Vec<&'static str> {
        self.scripts
    }
}
