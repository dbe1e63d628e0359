use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::predicate::{InvalidStatementError, Predicate, RollOptions};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// named predicates; each entry is one statement or a list of statements
    #[serde(default)]
    pub predicates: BTreeMap<String, JsonValue>,
    /// named fact sets for testing predicates against
    #[serde(default)]
    pub facts: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// build the named predicate, `None` if no such entry exists
    pub fn predicate(&self, name: &str) -> Option<Result<Predicate, InvalidStatementError>> {
        self.predicates.get(name).map(|raw| {
            Predicate::from_json(raw).map_err(|e| e.within(&format!("predicates.{}", name)))
        })
    }

    /// the named fact set plus the configured base facts
    pub fn fact_set(&self, name: &str) -> Option<RollOptions> {
        self.facts.get(name).map(|options| {
            let mut facts = self.base_facts();
            facts.extend(options.iter().cloned());
            facts
        })
    }

    /// roll options present in every test
    pub fn base_facts(&self) -> RollOptions {
        self.settings.base_facts.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// roll options added to every fact set, e.g. a game system tag
    #[serde(default)]
    pub base_facts: Vec<String>,
    /// echo the fact set alongside test results
    #[serde(default)]
    pub show_facts: bool,
}
