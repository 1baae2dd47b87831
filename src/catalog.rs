//! Static language catalog: keywords, functions, operators, attributes,
//! rule templates, and the typo correction table.
//!
//! Built once at first use and shared by read-only reference. Completion
//! front ends consume the list exports; the analysis passes use the
//! membership queries.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Core Drools keywords
pub const KEYWORDS: &[&str] = &[
    "rule",
    "when",
    "then",
    "end",
    "package",
    "import",
    "global",
    "function",
    "declare",
    "dialect",
    "salience",
    "no-loop",
    "ruleflow-group",
    "agenda-group",
    "auto-focus",
    "lock-on-active",
    "date-effective",
    "date-expires",
    "enabled",
    "duration",
];

/// Drools built-in functions
pub const FUNCTIONS: &[&str] = &[
    "insert",
    "insertLogical",
    "update",
    "modify",
    "retract",
    "delete",
    "drools",
    "kcontext",
];

/// Drools condition operators
pub const OPERATORS: &[&str] = &[
    "matches",
    "contains",
    "memberOf",
    "soundslike",
    "str",
    "in",
    "not in",
    "exists",
    "not exists",
    "forall",
    "from",
    "collect",
    "accumulate",
];

/// Rule attributes
pub const ATTRIBUTES: &[&str] = &[
    "salience",
    "no-loop",
    "ruleflow-group",
    "agenda-group",
    "auto-focus",
    "lock-on-active",
    "date-effective",
    "date-expires",
    "enabled",
    "duration",
    "timer",
];

/// Rule skeletons for completion front ends
pub const RULE_TEMPLATES: &[&str] = &[
    "rule \"Rule Name\"\nwhen\n    // conditions\nthen\n    // actions\nend",
    "rule \"Rule Name\"\n    salience 100\nwhen\n    // conditions\nthen\n    // actions\nend",
    "rule \"Rule Name\"\n    no-loop true\nwhen\n    // conditions\nthen\n    // actions\nend",
];

/// Known misspellings of the core keywords. Only exact table hits are
/// reported; there is no fuzzy distance matching.
const TYPOS: &[(&str, &str)] = &[
    ("wen", "when"),
    ("thn", "then"),
    ("edn", "end"),
    ("ruel", "rule"),
];

/// Immutable language catalog
pub struct Catalog {
    keyword_set: HashSet<&'static str>,
    function_set: HashSet<&'static str>,
    operator_set: HashSet<&'static str>,
    attribute_set: HashSet<&'static str>,
    typo_corrections: HashMap<&'static str, &'static str>,
}

impl Catalog {
    fn build() -> Self {
        Self {
            keyword_set: KEYWORDS.iter().copied().collect(),
            function_set: FUNCTIONS.iter().copied().collect(),
            operator_set: OPERATORS.iter().copied().collect(),
            attribute_set: ATTRIBUTES.iter().copied().collect(),
            typo_corrections: TYPOS.iter().copied().collect(),
        }
    }

    /// Check if a word is a keyword
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keyword_set.contains(word)
    }

    /// Check if a word is a built-in function
    pub fn is_function(&self, word: &str) -> bool {
        self.function_set.contains(word)
    }

    /// Check if a word is a condition operator
    pub fn is_operator(&self, word: &str) -> bool {
        self.operator_set.contains(word)
    }

    /// Check if a word is a rule attribute
    pub fn is_attribute(&self, word: &str) -> bool {
        self.attribute_set.contains(word)
    }

    /// Look up the correction for a known keyword misspelling
    pub fn typo_suggestion(&self, word: &str) -> Option<&'static str> {
        self.typo_corrections.get(word).copied()
    }

    /// Keyword list (read-only export)
    pub fn keywords(&self) -> &'static [&'static str] {
        KEYWORDS
    }

    /// Function list (read-only export)
    pub fn functions(&self) -> &'static [&'static str] {
        FUNCTIONS
    }

    /// Operator list (read-only export)
    pub fn operators(&self) -> &'static [&'static str] {
        OPERATORS
    }

    /// Attribute list (read-only export)
    pub fn attributes(&self) -> &'static [&'static str] {
        ATTRIBUTES
    }

    /// Rule template list (read-only export)
    pub fn rule_templates(&self) -> &'static [&'static str] {
        RULE_TEMPLATES
    }
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

/// The process-wide catalog instance
pub fn catalog() -> &'static Catalog {
    &CATALOG
}
