//! English singularization used to derive identifier keys from collection names.
//!
//! Rules are checked in priority order and the first one that matches wins:
//! uncountable words, then irregular plurals, then the regular suffix rules.
//! A word that matches nothing is returned unchanged.

use std::sync::LazyLock;

use regex::Regex;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// (singular, plural)
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("mombie", "mombies"),
];

/// Regular rules, most specific first.
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(database)s$", "${1}"),
    (r"(quiz)zes$", "${1}"),
    (r"(matr)ices$", "${1}ix"),
    (r"(vert|ind)ices$", "${1}ex"),
    (r"^(ox)en", "${1}"),
    (r"(alias|status)(es)?$", "${1}"),
    (r"(octop|vir)(us|i)$", "${1}us"),
    (r"^(a)x[ie]s$", "${1}xis"),
    (r"(cris|test)(is|es)$", "${1}is"),
    (r"(shoe)s$", "${1}"),
    (r"(o)es$", "${1}"),
    (r"(bus)(es)?$", "${1}"),
    (r"^(m|l)ice$", "${1}ouse"),
    (r"(x|ch|ss|sh)es$", "${1}"),
    (r"(c)ookies$", "${1}ookie"),
    (r"(m)ovies$", "${1}ovie"),
    (r"(s)eries$", "${1}eries"),
    (r"([^aeiouy]|qu)ies$", "${1}y"),
    (r"([lr])ves$", "${1}f"),
    (r"(tive)s$", "${1}"),
    (r"(hive)s$", "${1}"),
    (r"([^f])ves$", "${1}fe"),
    (r"(^analy)(sis|ses)$", "${1}sis"),
    (r"((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$", "${1}sis"),
    (r"([ti])a$", "${1}um"),
    (r"(n)ews$", "${1}ews"),
    (r"(ss)$", "${1}"),
    (r"s$", ""),
];

struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            // Every pattern is a compile-time constant covered by the tests below.
            pattern: Regex::new(pattern).expect("invalid inflection pattern"),
            replacement: replacement.into(),
        }
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(compile_rules);

fn compile_rules() -> Vec<Rule> {
    let mut rules = Vec::new();

    for word in UNCOUNTABLE {
        rules.push(Rule::new(&format!(r"(?i)^({word})$"), "${1}"));
    }

    for (singular, plural) in IRREGULAR {
        rules.push(Rule::new(&format!("{}$", plural.to_uppercase()), singular.to_uppercase()));
        rules.push(Rule::new(&format!("{}$", capitalize(plural)), capitalize(singular)));
        rules.push(Rule::new(&format!("{plural}$"), *singular));
    }

    for (pattern, replacement) in SINGULAR_RULES {
        rules.push(Rule::new(&pattern.to_uppercase(), replacement.to_uppercase()));
        rules.push(Rule::new(pattern, *replacement));
        rules.push(Rule::new(&format!("(?i){pattern}"), *replacement));
    }

    rules
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the singular form of an English plural noun.
///
/// ```ignore
/// use docrepo_core::inflection::singularize;
///
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// ```
pub fn singularize(word: &str) -> String {
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(word))
        .map(|rule| {
            rule.pattern
                .replace(word, rule.replacement.as_str())
                .into_owned()
        })
        .unwrap_or_else(|| word.to_string())
}
