//! Naming conventions for relation inference.
//!
//! Pluralization is convention, not data: it sits behind [`NamingPolicy`]
//! so hosts with their own collection naming can swap it out.

///
/// NamingPolicy
///

pub trait NamingPolicy: Send + Sync {
    fn pluralize(&self, name: &str) -> String;

    fn singularize(&self, name: &str) -> String;

    /// Physical collection name for an entity without a registered model.
    fn collection_name(&self, entity_name: &str) -> String {
        self.pluralize(&entity_name.to_lowercase())
    }
}

///
/// InflectionNaming
///
/// English inflection (`person` → `people`, `relatives` → `relative`).
/// Uncountable and irregular words are looked up before the suffix rules.
/// Only the last word of a dotted or camelCase name is inflected
/// (`groups.members` → `groups.member`, `grandChildren` → `grandChild`).
///

#[derive(Clone, Copy, Debug, Default)]
pub struct InflectionNaming;

impl NamingPolicy for InflectionNaming {
    fn pluralize(&self, name: &str) -> String {
        inflect_last_word(name, plural_of)
    }

    fn singularize(&self, name: &str) -> String {
        inflect_last_word(name, singular_of)
    }
}

// Words with the same singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

// (singular, plural) pairs the suffix rules get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("alias", "aliases"),
    ("analysis", "analyses"),
    ("bonus", "bonuses"),
    ("bus", "buses"),
    ("campus", "campuses"),
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("mouse", "mice"),
    ("movie", "movies"),
    ("ox", "oxen"),
    ("person", "people"),
    ("shelf", "shelves"),
    ("status", "statuses"),
    ("tooth", "teeth"),
    ("virus", "viruses"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

// Apply `inflect` to the last word, keeping everything before it.
fn inflect_last_word(name: &str, inflect: fn(&str) -> String) -> String {
    let (prefix, word) = split_last_word(name);
    if word.is_empty() {
        return name.to_string();
    }

    format!("{prefix}{}", match_case(word, &inflect(&word.to_lowercase())))
}

// Last word starts after the last '.' or at the last uppercase letter.
fn split_last_word(name: &str) -> (&str, &str) {
    let segment_start = name.rfind('.').map_or(0, |dot| dot + 1);
    let segment = &name[segment_start..];
    let word_start = segment
        .char_indices()
        .filter(|(_, ch)| ch.is_uppercase())
        .map(|(index, _)| index)
        .next_back()
        .unwrap_or(0);

    name.split_at(segment_start + word_start)
}

// Carry a leading capital over from `original`.
fn match_case(original: &str, inflected: &str) -> String {
    let mut chars = inflected.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(head)) if first.is_uppercase() => {
            head.to_uppercase().chain(chars).collect()
        }
        _ => inflected.to_string(),
    }
}

fn plural_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) || IRREGULAR.iter().any(|(_, plural)| *plural == word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }

    if let Some(stem) = word.strip_suffix('y')
        && stem.ends_with(is_consonant)
    {
        return format!("{stem}ies");
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return format!("{word}es");
    }

    format!("{word}s")
}

fn singular_of(word: &str) -> String {
    if UNCOUNTABLE.contains(&word) || IRREGULAR.iter().any(|(singular, _)| *singular == word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == word) {
        return (*singular).to_string();
    }

    if let Some(stem) = word.strip_suffix("ies")
        && !stem.is_empty()
    {
        return format!("{stem}y");
    }
    if ["sses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if ["ss", "us", "is"].iter().any(|suffix| word.ends_with(suffix)) {
        return word.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

const fn is_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}
