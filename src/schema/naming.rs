//! Identifier rules shared by every generated artifact

use std::borrow::Cow;

/// Marker carried by localized string member names
pub const LANG_MARKER: &str = "_lang";

/// Legacy marker some headers use instead of `_lang`
pub const LOC_MARKER: &str = "_loc";

/// SQL keywords that collide with generated table or column names
const RESERVED_WORDS: &[&str] = &[
    "INDEX", "ORDER", "FROM", "LIMIT", "TEXT", "RANK", "SYSTEM", "TRIGGER", "TO", "LOCK", "INT1",
    "INT2", "INT3", "INT4", "FLOAT4", "FLOAT8",
];

/// Convert a CamelCase record name to its snake_case table name.
///
/// `SpellItemEnchantment` → `spell_item_enchantment`
pub fn table_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 8);

    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }

    result
}

/// Case-insensitive check against the reserved keyword list
pub fn is_reserved_word(identifier: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(identifier))
}

/// Back-quote an identifier if it is a reserved word
pub fn quote_identifier(identifier: &str) -> Cow<'_, str> {
    if is_reserved_word(identifier) {
        Cow::Owned(format!("`{}`", identifier))
    } else {
        Cow::Borrowed(identifier)
    }
}

/// Normalize a raw struct name for table naming and comments.
///
/// Applies the acronym substitutions in order, drops underscores and cuts the
/// name at the last occurrence of `suffix`.
pub fn normalize_struct_name(name: &str, acronyms: &[(String, String)], suffix: &str) -> String {
    let mut normalized = acronyms
        .iter()
        .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to))
        .replace('_', "");

    if !suffix.is_empty() {
        if let Some(pos) = normalized.rfind(suffix) {
            normalized.truncate(pos);
        }
    }

    normalized
}

/// Column name for element `index` (1-based) of an array member.
///
/// The index goes right before the `_lang` marker when there is one.
pub fn indexed_name(name: &str, index: u32) -> String {
    match name.find(LANG_MARKER) {
        Some(pos) => format!("{}{}{}", &name[..pos], index, &name[pos..]),
        None => format!("{}{}", name, index),
    }
}

/// Name of a localized member inside the derived locale record.
///
/// Strips any `_lang`/`_loc` marker and puts `_lang` back before trailing
/// array notation, or at the end.
pub fn locale_member_name(name: &str) -> String {
    let mut stripped = name.replace(LANG_MARKER, "").replace(LOC_MARKER, "");

    match stripped.rfind('[') {
        Some(pos) => stripped.insert_str(pos, LANG_MARKER),
        None => stripped.push_str(LANG_MARKER),
    }

    stripped
}

/// Statement identifier for a table: `HOTFIX_SEL_` + upper-case table name
pub fn statement_name(prefix: &str, table: &str) -> String {
    format!("{}{}", prefix, table.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_acronyms() -> Vec<(String, String)> {
        crate::config::Config::default().acronyms
    }

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("Achievement"), "achievement");
        assert_eq!(table_name("SpellItemEnchantment"), "spell_item_enchantment");
        assert_eq!(table_name("FooLocale"), "foo_locale");
    }

    #[test]
    fn test_table_name_idempotent() {
        for name in ["foo", "spell_item_enchantment", "foo_locale"] {
            assert_eq!(table_name(name), name);
        }
        let once = table_name("GarrAbilityEffect");
        assert_eq!(table_name(&once), once);
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved_word("Index"));
        assert!(is_reserved_word("order"));
        assert!(is_reserved_word("FLOAT8"));
        assert!(!is_reserved_word("ID"));
        assert!(!is_reserved_word("Indexes"));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("Order"), "`Order`");
        assert_eq!(quote_identifier("Rate"), "Rate");
    }

    #[test]
    fn test_normalize_struct_name() {
        let acronyms = default_acronyms();
        assert_eq!(normalize_struct_name("FooEntry", &acronyms, "Entry"), "Foo");
        assert_eq!(
            normalize_struct_name("GameObjectDisplayInfoEntry", &acronyms, "Entry"),
            "GameobjectDisplayInfo"
        );
        assert_eq!(normalize_struct_name("PvPDifficultyEntry", &acronyms, "Entry"), "PvpDifficulty");
        assert_eq!(normalize_struct_name("WMOAreaTableEntry", &acronyms, "Entry"), "WmoAreaTable");
        assert_eq!(normalize_struct_name("Item_SparseEntry", &acronyms, "Entry"), "ItemSparse");
        assert_eq!(normalize_struct_name("LFGDungeonsEntry", &acronyms, "Entry"), "LfgDungeons");
    }

    #[test]
    fn test_indexed_name() {
        assert_eq!(indexed_name("Flag", 2), "Flag2");
        assert_eq!(indexed_name("Name_lang", 1), "Name1_lang");
        assert_eq!(indexed_name("Description_lang", 3), "Description3_lang");
    }

    #[test]
    fn test_locale_member_name() {
        assert_eq!(locale_member_name("Name_lang"), "Name_lang");
        assert_eq!(locale_member_name("Name"), "Name_lang");
        assert_eq!(locale_member_name("Title_loc"), "Title_lang");
        assert_eq!(locale_member_name("Text_lang[2]"), "Text_lang[2]");
        assert_eq!(locale_member_name("Text[2]"), "Text_lang[2]");
    }

    #[test]
    fn test_statement_name() {
        assert_eq!(statement_name("HOTFIX_SEL_", "foo_locale"), "HOTFIX_SEL_FOO_LOCALE");
    }
}
