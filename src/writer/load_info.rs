use crate::config::Config;
use crate::schema::Structure;

use super::columns::Column;
use super::statements::base_statement;

/// `DB2LoadInfo` struct describing the selected columns of a base structure.
///
/// The field table is sized to the number of selectable columns, which is
/// also the number of entries written.
pub fn generate_load_info(structure: &Structure, columns: &[Column], config: &Config) -> String {
    let entries: Vec<String> = columns
        .iter()
        .filter(|c| c.selectable)
        .map(|c| {
            format!(
                "            {{ {}, {}, \"{}\" }},\n",
                c.def.is_signed,
                c.def.format_tag,
                c.quoted_name()
            )
        })
        .collect();

    let name = &structure.normalized_name;
    let mut out = String::new();

    out.push_str(&format!("\nstruct {}LoadInfo\n{{\n", name));
    out.push_str("    static DB2LoadInfo const* Instance()\n    {\n");
    out.push_str(&format!(
        "        static DB2FieldMeta const fields[{}] =\n        {{\n",
        entries.len()
    ));
    for entry in &entries {
        out.push_str(entry);
    }
    out.push_str("        };\n");
    out.push_str(&format!(
        "        static DB2LoadInfo const loadInfo(&fields[0], std::extent<decltype(fields)>::value, {}Meta::Instance(), {});\n",
        name,
        base_statement(structure, config)
    ));
    out.push_str("        return &loadInfo;\n    }\n};\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Member;
    use crate::writer::columns::expand_structure;

    #[test]
    fn test_generate_load_info() {
        let mut s = Structure::new("FooEntry", "Foo")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("LocalizedString*", "Name_lang"))
            .with_member(Member::new("int16", "Index"))
            .with_member(Member::new("Widget", "Thing"));
        s.push_verified_build();

        let text = generate_load_info(&s, &expand_structure(&s), &Config::default());

        assert!(text.contains("struct FooLoadInfo\n"));
        assert!(text.contains("static DB2FieldMeta const fields[4] =\n"));
        assert!(text.contains("{ false, FT_INT, \"ID\" },\n"));
        assert!(text.contains("{ false, FT_STRING, \"Name_lang\" },\n"));
        assert!(text.contains("{ true, FT_SHORT, \"`Index`\" },\n"));
        assert!(text.contains("{ false, ERROR TYPE Widget, \"Thing\" },\n"));
        assert!(!text.contains("VerifiedBuild"));
        assert!(text.contains("FooMeta::Instance(), HOTFIX_SEL_FOO);"));
    }
}
