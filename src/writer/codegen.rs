use tracing::{debug, warn};

use crate::config::{Config, Flavor};
use crate::schema::Structure;

use super::columns::expand_structure;
use super::load_info::generate_load_info;
use super::schema_gen::generate_create_table;
use super::statements::{generate_prepare_statement, generate_statement_ids};

/// Everything one structure contributes to the output streams
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFragments {
    /// DROP/CREATE TABLE block
    pub schema: String,
    /// `PrepareStatement` / `PREPARE_LOCALE_STMT` call(s)
    pub statement: String,
    /// Enumerator line(s)
    pub identifier: String,
    /// `DB2LoadInfo` struct, base structures in the metadata flavor only
    pub metadata: Option<String>,
    /// Columns in the SELECT list and the load info
    pub column_count: usize,
}

/// Generate all fragments for one structure from a single column expansion
pub fn emit_record(structure: &Structure, config: &Config) -> RecordFragments {
    let columns = expand_structure(structure);
    let column_count = columns.iter().filter(|c| c.selectable).count();

    let errors = columns.iter().filter(|c| c.def.is_error()).count();
    if errors > 0 {
        warn!(table = %structure.table_name(), errors, "columns with unmapped types");
    }

    debug!(
        table = %structure.table_name(),
        columns = columns.len(),
        selected = column_count,
        "emitting structure"
    );

    let metadata = (config.flavor == Flavor::Metadata && !structure.is_locale)
        .then(|| generate_load_info(structure, &columns, config));

    RecordFragments {
        schema: generate_create_table(structure, &columns, config),
        statement: generate_prepare_statement(structure, &columns, config),
        identifier: generate_statement_ids(structure, config),
        metadata,
        column_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Member;

    fn foo() -> Structure {
        let mut s = Structure::new("FooEntry", "Foo")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("LocalizedString*", "Name_lang"))
            .with_member(Member::new("float", "Rate"));
        s.push_verified_build();
        s
    }

    #[test]
    fn test_classic_has_no_metadata() {
        let fragments = emit_record(&foo(), &Config::default());
        assert!(fragments.metadata.is_none());
        assert_eq!(fragments.column_count, 3);
    }

    #[test]
    fn test_metadata_size_matches_entries() {
        let config = Config {
            flavor: Flavor::Metadata,
            ..Config::default()
        };
        let fragments = emit_record(&foo(), &config);
        let metadata = fragments.metadata.unwrap();
        let entries = metadata.matches("            { ").count();

        assert_eq!(entries, fragments.column_count);
        assert!(metadata.contains(&format!("fields[{}]", fragments.column_count)));
    }

    #[test]
    fn test_locale_never_has_metadata() {
        let config = Config {
            flavor: Flavor::Metadata,
            ..Config::default()
        };
        let locale = foo().create_locale_table().unwrap();
        let fragments = emit_record(&locale, &config);

        assert!(fragments.metadata.is_none());
        assert_eq!(fragments.column_count, 2);
    }

    #[test]
    fn test_empty_structure_is_degenerate_table() {
        let mut s = Structure::new("EmptyEntry", "Empty");
        s.push_verified_build();
        let fragments = emit_record(&s, &Config::default());

        assert_eq!(fragments.column_count, 0);
        assert!(fragments.schema.contains("  VerifiedBuild int(11) NOT NULL DEFAULT '0',\n"));
        assert!(fragments.statement.contains("\"SELECT  FROM empty ORDER BY ID DESC\""));
    }
}
