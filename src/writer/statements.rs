use crate::config::{Config, Flavor};
use crate::schema::{quote_identifier, statement_name, Structure, ID_COLUMN, VERIFIED_BUILD};

use super::columns::Column;
use super::line_wrap::WrappedLineBuilder;

const WRAP_PREFIX: &str = "        \"";
const WRAP_SUFFIX: &str = "\"";

/// Statement identifier of the structure's base table
pub fn base_statement(structure: &Structure, config: &Config) -> String {
    statement_name(&config.statement_prefix, &structure.base_table_name())
}

/// SELECT text used by the prepared statement of a structure
pub fn select_sql(structure: &Structure, columns: &[Column], flavor: Flavor) -> Vec<String> {
    let table = structure.table_name();
    let mut pieces: Vec<String> = vec!["SELECT ".to_string()];

    let selected: Vec<_> = columns.iter().filter(|c| c.selectable).collect();
    for (i, col) in selected.iter().enumerate() {
        let separator = if i + 1 < selected.len() { ", " } else { "" };
        pieces.push(format!("{}{}", col.quoted_name(), separator));
    }

    pieces.push(format!(" FROM {}", quote_identifier(&table)));

    let build_filter = format!("(`{}` > 0) = ?", VERIFIED_BUILD);
    match (flavor, structure.is_locale) {
        (Flavor::Classic, false) => pieces.push(format!(" ORDER BY {} DESC", ID_COLUMN)),
        (Flavor::Classic, true) => pieces.push(" WHERE locale = ?".to_string()),
        (Flavor::Metadata, false) => pieces.push(format!(" WHERE {}", build_filter)),
        (Flavor::Metadata, true) => {
            pieces.push(format!(" WHERE {}", build_filter));
            pieces.push(" AND locale = ?".to_string());
        }
    }

    pieces
}

/// Prepared statement registration for `DoPrepareStatements`
pub fn generate_prepare_statement(
    structure: &Structure,
    columns: &[Column],
    config: &Config,
) -> String {
    let stmt = base_statement(structure, config);
    let mut cpp =
        WrappedLineBuilder::new(config.line_length).wrapping_with(WRAP_PREFIX, WRAP_SUFFIX);

    // Head and `SELECT ` stay on one line; wrapping only happens inside the literal.
    if structure.is_locale {
        cpp.append(&format!("    PREPARE_LOCALE_STMT({}, \"", stmt));
    } else {
        cpp.append_line("");
        cpp.append_line(&format!("    // {}.db2", structure.normalized_name));
        cpp.append(&format!("    PrepareStatement({}, \"", stmt));
    }

    for (i, piece) in select_sql(structure, columns, config.flavor).iter().enumerate() {
        if i == 0 {
            cpp.nonbreaking();
        }
        cpp.append(piece);
    }
    cpp.nonbreaking().append_line("\", CONNECTION_SYNCH);");

    if config.flavor == Flavor::Metadata && !structure.is_locale {
        cpp.append_line(&format!(
            "    PREPARE_MAX_ID_STMT({}, \"SELECT MAX({}) + 1 FROM {}\", CONNECTION_SYNCH);",
            stmt,
            ID_COLUMN,
            quote_identifier(&structure.table_name())
        ));
    }

    cpp.finish()
}

/// Enumerators for HotfixDatabase.h.
///
/// The locale enumerator must directly follow the base one (and its max id
/// enumerator), which holds as long as locale structures are emitted right
/// after their base.
pub fn generate_statement_ids(structure: &Structure, config: &Config) -> String {
    let stmt = base_statement(structure, config);

    if structure.is_locale {
        return format!("    {}_LOCALE,\n", stmt);
    }

    let mut ids = format!("\n    {},\n", stmt);
    if config.flavor == Flavor::Metadata {
        ids.push_str(&format!("    {}_MAX_ID,\n", stmt));
    }
    ids
}
