use std::borrow::Cow;

use crate::schema::{
    indexed_name, quote_identifier, ColumnDef, Member, Resolution, Structure, LOCALE_COLUMN,
    VERIFIED_BUILD,
};

/// One generated column, shared by every artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub def: ColumnDef,
    /// Part of the SELECT list and the load info
    pub selectable: bool,
}

impl Column {
    /// Name as it must appear in SQL and metadata
    pub fn quoted_name(&self) -> Cow<'_, str> {
        quote_identifier(&self.name)
    }
}

/// Expand one member into its columns, in order.
///
/// Arrays produce one column per element, `flag128` always four, positions
/// one float per axis. Unknown types produce sentinel columns.
pub fn expand_member(member: &Member, is_locale: bool) -> Vec<Column> {
    let selectable = is_selectable(&member.name, is_locale);
    let column = |name: String, def: ColumnDef| Column {
        name,
        def,
        selectable,
    };

    let element_names = |count: u32| -> Vec<String> {
        if count > 1 {
            (1..=count).map(|i| indexed_name(&member.name, i)).collect()
        } else {
            vec![member.name.clone()]
        }
    };

    match member.kind.resolve() {
        Resolution::Scalar(def) => element_names(member.array_size)
            .into_iter()
            .map(|name| column(name, def.clone()))
            .collect(),
        Resolution::Repeated(def, count) => element_names(count)
            .into_iter()
            .map(|name| column(name, def.clone()))
            .collect(),
        Resolution::Composite(axes, def) => element_names(member.array_size)
            .into_iter()
            .flat_map(|name| {
                axes.iter()
                    .map(move |axis| format!("{}{}", name, axis))
                    .collect::<Vec<_>>()
            })
            .map(|name| column(name, def.clone()))
            .collect(),
        Resolution::Unknown(type_name) => element_names(member.array_size)
            .into_iter()
            .map(|name| column(name, ColumnDef::error(type_name)))
            .collect(),
    }
}

/// All columns of a structure in declaration order
pub fn expand_structure(structure: &Structure) -> Vec<Column> {
    structure
        .members
        .iter()
        .fold(Vec::new(), |mut columns, member| {
            columns.extend(expand_member(member, structure.is_locale));
            columns
        })
}

fn is_selectable(name: &str, is_locale: bool) -> bool {
    name != VERIFIED_BUILD && !(is_locale && name == LOCALE_COLUMN)
}
