use super::naming::{locale_member_name, table_name};
use super::types::{TypeKind, LOCALE_CODE_LENGTH};

/// Synthetic build column appended to every record
pub const VERIFIED_BUILD: &str = "VerifiedBuild";

/// Locale code column of locale records
pub const LOCALE_COLUMN: &str = "locale";

/// Identity column every record starts with
pub const ID_COLUMN: &str = "ID";

/// One field of a record layout
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Type as spelled in the header
    pub type_name: String,
    pub kind: TypeKind,
    pub name: String,
    /// 1 for scalars
    pub array_size: u32,
}

impl Member {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            kind: TypeKind::parse(&type_name),
            type_name,
            name: name.into(),
            array_size: 1,
        }
    }

    /// Build a member from an already classified kind
    pub fn of_kind(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            type_name: kind.to_string(),
            kind,
            name: name.into(),
            array_size: 1,
        }
    }

    pub fn array(self, array_size: u32) -> Self {
        Self {
            array_size: array_size.max(1),
            ..self
        }
    }
}

/// A record layout (`struct XxxEntry`)
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Name as declared in the header
    pub name: String,
    /// Name after acronym and suffix normalization, drives table naming
    pub normalized_name: String,
    pub members: Vec<Member>,
    pub is_locale: bool,
}

impl Structure {
    pub fn new(name: impl Into<String>, normalized_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            normalized_name: normalized_name.into(),
            members: Vec::new(),
            is_locale: false,
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn table_name(&self) -> String {
        table_name(&self.normalized_name)
    }

    /// Table name of the base record, also for locale records
    pub fn base_table_name(&self) -> String {
        let table = self.table_name();
        match table.strip_suffix("_locale") {
            Some(base) if self.is_locale => base.to_string(),
            _ => table,
        }
    }

    /// Append the trailing `VerifiedBuild` column
    pub fn push_verified_build(&mut self) {
        self.members
            .push(Member::of_kind(TypeKind::Int32, VERIFIED_BUILD));
    }

    pub fn has_localized_members(&self) -> bool {
        self.members.iter().any(|m| m.kind.is_localized())
    }

    /// Derive the `<Name>Locale` record holding the localized members.
    ///
    /// Returns `None` for locale records and for records without localized
    /// strings.
    pub fn create_locale_table(&self) -> Option<Structure> {
        if self.is_locale || !self.has_localized_members() {
            return None;
        }

        let localized: Vec<Member> = self
            .members
            .iter()
            .filter(|m| m.kind.is_localized())
            .map(|m| Member {
                type_name: m.type_name.clone(),
                kind: m.kind.clone(),
                name: locale_member_name(&m.name),
                array_size: m.array_size,
            })
            .collect();

        let mut members = Vec::with_capacity(localized.len() + 3);
        members.push(Member::of_kind(TypeKind::Uint32, ID_COLUMN));
        members.push(Member::of_kind(
            TypeKind::FixedString(LOCALE_CODE_LENGTH),
            LOCALE_COLUMN,
        ));
        members.extend(localized);
        members.push(Member::of_kind(TypeKind::Int16, VERIFIED_BUILD));

        Some(Structure {
            name: format!("{}Locale", self.normalized_name),
            normalized_name: format!("{}Locale", self.normalized_name),
            members,
            is_locale: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo() -> Structure {
        Structure::new("FooEntry", "Foo")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("LocalizedString*", "Name_lang"))
            .with_member(Member::new("float", "Rate"))
    }

    #[test]
    fn test_no_locale_without_strings() {
        let s = Structure::new("BarEntry", "Bar")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("char const*", "Texture"));
        assert!(s.create_locale_table().is_none());
    }

    #[test]
    fn test_locale_table_layout() {
        let locale = foo().create_locale_table().unwrap();
        let names: Vec<_> = locale.members.iter().map(|m| m.name.as_str()).collect();

        assert_eq!(names, ["ID", "locale", "Name_lang", "VerifiedBuild"]);
        assert_eq!(locale.members[1].kind, TypeKind::FixedString(4));
        assert_eq!(locale.members[3].kind, TypeKind::Int16);
        assert!(locale.is_locale);
        assert_eq!(locale.table_name(), "foo_locale");
        assert_eq!(locale.base_table_name(), "foo");
    }

    #[test]
    fn test_locale_table_keeps_source_order() {
        let s = Structure::new("QuestEntry", "Quest")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("LocalizedString*", "Title_loc"))
            .with_member(Member::new("int32", "Level"))
            .with_member(Member::new("LocalizedString", "Description").array(2));

        let locale = s.create_locale_table().unwrap();
        assert_eq!(locale.members.len(), 2 + 3);
        assert_eq!(locale.members[2].name, "Title_lang");
        assert_eq!(locale.members[3].name, "Description_lang");
        assert_eq!(locale.members[3].array_size, 2);
    }

    #[test]
    fn test_locale_is_not_recursive() {
        let locale = foo().create_locale_table().unwrap();
        assert!(locale.create_locale_table().is_none());
    }

    #[test]
    fn test_verified_build_appended() {
        let mut s = foo();
        s.push_verified_build();
        let last = s.members.last().unwrap();
        assert_eq!(last.name, VERIFIED_BUILD);
        assert_eq!(last.kind, TypeKind::Int32);
    }
}
