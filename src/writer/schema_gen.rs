use crate::config::{Config, Flavor};
use crate::schema::{quote_identifier, Structure, ID_COLUMN, LOCALE_COLUMN, VERIFIED_BUILD};

use super::columns::Column;

/// Generate the DROP/CREATE TABLE block for one structure
pub fn generate_create_table(structure: &Structure, columns: &[Column], config: &Config) -> String {
    let table = structure.table_name();
    let table = quote_identifier(&table);
    let mut sql = String::new();

    sql.push_str("--\n");
    sql.push_str(&format!("-- Table structure for table {}\n", table));
    sql.push_str("--\n\n");
    sql.push_str(&format!("DROP TABLE IF EXISTS {};\n", table));
    sql.push_str("/*!40101 SET @saved_cs_client     = @@character_set_client */;\n");
    sql.push_str(&format!(
        "/*!40101 SET character_set_client = {} */;\n",
        config.charset
    ));
    sql.push_str(&format!("CREATE TABLE {} (\n", table));

    for col in columns {
        sql.push_str(&format!("  {} {},\n", col.quoted_name(), col.def.sql_def));
    }

    sql.push_str(&format!(
        "  PRIMARY KEY ({})\n",
        primary_key(structure, config.flavor).join(",")
    ));
    sql.push_str(&format!(
        ") ENGINE={} DEFAULT CHARSET={};\n",
        config.engine, config.charset
    ));
    sql.push_str("/*!40101 SET character_set_client = @saved_cs_client */;\n\n");

    sql.push_str("--\n");
    sql.push_str(&format!("-- Dumping data for table {}\n", table));
    sql.push_str("--\n\n");
    sql.push_str(&format!("LOCK TABLES {} WRITE;\n", table));
    sql.push_str(&format!("/*!40000 ALTER TABLE {} DISABLE KEYS */;\n", table));
    sql.push_str(&format!("/*!40000 ALTER TABLE {} ENABLE KEYS */;\n", table));
    sql.push_str("UNLOCK TABLES;\n\n");

    sql
}

/// Primary key columns: `ID`, plus `locale` for locale tables, plus
/// `VerifiedBuild` in the metadata flavor
pub fn primary_key(structure: &Structure, flavor: Flavor) -> Vec<String> {
    let mut key = vec![ID_COLUMN];
    if structure.is_locale {
        key.push(LOCALE_COLUMN);
    }
    if flavor == Flavor::Metadata {
        key.push(VERIFIED_BUILD);
    }

    key.into_iter()
        .map(|name| quote_identifier(name).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Member;
    use crate::writer::columns::expand_structure;

    fn foo() -> Structure {
        let mut s = Structure::new("FooEntry", "Foo")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("LocalizedString*", "Name_lang"))
            .with_member(Member::new("int32", "Order"));
        s.push_verified_build();
        s
    }

    #[test]
    fn test_generate_create_table() {
        let s = foo();
        let sql = generate_create_table(&s, &expand_structure(&s), &Config::default());

        assert!(sql.contains("DROP TABLE IF EXISTS foo;"));
        assert!(sql.contains("CREATE TABLE foo (\n"));
        assert!(sql.contains("  ID int(10) unsigned NOT NULL DEFAULT '0',\n"));
        assert!(sql.contains("  Name_lang text,\n"));
        assert!(sql.contains("  `Order` int(11) NOT NULL DEFAULT '0',\n"));
        assert!(sql.contains("  VerifiedBuild int(11) NOT NULL DEFAULT '0',\n"));
        assert!(sql.contains("  PRIMARY KEY (ID)\n) ENGINE=MyISAM DEFAULT CHARSET=utf8;"));
        assert!(sql.contains("LOCK TABLES foo WRITE;"));
    }

    #[test]
    fn test_locale_primary_key() {
        let locale = foo().create_locale_table().unwrap();
        let sql = generate_create_table(&locale, &expand_structure(&locale), &Config::default());

        assert!(sql.contains("CREATE TABLE foo_locale ("));
        assert!(sql.contains("  locale varchar(4) NOT NULL,\n"));
        assert!(sql.contains("  VerifiedBuild smallint(6) NOT NULL DEFAULT '0',\n"));
        assert!(sql.contains("PRIMARY KEY (ID,locale)"));
    }

    #[test]
    fn test_metadata_primary_key() {
        let s = foo();
        let locale = s.create_locale_table().unwrap();

        assert_eq!(primary_key(&s, Flavor::Metadata), ["ID", "VerifiedBuild"]);
        assert_eq!(
            primary_key(&locale, Flavor::Metadata),
            ["ID", "locale", "VerifiedBuild"]
        );
    }

    #[test]
    fn test_reserved_table_name_is_quoted() {
        let s = Structure::new("IndexEntry", "Index").with_member(Member::new("uint32", "ID"));
        let sql = generate_create_table(&s, &expand_structure(&s), &Config::default());

        assert!(sql.contains("DROP TABLE IF EXISTS `index`;"));
        assert!(sql.contains("CREATE TABLE `index` ("));
    }
}
