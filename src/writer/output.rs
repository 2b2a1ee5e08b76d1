use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{Config, Flavor};
use crate::schema::Structure;
use crate::ui::{Phase, Ui};

use super::codegen::emit_record;
use super::templates;

/// Complete text of every generated file
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub hotfixes_sql: String,
    pub database_cpp: String,
    pub database_h: String,
    pub load_info_h: Option<String>,
    /// Structures emitted, locale structures included
    pub table_count: usize,
}

/// Run every structure through the generator, in order.
///
/// A locale structure that does not directly follow its base structure is
/// reported and skipped, since its statement index would break the
/// `PREPARE_LOCALE_STMT` offset check.
pub fn generate(
    structures: &[Structure],
    config: &Config,
    source_name: &str,
    year: i32,
    ui: &mut impl Ui,
) -> Artifacts {
    ui.set_phase(Phase::Generating);
    let with_metadata = config.flavor == Flavor::Metadata;
    let license = templates::license(year, source_name);

    let mut sql = String::new();
    let mut cpp = license.clone();
    cpp.push_str(&templates::statements_cpp_open(with_metadata));
    let mut header = license.clone();
    header.push_str(templates::STATEMENTS_H_OPEN);
    let mut load_info = with_metadata.then(|| {
        let mut text = license.clone();
        text.push_str(templates::LOAD_INFO_OPEN);
        text
    });

    let total = structures.len() as u64;
    let mut previous_base: Option<String> = None;
    let mut table_count = 0;

    for (i, structure) in structures.iter().enumerate() {
        ui.set_progress(i as u64 + 1, total, structure.table_name());

        if structure.is_locale {
            let base = structure.base_table_name();
            if previous_base.as_deref() != Some(base.as_str()) {
                warn!(table = %structure.table_name(), "locale table without preceding base table");
                ui.log(format!(
                    "Skipping {}: not preceded by {}",
                    structure.table_name(),
                    base
                ));
                continue;
            }
            previous_base = None;
        } else {
            previous_base = Some(structure.table_name());
        }

        let fragments = emit_record(structure, config);
        sql.push_str(&fragments.schema);
        cpp.push_str(&fragments.statement);
        header.push_str(&fragments.identifier);
        if let (Some(out), Some(fragment)) = (load_info.as_mut(), fragments.metadata) {
            out.push_str(&fragment);
        }
        table_count += 1;
    }

    cpp.push_str(templates::STATEMENTS_CPP_CLOSE);
    header.push_str(templates::STATEMENTS_H_CLOSE);
    if let Some(out) = load_info.as_mut() {
        out.push_str(templates::LOAD_INFO_CLOSE);
    }

    info!(tables = table_count, "generation finished");

    Artifacts {
        hotfixes_sql: sql,
        database_cpp: cpp,
        database_h: header,
        load_info_h: load_info,
        table_count,
    }
}

impl Artifacts {
    /// Write the artifacts as `<prefix>_00_hotfixes.sql`, `<prefix>_HotfixDatabase.cpp`, ...
    pub fn write(&self, output_dir: &Path, prefix: &str, ui: &mut impl Ui) -> Result<Vec<PathBuf>> {
        ui.set_phase(Phase::Writing);
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

        let mut files = vec![
            (format!("{}_00_hotfixes.sql", prefix), &self.hotfixes_sql),
            (format!("{}_HotfixDatabase.cpp", prefix), &self.database_cpp),
            (format!("{}_HotfixDatabase.h", prefix), &self.database_h),
        ];
        if let Some(load_info) = &self.load_info_h {
            files.push((format!("{}_DB2LoadInfo.h", prefix), load_info));
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, content) in files {
            let path = output_dir.join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write: {:?}", path))?;
            ui.log(format!("Wrote {}", path.display()));
            written.push(path);
        }

        Ok(written)
    }
}

/// Generate and write everything for parsed structures, using today's date
pub fn generate_to_dir(
    structures: &[Structure],
    config: &Config,
    source_name: &str,
    output_dir: &Path,
    ui: &mut impl Ui,
) -> Result<(Artifacts, Vec<PathBuf>)> {
    let today = Local::now();
    let artifacts = generate(structures, config, source_name, today.year(), ui);
    let files = artifacts.write(output_dir, &today.format("%Y_%m_%d").to_string(), ui)?;
    ui.set_phase(Phase::Complete);
    Ok((artifacts, files))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Member;
    use crate::ui::SilentUi;

    fn structures() -> Vec<Structure> {
        let mut foo = Structure::new("FooEntry", "Foo")
            .with_member(Member::new("uint32", "ID"))
            .with_member(Member::new("LocalizedString*", "Name_lang"));
        foo.push_verified_build();
        let locale = foo.create_locale_table().unwrap();

        let mut bar = Structure::new("BarEntry", "Bar").with_member(Member::new("uint32", "ID"));
        bar.push_verified_build();

        vec![foo, locale, bar]
    }

    #[test]
    fn test_locale_follows_base_in_every_stream() {
        let artifacts = generate(&structures(), &Config::default(), "DB2Structure.h", 2026, &mut SilentUi);

        let h = &artifacts.database_h;
        let base = h.find("HOTFIX_SEL_FOO,").unwrap();
        let locale = h.find("HOTFIX_SEL_FOO_LOCALE,").unwrap();
        let bar = h.find("HOTFIX_SEL_BAR,").unwrap();
        assert!(base < locale && locale < bar);

        let cpp = &artifacts.database_cpp;
        assert!(cpp.find("PrepareStatement(HOTFIX_SEL_FOO,").unwrap()
            < cpp.find("PREPARE_LOCALE_STMT(HOTFIX_SEL_FOO,").unwrap());
        assert!(cpp.trim_end().ends_with('}'));

        assert_eq!(artifacts.table_count, 3);
        assert!(artifacts.load_info_h.is_none());
    }

    #[test]
    fn test_orphan_locale_is_skipped() {
        let mut list = structures();
        list.swap(1, 2);

        let artifacts = generate(&list, &Config::default(), "DB2Structure.h", 2026, &mut SilentUi);
        assert_eq!(artifacts.table_count, 2);
        assert!(!artifacts.hotfixes_sql.contains("foo_locale"));
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            flavor: Flavor::Metadata,
            ..Config::default()
        };
        let artifacts = generate(&structures(), &config, "DB2Structure.h", 2026, &mut SilentUi);
        let files = artifacts.write(dir.path(), "2026_10_19", &mut SilentUi).unwrap();

        assert_eq!(files.len(), 4);
        assert!(dir.path().join("2026_10_19_00_hotfixes.sql").exists());
        assert!(dir.path().join("2026_10_19_DB2LoadInfo.h").exists());

        let load_info = fs::read_to_string(dir.path().join("2026_10_19_DB2LoadInfo.h")).unwrap();
        assert!(load_info.contains("struct FooLoadInfo"));
        assert!(load_info.contains("struct BarLoadInfo"));
        assert!(!load_info.contains("FooLocaleLoadInfo"));
    }
}
