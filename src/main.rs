use anyhow::Result;
use db2_hotfix_gen::{
    cli::{Cli, Commands},
    config::Config,
    filter::resolve_structures,
    parser::parse_header_file,
    schema::{vocabulary, Resolution},
    ui::ConsoleUi,
    writer::generate_to_dir,
    Phase, Ui,
};
use std::time::Instant;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            header,
            output,
            include,
            exclude,
            flavor,
            line_length,
            verbose,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new(verbose);

            if let Some(flavor) = flavor {
                config.flavor = flavor;
            }
            if let Some(line_length) = line_length {
                config.line_length = line_length;
            }

            ui.set_phase(Phase::Parsing);
            let structures = parse_header_file(&header, &config)?;
            let structures = resolve_structures(structures, include, exclude)?;

            let source_name = header
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| header.display().to_string());

            let (artifacts, files) =
                generate_to_dir(&structures, &config, &source_name, &output, &mut ui)?;

            let elapsed = start.elapsed();
            println!(
                "\nGenerated {} tables into {} files in {:.1}s",
                artifacts.table_count,
                files.len(),
                elapsed.as_secs_f64()
            );
        }

        Commands::List { header } => {
            let structures = parse_header_file(&header, &config)?;
            println!("Structures:\n");
            for structure in &structures {
                println!(
                    "  {:40} {}",
                    structure.name,
                    structure.table_name()
                );
            }
        }

        Commands::Types => {
            println!("Supported types:\n");
            for kind in vocabulary() {
                let mapping = match kind.resolve() {
                    Resolution::Scalar(def) => format!("{} [{}]", def.sql_def, def.format_tag),
                    Resolution::Repeated(def, count) => {
                        format!("{} x {} [{}]", count, def.sql_def, def.format_tag)
                    }
                    Resolution::Composite(axes, def) => {
                        format!("{} x {} [{}]", axes.join("/"), def.sql_def, def.format_tag)
                    }
                    Resolution::Unknown(name) => format!("ERROR TYPE {}", name),
                };
                println!("  {:28} {}", kind.to_string(), mapping);
            }
        }
    }

    Ok(())
}
