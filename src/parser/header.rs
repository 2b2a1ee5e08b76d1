use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::Config;
use crate::schema::{normalize_struct_name, normalize_type_name, Member, Structure, TypeKind};

/// Largest element count a single member may expand to
const MAX_ARRAY_SIZE: u32 = 4096;

/// Open scope while walking the header
enum Scope {
    /// Namespace or extern block, declarations inside are still visited
    Transparent,
    /// Body of a struct we generate tables for
    Capture(Structure),
    /// Any other body (enums, methods, helper structs)
    Skip,
    /// Brace initializer of a member, holds the declaration read so far
    Initializer(String),
}

/// Line-oriented scanner for `DB2Structure.h` style headers.
///
/// Yields records in declaration order, each followed by its locale record
/// when it has localized strings.
pub struct HeaderParser<'a> {
    config: &'a Config,
    defines: BTreeMap<String, u32>,
    aliases: BTreeMap<String, String>,
}

impl<'a> HeaderParser<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            defines: config.defines.clone(),
            aliases: config.aliases.clone(),
        }
    }

    /// Parse header text into structures
    pub fn parse(&mut self, source: &str) -> Result<Vec<Structure>> {
        let source = self.strip_preprocessor(&strip_comments(source));
        let mut structures = Vec::new();
        let mut scopes: Vec<Scope> = Vec::new();
        let mut segment = String::new();

        for c in source.chars() {
            match c {
                '{' => {
                    let scope = match scopes.last() {
                        Some(Scope::Capture(_)) if is_member_initializer(segment.trim()) => {
                            Scope::Initializer(std::mem::take(&mut segment))
                        }
                        _ => self.open_scope(segment.trim(), &scopes),
                    };
                    scopes.push(scope);
                    segment.clear();
                }
                '}' => {
                    match scopes.pop() {
                        Some(Scope::Capture(structure)) => {
                            self.finish_structure(structure, &mut structures);
                            segment.clear();
                        }
                        Some(Scope::Initializer(declaration)) => segment = declaration,
                        _ => segment.clear(),
                    }
                }
                ';' => {
                    let statement = segment.trim();
                    match scopes.last_mut() {
                        Some(Scope::Capture(structure)) => {
                            structure.members.extend(self.parse_members(statement));
                        }
                        Some(Scope::Skip) | Some(Scope::Initializer(_)) => {}
                        Some(Scope::Transparent) | None => self.parse_typedef(statement),
                    }
                    segment.clear();
                }
                _ => segment.push(c),
            }
        }

        if structures.is_empty() {
            bail!(
                "No structures matching '{}' found in header",
                self.config.struct_filter
            );
        }

        Ok(structures)
    }

    fn open_scope(&self, header: &str, scopes: &[Scope]) -> Scope {
        let inside_opaque = scopes
            .iter()
            .any(|s| matches!(s, Scope::Capture(_) | Scope::Skip | Scope::Initializer(_)));
        if inside_opaque {
            return Scope::Skip;
        }

        if header.starts_with("namespace") || header.starts_with("extern") {
            return Scope::Transparent;
        }

        match struct_name(header) {
            Some(name) if name.contains(&self.config.struct_filter) => {
                let normalized =
                    normalize_struct_name(name, &self.config.acronyms, &self.config.struct_filter);
                debug!(name, normalized = %normalized, "found structure");
                Scope::Capture(Structure::new(name, normalized))
            }
            _ => Scope::Skip,
        }
    }

    fn finish_structure(&self, mut structure: Structure, out: &mut Vec<Structure>) {
        structure.push_verified_build();
        let locale = structure.create_locale_table();
        out.push(structure);
        if let Some(locale) = locale {
            out.push(locale);
        }
    }

    /// Drop preprocessor lines, remembering `#define NAME <int>`
    fn strip_preprocessor(&mut self, source: &str) -> String {
        let mut kept = String::with_capacity(source.len());

        for line in source.lines() {
            let trimmed = line.trim_start();
            if let Some(directive) = trimmed.strip_prefix('#') {
                let mut tokens = directive.split_whitespace();
                if let (Some("define"), Some(name), Some(value)) =
                    (tokens.next(), tokens.next(), tokens.next())
                {
                    if let Some(value) = parse_integer(value) {
                        self.defines.insert(name.to_string(), value);
                    }
                }
                kept.push('\n');
                continue;
            }
            kept.push_str(line);
            kept.push('\n');
        }

        kept
    }

    /// Remember `typedef <type> <Alias>` declared at file scope
    fn parse_typedef(&mut self, statement: &str) {
        let Some(rest) = statement.strip_prefix("typedef") else {
            return;
        };
        let rest = rest.trim();
        if rest.contains('[') || rest.contains('(') {
            return;
        }
        if let Some((target, alias)) = rest.rsplit_once(char::is_whitespace) {
            self.aliases
                .insert(alias.trim().to_string(), target.trim().to_string());
        }
    }

    /// Parse one `;`-terminated statement inside a captured struct
    fn parse_members(&self, statement: &str) -> Vec<Member> {
        let statement = strip_access_labels(statement);
        if statement.is_empty() || statement.contains('(') || is_non_field(statement) {
            return Vec::new();
        }

        let declarators = split_top_level(statement, ',');
        let mut declarators = declarators.iter();
        let Some(first) = declarators.next() else {
            return Vec::new();
        };
        let Some((type_name, first)) = split_type_and_declarator(first) else {
            warn!(statement, "could not parse member declaration");
            return Vec::new();
        };

        std::iter::once(first.to_string())
            .chain(declarators.map(|d| d.trim().to_string()))
            .filter_map(|declarator| {
                let (pointers, declarator) = split_pointer_prefix(&declarator);
                let type_name = format!("{}{}", type_name, "*".repeat(pointers));
                self.build_member(&type_name, declarator)
            })
            .collect()
    }

    fn build_member(&self, type_name: &str, declarator: &str) -> Option<Member> {
        let declarator = declarator.split('=').next().unwrap_or(declarator).trim();
        let (name, bounds) = match declarator.find('[') {
            Some(pos) => (declarator[..pos].trim(), &declarator[pos..]),
            None => (declarator, ""),
        };
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }

        let array_size = self.array_size(name, bounds);
        let resolved = self.resolve_alias(type_name);
        let effective = resolved.as_deref().unwrap_or(type_name);

        let member = if normalize_type_name(effective) == "char" && !bounds.is_empty() {
            Member::of_kind(TypeKind::FixedString(array_size), name)
        } else {
            let kind = TypeKind::parse(effective);
            if let TypeKind::Unknown(original) = &kind {
                warn!(member = name, ty = %original, "unmapped member type");
            }
            Member {
                type_name: type_name.to_string(),
                kind,
                name: name.to_string(),
                array_size: 1,
            }
            .array(array_size)
        };

        Some(member)
    }

    /// Product of all `[N]` bounds; unparsable bounds count as 1, and so
    /// does a product above `MAX_ARRAY_SIZE`
    fn array_size(&self, member: &str, bounds: &str) -> u32 {
        let size = bounds
            .split('[')
            .filter_map(|part| part.split(']').next())
            .map(str::trim)
            .filter(|expr| !expr.is_empty())
            .map(|expr| {
                parse_integer(expr)
                    .or_else(|| self.defines.get(expr).copied())
                    .unwrap_or_else(|| {
                        warn!(member, bound = expr, "unparsable array bound, using 1");
                        1
                    })
            })
            .try_fold(1u32, |size, bound| size.checked_mul(bound));

        match size {
            Some(size) if size <= MAX_ARRAY_SIZE => size.max(1),
            _ => {
                warn!(member, bounds, "array size out of range, using 1");
                1
            }
        }
    }

    /// Follow typedef aliases, `None` when the type is not an alias
    fn resolve_alias(&self, type_name: &str) -> Option<String> {
        let mut current = normalize_type_name(type_name);
        let mut resolved = None;
        // Bounded so alias cycles cannot hang the scan.
        for _ in 0..8 {
            match self.aliases.get(&current) {
                Some(target) => {
                    current = normalize_type_name(target);
                    resolved = Some(current.clone());
                }
                None => break,
            }
        }
        resolved
    }
}

/// Read and parse a header file
pub fn parse_header_file(path: &Path, config: &Config) -> Result<Vec<Structure>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read header: {:?}", path))?;
    HeaderParser::new(config)
        .parse(&source)
        .with_context(|| format!("Failed to parse header: {:?}", path))
}

/// Replace comments with whitespace, keeping line breaks
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

/// `struct alignas(4) FooEntry : Base` → `FooEntry`
fn struct_name(header: &str) -> Option<&str> {
    let header = header.split(':').next()?.trim();
    let rest = header.strip_prefix("struct")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace()
        .filter(|token| *token != "final")
        .last()
        .filter(|name| name.chars().all(|c| c.is_alphanumeric() || c == '_'))
}

fn strip_access_labels(statement: &str) -> &str {
    let mut statement = statement.trim();
    for label in ["public:", "private:", "protected:"] {
        if let Some(rest) = statement.strip_prefix(label) {
            statement = rest.trim();
        }
    }
    statement
}

/// `uint32 ID` in `uint32 ID{};` or `uint32 ID = {};`, as opposed to a method or nested type body
fn is_member_initializer(declaration: &str) -> bool {
    let declaration = strip_access_labels(declaration);
    declaration.contains(char::is_whitespace)
        && !declaration.contains('(')
        && !is_non_field(declaration)
}

fn is_non_field(statement: &str) -> bool {
    let first = statement.split_whitespace().next().unwrap_or_default();
    matches!(
        first,
        "static" | "using" | "typedef" | "friend" | "enum" | "struct" | "template"
    )
}

/// Split on `separator` outside of `<...>` and `[...]`
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth -= 1,
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// `char const* Name[2]` → (`char const*`, `Name[2]`)
fn split_type_and_declarator(text: &str) -> Option<(&str, &str)> {
    let text = text.split('=').next()?.trim();
    let head_end = text.find('[').unwrap_or(text.len());
    let head = text[..head_end].trim_end();
    let name_start = head
        .rfind(|c: char| !(c.is_alphanumeric() || c == '_'))
        .map(|i| i + 1)?;
    let type_name = text[..name_start].trim();
    if type_name.is_empty() {
        return None;
    }
    Some((type_name, &text[name_start..]))
}

fn split_pointer_prefix(declarator: &str) -> (usize, &str) {
    let trimmed = declarator.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
    let pointers = declarator[..declarator.len() - trimmed.len()]
        .matches('*')
        .count();
    (pointers, trimmed)
}

fn parse_integer(text: &str) -> Option<u32> {
    let text = text.trim().trim_end_matches(['u', 'U']);
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
