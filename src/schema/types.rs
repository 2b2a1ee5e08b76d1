use std::fmt;

/// Fixed string length used for the `locale` column of locale tables
pub const LOCALE_CODE_LENGTH: u32 = 4;

/// Column type understood by the generator.
///
/// Produced once from the header spelling; everything downstream matches on
/// the variant instead of comparing type strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    /// `LocalizedString` and `LocalizedString*`
    LocalizedString,
    /// `char*` / `char const*`
    String,
    /// `char name[N]`
    FixedString(u32),
    /// `Trinity::RaceMask<int64>`
    RaceMask,
    /// `flag128`, always stored as four int32 columns
    Flag128,
    Position2D,
    Position3D,
    /// Anything outside the vocabulary, keeps the original spelling
    Unknown(String),
}

/// SQL column definition, loader format tag and signedness for a scalar type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    pub sql_def: &'static str,
    pub format_tag: &'static str,
    pub is_signed: bool,
}

impl TypeInfo {
    const fn new(sql_def: &'static str, format_tag: &'static str, is_signed: bool) -> Self {
        Self {
            sql_def,
            format_tag,
            is_signed,
        }
    }
}

/// How a member of a given kind turns into columns
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// One column per array element
    Scalar(ColumnDef),
    /// A fixed number of columns regardless of the declared array size
    Repeated(ColumnDef, u32),
    /// One column per axis suffix, per array element
    Composite(&'static [&'static str], ColumnDef),
    /// Not in the vocabulary
    Unknown(&'a str),
}

/// Owned column definition, needed because `varchar(N)` is built at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub sql_def: String,
    pub format_tag: String,
    pub is_signed: bool,
}

impl From<TypeInfo> for ColumnDef {
    fn from(info: TypeInfo) -> Self {
        Self {
            sql_def: info.sql_def.to_string(),
            format_tag: info.format_tag.to_string(),
            is_signed: info.is_signed,
        }
    }
}

impl ColumnDef {
    /// Sentinel definition for types outside the vocabulary
    pub fn error(type_name: &str) -> Self {
        let sentinel = format!("ERROR TYPE {}", type_name);
        Self {
            sql_def: sentinel.clone(),
            format_tag: sentinel,
            is_signed: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.sql_def.starts_with("ERROR TYPE")
    }
}

const INT8: TypeInfo = TypeInfo::new("tinyint(4) NOT NULL DEFAULT '0'", "FT_BYTE", true);
const UINT8: TypeInfo = TypeInfo::new("tinyint(3) unsigned NOT NULL DEFAULT '0'", "FT_BYTE", false);
const INT16: TypeInfo = TypeInfo::new("smallint(6) NOT NULL DEFAULT '0'", "FT_SHORT", true);
const UINT16: TypeInfo = TypeInfo::new("smallint(5) unsigned NOT NULL DEFAULT '0'", "FT_SHORT", false);
const INT32: TypeInfo = TypeInfo::new("int(11) NOT NULL DEFAULT '0'", "FT_INT", true);
const UINT32: TypeInfo = TypeInfo::new("int(10) unsigned NOT NULL DEFAULT '0'", "FT_INT", false);
const INT64: TypeInfo = TypeInfo::new("bigint(20) NOT NULL DEFAULT '0'", "FT_LONG", true);
const UINT64: TypeInfo = TypeInfo::new("bigint(20) unsigned NOT NULL DEFAULT '0'", "FT_LONG", false);
const FLOAT: TypeInfo = TypeInfo::new("float NOT NULL DEFAULT '0'", "FT_FLOAT", false);
const LOCALIZED_STRING: TypeInfo = TypeInfo::new("text", "FT_STRING", false);
const STRING: TypeInfo = TypeInfo::new("text", "FT_STRING_NOT_LOCALIZED", false);
const RACE_MASK: TypeInfo = TypeInfo::new("bigint(20) NOT NULL DEFAULT '0'", "FT_LONG", true);

const AXES_2D: &[&str] = &["X", "Y"];
const AXES_3D: &[&str] = &["X", "Y", "Z"];

/// Strip qualifier noise from a type spelling: `const` tokens and whitespace.
///
/// `"const char *"` and `"char const*"` both become `"char*"`.
pub fn normalize_type_name(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '*')
        .filter(|token| *token != "const")
        .collect::<Vec<_>>()
        .concat()
        + &"*".repeat(raw.matches('*').count())
}

impl TypeKind {
    /// Classify a (raw or normalized) type spelling
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_type_name(raw);
        match normalized.as_str() {
            "int8" | "int8_t" => TypeKind::Int8,
            "uint8" | "uint8_t" => TypeKind::Uint8,
            "int16" | "int16_t" => TypeKind::Int16,
            "uint16" | "uint16_t" => TypeKind::Uint16,
            "int32" | "int32_t" => TypeKind::Int32,
            "uint32" | "uint32_t" => TypeKind::Uint32,
            "int64" | "int64_t" => TypeKind::Int64,
            "uint64" | "uint64_t" => TypeKind::Uint64,
            "float" => TypeKind::Float,
            "LocalizedString" | "LocalizedString*" => TypeKind::LocalizedString,
            "char*" => TypeKind::String,
            "Trinity::RaceMask<int64>" | "RaceMask<int64>" => TypeKind::RaceMask,
            "flag128" => TypeKind::Flag128,
            "DBCPosition2D" => TypeKind::Position2D,
            "DBCPosition3D" => TypeKind::Position3D,
            other => match fixed_string_length(other) {
                Some(length) => TypeKind::FixedString(length),
                None => TypeKind::Unknown(raw.trim().to_string()),
            },
        }
    }

    /// Scalar mapping for this kind, `None` for composites and unknown types
    pub fn info(&self) -> Option<TypeInfo> {
        match self {
            TypeKind::Int8 => Some(INT8),
            TypeKind::Uint8 => Some(UINT8),
            TypeKind::Int16 => Some(INT16),
            TypeKind::Uint16 => Some(UINT16),
            TypeKind::Int32 | TypeKind::Flag128 => Some(INT32),
            TypeKind::Uint32 => Some(UINT32),
            TypeKind::Int64 => Some(INT64),
            TypeKind::Uint64 => Some(UINT64),
            TypeKind::Float => Some(FLOAT),
            TypeKind::LocalizedString => Some(LOCALIZED_STRING),
            TypeKind::String => Some(STRING),
            TypeKind::RaceMask => Some(RACE_MASK),
            TypeKind::FixedString(_)
            | TypeKind::Position2D
            | TypeKind::Position3D
            | TypeKind::Unknown(_) => None,
        }
    }

    /// Decide how a member of this kind expands into columns
    pub fn resolve(&self) -> Resolution<'_> {
        match self {
            TypeKind::Flag128 => Resolution::Repeated(INT32.into(), 4),
            TypeKind::FixedString(length) => Resolution::Scalar(ColumnDef {
                sql_def: format!("varchar({}) NOT NULL", length),
                format_tag: STRING.format_tag.to_string(),
                is_signed: false,
            }),
            TypeKind::Position2D => Resolution::Composite(AXES_2D, FLOAT.into()),
            TypeKind::Position3D => Resolution::Composite(AXES_3D, FLOAT.into()),
            TypeKind::Unknown(name) => Resolution::Unknown(name),
            scalar => Resolution::Scalar(
                scalar
                    .info()
                    .map(ColumnDef::from)
                    .unwrap_or_else(|| ColumnDef::error(&scalar.to_string())),
            ),
        }
    }

    pub fn is_localized(&self) -> bool {
        matches!(self, TypeKind::LocalizedString)
    }
}

/// `char[N]` → `Some(N)`
fn fixed_string_length(normalized: &str) -> Option<u32> {
    normalized
        .strip_prefix("char[")?
        .strip_suffix(']')?
        .parse()
        .ok()
        .filter(|length| *length > 0)
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Int8 => write!(f, "int8"),
            TypeKind::Uint8 => write!(f, "uint8"),
            TypeKind::Int16 => write!(f, "int16"),
            TypeKind::Uint16 => write!(f, "uint16"),
            TypeKind::Int32 => write!(f, "int32"),
            TypeKind::Uint32 => write!(f, "uint32"),
            TypeKind::Int64 => write!(f, "int64"),
            TypeKind::Uint64 => write!(f, "uint64"),
            TypeKind::Float => write!(f, "float"),
            TypeKind::LocalizedString => write!(f, "LocalizedString*"),
            TypeKind::String => write!(f, "char*"),
            TypeKind::FixedString(length) => write!(f, "char[{}]", length),
            TypeKind::RaceMask => write!(f, "Trinity::RaceMask<int64>"),
            TypeKind::Flag128 => write!(f, "flag128"),
            TypeKind::Position2D => write!(f, "DBCPosition2D"),
            TypeKind::Position3D => write!(f, "DBCPosition3D"),
            TypeKind::Unknown(name) => write!(f, "{}", name),
        }
    }
}

/// Every known kind, for listing the vocabulary
pub fn vocabulary() -> Vec<TypeKind> {
    vec![
        TypeKind::Int8,
        TypeKind::Uint8,
        TypeKind::Int16,
        TypeKind::Uint16,
        TypeKind::Int32,
        TypeKind::Uint32,
        TypeKind::Int64,
        TypeKind::Uint64,
        TypeKind::Float,
        TypeKind::LocalizedString,
        TypeKind::String,
        TypeKind::FixedString(LOCALE_CODE_LENGTH),
        TypeKind::RaceMask,
        TypeKind::Flag128,
        TypeKind::Position2D,
        TypeKind::Position3D,
    ]
}
