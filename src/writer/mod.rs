pub mod codegen;
pub mod columns;
pub mod line_wrap;
pub mod load_info;
pub mod output;
pub mod schema_gen;
pub mod statements;
pub mod templates;

pub use codegen::*;
pub use columns::*;
pub use line_wrap::WrappedLineBuilder;
pub use output::*;
