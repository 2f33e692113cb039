use decl::DeclCollector;
use exports::discover_exports;
use import::collect_imports;
use parse_py::error::SyntaxError;
use parse_py::parse;
use serde::Serialize;
use tracing::debug;
use tracing::debug_span;

pub use decl::is_private_name;
pub use decl::visibility;
pub use decl::DeclKind;
pub use decl::Declaration;
pub use decl::Visibility;
pub use import::Import;

pub mod decl;
pub mod exports;
pub mod import;

pub type ParseError = SyntaxError;

/// The text of one Python module, with an optional export list that takes precedence over its `__all__`.
#[derive(Clone, Debug)]
pub struct SourceUnit {
  text: String,
  exports: Option<Vec<String>>,
}

impl SourceUnit {
  pub fn new(text: impl Into<String>) -> SourceUnit {
    SourceUnit {
      text: text.into(),
      exports: None,
    }
  }

  pub fn with_exports<I, N>(mut self, exports: I) -> SourceUnit
  where
    I: IntoIterator<Item = N>,
    N: Into<String>,
  {
    self.exports = Some(exports.into_iter().map(Into::into).collect());
    self
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn exports(&self) -> Option<&[String]> {
    self.exports.as_deref()
  }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Enumeration {
  /// The effective export list: the one supplied with the unit, otherwise the module's `__all__` if it can be determined.
  pub exports: Option<Vec<String>>,
  pub declarations: Vec<Declaration>,
  pub imports: Vec<Import>,
}

/// Lists the top-level functions, async functions, and classes of a module in source order, with class members nested.
///
/// Nothing is produced if the text doesn't parse.
pub fn enumerate(unit: &SourceUnit) -> Result<Enumeration, ParseError> {
  let _span = debug_span!("enumerate", bytes = unit.text.len()).entered();
  let module = parse(&unit.text)?;
  let exports = match &unit.exports {
    Some(exports) => Some(exports.clone()),
    None => discover_exports(&module),
  };
  let declarations = DeclCollector::new(&unit.text).body(&module.stx.body, exports.as_deref());
  let imports = collect_imports(&unit.text, &module.stx.body);
  debug!(
    declarations = declarations.len(),
    imports = imports.len(),
    explicit_exports = unit.exports.is_some(),
    "enumerated module"
  );
  Ok(Enumeration {
    exports,
    declarations,
    imports,
  })
}
