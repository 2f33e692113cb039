use clap::ArgAction;
use clap::Parser;
use parse_py::ast::node::Node;
use parse_py::ast::stx::Module;
use parse_py::error::SyntaxError;
use render::render_syntax_error;
use serde::Serialize;
use std::fs::File;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use symbol_py::enumerate;
use symbol_py::Declaration;
use symbol_py::Import;
use symbol_py::SourceUnit;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod render;

const SCHEMA_VERSION: u32 = 1;
const EXIT_PARSE_ERROR: i32 = 1;
const EXIT_HOST_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "symbol-py", version, about = "List the declarations of a Python module as JSON")]
struct Cli {
  /// Python source file; omit for stdin.
  path: Option<PathBuf>,

  /// Export list to use instead of the module's `__all__`.
  #[arg(long, value_delimiter = ',', value_name = "NAME,...")]
  exports: Option<Vec<String>>,

  /// Print the syntax tree instead of the declarations.
  #[arg(long)]
  ast: bool,

  #[arg(long)]
  pretty: bool,

  /// Print parse errors as JSON on stdout instead of text on stderr.
  #[arg(long)]
  json_errors: bool,

  /// Increase log verbosity on stderr; `RUST_LOG` takes precedence.
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

#[derive(Serialize)]
struct EnumerationOutput<'a> {
  schema_version: u32,
  exports: Option<&'a [String]>,
  declarations: &'a [Declaration],
  imports: &'a [Import],
}

#[derive(Serialize)]
struct AstOutput<'a> {
  schema_version: u32,
  ast: &'a Node<Module>,
}

#[derive(Serialize)]
struct DiagnosticOutput {
  code: &'static str,
  message: String,
  start: usize,
  end: usize,
  line: usize,
}

#[derive(Serialize)]
struct DiagnosticsOutput {
  schema_version: u32,
  diagnostics: Vec<DiagnosticOutput>,
}

fn init_tracing(verbose: u8) {
  let level = match verbose {
    0 => LevelFilter::WARN,
    1 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  };
  let filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

fn exit_with_host_error(message: impl AsRef<str>) -> ! {
  eprintln!("error: {}", message.as_ref());
  process::exit(EXIT_HOST_ERROR);
}

fn write_json<T: Serialize>(value: &T, pretty: bool) {
  let mut out = stdout().lock();
  let result = if pretty {
    serde_json::to_writer_pretty(&mut out, value)
  } else {
    serde_json::to_writer(&mut out, value)
  };
  if let Err(err) = result
    .map_err(std::io::Error::from)
    .and_then(|()| writeln!(out))
  {
    exit_with_host_error(format!("failed to write output: {err}"));
  }
}

fn exit_with_syntax_error(args: &Cli, name: &str, source: &str, err: &SyntaxError) -> ! {
  if args.json_errors {
    write_json(
      &DiagnosticsOutput {
        schema_version: SCHEMA_VERSION,
        diagnostics: vec![DiagnosticOutput {
          code: err.code(),
          message: err.message(),
          start: err.loc.0,
          end: err.loc.1,
          line: err.line(source),
        }],
      },
      args.pretty,
    );
  } else {
    eprint!("{}", render_syntax_error(name, source, err));
  };
  process::exit(EXIT_PARSE_ERROR);
}

fn main() {
  let args = Cli::parse();
  init_tracing(args.verbose);

  let input_name = args
    .path
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "<stdin>".to_string());
  let mut input = Vec::new();
  let mut input_file: Box<dyn Read> = match args.path.as_ref() {
    Some(p) => match File::open(p) {
      Ok(f) => Box::new(f),
      Err(err) => exit_with_host_error(format!("failed to open {}: {err}", p.display())),
    },
    None => Box::new(stdin()),
  };
  if let Err(err) = input_file.read_to_end(&mut input) {
    exit_with_host_error(format!("failed to read {input_name}: {err}"));
  };
  let source = match String::from_utf8(input) {
    Ok(source) => source,
    Err(err) => exit_with_host_error(format!("{input_name} is not valid UTF-8: {err}")),
  };
  debug!(input = %input_name, bytes = source.len(), "read input");

  if args.ast {
    match parse_py::parse(&source) {
      Ok(ast) => write_json(
        &AstOutput {
          schema_version: SCHEMA_VERSION,
          ast: &ast,
        },
        args.pretty,
      ),
      Err(err) => exit_with_syntax_error(&args, &input_name, &source, &err),
    };
    return;
  };

  let mut unit = SourceUnit::new(source.as_str());
  if let Some(exports) = &args.exports {
    unit = unit.with_exports(exports.iter().map(|n| n.trim()).filter(|n| !n.is_empty()));
  };
  match enumerate(&unit) {
    Ok(enumeration) => write_json(
      &EnumerationOutput {
        schema_version: SCHEMA_VERSION,
        exports: enumeration.exports.as_deref(),
        declarations: &enumeration.declarations,
        imports: &enumeration.imports,
      },
      args.pretty,
    ),
    Err(err) => exit_with_syntax_error(&args, &input_name, &source, &err),
  };
}
