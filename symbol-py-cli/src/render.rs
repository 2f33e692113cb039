use parse_py::error::SyntaxError;
use std::fmt::Write;

const TAB_WIDTH: usize = 2;

fn expand_tabs(line: &str) -> String {
  line.replace('\t', &" ".repeat(TAB_WIDTH))
}

// Byte bounds of the line containing `offset`, excluding its terminator.
fn line_bounds(text: &str, offset: usize) -> (usize, usize) {
  let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
  let end = text[offset..].find('\n').map_or(text.len(), |i| offset + i);
  let end = if text[start..end].ends_with('\r') { end - 1 } else { end };
  (start, end.max(start))
}

fn clamp_offset_to_char_boundary(text: &str, mut offset: usize) -> usize {
  offset = offset.min(text.len());
  while !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

/// Renders a syntax error with its source line and a caret run under the offending range.
pub fn render_syntax_error(name: &str, text: &str, err: &SyntaxError) -> String {
  let mut output = String::new();
  writeln!(output, "error[{}]: {}", err.code(), err.message()).unwrap();

  let start = clamp_offset_to_char_boundary(text, err.loc.0);
  let (line, col) = err.loc.start_line_col(text);
  writeln!(output, " --> {}:{}:{}", name, line, col).unwrap();

  let (line_start, line_end) = line_bounds(text, start);
  let gutter_width = line.to_string().len();
  let raw_line = &text[line_start..line_end];
  writeln!(output, "{:>width$} |", "", width = gutter_width).unwrap();
  writeln!(output, "{} | {}", line, expand_tabs(raw_line)).unwrap();

  let end = clamp_offset_to_char_boundary(text, err.loc.1).clamp(start, line_end.max(start));
  let pad = expand_tabs(&text[line_start..start.min(line_end)]).chars().count();
  let len = text[start..end].chars().count().max(1);
  writeln!(
    output,
    "{:>width$} | {}{}",
    "",
    " ".repeat(pad),
    "^".repeat(len),
    width = gutter_width
  )
  .unwrap();
  output
}
