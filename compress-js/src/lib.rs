use emit_js::emit_js_with_literals;
use parse_js::parse;
use serde::Serialize;
use symbol_js::compute_symbols;
use symbol_js::mangle;
use tracing::debug;
use tracing::info_span;
use tracing::trace;

pub mod comment;
mod err;
mod literal;
mod options;
mod whitespace;

pub use comment::CommentKind;
pub use comment::PreservedComment;
pub use err::CompressError;
pub use options::CompressOptions;
pub use symbol_js::Rename;

/// The result of compressing one compilation unit.
#[derive(Clone, Debug, Serialize)]
pub struct CompressedOutput {
  pub text: String,
  /// Every renamed identifier, parent scopes before their children. Empty when renaming is disabled.
  pub rename_map: Vec<Rename>,
}

/// Compresses JavaScript source code.
///
/// # Examples
///
/// ```
/// use compress_js::{compress, CompressOptions};
///
/// let code = "function main() { let my_first_variable = 1; return my_first_variable; }";
/// let out = compress(code, &CompressOptions::default()).unwrap();
/// assert_eq!(out.text, "function main(){let a=1;return a;}");
/// ```
pub fn compress(source: &str, options: &CompressOptions) -> Result<CompressedOutput, CompressError> {
  let span = info_span!("compress", bytes = source.len());
  let _guard = span.enter();

  let comments = comment::scan(source, options.preserve_unknown_comments);
  trace!(comments = comments.len(), "scanned comments");
  let top = parse(source).map_err(|err| CompressError::from_syntax(&err, source))?;
  trace!("parsed");

  let mut symbols = compute_symbols(&top);
  if options.munge_names {
    mangle(&mut symbols);
    trace!("assigned names");
  };
  let generated = emit_js_with_literals(&top, &symbols);
  trace!(bytes = generated.code.len(), "generated code");

  let protected = literal::protect(&generated.code, &generated.literals)?;
  let collapsed = whitespace::collapse(&protected.text);
  let restored = protected.restore(&collapsed)?;
  let with_comments = comment::reinsert(&restored, &comments);
  let text = match options.effective_wrap_column() {
    Some(column) => whitespace::wrap(&with_comments, column),
    None => with_comments,
  };

  let rename_map = if options.munge_names {
    symbols.rename_map()
  } else {
    Vec::new()
  };
  debug!(
    scopes = symbols.len(),
    renamed = rename_map.len(),
    comments = comments.len(),
    "compressed"
  );
  Ok(CompressedOutput { text, rename_map })
}
