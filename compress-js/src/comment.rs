use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

// Stops at the first `*/`, like the comment itself.
static SPECIAL_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*([!@].*?)\*/").unwrap());

const CONDITIONAL_COMPILATION: &[&str] = &["@cc_on", "@if", "@elif", "@else", "@end", "@set", "@_"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CommentKind {
  /// `/*! ... */`
  Keep,
  /// `/*@cc_on ... @*/` and friends.
  Conditional,
}

/// A block comment copied to the output verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreservedComment {
  /// Byte offset of the `/*` in the source.
  pub offset: usize,
  /// The whole comment, delimiters included.
  pub text: String,
  pub kind: CommentKind,
}

fn classify(body: &str, preserve_unknown: bool) -> Option<CommentKind> {
  if body.starts_with('!') {
    return Some(CommentKind::Keep);
  };
  if CONDITIONAL_COMPILATION.iter().any(|kw| body.starts_with(kw)) {
    return Some(CommentKind::Conditional);
  };
  let named = body[1..]
    .chars()
    .next()
    .is_some_and(|c| c.is_ascii_alphabetic() || c == '$');
  (preserve_unknown && named).then_some(CommentKind::Conditional)
}

/// Finds the comments to keep in the raw source, in source order. Every other comment is dropped with the rest of the formatting.
pub fn scan(source: &str, preserve_unknown: bool) -> Vec<PreservedComment> {
  let mut comments = Vec::new();
  for m in SPECIAL_COMMENT.captures_iter(source) {
    let (Some(whole), Some(body)) = (m.get(0), m.get(1)) else {
      continue;
    };
    match classify(body.as_str(), preserve_unknown) {
      Some(kind) => comments.push(PreservedComment {
        offset: whole.start(),
        text: whole.as_str().to_string(),
        kind,
      }),
      None => trace!(offset = whole.start(), "dropping unrecognized @ comment"),
    };
  }
  comments
}

/// Puts `comments` ahead of `compressed`, one per line.
pub fn reinsert(compressed: &str, comments: &[PreservedComment]) -> String {
  let prefix_len: usize = comments.iter().map(|c| c.text.len() + 1).sum();
  let mut out = String::with_capacity(prefix_len + compressed.len());
  for comment in comments {
    out.push_str(&comment.text);
    out.push('\n');
  }
  out.push_str(compressed);
  out
}
