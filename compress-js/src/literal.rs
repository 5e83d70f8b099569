use crate::err::CompressError;
use regex::Captures;
use regex::Regex;
use std::ops::Range;
use tracing::trace;

const PLACEHOLDER_PREFIX: &str = "___STRING_LITERAL_";
const PLACEHOLDER_SUFFIX: &str = "___";

/// Generated code with every string, template and regex literal swapped out for a placeholder.
#[derive(Debug)]
pub(crate) struct Protected {
  pub text: String,
  literals: Vec<String>,
  prefix: String,
}

/// Replaces each literal in `code` with a unique placeholder, keeping the literal text aside. `spans` are the literal ranges reported by the generator.
pub(crate) fn protect(code: &str, spans: &[Range<usize>]) -> Result<Protected, CompressError> {
  check_spans(code, spans)?;

  // Placeholders must not already occur in the code around the literals.
  let mut prefix = PLACEHOLDER_PREFIX.to_string();
  let mut salt = 0;
  while code.contains(&prefix) {
    salt += 1;
    prefix = format!("___STRING_LITERAL{}_", salt);
  }

  let mut text = String::with_capacity(code.len());
  let mut literals = Vec::with_capacity(spans.len());
  let mut last = 0;
  for span in spans.iter().cloned() {
    text.push_str(&code[last..span.start]);
    text.push_str(&prefix);
    text.push_str(&literals.len().to_string());
    text.push_str(PLACEHOLDER_SUFFIX);
    literals.push(code[span.clone()].to_string());
    last = span.end;
  }
  text.push_str(&code[last..]);
  trace!(literals = literals.len(), "protected literals");
  Ok(Protected {
    text,
    literals,
    prefix,
  })
}

impl Protected {
  /// Puts the literals back into `code`, which is `self.text` after whitespace changes.
  pub(crate) fn restore(&self, code: &str) -> Result<String, CompressError> {
    let pattern = format!(
      r"{}(\d+){}",
      regex::escape(&self.prefix),
      regex::escape(PLACEHOLDER_SUFFIX)
    );
    let placeholder = Regex::new(&pattern).map_err(|err| CompressError::internal(err.to_string()))?;
    let restored = placeholder.replace_all(code, |caps: &Captures| {
      caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|i| self.literals.get(i))
        .cloned()
        .unwrap_or_else(|| caps[0].to_string())
    });
    Ok(restored.into_owned())
  }

  #[cfg(test)]
  pub(crate) fn literals(&self) -> &[String] {
    &self.literals
  }
}

// Ranges must be in order, inside `code`, on character boundaries and not overlapping.
fn check_spans(code: &str, spans: &[Range<usize>]) -> Result<(), CompressError> {
  let mut last = 0;
  for span in spans {
    let valid = last <= span.start
      && span.start < span.end
      && code.is_char_boundary(span.start)
      && code.is_char_boundary(span.end)
      && span.end <= code.len();
    debug_assert!(valid, "bad literal range {:?} after {}", span, last);
    if !valid {
      return Err(CompressError::internal(format!(
        "bad literal range {}..{} in generated code",
        span.start, span.end
      )));
    };
    last = span.end;
  }
  Ok(())
}
