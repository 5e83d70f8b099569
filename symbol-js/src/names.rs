use ahash::HashSet;
use once_cell::sync::Lazy;
use parse_js::token::KEYWORDS;

// Short globals that browsers define and that a local must never shadow.
pub const BUILTINS: &[&str] = &["NaN", "top"];

const RESERVED_WORDS: &[&str] = &[
  "abstract",
  "arguments",
  "await",
  "boolean",
  "break",
  "byte",
  "case",
  "catch",
  "char",
  "class",
  "const",
  "continue",
  "debugger",
  "default",
  "delete",
  "do",
  "double",
  "else",
  "enum",
  "eval",
  "export",
  "extends",
  "false",
  "final",
  "finally",
  "float",
  "for",
  "function",
  "goto",
  "if",
  "implements",
  "import",
  "in",
  "instanceof",
  "int",
  "interface",
  "let",
  "long",
  "native",
  "new",
  "null",
  "package",
  "private",
  "protected",
  "public",
  "return",
  "short",
  "static",
  "super",
  "switch",
  "synchronized",
  "this",
  "throw",
  "throws",
  "transient",
  "true",
  "try",
  "typeof",
  "var",
  "void",
  "volatile",
  "while",
  "with",
  "yield",
];

// Never handed out even though some of them are valid identifiers.
const EXCLUDED_SHORT_NAMES: &[&str] = &[
  "as", "is", "do", "if", "in", "for", "int", "new", "try", "use", "var",
];

pub static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  RESERVED_WORDS
    .iter()
    .copied()
    .chain(KEYWORDS.iter().map(|&(_, word)| word))
    .chain(BUILTINS.iter().copied())
    .collect()
});

pub fn is_reserved(name: &str) -> bool {
  RESERVED.contains(name)
}

const FIRST_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const OTHER_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Every candidate replacement name, shortest first: one letter, then two characters, then three.
pub static NAME_POOL: Lazy<Vec<String>> = Lazy::new(|| {
  let ones: Vec<String> = FIRST_CHARS.iter().map(|&c| (c as char).to_string()).collect();
  let extend = |prefixes: &[String]| -> Vec<String> {
    let mut out = Vec::with_capacity(prefixes.len() * OTHER_CHARS.len());
    for prefix in prefixes {
      for &c in OTHER_CHARS {
        let mut name = prefix.clone();
        name.push(c as char);
        out.push(name);
      }
    }
    out
  };
  let twos = extend(&ones);
  let threes = extend(&twos);
  ones
    .into_iter()
    .chain(twos)
    .chain(threes)
    .filter(|name| !EXCLUDED_SHORT_NAMES.contains(&name.as_str()) && !is_reserved(name))
    .collect()
});

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pool_is_ordered_by_length() {
    assert_eq!(NAME_POOL[0], "a");
    assert_eq!(NAME_POOL[25], "z");
    assert_eq!(NAME_POOL[26], "A");
    assert_eq!(NAME_POOL[52], "aa");
    assert!(NAME_POOL.windows(2).all(|w| w[0].len() <= w[1].len()));
    assert_eq!(NAME_POOL.last().map(|n| n.len()), Some(3));
  }

  #[test]
  fn pool_excludes_reserved_and_builtins() {
    for name in ["do", "if", "in", "as", "is", "for", "var", "new", "try", "let", "NaN", "top"] {
      assert!(!NAME_POOL.iter().any(|n| n == name), "{name} in pool");
    }
    assert!(NAME_POOL.iter().any(|n| n == "a9"));
    assert!(!NAME_POOL.iter().any(|n| n.starts_with(|c: char| c.is_ascii_digit())));
  }
}
