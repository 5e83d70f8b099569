use serde::Deserialize;
use serde::Serialize;

/// Settings for one [`compress`](crate::compress) call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressOptions {
  /// Rename local identifiers to short names.
  pub munge_names: bool,
  /// Break the output into lines of this many characters. `None` and `Some(0)` disable wrapping.
  pub wrap_column: Option<usize>,
  /// Also keep `/*@name ...*/` comments whose name is not a conditional compilation keyword.
  pub preserve_unknown_comments: bool,
}

impl Default for CompressOptions {
  fn default() -> Self {
    CompressOptions {
      munge_names: true,
      wrap_column: None,
      preserve_unknown_comments: false,
    }
  }
}

impl CompressOptions {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_munge_names(mut self, munge_names: bool) -> Self {
    self.munge_names = munge_names;
    self
  }

  pub fn with_wrap_column(mut self, wrap_column: Option<usize>) -> Self {
    self.wrap_column = wrap_column;
    self
  }

  pub fn with_preserve_unknown_comments(mut self, preserve: bool) -> Self {
    self.preserve_unknown_comments = preserve;
    self
  }

  pub(crate) fn effective_wrap_column(&self) -> Option<usize> {
    self.wrap_column.filter(|&col| col > 0)
  }
}

#[cfg(test)]
mod tests {
  use super::CompressOptions;

  #[test]
  fn missing_fields_take_defaults() {
    let options: CompressOptions = serde_json::from_str(r#"{"wrap_column": 80}"#).unwrap();
    assert_eq!(
      options,
      CompressOptions::new().with_wrap_column(Some(80))
    );
    assert!(options.munge_names);
  }

  #[test]
  fn zero_wrap_column_disables_wrapping() {
    let options = CompressOptions::new().with_wrap_column(Some(0));
    assert_eq!(options.effective_wrap_column(), None);
  }
}
