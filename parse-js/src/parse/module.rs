use super::Ctx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VerbatimStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn push_word(&mut self, words: &mut Vec<&'a str>) {
    let t = self.bump();
    words.push(self.text(t.loc));
  }

  /// Copies tokens up to and including the matching `}`. Import and export lists never nest braces.
  fn copy_braces(&mut self, words: &mut Vec<&'a str>) -> SyntaxResult<()> {
    let open = self.expect(TT::BraceOpen)?;
    words.push(self.text(open.loc));
    loop {
      let t = self.peek();
      match t.typ {
        TT::EOF => return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::BraceClose))),
        TT::BraceClose => {
          self.push_word(words);
          return Ok(());
        }
        _ => self.push_word(words),
      };
    }
  }

  /// `from 'module'`, or just `'module'` if `from` is false, plus any import attributes like `with { type: 'json' }`.
  fn copy_module_specifier(&mut self, words: &mut Vec<&'a str>, from: bool) -> SyntaxResult<()> {
    if from {
      let kw = self.expect(TT::KeywordFrom)?;
      words.push(self.text(kw.loc));
    };
    let module = self.expect(TT::LiteralString)?;
    words.push(self.text(module.loc));
    let with = self.peek();
    if with.typ == TT::KeywordWith && !with.newline_before && self.peek_nth(1).typ == TT::BraceOpen {
      self.push_word(words);
      self.copy_braces(words)?;
    };
    Ok(())
  }

  fn verbatim(&mut self, words: Vec<&'a str>) -> SyntaxResult<VerbatimStmt> {
    self.semicolon()?;
    let mut text = String::new();
    let mut literals = Vec::new();
    for word in words {
      if !text.is_empty() {
        text.push(' ');
      };
      // Only string tokens start with a quote.
      if word.starts_with(['\'', '"']) {
        literals.push(text.len()..text.len() + word.len());
      };
      text.push_str(word);
    }
    Ok(VerbatimStmt { text, literals })
  }

  /// An import declaration such as `import a, { b as c } from "d"` or `import "e"`. Its bindings live in the module's top-level scope, which is never renamed, so the tokens are kept as they are.
  pub(crate) fn import_stmt(&mut self) -> SyntaxResult<Node<VerbatimStmt>> {
    self.with_loc(|p| {
      let mut words = Vec::new();
      let kw = p.expect(TT::KeywordImport)?;
      words.push(p.text(kw.loc));
      if p.at(TT::LiteralString) {
        p.copy_module_specifier(&mut words, false)?;
        return p.verbatim(words);
      };
      loop {
        let t = p.peek();
        match t.typ {
          TT::BraceOpen => p.copy_braces(&mut words)?,
          // `from` is the default import's name in `import from from "a"`.
          TT::KeywordFrom if !matches!(words.last(), Some(&"import" | &",")) => break,
          TT::Comma | TT::Asterisk | TT::KeywordAs | TT::Identifier => p.push_word(&mut words),
          typ if typ.is_keyword() => p.push_word(&mut words),
          _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("import clause"))),
        };
      }
      p.copy_module_specifier(&mut words, true)?;
      p.verbatim(words)
    })
  }

  /// Any export form. Exported declarations keep their structure, while export lists and re-exports are kept as tokens.
  pub(crate) fn export_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<Stmt>> {
    let start = self.expect(TT::KeywordExport)?.loc.0;
    let t0 = self.peek();
    let t1 = self.peek_nth(1);
    let stmt: Node<Stmt> = match t0.typ {
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => {
        self.var_decl(ctx, start, true)?.into_wrapped()
      }
      TT::KeywordFunction | TT::KeywordAsync => self.func_decl(ctx, start, true, false)?.into_wrapped(),
      TT::KeywordClass => self.class_decl(ctx, start, true, false)?.into_wrapped(),
      TT::KeywordDefault => {
        self.bump();
        let async_fn = t1.typ == TT::KeywordAsync
          && self.peek_nth(1).typ == TT::KeywordFunction
          && !self.peek_nth(1).newline_before;
        match t1.typ {
          TT::KeywordFunction => self.func_decl(ctx, start, true, true)?.into_wrapped(),
          TT::KeywordAsync if async_fn => self.func_decl(ctx, start, true, true)?.into_wrapped(),
          TT::KeywordClass => self.class_decl(ctx, start, true, true)?.into_wrapped(),
          _ => {
            let expression = self.assignment(ctx.with_in())?;
            self.semicolon()?;
            Node::new(self.loc_from(start), ExportDefaultExprStmt { expression }).into_wrapped()
          }
        }
      }
      TT::BraceOpen | TT::Asterisk => {
        let mut words = vec!["export"];
        if t0.typ == TT::BraceOpen {
          self.copy_braces(&mut words)?;
          if self.at(TT::KeywordFrom) {
            self.copy_module_specifier(&mut words, true)?;
          };
        } else {
          // `export * from "a"` or `export * as b from "a"`.
          self.push_word(&mut words);
          if self.at(TT::KeywordAs) {
            self.push_word(&mut words);
            self.push_word(&mut words);
          };
          self.copy_module_specifier(&mut words, true)?;
        };
        let stmt = self.verbatim(words)?;
        Node::new(self.loc_from(start), stmt).into_wrapped()
      }
      _ => return Err(t0.error(SyntaxErrorType::ExpectedSyntax("exportable"))),
    };
    Ok(stmt)
  }
}
