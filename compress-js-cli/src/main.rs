use clap::Parser;
use compress_js::compress;
use compress_js::CompressError;
use compress_js::CompressOptions;
use compress_js::Rename;
use serde::Serialize;
use std::fs;
use std::io;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "compress-js", about = "JavaScript compressor with identifier munging")]
struct Cli {
  /// Files to compress; omit or pass `-` for stdin.
  files: Vec<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Minify only; do not rename local identifiers.
  #[arg(long)]
  nomunge: bool,

  /// Insert a line break after every COLUMN characters.
  #[arg(long, value_name = "COLUMN")]
  line_break: Option<usize>,

  /// Also keep `/*@name ...*/` hint comments that are not conditional compilation.
  #[arg(short, long)]
  preserve_hints: bool,

  /// Write the renamed identifiers of every file to FILE.
  #[arg(short = 'm', value_name = "FILE")]
  mapping: Option<PathBuf>,

  /// Log debug information to stderr.
  #[arg(short, long)]
  verbose: bool,

  /// Print a JSON document with the output, renames and errors.
  #[arg(long)]
  json: bool,
}

// Ordered so the worst outcome of a run is the maximum.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Status {
  Success = 0,
  IoOrUsage = 1,
  Compile = 2,
}

#[derive(Serialize)]
struct JsonError {
  file: String,
  line: Option<usize>,
  column: Option<usize>,
  code: Option<&'static str>,
  message: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  schema_version: u32,
  output: &'a str,
  renames: &'a [Rename],
  errors: &'a [JsonError],
}

struct Run {
  json: bool,
  status: Status,
  output: String,
  mapping: String,
  renames: Vec<Rename>,
  errors: Vec<JsonError>,
}

impl Run {
  fn fail(&mut self, status: Status, error: JsonError) {
    self.status = self.status.max(status);
    if self.json {
      self.errors.push(error);
    } else {
      eprintln!("[ERROR] in {}", error.file);
      match (error.line, error.column) {
        (Some(line), Some(column)) => eprintln!("  {}:{}:{}", line, column, error.message),
        _ => eprintln!("  {}", error.message),
      };
    }
  }

  fn io_error(&mut self, file: &str, message: String) {
    self.fail(Status::IoOrUsage, JsonError {
      file: file.to_string(),
      line: None,
      column: None,
      code: None,
      message,
    });
  }

  fn compile_error(&mut self, file: &str, err: CompressError) {
    let error = match err {
      CompressError::Parse {
        message,
        line,
        column,
        code,
      } => JsonError {
        file: file.to_string(),
        line: Some(line),
        column: Some(column),
        code: Some(code),
        message,
      },
      CompressError::Internal { message } => JsonError {
        file: file.to_string(),
        line: None,
        column: None,
        code: None,
        message,
      },
    };
    self.fail(Status::Compile, error);
  }

  fn record_mapping(&mut self, file: &str, renames: &[Rename]) {
    self.mapping.push_str("\n\nFile: ");
    self.mapping.push_str(file);
    self.mapping.push_str("\n\n");
    for rename in renames {
      let indent = "  ".repeat(rename.depth.saturating_sub(1));
      self.mapping.push_str(&format!(
        "{}{} -> {}\n",
        indent, rename.original, rename.assigned
      ));
    }
  }
}

fn init_tracing(verbose: bool) {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(io::stderr)
    .try_init();
}

fn read_input(path: &PathBuf) -> io::Result<(String, String)> {
  if path.as_os_str() == "-" {
    return read_stdin();
  };
  let name = path.to_string_lossy().into_owned();
  let source = fs::read_to_string(path)?;
  Ok((name, source))
}

fn read_stdin() -> io::Result<(String, String)> {
  let mut source = String::new();
  stdin().read_to_string(&mut source)?;
  Ok(("<stdin>".to_string(), source))
}

fn write_to(dest: Option<&PathBuf>, contents: &str) -> io::Result<()> {
  match dest {
    Some(path) => fs::write(path, contents),
    None => {
      let mut out = stdout().lock();
      out.write_all(contents.as_bytes())?;
      out.flush()
    }
  }
}

fn main() -> ExitCode {
  let args = match Cli::try_parse() {
    Ok(args) => args,
    Err(err) => {
      let _ = err.print();
      return if err.use_stderr() {
        ExitCode::from(Status::IoOrUsage as u8)
      } else {
        ExitCode::SUCCESS
      };
    }
  };
  init_tracing(args.verbose);

  let options = CompressOptions::default()
    .with_munge_names(!args.nomunge)
    .with_wrap_column(args.line_break)
    .with_preserve_unknown_comments(args.preserve_hints);
  let mut run = Run {
    json: args.json,
    status: Status::Success,
    output: String::new(),
    mapping: String::new(),
    renames: Vec::new(),
    errors: Vec::new(),
  };

  let inputs: Vec<io::Result<(String, String)>> = if args.files.is_empty() {
    vec![read_stdin()]
  } else {
    args.files.iter().map(read_input).collect()
  };
  for (i, input) in inputs.into_iter().enumerate() {
    let (name, source) = match input {
      Ok(input) => input,
      Err(err) => {
        let name = args
          .files
          .get(i)
          .map(|p| p.to_string_lossy().into_owned())
          .unwrap_or_else(|| "<stdin>".to_string());
        run.io_error(&name, format!("failed to read input: {}", err));
        continue;
      }
    };
    debug!(file = %name, bytes = source.len(), "compressing");
    match compress(&source, &options) {
      Ok(out) => {
        if !run.output.is_empty() {
          run.output.push('\n');
        };
        run.output.push_str(&out.text);
        run.record_mapping(&name, &out.rename_map);
        run.renames.extend(out.rename_map);
      }
      Err(err) => run.compile_error(&name, err),
    };
  }

  if let Some(path) = args.mapping.as_ref() {
    if let Err(err) = fs::write(path, &run.mapping) {
      let name = path.to_string_lossy().into_owned();
      run.io_error(&name, format!("failed to write mapping: {}", err));
    };
  };

  let document = if run.json {
    let report = JsonReport {
      schema_version: 1,
      output: &run.output,
      renames: &run.renames,
      errors: &run.errors,
    };
    match serde_json::to_string(&report) {
      Ok(json) => json,
      Err(err) => {
        eprintln!("[ERROR] failed to serialize report: {}", err);
        return ExitCode::from(Status::IoOrUsage as u8);
      }
    }
  } else {
    std::mem::take(&mut run.output)
  };
  if let Err(err) = write_to(args.output.as_ref(), &document) {
    eprintln!("[ERROR] failed to write output: {}", err);
    run.status = run.status.max(Status::IoOrUsage);
  };

  ExitCode::from(run.status as u8)
}
