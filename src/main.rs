//! Command-line front-end for the reference extractor.

use anyhow::Context as _;
use lexref::{AxisRole, Language, Mode, Options, Reflector, StdCoordinate, Target};
use std::io::{BufRead as _, IsTerminal as _};

/// Errors that may occur when parsing arguments.
#[derive(Debug, thiserror::Error)]
enum ArgsError {
    /// An unknown processing mode.
    #[error("unknown mode '{0}'; expected 'annotate' or 'markup'")]
    Mode(String),
    /// An unknown minimum role name.
    #[error("unknown role '{0}'")]
    Role(String),
    /// A context string that parses to nothing.
    #[error("cannot parse context '{0}'")]
    Context(String),
    /// Extra unknown junk on the command line.
    #[error("unknown arguments: {0:?}")]
    Extra(Vec<std::ffi::OsString>),
}

/// Parsed command line.
struct Args {
    language: Language,
    mode: Mode,
    options: Options,
    texts: Vec<String>,
}

const USAGE: &str = "\
Usage: lexref [options] [text ...]

Detects references to legal-document structure in the given text (or in
lines read from stdin) and prints the result.

Options:
  -l, --language <EN|DE|ES>   input language (default: EN)
  -m, --mode <markup|annotate>
                              markup splices <a> anchors, annotate prints
                              JSON records (default: markup)
      --min-role <role>       emit only references at this role or
                              broader (document, container, leaf, ...)
      --domain <url>          prefix for document-rooted hrefs
      --document <path>       default document context, e.g. /eu/32013R0575/
      --container <spec>      container context, e.g. toc-PRT_1-TIT_V
      --only-treaties         ignore popular names of regulations and
                              directives
      --unclose               merge adjacent anchors with related targets
  -h, --help                  print this help
";

fn parse_args() -> anyhow::Result<Args> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{USAGE}");
        std::process::exit(0);
    }
    let language = args
        .opt_value_from_str::<_, Language>(["-l", "--language"])?
        .unwrap_or(Language::En);
    let mode = match args.opt_value_from_str::<_, String>(["-m", "--mode"])? {
        None => Mode::Markup,
        Some(mode) if mode.eq_ignore_ascii_case("markup") => Mode::Markup,
        Some(mode) if mode.eq_ignore_ascii_case("annotate") => Mode::Annotate,
        Some(mode) => return Err(ArgsError::Mode(mode).into()),
    };
    let min_role = args
        .opt_value_from_str::<_, String>("--min-role")?
        .map(|name| AxisRole::from_name(&name.to_lowercase()).ok_or(ArgsError::Role(name)))
        .transpose()?;
    let domain = args.opt_value_from_str::<_, String>("--domain")?;
    let document = args
        .opt_value_from_str::<_, String>("--document")?
        .map(|path| {
            StdCoordinate::from_document_path(&path).ok_or(ArgsError::Context(path))
        })
        .transpose()?;
    let container = args
        .opt_value_from_str::<_, String>("--container")?
        .map(|spec| Target::create(&spec).ok_or(ArgsError::Context(spec)))
        .transpose()?;
    let options = Options {
        container,
        document,
        min_role,
        internet_domain: domain,
        only_treaty_names: args.contains("--only-treaties"),
        unclose: args.contains("--unclose"),
    };
    let rest = args.finish();
    if rest.iter().any(|arg| arg.to_string_lossy().starts_with('-')) {
        return Err(ArgsError::Extra(rest).into());
    }
    let texts = rest
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    Ok(Args { language, mode, options, texts })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;
    let mut reflector = Reflector::new(args.language, args.mode, args.options);

    let texts = if args.texts.is_empty() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            anyhow::bail!("no input; pass text as arguments or pipe it to stdin");
        }
        stdin
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("reading stdin")?
    } else {
        args.texts
    };

    match args.mode {
        Mode::Markup => {
            let borrowed: Vec<&str> = texts.iter().map(String::as_str).collect();
            for item in reflector.markup_list(&borrowed) {
                println!("{}", item.markup);
            }
        }
        Mode::Annotate => {
            let borrowed: Vec<&str> = texts.iter().map(String::as_str).collect();
            for annotation in reflector.annotate_list(&borrowed) {
                println!("{}", serde_json::to_string(&annotation)?);
            }
        }
    }
    for problematic in reflector.problematics() {
        log::warn!("problematic input: {problematic}");
    }
    Ok(())
}
