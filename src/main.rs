use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trans_forms::{
    AutoForm, DeclaredForm, ExtraUploadForm, FileData, FormData, InMemoryCatalog, Language,
    MergeForm, PluralInfo, PluralTextarea, SearchForm, SubprojectRef, TranslationForm,
    UiMessages, UploadForm, UploadedFile, load_messages_from_file,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn cli() -> Command {
    Command::new("trans-forms")
        .version("0.1.0")
        .about("Render and validate translation editor forms")
        .arg(
            Arg::new("messages")
                .long("messages")
                .global(true)
                .help("JSON file with UI string translations (default: $TRANS_FORMS_MESSAGES)"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("render-plural")
                .about("Render plural text areas for a language")
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .required(true)
                        .help("Language code (e.g., cs, ru, de)"),
                )
                .arg(
                    Arg::new("equation")
                        .long("equation")
                        .short('e')
                        .default_value("")
                        .help("Plural equation to display"),
                )
                .arg(
                    Arg::new("nplurals")
                        .long("nplurals")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of plural forms (default: derived from CLDR rules)"),
                )
                .arg(Arg::new("name").long("name").default_value("target"))
                .arg(Arg::new("id").long("id").default_value("id_target"))
                .arg(
                    Arg::new("values")
                        .help("One string per plural form")
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("decode-plural")
                .about("Decode plural values from submitted fields (JSON object)")
                .arg(Arg::new("name").long("name").default_value("target"))
                .arg(
                    Arg::new("data")
                        .long("data")
                        .short('d')
                        .help("JSON file with submitted fields (default: stdin)"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a submission against one of the forms")
                .arg(
                    Arg::new("form")
                        .required(true)
                        .value_parser(["translation", "search", "merge", "upload", "extra-upload"])
                        .index(1),
                )
                .arg(
                    Arg::new("data")
                        .long("data")
                        .short('d')
                        .help("JSON file with submitted fields (default: stdin)"),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .help("File to submit as the upload"),
                )
                .arg(
                    Arg::new("lang")
                        .long("lang")
                        .short('l')
                        .default_value("en")
                        .help("Language of the translation form"),
                )
                .arg(Arg::new("equation").long("equation").default_value("")),
        )
        .subcommand(
            Command::new("auto-choices")
                .about("List automatic translation sources for a sub-project")
                .arg(Arg::new("catalog").long("catalog").short('c').required(true))
                .arg(Arg::new("project").long("project").short('p').required(true))
                .arg(Arg::new("exclude").long("exclude").short('x').required(true)),
        )
}

#[tokio::main]
async fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .init();

    let matches = cli().get_matches();
    let messages = load_ui_messages(matches.get_one::<String>("messages"))?;

    match matches.subcommand() {
        Some(("render-plural", sub)) => render_plural(sub, &messages),
        Some(("decode-plural", sub)) => decode_plural(sub),
        Some(("validate", sub)) => {
            let valid = validate(sub, &messages)?;
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(("auto-choices", sub)) => auto_choices(sub, &messages).await,
        _ => Err("Unknown command".into()),
    }
}

/// Filter from a `RUST_LOG` style spec, `info` when unset or invalid.
fn log_filter(spec: Option<&str>) -> EnvFilter {
    spec.and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn load_ui_messages(path: Option<&String>) -> CliResult<UiMessages> {
    let path = match path {
        Some(path) => path.clone(),
        None => match env::var("TRANS_FORMS_MESSAGES") {
            Ok(path) => path,
            Err(_) => return Ok(UiMessages::new()),
        },
    };
    info!("Loading UI messages from {}", path);
    Ok(load_messages_from_file(Path::new(&path))?)
}

fn language(code: &str, equation: &str, nplurals: Option<usize>) -> CliResult<Language> {
    Ok(match nplurals {
        Some(n) => Language::new(code, code, n, equation),
        None => Language::from_locale(code, code, equation)?,
    })
}

fn render_plural(matches: &ArgMatches, messages: &UiMessages) -> CliResult<()> {
    let code = arg(matches, "lang")?;
    let lang = language(
        code,
        arg(matches, "equation")?,
        matches.get_one::<usize>("nplurals").copied(),
    )?;
    let values: Vec<String> = matches
        .get_many::<String>("values")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if values.len() != lang.nplurals() {
        info!(
            "{} values given, language '{}' has {} plural forms",
            values.len(),
            code,
            lang.nplurals()
        );
    }

    let mut attrs = BTreeMap::new();
    attrs.insert("id".to_string(), arg(matches, "id")?.to_string());
    let html = PluralTextarea::new().render(&lang, &values, arg(matches, "name")?, &attrs, messages)?;
    println!("{}", html);
    Ok(())
}

fn decode_plural(matches: &ArgMatches) -> CliResult<()> {
    let data = read_form_data(matches.get_one::<String>("data"))?;
    let values = PluralTextarea::new().value_from_data(&data, arg(matches, "name")?);
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

fn validate(matches: &ArgMatches, messages: &UiMessages) -> CliResult<bool> {
    let data = read_form_data(matches.get_one::<String>("data"))?;
    let mut files = FileData::new();
    if let Some(path) = matches.get_one::<String>("file") {
        let content = std::fs::read(path)?;
        let name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        files.insert("file".to_string(), UploadedFile::new(name, content));
    }

    match arg(matches, "form")? {
        "translation" => {
            let lang = language(arg(matches, "lang")?, arg(matches, "equation")?, None)?;
            print_submission(&TranslationForm::new(Arc::new(lang)), &data, &files, messages)
        }
        "search" => print_submission(&SearchForm, &data, &files, messages),
        "merge" => print_submission(&MergeForm, &data, &files, messages),
        "upload" => print_submission(&UploadForm, &data, &files, messages),
        "extra-upload" => print_submission(&ExtraUploadForm, &data, &files, messages),
        other => Err(format!("Unknown form '{}'", other).into()),
    }
}

fn print_submission<F>(
    form: &F,
    data: &FormData,
    files: &FileData,
    messages: &UiMessages,
) -> CliResult<bool>
where
    F: DeclaredForm,
    F::Submission: Serialize,
{
    match form.submit(data, files, messages) {
        Ok(submission) => {
            println!("{}", serde_json::to_string_pretty(&submission)?);
            Ok(true)
        }
        Err(errors) => {
            println!("{}", serde_json::to_string_pretty(&errors.0)?);
            Ok(false)
        }
    }
}

async fn auto_choices(matches: &ArgMatches, messages: &UiMessages) -> CliResult<()> {
    let catalog = InMemoryCatalog::load(Path::new(arg(matches, "catalog")?))?;
    let current = SubprojectRef::new(arg(matches, "project")?, arg(matches, "exclude")?);
    let form = AutoForm::new(&catalog, &current, messages).await?;
    println!("{}", serde_json::to_string_pretty(form.choices())?);
    Ok(())
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> CliResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing argument '{}'", name).into())
}

/// Read submitted fields from a JSON object in `path`, or stdin.
///
/// Booleans become checkbox values ("on" or absent), numbers their decimal
/// text, `null` is dropped.
fn read_form_data(path: Option<&String>) -> CliResult<FormData> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let json: Value = serde_json::from_str(&content)?;
    let obj = json
        .as_object()
        .ok_or("Submitted data must be a JSON object")?;

    let mut data = FormData::new();
    for (key, value) in obj {
        match value {
            Value::String(text) => {
                data.insert(key.clone(), text.clone());
            }
            Value::Bool(true) => {
                data.insert(key.clone(), "on".to_string());
            }
            Value::Bool(false) | Value::Null => {}
            Value::Number(number) => {
                data.insert(key.clone(), number.to_string());
            }
            other => {
                debug!("Ignoring non-scalar field '{}': {}", key, other);
            }
        }
    }
    Ok(data)
}
