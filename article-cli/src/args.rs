use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: articles [options] [command]

commands:
  list            load articles (seeding an empty backend) and render them
  insert FILE     create the article described by a JSON file
  update FILE     update the article described by a JSON file (needs article_id)
  delete ID       delete one article
  truncate        delete every article
  help            show this message

options:
  --config PATH     configuration file (default: user config dir)
  --base-url URL    backend root, e.g. http://localhost:3000/
  --template PATH   article template (tera syntax)
  --seed PATH       seed dataset used when the backend is empty
  --text            print plain text instead of HTML";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    List,
    Insert(PathBuf),
    Update(PathBuf),
    Delete(String),
    Truncate,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub base_url: Option<String>,
    pub template: Option<PathBuf>,
    pub seed: Option<PathBuf>,
    pub text: bool,
    pub command: Command,
}

/// Parses everything after the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut parsed = CliArgs::default();
    let mut positional: Vec<String> = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = arg.to_string_lossy().into_owned();
        match arg.as_str() {
            "--config" => parsed.config = Some(value_of(&arg, args.next())?.into()),
            "--base-url" => parsed.base_url = Some(value_of(&arg, args.next())?),
            "--template" => parsed.template = Some(value_of(&arg, args.next())?.into()),
            "--seed" => parsed.seed = Some(value_of(&arg, args.next())?.into()),
            "--text" => parsed.text = true,
            "-h" | "--help" => parsed.command = Command::Help,
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            other => positional.push(other.to_owned()),
        }
    }

    if parsed.command == Command::Help {
        return Ok(parsed);
    }

    let mut positional = positional.into_iter();
    parsed.command = match positional.next().as_deref() {
        None | Some("list") => Command::List,
        Some("insert") => Command::Insert(operand("insert", positional.next())?.into()),
        Some("update") => Command::Update(operand("update", positional.next())?.into()),
        Some("delete") => Command::Delete(operand("delete", positional.next())?),
        Some("truncate") => Command::Truncate,
        Some("help") => Command::Help,
        Some(other) => return Err(format!("unknown command `{other}`")),
    };
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    Ok(parsed)
}

fn value_of(flag: &str, value: Option<OsString>) -> Result<String, String> {
    value
        .map(|v| v.to_string_lossy().into_owned())
        .ok_or_else(|| format!("`{flag}` needs a value"))
}

fn operand(command: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("`{command}` needs an argument"))
}
