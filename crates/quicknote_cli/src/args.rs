//! Command-line parsing for the `quicknote` binary.

use quicknote_core::ImportDecision;
use std::error::Error;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: quicknote [--db PATH] <command>

commands:
  add <content> [-t TAG]... [--secret|--public]
  clip <text>
  list [-t TAG]... [-q QUERY]
  tags
  suggest <partial> [-t ATTACHED]...
  edit <id> <content> [-t TAG]... [--secret]
  show <id>
  delete <id> [--yes]
  delete-all [--yes]
  export <file>
  import <file> (--replace|--merge)
  default-secret (on|off)";

/// Parsed invocation: global options plus one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub db_path: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        content: String,
        tags: Vec<String>,
        is_secret: Option<bool>,
    },
    Clip {
        text: String,
    },
    List {
        tags: Vec<String>,
        query: String,
    },
    Tags,
    Suggest {
        partial: String,
        attached: Vec<String>,
    },
    Edit {
        id: String,
        content: String,
        tags: Vec<String>,
        is_secret: bool,
    },
    Show {
        id: String,
    },
    Delete {
        id: String,
        assume_yes: bool,
    },
    DeleteAll {
        assume_yes: bool,
    },
    Export {
        path: PathBuf,
    },
    Import {
        path: PathBuf,
        decision: ImportDecision,
    },
    DefaultSecret {
        enabled: bool,
    },
    Help,
}

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self {
            iter: args.into_iter(),
            command_name: command_name.to_string(),
        }
    }

    /// Value following `flag`.
    pub fn extract_value(&mut self, flag: &str) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name).into()
        })
    }

    /// Tag following -t/--tag; blank tags are rejected.
    pub fn extract_tag(&mut self) -> Result<String, Box<dyn Error>> {
        let value = self.extract_value("-t/--tag")?;
        let tag = value.trim();
        if tag.is_empty() {
            return Err(format!("Invalid tag provided to {}", self.command_name).into());
        }
        Ok(tag.to_string())
    }

    /// Next required positional argument.
    pub fn positional(&mut self, name: &str) -> Result<String, Box<dyn Error>> {
        self.iter
            .next()
            .ok_or_else(|| format!("Provide <{}> for {}", name, self.command_name).into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    pub fn unexpected(&self, arg: &str) -> Box<dyn Error> {
        format!("Unexpected argument for {}: {}", self.command_name, arg).into()
    }
}

/// Parses everything after the program name.
pub fn parse_args(args: Vec<String>) -> Result<Invocation, Box<dyn Error>> {
    let mut iter = args.into_iter();
    let mut db_path = None;

    let command_name = loop {
        match iter.next() {
            Some(arg) if arg == "--db" => {
                let value = iter
                    .next()
                    .ok_or("Provide a path after --db")?;
                db_path = Some(PathBuf::from(value));
            }
            Some(arg) if arg == "-h" || arg == "--help" || arg == "help" => {
                return Ok(Invocation {
                    db_path,
                    command: Command::Help,
                });
            }
            Some(arg) => break arg,
            None => return Err(USAGE.into()),
        }
    };

    let parser = ArgParser::new(iter.collect(), &command_name);
    let command = match command_name.as_str() {
        "add" => parse_add(parser)?,
        "clip" => parse_clip(parser)?,
        "list" | "ls" => parse_list(parser)?,
        "tags" => parse_bare(parser, Command::Tags)?,
        "suggest" => parse_suggest(parser)?,
        "edit" => parse_edit(parser)?,
        "show" => parse_show(parser)?,
        "delete" | "rm" => parse_delete(parser)?,
        "delete-all" => parse_delete_all(parser)?,
        "export" => parse_export(parser)?,
        "import" => parse_import(parser)?,
        "default-secret" => parse_default_secret(parser)?,
        other => return Err(format!("Unknown command: {other}\n\n{USAGE}").into()),
    };

    Ok(Invocation { db_path, command })
}

fn parse_add(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let mut content = None;
    let mut tags = Vec::new();
    let mut is_secret = None;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-t" | "--tag" => tags.push(parser.extract_tag()?),
            "--secret" => is_secret = Some(true),
            "--public" => is_secret = Some(false),
            _ if content.is_none() => content = Some(arg),
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    let content = content.ok_or("Provide <content> for add")?;
    Ok(Command::Add {
        content,
        tags,
        is_secret,
    })
}

fn parse_clip(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let text = parser.positional("text")?;
    if let Some(extra) = parser.next() {
        return Err(parser.unexpected(&extra));
    }
    Ok(Command::Clip { text })
}

fn parse_list(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let mut tags = Vec::new();
    let mut query = String::new();
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-t" | "--tag" => tags.push(parser.extract_tag()?),
            "-q" | "--query" => query = parser.extract_value("-q/--query")?,
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    Ok(Command::List { tags, query })
}

fn parse_suggest(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let mut partial = None;
    let mut attached = Vec::new();
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-t" | "--tag" => attached.push(parser.extract_tag()?),
            _ if partial.is_none() => partial = Some(arg),
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    let partial = partial.ok_or("Provide <partial> for suggest")?;
    Ok(Command::Suggest { partial, attached })
}

fn parse_edit(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let id = parser.positional("id")?;
    let mut content = None;
    let mut tags = Vec::new();
    let mut is_secret = false;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-t" | "--tag" => tags.push(parser.extract_tag()?),
            "--secret" => is_secret = true,
            _ if content.is_none() => content = Some(arg),
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    let content = content.ok_or("Provide <content> for edit")?;
    Ok(Command::Edit {
        id,
        content,
        tags,
        is_secret,
    })
}

fn parse_show(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let id = parser.positional("id")?;
    if let Some(extra) = parser.next() {
        return Err(parser.unexpected(&extra));
    }
    Ok(Command::Show { id })
}

fn parse_delete(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let mut id = None;
    let mut assume_yes = false;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-y" | "--yes" => assume_yes = true,
            _ if id.is_none() => id = Some(arg),
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    let id = id.ok_or("Provide <id> for delete")?;
    Ok(Command::Delete { id, assume_yes })
}

fn parse_delete_all(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let mut assume_yes = false;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "-y" | "--yes" => assume_yes = true,
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    Ok(Command::DeleteAll { assume_yes })
}

fn parse_export(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let path = PathBuf::from(parser.positional("file")?);
    if let Some(extra) = parser.next() {
        return Err(parser.unexpected(&extra));
    }
    Ok(Command::Export { path })
}

fn parse_import(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let mut path = None;
    let mut decision = None;
    while let Some(arg) = parser.next() {
        match arg.as_str() {
            "--replace" => decision = Some(ImportDecision::Replace),
            "--merge" => decision = Some(ImportDecision::Merge),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(parser.unexpected(&arg)),
        }
    }
    let path = path.ok_or("Provide <file> for import")?;
    let decision = decision.ok_or("Choose --replace or --merge for import")?;
    Ok(Command::Import { path, decision })
}

fn parse_default_secret(mut parser: ArgParser) -> Result<Command, Box<dyn Error>> {
    let value = parser.positional("on|off")?;
    let enabled = match value.as_str() {
        "on" | "true" | "yes" => true,
        "off" | "false" | "no" => false,
        _ => return Err(format!("Expected on or off, got {value}").into()),
    };
    Ok(Command::DefaultSecret { enabled })
}

fn parse_bare(mut parser: ArgParser, command: Command) -> Result<Command, Box<dyn Error>> {
    match parser.next() {
        Some(extra) => Err(parser.unexpected(&extra)),
        None => Ok(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, Box<dyn Error>> {
        parse_args(args.iter().map(|arg| arg.to_string()).collect())
    }

    #[test]
    fn add_collects_tags_and_secrecy() {
        let invocation = parse(&["--db", "/tmp/n.db", "add", "hello", "-t", " work ", "--secret"])
            .unwrap();
        assert_eq!(invocation.db_path, Some(PathBuf::from("/tmp/n.db")));
        assert_eq!(
            invocation.command,
            Command::Add {
                content: "hello".to_string(),
                tags: vec!["work".to_string()],
                is_secret: Some(true),
            }
        );
    }

    #[test]
    fn add_without_secrecy_flag_defers_to_setting() {
        let invocation = parse(&["add", "hello"]).unwrap();
        assert!(matches!(
            invocation.command,
            Command::Add { is_secret: None, .. }
        ));
    }

    #[test]
    fn list_accepts_query_and_tags() {
        let invocation = parse(&["list", "-t", "a", "-q", "milk", "--tag", "b"]).unwrap();
        assert_eq!(
            invocation.command,
            Command::List {
                tags: vec!["a".to_string(), "b".to_string()],
                query: "milk".to_string(),
            }
        );
    }

    #[test]
    fn import_requires_a_decision() {
        let err = parse(&["import", "notes.json"]).unwrap_err();
        assert!(err.to_string().contains("--replace or --merge"));

        let invocation = parse(&["import", "--merge", "notes.json"]).unwrap();
        assert_eq!(
            invocation.command,
            Command::Import {
                path: PathBuf::from("notes.json"),
                decision: ImportDecision::Merge,
            }
        );
    }

    #[test]
    fn blank_tag_and_unknown_command_are_errors() {
        assert!(parse(&["add", "x", "-t", "  "]).is_err());
        assert!(parse(&["add", "x", "-t"]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&[]).is_err());
        assert!(parse(&["tags", "extra"]).is_err());
    }

    #[test]
    fn default_secret_parses_switch() {
        let invocation = parse(&["default-secret", "off"]).unwrap();
        assert_eq!(invocation.command, Command::DefaultSecret { enabled: false });
        assert!(parse(&["default-secret", "maybe"]).is_err());
    }
}
