// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! Interactive shell
//!
//! A read-eval-print loop over the API client: domain commands, raw verb
//! commands for arbitrary endpoints, a save-to-file helper, and persisted
//! line history. Errors inside the loop are reported, never fatal.

use std::path::PathBuf;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;

use crate::api::{ApiClient, ParseReferenceOptions};
use crate::error::{Error, Result};
use crate::http::{Body, Verb};

/// History file written next to wherever the shell is launched
pub const HISTORY_FILE: &str = ".quizsage_history";

/// Shell help text
pub const HELP: &str = "\
Available commands:
  help                         print this menu
  bibles                       list known bible translations
  books [bible]                fetch the book list for a translation
  structure [bible]            fetch the canonical structure
  identify <book> [book...]    identify translation(s) from books
  parse <text...> [flags]      parse a free-text scripture reference
      --bible <name> --abbreviate --sorted --exact-chapter
      --exact-verse --exact-book --min-book-length <n> --expand
  get|delete <endpoint>        raw request against an endpoint
  post|put|patch <endpoint> [json]
  save <file>                  save the last result as JSON
  exit                         leave the shell";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Exit,
    Bibles,
    Books(Option<String>),
    Structure(Option<String>),
    Identify(Vec<String>),
    Parse {
        text: String,
        opts: ParseReferenceOptions,
    },
    Raw {
        verb: Verb,
        endpoint: String,
        body: Option<Value>,
    },
    Save(PathBuf),
}

/// Parse one input line into a command. Empty lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let cmd = match command {
        "help" => Command::Help,
        "exit" | "quit" => Command::Exit,
        "bibles" => Command::Bibles,
        "books" => Command::Books(rest.first().map(|s| s.to_string())),
        "structure" => Command::Structure(rest.first().map(|s| s.to_string())),
        "identify" => {
            if rest.is_empty() {
                return Err(Error::usage("identify needs at least one book name"));
            }
            Command::Identify(rest.iter().map(|s| s.to_string()).collect())
        }
        "parse" => parse_parse_command(&rest)?,
        "get" | "delete" | "post" | "put" | "patch" => parse_raw_command(command, &rest)?,
        "save" => {
            let file = rest
                .first()
                .ok_or_else(|| Error::usage("save needs a file path"))?;
            Command::Save(PathBuf::from(file))
        }
        other => {
            return Err(Error::usage(format!(
                "unknown command '{}', try 'help'",
                other
            )))
        }
    };
    Ok(Some(cmd))
}

fn parse_parse_command(rest: &[&str]) -> Result<Command> {
    let mut text_words = Vec::new();
    let mut opts = ParseReferenceOptions::default();

    let mut iter = rest.iter().peekable();
    while let Some(word) = iter.next() {
        match *word {
            "--bible" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::usage("--bible needs a value"))?;
                opts.bible = Some(value.to_string());
            }
            "--abbreviate" => opts.abbreviate = Some(true),
            "--sorted" => opts.sorted = Some(true),
            "--exact-chapter" => opts.exact_chapter = Some(true),
            "--exact-verse" => opts.exact_verse = Some(true),
            "--exact-book" => opts.exact_book = Some(true),
            "--expand" => opts.expand_verses = Some(true),
            "--min-book-length" => {
                let value = iter
                    .next()
                    .ok_or_else(|| Error::usage("--min-book-length needs a number"))?;
                let n = value
                    .parse::<u32>()
                    .map_err(|_| Error::usage("--min-book-length needs a number"))?;
                opts.minimum_book_length = Some(n);
            }
            flag if flag.starts_with("--") => {
                return Err(Error::usage(format!("unknown flag '{}'", flag)));
            }
            word => text_words.push(word),
        }
    }

    if text_words.is_empty() {
        return Err(Error::usage("parse needs reference text"));
    }
    Ok(Command::Parse {
        text: text_words.join(" "),
        opts,
    })
}

fn parse_raw_command(verb_word: &str, rest: &[&str]) -> Result<Command> {
    let verb = match verb_word {
        "get" => Verb::Get,
        "delete" => Verb::Delete,
        "post" => Verb::Post,
        "put" => Verb::Put,
        "patch" => Verb::Patch,
        _ => unreachable!("caller matched the verb word"),
    };
    let endpoint = rest
        .first()
        .ok_or_else(|| Error::usage(format!("{} needs an endpoint", verb_word)))?
        .to_string();
    if !endpoint.starts_with('/') {
        return Err(Error::usage("endpoint must start with '/'"));
    }

    let body = if rest.len() > 1 {
        if !verb.sends_body() {
            return Err(Error::usage(format!("{} takes no body", verb_word)));
        }
        let raw = rest[1..].join(" ");
        let value: Value =
            serde_json::from_str(&raw).map_err(|e| Error::usage(format!("bad JSON body: {}", e)))?;
        Some(value)
    } else {
        None
    };

    Ok(Command::Raw {
        verb,
        endpoint,
        body,
    })
}

/// The interactive shell over an API client
pub struct Shell {
    client: ApiClient,
    last_result: Option<Value>,
}

impl Shell {
    /// Create a shell around an authenticated client
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            last_result: None,
        }
    }

    /// Run the read-eval-print loop until exit or end of input
    pub async fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;
        // First launch has no history file yet
        let _ = editor.load_history(HISTORY_FILE);

        loop {
            match editor.readline("quizsage> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    match self.execute(&line).await {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    break;
                }
            }
        }

        editor.save_history(HISTORY_FILE).map_err(readline_error)?;
        Ok(())
    }

    /// Execute one input line. Returns true when the shell should exit.
    pub async fn execute(&mut self, line: &str) -> Result<bool> {
        let Some(command) = parse_command(line)? else {
            return Ok(false);
        };

        match command {
            Command::Help => println!("{}", HELP),
            Command::Exit => return Ok(true),
            Command::Bibles => {
                let value = Value::Array(
                    self.client
                        .bibles()
                        .iter()
                        .map(|b| Value::String(b.to_string()))
                        .collect(),
                );
                self.show(value);
            }
            Command::Books(bible) => {
                let value = self.client.bible_books(bible.as_deref()).await?;
                self.show(value);
            }
            Command::Structure(bible) => {
                let value = self.client.bible_structure(bible.as_deref()).await?;
                self.show(value);
            }
            Command::Identify(books) => {
                let value = self.client.identify_from_books(&books).await?;
                self.show(value);
            }
            Command::Parse { text, opts } => {
                let value = self.client.parse_reference(&text, &opts).await?;
                self.show(value);
            }
            Command::Raw {
                verb,
                endpoint,
                body,
            } => {
                let body = body.map(Body::Json).unwrap_or_default();
                let session = self.client.session();
                let resp = match verb {
                    Verb::Get => session.get(&endpoint).await?,
                    Verb::Delete => session.delete(&endpoint).await?,
                    Verb::Post => session.post(&endpoint, &body).await?,
                    Verb::Put => session.put(&endpoint, &body).await?,
                    Verb::Patch => session.patch(&endpoint, &body).await?,
                };
                println!("{} {}", "status:".dimmed(), resp.status);
                self.show(resp.data.unwrap_or(Value::Null));
            }
            Command::Save(path) => {
                let value = self
                    .last_result
                    .as_ref()
                    .ok_or_else(|| Error::usage("nothing to save yet"))?;
                let rendered = serde_json::to_string_pretty(value)
                    .map_err(|e| Error::parse(e.to_string()))?;
                std::fs::write(&path, rendered)?;
                println!("saved to {}", path.display().to_string().green());
            }
        }
        Ok(false)
    }

    /// Pretty-print a result and remember it for `save`
    fn show(&mut self, value: Value) {
        match serde_json::to_string_pretty(&value) {
            Ok(rendered) => println!("{}", rendered.cyan()),
            Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
        }
        self.last_result = Some(value);
    }
}

fn readline_error(e: ReadlineError) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}
