use std::fmt;
use std::path::PathBuf;

use course_core::model::Difficulty;
use course_core::{CourseFilter, LessonPosition};

pub const DEFAULT_DB_URL: &str = "sqlite://courses.sqlite3";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDifficulty { raw: String },
    InvalidDbUrl { raw: String },
    IncompletePosition,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing <{name}>"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDifficulty { raw } => write!(f, "invalid --difficulty value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::IncompletePosition => {
                write!(f, "a lesson position needs both <topic-id> and <subtopic-id>")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app courses  [--search <text>] [--difficulty <level>]");
    eprintln!("  app outline  <course-id> [--search <text>]");
    eprintln!("  app view     <course-id> [<topic-id> <subtopic-id>] [--json]");
    eprintln!("  app toggle   <subtopic-id>");
    eprintln!("  app progress <course-id>");
    eprintln!("  app create   --title <text> --description <text> [--subtitle <text>]");
    eprintln!("               [--difficulty <level>] [--cover <url>] [--topics <json-file>]");
    eprintln!("  app users    [--search <text>]");
    eprintln!("  app prune");
    eprintln!("  app reset");
    eprintln!();
    eprintln!("Every subcommand accepts --db <sqlite_url> (default: {DEFAULT_DB_URL}).");
    eprintln!("Levels: beginner, intermediate, advanced");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSE_DB_URL, RUST_LOG");
}

/// Fields collected for `create`; topics are read from disk at run time.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateArgs {
    pub title: String,
    pub description: String,
    pub subtitle: String,
    pub difficulty: Option<Difficulty>,
    pub cover: Option<String>,
    pub topics_file: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Courses(CourseFilter),
    Outline {
        course_id: String,
        search: String,
    },
    View {
        course_id: String,
        position: Option<LessonPosition>,
        json: bool,
    },
    Toggle {
        subtopic_id: String,
    },
    Progress {
        course_id: String,
    },
    Create(CreateArgs),
    Users {
        search: String,
    },
    Prune,
    Reset,
    Help,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub db_url: String,
    pub command: Command,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_difficulty(raw: String) -> Result<Difficulty, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidDifficulty { raw })
}

fn take_positional(positional: &mut Vec<String>, name: &'static str) -> Result<String, ArgsError> {
    if positional.is_empty() {
        return Err(ArgsError::MissingArgument { name });
    }
    Ok(positional.remove(0))
}

impl Args {
    /// Parse `argv` (without the program name). `env_db_url` is the value of
    /// `COURSE_DB_URL`, if set.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter();
        let mut db_url = env_db_url.unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        let Some(name) = args.next() else {
            return Ok(Self {
                db_url,
                command: Command::Help,
            });
        };

        let mut positional = Vec::new();
        let mut search = String::new();
        let mut json = false;
        let mut create = CreateArgs::default();
        let mut difficulty = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--search" => search = require_value(&mut args, "--search")?,
                "--difficulty" => {
                    difficulty = Some(parse_difficulty(require_value(&mut args, "--difficulty")?)?);
                }
                "--json" => json = true,
                "--title" => create.title = require_value(&mut args, "--title")?,
                "--description" => create.description = require_value(&mut args, "--description")?,
                "--subtitle" => create.subtitle = require_value(&mut args, "--subtitle")?,
                "--cover" => create.cover = Some(require_value(&mut args, "--cover")?),
                "--topics" => {
                    create.topics_file = Some(PathBuf::from(require_value(&mut args, "--topics")?));
                }
                "--help" | "-h" => {
                    return Ok(Self {
                        db_url,
                        command: Command::Help,
                    });
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let command = match name.as_str() {
            "courses" => {
                let mut filter = CourseFilter::new(search);
                filter.difficulty = difficulty;
                Command::Courses(filter)
            }
            "outline" => Command::Outline {
                course_id: take_positional(&mut positional, "course-id")?,
                search,
            },
            "view" => {
                let course_id = take_positional(&mut positional, "course-id")?;
                let position = match positional.len() {
                    0 => None,
                    1 => return Err(ArgsError::IncompletePosition),
                    _ => {
                        let topic = positional.remove(0);
                        let subtopic = positional.remove(0);
                        Some(LessonPosition::new(topic, subtopic))
                    }
                };
                Command::View {
                    course_id,
                    position,
                    json,
                }
            }
            "toggle" => Command::Toggle {
                subtopic_id: take_positional(&mut positional, "subtopic-id")?,
            },
            "progress" => Command::Progress {
                course_id: take_positional(&mut positional, "course-id")?,
            },
            "create" => {
                create.difficulty = difficulty;
                Command::Create(create)
            }
            "users" => Command::Users { search },
            "prune" => Command::Prune,
            "reset" => Command::Reset,
            "help" | "--help" | "-h" => Command::Help,
            _ => return Err(ArgsError::UnknownCommand(name)),
        };

        if let Some(extra) = positional.into_iter().next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Self {
            db_url: normalize_sqlite_url(db_url),
            command,
        })
    }
}

/// Turn a relative `sqlite:` path into an absolute `sqlite://` url.
pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.starts_with("sqlite:file:") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, ArgsError> {
        Args::parse(argv.iter().map(ToString::to_string), None)
    }

    #[test]
    fn no_arguments_prints_help() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
    }

    #[test]
    fn courses_collects_filter() {
        let args = parse(&["courses", "--search", "rust", "--difficulty", "advanced"]).unwrap();
        assert_eq!(
            args.command,
            Command::Courses(CourseFilter::new("rust").with_difficulty(Difficulty::Advanced))
        );
    }

    #[test]
    fn view_accepts_optional_position() {
        let args = parse(&["view", "c1"]).unwrap();
        assert!(matches!(args.command, Command::View { position: None, .. }));

        let args = parse(&["view", "c1", "t1", "s1", "--json"]).unwrap();
        assert_eq!(
            args.command,
            Command::View {
                course_id: "c1".into(),
                position: Some(LessonPosition::new("t1", "s1")),
                json: true,
            }
        );

        assert_eq!(parse(&["view", "c1", "t1"]), Err(ArgsError::IncompletePosition));
    }

    #[test]
    fn missing_positional_is_reported() {
        assert_eq!(
            parse(&["toggle"]),
            Err(ArgsError::MissingArgument { name: "subtopic-id" })
        );
    }

    #[test]
    fn rejects_unknown_flags_and_commands() {
        assert_eq!(
            parse(&["courses", "--fast"]),
            Err(ArgsError::UnknownArg("--fast".into()))
        );
        assert_eq!(
            parse(&["launch"]),
            Err(ArgsError::UnknownCommand("launch".into()))
        );
        assert_eq!(
            parse(&["reset", "now"]),
            Err(ArgsError::UnknownArg("now".into()))
        );
    }

    #[test]
    fn bad_difficulty_is_rejected() {
        assert_eq!(
            parse(&["create", "--difficulty", "expert"]),
            Err(ArgsError::InvalidDifficulty { raw: "expert".into() })
        );
    }

    #[test]
    fn db_flag_overrides_environment() {
        let args = Args::parse(
            ["reset", "--db", "sqlite::memory:"].map(String::from),
            Some("sqlite:///tmp/env.sqlite3".into()),
        )
        .unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");

        let args = Args::parse(["prune"].map(String::from), Some("sqlite:///tmp/env.sqlite3".into()))
            .unwrap();
        assert_eq!(args.db_url, "sqlite:///tmp/env.sqlite3");
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let url = normalize_sqlite_url("sqlite:data/courses.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/courses.sqlite3"));
    }
}
