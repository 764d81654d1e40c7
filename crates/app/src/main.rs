use std::error::Error;

use course_core::model::{CourseDraft, SubtopicId, Topic};
use course_core::{course_completion, filter_topics};
use services::{AppServices, Clock, CourseView};
use tracing_subscriber::EnvFilter;

mod args;

use args::{Args, ArgsError, Command, CreateArgs, print_usage};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn print_view(view: &CourseView) {
    let course = &view.course;
    println!("{} ({})", course.title(), course.difficulty());
    println!(
        "progress: {}/{} lessons, {}%",
        view.completion.completed, view.completion.total, view.completion.percent
    );

    match view.current() {
        Some((topic, lesson)) => {
            let mark = if view.current_complete { "x" } else { " " };
            println!();
            println!("[{mark}] {} / {}", topic.title(), lesson.title());
            println!();
            println!("{}", lesson.content());
        }
        None => println!("no lesson at this position"),
    }

    println!();
    if let Some(prev) = &view.previous {
        println!("previous: {} {}", prev.topic_id, prev.subtopic_id);
    }
    if let Some(next) = &view.next {
        println!("next:     {} {}", next.topic_id, next.subtopic_id);
    }
}

fn build_draft(create: CreateArgs) -> Result<CourseDraft, Box<dyn Error>> {
    let mut draft = CourseDraft::new(create.title, create.description).with_subtitle(create.subtitle);
    if let Some(level) = create.difficulty {
        draft = draft.with_difficulty(level);
    }
    if let Some(cover) = create.cover {
        draft = draft.with_cover_image(cover);
    }
    if let Some(path) = create.topics_file {
        let raw = std::fs::read_to_string(&path)?;
        let topics: Vec<Topic> = serde_json::from_str(&raw)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        draft = draft.with_topics(topics);
    }
    Ok(draft)
}

async fn execute(app: &AppServices, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Courses(filter) => {
            let courses = app.catalog().search(&filter).await?;
            if courses.is_empty() {
                println!("no courses match");
            }
            for course in courses {
                println!(
                    "{:<24} {:<13} {} ({} lessons)",
                    course.id(),
                    course.difficulty().to_string(),
                    course.title(),
                    course.subtopic_count()
                );
            }
        }
        Command::Outline { course_id, search } => {
            let course = app
                .catalog()
                .get(&course_id)
                .await?
                .ok_or_else(|| format!("course not found: {course_id}"))?;
            let progress = app.progress().load().await?;
            for topic in filter_topics(&course, &search) {
                println!("{} ({})", topic.title(), topic.id());
                for lesson in topic.subtopics() {
                    let mark = if progress.is_complete(lesson.id().as_str()) { "x" } else { " " };
                    println!("  [{mark}] {} ({})", lesson.title(), lesson.id());
                }
            }
        }
        Command::View {
            course_id,
            position,
            json,
        } => {
            let view = app
                .viewer()
                .open(&course_id, position)
                .await?
                .ok_or_else(|| format!("course not found: {course_id}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_view(&view);
            }
        }
        Command::Toggle { subtopic_id } => {
            let id = SubtopicId::new(subtopic_id);
            let progress = app.progress().toggle(&id).await?;
            let state = if progress.is_complete(id.as_str()) {
                "complete"
            } else {
                "not complete"
            };
            println!("{id}: {state}");
        }
        Command::Progress { course_id } => {
            let course = app
                .catalog()
                .get(&course_id)
                .await?
                .ok_or_else(|| format!("course not found: {course_id}"))?;
            let summary = course_completion(&course, &app.progress().load().await?);
            println!(
                "{}: {}/{} lessons, {}%",
                course.title(),
                summary.completed,
                summary.total,
                summary.percent
            );
        }
        Command::Create(create) => {
            let course = app.catalog().create(build_draft(create)?).await?;
            println!("created {}", course.id());
        }
        Command::Users { search } => {
            let users = app.users();
            for user in users.search(&search) {
                println!(
                    "{:<4} {:<20} {:<28} {:<10} enrolled: {}, authored: {}",
                    user.id().to_string(),
                    user.name(),
                    user.email(),
                    user.role().to_string(),
                    user.enrolled_courses().len(),
                    user.authored_courses().len()
                );
            }
        }
        Command::Prune => {
            let courses = app.catalog().list().await?;
            let removed = app.progress().prune_stale(&courses).await?;
            println!("removed {removed} stale progress entries");
        }
        Command::Reset => {
            app.catalog().reset().await?;
            println!("catalog restored, progress cleared");
        }
        Command::Help => print_usage(),
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn Error>> {
    let parsed = Args::parse(std::env::args().skip(1), std::env::var("COURSE_DB_URL").ok())
        .inspect_err(|e| {
            eprintln!("{e}");
            print_usage();
        })?;

    if parsed.command == Command::Help {
        print_usage();
        return Ok(());
    }

    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(&parsed.db_url, Clock::default_clock()).await?;
    tracing::debug!(db_url = %parsed.db_url, "services ready");

    execute(&app, parsed.command).await
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
