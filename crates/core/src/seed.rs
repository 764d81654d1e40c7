//! Built-in catalog and user directory used on first launch and after a reset.

use crate::model::{Course, Difficulty, Subtopic, Topic, User, UserId, UserRole};

/// Courses written to an empty store on first access.
#[must_use]
pub fn default_catalog() -> Vec<Course> {
    vec![rust_foundations(), async_rust(), systems_design()]
}

/// The fixed admin user directory.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![
        User::new(UserId::new(1), "Elena Park", "elena.park@lumina.dev", UserRole::Instructor)
            .authored("rust-foundations")
            .authored("async-rust"),
        User::new(UserId::new(2), "Marcus Webb", "marcus.webb@lumina.dev", UserRole::Student)
            .enrolled("rust-foundations", 0.75)
            .enrolled("async-rust", 0.2),
        User::new(UserId::new(3), "Priya Natarajan", "priya.n@lumina.dev", UserRole::Student)
            .enrolled("systems-design", 0.5),
        User::new(UserId::new(4), "Jonas Berg", "jonas.berg@lumina.dev", UserRole::Admin),
        User::new(UserId::new(5), "Sofia Alves", "sofia.alves@lumina.dev", UserRole::Instructor)
            .authored("systems-design"),
        User::new(UserId::new(6), "Dev Patel", "dev.patel@lumina.dev", UserRole::Student),
    ]
}

fn rust_foundations() -> Course {
    Course::seeded(
        "rust-foundations",
        "Rust Foundations",
        "Ownership, borrowing and the type system",
        "A ground-up tour of the language features that make Rust programs fast and memory safe.",
        Difficulty::Beginner,
        "https://images.unsplash.com/photo-1515879218367-8466d910aaa4?q=80&w=2069&auto=format&fit=crop",
        &[
            "Explain ownership and moves",
            "Write functions that borrow instead of clone",
            "Model data with enums and pattern matching",
        ],
        Some(UserId::new(1)),
        vec![
            Topic::new(
                "rf-ownership",
                "Ownership",
                vec![
                    Subtopic::new(
                        "rf-ownership-moves",
                        "Moves and copies",
                        "# Moves and copies\n\nEvery value has exactly one owner. Assigning a `String` \
                         to another binding **moves** it:\n\n```rust\nlet a = String::from(\"hi\");\nlet b = a;\n// `a` is no longer usable\n```\n\nTypes that implement `Copy` are duplicated instead.",
                    ),
                    Subtopic::new(
                        "rf-ownership-borrowing",
                        "Borrowing",
                        "# Borrowing\n\nA reference lets you use a value without taking ownership.\n\n\
                         - any number of `&T`\n- or exactly one `&mut T`\n\nnever both at once.",
                    ),
                ],
            ),
            Topic::new(
                "rf-types",
                "Types",
                vec![
                    Subtopic::new(
                        "rf-types-structs",
                        "Structs",
                        "# Structs\n\nGroup related fields under one name and attach behaviour in an `impl` block.",
                    ),
                    Subtopic::new(
                        "rf-types-enums",
                        "Enums and match",
                        "# Enums and match\n\n`match` must cover every variant, so adding a variant \
                         surfaces every place that needs updating.",
                    ),
                ],
            ),
        ],
    )
}

fn async_rust() -> Course {
    Course::seeded(
        "async-rust",
        "Async Rust in Practice",
        "Futures, executors and structured concurrency",
        "Learn how futures are polled, how runtimes schedule tasks, and how to avoid common pitfalls.",
        Difficulty::Intermediate,
        "https://images.unsplash.com/photo-1558494949-ef010cbdcc31?q=80&w=2034&auto=format&fit=crop",
        &["Describe the Future trait", "Spawn and join tasks", "Use channels safely"],
        Some(UserId::new(1)),
        vec![
            Topic::new(
                "ar-futures",
                "Futures",
                vec![
                    Subtopic::new(
                        "ar-futures-poll",
                        "Polling",
                        "# Polling\n\nA future does nothing until it is polled. `poll` returns \
                         `Poll::Ready(value)` or `Poll::Pending`.",
                    ),
                    Subtopic::new(
                        "ar-futures-await",
                        "async and await",
                        "# async and await\n\n`async fn` desugars to a function returning `impl Future`.",
                    ),
                ],
            ),
            Topic::new(
                "ar-tasks",
                "Tasks",
                vec![Subtopic::new(
                    "ar-tasks-spawn",
                    "Spawning tasks",
                    "# Spawning tasks\n\n`tokio::spawn` hands a future to the runtime and returns a `JoinHandle`.",
                )],
            ),
            Topic::new(
                "ar-channels",
                "Channels",
                vec![
                    Subtopic::new(
                        "ar-channels-mpsc",
                        "mpsc",
                        "# mpsc\n\nMany producers, one consumer. Bounded channels apply backpressure.",
                    ),
                    Subtopic::new(
                        "ar-channels-oneshot",
                        "oneshot",
                        "# oneshot\n\nSend exactly one value, typically a reply to a request.",
                    ),
                ],
            ),
        ],
    )
}

fn systems_design() -> Course {
    Course::seeded(
        "systems-design",
        "Designing Reliable Systems",
        "Storage, replication and failure handling",
        "Trade-offs behind durable storage engines and replicated services.",
        Difficulty::Advanced,
        "https://images.unsplash.com/photo-1544197150-b99a580bb7a8?q=80&w=2070&auto=format&fit=crop",
        &["Compare log-structured and page-oriented storage", "Reason about replication lag"],
        Some(UserId::new(5)),
        vec![
            Topic::new(
                "sd-storage",
                "Storage engines",
                vec![
                    Subtopic::new(
                        "sd-storage-lsm",
                        "Log-structured merge trees",
                        "# LSM trees\n\nWrites go to an in-memory table, flushed to sorted files and compacted later.",
                    ),
                    Subtopic::new(
                        "sd-storage-btree",
                        "B-trees",
                        "# B-trees\n\nFixed-size pages updated in place, with a write-ahead log for crash recovery.",
                    ),
                ],
            ),
            Topic::new(
                "sd-replication",
                "Replication",
                vec![Subtopic::new(
                    "sd-replication-leader",
                    "Leader-based replication",
                    "# Leader-based replication\n\nOne node accepts writes and streams its log to followers.",
                )],
            ),
        ],
    )
}
