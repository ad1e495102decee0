//! `li`: command-line client for LinkedIn's Voyager API.
//!
//! Credentials are the two browser session cookies, passed with `--li-at` /
//! `--jsessionid` or the `LI_AT` / `LI_JSESSIONID` environment variables.
//! Client settings (base URL, user agent, timeout, query ids) come from the
//! `LI_*` variables read by [`ClientConfig::from_env`].
//!
//! ```sh
//! export LI_AT=AQED… LI_JSESSIONID='"ajax:123…"'
//! li me
//! li search people rust developer
//! li messages list
//! li --json messages read jane-doe
//! ```

use std::process;

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use voyager::urn::normalize_public_identifier;
use voyager::{find_conversation_by_profile_urn, Conversation, FeedUpdate, Message, SearchItem};
use voyager_client::{ClientConfig, Credentials, Voyager};

/// li: LinkedIn from the terminal
#[derive(Parser)]
#[command(name = "li", version, about, long_about = None)]
struct Cli {
    /// Log every request line (never headers) to stderr.
    #[arg(long, global = true)]
    debug: bool,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// The `li_at` session cookie.
    #[arg(long, env = "LI_AT", hide_env_values = true, global = true)]
    li_at: Option<String>,

    /// The `JSESSIONID` session cookie, quoted or not.
    #[arg(long, env = "LI_JSESSIONID", hide_env_values = true, global = true)]
    jsessionid: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the signed-in member.
    Me,

    /// Show a profile by public identifier, profile URL or URN.
    Profile {
        /// e.g. `jane-doe`, `@jane-doe` or `https://www.linkedin.com/in/jane-doe/`
        id: String,
    },

    /// Search people or jobs.
    Search {
        #[command(subcommand)]
        kind: SearchCommand,
    },

    /// List posts shared by a member.
    Posts {
        /// Profile or member URN.
        profile_urn: String,
        #[arg(long, default_value_t = 0)]
        start: i64,
        #[arg(long, default_value_t = 10)]
        count: i64,
    },

    /// Publish a text post.
    Post {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Follow a member by `urn:li:member:` URN.
    Follow { member_urn: String },

    /// Send a connection invitation to a `urn:li:fsd_profile:` URN.
    Connect {
        profile_urn: String,
        /// Optional invitation note.
        #[arg(long)]
        note: Option<String>,
    },

    /// Inbox and direct messages.
    #[command(alias = "msg")]
    Messages {
        #[command(subcommand)]
        action: MessagesCommand,
    },
}

#[derive(Subcommand)]
enum SearchCommand {
    People {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
        #[arg(long, default_value_t = 0)]
        start: i64,
        #[arg(long, default_value_t = 10)]
        count: i64,
    },
    Jobs {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
        #[arg(long, default_value_t = 0)]
        start: i64,
        #[arg(long, default_value_t = 10)]
        count: i64,
    },
}

#[derive(Subcommand)]
enum MessagesCommand {
    /// Recent inbox conversations, newest first.
    List {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Read the conversation with a member.
    Read { user: String },
    /// Message a member, starting a conversation if none exists.
    Send {
        user: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Conversations scanned when looking one up by member.
const LOOKUP_CONVERSATIONS: i64 = 25;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] voyager_client::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "li=info,voyager_client=info"
    } else {
        "li=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let credentials = Credentials::new(
        cli.li_at.clone().unwrap_or_default(),
        cli.jsessionid.clone().unwrap_or_default(),
    );
    if !credentials.is_complete() {
        fatal("not logged in: set LI_AT and LI_JSESSIONID (or --li-at / --jsessionid)");
    }

    let config = ClientConfig::from_env();
    let trace = cli.debug || config.trace;
    let api = Voyager::new(credentials, config.with_trace(trace))
        .unwrap_or_else(|e| fatal(&e.to_string()));

    if let Err(e) = run(&api, &cli).await {
        fatal(&e.to_string());
    }
}

async fn run(api: &Voyager, cli: &Cli) -> Result<(), CliError> {
    let out = Output { json: cli.json };

    match &cli.command {
        Command::Me => {
            let me = api.me().await?;
            out.value(&me, || {
                println!("{} {}", me.first_name, me.last_name);
                println!("{}", me.occupation);
                println!("public id:   {}", me.public_identifier);
                println!("profile urn: {}", me.profile_urn);
                println!("member urn:  {}", me.member_urn);
            })
        }

        Command::Profile { id } => {
            let profile = api.profile(&normalize_public_identifier(id)).await?;
            if profile.is_empty() {
                return Err(CliError::NotFound(format!("no profile found for {id:?}")));
            }
            out.value(&profile, || {
                println!("{} {}", profile.first_name, profile.last_name);
                println!("{}", profile.headline);
                if !profile.location.is_empty() {
                    println!("{}", profile.location);
                }
                println!("urn: {}", profile.entity_urn);
                if !profile.summary.is_empty() {
                    println!("\n{}", profile.summary);
                }
            })
        }

        Command::Search { kind } => {
            let items = match kind {
                SearchCommand::People {
                    keywords,
                    start,
                    count,
                } => api.search_people(&keywords.join(" "), *start, *count).await?,
                SearchCommand::Jobs {
                    keywords,
                    start,
                    count,
                } => api.search_jobs(&keywords.join(" "), *start, *count).await?,
            };
            out.value(&items, || print_search(&items))
        }

        Command::Posts {
            profile_urn,
            start,
            count,
        } => {
            let posts = api.profile_posts(profile_urn, *start, *count).await?;
            out.value(&posts, || print_posts(&posts))
        }

        Command::Post { text } => {
            let created = api.create_post(&text.join(" ")).await?;
            out.value(&created, || println!("posted {}", created.entity_urn))
        }

        Command::Follow { member_urn } => {
            api.follow(member_urn).await?;
            println!("following {member_urn}");
            Ok(())
        }

        Command::Connect { profile_urn, note } => {
            api.connect(profile_urn, note.as_deref()).await?;
            println!("invitation sent to {profile_urn}");
            Ok(())
        }

        Command::Messages { action } => run_messages(api, &out, action).await,
    }
}

async fn run_messages(
    api: &Voyager,
    out: &Output,
    action: &MessagesCommand,
) -> Result<(), CliError> {
    let mailbox = api.my_profile_urn().await?;

    match action {
        MessagesCommand::List { limit } => {
            let convos = api.list_conversations(&mailbox, *limit).await?;
            out.value(&convos, || print_conversations(&convos, &mailbox))
        }

        MessagesCommand::Read { user } => {
            let (name, target_urn) = lookup_member(api, user).await?;
            let convos = api.list_conversations(&mailbox, LOOKUP_CONVERSATIONS).await?;
            let convo = find_conversation_by_profile_urn(&convos, &target_urn)
                .ok_or_else(|| CliError::NotFound(format!("no conversation found with {name}")))?;

            let msgs = api.messages(&convo.entity_urn).await?;
            out.value(&msgs, || print_messages(&name, &msgs))
        }

        MessagesCommand::Send { user, text } => {
            let (name, target_urn) = lookup_member(api, user).await?;
            let text = text.join(" ");
            let convos = api.list_conversations(&mailbox, LOOKUP_CONVERSATIONS).await?;

            match find_conversation_by_profile_urn(&convos, &target_urn) {
                Some(convo) => api.send_message(&mailbox, &convo.entity_urn, &text).await?,
                None => {
                    api.create_conversation(&mailbox, &[target_urn.as_str()], &text)
                        .await?
                }
            }
            println!("message sent to {name}");
            Ok(())
        }
    }
}

/// Display name and profile URN of the member behind `user`.
async fn lookup_member(api: &Voyager, user: &str) -> Result<(String, String), CliError> {
    let handle = normalize_public_identifier(user);
    let profile = api.profile(&handle).await?;
    if profile.entity_urn.is_empty() {
        return Err(CliError::NotFound(format!(
            "could not determine profile urn for {handle:?}"
        )));
    }
    let name = format!("{} {}", profile.first_name, profile.last_name)
        .trim()
        .to_string();
    let name = if name.is_empty() { handle } else { name };
    Ok((name, profile.entity_urn))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

struct Output {
    json: bool,
}

impl Output {
    /// Print `value` as JSON, or run `text` to print it for humans.
    fn value<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce()) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }
}

fn print_search(items: &[SearchItem]) {
    if items.is_empty() {
        println!("No results.");
    }
    for item in items {
        println!("{}", item.title);
        for line in [&item.primary_subtitle, &item.secondary_subtitle] {
            if !line.is_empty() {
                println!("  {line}");
            }
        }
        if !item.public_identifier.is_empty() {
            println!("  @{}", item.public_identifier);
        }
        println!("  {}\n", item.target_urn);
    }
}

fn print_posts(posts: &[FeedUpdate]) {
    if posts.is_empty() {
        println!("No posts.");
    }
    for post in posts {
        println!("{}  {}", format_timestamp(post.published_at), post.entity_urn);
        if !post.commentary.is_empty() {
            println!("  {}", preview(&post.commentary, 200));
        }
        println!();
    }
}

fn print_conversations(convos: &[Conversation], own_urn: &str) {
    if convos.is_empty() {
        println!("No conversations found.");
    }
    for c in convos {
        let mut names: Vec<String> = c
            .participants
            .iter()
            .filter(|p| p.profile_urn != own_urn)
            .map(|p| match p.full_name() {
                n if n.is_empty() => p.profile_urn.clone(),
                n => n,
            })
            .collect();
        if names.is_empty() {
            names.push("(unknown)".into());
        }
        let who = names.join(", ");

        match &c.last_message {
            Some(m) => println!(
                "{who}  {}\n  {}\n",
                format_timestamp(m.delivered_at),
                preview(&m.body, 80)
            ),
            None => println!("{who}  (no messages)\n"),
        }
    }
}

fn print_messages(with: &str, msgs: &[Message]) {
    if msgs.is_empty() {
        println!("No messages in this conversation.");
        return;
    }
    println!("Conversation with {with}\n{}\n", "─".repeat(40));
    for m in msgs {
        let sender = if m.sender_name.is_empty() {
            &m.sender_urn
        } else {
            &m.sender_name
        };
        println!("[{}] {sender}:\n{}\n", format_timestamp(m.delivered_at), m.body);
    }
}

/// Local time for an epoch-millisecond timestamp, or `""` when unset.
fn format_timestamp(ms: i64) -> String {
    if ms <= 0 {
        return String::new();
    }
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(t) => t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

/// Single-line preview of at most `max` chars.
fn preview(s: &str, max: usize) -> String {
    let flat: String = s
        .chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

/// Print an error message to stderr and exit with code 1.
fn fatal(msg: &str) -> ! {
    eprintln!("li: {msg}");
    process::exit(1);
}
