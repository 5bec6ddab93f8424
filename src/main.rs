//! CLI entry point for basic-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use basic_blog::commands;
use basic_blog::content::{BlogRoll, PostStatus};
use basic_blog::Blog;

#[derive(Parser)]
#[command(name = "basic-blog")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "A small blog engine with save-time rendering", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post source file
    New {
        /// Title of the new post
        title: String,

        /// Slug (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,

        /// Markup formatter (none, linebreaks, markdown)
        #[arg(short, long)]
        markup: Option<String>,

        /// Create the post as a draft
        #[arg(long)]
        draft: bool,

        /// Category slug, may be repeated
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Tag, may be repeated
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Import post source files into the store
    Import {
        /// Directory to import (defaults to the configured source_dir)
        dir: Option<PathBuf>,
    },

    /// Re-render the cached HTML of every post
    Render,

    /// Add a category
    Category {
        /// Display title
        title: String,

        /// Slug (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Add a blog roll entry
    Blogroll {
        /// Name of the blog
        name: String,

        /// Absolute URL of the blog
        url: String,

        /// Position in the blog roll, lowest first
        #[arg(short, long, default_value = "0")]
        order: u32,

        /// Short description of the blog
        #[arg(long, default_value = "")]
        description: String,

        /// e.g. friend, co-worker
        #[arg(short, long, default_value = "")]
        relationship: String,
    },

    /// List blog content
    List {
        /// Type of content to list (post, feed, category, tag, blogroll)
        #[arg(default_value = "post")]
        r#type: String,

        /// Category slug or tag name
        name: Option<String>,

        /// Page of the post listing
        #[arg(short, long)]
        page: Option<usize>,

        /// Include drafts and scheduled posts
        #[arg(short, long)]
        all: bool,
    },

    /// Show a post by its permalink (YYYY/MM/DD/slug)
    Show { path: String },

    /// Show resolved blog settings
    Settings {
        /// A single setting, e.g. blog_pagesize
        key: Option<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "basic_blog=debug,info"
    } else {
        "basic_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            slug,
            markup,
            draft,
            categories,
            tags,
        } => {
            let blog = Blog::new(&base_dir)?;
            let options = commands::new::NewPost {
                slug: slug.as_deref(),
                markup: markup.as_deref(),
                status: if draft {
                    PostStatus::Draft
                } else {
                    PostStatus::Public
                },
                categories: &categories,
                tags: &tags,
            };
            let path = commands::new::create_post(&blog, &title, &options)?;
            println!("Created: {:?}", path);
        }

        Commands::Import { dir } => {
            let blog = Blog::new(&base_dir)?;
            let dir = dir.map(|d| if d.is_absolute() { d } else { base_dir.join(d) });
            let summary = commands::import::run(&blog, dir.as_deref())?;
            println!(
                "Imported {} new and {} updated posts",
                summary.inserted, summary.updated
            );
        }

        Commands::Render => {
            let blog = Blog::new(&base_dir)?;
            let count = commands::render::run(&blog)?;
            println!("Rendered {} posts", count);
        }

        Commands::Category { title, slug } => {
            let blog = Blog::new(&base_dir)?;
            let category = commands::category::add(&blog, &title, slug.as_deref())?;
            println!(
                "Added category {} [{}]",
                category.title,
                category.absolute_url(&blog.config)
            );
        }

        Commands::Blogroll {
            name,
            url,
            order,
            description,
            relationship,
        } => {
            let blog = Blog::new(&base_dir)?;
            let mut entry = BlogRoll::new(name, url);
            entry.sort_order = order;
            entry.description = description;
            entry.relationship = relationship;
            let id = commands::blogroll::add(&blog, entry)?;
            println!("Added blog roll entry {}", id);
        }

        Commands::List {
            r#type,
            name,
            page,
            all,
        } => {
            let blog = Blog::new(&base_dir)?;
            let options = commands::list::ListOptions {
                name: name.as_deref(),
                page,
                all,
            };
            commands::list::run(&blog, &r#type, &options)?;
        }

        Commands::Show { path } => {
            let blog = Blog::new(&base_dir)?;
            commands::show::run(&blog, &path)?;
        }

        Commands::Settings { key } => {
            let blog = Blog::new(&base_dir)?;
            commands::settings::run(&blog, key.as_deref())?;
        }

        Commands::Version => {
            println!("basic-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
