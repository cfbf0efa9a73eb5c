use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Portfolio content engine: frontmatter content, ordering and related items")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to ./folio.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Content root holding projects/ and articles/
    #[arg(long, global = true, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items of a kind in collection order
    List {
        /// Content kind (project, article)
        #[arg(value_name = "KIND")]
        kind: String,

        /// Only items with this tag
        #[arg(long, short = 't')]
        tag: Option<String>,

        /// Only featured items
        #[arg(long)]
        featured: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single item by slug
    Get {
        #[arg(value_name = "KIND")]
        kind: String,

        slug: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the previous and next items around a slug
    Nav {
        #[arg(value_name = "KIND")]
        kind: String,

        slug: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show items sharing tags with a slug
    Related {
        #[arg(value_name = "KIND")]
        kind: String,

        slug: String,

        /// Maximum number of items (defaults to related_limit from config)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report content problems (duplicate slugs, missing dates, ...)
    Check {
        /// Exit with status 2 when any warning is found
        #[arg(long)]
        strict: bool,
    },

    /// Write the XML sitemap
    Sitemap {
        /// Output file (stdout when omitted)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Serve the content API over HTTP
    Serve {
        /// Address to bind, e.g. 127.0.0.1:3000
        #[arg(long)]
        bind: Option<String>,
    },
}
