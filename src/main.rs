use clap::Parser;
use folio::cli::{
    handle_check, handle_get, handle_list, handle_nav, handle_related, handle_serve,
    handle_sitemap, Cli, Commands,
};

fn main() {
    let cli = Cli::parse();

    let level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    folio::logging::init(level);

    let global = &cli.global;
    let result = match cli.command {
        Commands::List {
            kind,
            tag,
            featured,
            json,
        } => handle_list(global, kind, tag, featured, json),
        Commands::Get { kind, slug, json } => handle_get(global, kind, slug, json),
        Commands::Nav { kind, slug, json } => handle_nav(global, kind, slug, json),
        Commands::Related {
            kind,
            slug,
            limit,
            json,
        } => handle_related(global, kind, slug, limit, json),
        Commands::Check { strict } => handle_check(global, strict),
        Commands::Sitemap { output } => handle_sitemap(global, output),
        Commands::Serve { bind } => handle_serve(global, bind),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
